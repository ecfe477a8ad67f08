//! The chat endpoint's JSON response envelope.
//!
//! Every backend endpoint answers with a `{success, data | message}`
//! envelope; the renderer only ever consumes the `data.response` text of
//! the chat endpoints. Transport is someone else's problem — this module
//! just gives the envelope a type.

use serde::Deserialize;

/// Envelope returned by the scrape/chat endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<ChatData>,
    /// Error description, present when `success` is false.
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of a successful chat call.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatData {
    pub response: String,
}

impl ChatEnvelope {
    /// The reply text to render, when the call succeeded and carried one.
    pub fn response_text(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.data.as_ref().map(|data| data.response.as_str())
    }

    /// Backend-reported error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_envelope() {
        let envelope: ChatEnvelope =
            serde_json::from_str(r#"{"success":true,"data":{"response":"Hi there"}}"#).unwrap();
        assert_eq!(envelope.response_text(), Some("Hi there"));
        assert_eq!(envelope.error_message(), None);
    }

    #[test]
    fn test_failed_envelope() {
        let envelope: ChatEnvelope =
            serde_json::from_str(r#"{"success":false,"message":"File not found"}"#).unwrap();
        assert_eq!(envelope.response_text(), None);
        assert_eq!(envelope.error_message(), Some("File not found"));
    }

    #[test]
    fn test_success_without_data() {
        let envelope: ChatEnvelope = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(envelope.response_text(), None);
    }
}
