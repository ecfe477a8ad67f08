//! flowmark - chat reply to HTML formatter

use std::fs;
use std::io::Read;
use std::process::ExitCode;

use clap::Parser;

use flowmark::{ChatEnvelope, format_ai_message, format_user_message};

#[derive(Parser)]
#[command(name = "flowmark")]
#[command(version, about = "Format chat replies as safe HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    flowmark reply.txt            Format a raw reply
    flowmark -e response.json     Unwrap a chat API envelope, then format
    echo '**hi**' | flowmark      Read the reply from stdin")]
struct Cli {
    /// Input file (raw reply text, or a JSON envelope with -e); stdin when omitted
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Treat input as a {success, data, message} chat envelope
    #[arg(short, long)]
    envelope: bool,

    /// Escape as a user-authored message instead of rendering markdown
    #[arg(short, long)]
    user: bool,

    /// Write the HTML to a file instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let input = read_input(cli.input.as_deref())?;
    let reply = if cli.envelope {
        unwrap_envelope(&input)?
    } else {
        input
    };

    let html = if cli.user {
        format_user_message(&reply)
    } else {
        format_ai_message(&reply)
    };

    match &cli.output {
        Some(path) => fs::write(path, html).map_err(|e| format!("{path}: {e}"))?,
        None => println!("{html}"),
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String, String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("{path}: {e}")),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| e.to_string())?;
            Ok(buf)
        }
    }
}

fn unwrap_envelope(json: &str) -> Result<String, String> {
    let envelope: ChatEnvelope = serde_json::from_str(json).map_err(|e| e.to_string())?;
    match envelope.response_text() {
        Some(text) => Ok(text.to_string()),
        None => Err(envelope
            .error_message()
            .unwrap_or("chat request failed with no message")
            .to_string()),
    }
}
