mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use cli::{parse_args, print_completion, Config, ParseOutcome};
use ports::inbound::UseCaseRunner;
use wiring::{wire_chat, wire_tchat, App};

/// Config に従ってチャットを走らせる Runner
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        if config.help {
            print_help();
            return Ok(0);
        }

        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("files", config.files.len())
                .field(
                    "profile",
                    config
                        .profile
                        .as_ref()
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "gemini".to_string()),
                ),
        );

        let result = wire_chat(&self.app, &config).and_then(|mut chat| chat.run(&config.files));

        let code = result.as_ref().copied().unwrap_or_else(|e| e.exit_code());
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("tchat: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_tchat(config.verbose);
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: tchat [options] [FILE.txt...]");
}

fn print_help() {
    println!("Usage: tchat [options] [FILE.txt...]");
    println!("Options:");
    println!("  -h, --help                Show this help message");
    println!("  -p, --profile <profile>   Specify LLM profile (gemini, echo). Default: gemini");
    println!("  -m, --model <model>       Specify model name. Default: gemini-3-pro-preview");
    println!("  --no-interactive          Do not prompt for an API key (fail if AI_STUDIO_API_KEY is unset)");
    println!("  -v, --verbose             Mirror structured log records to stderr");
    println!("  --generate <shell>        Generate shell completion script (bash, zsh, fish, ...)");
    println!();
    println!("Commands (inside the chat):");
    println!("  //<text>                  Ask a question that starts with '/'");
    println!("  /upload <file.txt>...     Replace the uploaded transcripts");
    println!("  /source                   Show the combined transcript source");
    println!("  /history                  Show the conversation so far");
    println!("  /help                     Show the command list");
    println!("  /quit, /exit              Leave the chat (EOF also works)");
    println!();
    println!("Environment:");
    println!("  AI_STUDIO_API_KEY       Google AI Studio API key. Prompted for when unset.");
    println!("  TCHAT_HOME              Home directory. Log: $TCHAT_HOME/state/log.jsonl");
    println!("                          If unset, $XDG_CONFIG_HOME/tchat (e.g. ~/.config/tchat) is used.");
    println!("  TCHAT_GEMINI_BASE_URL   Override the Gemini REST base URL");
    println!();
    println!("Description:");
    println!("  Upload plain-text transcripts, cache them on the server once per content,");
    println!("  and ask questions answered from the transcripts first.");
    println!();
    println!("Examples:");
    println!("  tchat meeting.txt");
    println!("  tchat -p echo day1.txt day2.txt");
}
