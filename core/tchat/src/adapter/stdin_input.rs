//! 標準入力から 1 行ずつ読む UserInput 実装

use crate::ports::outbound::UserInput;
use common::error::Error;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "Ask a question about the transcripts... > ";

pub struct StdinInput;

impl StdinInput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdinInput {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInput for StdinInput {
    fn next_line(&self) -> Result<Option<String>, Error> {
        print!("{}", PROMPT);
        io::stdout()
            .flush()
            .map_err(|e| Error::io_msg(format!("Failed to flush stdout: {}", e)))?;

        let mut line = String::new();
        let n = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(format!("Failed to read input: {}", e)))?;
        if n == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
