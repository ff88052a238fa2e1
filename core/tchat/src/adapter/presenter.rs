//! 端末への表示実装
//!
//! 会話・見出し・ソースは stdout、警告・エラー・処理中表示は stderr に出す。

use crate::domain::caption::usage_caption;
use crate::domain::{ChatMessage, Role};
use crate::ports::outbound::Presenter;
use std::io::{self, Write};

const TITLE: &str = "Intelligent Transcript Chat";
const RULE: &str = "----------------------------------------";

pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

/// 1 メッセージ分の表示テキスト（assistant で使用量があれば最後の行にキャプション）
pub fn format_message(message: &ChatMessage) -> String {
    let mut out = format!("[{}]\n{}", message.role.as_str(), message.content);
    if let (Role::Assistant, Some(u)) = (message.role, &message.usage) {
        out.push('\n');
        out.push_str(&usage_caption(u));
    }
    out
}

impl Presenter for TerminalPresenter {
    fn show_auth_required(&self) {
        eprintln!("== Authentication ==");
        eprintln!("warning: API Key not found in environment variables.");
    }

    fn show_welcome(&self) {
        println!("== {} ==", TITLE);
        println!("Welcome! Please upload transcript files to start the chat.");
        println!("  /upload <file.txt>...   (or pass files on the command line)");
    }

    fn show_header(&self, caption: &str) {
        println!("== {} ==", TITLE);
        println!("{}", RULE);
        println!("{}", caption);
        println!("{}", RULE);
    }

    fn show_message(&self, message: &ChatMessage) {
        println!("{}", format_message(message));
        println!();
    }

    fn show_source(&self, combined_text: &str) {
        println!("{}", combined_text);
        println!("{}", RULE);
    }

    fn show_working(&self, label: &str) {
        eprintln!("{}", label);
        let _ = io::stderr().flush();
    }

    fn show_info(&self, text: &str) {
        println!("{}", text);
    }

    fn show_error(&self, text: &str) {
        eprintln!("error: {}", text);
    }
}
