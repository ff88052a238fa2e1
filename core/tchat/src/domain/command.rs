//! 対話ループの 1 行入力を解釈した結果（Command Pattern）

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// 通常のプロンプト
    Prompt(String),
    /// /upload <path>...: アップロード集合を置き換える
    Upload(Vec<PathBuf>),
    /// /source: 結合済みトランスクリプトを表示
    Source,
    /// /history: 会話を再表示
    History,
    /// /help
    Help,
    /// /quit, /exit
    Quit,
    /// 未知のスラッシュコマンド
    Unknown(String),
}

impl ChatCommand {
    /// 空行（空白のみ）は None。`//` で始まる行は先頭の `/` を 1 つ外したプロンプト
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(escaped) = trimmed.strip_prefix("//") {
            return Some(Self::Prompt(format!("/{}", escaped)));
        }
        if !trimmed.starts_with('/') {
            return Some(Self::Prompt(trimmed.to_string()));
        }
        let mut words = trimmed.split_whitespace();
        let name = words.next().unwrap_or_default();
        let cmd = match name {
            "/upload" => Self::Upload(words.map(PathBuf::from).collect()),
            "/source" => Self::Source,
            "/history" => Self::History,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        };
        Some(cmd)
    }
}
