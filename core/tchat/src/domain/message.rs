//! 会話メッセージ（role + content + 使用量）と上流向けの再生履歴

use common::llm::{Message as LlmMessage, UsageMetadata};

/// 発話者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// 1 ターン分のトークン使用量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub candidates_tokens: u64,
    pub total_tokens: u64,
    pub cached_tokens: u64,
}

impl From<UsageMetadata> for Usage {
    fn from(u: UsageMetadata) -> Self {
        Self {
            prompt_tokens: u.prompt_token_count,
            candidates_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
            cached_tokens: u.cached_content_token_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub usage: Option<Usage>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            usage: None,
        }
    }

    pub fn assistant(content: impl Into<String>, usage: Option<Usage>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            usage,
        }
    }
}

/// 上流に送る履歴へ変換する
///
/// user はそのまま user、それ以外は model。本文のみで使用量は送らない。
pub fn replay_history(messages: &[ChatMessage]) -> Vec<LlmMessage> {
    messages
        .iter()
        .map(|m| match m.role {
            Role::User => LlmMessage::user(m.content.clone()),
            _ => LlmMessage::model(m.content.clone()),
        })
        .collect()
}
