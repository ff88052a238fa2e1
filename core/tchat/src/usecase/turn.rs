//! チャットターンの制御
//!
//! ユーザー発話を履歴に積み、それ以前の履歴を再生してキャッシュ付きで問い合わせ、
//! 応答を使用量付きで積む。失敗時はユーザー発話だけが残る（再試行はしない）。

use crate::domain::{replay_history, ChatMessage, Session, Usage};
use common::error::Error;
use common::llm::CachedContent;
use common::ports::outbound::{LlmProvider, Log, LogLevel, LogRecord};
use std::sync::Arc;

pub struct ChatTurnController {
    log: Arc<dyn Log>,
}

impl ChatTurnController {
    pub fn new(log: Arc<dyn Log>) -> Self {
        Self { log }
    }

    /// 1 ターンを処理する
    ///
    /// # Returns
    /// * `Ok(())` - 応答を履歴に追加した（履歴 +2）
    /// * `Err(Error)` - 問い合わせに失敗した（履歴 +1、ユーザー発話のみ）
    pub fn handle_turn(
        &self,
        session: &mut Session,
        provider: &dyn LlmProvider,
        cached: &CachedContent,
        prompt: &str,
    ) -> Result<(), Error> {
        session.push(ChatMessage::user(prompt));

        let prior = &session.messages()[..session.len() - 1];
        let history = replay_history(prior);
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "turn started")
                .layer("usecase")
                .kind("turn")
                .field("history_len", history.len())
                .field("cached_content", cached.name.as_str()),
        );

        let response = match provider.generate_with_cache(cached, &history, prompt) {
            Ok(r) => r,
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Error, format!("turn failed: {}", e))
                        .layer("usecase")
                        .kind("turn"),
                );
                return Err(e);
            }
        };

        let usage = response.usage.map(Usage::from);
        let mut record = LogRecord::new(LogLevel::Info, "turn finished")
            .layer("usecase")
            .kind("turn");
        if let Some(u) = usage {
            record = record
                .field("prompt_tokens", u.prompt_tokens)
                .field("candidates_tokens", u.candidates_tokens)
                .field("total_tokens", u.total_tokens)
                .field("cached_tokens", u.cached_tokens);
        }
        let _ = self.log.log(&record);

        session.push(ChatMessage::assistant(response.text, usage));
        Ok(())
    }
}
