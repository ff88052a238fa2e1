//! Echoプロバイダの実装
//!
//! 実際にLLM APIを呼び出さず、受け取ったクエリをそのまま返します。
//! トークン数は空白区切りの語数で近似します。オフライン動作確認用。

use crate::error::Error;
use crate::llm::provider::{
    CacheRequest, CachedContent, GenerateResponse, LlmProvider, Message, UsageMetadata,
};
use std::sync::atomic::{AtomicU64, Ordering};

/// Echoプロバイダ
#[derive(Debug, Default)]
pub struct EchoProvider {
    next_id: AtomicU64,
}

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self::default()
    }
}

fn approx_tokens(s: &str) -> u64 {
    s.split_whitespace().count() as u64
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn create_cached_content(&self, request: &CacheRequest<'_>) -> Result<CachedContent, Error> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        Ok(CachedContent {
            name: format!("cachedContents/echo-{}", id),
            model: format!("models/{}", request.model),
            display_name: request.display_name.to_string(),
            total_token_count: approx_tokens(request.system_instruction)
                + approx_tokens(request.contents),
        })
    }

    fn generate_with_cache(
        &self,
        cached: &CachedContent,
        history: &[Message],
        query: &str,
    ) -> Result<GenerateResponse, Error> {
        let text = format!("[Echo Provider] {}", query);
        let history_tokens: u64 = history.iter().map(|m| approx_tokens(&m.content)).sum();
        let cached_tokens = cached.total_token_count;
        let prompt = cached_tokens + history_tokens + approx_tokens(query);
        let candidates = approx_tokens(&text);
        Ok(GenerateResponse {
            text,
            usage: Some(UsageMetadata {
                prompt_token_count: prompt,
                candidates_token_count: candidates,
                total_token_count: prompt + candidates,
                cached_content_token_count: cached_tokens,
            }),
        })
    }
}
