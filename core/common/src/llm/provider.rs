//! LLMプロバイダのトレイト定義

use crate::domain::ModelName;
use crate::error::Error;

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（Gemini、Echo）はこのトレイトを実装する必要があります。
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// サーバー側にキャッシュ済みコンテキストを作成する
    ///
    /// # Arguments
    /// * `request` - モデル・表示名・システム指示・本文
    ///
    /// # Returns
    /// * `Ok(CachedContent)` - 作成されたキャッシュのハンドル
    /// * `Err(Error)` - 認証・クォータ・不正な内容など
    fn create_cached_content(&self, request: &CacheRequest<'_>) -> Result<CachedContent, Error>;

    /// キャッシュを参照して 1 ターン分の応答を得る
    ///
    /// # Arguments
    /// * `cached` - 参照するキャッシュ
    /// * `history` - これまでの会話（role は "user" / "model"）
    /// * `query` - 今回のユーザー入力
    fn generate_with_cache(
        &self,
        cached: &CachedContent,
        history: &[Message],
        query: &str,
    ) -> Result<GenerateResponse, Error>;
}

/// キャッシュ作成リクエスト
#[derive(Debug, Clone)]
pub struct CacheRequest<'a> {
    pub model: &'a ModelName,
    pub display_name: &'a str,
    pub system_instruction: &'a str,
    pub contents: &'a str,
}

/// サーバー側キャッシュのハンドル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedContent {
    /// 例: "cachedContents/abc123"
    pub name: String,
    /// 例: "models/gemini-3-pro-preview"
    pub model: String,
    pub display_name: String,
    /// キャッシュされた素材の総トークン数
    pub total_token_count: u64,
}

/// 応答のトークン使用量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageMetadata {
    pub prompt_token_count: u64,
    pub candidates_token_count: u64,
    pub total_token_count: u64,
    /// 上流に無い場合は 0
    pub cached_content_token_count: u64,
}

/// チャットターンの応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResponse {
    pub text: String,
    pub usage: Option<UsageMetadata>,
}

/// 上流に送るメッセージ（テキストのみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::new("model", content)
    }
}
