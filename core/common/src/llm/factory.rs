//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::domain::{ApiKey, ProviderName};
use crate::error::Error;
use crate::llm::echo::EchoProvider;
use crate::llm::gemini::GeminiProvider;
use crate::llm::provider::{CacheRequest, CachedContent, GenerateResponse, LlmProvider, Message};

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Gemini（cachedContents 対応）
    Gemini,
    /// Echo（クエリを返すだけ）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Echo => "echo",
        }
    }

    /// プロバイダ名（None のとき gemini）から解決。不明なら usage エラー
    pub fn resolve(name: Option<&ProviderName>) -> Result<Self, Error> {
        let name = name.map(|n| n.as_ref()).unwrap_or("gemini");
        Self::from_str(name).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Unknown provider: '{}'. Available: echo, gemini",
                name
            ))
        })
    }
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    Gemini(GeminiProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::Gemini(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn create_cached_content(&self, request: &CacheRequest<'_>) -> Result<CachedContent, Error> {
        match self {
            Self::Gemini(p) => p.create_cached_content(request),
            Self::Echo(p) => p.create_cached_content(request),
        }
    }

    fn generate_with_cache(
        &self,
        cached: &CachedContent,
        history: &[Message],
        query: &str,
    ) -> Result<GenerateResponse, Error> {
        match self {
            Self::Gemini(p) => p.generate_with_cache(cached, history, query),
            Self::Echo(p) => p.generate_with_cache(cached, history, query),
        }
    }
}

/// プロバイダを作成する
///
/// # Arguments
/// * `provider_type` - プロバイダタイプ
/// * `api_key` - 解決済みの API キー（Echo では使わない）
/// * `base_url` - ベース URL（None のとき各プロバイダのデフォルト）
pub fn create_provider(
    provider_type: ProviderType,
    api_key: ApiKey,
    base_url: Option<String>,
) -> AnyProvider {
    match provider_type {
        ProviderType::Gemini => AnyProvider::Gemini(GeminiProvider::new(api_key, base_url)),
        ProviderType::Echo => AnyProvider::Echo(EchoProvider::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_from_str() {
        assert_eq!(ProviderType::from_str("gemini"), Some(ProviderType::Gemini));
        assert_eq!(ProviderType::from_str("GEMINI"), Some(ProviderType::Gemini));
        assert_eq!(ProviderType::from_str("echo"), Some(ProviderType::Echo));
        assert_eq!(ProviderType::from_str("ECHO"), Some(ProviderType::Echo));
        assert_eq!(ProviderType::from_str("gpt"), None);
    }

    #[test]
    fn test_provider_type_as_str_roundtrip() {
        for t in [ProviderType::Gemini, ProviderType::Echo] {
            assert_eq!(ProviderType::from_str(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_resolve_defaults_to_gemini() {
        assert_eq!(ProviderType::resolve(None).unwrap(), ProviderType::Gemini);
    }

    #[test]
    fn test_resolve_unknown_is_usage_error() {
        let err = ProviderType::resolve(Some(&ProviderName::new("unknown"))).unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn test_create_provider_names() {
        let key = ApiKey::new("k").unwrap();
        assert_eq!(create_provider(ProviderType::Gemini, key.clone(), None).name(), "gemini");
        assert_eq!(create_provider(ProviderType::Echo, key, None).name(), "echo");
    }
}
