//! LLM プロバイダの実装
//!
//! キャッシュ済みコンテキストの作成と、それを参照したチャットターンの 2 種類の呼び出しを扱う。

pub mod echo;
pub mod factory;
pub mod gemini;
pub mod provider;

pub use factory::{create_provider, AnyProvider, ProviderType};
pub use provider::{CacheRequest, CachedContent, GenerateResponse, LlmProvider, Message, UsageMetadata};
