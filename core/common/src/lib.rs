//! tchat 共通ライブラリ
//!
//! エラー型・ドメイン型・Outbound ポートと標準アダプター・LLM プロバイダを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// Outbound ポート
pub mod ports;

/// 標準アダプター
pub mod adapter;

/// LLMプロバイダ
pub mod llm;
