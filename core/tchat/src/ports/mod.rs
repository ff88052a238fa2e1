//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（資格情報入力・ファイル・画面・LLM）を使うための trait

pub mod inbound;
pub mod outbound;
