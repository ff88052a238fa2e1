//! ユースケース（ports 経由でのみ外界に触れる）

pub mod app;
pub mod context_cache;
pub mod credential;
pub mod turn;
