//! 対話ループの入力 Outbound ポート

use common::error::Error;

/// 次の 1 行を読む能力。入力の終わり（EOF）なら None
pub trait UserInput: Send + Sync {
    fn next_line(&self) -> Result<Option<String>, Error>;
}
