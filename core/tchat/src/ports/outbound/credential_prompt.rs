//! API キーの対話入力 Outbound ポート

use common::error::Error;

/// マスク付きで API キーを問い合わせる能力
pub trait CredentialPrompt: Send + Sync {
    /// 入力された文字列を返す。何も入力されなければ空文字列、入力の終わり（EOF）なら None
    fn prompt(&self) -> Result<Option<String>, Error>;
}
