//! CombinedText の同一性（SHA-256 の 16 進表記）

use sha2::{Digest, Sha256};

/// 内容の指紋
///
/// バイト列が同じなら同じ値、1 バイトでも違えば別の値になる。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentFingerprint(String);

impl ContentFingerprint {
    pub fn of(text: &str) -> Self {
        let mut h = Sha256::new();
        h.update(text.as_bytes());
        Self(format!("{:x}", h.finalize()))
    }

    /// ログ表示用の先頭 12 文字
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl AsRef<str> for ContentFingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
