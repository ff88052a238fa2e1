//! 会話セッション（メッセージ列と、それが属する内容の指紋）

use crate::domain::{ChatMessage, ContentFingerprint};

/// 現在のトランスクリプト集合に対する会話
///
/// 指紋が変わったらメッセージ列を丸ごと捨てる。
#[derive(Debug, Clone, Default)]
pub struct Session {
    messages: Vec<ChatMessage>,
    fingerprint: Option<ContentFingerprint>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指紋を照合し、異なれば（初回も含む）履歴を消して記録し直す
    ///
    /// # Returns
    /// リセットしたら true
    pub fn sync_fingerprint(&mut self, fingerprint: ContentFingerprint) -> bool {
        if self.fingerprint.as_ref() == Some(&fingerprint) {
            return false;
        }
        self.messages.clear();
        self.fingerprint = Some(fingerprint);
        true
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn fingerprint(&self) -> Option<&ContentFingerprint> {
        self.fingerprint.as_ref()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
