//! 表示 Outbound ポート
//!
//! usecase は描画の詳細を持たず、この trait に何を見せるかだけを渡す。

use crate::domain::ChatMessage;

pub trait Presenter: Send + Sync {
    /// 資格情報が無いときの見出しと警告
    fn show_auth_required(&self);
    /// トランスクリプト未アップロード時の案内
    fn show_welcome(&self);
    /// `Active Context: ...` の見出し
    fn show_header(&self, caption: &str);
    /// 会話の 1 メッセージ（使用量キャプション付き）
    fn show_message(&self, message: &ChatMessage);
    /// 結合済みトランスクリプトの全文
    fn show_source(&self, combined_text: &str);
    /// 処理中表示（"Thinking..." 等）
    fn show_working(&self, label: &str);
    fn show_info(&self, text: &str);
    fn show_error(&self, text: &str);
}
