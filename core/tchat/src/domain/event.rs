//! セッションを進めるイベント
//!
//! 入力（アップロード・資格情報・プロンプト）ごとに 1 つ発生し、usecase が状態を更新する。

use crate::domain::TranscriptBundle;
use common::domain::ApiKey;

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// アップロード集合が（同一内容でも）再提出された
    UploadChanged(TranscriptBundle),
    /// 対話入力で API キーが提出された
    CredentialSubmitted(ApiKey),
    /// ユーザーがプロンプトを送信した
    PromptSubmitted(String),
}
