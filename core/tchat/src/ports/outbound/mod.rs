//! Outbound ポート: アプリが外界（資格情報入力・ファイル・画面・LLM）を使うための trait

pub mod credential_prompt;
pub mod presenter;
pub mod provider_factory;
pub mod transcript_source;
pub mod user_input;

pub use credential_prompt::CredentialPrompt;
pub use presenter::Presenter;
pub use provider_factory::ProviderFactory;
pub use transcript_source::TranscriptSource;
pub use user_input::UserInput;
