//! アダプター（ports の標準実装）
//!
//! 端末・ファイル・LLM プロバイダ生成の具体的な I/O はここに閉じ込める。

pub mod credential_prompt;
pub mod presenter;
pub mod provider_factory;
pub mod stdin_input;
pub mod transcript_source;

pub use credential_prompt::CliCredentialPrompt;
pub use presenter::TerminalPresenter;
pub use provider_factory::StdProviderFactory;
pub use stdin_input::StdinInput;
pub use transcript_source::FsTranscriptSource;
