//! 配線: 標準アダプタで App / UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, NoopLog, StderrLog, StdEnvResolver, StdFileSystem, TeeLog};
use common::domain::ModelName;
use common::error::Error;
use common::llm::gemini::DEFAULT_MODEL;
use common::llm::ProviderType;
use common::ports::outbound::{EnvResolver, FileSystem, Log};

use crate::adapter::{
    CliCredentialPrompt, FsTranscriptSource, StdProviderFactory, StdinInput, TerminalPresenter,
};
use crate::cli::Config;
use crate::ports::outbound::Presenter;
use crate::usecase::app::{ChatDeps, TranscriptChatUseCase};
use crate::usecase::context_cache::ContextCacheManager;
use crate::usecase::credential::CredentialResolver;
use crate::usecase::turn::ChatTurnController;

/// Gemini REST のベース URL を差し替える環境変数
pub const BASE_URL_ENV: &str = "TCHAT_GEMINI_BASE_URL";

/// プロセス全体で共有する標準アダプタ
pub struct App {
    pub fs: Arc<dyn FileSystem>,
    pub env_resolver: Arc<dyn EnvResolver>,
    pub presenter: Arc<dyn Presenter>,
    pub logger: Arc<dyn Log>,
}

/// 配線: 標準アダプタで App を組み立てる
///
/// ログは `<home>/state/log.jsonl`。ホームが解決できなければ捨てる。
/// verbose のときは stderr にも出す。
pub fn wire_tchat(verbose: bool) -> App {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let env_resolver: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let file_log: Arc<dyn Log> = match env_resolver.resolve_home_dir() {
        Ok(home) => Arc::new(FileJsonLog::new(
            Arc::clone(&fs),
            home.join("state").join("log.jsonl"),
        )),
        Err(_) => Arc::new(NoopLog),
    };
    let logger: Arc<dyn Log> = if verbose {
        Arc::new(TeeLog::new(vec![file_log, Arc::new(StderrLog)]))
    } else {
        file_log
    };
    App {
        fs,
        env_resolver,
        presenter: Arc::new(TerminalPresenter::new()),
        logger,
    }
}

/// 配線: Config に従ってチャットのユースケースを組み立てる
///
/// 不明なプロファイルは usage エラー。
pub fn wire_chat(app: &App, config: &Config) -> Result<TranscriptChatUseCase, Error> {
    let provider_type = ProviderType::resolve(config.profile.as_ref())?;
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| ModelName::new(DEFAULT_MODEL));
    let base_url = app.env_resolver.var(BASE_URL_ENV);

    // --no-interactive のときは resolver がプロンプトを呼ぶ前に Env エラーで止まる
    let credentials = CredentialResolver::new(
        Arc::clone(&app.env_resolver),
        Arc::new(CliCredentialPrompt::new()),
        Arc::clone(&app.presenter),
        Arc::clone(&app.logger),
        !config.non_interactive,
    );

    Ok(TranscriptChatUseCase::new(ChatDeps {
        credentials,
        provider_factory: Arc::new(StdProviderFactory::new(provider_type, base_url)),
        transcripts: Arc::new(FsTranscriptSource::new(Arc::clone(&app.fs))),
        input: Arc::new(StdinInput::new()),
        presenter: Arc::clone(&app.presenter),
        cache: Arc::new(ContextCacheManager::new(model, Arc::clone(&app.logger))),
        turns: ChatTurnController::new(Arc::clone(&app.logger)),
        log: Arc::clone(&app.logger),
    }))
}
