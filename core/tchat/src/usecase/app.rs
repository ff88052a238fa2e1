//! tchat のユースケース（セッションに対するイベントハンドラと対話ループ）
//!
//! 入力ごとに SessionEvent を 1 つ処理し、資格情報 → アップロード → 指紋照合 → キャッシュ
//! の順に前提を確かめ直す。前提が欠けている間はプロンプトを処理しない。

use crate::domain::caption::active_context_caption;
use crate::domain::{ChatCommand, ChatMessage, CombinedText, Session, SessionEvent, TranscriptBundle};
use crate::ports::outbound::{Presenter, ProviderFactory, TranscriptSource, UserInput};
use crate::usecase::context_cache::ContextCacheManager;
use crate::usecase::credential::{Credential, CredentialResolver};
use crate::usecase::turn::ChatTurnController;
use common::error::Error;
use common::llm::CachedContent;
use common::ports::outbound::{LlmProvider, Log, LogLevel, LogRecord};
use std::path::PathBuf;
use std::sync::Arc;

const HELP_TEXT: &str = "\
Commands:
  <text>                 Ask a question about the transcripts
  //<text>               Ask a question that starts with '/'
  /upload <file.txt>...  Replace the uploaded transcripts
  /source                Show the combined transcript source
  /history               Show the conversation so far
  /help                  Show this help
  /quit                  Leave the chat";

/// セッションの前提がどこまで揃っているか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// API キーが無い
    NeedsCredential,
    /// API キーの入力が終わった（EOF）
    CredentialClosed,
    /// トランスクリプトが無い
    NeedsUpload,
    /// キャッシュ作成に失敗した
    SetupFailed,
    /// チャット可能
    Ready,
}

// --- 依存（usecase が定義を所有し、wiring は組み立てるだけ）

pub struct ChatDeps {
    pub credentials: CredentialResolver,
    pub provider_factory: Arc<dyn ProviderFactory>,
    pub transcripts: Arc<dyn TranscriptSource>,
    pub input: Arc<dyn UserInput>,
    pub presenter: Arc<dyn Presenter>,
    pub cache: Arc<ContextCacheManager>,
    pub turns: ChatTurnController,
    pub log: Arc<dyn Log>,
}

/// 有効なキャッシュとその元になった内容
#[derive(Debug, Clone)]
pub struct ActiveContext {
    pub cached: CachedContent,
    pub combined: CombinedText,
    pub file_names: Vec<String>,
}

pub struct TranscriptChatUseCase {
    deps: ChatDeps,
    session: Session,
    bundle: Option<TranscriptBundle>,
    provider: Option<Arc<dyn LlmProvider>>,
    active: Option<ActiveContext>,
    phase: Phase,
}

impl TranscriptChatUseCase {
    pub fn new(deps: ChatDeps) -> Self {
        Self {
            deps,
            session: Session::new(),
            bundle: None,
            provider: None,
            active: None,
            phase: Phase::NeedsCredential,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn active(&self) -> Option<&ActiveContext> {
        self.active.as_ref()
    }

    fn log(&self, level: LogLevel, message: impl Into<String>, kind: &str) {
        let _ = self
            .deps
            .log
            .log(&LogRecord::new(level, message).layer("usecase").kind(kind));
    }

    /// イベントを 1 つ処理し、処理後の Phase を返す
    ///
    /// セットアップ失敗・ターン失敗は表示して Ok で返す。Err は入力読み取り等の致命的なもののみ。
    pub fn handle(&mut self, event: SessionEvent) -> Result<Phase, Error> {
        match event {
            SessionEvent::UploadChanged(bundle) => {
                self.bundle = Some(bundle);
                self.refresh()
            }
            SessionEvent::CredentialSubmitted(key) => {
                self.deps.credentials.submit(key);
                self.provider = None;
                self.refresh()
            }
            SessionEvent::PromptSubmitted(prompt) => {
                self.submit_prompt(&prompt);
                Ok(self.phase)
            }
        }
    }

    /// 前提を先頭から確かめ直す
    fn refresh(&mut self) -> Result<Phase, Error> {
        self.active = None;

        let key = match self.deps.credentials.resolve()? {
            Credential::Ready(key) => key,
            Credential::Submitted(key) => {
                return self.handle(SessionEvent::CredentialSubmitted(key));
            }
            Credential::Missing => {
                self.phase = Phase::NeedsCredential;
                return Ok(self.phase);
            }
            Credential::Closed => {
                self.phase = Phase::CredentialClosed;
                return Ok(self.phase);
            }
        };

        let provider = match &self.provider {
            Some(p) => Arc::clone(p),
            None => {
                let p = self.deps.provider_factory.create(&key);
                self.provider = Some(Arc::clone(&p));
                p
            }
        };

        let bundle = match &self.bundle {
            Some(b) => b.clone(),
            None => {
                self.deps.presenter.show_welcome();
                self.phase = Phase::NeedsUpload;
                return Ok(self.phase);
            }
        };

        let combined = bundle.combined_text();
        let fingerprint = combined.fingerprint();
        let short = fingerprint.short().to_string();
        if self.session.sync_fingerprint(fingerprint) {
            self.log(
                LogLevel::Info,
                format!("session reset for content {}", short),
                "session",
            );
        }

        self.deps
            .presenter
            .show_working("Processing and caching transcripts...");
        let cached = match self.deps.cache.get_or_create(provider.as_ref(), &combined) {
            Ok(c) => c,
            Err(e) => {
                self.deps
                    .presenter
                    .show_error(&format!("Failed to create cache: {}", e));
                self.phase = Phase::SetupFailed;
                return Ok(self.phase);
            }
        };

        let file_names: Vec<String> = bundle.file_names().iter().map(|s| s.to_string()).collect();
        self.deps.presenter.show_header(&active_context_caption(
            &bundle.file_names(),
            cached.total_token_count,
        ));
        self.active = Some(ActiveContext {
            cached,
            combined,
            file_names,
        });
        self.render_history();
        self.phase = Phase::Ready;
        Ok(self.phase)
    }

    fn submit_prompt(&mut self, prompt: &str) {
        let (active, provider) = match (self.phase, &self.active, &self.provider) {
            (Phase::Ready, Some(active), Some(provider)) => (active, provider),
            (phase, _, _) => {
                self.deps.presenter.show_info(blocked_prompt_message(phase));
                return;
            }
        };

        self.deps.presenter.show_message(&ChatMessage::user(prompt));
        self.deps.presenter.show_working("Thinking...");
        let result = self.deps.turns.handle_turn(
            &mut self.session,
            provider.as_ref(),
            &active.cached,
            prompt,
        );
        match result {
            Ok(()) => {
                if let Some(last) = self.session.messages().last() {
                    self.deps.presenter.show_message(last);
                }
            }
            Err(e) => {
                self.deps
                    .presenter
                    .show_error(&format!("An error occurred: {}", e));
            }
        }
    }

    fn render_history(&self) {
        for message in self.session.messages() {
            self.deps.presenter.show_message(message);
        }
    }

    fn upload(&mut self, paths: &[PathBuf]) -> Result<(), Error> {
        if paths.is_empty() {
            self.deps.presenter.show_info("Usage: /upload <file.txt>...");
            return Ok(());
        }
        let files = match self.deps.transcripts.load(paths) {
            Ok(files) => files,
            Err(e) => {
                self.deps.presenter.show_error(&e.to_string());
                return Ok(());
            }
        };
        if let Some(bundle) = TranscriptBundle::new(files) {
            self.handle(SessionEvent::UploadChanged(bundle))?;
        }
        Ok(())
    }

    /// 対話ループ
    ///
    /// # Arguments
    /// * `initial_files` - 起動時にアップロードするトランスクリプト
    ///
    /// API キーが空で提出された間は問い直し続ける。
    ///
    /// # Returns
    /// 終了コード（API キーの入力が EOF で終わった場合も 0）
    pub fn run(&mut self, initial_files: &[PathBuf]) -> Result<i32, Error> {
        if !initial_files.is_empty() {
            let files = self.deps.transcripts.load(initial_files)?;
            self.bundle = TranscriptBundle::new(files);
        }

        let mut phase = self.refresh()?;
        while phase == Phase::NeedsCredential {
            phase = self.refresh()?;
        }
        if phase == Phase::CredentialClosed {
            self.log(LogLevel::Info, "stopped: no credential", "lifecycle");
            return Ok(0);
        }

        while let Some(line) = self.deps.input.next_line()? {
            let Some(cmd) = ChatCommand::parse(&line) else {
                continue;
            };
            match cmd {
                ChatCommand::Quit => break,
                ChatCommand::Help => self.deps.presenter.show_info(HELP_TEXT),
                ChatCommand::Source => match &self.active {
                    Some(active) => {
                        self.deps
                            .presenter
                            .show_info(&format!("Sources: {}", active.file_names.join(", ")));
                        self.deps.presenter.show_source(&active.combined);
                    }
                    None => self.deps.presenter.show_info("No active transcripts."),
                },
                ChatCommand::History => self.render_history(),
                ChatCommand::Upload(paths) => self.upload(&paths)?,
                ChatCommand::Unknown(name) => self
                    .deps
                    .presenter
                    .show_info(&format!("Unknown command: {} (try /help)", name)),
                ChatCommand::Prompt(prompt) => {
                    self.handle(SessionEvent::PromptSubmitted(prompt))?;
                }
            }
        }
        Ok(0)
    }
}

fn blocked_prompt_message(phase: Phase) -> &'static str {
    match phase {
        Phase::NeedsCredential | Phase::CredentialClosed => {
            "An API key is required before chatting."
        }
        Phase::NeedsUpload => "Please upload transcript files with /upload <file.txt>... to start the chat.",
        Phase::SetupFailed => "Chat is unavailable until the transcript cache is created. Use /upload to retry.",
        Phase::Ready => "",
    }
}
