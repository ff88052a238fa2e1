//! テスト用のスタブアダプタと組み立て

use crate::domain::{ChatMessage, TranscriptBundle, TranscriptFile};
use crate::ports::outbound::{
    CredentialPrompt, Presenter, ProviderFactory, TranscriptSource, UserInput,
};
use crate::usecase::app::{ChatDeps, TranscriptChatUseCase};
use crate::usecase::context_cache::ContextCacheManager;
use crate::usecase::credential::CredentialResolver;
use crate::usecase::turn::ChatTurnController;
use common::adapter::NoopLog;
use common::domain::{ApiKey, HomeDir, ModelName};
use common::error::Error;
use common::llm::{CacheRequest, CachedContent, GenerateResponse, Message, UsageMetadata};
use common::ports::outbound::{EnvResolver, LlmProvider, Log};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const CACHE_TOKENS: u64 = 12345;

/// 1 回分の generate 呼び出し
#[derive(Debug, Clone)]
pub struct GenerateCall {
    pub cached_name: String,
    pub history: Vec<Message>,
    pub query: String,
}

/// キャッシュ作成回数を数え、どちらの呼び出しも失敗させられるプロバイダ
#[derive(Default)]
pub struct StubProvider {
    pub cache_calls: AtomicUsize,
    pub cache_contents: Mutex<Vec<String>>,
    pub generate_calls: Mutex<Vec<GenerateCall>>,
    pub fail_cache: AtomicBool,
    pub fail_generate: AtomicBool,
}

impl StubProvider {
    pub fn cache_calls(&self) -> usize {
        self.cache_calls.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> Vec<GenerateCall> {
        self.generate_calls.lock().unwrap().clone()
    }

    pub fn set_fail_cache(&self, fail: bool) {
        self.fail_cache.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_generate(&self, fail: bool) {
        self.fail_generate.store(fail, Ordering::SeqCst);
    }
}

impl LlmProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn create_cached_content(&self, request: &CacheRequest<'_>) -> Result<CachedContent, Error> {
        let n = self.cache_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.cache_contents
            .lock()
            .unwrap()
            .push(request.contents.to_string());
        if self.fail_cache.load(Ordering::SeqCst) {
            return Err(Error::http("cache boom"));
        }
        Ok(CachedContent {
            name: format!("cachedContents/stub-{}", n),
            model: format!("models/{}", request.model),
            display_name: request.display_name.to_string(),
            total_token_count: CACHE_TOKENS,
        })
    }

    fn generate_with_cache(
        &self,
        cached: &CachedContent,
        history: &[Message],
        query: &str,
    ) -> Result<GenerateResponse, Error> {
        self.generate_calls.lock().unwrap().push(GenerateCall {
            cached_name: cached.name.clone(),
            history: history.to_vec(),
            query: query.to_string(),
        });
        if self.fail_generate.load(Ordering::SeqCst) {
            return Err(Error::http("model boom"));
        }
        Ok(GenerateResponse {
            text: format!("answer to {}", query),
            usage: Some(UsageMetadata {
                prompt_token_count: 100,
                candidates_token_count: 10,
                total_token_count: 110,
                cached_content_token_count: 90,
            }),
        })
    }
}

/// 常に同じ StubProvider を返すファクトリ
pub struct StubFactory {
    pub provider: Arc<StubProvider>,
    pub created: AtomicUsize,
}

impl StubFactory {
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ProviderFactory for StubFactory {
    fn create(&self, _api_key: &ApiKey) -> Arc<dyn LlmProvider> {
        self.created.fetch_add(1, Ordering::SeqCst);
        let provider: Arc<dyn LlmProvider> = self.provider.clone();
        provider
    }
}

/// 表示されたもの
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    AuthRequired,
    Welcome,
    Header(String),
    Message(ChatMessage),
    Source(String),
    Working(String),
    Info(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingPresenter {
    shown: Mutex<Vec<Shown>>,
}

impl RecordingPresenter {
    pub fn shown(&self) -> Vec<Shown> {
        self.shown.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.shown()
            .into_iter()
            .filter_map(|s| match s {
                Shown::Error(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.shown()
            .into_iter()
            .filter_map(|s| match s {
                Shown::Info(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    pub fn headers(&self) -> Vec<String> {
        self.shown()
            .into_iter()
            .filter_map(|s| match s {
                Shown::Header(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.shown.lock().unwrap().clear();
    }

    fn push(&self, s: Shown) {
        self.shown.lock().unwrap().push(s);
    }
}

impl Presenter for RecordingPresenter {
    fn show_auth_required(&self) {
        self.push(Shown::AuthRequired);
    }
    fn show_welcome(&self) {
        self.push(Shown::Welcome);
    }
    fn show_header(&self, caption: &str) {
        self.push(Shown::Header(caption.to_string()));
    }
    fn show_message(&self, message: &ChatMessage) {
        self.push(Shown::Message(message.clone()));
    }
    fn show_source(&self, combined_text: &str) {
        self.push(Shown::Source(combined_text.to_string()));
    }
    fn show_working(&self, label: &str) {
        self.push(Shown::Working(label.to_string()));
    }
    fn show_info(&self, text: &str) {
        self.push(Shown::Info(text.to_string()));
    }
    fn show_error(&self, text: &str) {
        self.push(Shown::Error(text.to_string()));
    }
}

/// 用意した回答を順に返す。尽きたら EOF
#[derive(Default)]
pub struct ScriptedCredentialPrompt {
    answers: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedCredentialPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|s| s.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CredentialPrompt for ScriptedCredentialPrompt {
    fn prompt(&self) -> Result<Option<String>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answers.lock().unwrap().pop_front())
    }
}

/// 固定の環境変数
#[derive(Default)]
pub struct FakeEnv {
    vars: HashMap<String, String>,
}

impl FakeEnv {
    pub fn with(name: &str, value: &str) -> Self {
        let mut vars = HashMap::new();
        vars.insert(name.to_string(), value.to_string());
        Self { vars }
    }
}

impl EnvResolver for FakeEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        Ok(HomeDir::new("/nonexistent/tchat"))
    }
}

/// 用意した行を順に返す。尽きたら EOF
pub struct ScriptedInput {
    lines: Mutex<VecDeque<String>>,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: Mutex::new(lines.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.lock().unwrap().len()
    }
}

impl UserInput for ScriptedInput {
    fn next_line(&self) -> Result<Option<String>, Error> {
        Ok(self.lines.lock().unwrap().pop_front())
    }
}

/// パス → 本文 の表から読む TranscriptSource
#[derive(Default)]
pub struct MemTranscriptSource {
    files: HashMap<PathBuf, String>,
}

impl TranscriptSource for MemTranscriptSource {
    fn load(&self, paths: &[PathBuf]) -> Result<Vec<TranscriptFile>, Error> {
        paths
            .iter()
            .map(|p| match self.files.get(p) {
                Some(text) => Ok(TranscriptFile::new(p.display().to_string(), text.clone())),
                None => Err(Error::io_msg(format!("Failed to read '{}'", p.display()))),
            })
            .collect()
    }
}

pub fn bundle(files: &[(&str, &str)]) -> TranscriptBundle {
    TranscriptBundle::new(
        files
            .iter()
            .map(|(name, text)| TranscriptFile::new(*name, *text))
            .collect(),
    )
    .unwrap()
}

/// 組み立て条件
pub struct Setup<'a> {
    pub env_key: Option<&'a str>,
    pub prompt_answers: Vec<&'a str>,
    pub interactive: bool,
    pub input: Vec<&'a str>,
    pub files: Vec<(&'a str, &'a str)>,
}

impl Default for Setup<'_> {
    fn default() -> Self {
        Self {
            env_key: Some("test-key"),
            prompt_answers: Vec::new(),
            interactive: true,
            input: Vec::new(),
            files: Vec::new(),
        }
    }
}

/// 組み立てたスタブへの参照
pub struct Harness {
    pub provider: Arc<StubProvider>,
    pub factory: Arc<StubFactory>,
    pub presenter: Arc<RecordingPresenter>,
    pub prompt: Arc<ScriptedCredentialPrompt>,
    pub input: Arc<ScriptedInput>,
    pub cache: Arc<ContextCacheManager>,
}

impl Setup<'_> {
    pub fn build(self) -> (TranscriptChatUseCase, Harness) {
        let log: Arc<dyn Log> = Arc::new(NoopLog);
        let env: Arc<dyn EnvResolver> = Arc::new(match self.env_key {
            Some(key) => FakeEnv::with("AI_STUDIO_API_KEY", key),
            None => FakeEnv::default(),
        });
        let provider = Arc::new(StubProvider::default());
        let factory = Arc::new(StubFactory {
            provider: Arc::clone(&provider),
            created: AtomicUsize::new(0),
        });
        let presenter = Arc::new(RecordingPresenter::default());
        let prompt = Arc::new(ScriptedCredentialPrompt::new(&self.prompt_answers));
        let input = Arc::new(ScriptedInput::new(&self.input));
        let cache = Arc::new(ContextCacheManager::new(
            ModelName::new("test-model"),
            Arc::clone(&log),
        ));
        let transcripts = MemTranscriptSource {
            files: self
                .files
                .iter()
                .map(|(p, t)| (PathBuf::from(p), t.to_string()))
                .collect(),
        };

        let credentials = CredentialResolver::new(
            env,
            prompt.clone(),
            presenter.clone(),
            Arc::clone(&log),
            self.interactive,
        );
        let chat = TranscriptChatUseCase::new(ChatDeps {
            credentials,
            provider_factory: factory.clone(),
            transcripts: Arc::new(transcripts),
            input: input.clone(),
            presenter: presenter.clone(),
            cache: Arc::clone(&cache),
            turns: ChatTurnController::new(Arc::clone(&log)),
            log,
        });
        (
            chat,
            Harness {
                provider,
                factory,
                presenter,
                prompt,
                input,
                cache,
            },
        )
    }
}
