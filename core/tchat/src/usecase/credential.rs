//! 資格情報の解決
//!
//! 優先順位: 1. 環境変数 AI_STUDIO_API_KEY、2. このプロセスで以前に入力されたキー、3. 対話入力。

use crate::domain::instruction::API_KEY_ENV;
use crate::ports::outbound::{CredentialPrompt, Presenter};
use common::domain::ApiKey;
use common::error::Error;
use common::ports::outbound::{EnvResolver, Log, LogLevel, LogRecord};
use std::sync::{Arc, Mutex};

pub struct CredentialResolver {
    env: Arc<dyn EnvResolver>,
    prompt: Arc<dyn CredentialPrompt>,
    presenter: Arc<dyn Presenter>,
    log: Arc<dyn Log>,
    interactive: bool,
    captured: Mutex<Option<ApiKey>>,
}

impl CredentialResolver {
    pub fn new(
        env: Arc<dyn EnvResolver>,
        prompt: Arc<dyn CredentialPrompt>,
        presenter: Arc<dyn Presenter>,
        log: Arc<dyn Log>,
        interactive: bool,
    ) -> Self {
        Self {
            env,
            prompt,
            presenter,
            log,
            interactive,
            captured: Mutex::new(None),
        }
    }

    /// 入力済みのキーをプロセスの寿命の間保持する
    pub fn submit(&self, key: ApiKey) {
        if let Ok(mut captured) = self.captured.lock() {
            *captured = Some(key);
        }
    }

    fn captured(&self) -> Option<ApiKey> {
        self.captured.lock().ok().and_then(|c| c.clone())
    }

    /// キーを解決する
    ///
    /// # Returns
    /// * `Ok(Credential::Ready)` - 環境変数または入力済みのキーがある
    /// * `Ok(Credential::Submitted)` - 今回の対話入力で得た（保持は呼び出し側が submit で行う）
    /// * `Ok(Credential::Missing)` - 対話入力が空だった（案内を表示済み。入力があるまで問い直す）
    /// * `Ok(Credential::Closed)` - 対話入力が終わった（EOF）
    /// * `Err(Error)` - 非対話モードでキーが無い、または入力の読み取りに失敗
    pub fn resolve(&self) -> Result<Credential, Error> {
        if let Some(key) = self.env.var(API_KEY_ENV).and_then(ApiKey::new) {
            return Ok(Credential::Ready(key));
        }
        if let Some(key) = self.captured() {
            return Ok(Credential::Ready(key));
        }
        if !self.interactive {
            return Err(Error::env(format!(
                "{} environment variable is not set",
                API_KEY_ENV
            )));
        }

        self.presenter.show_auth_required();
        let Some(input) = self.prompt.prompt()? else {
            return Ok(Credential::Closed);
        };
        match ApiKey::new(input) {
            Some(key) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "credential captured from prompt")
                        .layer("usecase")
                        .kind("credential"),
                );
                Ok(Credential::Submitted(key))
            }
            None => {
                self.presenter
                    .show_info("Please enter your Google API Key to proceed.");
                Ok(Credential::Missing)
            }
        }
    }
}

/// 資格情報の解決結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Ready(ApiKey),
    Submitted(ApiKey),
    Missing,
    Closed,
}
