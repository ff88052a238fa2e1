//! キャッシュ済みコンテキストの管理
//!
//! 内容の指紋ごとにリモートのキャッシュを高々 1 回だけ作り、プロセスの寿命の間使い回す。
//! 失敗は記憶しない（次の呼び出しで再作成を試みる）。削除・失効の管理はしない。

use crate::domain::instruction::{CACHE_DISPLAY_NAME, SYSTEM_INSTRUCTION};
use crate::domain::{CombinedText, ContentFingerprint};
use common::domain::ModelName;
use common::error::Error;
use common::llm::{CacheRequest, CachedContent};
use common::ports::outbound::{LlmProvider, Log, LogLevel, LogRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct ContextCacheManager {
    model: ModelName,
    entries: Mutex<HashMap<ContentFingerprint, CachedContent>>,
    log: Arc<dyn Log>,
}

impl ContextCacheManager {
    pub fn new(model: ModelName, log: Arc<dyn Log>) -> Self {
        Self {
            model,
            entries: Mutex::new(HashMap::new()),
            log,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn model(&self) -> &ModelName {
        &self.model
    }

    /// 記憶済みのエントリ数
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// 同じ内容なら記憶済みのキャッシュを返し、無ければリモートに作成して記憶する
    pub fn get_or_create(
        &self,
        provider: &dyn LlmProvider,
        text: &CombinedText,
    ) -> Result<CachedContent, Error> {
        let fingerprint = text.fingerprint();
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::system("context cache lock poisoned"))?;

        if let Some(cached) = entries.get(&fingerprint) {
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Debug, "context cache hit")
                    .layer("usecase")
                    .kind("cache")
                    .field("fingerprint", fingerprint.short())
                    .field("name", cached.name.as_str()),
            );
            return Ok(cached.clone());
        }

        let request = CacheRequest {
            model: &self.model,
            display_name: CACHE_DISPLAY_NAME,
            system_instruction: SYSTEM_INSTRUCTION,
            contents: text.as_str(),
        };
        let cached = match provider.create_cached_content(&request) {
            Ok(c) => c,
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Error, format!("context cache creation failed: {}", e))
                        .layer("usecase")
                        .kind("cache")
                        .field("fingerprint", fingerprint.short())
                        .field("provider", provider.name()),
                );
                return Err(e);
            }
        };
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "context cache created")
                .layer("usecase")
                .kind("cache")
                .field("fingerprint", fingerprint.short())
                .field("name", cached.name.as_str())
                .field("model", self.model.to_string())
                .field("total_token_count", cached.total_token_count),
        );
        entries.insert(fingerprint, cached.clone());
        Ok(cached)
    }
}
