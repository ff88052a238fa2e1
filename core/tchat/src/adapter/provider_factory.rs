//! 標準の ProviderFactory（プロファイルに応じて Gemini / Echo を作る）

use crate::ports::outbound::ProviderFactory;
use common::domain::ApiKey;
use common::llm::{create_provider, ProviderType};
use common::ports::outbound::LlmProvider;
use std::sync::Arc;

pub struct StdProviderFactory {
    provider_type: ProviderType,
    base_url: Option<String>,
}

impl StdProviderFactory {
    pub fn new(provider_type: ProviderType, base_url: Option<String>) -> Self {
        Self {
            provider_type,
            base_url,
        }
    }
}

impl ProviderFactory for StdProviderFactory {
    fn create(&self, api_key: &ApiKey) -> Arc<dyn LlmProvider> {
        Arc::new(create_provider(
            self.provider_type,
            api_key.clone(),
            self.base_url.clone(),
        ))
    }
}
