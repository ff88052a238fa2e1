//! LLM プロバイダ生成 Outbound ポート
//!
//! API キーは実行中に対話で決まることがあるため、プロバイダは解決後に作る。

use common::domain::ApiKey;
use common::ports::outbound::LlmProvider;
use std::sync::Arc;

pub trait ProviderFactory: Send + Sync {
    fn create(&self, api_key: &ApiKey) -> Arc<dyn LlmProvider>;
}
