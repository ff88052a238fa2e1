//! Geminiプロバイダの実装（cachedContents + generateContent）

use crate::domain::{ApiKey, ModelName};
use crate::error::Error;
use crate::llm::provider::{
    CacheRequest, CachedContent, GenerateResponse, LlmProvider, Message, UsageMetadata,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// 既定のモデル
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Geminiプロバイダ
pub struct GeminiProvider {
    api_key: ApiKey,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl GeminiProvider {
    /// 新しいGeminiプロバイダを作成
    ///
    /// # Arguments
    /// * `api_key` - Google AI Studio の API キー
    /// * `base_url` - API のベース URL（None のとき公式エンドポイント）
    pub fn new(api_key: ApiKey, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// キャッシュ作成のペイロードを生成
    pub fn make_cache_payload(&self, request: &CacheRequest<'_>) -> Value {
        json!({
            "model": model_resource(request.model),
            "displayName": request.display_name,
            "systemInstruction": {
                "parts": [{"text": request.system_instruction}]
            },
            "contents": [{
                "role": "user",
                "parts": [{"text": request.contents}]
            }]
        })
    }

    /// チャットターンのペイロードを生成
    ///
    /// 履歴の後ろに今回のクエリを user ターンとして付ける。
    pub fn make_chat_payload(&self, cached: &CachedContent, history: &[Message], query: &str) -> Value {
        let mut contents: Vec<Value> = history
            .iter()
            .map(|msg| {
                // Gemini APIは "assistant" ではなく "model" というroleを使用する
                let role = if msg.role == "user" { "user" } else { "model" };
                json!({ "role": role, "parts": [{"text": msg.content}] })
            })
            .collect();
        contents.push(json!({
            "role": "user",
            "parts": [{"text": query}]
        }));
        json!({
            "cachedContent": cached.name,
            "contents": contents,
        })
    }

    fn post_json(&self, url: &str, payload: &Value) -> Result<String, Error> {
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.expose())])
            .header("Content-Type", "application/json")
            .body(payload.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e.without_url())))?;

        if !status.is_success() {
            // エラーレスポンスを解析してメッセージを抽出
            let error_msg = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
                .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text));
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        Ok(response_text)
    }

    /// cachedContents のレスポンスをパース
    ///
    /// レスポンスに model / displayName が無ければリクエストの値で埋める。
    pub fn parse_cached_content(
        &self,
        response_json: &str,
        request: &CacheRequest<'_>,
    ) -> Result<CachedContent, Error> {
        let raw: CachedContentRaw = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse cache response: {}", e)))?;
        Ok(CachedContent {
            name: raw.name,
            model: raw.model.unwrap_or_else(|| model_resource(request.model)),
            display_name: raw
                .display_name
                .unwrap_or_else(|| request.display_name.to_string()),
            total_token_count: raw
                .usage_metadata
                .map(|u| u.total_token_count)
                .unwrap_or(0),
        })
    }

    /// generateContent のレスポンスをパース
    ///
    /// 先頭候補のテキスト part をすべて連結する。テキストが無ければエラー。
    pub fn parse_generate_response(&self, response_json: &str) -> Result<GenerateResponse, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        let text = v["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect::<String>()
            })
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::json("No text in response"))?;

        let usage = v
            .get("usageMetadata")
            .filter(|u| u.is_object())
            .map(|u| -> Result<UsageMetadata, Error> {
                let raw: UsageRaw = serde_json::from_value(u.clone())
                    .map_err(|e| Error::json(format!("Failed to parse usage metadata: {}", e)))?;
                Ok(UsageMetadata {
                    prompt_token_count: raw.prompt_token_count,
                    candidates_token_count: raw.candidates_token_count,
                    total_token_count: raw.total_token_count,
                    cached_content_token_count: raw.cached_content_token_count,
                })
            })
            .transpose()?;

        Ok(GenerateResponse { text, usage })
    }
}

/// "gemini-x" → "models/gemini-x"（既に付いていればそのまま）
fn model_resource(model: &ModelName) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CachedContentRaw {
    name: String,
    model: Option<String>,
    display_name: Option<String>,
    usage_metadata: Option<CacheUsageRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheUsageRaw {
    #[serde(default)]
    total_token_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageRaw {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
    #[serde(default)]
    total_token_count: u64,
    #[serde(default)]
    cached_content_token_count: u64,
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn create_cached_content(&self, request: &CacheRequest<'_>) -> Result<CachedContent, Error> {
        let url = format!("{}/cachedContents", self.base_url);
        let payload = self.make_cache_payload(request);
        let response_json = self.post_json(&url, &payload)?;
        self.parse_cached_content(&response_json, request)
    }

    fn generate_with_cache(
        &self,
        cached: &CachedContent,
        history: &[Message],
        query: &str,
    ) -> Result<GenerateResponse, Error> {
        // キャッシュは作成時のモデルに束縛されている
        let url = format!("{}/{}:generateContent", self.base_url, cached.model);
        let payload = self.make_chat_payload(cached, history, query);
        let response_json = self.post_json(&url, &payload)?;
        self.parse_generate_response(&response_json)
    }
}
