use super::errors::GeminiApiError;
use super::prompts;
use super::rate_limiter::TokenBucketRateLimiter;
use super::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::domain::errors::ProfileError;
use crate::domain::models::{BackendConfig, ProfileRecord};
use crate::domain::ports::ProfileService;
use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Response};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Configuration for the Gemini HTTP client
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// Google AI API key
    pub api_key: String,

    /// Base URL for the generative-language API
    pub base_url: String,

    /// Model answering suggestion lookups
    pub suggestion_model: String,

    /// Model answering profile fetches
    pub profile_model: String,

    /// Rate limit in requests per second
    pub rate_limit_rps: f64,

    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_secs: Option<u64>,

    /// Attach the search grounding tool to profile fetches
    pub search_grounding: bool,
}

impl GeminiClientConfig {
    /// Build from the backend section of the application config
    pub fn from_backend(backend: &BackendConfig, api_key: String) -> Self {
        Self {
            api_key,
            base_url: backend.base_url.trim_end_matches('/').to_string(),
            suggestion_model: backend.suggestion_model.clone(),
            profile_model: backend.profile_model.clone(),
            rate_limit_rps: backend.requests_per_second,
            timeout_secs: backend.request_timeout_secs,
            search_grounding: backend.search_grounding,
        }
    }
}

/// HTTP client for the Gemini `generateContent` API
///
/// Provides:
/// - Connection pooling and reuse
/// - Rate limiting via token bucket algorithm
/// - Structured error classification
///
/// No retries: a failed fetch is reported and the user resubmits.
pub struct GeminiClient {
    http_client: ReqwestClient,
    base_url: String,
    suggestion_model: String,
    profile_model: String,
    search_grounding: bool,
    rate_limiter: TokenBucketRateLimiter,
}

impl GeminiClient {
    /// Create a new Gemini API client
    pub fn new(config: GeminiClientConfig) -> Result<Self, GeminiApiError> {
        info!(
            base_url = %config.base_url,
            rate_limit = config.rate_limit_rps,
            timeout_secs = ?config.timeout_secs,
            "Initializing Gemini API client"
        );

        let mut headers = header::HeaderMap::new();
        let mut key = header::HeaderValue::from_str(&config.api_key)
            .map_err(|e| GeminiApiError::InvalidRequest(format!("Invalid API key: {e}")))?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
            suggestion_model: config.suggestion_model,
            profile_model: config.profile_model,
            search_grounding: config.search_grounding,
            rate_limiter: TokenBucketRateLimiter::new(config.rate_limit_rps),
        })
    }

    /// Send a `generateContent` request to `model`
    #[instrument(skip(self, request))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        self.rate_limiter.acquire().await;

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        debug!("POST {}", url);

        let response = self.http_client.post(&url).json(request).send().await?;
        let response = self.handle_response(response).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "generateContent succeeded"
            );
        }
        Ok(response)
    }

    /// Generate and return the response text, failing when there is none
    async fn generate_text(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiApiError> {
        let response = self.generate_content(model, request).await?;
        response
            .text()
            .ok_or_else(|| GeminiApiError::EmptyResponse(response.refusal_reason()))
    }

    async fn handle_response(
        &self,
        response: Response,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .ok()
                .filter(|message| !message.trim().is_empty())
                .unwrap_or(body);
            return Err(GeminiApiError::from_status(status, message));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Raw suggestion lookup; the trait method swallows its errors
    pub async fn try_suggest(&self, partial: &str) -> Result<Vec<String>, GeminiApiError> {
        let request = GenerateContentRequest::json_prompt(
            prompts::suggestion_prompt(partial),
            prompts::suggestion_schema(),
        );
        let text = self.generate_text(&self.suggestion_model, &request).await?;
        let names: Vec<String> = serde_json::from_str(&text)?;
        Ok(names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect())
    }
}

#[async_trait]
impl ProfileService for GeminiClient {
    async fn suggest(&self, partial: &str) -> Vec<String> {
        let partial = partial.trim();
        if partial.is_empty() {
            return Vec::new();
        }
        match self.try_suggest(partial).await {
            Ok(names) => names,
            Err(e) => {
                debug!(error = %e, "Suggestion lookup failed");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    async fn fetch_profile(&self, name: &str) -> Result<ProfileRecord, ProfileError> {
        let mut request =
            GenerateContentRequest::json_prompt(prompts::profile_prompt(name), prompts::profile_schema())
                .with_system_instruction(prompts::PROFILE_SYSTEM_INSTRUCTION);
        if self.search_grounding {
            request = request.with_search_grounding();
        }

        let text = self.generate_text(&self.profile_model, &request).await?;
        let record = ProfileRecord::from_json(&text).inspect_err(|e| {
            warn!(error = %e, "Backend payload failed validation");
        })?;
        info!(subject = %record.name, rating = record.popularity_rating, "Profile decoded");
        Ok(record)
    }
}
