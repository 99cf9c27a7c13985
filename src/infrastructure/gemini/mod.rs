//! Gemini `generateContent` adapter for the profile service port.

pub mod client;
pub mod errors;
pub mod prompts;
pub mod rate_limiter;
pub mod types;

pub use client::{GeminiClient, GeminiClientConfig};
pub use errors::GeminiApiError;
pub use rate_limiter::TokenBucketRateLimiter;
pub use types::{GenerateContentRequest, GenerateContentResponse};
