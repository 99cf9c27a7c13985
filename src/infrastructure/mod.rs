//! Infrastructure layer module
//!
//! Adapters satisfying the domain ports plus process-wide plumbing:
//! - Gemini profile service client
//! - File and in-memory cache stores
//! - Configuration management
//! - Logging infrastructure

pub mod cache;
pub mod config;
pub mod gemini;
pub mod logging;
