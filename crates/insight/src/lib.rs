// crates/insight/src/lib.rs
//! Book synopsis requests against a generative language service

mod client;
mod error;
mod prompt;

pub use client::{ClientConfig, GeminiClient, InsightService};
pub use error::{InsightError, InsightResult};
pub use prompt::{build_prompt, parse_insight, request_body, response_schema, SUMMARY_MAX_CHARS};
