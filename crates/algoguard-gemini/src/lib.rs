//! Gemini completion client: prompt construction, declared response schemas,
//! and validated parsing into Algorithmic Guard records.

pub mod audit;
pub mod client;
pub mod error;
pub mod prompt;
pub mod schema;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
