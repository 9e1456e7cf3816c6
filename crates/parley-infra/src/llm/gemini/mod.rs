//! Google Gemini provider.

mod client;
mod types;

pub use client::GeminiProvider;
