//! HTTP/JSON layer for Parley.
//!
//! Axum-based surface under `/api/` with CORS and request tracing.
//! Error bodies are always JSON with a human-readable message field,
//! never a stack trace.

pub mod error;
pub mod handlers;
pub mod router;
