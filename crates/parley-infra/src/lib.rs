//! Infrastructure layer for Parley.
//!
//! Contains implementations of the traits defined in `parley-core`:
//! SQLite storage (turn log, feedback) and the Gemini HTTP provider.

pub mod llm;
pub mod sqlite;
