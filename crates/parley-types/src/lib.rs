//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the relay:
//! turn records, in-memory session state, feedback, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod error;
pub mod feedback;
pub mod session;
pub mod turn;
