//! In-memory session registry.

pub mod registry;

pub use registry::{ClearOutcome, SessionRegistry, SharedSession};
