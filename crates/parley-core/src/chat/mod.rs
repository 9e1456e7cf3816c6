//! Conversation persistence: the turn log and history reconstruction.

pub mod history;
pub mod log;
pub mod repository;

pub use log::TurnLog;
