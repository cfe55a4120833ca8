//! Core data and logic – GIF values, fetch requests, display states, and
//! catalog search ranking.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so it can cross into fetch tasks.

pub mod display;
pub mod gif;
pub mod request;
pub mod search;
