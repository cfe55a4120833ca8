//! Application orchestration — state management, fetch lifecycle, and
//! input handling.

pub mod controller;
pub mod event;
pub mod fetch_runtime;
pub mod handler;
pub mod sink;
pub mod state;
