//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the grid sinks and app state and turns them into
//! cells on the terminal.  No provider calls happen here.

pub mod grid;
pub mod layout;
pub mod search;
pub mod spinner;
pub mod theme;
