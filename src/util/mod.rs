//! Shared utilities

pub mod time;
pub mod timer;
