//! Host runtime: tick loop, operator commands, scene reloads

pub mod commands;
pub mod host;

pub use commands::spawn_stdin_commands;
pub use host::Host;
