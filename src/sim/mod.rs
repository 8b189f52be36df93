//! Headless stand-ins for the engine collaborators

pub mod arena;
pub mod combat;
pub mod console;

pub use arena::SimArena;
pub use console::{ConsoleSurface, ConsoleUi, TrackingCamera};
