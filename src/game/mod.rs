//! Match coordination: rounds, winners, sudden death and pause

pub mod arena;
pub mod combatant;
pub mod escalation;
pub mod evaluator;
pub mod events;
pub mod r#match;
pub mod pause;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use arena::{Arena, CameraRig, Health, InstanceHandle};
pub use combatant::Pose;
pub use r#match::{GameManager, MatchError, MatchSettings, MatchSignal};
pub use ui::{MessageSurface, PauseControl, Ui, UiLookup};
