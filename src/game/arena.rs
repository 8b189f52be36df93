//! Engine-side collaborators the match coordinator talks to
//!
//! Spawning, control, health and camera framing belong to the host engine.
//! The coordinator only sees these traits.

use serde::{Deserialize, Serialize};

use super::combatant::Pose;

/// Opaque handle to a spawned tank instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceHandle(pub u64);

/// Health of an instance that has a health capability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub starting: f32,
}

/// The arena that owns tank instances.
///
/// Unknown handles read as inactive and ignore mutations.
pub trait Arena {
    fn spawn(&mut self, pose: &Pose) -> InstanceHandle;
    /// Move back to `pose`, restore health and reactivate
    fn reset(&mut self, handle: InstanceHandle, pose: &Pose);
    fn enable_control(&mut self, handle: InstanceHandle);
    fn disable_control(&mut self, handle: InstanceHandle);
    fn is_active(&self, handle: InstanceHandle) -> bool;
    /// `None` when the instance has no health capability
    fn health(&self, handle: InstanceHandle) -> Option<Health>;
    fn damage(&mut self, handle: InstanceHandle, amount: f32);
}

/// Camera that keeps every tank in frame
pub trait CameraRig {
    fn set_targets(&mut self, targets: &[InstanceHandle]);
    /// Snap to the framing used at round start
    fn reset_to_start(&mut self);
}
