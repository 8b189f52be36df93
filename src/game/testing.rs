//! Scripted collaborators for unit tests

use std::collections::BTreeMap;

use super::arena::{Arena, CameraRig, Health, InstanceHandle};
use super::combatant::Pose;

pub const STARTING_HEALTH: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct ScriptedTank {
    pub pose: Pose,
    pub active: bool,
    pub controllable: bool,
    /// `None` models an instance without a health capability
    pub health: Option<f32>,
    pub resets: u32,
}

/// Arena where tests decide who dies and when
#[derive(Debug, Default)]
pub struct ScriptedArena {
    pub tanks: BTreeMap<u64, ScriptedTank>,
    next: u64,
}

impl ScriptedArena {
    pub fn kill(&mut self, handle: InstanceHandle) {
        if let Some(tank) = self.tanks.get_mut(&handle.0) {
            tank.active = false;
        }
    }

    pub fn strip_health(&mut self, handle: InstanceHandle) {
        if let Some(tank) = self.tanks.get_mut(&handle.0) {
            tank.health = None;
        }
    }

    pub fn set_health(&mut self, handle: InstanceHandle, value: f32) {
        if let Some(tank) = self.tanks.get_mut(&handle.0) {
            tank.health = Some(value);
        }
    }

    pub fn tank(&self, handle: InstanceHandle) -> &ScriptedTank {
        &self.tanks[&handle.0]
    }
}

impl Arena for ScriptedArena {
    fn spawn(&mut self, pose: &Pose) -> InstanceHandle {
        self.next += 1;
        self.tanks.insert(
            self.next,
            ScriptedTank {
                pose: *pose,
                active: true,
                controllable: true,
                health: Some(STARTING_HEALTH),
                resets: 0,
            },
        );
        InstanceHandle(self.next)
    }

    fn reset(&mut self, handle: InstanceHandle, pose: &Pose) {
        if let Some(tank) = self.tanks.get_mut(&handle.0) {
            tank.pose = *pose;
            tank.active = true;
            if tank.health.is_some() {
                tank.health = Some(STARTING_HEALTH);
            }
            tank.resets += 1;
        }
    }

    fn enable_control(&mut self, handle: InstanceHandle) {
        if let Some(tank) = self.tanks.get_mut(&handle.0) {
            tank.controllable = true;
        }
    }

    fn disable_control(&mut self, handle: InstanceHandle) {
        if let Some(tank) = self.tanks.get_mut(&handle.0) {
            tank.controllable = false;
        }
    }

    fn is_active(&self, handle: InstanceHandle) -> bool {
        self.tanks.get(&handle.0).map(|t| t.active).unwrap_or(false)
    }

    fn health(&self, handle: InstanceHandle) -> Option<Health> {
        let current = self.tanks.get(&handle.0)?.health?;
        Some(Health {
            current,
            starting: STARTING_HEALTH,
        })
    }

    fn damage(&mut self, handle: InstanceHandle, amount: f32) {
        if let Some(tank) = self.tanks.get_mut(&handle.0) {
            if let Some(health) = tank.health.as_mut() {
                *health = (*health - amount).max(0.0);
                if *health <= 0.0 {
                    tank.active = false;
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingCamera {
    pub targets: Vec<InstanceHandle>,
    pub resets: u32,
}

impl CameraRig for RecordingCamera {
    fn set_targets(&mut self, targets: &[InstanceHandle]) {
        self.targets = targets.to_vec();
    }

    fn reset_to_start(&mut self) {
        self.resets += 1;
    }
}
