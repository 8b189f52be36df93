//! Simulated arena - stands in for the engine when running headless

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::game::{Arena, Health, InstanceHandle, Pose};

use super::combat::{CombatSystem, ShellHit, TankStats};

#[derive(Debug, Clone)]
pub struct SimTank {
    pub handle: InstanceHandle,
    pub pose: Pose,
    pub health: f32,
    pub active: bool,
    pub controllable: bool,
    pub cooldown: f32,
}

/// Tanks that trade shells at random, deterministic per seed
pub struct SimArena {
    tanks: Vec<SimTank>,
    stats: TankStats,
    rng: ChaCha8Rng,
    next_handle: u64,
}

impl SimArena {
    pub fn new(seed: u64) -> Self {
        Self::with_stats(seed, TankStats::default())
    }

    pub fn with_stats(seed: u64, stats: TankStats) -> Self {
        Self {
            tanks: Vec::new(),
            stats,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_handle: 0,
        }
    }

    fn tank(&self, handle: InstanceHandle) -> Option<&SimTank> {
        self.tanks.iter().find(|t| t.handle == handle)
    }

    fn tank_mut(&mut self, handle: InstanceHandle) -> Option<&mut SimTank> {
        self.tanks.iter_mut().find(|t| t.handle == handle)
    }

    /// Advance the fight by scaled `dt` seconds
    pub fn simulate(&mut self, dt: f32) -> Vec<ShellHit> {
        let mut hits = Vec::new();
        if dt <= 0.0 {
            return hits;
        }

        for shooter_idx in 0..self.tanks.len() {
            let shooter = &mut self.tanks[shooter_idx];
            if !shooter.active || !shooter.controllable {
                continue;
            }

            shooter.cooldown = CombatSystem::update_cooldown(shooter.cooldown, dt);
            if !CombatSystem::can_fire(shooter.cooldown) {
                continue;
            }
            shooter.cooldown = self.stats.cooldown;
            let shooter_handle = shooter.handle;

            let targets: Vec<usize> = self
                .tanks
                .iter()
                .enumerate()
                .filter(|(i, t)| *i != shooter_idx && t.active)
                .map(|(i, _)| i)
                .collect();
            if targets.is_empty() {
                continue;
            }

            let target_idx = targets[self.rng.gen_range(0..targets.len())];
            if !self.rng.gen_bool(self.stats.accuracy) {
                continue;
            }

            let target = &mut self.tanks[target_idx];
            let (new_health, killed) =
                CombatSystem::apply_damage(target.health, self.stats.shell_damage);
            target.health = new_health;
            if killed {
                target.active = false;
            }

            debug!(
                shooter = shooter_handle.0,
                target = target.handle.0,
                health = new_health,
                killed,
                "Shell hit"
            );
            hits.push(ShellHit {
                shooter: shooter_handle.0,
                target: target.handle.0,
                damage: self.stats.shell_damage,
                target_killed: killed,
            });
        }

        hits
    }
}

impl Arena for SimArena {
    fn spawn(&mut self, pose: &Pose) -> InstanceHandle {
        self.next_handle += 1;
        let handle = InstanceHandle(self.next_handle);
        self.tanks.push(SimTank {
            handle,
            pose: *pose,
            health: self.stats.max_health,
            active: true,
            controllable: false,
            cooldown: self.stats.cooldown,
        });
        handle
    }

    fn reset(&mut self, handle: InstanceHandle, pose: &Pose) {
        let (max_health, cooldown) = (self.stats.max_health, self.stats.cooldown);
        if let Some(tank) = self.tank_mut(handle) {
            tank.pose = *pose;
            tank.health = max_health;
            tank.active = true;
            tank.cooldown = cooldown;
        }
    }

    fn enable_control(&mut self, handle: InstanceHandle) {
        if let Some(tank) = self.tank_mut(handle) {
            tank.controllable = true;
        }
    }

    fn disable_control(&mut self, handle: InstanceHandle) {
        if let Some(tank) = self.tank_mut(handle) {
            tank.controllable = false;
        }
    }

    fn is_active(&self, handle: InstanceHandle) -> bool {
        self.tank(handle).map(|t| t.active).unwrap_or(false)
    }

    fn health(&self, handle: InstanceHandle) -> Option<Health> {
        self.tank(handle).map(|t| Health {
            current: t.health,
            starting: self.stats.max_health,
        })
    }

    fn damage(&mut self, handle: InstanceHandle, amount: f32) {
        if let Some(tank) = self.tank_mut(handle) {
            if !tank.active {
                return;
            }
            let (new_health, killed) = CombatSystem::apply_damage(tank.health, amount);
            tank.health = new_health;
            if killed {
                tank.active = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_with_two(seed: u64) -> (SimArena, InstanceHandle, InstanceHandle) {
        let mut arena = SimArena::new(seed);
        let a = arena.spawn(&Pose::new(-20.0, 0.0, 90.0));
        let b = arena.spawn(&Pose::new(20.0, 0.0, 270.0));
        (arena, a, b)
    }

    #[test]
    fn locked_tanks_hold_fire() {
        let (mut arena, _, _) = arena_with_two(7);
        for _ in 0..1_000 {
            assert!(arena.simulate(0.1).is_empty());
        }
    }

    #[test]
    fn fight_ends_with_at_most_one_survivor() {
        let (mut arena, a, b) = arena_with_two(42);
        arena.enable_control(a);
        arena.enable_control(b);

        for _ in 0..100_000 {
            arena.simulate(0.1);
            if !arena.is_active(a) || !arena.is_active(b) {
                break;
            }
        }
        assert!(!(arena.is_active(a) && arena.is_active(b)));
    }

    #[test]
    fn same_seed_same_fight() {
        let run = |seed| {
            let (mut arena, a, b) = arena_with_two(seed);
            arena.enable_control(a);
            arena.enable_control(b);
            (0..500).flat_map(|_| arena.simulate(0.1)).collect::<Vec<_>>()
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn reset_restores_health_and_activity() {
        let (mut arena, a, _) = arena_with_two(1);
        arena.damage(a, 500.0);
        assert!(!arena.is_active(a));

        arena.reset(a, &Pose::default());
        assert!(arena.is_active(a));
        assert_eq!(arena.health(a).unwrap().current, 100.0);
    }

    #[test]
    fn unknown_handle_is_inactive() {
        let (mut arena, _, _) = arena_with_two(1);
        let ghost = InstanceHandle(99);
        arena.damage(ghost, 10.0);
        assert!(!arena.is_active(ghost));
        assert!(arena.health(ghost).is_none());
    }
}
