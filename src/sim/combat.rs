//! Combat rules for simulated tanks - shells, cooldowns, damage

/// Tank stats used by the simulated arena
#[derive(Debug, Clone, Copy)]
pub struct TankStats {
    /// Health at spawn and after every reset
    pub max_health: f32,
    /// Damage per shell hit
    pub shell_damage: f32,
    /// Seconds between shots
    pub cooldown: f32,
    /// Chance a shell finds its target
    pub accuracy: f64,
}

impl Default for TankStats {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            shell_damage: 20.0,
            cooldown: 1.5,
            accuracy: 0.25,
        }
    }
}

/// Combat rules shared by every simulated tank
pub struct CombatSystem;

impl CombatSystem {
    /// Check if a tank can fire (cooldown check)
    pub fn can_fire(cooldown: f32) -> bool {
        cooldown <= 0.0
    }

    /// Count the cooldown down by `dt` seconds
    pub fn update_cooldown(cooldown: f32, dt: f32) -> f32 {
        (cooldown - dt).max(0.0)
    }

    /// Apply damage to health, returns (new_health, is_dead)
    pub fn apply_damage(current_health: f32, damage: f32) -> (f32, bool) {
        let new_health = (current_health - damage).max(0.0);
        (new_health, new_health <= 0.0)
    }
}

/// A shell that connected during a simulation step
#[derive(Debug, Clone, PartialEq)]
pub struct ShellHit {
    pub shooter: u64,
    pub target: u64,
    pub damage: f32,
    pub target_killed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_floors_at_zero() {
        assert_eq!(CombatSystem::apply_damage(30.0, 20.0), (10.0, false));
        assert_eq!(CombatSystem::apply_damage(10.0, 20.0), (0.0, true));
    }

    #[test]
    fn cooldown_counts_down_to_zero() {
        let cooldown = CombatSystem::update_cooldown(0.2, 0.5);
        assert_eq!(cooldown, 0.0);
        assert!(CombatSystem::can_fire(cooldown));
        assert!(!CombatSystem::can_fire(0.1));
    }
}
