//! Combatant records - one per player slot in the match

use serde::{Deserialize, Serialize};

use super::arena::InstanceHandle;

/// Spawn position and facing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    /// Facing in degrees
    pub rotation: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self { x, y, rotation }
    }
}

/// Player colour used for rich-text labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Colours handed out by player number, wrapping past the end
pub const PLAYER_COLORS: [Rgb; 4] = [
    Rgb(0x2A, 0x64, 0xB2),
    Rgb(0xE5, 0x2E, 0x28),
    Rgb(0x3C, 0xB0, 0x43),
    Rgb(0xF2, 0xC1, 0x1D),
];

/// A player slot: spawn point, live instance and win tally.
///
/// Created once when the match starts. The instance is reset between
/// rounds, never recreated.
#[derive(Debug, Clone)]
pub struct Combatant {
    /// 1-based player number
    pub id: u32,
    pub spawn: Pose,
    pub instance: Option<InstanceHandle>,
    pub wins: u32,
    pub color: Rgb,
    pub label: String,
}

impl Combatant {
    pub fn new(id: u32, spawn: Pose) -> Self {
        let color = PLAYER_COLORS[(id.saturating_sub(1) as usize) % PLAYER_COLORS.len()];
        Self {
            id,
            spawn,
            instance: None,
            wins: 0,
            color,
            label: format!("PLAYER {}", id),
        }
    }

    /// Label wrapped in a colour tag for the message surface
    pub fn colored_label(&self) -> String {
        format!("<color={}>{}</color>", self.color.hex(), self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_player_number() {
        let first = Combatant::new(1, Pose::default());
        assert_eq!(first.label, "PLAYER 1");
        assert_eq!(first.colored_label(), "<color=#2A64B2>PLAYER 1</color>");

        let fifth = Combatant::new(5, Pose::default());
        assert_eq!(fifth.color, PLAYER_COLORS[0]);
        assert_eq!(fifth.wins, 0);
        assert!(fifth.instance.is_none());
    }
}
