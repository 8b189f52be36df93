//! Sudden death escalation
//!
//! Idle -> Warning -> Lethal -> Idle, at most once per round. The timer runs
//! beside round play and never holds up round resolution.

use tracing::debug;

use super::arena::Arena;
use super::combatant::Combatant;
use super::ui::MessageId;
use crate::util::timer::Countdown;

pub const WARNING_MESSAGE: &str = "⚠️ SUDDEN DEATH INCOMING! ⚠️";
pub const LETHAL_MESSAGE: &str = "🔥 ONE-HIT KILL MODE ACTIVATED! 🔥";

/// Health every active tank is left with once sudden death hits
pub const LETHAL_HEALTH: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuddenDeathPhase {
    Idle,
    Warning,
    Lethal,
}

/// Transition the caller must act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuddenDeathStep {
    /// Show the warning
    Warn,
    /// Drop every active tank to one hit point
    Lethal,
    /// Clear the banner
    Finished,
}

#[derive(Debug, Clone)]
pub struct SuddenDeath {
    phase: SuddenDeathPhase,
    timer: Countdown,
    fired: bool,
    trigger_after: f32,
    warning_secs: f32,
    lethal_secs: f32,
    /// Banner this escalation last posted
    pub message: Option<MessageId>,
}

impl SuddenDeath {
    pub fn new(trigger_after: f32, warning_secs: f32, lethal_secs: f32) -> Self {
        Self {
            phase: SuddenDeathPhase::Idle,
            timer: Countdown::new(),
            fired: false,
            trigger_after,
            warning_secs,
            lethal_secs,
            message: None,
        }
    }

    pub fn phase(&self) -> SuddenDeathPhase {
        self.phase
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Arm for a new round, dropping anything left over from the last one
    pub fn begin_round(&mut self) {
        self.cancel();
        self.fired = false;
    }

    /// Stop a pending escalation without re-arming it
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.phase = SuddenDeathPhase::Idle;
        self.message = None;
    }

    /// Called each play frame with the round's elapsed play time
    pub fn poll(&mut self, round_time: f32) -> Option<SuddenDeathStep> {
        if self.fired || round_time < self.trigger_after {
            return None;
        }
        self.fired = true;
        self.phase = SuddenDeathPhase::Warning;
        self.timer.start(self.warning_secs);
        Some(SuddenDeathStep::Warn)
    }

    /// Advance the escalation timer by scaled `dt`
    pub fn tick(&mut self, dt: f32) -> Option<SuddenDeathStep> {
        let ticket = self.timer.tick(dt)?;
        debug!(generation = ticket.generation, phase = ?self.phase, "Sudden death timer expired");

        match self.phase {
            SuddenDeathPhase::Warning => {
                self.phase = SuddenDeathPhase::Lethal;
                self.timer.start(self.lethal_secs);
                Some(SuddenDeathStep::Lethal)
            }
            SuddenDeathPhase::Lethal => {
                self.phase = SuddenDeathPhase::Idle;
                Some(SuddenDeathStep::Finished)
            }
            SuddenDeathPhase::Idle => None,
        }
    }
}

/// Reduce every active tank with a health capability to one hit point.
///
/// Returns the ids of the combatants that were hit.
pub fn apply_lethal<A: Arena + ?Sized>(arena: &mut A, combatants: &[Combatant]) -> Vec<u32> {
    let mut affected = Vec::new();

    for combatant in combatants {
        let Some(handle) = combatant.instance else {
            continue;
        };
        if !arena.is_active(handle) {
            continue;
        }
        let Some(health) = arena.health(handle) else {
            continue;
        };

        let amount = health.current - LETHAL_HEALTH;
        if amount > 0.0 {
            arena.damage(handle, amount);
        }
        affected.push(combatant.id);
    }

    affected
}
