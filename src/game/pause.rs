//! Pause toggle and its transient status message

use tracing::debug;

use super::ui::{MessageBoard, MessageId};
use crate::util::time::Clock;
use crate::util::timer::{Countdown, TimerTicket};

pub const PAUSED_MESSAGE: &str = "Game Paused";
pub const RESUMED_MESSAGE: &str = "Game Resumed";

/// Freezes the game clock and flashes a status message.
///
/// The clear timer runs on real time so the message goes away while the
/// game is frozen.
#[derive(Debug, Clone)]
pub struct PauseController {
    paused: bool,
    clear_timer: Countdown,
    /// Run of the clear timer and the message it should take down
    pending_clear: Option<(TimerTicket, MessageId)>,
    message_delay: f32,
}

impl PauseController {
    pub fn new(message_delay: f32) -> Self {
        Self {
            paused: false,
            clear_timer: Countdown::new(),
            pending_clear: None,
            message_delay,
        }
    }

    /// Flip the pause state; returns the new state
    pub fn toggle(&mut self, clock: &mut Clock, board: &mut MessageBoard) -> bool {
        self.paused = !self.paused;
        clock.set_time_scale(if self.paused { 0.0 } else { 1.0 });

        if board.has_surface() {
            let text = if self.paused {
                PAUSED_MESSAGE
            } else {
                RESUMED_MESSAGE
            };
            let ticket = self.clear_timer.start(self.message_delay);
            self.pending_clear = board.post(text).map(|id| (ticket, id));
        }

        self.paused
    }

    /// Advance the clear timer by real `real_dt`; returns true if it cleared
    pub fn tick(&mut self, real_dt: f32, board: &mut MessageBoard) -> bool {
        let Some(fired) = self.clear_timer.tick(real_dt) else {
            return false;
        };
        debug!(generation = fired.generation, paused = self.paused, "Pause message timer expired");

        if self.paused {
            return false;
        }
        match self.pending_clear.take() {
            Some((ticket, id)) if ticket == fired && self.clear_timer.is_current(ticket) => {
                board.clear_if_current(id)
            }
            _ => false,
        }
    }
}
