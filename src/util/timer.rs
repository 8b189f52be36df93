//! Generation-tagged countdown timers
//!
//! Every cooperative wait in the match loop is one of these. Restarting or
//! cancelling a countdown bumps its generation. A holder that kept the
//! ticket from `start` checks it against the expiry with `is_current`
//! before acting on it.

/// Identity of one run of a [`Countdown`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerTicket {
    pub generation: u64,
}

/// A single-slot countdown in seconds
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    generation: u64,
    remaining: Option<f32>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the countdown, invalidating any pending run
    pub fn start(&mut self, seconds: f32) -> TimerTicket {
        self.generation += 1;
        self.remaining = Some(seconds.max(0.0));
        TimerTicket {
            generation: self.generation,
        }
    }

    /// Cancel the pending run, if any
    pub fn cancel(&mut self) {
        if self.is_running() {
            self.remaining = None;
            self.generation += 1;
        }
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// True if `ticket` belongs to the most recent start
    pub fn is_current(&self, ticket: TimerTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Advance by `dt` seconds; returns the ticket once when the run expires
    pub fn tick(&mut self, dt: f32) -> Option<TimerTicket> {
        let remaining = self.remaining.as_mut()?;
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.remaining = None;
            Some(TimerTicket {
                generation: self.generation,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_duration() {
        let mut timer = Countdown::new();
        let ticket = timer.start(1.0);

        assert_eq!(timer.tick(0.5), None);
        assert_eq!(timer.tick(0.5), Some(ticket));
        assert_eq!(timer.tick(0.5), None);
        assert!(!timer.is_running());
    }

    #[test]
    fn restart_invalidates_previous_ticket() {
        let mut timer = Countdown::new();
        let first = timer.start(1.0);
        timer.tick(0.75);
        let second = timer.start(1.0);

        assert!(!timer.is_current(first));
        assert_eq!(timer.tick(0.5), None);
        assert_eq!(timer.tick(0.5), Some(second));
    }

    #[test]
    fn cancel_drops_pending_expiry() {
        let mut timer = Countdown::new();
        let ticket = timer.start(0.5);
        timer.cancel();

        assert!(!timer.is_current(ticket));
        assert_eq!(timer.tick(1.0), None);
    }

    #[test]
    fn zero_duration_fires_on_next_tick() {
        let mut timer = Countdown::new();
        let ticket = timer.start(0.0);
        assert_eq!(timer.tick(0.0), Some(ticket));
    }
}
