//! Time utilities for the match simulation

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Get current Unix timestamp in milliseconds
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Host start time for uptime tracking
static HOST_START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize host start time (call once at startup)
pub fn init_host_time() {
    HOST_START.get_or_init(Instant::now);
}

/// Get host uptime in seconds
pub fn uptime_secs() -> u64 {
    HOST_START
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0)
}

/// Default host frame rate
pub const DEFAULT_TICK_RATE: u32 = 30;

/// Real seconds per frame at the given rate
pub fn frame_delta(tick_rate: u32) -> f32 {
    1.0 / tick_rate.max(1) as f32
}

/// Game clock with a global time scale.
///
/// Scaled time drives round delays and sudden death; real time keeps
/// running while the scale is zero.
#[derive(Debug, Clone)]
pub struct Clock {
    time_scale: f32,
    scaled_elapsed: f64,
    real_elapsed: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            time_scale: 1.0,
            scaled_elapsed: 0.0,
            real_elapsed: 0.0,
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn is_frozen(&self) -> bool {
        self.time_scale == 0.0
    }

    /// Scaled delta for a real frame delta, without advancing the clock
    pub fn scaled(&self, real_dt: f32) -> f32 {
        real_dt * self.time_scale
    }

    /// Advance both timelines by one frame, returns the scaled delta
    pub fn advance(&mut self, real_dt: f32) -> f32 {
        let dt = self.scaled(real_dt);
        self.real_elapsed += real_dt as f64;
        self.scaled_elapsed += dt as f64;
        dt
    }

    /// Total scaled seconds since the clock was created
    pub fn scaled_elapsed(&self) -> f64 {
        self.scaled_elapsed
    }

    /// Total real seconds since the clock was created
    pub fn real_elapsed(&self) -> f64 {
        self.real_elapsed
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_clock_only_advances_real_time() {
        let mut clock = Clock::new();
        assert_eq!(clock.advance(0.5), 0.5);

        clock.set_time_scale(0.0);
        assert!(clock.is_frozen());
        assert_eq!(clock.advance(0.5), 0.0);

        assert_eq!(clock.scaled_elapsed(), 0.5);
        assert_eq!(clock.real_elapsed(), 1.0);
    }

    #[test]
    fn negative_scale_is_clamped() {
        let mut clock = Clock::new();
        clock.set_time_scale(-2.0);
        assert_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn frame_delta_guards_zero_rate() {
        assert_eq!(frame_delta(0), 1.0);
        assert_eq!(frame_delta(4), 0.25);
    }
}
