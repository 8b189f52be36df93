//! Configuration module - environment variable parsing

use std::env;
use std::str::FromStr;

use crate::game::{MatchSettings, Pose};
use crate::util::time::DEFAULT_TICK_RATE;

const DEFAULT_SPAWN_POINTS: &str = "-20,0,90;20,0,270";

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Host configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,

    /// Host frames per second
    pub tick_rate: u32,
    /// Multiplier applied to real frame time (headless fast-forward)
    pub fast_forward: f32,

    /// Match tunables
    pub match_settings: MatchSettings,
    /// One combatant per spawn point
    pub spawn_points: Vec<Pose>,
    /// Seed for the simulated arena; random when unset
    pub seed: Option<u64>,
    /// Matches to play before exiting, 0 = keep reloading
    pub match_count: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MatchSettings::default();

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(_) => return Err(ConfigError::Invalid("LOG_FORMAT", "expected pretty or json")),
        };

        let match_settings = MatchSettings {
            rounds_to_win: parse_or(&lookup, "ROUNDS_TO_WIN", defaults.rounds_to_win)?,
            start_delay: parse_or(&lookup, "START_DELAY_SECS", defaults.start_delay)?,
            end_delay: parse_or(&lookup, "END_DELAY_SECS", defaults.end_delay)?,
            sudden_death_after: parse_or(
                &lookup,
                "SUDDEN_DEATH_AFTER_SECS",
                defaults.sudden_death_after,
            )?,
            ..defaults
        };

        let tick_rate = parse_or(&lookup, "TICK_RATE", DEFAULT_TICK_RATE)?;
        if tick_rate == 0 {
            return Err(ConfigError::Invalid("TICK_RATE", "must be at least 1"));
        }

        let fast_forward: f32 = parse_or(&lookup, "TIME_SCALE_FAST_FORWARD", 1.0)?;
        if !fast_forward.is_finite() || fast_forward <= 0.0 {
            return Err(ConfigError::Invalid(
                "TIME_SCALE_FAST_FORWARD",
                "must be a positive number",
            ));
        }

        let spawn_points = parse_spawn_points(
            lookup("SPAWN_POINTS")
                .as_deref()
                .unwrap_or(DEFAULT_SPAWN_POINTS),
        )?;

        let seed = match lookup("MATCH_SEED") {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|_| ConfigError::Invalid("MATCH_SEED", "expected an unsigned integer"))?,
            ),
            None => None,
        };

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format,
            tick_rate,
            fast_forward,
            match_settings,
            spawn_points,
            seed,
            match_count: parse_or(&lookup, "MATCH_COUNT", 1)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(key, "not a valid number")),
        None => Ok(default),
    }
}

/// Parse `x,y,rot;x,y,rot;...`
pub fn parse_spawn_points(raw: &str) -> Result<Vec<Pose>, ConfigError> {
    let mut poses = Vec::new();

    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let parts: Vec<&str> = entry.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ConfigError::InvalidSpawnPoints(format!(
                "'{}' needs x,y,rotation",
                entry
            )));
        }

        let mut values = [0.0f32; 3];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part.parse().map_err(|_| {
                ConfigError::InvalidSpawnPoints(format!("'{}' is not a number", part))
            })?;
        }
        poses.push(Pose::new(values[0], values[1], values[2]));
    }

    if poses.is_empty() {
        return Err(ConfigError::InvalidSpawnPoints(
            "at least one spawn point is required".to_string(),
        ));
    }

    Ok(poses)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),

    #[error("Invalid SPAWN_POINTS: {0}")]
    InvalidSpawnPoints(String),
}
