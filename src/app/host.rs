//! Headless host - drives matches from a fixed-rate tick loop

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::game::ui::PAUSE_CONTROL_NAME;
use crate::game::evaluator;
use crate::game::{GameManager, MatchError, MatchSignal, Ui};
use crate::sim::{ConsoleSurface, ConsoleUi, SimArena, TrackingCamera};
use crate::util::time::{frame_delta, unix_millis, uptime_secs};

use super::commands::HostCommand;

pub type SimMatch = GameManager<SimArena, TrackingCamera>;

/// Outcome of one finished match
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub match_id: Uuid,
    pub seed: u64,
    pub winner: Option<u32>,
    pub winner_label: Option<String>,
    pub rounds_played: u32,
    pub finished_at: u64,
}

/// Everything the host did before it stopped
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostReport {
    pub matches: Vec<MatchResult>,
    /// Stopped by a quit command rather than by the match count
    pub quit: bool,
}

/// Owns the configuration and the UI that survives scene reloads
pub struct Host {
    config: Arc<Config>,
    base_seed: u64,
}

impl Host {
    pub fn new(config: Config) -> Self {
        let base_seed = config.seed.unwrap_or_else(rand::random);
        Self {
            config: Arc::new(config),
            base_seed,
        }
    }

    fn persistent_ui() -> Ui {
        Ui::new(
            Some(Box::new(ConsoleSurface)),
            None,
            Some(Box::new(ConsoleUi::with_pause_control(PAUSE_CONTROL_NAME))),
        )
    }

    fn build_match(&self, index: u32, ui: Ui) -> Result<(SimMatch, u64), MatchError> {
        let seed = self.base_seed.wrapping_add(index as u64);
        let game = GameManager::new(
            self.config.match_settings.clone(),
            &self.config.spawn_points,
            SimArena::new(seed),
            TrackingCamera::default(),
            ui,
        )?;
        Ok((game, seed))
    }

    /// Play matches until the configured count is reached or a quit arrives
    pub async fn run(&self, mut commands: mpsc::Receiver<HostCommand>) -> anyhow::Result<HostReport> {
        let frame = frame_delta(self.config.tick_rate);
        let real_dt = frame * self.config.fast_forward;

        let mut ticker = interval(Duration::from_secs_f32(frame));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut report = HostReport::default();
        let mut ui = Self::persistent_ui();
        let mut index = 0u32;

        'matches: loop {
            let (mut game, seed) = self.build_match(index, ui)?;
            info!(
                match_id = %game.id(),
                seed,
                settings = %serde_json::to_string(game.settings()).unwrap_or_default(),
                "Loading arena"
            );
            game.start();
            log_events(&mut game);

            let finished = loop {
                ticker.tick().await;

                let mut quit = false;
                while let Ok(command) = commands.try_recv() {
                    quit |= handle_command(&mut game, command);
                }
                if quit {
                    break false;
                }

                if !game.clock().is_frozen() {
                    let dt = game.clock().scaled(real_dt);
                    game.arena_mut().simulate(dt);
                }

                let signal = game.tick(real_dt);
                log_events(&mut game);

                if signal == MatchSignal::ReloadMenu {
                    break true;
                }
            };

            if finished {
                let result = match_result(&game, seed);
                info!(
                    match_id = %result.match_id,
                    winner = ?result.winner,
                    rounds = result.rounds_played,
                    game_secs = game.clock().scaled_elapsed(),
                    real_secs = game.clock().real_elapsed(),
                    camera_framings = game.camera().framings(),
                    "Match finished"
                );
                report.matches.push(result);
            }

            let (_, _, returned) = game.into_parts();
            ui = returned;
            index += 1;

            if !finished {
                report.quit = true;
                break 'matches;
            }
            if self.config.match_count != 0 && index >= self.config.match_count {
                break 'matches;
            }
            info!("Reloading menu");
        }

        Ok(report)
    }
}

/// Apply one operator command; returns true on quit
fn handle_command(game: &mut SimMatch, command: HostCommand) -> bool {
    match command {
        HostCommand::PressPause => {
            if game.press_pause_control().is_none() {
                warn!("No pause control wired, press ignored");
            }
        }
        HostCommand::TogglePause => {
            game.toggle_pause();
        }
        HostCommand::Status => {
            let wins: Vec<String> = game
                .combatants()
                .iter()
                .map(|c| format!("{}={}", c.label, c.wins))
                .collect();
            info!(
                match_id = %game.id(),
                round = game.state().round_number,
                phase = ?game.phase(),
                round_time = game.round_time(),
                paused = game.state().paused,
                time_scale = game.clock().time_scale(),
                alive = evaluator::active_count(game.combatants(), game.arena()),
                sudden_death = ?game.sudden_death().phase(),
                sudden_death_fired = game.sudden_death().has_fired(),
                pause_control = game.pause_control_wired(),
                wins = %wins.join(", "),
                uptime_secs = uptime_secs(),
                "Status"
            );
        }
        HostCommand::Quit => {
            info!("Quit requested");
            return true;
        }
    }
    false
}

fn log_events(game: &mut SimMatch) {
    for event in game.drain_events() {
        debug!(
            match_id = %game.id(),
            event = %serde_json::to_string(&event).unwrap_or_default(),
            "Match event"
        );
    }
}

fn match_result(game: &SimMatch, seed: u64) -> MatchResult {
    let winner = game.state().game_winner.map(|i| &game.combatants()[i]);
    MatchResult {
        match_id: game.id(),
        seed,
        winner: winner.map(|c| c.id),
        winner_label: winner.map(|c| c.label.clone()),
        rounds_played: game.state().round_number,
        finished_at: unix_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use crate::game::{MatchSettings, Pose};

    fn test_config(rounds_to_win: u32, match_count: u32) -> Config {
        Config {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            tick_rate: 30,
            fast_forward: 1.0,
            match_settings: MatchSettings {
                rounds_to_win,
                ..MatchSettings::default()
            },
            spawn_points: vec![Pose::new(-20.0, 0.0, 90.0), Pose::new(20.0, 0.0, 270.0)],
            seed: Some(11),
            match_count,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn plays_a_match_to_completion() {
        let host = Host::new(test_config(2, 1));
        let (_tx, rx) = mpsc::channel(8);

        let report = host.run(rx).await.unwrap();

        assert!(!report.quit);
        assert_eq!(report.matches.len(), 1);
        let result = &report.matches[0];
        assert!(result.winner.is_some());
        assert!(result.rounds_played >= 2);
        assert_eq!(result.seed, 11);
    }

    #[tokio::test(start_paused = true)]
    async fn reloads_for_each_match() {
        let host = Host::new(test_config(1, 2));
        let (_tx, rx) = mpsc::channel(8);

        let report = host.run(rx).await.unwrap();

        assert_eq!(report.matches.len(), 2);
        assert_ne!(report.matches[0].match_id, report.matches[1].match_id);
        assert_eq!(report.matches[1].seed, 12);
    }

    #[tokio::test(start_paused = true)]
    async fn quit_abandons_the_running_match() {
        let host = Host::new(test_config(5, 0));
        let (tx, rx) = mpsc::channel(8);
        tx.send(HostCommand::Status).await.unwrap();
        tx.send(HostCommand::PressPause).await.unwrap();
        tx.send(HostCommand::Quit).await.unwrap();

        let report = host.run(rx).await.unwrap();

        assert!(report.quit);
        assert!(report.matches.is_empty());
    }

    #[test]
    fn empty_spawn_list_is_rejected() {
        let mut config = test_config(1, 1);
        config.spawn_points.clear();
        let host = Host::new(config);
        assert!(matches!(
            host.build_match(0, Ui::default()),
            Err(MatchError::NoCombatants)
        ));
    }
}
