//! Match coordinator and round loop

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::util::time::Clock;
use crate::util::timer::Countdown;

use super::arena::{Arena, CameraRig, InstanceHandle};
use super::combatant::{Combatant, Pose};
use super::escalation::{self, SuddenDeath, SuddenDeathStep};
use super::evaluator;
use super::events::{MatchEvent, WinTally};
use super::pause::PauseController;
use super::ui::Ui;

/// Round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Nothing spawned yet
    NotStarted,
    /// Round banner up, waiting out the start delay
    Starting,
    /// Tanks under player control
    Playing,
    /// Results up, waiting out the end delay
    Ending,
    /// A combatant reached the win threshold
    GameOver,
}

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSignal {
    Continue,
    /// Match is decided; go back to the menu scene
    ReloadMenu,
}

/// Tunables for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSettings {
    pub rounds_to_win: u32,
    /// Seconds between the round banner and releasing control
    pub start_delay: f32,
    /// Seconds the results stay up before the next round
    pub end_delay: f32,
    /// Play seconds before sudden death triggers
    pub sudden_death_after: f32,
    pub sudden_death_warning: f32,
    pub sudden_death_duration: f32,
    /// Real seconds the pause status message stays up
    pub pause_message_delay: f32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            rounds_to_win: 5,
            start_delay: 3.0,
            end_delay: 3.0,
            sudden_death_after: 30.0,
            sudden_death_warning: 5.0,
            sudden_death_duration: 5.0,
            pause_message_delay: 1.0,
        }
    }
}

impl MatchSettings {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.rounds_to_win == 0 {
            return Err(MatchError::InvalidRoundsToWin);
        }

        let delays = [
            ("start_delay", self.start_delay),
            ("end_delay", self.end_delay),
            ("sudden_death_after", self.sudden_death_after),
            ("sudden_death_warning", self.sudden_death_warning),
            ("sudden_death_duration", self.sudden_death_duration),
            ("pause_message_delay", self.pause_message_delay),
        ];
        for (name, secs) in delays {
            if !secs.is_finite() || secs < 0.0 {
                return Err(MatchError::InvalidDelay(name));
            }
        }

        Ok(())
    }
}

/// Match setup errors
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum MatchError {
    #[error("Match needs at least one spawn point")]
    NoCombatants,

    #[error("Rounds to win must be at least 1")]
    InvalidRoundsToWin,

    #[error("Invalid {0}: must be a finite, non-negative number of seconds")]
    InvalidDelay(&'static str),
}

/// Per-match bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchState {
    pub round_number: u32,
    /// Index into the combatant list
    pub round_winner: Option<usize>,
    /// Index into the combatant list; never unset once set
    pub game_winner: Option<usize>,
    pub paused: bool,
}

/// Runs rounds until one combatant reaches the win threshold.
///
/// Owns all match state. The host calls [`GameManager::tick`] once per
/// frame with the real frame delta.
pub struct GameManager<A: Arena, C: CameraRig> {
    id: Uuid,
    settings: MatchSettings,
    combatants: Vec<Combatant>,
    state: MatchState,
    phase: RoundPhase,
    round_time: f32,
    phase_timer: Countdown,
    clock: Clock,
    sudden_death: SuddenDeath,
    pause: PauseController,
    pause_wired: bool,
    arena: A,
    camera: C,
    ui: Ui,
    events: Vec<MatchEvent>,
}

impl<A: Arena, C: CameraRig> GameManager<A, C> {
    pub fn new(
        settings: MatchSettings,
        spawns: &[Pose],
        arena: A,
        camera: C,
        ui: Ui,
    ) -> Result<Self, MatchError> {
        settings.validate()?;
        if spawns.is_empty() {
            return Err(MatchError::NoCombatants);
        }

        let combatants = spawns
            .iter()
            .enumerate()
            .map(|(i, pose)| Combatant::new(i as u32 + 1, *pose))
            .collect();

        Ok(Self {
            id: Uuid::new_v4(),
            sudden_death: SuddenDeath::new(
                settings.sudden_death_after,
                settings.sudden_death_warning,
                settings.sudden_death_duration,
            ),
            pause: PauseController::new(settings.pause_message_delay),
            settings,
            combatants,
            state: MatchState::default(),
            phase: RoundPhase::NotStarted,
            round_time: 0.0,
            phase_timer: Countdown::new(),
            clock: Clock::new(),
            pause_wired: false,
            arena,
            camera,
            ui,
            events: Vec::new(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Play seconds elapsed in the current round
    pub fn round_time(&self) -> f32 {
        self.round_time
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn sudden_death(&self) -> &SuddenDeath {
        &self.sudden_death
    }

    pub fn arena(&self) -> &A {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut A {
        &mut self.arena
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    /// Tear the match down, handing back the collaborators
    pub fn into_parts(self) -> (A, C, Ui) {
        (self.arena, self.camera, self.ui)
    }

    /// Spawn everyone, frame the camera, wire the pause control and open
    /// round one. Does nothing if the match already started.
    pub fn start(&mut self) {
        if self.phase != RoundPhase::NotStarted {
            return;
        }

        for combatant in &mut self.combatants {
            combatant.instance = Some(self.arena.spawn(&combatant.spawn));
        }

        let targets: Vec<InstanceHandle> =
            self.combatants.iter().filter_map(|c| c.instance).collect();
        self.camera.set_targets(&targets);

        self.init_pause_control();

        info!(
            match_id = %self.id,
            combatants = self.combatants.len(),
            rounds_to_win = self.settings.rounds_to_win,
            "Match started"
        );
        self.events.push(MatchEvent::MatchStarted {
            combatants: self.combatants.len() as u32,
            rounds_to_win: self.settings.rounds_to_win,
        });

        self.begin_round();
    }

    /// Run one frame of `real_dt` real seconds
    pub fn tick(&mut self, real_dt: f32) -> MatchSignal {
        if self.phase == RoundPhase::NotStarted {
            self.start();
            return MatchSignal::Continue;
        }

        let dt = self.clock.advance(real_dt);

        self.pause.tick(real_dt, &mut self.ui.board);

        if let Some(step) = self.sudden_death.tick(dt) {
            self.on_sudden_death(step);
        }

        match self.phase {
            RoundPhase::NotStarted => {}
            RoundPhase::Starting => {
                if self.phase_timer.tick(dt).is_some() {
                    self.begin_play();
                }
            }
            RoundPhase::Playing => self.play_frame(dt),
            RoundPhase::Ending => {
                if self.phase_timer.tick(dt).is_some() {
                    if self.state.game_winner.is_some() {
                        self.phase = RoundPhase::GameOver;
                        info!(match_id = %self.id, "Match over, returning to menu");
                        return MatchSignal::ReloadMenu;
                    }
                    self.begin_round();
                }
            }
            RoundPhase::GameOver => return MatchSignal::ReloadMenu,
        }

        MatchSignal::Continue
    }

    /// Flip pause: freezes scaled time and flashes a status message
    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.pause.toggle(&mut self.clock, &mut self.ui.board);
        self.state.paused = paused;

        if paused {
            info!(match_id = %self.id, "Game paused");
            self.events.push(MatchEvent::Paused);
        } else {
            info!(match_id = %self.id, "Game resumed");
            self.events.push(MatchEvent::Resumed);
        }

        paused
    }

    /// A press on the pause control; ignored if no control is wired
    pub fn press_pause_control(&mut self) -> Option<bool> {
        if !self.pause_wired {
            return None;
        }
        Some(self.toggle_pause())
    }

    pub fn pause_control_wired(&self) -> bool {
        self.pause_wired
    }

    fn init_pause_control(&mut self) {
        self.pause_wired = self.ui.init_pause_control();
        debug!(match_id = %self.id, wired = self.pause_wired, "Pause control initialised");
    }

    fn handles(&self) -> Vec<InstanceHandle> {
        self.combatants.iter().filter_map(|c| c.instance).collect()
    }

    fn begin_round(&mut self) {
        self.sudden_death.begin_round();

        for combatant in &self.combatants {
            if let Some(handle) = combatant.instance {
                self.arena.reset(handle, &combatant.spawn);
                self.arena.disable_control(handle);
            }
        }
        self.camera.reset_to_start();

        self.state.round_number += 1;
        self.state.round_winner = None;
        let round = self.state.round_number;
        self.ui.board.post(format!("ROUND {}", round));

        self.phase = RoundPhase::Starting;
        self.phase_timer.start(self.settings.start_delay);

        info!(match_id = %self.id, round, "Round starting");
        self.events.push(MatchEvent::RoundStarting { round });
    }

    fn begin_play(&mut self) {
        for handle in self.handles() {
            self.arena.enable_control(handle);
        }
        self.ui.board.clear();
        self.init_pause_control();

        self.round_time = 0.0;
        self.phase = RoundPhase::Playing;

        let round = self.state.round_number;
        info!(match_id = %self.id, round, "Round playing");
        self.events.push(MatchEvent::RoundPlaying { round });
    }

    fn play_frame(&mut self, dt: f32) {
        if evaluator::one_combatant_left(&self.combatants, &self.arena) {
            self.begin_ending();
            return;
        }

        self.round_time += dt;

        if let Some(step) = self.sudden_death.poll(self.round_time) {
            self.on_sudden_death(step);
        }
    }

    fn begin_ending(&mut self) {
        self.sudden_death.cancel();

        for handle in self.handles() {
            self.arena.disable_control(handle);
        }

        let round_winner = evaluator::round_winner(&self.combatants, &self.arena);
        if let Some(winner) = round_winner {
            self.combatants[winner].wins += 1;
        }
        self.state.round_winner = round_winner;

        if self.state.game_winner.is_none() {
            self.state.game_winner =
                evaluator::game_winner(&self.combatants, self.settings.rounds_to_win);
        }

        let message =
            evaluator::end_message(&self.combatants, round_winner, self.state.game_winner);
        self.ui.board.post(message);

        self.phase = RoundPhase::Ending;
        self.phase_timer.start(self.settings.end_delay);

        let round = self.state.round_number;
        let winner = round_winner.map(|i| self.combatants[i].id);
        info!(
            match_id = %self.id,
            round,
            winner = ?winner,
            round_time = self.round_time,
            "Round ended"
        );
        self.events.push(MatchEvent::RoundEnded {
            round,
            winner,
            tally: self
                .combatants
                .iter()
                .map(|c| WinTally {
                    combatant: c.id,
                    wins: c.wins,
                })
                .collect(),
        });

        if let Some(game_winner) = self.state.game_winner {
            let winner = self.combatants[game_winner].id;
            info!(match_id = %self.id, winner, rounds_played = round, "Game won");
            self.events.push(MatchEvent::GameWon {
                winner,
                rounds_played: round,
            });
        }
    }

    fn on_sudden_death(&mut self, step: SuddenDeathStep) {
        let round = self.state.round_number;

        match step {
            SuddenDeathStep::Warn => {
                self.sudden_death.message = self.ui.board.post(escalation::WARNING_MESSAGE);
                info!(match_id = %self.id, round, "Sudden death incoming");
                self.events.push(MatchEvent::SuddenDeathWarning { round });
            }
            SuddenDeathStep::Lethal => {
                let affected = escalation::apply_lethal(&mut self.arena, &self.combatants);
                self.sudden_death.message = self.ui.board.post(escalation::LETHAL_MESSAGE);
                info!(match_id = %self.id, round, affected = ?affected, "Sudden death active");
                self.events
                    .push(MatchEvent::SuddenDeathLethal { round, affected });
            }
            SuddenDeathStep::Finished => {
                if let Some(id) = self.sudden_death.message.take() {
                    self.ui.board.clear_if_current(id);
                }
                debug!(match_id = %self.id, round, "Sudden death banner cleared");
                self.events.push(MatchEvent::SuddenDeathOver { round });
            }
        }
    }
}
