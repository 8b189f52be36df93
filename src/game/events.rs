//! Match events emitted by the coordinator
//! The host logs these; tests read them to follow the match

use serde::{Deserialize, Serialize};

/// Win count of one combatant at round end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinTally {
    pub combatant: u32,
    pub wins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum MatchEvent {
    /// Combatants spawned and the first round is about to begin
    MatchStarted {
        combatants: u32,
        rounds_to_win: u32,
    },

    /// Round banner shown, controls locked
    RoundStarting {
        round: u32,
    },

    /// Controls released
    RoundPlaying {
        round: u32,
    },

    SuddenDeathWarning {
        round: u32,
    },

    /// Listed combatants dropped to one hit point
    SuddenDeathLethal {
        round: u32,
        affected: Vec<u32>,
    },

    SuddenDeathOver {
        round: u32,
    },

    RoundEnded {
        round: u32,
        /// `None` on a draw
        winner: Option<u32>,
        tally: Vec<WinTally>,
    },

    GameWon {
        winner: u32,
        rounds_played: u32,
    },

    Paused,

    Resumed,
}
