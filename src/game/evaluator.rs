//! Round and game resolution

use super::arena::Arena;
use super::combatant::Combatant;

fn is_active<A: Arena + ?Sized>(arena: &A, combatant: &Combatant) -> bool {
    combatant
        .instance
        .map(|handle| arena.is_active(handle))
        .unwrap_or(false)
}

/// Number of combatants whose instance is still in play
pub fn active_count<A: Arena + ?Sized>(combatants: &[Combatant], arena: &A) -> usize {
    combatants.iter().filter(|c| is_active(arena, c)).count()
}

/// True once at most one combatant is still in play
pub fn one_combatant_left<A: Arena + ?Sized>(combatants: &[Combatant], arena: &A) -> bool {
    active_count(combatants, arena) <= 1
}

/// Index of the sole survivor; `None` on a draw or while two or more remain
pub fn round_winner<A: Arena + ?Sized>(combatants: &[Combatant], arena: &A) -> Option<usize> {
    if !one_combatant_left(combatants, arena) {
        return None;
    }
    combatants.iter().position(|c| is_active(arena, c))
}

/// Index of the first combatant to reach `rounds_to_win`
pub fn game_winner(combatants: &[Combatant], rounds_to_win: u32) -> Option<usize> {
    combatants.iter().position(|c| c.wins == rounds_to_win)
}

/// Results banner shown at round end.
///
/// A game winner replaces the round result and tally entirely.
pub fn end_message(
    combatants: &[Combatant],
    round_winner: Option<usize>,
    game_winner: Option<usize>,
) -> String {
    if let Some(winner) = game_winner.and_then(|i| combatants.get(i)) {
        return format!("{} WINS THE GAME!", winner.colored_label());
    }

    let mut message = match round_winner.and_then(|i| combatants.get(i)) {
        Some(winner) => format!("{} WINS THE ROUND!", winner.colored_label()),
        None => "DRAW!".to_string(),
    };

    message.push_str("\n\n\n\n");

    for combatant in combatants {
        message.push_str(&format!(
            "{}: {} WINS\n",
            combatant.colored_label(),
            combatant.wins
        ));
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::combatant::Pose;
    use crate::game::testing::ScriptedArena;

    fn spawned(arena: &mut ScriptedArena, count: u32) -> Vec<Combatant> {
        (1..=count)
            .map(|id| {
                let mut c = Combatant::new(id, Pose::default());
                c.instance = Some(arena.spawn(&c.spawn));
                c
            })
            .collect()
    }

    #[test]
    fn one_left_only_after_eliminations() {
        let mut arena = ScriptedArena::default();
        let combatants = spawned(&mut arena, 4);

        for victim in 0..3 {
            assert!(!one_combatant_left(&combatants, &arena));
            arena.kill(combatants[victim].instance.unwrap());
        }
        assert!(one_combatant_left(&combatants, &arena));
    }

    #[test]
    fn round_winner_is_sole_survivor() {
        let mut arena = ScriptedArena::default();
        let combatants = spawned(&mut arena, 3);

        assert_eq!(round_winner(&combatants, &arena), None);

        arena.kill(combatants[0].instance.unwrap());
        assert_eq!(round_winner(&combatants, &arena), None);

        arena.kill(combatants[2].instance.unwrap());
        assert_eq!(round_winner(&combatants, &arena), Some(1));

        arena.kill(combatants[1].instance.unwrap());
        assert_eq!(round_winner(&combatants, &arena), None);
    }

    #[test]
    fn empty_set_has_no_winners() {
        let arena = ScriptedArena::default();
        assert!(one_combatant_left(&[], &arena));
        assert_eq!(round_winner(&[], &arena), None);
        assert_eq!(game_winner(&[], 5), None);
    }

    #[test]
    fn game_winner_needs_exact_threshold() {
        let mut combatants = vec![
            Combatant::new(1, Pose::default()),
            Combatant::new(2, Pose::default()),
        ];
        combatants[1].wins = 2;
        assert_eq!(game_winner(&combatants, 3), None);

        combatants[1].wins = 3;
        assert_eq!(game_winner(&combatants, 3), Some(1));
    }

    #[test]
    fn end_message_lists_tally() {
        let mut combatants = vec![
            Combatant::new(1, Pose::default()),
            Combatant::new(2, Pose::default()),
        ];
        combatants[0].wins = 1;

        let message = end_message(&combatants, Some(0), None);
        assert!(message.starts_with("<color=#2A64B2>PLAYER 1</color> WINS THE ROUND!\n\n\n\n"));
        assert!(message.contains("<color=#2A64B2>PLAYER 1</color>: 1 WINS\n"));
        assert!(message.ends_with("<color=#E52E28>PLAYER 2</color>: 0 WINS\n"));

        let draw = end_message(&combatants, None, None);
        assert!(draw.starts_with("DRAW!"));
    }

    #[test]
    fn game_win_replaces_round_message() {
        let mut combatants = vec![Combatant::new(1, Pose::default())];
        combatants[0].wins = 5;

        let message = end_message(&combatants, Some(0), Some(0));
        assert_eq!(message, "<color=#2A64B2>PLAYER 1</color> WINS THE GAME!");
    }
}
