//! Per-action cooldown arithmetic.
//!
//! The last-used turn for each (combatant, action) pair lives on the
//! combatant itself; these functions only answer availability queries.

use crate::roster::Action;

/// An action used on turn T stays locked for the full cooldown window: with
/// cooldown N it opens again only once `current_turn - T` exceeds N.
pub fn is_available(action: &Action, last_used: Option<u32>, current_turn: u32) -> bool {
    match (action.cooldown, last_used) {
        (Some(cooldown), Some(last)) => current_turn.saturating_sub(last) > cooldown,
        _ => true,
    }
}

/// Turns left before the action unlocks. Zero when the action has no
/// cooldown or was never used; may be zero or negative once the window has
/// passed. Display code clamps, the engine does not.
pub fn remaining_turns(action: &Action, current_turn: u32, last_used: Option<u32>) -> i32 {
    match (action.cooldown, last_used) {
        (Some(cooldown), Some(last)) => cooldown as i32 - (current_turn as i32 - last as i32),
        _ => 0,
    }
}
