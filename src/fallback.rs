//! Deterministic replacement action used whenever the model's choice is unusable.

use crate::action::{Action, ActionKind};
use crate::state::{CreatureSummary, MoveRow, TurnState};
use crate::types::type_effectiveness;

pub const STAB_BONUS: f32 = 1.5;

/// `base_power × accuracy × STAB × type effectiveness` against the visible opponent.
/// Status moves score 0; an opponent with unknown types takes neutral damage.
pub fn expected_damage(row: &MoveRow, opponent: &CreatureSummary) -> f32 {
    if row.category == "STATUS" {
        return 0.0;
    }
    let stab = if row.is_stab { STAB_BONUS } else { 1.0 };
    row.base_power as f32
        * row.accuracy.clamp(0.0, 1.0)
        * stab
        * type_effectiveness(row.move_type, &opponent.types)
}

/// Index of the highest-scoring move; ties go to the first listed.
pub fn best_move(state: &TurnState) -> Option<(usize, f32)> {
    state.moves().fold(None, |best, row| {
        let score = expected_damage(row, &state.opp_active);
        match best {
            Some((_, top)) if score <= top => best,
            _ => Some((row.index, score)),
        }
    })
}

/// Never fails: every branch yields an action, and the action is in bounds whenever the
/// state offers at least one option.
pub fn select(state: &TurnState) -> Action {
    let has_switch = state.switches().next().is_some();
    if state.force_switch && has_switch {
        return Action::new(ActionKind::Switch, 0).with_reason("fallback:force_switch");
    }
    if let Some((index, score)) = best_move(state) {
        let reason = if score > 0.0 {
            "fallback:expected-damage"
        } else {
            "fallback:first-move"
        };
        return Action::new(ActionKind::Move, index).with_reason(reason);
    }
    if has_switch {
        return Action::new(ActionKind::Switch, 0).with_reason("fallback:first-switch");
    }
    Action::new(ActionKind::Move, 0).with_reason("fallback:default")
}
