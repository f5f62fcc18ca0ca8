mod common;

use common::{dex_battle, dex_view, forced_state, sample_state};
use poke_llm_agent::battle::{Choice, Side};
use poke_llm_agent::prompt::{render_summary, PromptBuilder, SYSTEM_PROMPT};
use poke_llm_agent::state::{accuracy_fraction, hp_pct, summarize, Candidate};
use poke_llm_agent::types::PokeType;
use serde_json::Value;

#[test]
fn summary_lists_moves_then_switches() {
    let state = summarize(&dex_view(1));
    assert_eq!(state.battle, "battle-gen9randombattle-1");
    assert_eq!(state.turn, 0);
    assert!(!state.force_switch);
    assert_eq!(state.my_active.species, "charizard");
    assert_eq!(state.my_active.hp_pct, Some(100));
    assert_eq!(state.opp_active.types, vec![PokeType::Grass, PokeType::Poison]);
    assert_eq!(state.weather, "none");

    let kinds: Vec<&str> = state
        .candidates
        .iter()
        .map(|c| match c {
            Candidate::Move(_) => "move",
            Candidate::Switch(_) => "switch",
        })
        .collect();
    assert_eq!(kinds, vec!["move", "move", "move", "move", "switch"]);

    let moves: Vec<_> = state.moves().collect();
    assert_eq!(moves[0].name, "flamethrower");
    assert!(moves[0].is_stab);
    assert_eq!(moves[0].category, "SPECIAL");
    assert!(!moves[2].is_stab, "earthquake is not a fire or flying move");
    assert_eq!(state.switches().next().map(|s| s.species.as_str()), Some("blastoise"));
}

#[test]
fn summary_of_a_forced_switch_has_no_moves() {
    let mut battle = dex_battle(1);
    // Side A only ever switches, so its active creature eventually faints with a teammate left.
    while !battle.view(Side::A).force_switch {
        battle.step(Some(Choice::Switch(0)), Some(Choice::Move(0))).unwrap();
    }
    let state = summarize(&battle.view(Side::A));
    assert!(state.force_switch);
    assert_eq!(state.moves().count(), 0);
    assert_eq!(state.switches().count(), 1);
}

#[test]
fn percentages_and_accuracy_are_normalized() {
    assert_eq!(hp_pct(0, 0), 100);
    assert_eq!(hp_pct(50, 153), 33);
    assert_eq!(hp_pct(153, 153), 100);
    assert_eq!(accuracy_fraction(0.0), 1.0);
    assert_eq!(accuracy_fraction(85.0), 0.85);
    assert_eq!(accuracy_fraction(1.0), 0.01);
    assert_eq!(accuracy_fraction(150.0), 1.0);
}

#[test]
fn prompt_carries_state_and_candidates() {
    let prompt = PromptBuilder::default().build(&sample_state());
    assert_eq!(prompt.system, SYSTEM_PROMPT);

    let user: Value = serde_json::from_str(&prompt.user).unwrap();
    assert_eq!(user["state"]["turn"], 3);
    assert_eq!(user["state"]["force_switch"], false);
    assert_eq!(user["state"]["opp_active"]["species"], "venusaur");
    let candidates = user["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 6);
    assert_eq!(candidates[1]["kind"], "move");
    assert_eq!(candidates[1]["name"], "flamethrower");
    assert_eq!(candidates[1]["is_stab"], true);
    assert_eq!(candidates[4]["kind"], "switch");
}

#[test]
fn prompt_flags_forced_switches() {
    let prompt = PromptBuilder::default().build(&forced_state());
    let user: Value = serde_json::from_str(&prompt.user).unwrap();
    assert_eq!(user["state"]["force_switch"], true);
    assert!(user["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["kind"] == "switch"));
    assert!(prompt.system.contains("MUST choose a switch"));
}

#[test]
fn console_summary_has_one_row_per_candidate() {
    let state = sample_state();
    let lines = render_summary(&state);
    assert_eq!(lines[0], "--- TURN 3 ---");
    assert_eq!(lines.len(), 3 + state.candidates.len());
    assert!(lines.iter().any(|l| l.contains("flamethrower") && l.contains("FIRE")));
    assert!(lines.iter().any(|l| l.starts_with("switch") && l.contains("blastoise")));
}
