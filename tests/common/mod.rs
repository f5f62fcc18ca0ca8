#![allow(dead_code)]

use poke_llm_agent::battle::{Battle, BattleView, Side};
use poke_llm_agent::dex::build_pokemon;
use poke_llm_agent::state::{Candidate, CreatureSummary, MoveRow, SwitchRow, TurnState};
use poke_llm_agent::types::PokeType;

pub fn move_row(index: usize, name: &str, move_type: PokeType, base_power: u32, accuracy: f32, is_stab: bool) -> MoveRow {
    MoveRow {
        index,
        id: name.replace(' ', ""),
        name: name.to_string(),
        move_type,
        base_power,
        accuracy,
        priority: 0,
        category: if base_power == 0 { "STATUS" } else { "SPECIAL" }.to_string(),
        pp: 10,
        is_stab,
    }
}

pub fn switch_row(index: usize, species: &str, types: &[PokeType]) -> SwitchRow {
    SwitchRow {
        index,
        species: species.to_string(),
        types: types.to_vec(),
        hp_pct: 100,
        status: None,
    }
}

pub fn creature(species: &str, types: &[PokeType], hp_pct: u8) -> CreatureSummary {
    CreatureSummary {
        species: species.to_string(),
        types: types.to_vec(),
        hp_pct: Some(hp_pct),
        status: None,
    }
}

/// Charizard against Venusaur with a mixed move list and two bench options.
pub fn sample_state() -> TurnState {
    TurnState {
        battle: "battle-gen9randombattle-1".to_string(),
        turn: 3,
        force_switch: false,
        my_active: creature("charizard", &[PokeType::Fire, PokeType::Flying], 87),
        opp_active: creature("venusaur", &[PokeType::Grass, PokeType::Poison], 64),
        weather: "none".to_string(),
        terrain: "none".to_string(),
        my_side_conditions: Vec::new(),
        opp_side_conditions: Vec::new(),
        candidates: vec![
            Candidate::Move(move_row(0, "air slash", PokeType::Flying, 75, 0.95, true)),
            Candidate::Move(move_row(1, "flamethrower", PokeType::Fire, 90, 1.0, true)),
            Candidate::Move(move_row(2, "earthquake", PokeType::Ground, 100, 1.0, false)),
            Candidate::Move(move_row(3, "will-o-wisp", PokeType::Fire, 0, 0.85, true)),
            Candidate::Switch(switch_row(0, "blastoise", &[PokeType::Water])),
            Candidate::Switch(switch_row(1, "pikachu", &[PokeType::Electric])),
        ],
    }
}

pub fn forced_state() -> TurnState {
    let mut state = sample_state();
    state.force_switch = true;
    state.candidates.retain(|c| matches!(c, Candidate::Switch(_)));
    state
}

/// A fresh dex battle; the view is for side A on turn 0.
pub fn dex_battle(seed: u64) -> Battle {
    let team_a = vec![
        build_pokemon("charizard", &["flamethrower", "airslash", "earthquake", "dragonclaw"]).unwrap(),
        build_pokemon("blastoise", &["surf", "icebeam", "flashcannon", "earthquake"]).unwrap(),
    ];
    let team_b = vec![
        build_pokemon("venusaur", &["gigadrain", "sludgebomb", "energyball", "earthquake"]).unwrap(),
        build_pokemon("jolteon", &["thunderbolt", "voltswitch", "thunderwave", "shadowball"]).unwrap(),
    ];
    Battle::new("battle-gen9randombattle-1", "gen9randombattle", &team_a, &team_b, seed).unwrap()
}

pub fn dex_view(seed: u64) -> BattleView {
    dex_battle(seed).view(Side::A)
}
