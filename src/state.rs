//! Turn-state summary handed to the prompt builder, the fallback policy and the trace log.

use crate::action::ActionKind;
use crate::battle::{BattleView, CreatureView, MoveOption};
use crate::types::PokeType;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureSummary {
    pub species: String,
    pub types: Vec<PokeType>,
    /// `None` when no creature is visible on that side.
    pub hp_pct: Option<u8>,
    pub status: Option<String>,
}

impl CreatureSummary {
    pub fn unknown() -> Self {
        Self {
            species: "unknown".to_string(),
            types: Vec::new(),
            hp_pct: None,
            status: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRow {
    pub index: usize,
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: PokeType,
    pub base_power: u32,
    /// 0..=1; moves that never miss report 1.0.
    pub accuracy: f32,
    pub priority: i32,
    pub category: String,
    pub pp: u8,
    pub is_stab: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwitchRow {
    pub index: usize,
    pub species: String,
    pub types: Vec<PokeType>,
    pub hp_pct: u8,
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Candidate {
    Move(MoveRow),
    Switch(SwitchRow),
}

/// Snapshot of one side's decision point. Built once per request, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnState {
    pub battle: String,
    pub turn: u32,
    pub force_switch: bool,
    pub my_active: CreatureSummary,
    pub opp_active: CreatureSummary,
    pub weather: String,
    pub terrain: String,
    pub my_side_conditions: Vec<String>,
    pub opp_side_conditions: Vec<String>,
    pub candidates: Vec<Candidate>,
}

impl TurnState {
    pub fn moves(&self) -> impl Iterator<Item = &MoveRow> {
        self.candidates.iter().filter_map(|c| match c {
            Candidate::Move(m) => Some(m),
            Candidate::Switch(_) => None,
        })
    }

    pub fn switches(&self) -> impl Iterator<Item = &SwitchRow> {
        self.candidates.iter().filter_map(|c| match c {
            Candidate::Switch(s) => Some(s),
            Candidate::Move(_) => None,
        })
    }

    pub fn option_count(&self, kind: ActionKind) -> usize {
        match kind {
            ActionKind::Move => self.moves().count(),
            ActionKind::Switch => self.switches().count(),
        }
    }
}

pub fn hp_pct(current: u32, max: u32) -> u8 {
    if max == 0 {
        return 100;
    }
    (100.0 * current as f64 / max as f64).round().clamp(0.0, 100.0) as u8
}

/// Percent accuracy as a 0..=1 fraction, matching the simulator's roll; 0 means the move never misses.
pub fn accuracy_fraction(accuracy: f32) -> f32 {
    if accuracy <= 0.0 {
        1.0
    } else {
        (accuracy / 100.0).min(1.0)
    }
}

fn creature(view: Option<&CreatureView>) -> CreatureSummary {
    match view {
        Some(c) => CreatureSummary {
            species: c.species.to_lowercase(),
            types: c.types.clone(),
            hp_pct: Some(hp_pct(c.current_hp, c.max_hp)),
            status: c.status.map(|s| s.code().to_string()),
        },
        None => CreatureSummary::unknown(),
    }
}

fn move_row(index: usize, m: &MoveOption, me: Option<&CreatureView>) -> MoveRow {
    MoveRow {
        index,
        id: m.id.clone(),
        name: m.name.to_lowercase(),
        move_type: m.move_type,
        base_power: m.base_power,
        accuracy: accuracy_fraction(m.accuracy),
        priority: m.priority,
        category: m.category.name().to_string(),
        pp: m.pp,
        is_stab: me.is_some_and(|c| c.types.contains(&m.move_type)),
    }
}

fn switch_row(index: usize, c: &CreatureView) -> SwitchRow {
    SwitchRow {
        index,
        species: c.species.to_lowercase(),
        types: c.types.clone(),
        hp_pct: hp_pct(c.current_hp, c.max_hp),
        status: c.status.map(|s| s.code().to_string()),
    }
}

pub fn summarize(view: &BattleView) -> TurnState {
    let me = view.active.as_ref();
    let mut candidates: Vec<Candidate> = Vec::new();
    if !view.force_switch {
        candidates.extend(
            view.available_moves
                .iter()
                .enumerate()
                .map(|(i, m)| Candidate::Move(move_row(i, m, me))),
        );
    }
    candidates.extend(
        view.available_switches
            .iter()
            .enumerate()
            .map(|(i, c)| Candidate::Switch(switch_row(i, c))),
    );

    TurnState {
        battle: view.tag.clone(),
        turn: view.turn,
        force_switch: view.force_switch,
        my_active: creature(me),
        opp_active: creature(view.opponent_active.as_ref()),
        weather: view.weather.map_or("none", |w| w.name()).to_string(),
        terrain: view.terrain.map_or("none", |t| t.name()).to_string(),
        my_side_conditions: view.side_conditions.iter().map(|c| c.name().to_string()).collect(),
        opp_side_conditions: view
            .opponent_side_conditions
            .iter()
            .map(|c| c.name().to_string())
            .collect(),
        candidates,
    }
}
