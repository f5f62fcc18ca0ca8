use crate::state::{Candidate, CreatureSummary, TurnState};
use serde::Serialize;

pub const SYSTEM_PROMPT: &str = "You are a Pokémon battle assistant. Choose exactly one action from the candidates.\n\
Prefer higher expected damage ≈ base_power * accuracy * (1.5 if is_stab else 1) * type effectiveness. \
If state.force_switch is true, you MUST choose a switch.\n\
Reply with ONLY this JSON: {\"action\":\"move|switch\",\"index\":0-based integer,\"reason\":\"short\"}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

#[derive(Serialize)]
struct StateHeader<'a> {
    turn: u32,
    force_switch: bool,
    my_active: &'a CreatureSummary,
    opp_active: &'a CreatureSummary,
    weather: &'a str,
    terrain: &'a str,
    my_side_conditions: &'a [String],
    opp_side_conditions: &'a [String],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    state: StateHeader<'a>,
    candidates: &'a [Candidate],
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    pub system_prompt: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }
}

impl PromptBuilder {
    pub fn build(&self, state: &TurnState) -> Prompt {
        let message = UserMessage {
            state: StateHeader {
                turn: state.turn,
                force_switch: state.force_switch,
                my_active: &state.my_active,
                opp_active: &state.opp_active,
                weather: &state.weather,
                terrain: &state.terrain,
                my_side_conditions: &state.my_side_conditions,
                opp_side_conditions: &state.opp_side_conditions,
            },
            candidates: &state.candidates,
        };
        let user = serde_json::to_string(&message).unwrap_or_else(|_| "{}".to_string());
        Prompt {
            system: self.system_prompt.clone(),
            user,
        }
    }
}

fn creature_line(c: &CreatureSummary) -> String {
    let types: Vec<&str> = c.types.iter().map(|t| t.name()).collect();
    let hp = c.hp_pct.map_or_else(|| "?".to_string(), |hp| format!("{hp}%"));
    format!(
        "{} [{}] {hp}{}",
        c.species,
        types.join("/"),
        c.status.as_deref().map(|s| format!(" {s}")).unwrap_or_default()
    )
}

/// Human-readable turn header and candidate table for the console log.
pub fn render_summary(state: &TurnState) -> Vec<String> {
    let mut lines = vec![
        format!("--- TURN {} ---", state.turn),
        format!(
            "My: {} Opp: {} Weather: {} Terrain: {}",
            creature_line(&state.my_active),
            creature_line(&state.opp_active),
            state.weather,
            state.terrain
        ),
        format!(
            "{:<7}{:>4}  {:<16}{:<18}{:>5}{:>6}  {}",
            "kind", "idx", "name/species", "type(s)", "bp", "acc", "stab"
        ),
    ];
    for candidate in &state.candidates {
        let line = match candidate {
            Candidate::Move(m) => format!(
                "{:<7}{:>4}  {:<16}{:<18}{:>5}{:>6.1}  {}",
                "move",
                m.index,
                m.name,
                m.move_type.name(),
                m.base_power,
                m.accuracy,
                if m.is_stab { "✓" } else { "" }
            ),
            Candidate::Switch(s) => {
                let types: Vec<&str> = s.types.iter().map(|t| t.name()).collect();
                format!(
                    "{:<7}{:>4}  {:<16}{:<18}{:>5}{:>6}  {}",
                    "switch",
                    s.index,
                    s.species,
                    if types.is_empty() { "-".to_string() } else { types.join("/") },
                    "-",
                    "-",
                    "-"
                )
            }
        };
        lines.push(line);
    }
    lines
}
