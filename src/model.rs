use crate::types::PokeType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    pub fn name(self) -> &'static str {
        match self {
            MoveCategory::Physical => "PHYSICAL",
            MoveCategory::Special => "SPECIAL",
            MoveCategory::Status => "STATUS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCondition {
    Burn,
    Paralysis,
    Poison,
    Sleep,
}

impl StatusCondition {
    /// Short protocol code, as shown on the battle HUD.
    pub fn code(self) -> &'static str {
        match self {
            StatusCondition::Burn => "BRN",
            StatusCondition::Paralysis => "PAR",
            StatusCondition::Poison => "PSN",
            StatusCondition::Sleep => "SLP",
        }
    }

    /// Types that can never receive this status.
    pub fn blocked_by(self, t: PokeType) -> bool {
        matches!(
            (self, t),
            (StatusCondition::Burn, PokeType::Fire)
                | (StatusCondition::Paralysis, PokeType::Electric)
                | (StatusCondition::Poison, PokeType::Poison)
                | (StatusCondition::Poison, PokeType::Steel)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Snow,
}

impl Weather {
    pub fn name(self) -> &'static str {
        match self {
            Weather::Sun => "SUNNYDAY",
            Weather::Rain => "RAINDANCE",
            Weather::Sand => "SANDSTORM",
            Weather::Snow => "SNOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

impl Terrain {
    pub fn name(self) -> &'static str {
        match self {
            Terrain::Electric => "ELECTRIC_TERRAIN",
            Terrain::Grassy => "GRASSY_TERRAIN",
            Terrain::Misty => "MISTY_TERRAIN",
            Terrain::Psychic => "PSYCHIC_TERRAIN",
        }
    }

    /// Move type boosted by this terrain.
    pub fn boosted_type(self) -> PokeType {
        match self {
            Terrain::Electric => PokeType::Electric,
            Terrain::Grassy => PokeType::Grass,
            Terrain::Misty => PokeType::Fairy,
            Terrain::Psychic => PokeType::Psychic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideCondition {
    Reflect,
    LightScreen,
}

impl SideCondition {
    pub fn name(self) -> &'static str {
        match self {
            SideCondition::Reflect => "REFLECT",
            SideCondition::LightScreen => "LIGHT_SCREEN",
        }
    }
}

impl fmt::Display for SideCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn default_accuracy() -> f32 {
    100.0
}

fn default_pp() -> u8 {
    10
}

/// A move as carried by a team member. `accuracy` is a percentage; `0` means the move never misses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Move {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: PokeType,
    pub category: MoveCategory,
    #[serde(default)]
    pub power: u32,
    #[serde(default = "default_accuracy")]
    pub accuracy: f32,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_pp")]
    pub pp: u8,
    #[serde(default)]
    pub status: Option<StatusCondition>,
    /// Percent chance to inflict `status`; absent means a guaranteed status move.
    #[serde(default)]
    pub status_chance: Option<f32>,
    #[serde(default)]
    pub set_weather: Option<Weather>,
    #[serde(default)]
    pub set_terrain: Option<Terrain>,
    #[serde(default)]
    pub side_condition: Option<SideCondition>,
}

impl Move {
    pub fn is_damaging(&self) -> bool {
        self.power > 0 && !matches!(self.category, MoveCategory::Status)
    }

    /// Lower-case identifier, derived from the name when none was given.
    pub fn ident(&self) -> String {
        if self.id.is_empty() {
            to_id(&self.name)
        } else {
            self.id.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub spe: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    #[serde(default)]
    pub types: Vec<PokeType>,
    pub stats: Stats,
    #[serde(default)]
    pub moves: Vec<Move>,
}

impl Pokemon {
    pub fn initial_hp(&self) -> i32 {
        self.stats.hp as i32
    }

    pub fn has_type(&self, t: PokeType) -> bool {
        self.types.contains(&t)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsFile {
    #[serde(alias = "team_a")]
    pub team_a: Vec<Pokemon>,
    #[serde(alias = "team_b")]
    pub team_b: Vec<Pokemon>,
}

/// Showdown-style identifier: lower-case ASCII alphanumerics only.
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
