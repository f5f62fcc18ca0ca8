use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Elemental type of a creature or move.
///
/// Serialized in upper case (`"FIRE"`), parsed case-insensitively.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PokeType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokeType {
    pub const ALL: [PokeType; 18] = [
        PokeType::Normal,
        PokeType::Fire,
        PokeType::Water,
        PokeType::Electric,
        PokeType::Grass,
        PokeType::Ice,
        PokeType::Fighting,
        PokeType::Poison,
        PokeType::Ground,
        PokeType::Flying,
        PokeType::Psychic,
        PokeType::Bug,
        PokeType::Rock,
        PokeType::Ghost,
        PokeType::Dragon,
        PokeType::Dark,
        PokeType::Steel,
        PokeType::Fairy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PokeType::Normal => "NORMAL",
            PokeType::Fire => "FIRE",
            PokeType::Water => "WATER",
            PokeType::Electric => "ELECTRIC",
            PokeType::Grass => "GRASS",
            PokeType::Ice => "ICE",
            PokeType::Fighting => "FIGHTING",
            PokeType::Poison => "POISON",
            PokeType::Ground => "GROUND",
            PokeType::Flying => "FLYING",
            PokeType::Psychic => "PSYCHIC",
            PokeType::Bug => "BUG",
            PokeType::Rock => "ROCK",
            PokeType::Ghost => "GHOST",
            PokeType::Dragon => "DRAGON",
            PokeType::Dark => "DARK",
            PokeType::Steel => "STEEL",
            PokeType::Fairy => "FAIRY",
        }
    }

    /// Multiplier of an attack of this type against a single defending type.
    // Ref: pokemon-showdown/data/typechart.ts
    pub fn against(self, defending: PokeType) -> f32 {
        use PokeType::*;
        match self {
            Normal => match defending {
                Rock | Steel => 0.5,
                Ghost => 0.0,
                _ => 1.0,
            },
            Fire => match defending {
                Fire | Water | Rock | Dragon => 0.5,
                Grass | Ice | Bug | Steel => 2.0,
                _ => 1.0,
            },
            Water => match defending {
                Water | Grass | Dragon => 0.5,
                Fire | Ground | Rock => 2.0,
                _ => 1.0,
            },
            Electric => match defending {
                Electric | Grass | Dragon => 0.5,
                Water | Flying => 2.0,
                Ground => 0.0,
                _ => 1.0,
            },
            Grass => match defending {
                Fire | Grass | Poison | Flying | Bug | Dragon | Steel => 0.5,
                Water | Ground | Rock => 2.0,
                _ => 1.0,
            },
            Ice => match defending {
                Fire | Water | Ice | Steel => 0.5,
                Grass | Ground | Flying | Dragon => 2.0,
                _ => 1.0,
            },
            Fighting => match defending {
                Normal | Ice | Rock | Dark | Steel => 2.0,
                Poison | Flying | Psychic | Bug | Fairy => 0.5,
                Ghost => 0.0,
                _ => 1.0,
            },
            Poison => match defending {
                Grass | Fairy => 2.0,
                Poison | Ground | Rock | Ghost => 0.5,
                Steel => 0.0,
                _ => 1.0,
            },
            Ground => match defending {
                Fire | Electric | Poison | Rock | Steel => 2.0,
                Grass | Bug => 0.5,
                Flying => 0.0,
                _ => 1.0,
            },
            Flying => match defending {
                Grass | Fighting | Bug => 2.0,
                Electric | Rock | Steel => 0.5,
                _ => 1.0,
            },
            Psychic => match defending {
                Fighting | Poison => 2.0,
                Psychic | Steel => 0.5,
                Dark => 0.0,
                _ => 1.0,
            },
            Bug => match defending {
                Grass | Psychic | Dark => 2.0,
                Fire | Fighting | Poison | Flying | Ghost | Steel | Fairy => 0.5,
                _ => 1.0,
            },
            Rock => match defending {
                Fire | Ice | Flying | Bug => 2.0,
                Fighting | Ground | Steel => 0.5,
                _ => 1.0,
            },
            Ghost => match defending {
                Ghost | Psychic => 2.0,
                Dark => 0.5,
                Normal => 0.0,
                _ => 1.0,
            },
            Dragon => match defending {
                Dragon => 2.0,
                Steel => 0.5,
                Fairy => 0.0,
                _ => 1.0,
            },
            Dark => match defending {
                Psychic | Ghost => 2.0,
                Fighting | Dark | Fairy => 0.5,
                _ => 1.0,
            },
            Steel => match defending {
                Rock | Ice | Fairy => 2.0,
                Fire | Water | Electric | Steel => 0.5,
                _ => 1.0,
            },
            Fairy => match defending {
                Fighting | Dragon | Dark => 2.0,
                Fire | Poison | Steel => 0.5,
                _ => 1.0,
            },
        }
    }
}

/// Combined multiplier against every type of the target. An untyped target takes neutral damage.
pub fn type_effectiveness(move_type: PokeType, target_types: &[PokeType]) -> f32 {
    target_types
        .iter()
        .fold(1.0, |acc, t| acc * move_type.against(*t))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown type '{0}'")]
pub struct UnknownType(pub String);

impl FromStr for PokeType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PokeType::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownType(s.to_string()))
    }
}

impl TryFrom<String> for PokeType {
    type Error = UnknownType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PokeType> for String {
    fn from(value: PokeType) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for PokeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
