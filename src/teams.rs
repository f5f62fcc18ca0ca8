//! Battle formats and team construction.

use crate::dex;
use crate::error::BattleError;
use crate::model::{Pokemon, TeamsFile};
use anyhow::Context;
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;

pub const MAX_TEAM_SIZE: usize = 6;
pub const MOVES_PER_CREATURE: usize = 4;

/// A `gen<N>randombattle` format id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleFormat {
    pub id: String,
    pub generation: u8,
}

impl BattleFormat {
    pub fn parse(id: &str) -> Result<Self, BattleError> {
        let normalized = id.trim().to_ascii_lowercase();
        let generation = normalized
            .strip_prefix("gen")
            .and_then(|rest| rest.strip_suffix("randombattle"))
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=9).contains(n))
            .ok_or_else(|| BattleError::UnsupportedFormat(id.to_string()))?;
        Ok(Self {
            id: normalized,
            generation,
        })
    }
}

/// Distinct species, each with a random four-move set from its movepool.
pub fn random_team<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Result<Vec<Pokemon>, BattleError> {
    check_size(size)?;
    let ids = dex::species_ids();
    ids.choose_multiple(rng, size)
        .map(|id| {
            let data = dex::species(id).ok_or_else(|| BattleError::UnknownSpecies(id.to_string()))?;
            let moves: Vec<&str> = data
                .movepool
                .choose_multiple(rng, MOVES_PER_CREATURE)
                .copied()
                .collect();
            dex::build_pokemon(id, &moves)
        })
        .collect()
}

fn check_size(size: usize) -> Result<(), BattleError> {
    if size == 0 || size > MAX_TEAM_SIZE {
        return Err(BattleError::TeamSize {
            got: size,
            max: MAX_TEAM_SIZE,
        });
    }
    Ok(())
}

pub fn validate_team_sizes(teams: &TeamsFile) -> anyhow::Result<()> {
    check_size(teams.team_a.len()).context("team_a")?;
    check_size(teams.team_b.len()).context("team_b")?;
    for mon in teams.team_a.iter().chain(&teams.team_b) {
        if mon.moves.is_empty() {
            anyhow::bail!("{} has no moves", mon.name);
        }
        if mon.stats.hp == 0 {
            anyhow::bail!("{} has 0 hp", mon.name);
        }
    }
    Ok(())
}

pub fn load_teams(path: &Path) -> anyhow::Result<TeamsFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read teams file at {}", path.display()))?;
    let parsed: TeamsFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    validate_team_sizes(&parsed)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn parses_random_battle_formats() {
        let format = BattleFormat::parse("gen9randombattle").unwrap();
        assert_eq!(format.generation, 9);
        assert_eq!(BattleFormat::parse(" Gen4RandomBattle ").unwrap().id, "gen4randombattle");
        assert!(BattleFormat::parse("gen9ou").is_err());
        assert!(BattleFormat::parse("genXrandombattle").is_err());
    }

    #[test]
    fn random_team_has_distinct_species_and_four_moves() {
        let mut rng = SmallRng::seed_from_u64(3);
        let team = random_team(&mut rng, 6).unwrap();
        assert_eq!(team.len(), 6);
        let names: HashSet<&str> = team.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), 6);
        assert!(team.iter().all(|p| p.moves.len() == MOVES_PER_CREATURE));
    }

    #[test]
    fn random_team_is_seeded() {
        let a = random_team(&mut SmallRng::seed_from_u64(11), 3).unwrap();
        let b = random_team(&mut SmallRng::seed_from_u64(11), 3).unwrap();
        let names = |t: &[Pokemon]| t.iter().map(|p| p.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn rejects_bad_team_sizes() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(random_team(&mut rng, 0).is_err());
        assert!(random_team(&mut rng, 7).is_err());
    }
}
