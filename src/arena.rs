//! Runs the agent against a baseline opponent for a number of battles.

use crate::agent::{AgentSettings, DecisionStats, LlmPlayer};
use crate::battle::{Battle, BattleResult, Choice, Side};
use crate::error::BattleError;
use crate::fallback;
use crate::llm::LlmClient;
use crate::model::{Pokemon, TeamsFile};
use crate::player::{MaxDamagePlayer, Player, RandomPlayer};
use crate::state::summarize;
use crate::teams::{random_team, BattleFormat};
use crate::trace::TraceLogger;
use anyhow::Context;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Opponent {
    #[default]
    Random,
    MaxDamage,
}

impl Opponent {
    fn player(self, name: &str, seed: u64) -> Box<dyn Player> {
        match self {
            Opponent::Random => Box::new(RandomPlayer::new(name, seed)),
            Opponent::MaxDamage => Box::new(MaxDamagePlayer::new(name)),
        }
    }
}

/// Everything a battle needs to build its own [`LlmPlayer`].
#[derive(Clone)]
pub struct AgentSetup {
    pub client: Option<Arc<dyn LlmClient>>,
    pub trace: Arc<TraceLogger>,
    pub settings: AgentSettings,
}

impl AgentSetup {
    pub fn player(&self, name: &str) -> LlmPlayer {
        LlmPlayer::new(name, self.client.clone(), Arc::clone(&self.trace), self.settings)
    }
}

#[derive(Clone, Debug)]
pub struct ArenaOptions {
    pub battles: usize,
    pub format: BattleFormat,
    pub team_size: usize,
    /// Fixed teams; the agent plays `team_a`. Random teams are drawn when unset.
    pub teams: Option<TeamsFile>,
    pub seed: u64,
    pub opponent: Opponent,
    pub concurrency: usize,
    /// Stream the first battle's protocol log to stdout.
    pub spectate: bool,
    pub replay_dir: Option<PathBuf>,
}

impl Default for ArenaOptions {
    fn default() -> Self {
        Self {
            battles: 1,
            format: BattleFormat {
                id: "gen9randombattle".to_string(),
                generation: 9,
            },
            team_size: 6,
            teams: None,
            seed: 0,
            opponent: Opponent::Random,
            concurrency: 1,
            spectate: false,
            replay_dir: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BattleOutcome {
    pub tag: String,
    pub result: BattleResult,
    pub turns: u32,
    pub decisions: DecisionStats,
    pub replay: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
pub struct ArenaReport {
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    pub decisions: DecisionStats,
    pub battles: Vec<BattleOutcome>,
}

impl ArenaReport {
    fn from_outcomes(battles: Vec<BattleOutcome>) -> Self {
        let mut report = ArenaReport::default();
        for outcome in &battles {
            match outcome.result {
                BattleResult::AWins => report.wins += 1,
                BattleResult::BWins => report.losses += 1,
                BattleResult::Tie => report.ties += 1,
            }
            report.decisions += outcome.decisions;
        }
        report.battles = battles;
        report
    }

    pub fn first_replay(&self) -> Option<&PathBuf> {
        self.battles.iter().find_map(|b| b.replay.as_ref())
    }
}

/// Asks a requested side for its choice, replacing an illegal one with the fallback action.
fn request(battle: &Battle, side: Side, player: &mut dyn Player) -> Option<Choice> {
    if !battle.requested(side) {
        return None;
    }
    let view = battle.view(side);
    let choice = player.choose(&view);
    if view.is_legal(choice) {
        return Some(choice);
    }
    let replacement = fallback::select(&summarize(&view)).to_choice();
    warn!(
        battle = %battle.tag(),
        player = %player.name(),
        ?choice,
        ?replacement,
        "illegal choice, substituting fallback"
    );
    Some(replacement)
}

/// Drives one battle to completion. New protocol lines are written to `spectator` after each step.
pub fn run_battle(
    battle: &mut Battle,
    a: &mut dyn Player,
    b: &mut dyn Player,
    mut spectator: Option<&mut dyn Write>,
) -> Result<BattleResult, BattleError> {
    battle.log_players(a.name(), b.name());
    let mut printed = 0;
    loop {
        if let Some(out) = spectator.as_deref_mut() {
            let lines = battle.log().lines();
            for line in &lines[printed..] {
                if let Err(err) = writeln!(out, "{line}") {
                    warn!(battle = %battle.tag(), %err, "spectator write failed");
                }
            }
            printed = lines.len();
        }
        if let Some(result) = battle.result() {
            return Ok(result);
        }
        let choice_a = request(battle, Side::A, a);
        let choice_b = request(battle, Side::B, b);
        battle.step(choice_a, choice_b)?;
    }
}

fn draw_teams(rng: &mut SmallRng, opts: &ArenaOptions) -> Result<(Vec<Pokemon>, Vec<Pokemon>), BattleError> {
    match &opts.teams {
        Some(teams) => Ok((teams.team_a.clone(), teams.team_b.clone())),
        None => Ok((random_team(rng, opts.team_size)?, random_team(rng, opts.team_size)?)),
    }
}

fn play_one(index: usize, opts: &ArenaOptions, agent: &AgentSetup) -> anyhow::Result<BattleOutcome> {
    let mut rng = SmallRng::seed_from_u64(opts.seed ^ ((index as u64) << 32));
    let (team_a, team_b) = draw_teams(&mut rng, opts)?;
    let tag = format!("battle-{}-{}", opts.format.id, index + 1);
    let mut battle = Battle::new(&tag, &opts.format.id, &team_a, &team_b, rng.gen())?;

    let mut llm = agent.player("LLM");
    let mut opponent = opts.opponent.player("Baseline", rng.gen());

    let mut stdout = std::io::stdout();
    let spectator: Option<&mut dyn Write> = if opts.spectate && index == 0 {
        Some(&mut stdout)
    } else {
        None
    };
    let result = run_battle(&mut battle, &mut llm, opponent.as_mut(), spectator)
        .with_context(|| format!("{tag} aborted"))?;

    let replay = match &opts.replay_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create replay directory {}", dir.display()))?;
            let path = dir.join(format!("{tag}.log"));
            std::fs::write(&path, battle.log().render())
                .with_context(|| format!("Failed to write replay {}", path.display()))?;
            Some(path)
        }
        None => None,
    };

    info!(battle = %tag, ?result, turns = battle.turn(), "battle finished");
    Ok(BattleOutcome {
        tag,
        result,
        turns: battle.turn(),
        decisions: llm.stats(),
        replay,
    })
}

pub fn run_arena(opts: &ArenaOptions, agent: &AgentSetup) -> anyhow::Result<ArenaReport> {
    if opts.battles == 0 {
        anyhow::bail!("--battles must be > 0");
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.concurrency.max(1))
        .build()
        .context("Failed to build battle thread pool")?;
    let outcomes = pool.install(|| {
        (0..opts.battles)
            .into_par_iter()
            .map(|index| play_one(index, opts, agent))
            .collect::<anyhow::Result<Vec<_>>>()
    })?;
    Ok(ArenaReport::from_outcomes(outcomes))
}
