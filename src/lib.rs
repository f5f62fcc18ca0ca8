pub mod action;
pub mod agent;
pub mod arena;
pub mod battle;
pub mod config;
pub mod dex;
pub mod error;
pub mod fallback;
pub mod llm;
pub mod model;
pub mod parse;
pub mod player;
pub mod prompt;
pub mod protocol;
pub mod state;
pub mod teams;
pub mod trace;
pub mod types;

use crate::agent::AgentSettings;
pub use crate::arena::{ArenaOptions, ArenaReport, Opponent};
use crate::arena::{run_arena, AgentSetup};
use crate::config::{AgentConfig, LogMode};
use crate::llm::{LlmClient, OpenAiClient};
use crate::teams::{load_teams, BattleFormat};
use crate::trace::TraceLogger;
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line overrides applied on top of [`AgentConfig`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub battles: usize,
    pub format: String,
    pub team_size: usize,
    pub teams_path: Option<PathBuf>,
    pub seed: u64,
    pub opponent: Opponent,
    pub concurrency: usize,
    pub debug_llm: bool,
    pub log_mode: Option<LogMode>,
    pub trace_file: Option<PathBuf>,
    pub model: Option<String>,
    pub spectate: bool,
    pub replay_dir: Option<PathBuf>,
}

pub fn build_client(config: &AgentConfig) -> Option<Arc<dyn LlmClient>> {
    match OpenAiClient::new(&config.llm) {
        Ok(client) => {
            tracing::info!(model = %client.model(), "llm client ready");
            Some(Arc::new(client))
        }
        Err(err) => {
            tracing::warn!(%err, "llm client unavailable, every turn will use the fallback policy");
            None
        }
    }
}

pub fn run(opts: RunOptions, mut config: AgentConfig) -> anyhow::Result<ArenaReport> {
    if let Some(mode) = opts.log_mode {
        config.log_mode = mode;
    }
    if let Some(path) = opts.trace_file.clone() {
        config.trace_file = Some(path);
    }
    if let Some(model) = opts.model.clone() {
        config.llm.model = model;
    }

    let format = BattleFormat::parse(&opts.format)?;
    let teams = opts.teams_path.as_deref().map(load_teams).transpose()?;
    let trace = match &config.trace_file {
        Some(path) => TraceLogger::to_file(path),
        None => TraceLogger::disabled(),
    };

    let agent = AgentSetup {
        client: build_client(&config),
        trace: Arc::new(trace),
        settings: AgentSettings {
            log_mode: config.log_mode,
            debug_llm: opts.debug_llm,
            force_bad_output: config.force_bad_output,
        },
    };
    let arena = ArenaOptions {
        battles: opts.battles,
        format,
        team_size: opts.team_size,
        teams,
        seed: opts.seed,
        opponent: opts.opponent,
        concurrency: opts.concurrency,
        spectate: opts.spectate,
        replay_dir: opts.replay_dir,
    };
    run_arena(&arena, &agent)
}
