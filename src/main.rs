use clap::Parser;
use poke_llm_agent::config::{AgentConfig, LogMode};
use poke_llm_agent::{run, Opponent, RunOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Play LLM-driven battles against a baseline opponent.
#[derive(Debug, Parser)]
#[command(name = "poke-llm-agent", version)]
struct Cli {
    /// Number of battles to play.
    #[arg(long, default_value_t = 1)]
    battles: usize,

    #[arg(long, default_value = "gen9randombattle")]
    format: String,

    /// Creatures per random team.
    #[arg(long, default_value_t = 6)]
    team_size: usize,

    /// JSON file with fixed `team_a` (agent) and `team_b` (opponent).
    #[arg(long)]
    teams: Option<PathBuf>,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Opponent::Random)]
    opponent: Opponent,

    /// Battles played in parallel.
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Print prompts and raw model output (with `--log-mode full`).
    #[arg(long)]
    debug_llm: bool,

    #[arg(long, value_enum, env = "LLM_LOG_MODE")]
    log_mode: Option<LogMode>,

    /// Keep HTTP library logs at warn.
    #[arg(long)]
    quiet_lib_logs: bool,

    #[arg(long, env = "LLM_TRACE_FILE")]
    trace_file: Option<PathBuf>,

    #[arg(long, env = "OPENAI_MODEL")]
    model: Option<String>,

    /// Stream the first battle's protocol log to stdout.
    #[arg(long)]
    spectate: bool,

    /// Write one protocol log per battle into this directory.
    #[arg(long)]
    replay_dir: Option<PathBuf>,

    /// Open the first replay when done (implies a replay directory).
    #[arg(long)]
    open: bool,
}

fn init_tracing(log_mode: LogMode, quiet_lib_logs: bool) {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_mode.default_directive()));
    if quiet_lib_logs {
        for directive in ["reqwest=warn", "hyper=warn", "hyper_util=warn", "rustls=warn"] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_in_viewer(path: &Path) -> std::io::Result<()> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };
    std::process::Command::new(opener).arg(path).spawn().map(|_| ())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = AgentConfig::from_env()?;
    let log_mode = cli.log_mode.unwrap_or(config.log_mode);
    init_tracing(log_mode, cli.quiet_lib_logs);

    let replay_dir = match (&cli.replay_dir, cli.open) {
        (Some(dir), _) => Some(dir.clone()),
        (None, true) => Some(PathBuf::from("replays")),
        (None, false) => None,
    };
    let opts = RunOptions {
        battles: cli.battles,
        format: cli.format,
        team_size: cli.team_size,
        teams_path: cli.teams,
        seed: cli.seed,
        opponent: cli.opponent,
        concurrency: cli.concurrency,
        debug_llm: cli.debug_llm,
        log_mode: Some(log_mode),
        trace_file: cli.trace_file,
        model: cli.model,
        spectate: cli.spectate,
        replay_dir,
    };
    let report = run(opts, config)?;

    println!("LLM won {} / lost {} / tied {}", report.wins, report.losses, report.ties);
    println!(
        "Decisions: {} ok, {} fallback, {} error",
        report.decisions.ok, report.decisions.fallback, report.decisions.error
    );
    if cli.open {
        if let Some(path) = report.first_replay() {
            if let Err(err) = open_in_viewer(path) {
                tracing::warn!(path = %path.display(), %err, "could not open replay");
            }
        }
    }
    Ok(())
}
