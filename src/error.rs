use crate::battle::{Choice, Side};
use thiserror::Error;

/// Errors raised by the simulator and team construction.
#[derive(Debug, Error)]
pub enum BattleError {
    #[error("side {0:?} has an empty team")]
    EmptyTeam(Side),

    #[error("illegal choice {choice:?} for side {side:?}")]
    IllegalChoice { side: Side, choice: Choice },

    #[error("side {0:?} must submit a choice this step")]
    MissingChoice(Side),

    #[error("battle is already over")]
    Finished,

    #[error("unknown species '{0}'")]
    UnknownSpecies(String),

    #[error("unknown move '{0}'")]
    UnknownMove(String),

    #[error("unsupported battle format '{0}' (expected gen<N>randombattle)")]
    UnsupportedFormat(String),

    #[error("team size must be between 1 and {max}, got {got}")]
    TeamSize { got: usize, max: usize },
}

/// Failures of the outbound model call. Every variant is routed to the fallback policy.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no_llm_client")]
    NotConfigured,

    #[error("llm request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("llm endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("llm response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}
