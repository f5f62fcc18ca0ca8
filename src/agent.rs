//! The model-driven player: summarize, prompt, query, validate, fall back, trace.

use crate::action::{Action, ActionKind};
use crate::battle::{BattleView, Choice};
use crate::config::LogMode;
use crate::error::LlmError;
use crate::fallback;
use crate::llm::LlmClient;
use crate::parse::{parse_response, ParseFailure, Rejected};
use crate::player::Player;
use crate::prompt::{render_summary, PromptBuilder};
use crate::state::{summarize, TurnState};
use crate::trace::{now_millis, TraceEvent, TraceLogger, TraceRecord};
use std::ops::AddAssign;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Default)]
pub struct AgentSettings {
    pub log_mode: LogMode,
    /// Print prompts and raw replies (only in `full` log mode).
    pub debug_llm: bool,
    pub force_bad_output: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DecisionStats {
    pub ok: u32,
    pub fallback: u32,
    pub error: u32,
}

impl DecisionStats {
    pub fn record(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::LlmOk => self.ok += 1,
            TraceEvent::LlmFallback => self.fallback += 1,
            TraceEvent::LlmError => self.error += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.ok + self.fallback + self.error
    }
}

impl AddAssign for DecisionStats {
    fn add_assign(&mut self, rhs: Self) {
        self.ok += rhs.ok;
        self.fallback += rhs.fallback;
        self.error += rhs.error;
    }
}

#[derive(Clone, Debug)]
pub struct Decision {
    pub action: Action,
    pub event: TraceEvent,
    pub record: TraceRecord,
}

enum Outcome {
    Accepted { raw: String, action: Action, parsed: serde_json::Value },
    Rejected { raw: Option<String>, rejected: Rejected },
    Failed(LlmError),
}

pub struct LlmPlayer {
    name: String,
    client: Option<Arc<dyn LlmClient>>,
    trace: Arc<TraceLogger>,
    prompt: PromptBuilder,
    settings: AgentSettings,
    stats: DecisionStats,
}

impl LlmPlayer {
    pub fn new(
        name: impl Into<String>,
        client: Option<Arc<dyn LlmClient>>,
        trace: Arc<TraceLogger>,
        settings: AgentSettings,
    ) -> Self {
        Self {
            name: name.into(),
            client,
            trace,
            prompt: PromptBuilder::default(),
            settings,
            stats: DecisionStats::default(),
        }
    }

    pub fn with_prompt(mut self, prompt: PromptBuilder) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn stats(&self) -> DecisionStats {
        self.stats
    }

    fn debug_llm(&self) -> bool {
        self.settings.debug_llm && self.settings.log_mode == LogMode::Full
    }

    fn query(&self, state: &TurnState) -> Outcome {
        if self.settings.force_bad_output {
            if self.debug_llm() {
                debug!(target: "poke_llm_agent::turn", "[LLM] (forced) RAW OUTPUT: MOVE 1");
            }
            return Outcome::Rejected {
                raw: None,
                rejected: Rejected {
                    failure: ParseFailure::NoJsonObject,
                    parsed: None,
                },
            };
        }
        let Some(client) = &self.client else {
            return Outcome::Failed(LlmError::NotConfigured);
        };

        let prompt = self.prompt.build(state);
        if self.debug_llm() {
            debug!(target: "poke_llm_agent::turn", "[LLM] === PROMPT ===\n{}\n{}", prompt.system, prompt.user);
        }
        let raw = match client.complete(&prompt) {
            Ok(raw) => raw,
            Err(err) => return Outcome::Failed(err),
        };
        if self.debug_llm() {
            debug!(target: "poke_llm_agent::turn", "[LLM] RAW OUTPUT: {raw}");
        }

        match parse_response(&raw, state) {
            Ok(accepted) => Outcome::Accepted {
                raw,
                action: accepted.action,
                parsed: accepted.parsed,
            },
            Err(rejected) => Outcome::Rejected {
                raw: Some(raw),
                rejected,
            },
        }
    }

    /// Produces exactly one action for the view and appends one trace record.
    pub fn decide(&mut self, view: &BattleView) -> Decision {
        let state = summarize(view);
        if self.settings.log_mode != LogMode::None {
            for line in render_summary(&state) {
                info!(target: "poke_llm_agent::turn", "{line}");
            }
        }

        let (event, action, raw, parsed, error) = match self.query(&state) {
            Outcome::Accepted { raw, action, parsed } => (TraceEvent::LlmOk, action, Some(raw), Some(parsed), None),
            Outcome::Rejected { raw, rejected } => {
                let cause = rejected.failure.to_string();
                let action = fallback_with_cause(&state, &cause);
                (TraceEvent::LlmFallback, action, raw, rejected.parsed, Some(cause))
            }
            Outcome::Failed(err) => {
                let cause = err.to_string();
                tracing::warn!(battle = %state.battle, turn = state.turn, error = %cause, "llm call failed, using fallback");
                let action = fallback_with_cause(&state, &cause);
                (TraceEvent::LlmError, action, None, None, Some(cause))
            }
        };

        info!(
            target: "poke_llm_agent::turn",
            "[DECIDE] {} idx={} ({}) | reason={}",
            action.kind.as_str().to_ascii_uppercase(),
            action.index,
            candidate_name(&state, &action),
            action.reason.as_deref().unwrap_or("")
        );

        let record = TraceRecord {
            event,
            battle: state.battle.clone(),
            turn: state.turn,
            action: action.clone(),
            state,
            raw,
            parsed,
            error,
            ts: now_millis(),
        };
        self.trace.append(&record);
        self.stats.record(event);

        Decision {
            action,
            event,
            record,
        }
    }
}

fn fallback_with_cause(state: &TurnState, cause: &str) -> Action {
    let action = fallback::select(state);
    let reason = format!("{} ({cause})", action.reason.as_deref().unwrap_or("fallback"));
    action.with_reason(reason)
}

fn candidate_name(state: &TurnState, action: &Action) -> String {
    match action.kind {
        ActionKind::Move => state.moves().nth(action.index).map(|m| m.name.clone()),
        ActionKind::Switch => state.switches().nth(action.index).map(|s| s.species.clone()),
    }
    .unwrap_or_else(|| "?".to_string())
}

impl Player for LlmPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, view: &BattleView) -> Choice {
        self.decide(view).action.to_choice()
    }
}
