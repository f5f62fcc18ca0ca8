mod common;

use common::{dex_battle, dex_view};
use poke_llm_agent::action::ActionKind;
use poke_llm_agent::agent::{AgentSettings, LlmPlayer};
use poke_llm_agent::arena::run_battle;
use poke_llm_agent::error::LlmError;
use poke_llm_agent::fallback;
use poke_llm_agent::llm::LlmClient;
use poke_llm_agent::player::RandomPlayer;
use poke_llm_agent::prompt::{Prompt, PromptBuilder};
use poke_llm_agent::state::summarize;
use poke_llm_agent::trace::{read_records, TraceEvent, TraceLogger};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Replays canned replies; once the script runs out every call fails.
struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LlmClient for ScriptedClient {
    fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        assert!(prompt.user.contains("\"candidates\""));
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::Status {
                status: 503,
                body: "script exhausted".to_string(),
            }))
    }
}

fn player(client: Option<Arc<dyn LlmClient>>, trace: &Arc<TraceLogger>, settings: AgentSettings) -> LlmPlayer {
    LlmPlayer::new("LLM", client, Arc::clone(trace), settings)
}

fn temp_trace() -> (tempfile::TempDir, Arc<TraceLogger>) {
    let dir = tempfile::tempdir().unwrap();
    let trace = Arc::new(TraceLogger::to_file(dir.path().join("logs").join("trace.jsonl")));
    (dir, trace)
}

#[test]
fn legal_reply_is_played_and_traced_as_ok() {
    let (_dir, trace) = temp_trace();
    let client = ScriptedClient::new(vec![Ok(
        r#"{"action":"move","index":2,"reason":"coverage"}"#.to_string(),
    )]);
    let mut agent = player(Some(client.clone()), &trace, AgentSettings::default());

    let decision = agent.decide(&dex_view(1));
    assert_eq!(decision.event, TraceEvent::LlmOk);
    assert_eq!(decision.action.kind, ActionKind::Move);
    assert_eq!(decision.action.index, 2);
    assert_eq!(decision.action.reason.as_deref(), Some("coverage"));
    assert_eq!(client.calls(), 1);

    let records = read_records(trace.path().unwrap()).unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.event, TraceEvent::LlmOk);
    assert_eq!(record.battle, "battle-gen9randombattle-1");
    assert_eq!(record.action, decision.action);
    assert!(record.raw.as_deref().unwrap().contains("coverage"));
    assert_eq!(record.parsed.as_ref().unwrap()["index"], 2);
    assert!(record.error.is_none());
    assert_eq!(record.state.candidates.len(), 5);
}

#[test]
fn unparseable_reply_falls_back_to_best_move() {
    let (_dir, trace) = temp_trace();
    let client = ScriptedClient::new(vec![Ok("MOVE 1".to_string())]);
    let mut agent = player(Some(client), &trace, AgentSettings::default());
    let view = dex_view(1);

    let decision = agent.decide(&view);
    let expected = fallback::select(&summarize(&view));
    assert_eq!(decision.event, TraceEvent::LlmFallback);
    assert_eq!((decision.action.kind, decision.action.index), (expected.kind, expected.index));
    // Flamethrower into Venusaur.
    assert_eq!((decision.action.kind, decision.action.index), (ActionKind::Move, 0));
    assert!(decision
        .action
        .reason
        .as_deref()
        .unwrap()
        .contains("no_json_object_found"));

    let records = read_records(trace.path().unwrap()).unwrap();
    assert_eq!(records[0].event, TraceEvent::LlmFallback);
    assert_eq!(records[0].raw.as_deref(), Some("MOVE 1"));
    assert_eq!(records[0].error.as_deref(), Some("no_json_object_found"));
}

#[test]
fn out_of_range_reply_keeps_the_parsed_object() {
    let (_dir, trace) = temp_trace();
    let client = ScriptedClient::new(vec![Ok(r#"{"action":"switch","index":9}"#.to_string())]);
    let mut agent = player(Some(client), &trace, AgentSettings::default());

    let decision = agent.decide(&dex_view(1));
    assert_eq!(decision.event, TraceEvent::LlmFallback);
    assert_eq!(decision.record.parsed.as_ref().unwrap()["index"], 9);
    assert!(decision.record.error.as_deref().unwrap().starts_with("index_out_of_range_switch"));
}

#[test]
fn client_failure_is_traced_as_error_and_the_battle_continues() {
    let (_dir, trace) = temp_trace();
    let client = ScriptedClient::new(Vec::new());
    let mut agent = player(Some(client.clone()), &trace, AgentSettings::default());
    let mut opponent = RandomPlayer::new("Baseline", 7);
    let mut battle = dex_battle(3);

    let result = run_battle(&mut battle, &mut agent, &mut opponent, None).unwrap();
    assert_eq!(battle.result(), Some(result));

    let stats = agent.stats();
    assert!(stats.total() > 0);
    assert_eq!(stats.error, stats.total());
    assert_eq!(client.calls() as u32, stats.total());

    let records = read_records(trace.path().unwrap()).unwrap();
    assert_eq!(records.len() as u32, stats.total());
    assert!(records.iter().all(|r| r.event == TraceEvent::LlmError && r.raw.is_none()));
    assert!(records[0].error.as_deref().unwrap().contains("503"));
}

#[test]
fn missing_client_is_an_error_event() {
    let (_dir, trace) = temp_trace();
    let mut agent = player(None, &trace, AgentSettings::default());
    let decision = agent.decide(&dex_view(1));
    assert_eq!(decision.event, TraceEvent::LlmError);
    assert_eq!(decision.record.error.as_deref(), Some("no_llm_client"));
    assert_eq!(decision.action.index, 0);
}

#[test]
fn forced_bad_output_skips_the_call() {
    let (_dir, trace) = temp_trace();
    let client = ScriptedClient::new(vec![Ok(r#"{"action":"move","index":1}"#.to_string())]);
    let settings = AgentSettings {
        force_bad_output: true,
        ..AgentSettings::default()
    };
    let mut agent = player(Some(client.clone()), &trace, settings);

    let decision = agent.decide(&dex_view(1));
    assert_eq!(decision.event, TraceEvent::LlmFallback);
    assert_eq!(client.calls(), 0);
    assert_eq!(agent.stats().fallback, 1);
}

#[test]
fn trace_lines_are_flat_json_objects() {
    let (_dir, trace) = temp_trace();
    let client = ScriptedClient::new(vec![
        Ok(r#"{"action":"move","index":0}"#.to_string()),
        Ok("no json".to_string()),
    ]);
    let mut agent = player(Some(client), &trace, AgentSettings::default());
    agent.decide(&dex_view(1));
    agent.decide(&dex_view(1));

    let raw = std::fs::read_to_string(trace.path().unwrap()).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        let value: Value = serde_json::from_str(line).unwrap();
        for key in ["event", "battle", "turn", "action", "state", "ts"] {
            assert!(value.get(key).is_some(), "missing {key} in {line}");
        }
        assert!(value["state"]["candidates"].is_array());
    }
    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["event"], "llm_ok");
    assert_eq!(first["action"]["action"], "move");
    assert!(first.get("error").is_none());
}

#[test]
fn disabled_trace_still_decides() {
    let trace = Arc::new(TraceLogger::disabled());
    let mut agent = player(None, &trace, AgentSettings::default());
    let decision = agent.decide(&dex_view(1));
    assert!(!trace.is_enabled());
    assert!(trace.path().is_none());
    assert_eq!(decision.event, TraceEvent::LlmError);
}

#[test]
fn bundled_sample_trace_decodes() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/sample_trace.jsonl");
    let records = read_records(&path).unwrap();
    let events: Vec<TraceEvent> = records.iter().map(|r| r.event).collect();
    assert_eq!(
        events,
        vec![TraceEvent::LlmOk, TraceEvent::LlmFallback, TraceEvent::LlmError]
    );
    assert!(records[2].state.force_switch);
}

#[test]
fn unwritable_trace_does_not_stop_the_battle() {
    let dir = tempfile::tempdir().unwrap();
    // The trace path is a directory, so every append fails.
    let trace = Arc::new(TraceLogger::to_file(dir.path()));
    let mut agent = player(None, &trace, AgentSettings::default());
    let mut opponent = RandomPlayer::new("Baseline", 11);
    let mut battle = dex_battle(5);

    let result = run_battle(&mut battle, &mut agent, &mut opponent, None).unwrap();
    assert_eq!(battle.result(), Some(result));
    let stats = agent.stats();
    assert!(stats.total() > 0);
    assert_eq!(stats.error, stats.total());
    assert!(dir.path().is_dir());
}

/// Records the system prompt of every call and always plays move 0.
#[derive(Default)]
struct RecordingClient {
    systems: Mutex<Vec<String>>,
}

impl LlmClient for RecordingClient {
    fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        self.systems.lock().unwrap().push(prompt.system.clone());
        Ok(r#"{"action":"move","index":0}"#.to_string())
    }
}

#[test]
fn custom_system_prompt_reaches_the_client() {
    let client = Arc::new(RecordingClient::default());
    let trace = Arc::new(TraceLogger::disabled());
    let mut agent = player(Some(client.clone()), &trace, AgentSettings::default()).with_prompt(PromptBuilder {
        system_prompt: "Answer with JSON only.".to_string(),
    });

    let decision = agent.decide(&dex_view(2));
    assert_eq!(decision.event, TraceEvent::LlmOk);
    assert_eq!(*client.systems.lock().unwrap(), vec!["Answer with JSON only.".to_string()]);
}
