//! Append-only JSON Lines log of turn decisions.
//!
//! Writes never fail the caller: errors are reported through `tracing` and dropped.

use crate::action::Action;
use crate::state::TurnState;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceEvent {
    /// The model's action was decoded and legal.
    LlmOk,
    /// The reply could not be used; the fallback action was played.
    LlmFallback,
    /// The model call itself failed; the fallback action was played.
    LlmError,
}

impl TraceEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceEvent::LlmOk => "llm_ok",
            TraceEvent::LlmFallback => "llm_fallback",
            TraceEvent::LlmError => "llm_error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub event: TraceEvent,
    pub battle: String,
    pub turn: u32,
    pub action: Action,
    pub state: TurnState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Unix time in milliseconds.
    pub ts: u64,
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Default)]
pub struct TraceLogger {
    path: Option<PathBuf>,
    lock: Mutex<()>,
}

impl TraceLogger {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Parent directories are created up front; a failure there is only reported.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), %err, "could not create trace directory");
            }
        }
        Self {
            path: Some(path),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    pub fn append(&self, record: &TraceRecord) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(err) = self.try_append(path, record) {
            tracing::warn!(path = %path.display(), %err, "trace write failed");
        }
    }

    fn try_append(&self, path: &Path, record: &TraceRecord) -> anyhow::Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Reads a trace file back, skipping lines that do not decode.
pub fn read_records(path: &Path) -> anyhow::Result<Vec<TraceRecord>> {
    let raw = fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect())
}
