//! Environment-driven configuration. `.env` is loaded by the binary before this is read.

use secrecy::SecretString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of each turn is printed to the console.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum LogMode {
    #[default]
    None,
    Compact,
    Full,
}

impl LogMode {
    /// Default `tracing` directive for this mode when `RUST_LOG` is unset.
    pub fn default_directive(self) -> &'static str {
        match self {
            LogMode::None => "warn",
            LogMode::Compact => "info",
            LogMode::Full => "debug",
        }
    }
}

impl FromStr for LogMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(LogMode::None),
            "compact" => Ok(LogMode::Compact),
            "full" => Ok(LogMode::Full),
            other => anyhow::bail!("unknown log mode '{other}' (use none, compact or full)"),
        }
    }
}

#[derive(Debug)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<SecretString>,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            temperature: 0.15,
            max_tokens: 128,
        }
    }
}

#[derive(Debug, Default)]
pub struct AgentConfig {
    pub log_mode: LogMode,
    pub trace_file: Option<PathBuf>,
    pub llm: LlmSettings,
    /// Skip the model call and treat the turn as an unparseable reply.
    pub force_bad_output: bool,
}

impl AgentConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AgentConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = LlmSettings::default();

        let log_mode = match non_empty("LLM_LOG_MODE") {
            Some(v) => v.parse()?,
            None => LogMode::None,
        };
        let timeout = match non_empty("LLM_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(
                v.trim()
                    .parse()
                    .map_err(|e| anyhow::anyhow!("LLM_TIMEOUT_SECS must be a number of seconds: {e}"))?,
            ),
            None => defaults.timeout,
        };

        Ok(Self {
            log_mode,
            trace_file: non_empty("LLM_TRACE_FILE").map(PathBuf::from),
            llm: LlmSettings {
                base_url: non_empty("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
                model: non_empty("OPENAI_MODEL").unwrap_or(defaults.model),
                api_key: non_empty("OPENAI_API_KEY").map(SecretString::new),
                timeout,
                ..defaults
            },
            force_bad_output: lookup("LLM_FORCE_BAD_OUTPUT").as_deref() == Some("1"),
        })
    }
}
