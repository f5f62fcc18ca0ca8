use crate::battle::Choice;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Move,
    Switch,
}

impl ActionKind {
    /// Exact wire spelling only; anything else is rejected by the caller.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "move" => Some(ActionKind::Move),
            "switch" => Some(ActionKind::Switch),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Move => "move",
            ActionKind::Switch => "switch",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decision for one turn: the index is into the candidate list of its kind.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "action")]
    pub kind: ActionKind,
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Action {
    pub fn new(kind: ActionKind, index: usize) -> Self {
        Self {
            kind,
            index,
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn to_choice(&self) -> Choice {
        match self.kind {
            ActionKind::Move => Choice::Move(self.index),
            ActionKind::Switch => Choice::Switch(self.index),
        }
    }
}

impl From<Choice> for Action {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Move(i) => Action::new(ActionKind::Move, i),
            Choice::Switch(i) => Action::new(ActionKind::Switch, i),
        }
    }
}
