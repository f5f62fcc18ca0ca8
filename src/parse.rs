//! Decoding and validation of the model's free-form reply.
//!
//! The reply must contain a JSON object `{"action": "move"|"switch", "index": <int>}`.
//! Anything else is a [`ParseFailure`]; nothing is coerced.

use crate::action::{Action, ActionKind};
use crate::state::TurnState;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("no_json_object_found")]
    NoJsonObject,

    #[error("bad_action:{0}")]
    BadAction(String),

    #[error("index_missing")]
    MissingIndex,

    #[error("index_not_int")]
    IndexNotInteger,

    #[error("index_out_of_range_{kind}: {index} not in 0..{len}")]
    IndexOutOfRange { kind: ActionKind, index: i64, len: usize },

    #[error("must_switch")]
    MustSwitch,
}

/// A rejected reply together with whatever JSON object was recovered from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub failure: ParseFailure,
    pub parsed: Option<Value>,
}

/// Successful decode; `parsed` is the raw object kept for the trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted {
    pub action: Action,
    pub parsed: Value,
}

/// First JSON object in `text`: the whole text if it is one, otherwise the first balanced
/// `{...}` span that decodes to an object.
pub fn extract_json(text: &str) -> Result<Map<String, Value>, ParseFailure> {
    let text = text.trim();
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(text) {
        return Ok(obj);
    }

    let bytes = text.as_bytes();
    for (start, _) in text.match_indices('{') {
        let Some(end) = matching_brace(bytes, start) else {
            continue;
        };
        if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(&text[start..=end]) {
            return Ok(obj);
        }
    }
    Err(ParseFailure::NoJsonObject)
}

/// Byte offset of the `}` closing the `{` at `start`, skipping braces inside string literals.
fn matching_brace(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Checks a decoded object against the options offered this turn.
pub fn validate(obj: &Map<String, Value>, state: &TurnState) -> Result<Action, ParseFailure> {
    let kind = match obj.get("action") {
        Some(Value::String(s)) => {
            ActionKind::from_wire(s).ok_or_else(|| ParseFailure::BadAction(s.clone()))?
        }
        Some(other) => return Err(ParseFailure::BadAction(other.to_string())),
        None => return Err(ParseFailure::BadAction("missing".to_string())),
    };
    let index = match obj.get("index") {
        None | Some(Value::Null) => return Err(ParseFailure::MissingIndex),
        Some(Value::Number(n)) => n.as_i64().ok_or(ParseFailure::IndexNotInteger)?,
        Some(_) => return Err(ParseFailure::IndexNotInteger),
    };
    if state.force_switch && kind == ActionKind::Move {
        return Err(ParseFailure::MustSwitch);
    }
    let len = state.option_count(kind);
    if index < 0 || index as u64 >= len as u64 {
        return Err(ParseFailure::IndexOutOfRange { kind, index, len });
    }

    let mut action = Action::new(kind, index as usize);
    if let Some(Value::String(reason)) = obj.get("reason") {
        action.reason = Some(reason.clone());
    }
    Ok(action)
}

pub fn parse_response(raw: &str, state: &TurnState) -> Result<Accepted, Rejected> {
    let obj = extract_json(raw).map_err(|failure| Rejected { failure, parsed: None })?;
    match validate(&obj, state) {
        Ok(action) => Ok(Accepted {
            action,
            parsed: Value::Object(obj),
        }),
        Err(failure) => Err(Rejected {
            failure,
            parsed: Some(Value::Object(obj)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_code_fence() {
        let raw = "Sure!\n```json\n{\"action\": \"move\", \"index\": 2}\n```";
        let obj = extract_json(raw).unwrap();
        assert_eq!(obj["index"], 2);
    }

    #[test]
    fn skips_braces_inside_strings() {
        let raw = r#"note {"reason": "use } carefully", "action": "switch", "index": 0} tail"#;
        let obj = extract_json(raw).unwrap();
        assert_eq!(obj["action"], "switch");
    }

    #[test]
    fn skips_spans_that_are_not_json() {
        let raw = "{not json} then {\"action\":\"move\",\"index\":1}";
        let obj = extract_json(raw).unwrap();
        assert_eq!(obj["index"], 1);
    }

    #[test]
    fn array_is_not_an_object() {
        assert_eq!(extract_json("[1, 2]"), Err(ParseFailure::NoJsonObject));
        assert_eq!(extract_json("MOVE 1"), Err(ParseFailure::NoJsonObject));
        assert_eq!(extract_json("{\"action\": \"move\""), Err(ParseFailure::NoJsonObject));
    }
}
