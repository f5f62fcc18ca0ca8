mod common;

use common::{forced_state, sample_state};
use poke_llm_agent::action::ActionKind;
use poke_llm_agent::parse::{parse_response, ParseFailure};

fn failure(raw: &str) -> ParseFailure {
    parse_response(raw, &sample_state()).unwrap_err().failure
}

#[test]
fn accepts_a_plain_object() {
    let accepted = parse_response(
        r#"{"action":"move","index":1,"reason":"STAB flamethrower is super effective"}"#,
        &sample_state(),
    )
    .unwrap();
    assert_eq!(accepted.action.kind, ActionKind::Move);
    assert_eq!(accepted.action.index, 1);
    assert_eq!(
        accepted.action.reason.as_deref(),
        Some("STAB flamethrower is super effective")
    );
    assert_eq!(accepted.parsed["index"], 1);
}

#[test]
fn accepts_an_object_wrapped_in_prose() {
    let raw = "I'd go with a switch here: {\"action\": \"switch\", \"index\": 1} since it resists.";
    let accepted = parse_response(raw, &sample_state()).unwrap();
    assert_eq!(accepted.action.kind, ActionKind::Switch);
    assert_eq!(accepted.action.index, 1);
    assert!(accepted.action.reason.is_none());
}

#[test]
fn text_without_json_is_rejected() {
    assert_eq!(failure("MOVE 1"), ParseFailure::NoJsonObject);
    assert_eq!(failure(""), ParseFailure::NoJsonObject);
    let rejected = parse_response("no idea", &sample_state()).unwrap_err();
    assert!(rejected.parsed.is_none());
}

#[test]
fn unknown_action_kinds_are_rejected() {
    assert_eq!(
        failure(r#"{"action":"attack","index":0}"#),
        ParseFailure::BadAction("attack".to_string())
    );
    // Case matters: only the exact wire spelling is accepted.
    assert_eq!(
        failure(r#"{"action":"MOVE","index":0}"#),
        ParseFailure::BadAction("MOVE".to_string())
    );
    assert!(matches!(failure(r#"{"index":0}"#), ParseFailure::BadAction(_)));
    assert!(matches!(failure(r#"{"action":1,"index":0}"#), ParseFailure::BadAction(_)));
}

#[test]
fn index_must_be_present_and_integral() {
    assert_eq!(failure(r#"{"action":"move"}"#), ParseFailure::MissingIndex);
    assert_eq!(failure(r#"{"action":"move","index":null}"#), ParseFailure::MissingIndex);
    assert_eq!(failure(r#"{"action":"move","index":"0"}"#), ParseFailure::IndexNotInteger);
    assert_eq!(failure(r#"{"action":"move","index":1.5}"#), ParseFailure::IndexNotInteger);
}

#[test]
fn out_of_range_indices_are_rejected() {
    assert_eq!(
        failure(r#"{"action":"move","index":4}"#),
        ParseFailure::IndexOutOfRange {
            kind: ActionKind::Move,
            index: 4,
            len: 4
        }
    );
    assert_eq!(
        failure(r#"{"action":"switch","index":-1}"#),
        ParseFailure::IndexOutOfRange {
            kind: ActionKind::Switch,
            index: -1,
            len: 2
        }
    );
    let rejected = parse_response(r#"{"action":"switch","index":7}"#, &sample_state()).unwrap_err();
    assert_eq!(rejected.parsed.unwrap()["index"], 7);
}

#[test]
fn forced_switch_rejects_moves() {
    let state = forced_state();
    let rejected = parse_response(r#"{"action":"move","index":0}"#, &state).unwrap_err();
    assert_eq!(rejected.failure, ParseFailure::MustSwitch);
    let accepted = parse_response(r#"{"action":"switch","index":0}"#, &state).unwrap();
    assert_eq!(accepted.action.kind, ActionKind::Switch);
}

#[test]
fn failure_codes_are_stable() {
    assert_eq!(ParseFailure::NoJsonObject.to_string(), "no_json_object_found");
    assert_eq!(ParseFailure::BadAction("x".into()).to_string(), "bad_action:x");
    assert_eq!(ParseFailure::MustSwitch.to_string(), "must_switch");
}
