use poke_llm_agent::agent::AgentSettings;
use poke_llm_agent::arena::{run_arena, run_battle, AgentSetup, ArenaOptions, Opponent};
use poke_llm_agent::battle::{Battle, BattleResult};
use poke_llm_agent::model::Pokemon;
use poke_llm_agent::player::RandomPlayer;
use poke_llm_agent::teams::load_teams;
use poke_llm_agent::trace::{read_records, TraceLogger};
use std::sync::Arc;

fn offline_agent(trace: TraceLogger) -> AgentSetup {
    AgentSetup {
        client: None,
        trace: Arc::new(trace),
        settings: AgentSettings::default(),
    }
}

#[test]
fn runs_every_battle_and_writes_replays() {
    let dir = tempfile::tempdir().unwrap();
    let trace_path = dir.path().join("trace.jsonl");
    let agent = offline_agent(TraceLogger::to_file(&trace_path));
    let opts = ArenaOptions {
        battles: 4,
        team_size: 2,
        seed: 42,
        concurrency: 2,
        replay_dir: Some(dir.path().join("replays")),
        ..ArenaOptions::default()
    };

    let report = run_arena(&opts, &agent).unwrap();
    assert_eq!(report.wins + report.losses + report.ties, 4);
    assert_eq!(report.battles.len(), 4);
    assert_eq!(report.decisions.error, report.decisions.total());

    let tags: Vec<&str> = report.battles.iter().map(|b| b.tag.as_str()).collect();
    assert_eq!(
        tags,
        vec![
            "battle-gen9randombattle-1",
            "battle-gen9randombattle-2",
            "battle-gen9randombattle-3",
            "battle-gen9randombattle-4"
        ]
    );
    for outcome in &report.battles {
        let replay = std::fs::read_to_string(outcome.replay.as_ref().unwrap()).unwrap();
        assert!(replay.starts_with(&format!("|init|battle|{}", outcome.tag)));
        assert!(replay.contains("|player|p1|LLM"));
    }
    assert_eq!(
        report.first_replay(),
        report.battles[0].replay.as_ref()
    );

    let records = read_records(&trace_path).unwrap();
    assert_eq!(records.len() as u32, report.decisions.total());
}

#[test]
fn same_seed_gives_the_same_results() {
    let opts = ArenaOptions {
        battles: 3,
        team_size: 3,
        seed: 7,
        opponent: Opponent::MaxDamage,
        ..ArenaOptions::default()
    };
    let run = || {
        let report = run_arena(&opts, &offline_agent(TraceLogger::disabled())).unwrap();
        report
            .battles
            .iter()
            .map(|b| (b.result, b.turns))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn zero_battles_is_an_error() {
    let opts = ArenaOptions {
        battles: 0,
        ..ArenaOptions::default()
    };
    assert!(run_arena(&opts, &offline_agent(TraceLogger::disabled())).is_err());
}

#[test]
fn teams_file_is_loaded_and_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("teams.json");
    let mon = r#"{"name":"Garchomp","types":["dragon","ground"],
        "stats":{"hp":183,"atk":150,"def":115,"spa":100,"spd":105,"spe":122},
        "moves":[{"name":"Earthquake","type":"ground","category":"physical","power":100}]}"#;
    std::fs::write(&path, format!(r#"{{"teamA":[{mon}],"teamB":[{mon},{mon}]}}"#)).unwrap();

    let teams = load_teams(&path).unwrap();
    assert_eq!(teams.team_a.len(), 1);
    assert_eq!(teams.team_b.len(), 2);
    assert_eq!(teams.team_a[0].moves[0].accuracy, 100.0);

    std::fs::write(&path, r#"{"teamA":[],"teamB":[]}"#).unwrap();
    assert!(load_teams(&path).is_err());
}

fn garchomp(hp: u32) -> String {
    format!(
        r#"{{"name":"Garchomp","types":["dragon","ground"],
        "stats":{{"hp":{hp},"atk":150,"def":115,"spa":100,"spd":105,"spe":122}},
        "moves":[{{"name":"Earthquake","type":"ground","category":"physical","power":100}}]}}"#
    )
}

#[test]
fn teams_file_with_a_fainted_member_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("teams.json");
    std::fs::write(
        &path,
        format!(r#"{{"teamA":[{}],"teamB":[{}]}}"#, garchomp(0), garchomp(183)),
    )
    .unwrap();
    let err = load_teams(&path).unwrap_err();
    assert!(err.to_string().contains("0 hp"));
}

#[test]
fn battle_with_no_healthy_creature_ends_before_turn_one() {
    let fainted: Pokemon = serde_json::from_str(&garchomp(0)).unwrap();
    let healthy: Pokemon = serde_json::from_str(&garchomp(183)).unwrap();
    let mut battle = Battle::new("battle-custom-1", "custom", &[fainted], &[healthy], 1).unwrap();
    assert_eq!(battle.result(), Some(BattleResult::BWins));

    let mut a = RandomPlayer::new("A", 1);
    let mut b = RandomPlayer::new("B", 2);
    let result = run_battle(&mut battle, &mut a, &mut b, None).unwrap();
    assert_eq!(result, BattleResult::BWins);
    assert_eq!(battle.turn(), 0);
}

struct BrokenPipe;

impl std::io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn failing_spectator_does_not_stop_the_battle() {
    let mon: Pokemon = serde_json::from_str(&garchomp(183)).unwrap();
    let mut battle = Battle::new("battle-custom-2", "custom", &[mon.clone()], &[mon], 4).unwrap();
    let mut a = RandomPlayer::new("A", 3);
    let mut b = RandomPlayer::new("B", 4);
    let mut out = BrokenPipe;

    let result = run_battle(&mut battle, &mut a, &mut b, Some(&mut out)).unwrap();
    assert_eq!(battle.result(), Some(result));
    assert!(battle.turn() > 0);
}
