//! Replay driver tests - argument parsing and JSON-lines output

use blockfall::cli::{Cli, Commands};
use blockfall::replay::{run_replay, ReplaySummary};
use clap::error::ErrorKind;
use clap::Parser;
use serde_json::Value;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("blockfall").chain(args.iter().copied()))
}

fn replay(args: &[&str]) -> (Vec<Value>, ReplaySummary) {
    let config = match parse(args).unwrap().command {
        Some(Commands::Replay(config)) => config,
        other => panic!("expected replay, got {:?}", other),
    };
    let mut out = Vec::new();
    let summary = run_replay(&config, &mut out).unwrap();
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (lines, summary)
}

#[test]
fn test_one_line_per_frame_with_expected_fields() {
    let (lines, summary) = replay(&["replay", "--script", "wait,left,wait"]);
    assert_eq!(lines.len(), 3);
    assert_eq!(summary.frames, 3);

    for (i, obs) in lines.iter().enumerate() {
        assert_eq!(obs["frame"], i as u64 + 1);
        for key in ["score", "lines", "level", "game_over", "board", "active"] {
            assert!(obs.get(key).is_some(), "missing {}", key);
        }
        let board = obs["board"].as_array().unwrap();
        assert_eq!(board.len(), 22);
        assert!(board.iter().all(|row| row.as_str().unwrap().len() == 10));
    }

    // Frame 1 ticks the first gravity step; frame 2 moves left.
    assert_eq!(lines[0]["active"]["row"], 19);
    assert_eq!(lines[0]["active"]["col"], 5);
    assert_eq!(lines[1]["active"]["col"], 4);
    assert_eq!(lines[1]["active"]["kind"], "L");
    assert_eq!(lines[1]["active"]["rotation"], "north");
    assert_eq!(lines[1]["active"]["cells"][3], serde_json::json!([4, 19]));
}

#[test]
fn test_hard_drops_lock_and_score() {
    let (lines, summary) = replay(&["replay", "--script", "hard hard hard", "--every", "10"]);

    // Only the final frame is emitted.
    assert_eq!(lines.len(), 1);
    let last = &lines[0];
    assert_eq!(last["frame"], 3);
    assert_eq!(last["score"], 3);
    assert_eq!(last["game_over"], false);
    assert_eq!(last["active"]["kind"], "Z");
    assert_eq!(summary.score, 3);
    assert_eq!(summary.emitted, 1);

    let board = last["board"].as_array().unwrap();
    assert_eq!(board[21], "....L.....");
    assert_eq!(board[0], "..........");
}

#[test]
fn test_stacking_until_game_over() {
    let script = vec!["hard"; 40].join(",");
    let (lines, summary) = replay(&["replay", "--script", script.as_str(), "--every", "5"]);

    assert!(summary.game_over);
    let last = lines.last().unwrap();
    assert_eq!(last["frame"], 40);
    assert_eq!(last["game_over"], true);
    assert!(last["active"].is_null());
}

#[test]
fn test_frame_ms_changes_gravity_speed() {
    let script = vec!["wait"; 4].join(",");

    // At 16 ms per frame only the first tick drops.
    let (slow, _) = replay(&["replay", "--script", script.as_str()]);
    assert_eq!(slow.last().unwrap()["active"]["row"], 19);

    // At 600 ms per frame the second drop lands on the third frame.
    let (fast, _) = replay(&["replay", "--script", script.as_str(), "--frame-ms", "600"]);
    let rows: Vec<i64> = fast
        .iter()
        .map(|obs| obs["active"]["row"].as_i64().unwrap())
        .collect();
    assert_eq!(rows, vec![19, 19, 18, 18]);
}

#[test]
fn test_bad_arguments_are_errors() {
    let err = parse(&["replay", "--frame-ms", "16"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    assert!(err.to_string().contains("--script"), "{}", err);

    let err = parse(&["replay", "--script", "hard", "--every", "0"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);

    assert!(parse(&["replay", "--script", "hard,jump"]).is_err());
    assert!(parse(&["tournament"]).is_err());
}
