//! Headless replay driver.
//!
//! Plays a scripted command sequence against the engine on a synthetic clock
//! and writes one JSON observation per emitted frame:
//!
//! ```text
//! blockfall replay --script "left,left,rotate,hard,wait" --frame-ms 16 --every 1
//! ```

use std::io::Write;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use clap::Args;
use serde::Serialize;
use tracing::{debug, info};

use crate::core::{GameSnapshot, GameState};
use crate::types::{Command, PieceKind, BOARD_HEIGHT, DEFAULT_FRAME_MS};

/// One frame of a replay script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStep {
    Command(Command),
    /// Let the frame pass without input.
    Wait,
}

/// A parsed, non-empty replay script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script(pub Vec<ReplayStep>);

impl Script {
    pub fn steps(&self) -> &[ReplayStep] {
        &self.0
    }
}

impl FromStr for Script {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_script(s).map(Script)
    }
}

/// Arguments of `blockfall replay`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ReplayConfig {
    /// Commands separated by commas or spaces: left, right, rotate, soft,
    /// hard (or their long names) and wait.
    #[arg(long, value_parser = parse_script_arg)]
    pub script: Script,

    /// Synthetic clock step per frame, in milliseconds.
    #[arg(
        long,
        default_value_t = DEFAULT_FRAME_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub frame_ms: u64,

    /// Emit an observation every N frames; the final frame always is.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub every: u64,
}

fn parse_script_arg(s: &str) -> std::result::Result<Script, String> {
    s.parse().map_err(|err: anyhow::Error| err.to_string())
}

/// Split a script on commas and whitespace into steps.
pub fn parse_script(s: &str) -> Result<Vec<ReplayStep>> {
    let steps = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            if token.eq_ignore_ascii_case("wait") {
                return Ok(ReplayStep::Wait);
            }
            Command::from_str(token)
                .map(ReplayStep::Command)
                .ok_or_else(|| anyhow!("unknown command: {}", token))
        })
        .collect::<Result<Vec<_>>>()?;

    if steps.is_empty() {
        bail!("script is empty");
    }
    Ok(steps)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveObservation {
    pub kind: char,
    pub col: i8,
    pub row: i8,
    pub rotation: &'static str,
    /// `[col, row]` pairs, pivot last.
    pub cells: [[i8; 2]; 4],
}

/// Serialized per-frame state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub frame: u64,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
    /// Rows top first; `.` empty, otherwise the locked kind's letter.
    pub board: Vec<String>,
    pub active: Option<ActiveObservation>,
}

impl Observation {
    pub fn from_snapshot(frame: u64, snap: &GameSnapshot) -> Self {
        let board = (0..BOARD_HEIGHT as usize)
            .rev()
            .map(|row| {
                snap.board[row]
                    .iter()
                    .map(|&color| PieceKind::from_color(color).map_or('.', PieceKind::letter))
                    .collect::<String>()
            })
            .collect();

        let active = snap.active.map(|a| ActiveObservation {
            kind: a.kind.letter(),
            col: a.col,
            row: a.row,
            rotation: a.rotation.as_str(),
            cells: a.cells.map(|(c, r)| [c, r]),
        });

        Self {
            frame,
            score: snap.score,
            lines: snap.lines,
            level: snap.level,
            game_over: snap.game_over,
            board,
            active,
        }
    }
}

/// Totals reported once a replay finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: u64,
    pub emitted: u64,
    pub score: u32,
    pub lines: u32,
    pub game_over: bool,
}

/// Run a replay, writing JSON lines to `out`.
///
/// Every step is one frame: its command (if any) is applied, then the engine
/// ticks at `frame_index * frame_ms`. A game that ends stays over.
pub fn run_replay(config: &ReplayConfig, out: &mut impl Write) -> Result<ReplaySummary> {
    let mut game = GameState::new();
    game.restart();

    let frame_ns = config.frame_ms.saturating_mul(1_000_000);
    let steps = config.script.steps();
    let total = steps.len() as u64;
    let mut snap = GameSnapshot::default();
    let mut emitted = 0u64;

    for (index, step) in steps.iter().enumerate() {
        let frame = index as u64 + 1;

        if let ReplayStep::Command(command) = *step {
            let applied = game.apply_input(command);
            debug!(frame, command = command.as_str(), applied, "command");
        }
        game.tick(index as u64 * frame_ns);

        if let Some(event) = game.take_last_event() {
            debug!(
                frame,
                kind = ?event.kind,
                cleared = event.lines_cleared,
                awarded = event.score_awarded,
                "lock"
            );
        }

        if frame % config.every == 0 || frame == total {
            game.snapshot_into(&mut snap);
            serde_json::to_writer(&mut *out, &Observation::from_snapshot(frame, &snap))?;
            out.write_all(b"\n")?;
            emitted += 1;
        }
    }
    out.flush()?;

    let summary = ReplaySummary {
        frames: total,
        emitted,
        score: game.score(),
        lines: game.lines(),
        game_over: game.is_game_over(),
    };
    info!(
        frames = summary.frames,
        emitted = summary.emitted,
        score = summary.score,
        lines = summary.lines,
        game_over = summary.game_over,
        "replay finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_accepts_commas_spaces_and_long_names() {
        assert_eq!(
            parse_script("left, MoveRight  rotate,softDrop hard WAIT").unwrap(),
            vec![
                ReplayStep::Command(Command::MoveLeft),
                ReplayStep::Command(Command::MoveRight),
                ReplayStep::Command(Command::Rotate),
                ReplayStep::Command(Command::SoftDrop),
                ReplayStep::Command(Command::HardDrop),
                ReplayStep::Wait,
            ]
        );
    }

    #[test]
    fn script_errors_name_the_problem() {
        let err = parse_script("left,hold").unwrap_err();
        assert_eq!(err.to_string(), "unknown command: hold");
        let err = parse_script(" , ").unwrap_err();
        assert_eq!(err.to_string(), "script is empty");
        assert!("".parse::<Script>().is_err());
    }

    #[test]
    fn board_rows_are_top_first() {
        let mut game = GameState::new();
        game.restart();
        game.apply_input(Command::HardDrop);
        let obs = Observation::from_snapshot(1, &game.snapshot());

        assert_eq!(obs.board.len(), 22);
        assert_eq!(obs.board[20], "....LLL...");
        assert_eq!(obs.board[21], "....L.....");
        assert!(obs.board[..20].iter().all(|row| row == ".........."));

        let active = obs.active.unwrap();
        assert_eq!((active.kind, active.col, active.row), ('J', 5, 20));
        assert_eq!(active.rotation, "north");
        assert_eq!(active.cells[3], [5, 20]);
    }

    #[test]
    fn every_skips_frames_but_keeps_the_last() {
        let config = ReplayConfig {
            script: "wait,wait,wait,wait,wait".parse().unwrap(),
            frame_ms: 16,
            every: 2,
        };
        let mut out = Vec::new();
        let summary = run_replay(&config, &mut out).unwrap();
        assert_eq!(summary.frames, 5);
        assert_eq!(summary.emitted, 3);

        let text = String::from_utf8(out).unwrap();
        let frames: Vec<u64> = text
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["frame"].as_u64().unwrap()
            })
            .collect();
        assert_eq!(frames, vec![2, 4, 5]);
    }
}
