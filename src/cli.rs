//! Command line for the `blockfall` binary.
//!
//! ```text
//! blockfall                                   # play in the terminal
//! blockfall replay --script "left,rotate,hard" [--frame-ms 16] [--every 1]
//! ```

use clap::{Parser, Subcommand};

use crate::replay::ReplayConfig;

#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about = "Falling-block puzzle in the terminal")]
pub struct Cli {
    /// Without a subcommand the game runs in the terminal.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a scripted command sequence headless and print JSON lines.
    Replay(ReplayConfig),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{ReplayStep, Script};
    use crate::types::Command;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("blockfall").chain(args.iter().copied()))
    }

    fn replay_config(args: &[&str]) -> ReplayConfig {
        match parse(args).unwrap().command {
            Some(Commands::Replay(config)) => config,
            other => panic!("expected replay, got {other:?}"),
        }
    }

    fn parse_error(args: &[&str]) -> clap::Error {
        parse(args).unwrap_err()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_plays_in_the_terminal() {
        let cli = parse(&[]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn replay_defaults() {
        let config = replay_config(&["replay", "--script", "hard"]);
        assert_eq!(config.script, Script(vec![ReplayStep::Command(Command::HardDrop)]));
        assert_eq!(config.frame_ms, 16);
        assert_eq!(config.every, 1);
    }

    #[test]
    fn replay_parses_all_flags() {
        let config = replay_config(&[
            "replay",
            "--script",
            "left, rotate hard,wait",
            "--frame-ms",
            "20",
            "--every",
            "3",
        ]);
        assert_eq!(
            config.script.steps(),
            &[
                ReplayStep::Command(Command::MoveLeft),
                ReplayStep::Command(Command::Rotate),
                ReplayStep::Command(Command::HardDrop),
                ReplayStep::Wait,
            ]
        );
        assert_eq!(config.frame_ms, 20);
        assert_eq!(config.every, 3);
    }

    #[test]
    fn bad_replay_arguments_are_rejected() {
        let cases: [(&[&str], ErrorKind); 5] = [
            (&["replay"], ErrorKind::MissingRequiredArgument),
            (&["replay", "--script", "left", "--every", "0"], ErrorKind::ValueValidation),
            (&["replay", "--script", "left", "--frame-ms", "0"], ErrorKind::ValueValidation),
            (&["replay", "--script", "left", "--frame-ms", "x"], ErrorKind::ValueValidation),
            (&["replay", "--script", "left", "--speed", "2"], ErrorKind::UnknownArgument),
        ];
        for (args, kind) in cases {
            assert_eq!(parse_error(args).kind(), kind, "{args:?}");
        }

        // Missing values and unknown modes are errors too.
        assert!(parse(&["replay", "--script"]).is_err());
        assert!(parse(&["play"]).is_err());
    }

    #[test]
    fn bad_scripts_report_the_offending_token() {
        let err = parse_error(&["replay", "--script", "left,hold"]);
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("unknown command: hold"), "{err}");

        let err = parse_error(&["replay", "--script", " , "]);
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("script is empty"), "{err}");
    }
}
