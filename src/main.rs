//! blockfall runner (default binary).
//!
//! `blockfall` plays in the terminal (crossterm input, framebuffer renderer).
//! `blockfall replay --script ...` runs a headless replay and prints JSON lines.

use std::io::{self, BufWriter};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{debug, info};

use blockfall::cli::{Cli, Commands};
use blockfall::config::DriverConfig;
use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::DriverKey;
use blockfall::logging;
use blockfall::replay::run_replay;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DriverConfig::from_env();

    if let Some(Commands::Replay(replay)) = cli.command {
        logging::init_stderr(config.log_level)?;
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        run_replay(&replay, &mut out)?;
        return Ok(());
    }

    logging::init(&config)?;
    info!(
        frame_ms = config.frame_ms,
        auto_restart = config.auto_restart,
        "terminal driver starting"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &DriverConfig) -> Result<()> {
    let mut game = GameState::new();
    game.restart();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = config.frame_duration();
    let start = Instant::now();
    let mut deadline = start + frame;

    loop {
        // Input until the frame deadline; each key press is applied at once.
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => match DriverKey::from_event(key) {
                    Some(DriverKey::Quit) => return Ok(()),
                    Some(DriverKey::Restart) => game.restart(),
                    Some(DriverKey::Command(command)) => {
                        let applied = game.apply_input(command);
                        debug!(command = command.as_str(), applied, "input");
                    }
                    None => {}
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        deadline = (deadline + frame).max(now);

        let now_ns = u64::try_from(now.duration_since(start).as_nanos()).unwrap_or(u64::MAX);
        game.tick(now_ns);

        if let Some(event) = game.take_last_event() {
            debug!(
                kind = ?event.kind,
                cleared = event.lines_cleared,
                awarded = event.score_awarded,
                "lock"
            );
        }
        if game.is_game_over() && config.auto_restart {
            game.restart();
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}
