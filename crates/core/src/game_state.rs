//! Game state module - manages the complete game state
//!
//! Ties together the board, the piece table and scoring. Handles gravity
//! timing, movement, rotation kicks, locking, line clears and the game-over
//! sentinel (no active piece).
//!
//! Every change to the active piece's position or rotation goes through
//! [`GameState::try_move`]. Spawning is a null move at the spawn pivot, so a
//! blocked spawn is detected by the same collision check.

use tracing::{debug, info};

use crate::board::Board;
use crate::pieces::{piece_cells, rotation_count, rotation_kicks, PieceCells};
use crate::scoring::{drop_period_ns, level_for_lines, lock_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, LockEvent, PieceKind, Rotation, SPAWN_COL, SPAWN_ROW};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Pivot column
    pub col: i8,
    /// Pivot row (row 0 is the bottom)
    pub row: i8,
}

impl Piece {
    /// A piece of `kind` at the spawn pivot, rotation `North`.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            col: SPAWN_COL,
            row: SPAWN_ROW,
        }
    }

    /// Board cells covered by this piece, pivot last.
    pub fn cells(&self) -> PieceCells {
        piece_cells(self.kind, self.col, self.row, self.rotation)
    }

    /// All cells inside the board and empty.
    pub fn fits(&self, board: &Board) -> bool {
        self.cells().iter().all(|&(x, y)| board.is_valid(x, y))
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    /// `None` before the first restart and after game over.
    active: Option<Piece>,
    score: u32,
    lines: u32,
    /// Time left until the next forced one-row drop.
    drop_timer_ns: u64,
    /// Clock reading of the previous `tick`, `None` until the first one.
    prev_tick_ns: Option<u64>,
    /// Monotonic restart counter.
    games_played: u32,
    /// Locks in the current game.
    pieces_locked: u32,
    /// Last lock event (consumed by drivers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create an engine in the game-over state.
    ///
    /// Drivers detect [`GameState::is_game_over`] and call
    /// [`GameState::restart`] to begin play.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active: None,
            score: 0,
            lines: 0,
            drop_timer_ns: 0,
            prev_tick_ns: None,
            games_played: 0,
            pieces_locked: 0,
            last_event: None,
        }
    }

    /// Start a game on a prepared board with `kind` as the first piece.
    ///
    /// Used for puzzles and fixtures. If the first piece cannot spawn the
    /// engine is returned already in the game-over state.
    pub fn from_parts(board: Board, kind: PieceKind) -> Self {
        let mut state = Self::new();
        state.board = board;
        state.games_played = 1;
        state.spawn(kind);
        state
    }

    /// Set the lines-cleared total, which selects the starting level.
    pub fn with_lines(mut self, lines: u32) -> Self {
        self.lines = lines;
        self
    }

    /// Clear board, score, lines and timers, then spawn the first piece.
    pub fn restart(&mut self) {
        let games_played = self.games_played.wrapping_add(1);
        *self = Self::new();
        self.games_played = games_played;
        self.spawn(PieceKind::L);
        info!(game = games_played, "game started");
    }

    pub fn is_game_over(&self) -> bool {
        self.active.is_none()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        level_for_lines(self.lines)
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn drop_timer_ns(&self) -> u64 {
        self.drop_timer_ns
    }

    /// Gravity period at the current line count.
    pub fn drop_period_ns(&self) -> u64 {
        drop_period_ns(self.lines)
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_color_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level();
        out.game_over = self.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Place a new piece at the spawn pivot.
    ///
    /// Returns false, leaving no active piece, if the spawn cells are blocked.
    fn spawn(&mut self, kind: PieceKind) -> bool {
        self.active = Some(Piece::spawn(kind));
        if self.try_move(0, 0, 0) {
            return true;
        }
        self.active = None;
        false
    }

    /// Try to shift the active piece by `(dx, dy)` and turn it `drotation`
    /// quarter turns.
    ///
    /// Succeeds iff every resulting cell is inside the board and empty. On
    /// failure nothing changes. Always fails when there is no active piece.
    pub fn try_move(&mut self, dx: i8, dy: i8, drotation: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let candidate = Piece {
            col: active.col + dx,
            row: active.row + dy,
            rotation: active.rotation.rotate_by(drotation, rotation_count(active.kind)),
            ..active
        };

        if !candidate.fits(&self.board) {
            return false;
        }

        self.active = Some(candidate);
        true
    }

    /// Rotate one quarter turn, trying each kick in order.
    fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let kicks = rotation_kicks(active.kind, active.col);
        kicks.iter().any(|&(dx, dy)| self.try_move(dx, dy, 1))
    }

    /// Glue the active piece into the board, spawn the next kind and clear lines.
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active else {
            return;
        };

        let written = self.board.lock_cells(&active.cells(), active.kind);
        debug_assert!(written, "active piece overlapped the board");

        self.active = Some(Piece::spawn(active.kind.next()));
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let cleared = self.board.clear_full_rows().len() as u32;
        let awarded = lock_score(self.lines, cleared);
        self.score = self.score.saturating_add(awarded);
        self.lines = self.lines.saturating_add(cleared);

        // Null move at the spawn pivot.
        let game_over = !self.try_move(0, 0, 0);
        if game_over {
            self.active = None;
        }

        debug!(
            kind = ?active.kind,
            cleared,
            awarded,
            score = self.score,
            lines = self.lines,
            "piece locked"
        );
        if game_over {
            info!(
                score = self.score,
                lines = self.lines,
                pieces = self.pieces_locked,
                "game over"
            );
        }

        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared: cleared,
            score_awarded: awarded,
            game_over,
        });
    }

    fn add_drop_period(&mut self) {
        self.drop_timer_ns = self.drop_timer_ns.saturating_add(self.drop_period_ns());
    }

    /// Advance gravity by `dt_ns`.
    ///
    /// While the countdown exceeds `dt_ns` it just counts down. Otherwise the
    /// piece steps one row down (locking if it cannot) and one gravity period
    /// is added to the countdown. At most one step per call.
    ///
    /// Returns true if a gravity step ran.
    pub fn advance(&mut self, dt_ns: u64) -> bool {
        if self.active.is_none() {
            return false;
        }

        if self.drop_timer_ns > dt_ns {
            self.drop_timer_ns -= dt_ns;
            return false;
        }

        if !self.try_move(0, -1, 0) {
            self.lock_piece();
        }
        self.add_drop_period();
        true
    }

    /// Advance gravity to the monotonic clock reading `now_ns`.
    ///
    /// The first reading after a restart counts as zero elapsed time.
    pub fn tick(&mut self, now_ns: u64) -> bool {
        let dt = self
            .prev_tick_ns
            .map_or(0, |prev| now_ns.saturating_sub(prev));
        self.prev_tick_ns = Some(now_ns);
        self.advance(dt)
    }

    /// Apply a player command.
    ///
    /// Returns true if the command took effect: a move or rotation found a
    /// legal placement, or a drop ran. Commands are ignored after game over.
    pub fn apply_input(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.try_move(-1, 0, 0),
            Command::MoveRight => self.try_move(1, 0, 0),
            Command::Rotate => self.rotate(),
            Command::SoftDrop => {
                if self.active.is_none() {
                    return false;
                }
                if !self.try_move(0, -1, 0) {
                    self.lock_piece();
                }
                self.add_drop_period();
                true
            }
            Command::HardDrop => {
                if self.active.is_none() {
                    return false;
                }
                while self.try_move(0, -1, 0) {}
                self.lock_piece();
                self.add_drop_period();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
