//! Game state module - the controller that drives board and pieces
//!
//! `GameState` owns the board, the active piece, the next-piece preview, the
//! hold slot and the score/level/lines counters. It is the only mutator of
//! the board and is driven by two inputs: elapsed time (`tick`) and discrete
//! player actions (`apply_action`).
//!
//! # Phases
//!
//! ```text
//! Spawning -> Falling -> Locking -> RowClearing -> Spawning
//!               ^  |
//!               |  v
//!              Paused          Spawning -> GameOver (spawn position blocked)
//! ```
//!
//! Locking, RowClearing and Spawning are transient: they run back to back in
//! the same call that caused the lock, so callers only ever observe Falling,
//! Paused or GameOver between calls.
//!
//! Every piece transform is built on a copy, validated against the board and
//! only then committed. A rejected transform leaves the active piece as it was.

use std::time::Duration;

use tracing::{debug, info};

use crate::board::Board;
use crate::rng::SimpleRng;
use crate::scoring::{line_clear_points, should_level_up, Speed};
use crate::snapshot::{GameSnapshot, PieceView};
use crate::tetromino::Tetromino;
use crate::types::{
    Difficulty, DifficultySettings, GameAction, PieceKind, SPAWN_POSITION,
};

/// Translations tried, in order, after a rotation. The first that fits wins.
///
/// Simple kicks: in place, one left, one right, one up.
pub const KICK_OFFSETS: [(i8, i8); 4] = [(0, 0), (-1, 0), (1, 0), (0, -1)];

/// Parameters a game is started with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Level the game starts on (1 or more).
    pub starting_level: u32,
    /// Gravity interval at level 1, in seconds.
    pub initial_drop_secs: f64,
    pub difficulty: Difficulty,
    pub seed: u32,
}

impl GameConfig {
    /// Config using the difficulty's own initial speed.
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            starting_level: 1,
            initial_drop_secs: difficulty.settings().initial_drop_secs,
            difficulty,
            seed: 1,
        }
    }

    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn starting_level(mut self, level: u32) -> Self {
        self.starting_level = level.max(1);
        self
    }

    pub fn initial_drop_secs(mut self, secs: f64) -> Self {
        self.initial_drop_secs = secs;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::with_difficulty(Difficulty::Normal)
    }
}

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    RowClearing,
    Paused,
    GameOver,
}

/// Emitted each time a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    pub level_up: bool,
}

/// Final record handed to persistence when a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub duration: Duration,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    settings: DifficultySettings,
    board: Board,
    rng: SimpleRng,
    phase: Phase,
    active: Option<Tetromino>,
    next: Tetromino,
    held: Option<PieceKind>,
    can_hold: bool,
    score: u32,
    level: u32,
    lines: u32,
    speed: Speed,
    drop_timer: Duration,
    elapsed: Duration,
    /// Monotonic game id (increments on restart).
    episode_id: u32,
    /// Last lock/line-clear event (consumed by observers).
    last_event: Option<LockEvent>,
    quit_requested: bool,
}

impl GameState {
    /// Create a game and spawn its first piece.
    pub fn new(config: GameConfig) -> Self {
        let settings = config.difficulty.settings();
        let starting_level = config.starting_level.max(1);
        let mut rng = SimpleRng::new(config.seed);
        let (x, y) = SPAWN_POSITION;
        let next = Tetromino::random(&mut rng, x, y);

        let mut state = Self {
            config,
            settings,
            board: Board::new(),
            rng,
            phase: Phase::Spawning,
            active: None,
            next,
            held: None,
            can_hold: true,
            score: 0,
            level: starting_level,
            lines: 0,
            speed: Speed::new(config.initial_drop_secs, starting_level, &settings),
            drop_timer: Duration::ZERO,
            elapsed: Duration::ZERO,
            episode_id: 0,
            last_event: None,
            quit_requested: false,
        };
        info!(
            difficulty = config.difficulty.as_str(),
            level = starting_level,
            seed = config.seed,
            drop_secs = state.speed.interval_secs(),
            "game started"
        );
        state.run_transitions();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[doc(hidden)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Landing position of the active piece.
    pub fn ghost(&self) -> Option<Tetromino> {
        self.active.map(|piece| piece.ghost(&self.board))
    }

    /// Kind shown in the next-piece preview.
    pub fn next(&self) -> PieceKind {
        self.next.kind
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Time spent falling (pauses and game over excluded).
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Current gravity interval.
    pub fn drop_interval(&self) -> Duration {
        self.speed.interval()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.score,
            level: self.level,
            lines: self.lines,
            duration: self.elapsed,
        }
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (y, row) in self.board.rows().enumerate() {
            out.board[y].copy_from_slice(row);
        }
        out.active = self.active.map(PieceView::from);
        out.ghost = self.ghost().map(PieceView::from);
        out.next = self.next.kind;
        out.held = self.held;
        out.can_hold = self.can_hold;
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.elapsed = self.elapsed;
    }

    /// Advance time. Gravity moves the active piece one row per drop interval.
    ///
    /// A long `elapsed` runs one gravity step for every whole interval it
    /// covers; the remainder carries into the next call. A lock ends the
    /// catch-up since the next piece starts with a fresh timer.
    ///
    /// Returns true if gravity acted (the piece moved or locked).
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }

        self.elapsed += elapsed;
        self.drop_timer += elapsed;

        let mut acted = false;
        while self.phase == Phase::Falling && self.drop_timer >= self.speed.interval() {
            self.drop_timer -= self.speed.interval();
            self.speed.after_drop();
            acted = true;
            if !self.step_down() {
                break;
            }
        }
        acted
    }

    /// Apply a game action.
    ///
    /// Piece actions are only accepted while falling. Returns whether the
    /// action was accepted; a rejected action changes nothing.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
            GameAction::Quit => {
                self.quit_requested = true;
                true
            }
            _ if self.phase != Phase::Falling => false,
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::MoveDown => self.step_down(),
            GameAction::RotateCw => self.try_rotate(true),
            GameAction::RotateCcw => self.try_rotate(false),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Hold => self.hold(),
        }
    }

    fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Falling => {
                self.phase = Phase::Paused;
                true
            }
            Phase::Paused => {
                self.phase = Phase::Falling;
                true
            }
            _ => false,
        }
    }

    /// Commit `candidate` as the active piece if the board accepts it.
    fn commit_if_valid(&mut self, candidate: Tetromino) -> bool {
        if self.board.is_valid_position(&candidate) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        match self.active {
            Some(active) => self.commit_if_valid(active.moved(dx, dy)),
            None => false,
        }
    }

    /// Rotate, then try each kick offset in turn.
    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let rotated = if clockwise {
            active.rotated_cw()
        } else {
            active.rotated_ccw()
        };

        KICK_OFFSETS
            .iter()
            .any(|&(dx, dy)| self.commit_if_valid(rotated.moved(dx, dy)))
    }

    /// Move down one row, or lock the piece when it cannot.
    ///
    /// Returns true if the piece moved.
    fn step_down(&mut self) -> bool {
        if self.try_move(0, 1) {
            return true;
        }
        if self.active.is_some() {
            self.phase = Phase::Locking;
            self.run_transitions();
        }
        false
    }

    fn hard_drop(&mut self) -> bool {
        let Some(ghost) = self.ghost() else {
            return false;
        };
        self.active = Some(ghost);
        self.phase = Phase::Locking;
        self.run_transitions();
        true
    }

    /// Swap the active piece with the hold slot, once per spawned piece.
    fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.active.take() else {
            return false;
        };

        match self.held.replace(active.kind) {
            Some(kind) => {
                if !self.enter_play(Tetromino::spawn(kind)) {
                    return true;
                }
            }
            None => self.spawn_piece(),
        }
        self.can_hold = false;
        true
    }

    /// Drive transient phases until the game is falling, paused or over.
    fn run_transitions(&mut self) {
        loop {
            match self.phase {
                Phase::Locking => self.lock_active(),
                Phase::RowClearing => self.clear_rows(),
                Phase::Spawning => self.spawn_piece(),
                Phase::Falling | Phase::Paused | Phase::GameOver => break,
            }
        }
    }

    fn lock_active(&mut self) {
        if let Some(piece) = self.active.take() {
            let merged = self.board.merge(&piece);
            debug_assert!(merged, "locked piece must be in a valid position: {:?}", piece);
            debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, "piece locked");
        }
        self.phase = Phase::RowClearing;
    }

    fn clear_rows(&mut self) {
        let cleared = self.board.clear_lines();
        let points = line_clear_points(cleared, self.level);
        let mut level_up = false;

        if cleared > 0 {
            self.lines += cleared as u32;
            self.score = self.score.saturating_add(points);
            if should_level_up(self.lines, self.level, self.settings.lines_per_level) {
                self.level += 1;
                self.speed.after_level_up();
                level_up = true;
                debug!(
                    level = self.level,
                    drop_secs = self.speed.interval_secs(),
                    "level up"
                );
            }
            debug!(cleared, points, score = self.score, "rows cleared");
        }

        self.last_event = Some(LockEvent {
            lines_cleared: cleared as u32,
            points,
            level_up,
        });
        self.phase = Phase::Spawning;
    }

    /// Promote the preview piece and draw a new preview.
    fn spawn_piece(&mut self) {
        let (x, y) = SPAWN_POSITION;
        let fresh = Tetromino::random(&mut self.rng, x, y);
        let piece = std::mem::replace(&mut self.next, fresh);
        self.can_hold = true;
        self.enter_play(piece);
    }

    /// Make `piece` active, or end the game if its position is blocked.
    fn enter_play(&mut self, piece: Tetromino) -> bool {
        self.drop_timer = Duration::ZERO;
        if self.board.is_valid_position(&piece) {
            self.active = Some(piece);
            self.phase = Phase::Falling;
            true
        } else {
            self.active = None;
            self.phase = Phase::GameOver;
            info!(
                score = self.score,
                level = self.level,
                lines = self.lines,
                secs = self.elapsed.as_secs(),
                "game over"
            );
            false
        }
    }

    /// Start over with the same settings and a fresh seed.
    fn restart(&mut self) {
        let next_episode = self.episode_id.wrapping_add(1);
        let config = self.config.seed(self.rng.next_u32());
        *self = Self::new(config);
        self.episode_id = next_episode;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
