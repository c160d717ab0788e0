//! termtris runner (default binary).
//!
//! Parses the command line, applies the config file, then runs the game on a
//! custom framebuffer renderer driven by crossterm events and a fixed tick.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};

use termtris::core::{GameConfig, GameSnapshot, GameState, GameSummary};
use termtris::input::{handle_key_event, KeyMap};
use termtris::store::{format_duration, format_score, Config, HighScoreEntry, HighScores};
use termtris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use termtris::types::{Difficulty, MAX_DROP_SECS, MAX_STARTING_LEVEL, TICK_MS};

const LOG_FILE: &str = "termtris.log";

#[derive(Parser, Debug)]
#[command(name = "termtris", version, about = "Falling-block puzzle game for the terminal")]
struct Args {
    /// Starting level (1-10)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_STARTING_LEVEL as i64))]
    level: Option<u32>,

    /// Initial drop interval in seconds (up to 10), overriding the difficulty preset
    #[arg(long, value_parser = parse_speed)]
    speed: Option<f64>,

    /// Difficulty: easy | normal | hard | expert
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed for a reproducible piece sequence
    #[arg(long)]
    seed: Option<u32>,

    /// Print the high score table and exit
    #[arg(long)]
    high_scores: bool,

    /// Clear the high score table and exit
    #[arg(long)]
    reset_scores: bool,

    /// Restore the default config and exit
    #[arg(long)]
    reset_config: bool,

    /// Write debug logs to termtris.log
    #[arg(long)]
    debug: bool,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
}

fn parse_speed(s: &str) -> Result<f64, String> {
    let secs: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if secs > 0.0 && secs <= MAX_DROP_SECS {
        Ok(secs)
    } else {
        Err(format!("speed must be above 0 and at most {MAX_DROP_SECS} seconds"))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.debug {
        init_logging(Path::new(LOG_FILE))?;
    }

    let config_path = Config::resolve_path(args.config.as_deref());

    if args.reset_config {
        Config::reset(&config_path)?;
        println!("Configuration reset to defaults.");
        return Ok(());
    }

    let mut config = Config::load(&config_path)?;
    let scores_path = config.high_scores_path(&config_path);

    if args.high_scores {
        print_high_scores(&scores_path)?;
        return Ok(());
    }
    if args.reset_scores {
        HighScores::reset(&scores_path)?;
        println!("High scores reset successfully.");
        return Ok(());
    }

    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
        if let Err(err) = config.save(&config_path) {
            warn!(error = %err, "could not save config");
        }
    }

    let game_config = build_game_config(&args, &config);
    info!(
        config = %config_path.display(),
        scores = %scores_path.display(),
        "starting"
    );

    let keymap = KeyMap::from_controls(&config.controls);
    let view = GameView::default();

    let mut term = TerminalRenderer::new();
    check_terminal_size(&term, &view)?;
    term.enter()?;

    let mut recorder = ScoreRecorder::new(&scores_path);
    let result = run(&mut term, &view, &keymap, GameState::new(game_config), &mut recorder);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!(error = %err, "could not restore terminal");
        eprintln!("Failed to restore terminal: {err:#}");
    }

    let summary = result?;
    println!(
        "Score: {} - Level {} - {} lines - {}",
        format_score(summary.score),
        summary.level,
        summary.lines,
        format_duration(summary.duration)
    );
    Ok(())
}

/// Command-line values win over the config file.
fn build_game_config(args: &Args, config: &Config) -> GameConfig {
    let difficulty = args.difficulty.unwrap_or(config.difficulty);
    let mut game_config = GameConfig::with_difficulty(difficulty)
        .starting_level(args.level.unwrap_or(config.starting_level))
        .seed(args.seed.unwrap_or_else(clock_seed));
    if let Some(speed) = args.speed {
        game_config = game_config.initial_drop_secs(speed);
    }
    game_config
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn init_logging(path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn print_high_scores(path: &Path) -> Result<()> {
    let table = HighScores::load(path)?;
    if table.is_empty() {
        println!("No high scores yet!");
        return Ok(());
    }
    println!("\n===== HIGH SCORES =====\n");
    for line in table.format_lines() {
        println!("{line}");
    }
    Ok(())
}

/// Warn, and wait for Enter, when the terminal cannot show the whole game.
fn check_terminal_size(term: &TerminalRenderer, view: &GameView) -> Result<()> {
    let Ok(viewport) = term.viewport() else {
        return Ok(());
    };
    let needed = view.min_viewport();
    if viewport.fits(needed) {
        return Ok(());
    }

    warn!(
        width = viewport.width,
        height = viewport.height,
        needed_width = needed.width,
        needed_height = needed.height,
        "terminal smaller than the game"
    );
    eprintln!(
        "Warning: terminal is {}x{} but the game needs at least {}x{}; parts will be cut off.",
        viewport.width, viewport.height, needed.width, needed.height
    );
    eprintln!("Press Enter to continue...");
    let mut line = String::new();
    io::stdin().read_line(&mut line).context("Failed to read from stdin")?;
    Ok(())
}

fn record_high_score(path: &Path, summary: &GameSummary) -> Result<Option<usize>> {
    let mut table = HighScores::load(path)?;
    let entry = HighScoreEntry::new(summary.score, summary.level, summary.lines, summary.duration);
    let rank = table.add(entry);
    if rank.is_some() {
        table.save(path)?;
    }
    Ok(rank)
}

/// Adds each finished game to the high-score table once.
///
/// A game is finished when it is over, or when the player quits with points
/// on the board.
struct ScoreRecorder {
    path: PathBuf,
    recorded_episode: Option<u32>,
}

impl ScoreRecorder {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            recorded_episode: None,
        }
    }

    /// Returns the table rank when the game made it in.
    fn record(&mut self, game: &GameState, quitting: bool) -> Result<Option<usize>> {
        let finished = game.is_game_over() || (quitting && game.score() > 0);
        if !finished || self.recorded_episode == Some(game.episode_id()) {
            return Ok(None);
        }
        self.recorded_episode = Some(game.episode_id());
        record_high_score(&self.path, &game.summary())
    }

    /// `record`, logging instead of failing.
    fn record_logged(&mut self, game: &GameState, quitting: bool) {
        match self.record(game, quitting) {
            Ok(Some(rank)) => info!(rank, score = game.score(), "new high score"),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "could not record high score"),
        }
    }
}

/// Game loop. Returns the summary of the last game played.
fn run(
    term: &mut TerminalRenderer,
    view: &GameView,
    keymap: &KeyMap,
    mut game: GameState,
    recorder: &mut ScoreRecorder,
) -> Result<GameSummary> {
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let viewport = term.viewport().unwrap_or(Viewport::new(80, 24));
        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(action) = handle_key_event(key, keymap) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(width, height) => {
                    term.invalidate();
                    if !Viewport::new(width, height).fits(view.min_viewport()) {
                        debug!(width, height, "terminal resized below the game size");
                    }
                }
                _ => {}
            }
        }

        if game.quit_requested() {
            info!(score = game.score(), "quit");
            recorder.record_logged(&game, true);
            return Ok(game.summary());
        }

        // Tick.
        let since_tick = last_tick.elapsed();
        if since_tick >= tick_duration {
            last_tick = Instant::now();
            game.tick(since_tick);
        }

        if game.is_game_over() {
            recorder.record_logged(&game, false);
        }
    }
}
