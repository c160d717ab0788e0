//! Terminal rendering for termtris.
//!
//! Renders into a plain framebuffer that is then diffed and flushed to the
//! terminal, instead of going through a widget toolkit. This keeps the
//! 2-columns-per-cell aspect ratio exact and the view logic unit-testable.
//!
//! - [`fb`]: styled character grid
//! - [`game_view`]: `GameSnapshot` to framebuffer, no I/O
//! - [`renderer`]: crossterm backend with changed-run diffing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use termtris_core as core;
pub use termtris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
