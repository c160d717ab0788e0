//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`] through a
//! [`KeyMap`] built from the default bindings and the config's `controls`.
//! This is a plain lookup; timing and repeat behaviour belong to the game loop.

pub mod map;

pub use termtris_types as types;

pub use map::{handle_key_event, parse_key_name, KeyMap};
