//! termtris (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so integration tests,
//! benches and the binary can write `termtris::core::GameState` and friends.

pub use termtris_core as core;
pub use termtris_input as input;
pub use termtris_store as store;
pub use termtris_term as term;
pub use termtris_types as types;
