//! Undo/redo for scene edits.
//!
//! Every reversible edit (create, delete, duplicate) is an [`EditCommand`].
//! [`EditHistory`] executes commands against the registry and keeps them in a
//! cursor-addressed list so they can be undone and replayed.
//!
//! ## Module Structure
//!
//! - [`commands`] - the command variants and their execute/undo logic
//! - [`edit_history`] - the command list, cursor and redo tail handling

pub mod commands;
pub mod edit_history;

pub use commands::{CreateCommand, DeleteCommand, DuplicateCommand, EditCommand};
pub use edit_history::EditHistory;

/// Default maximum number of undoable commands
pub const MAX_HISTORY_SIZE: usize = 100;
