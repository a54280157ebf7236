// Library crate: the editing core plus the JSON command surface.
// The binary only wires stdin/stdout and logging around it.

pub mod command;
pub mod error;
pub mod fixtures;
pub mod geometry;
pub mod history;
pub mod session;
pub mod state;

pub use error::{EditorError, EditorResult};
pub use session::EditorSession;
