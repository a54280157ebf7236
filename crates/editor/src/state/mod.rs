pub mod registry;
pub mod selection;
pub mod settings;

pub use registry::{SceneObject, SceneRegistry, ViewBinder};
pub use selection::SelectionState;
pub use settings::{EditorSettings, HistorySettings};
