//! JSON command protocol for scripted editing.
//!
//! Every command maps onto one `EditorSession` operation. Failures are reported
//! in the response, never raised.

use serde::{Deserialize, Serialize};
use shared::PropertyValue;

use crate::geometry::GeometryBackend;
use crate::session::EditorSession;

/// A command the headless driver can execute
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Create a cube. Omitted fields use the configured defaults.
    CreateCube {
        #[serde(default)]
        center: Option<[f64; 3]>,
        #[serde(default)]
        size: Option<f64>,
    },
    /// Create a cylinder. Omitted fields use the configured defaults.
    CreateCylinder {
        #[serde(default)]
        start: Option<[f64; 3]>,
        #[serde(default)]
        end: Option<[f64; 3]>,
        #[serde(default)]
        radius: Option<f64>,
    },
    Delete {
        id: String,
    },
    DeleteSelected,
    /// Duplicate an object, optionally overriding the configured offset
    Duplicate {
        id: String,
        #[serde(default)]
        offset: Option<[f64; 3]>,
    },
    DuplicateSelected,
    Select {
        id: String,
    },
    ClearSelection,
    /// Set one property of an object (not recorded in history)
    SetProperty {
        id: String,
        name: String,
        value: PropertyValue,
    },
    Undo,
    Redo,
    ClearHistory,
    NewProject,
    /// List all objects and the history state
    Inspect,
    ExportScene,
}

/// Response from executing a command
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    pub fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

impl<T> From<crate::error::EditorResult<T>> for CommandResponse
where
    T: Serialize,
{
    fn from(result: crate::error::EditorResult<T>) -> Self {
        match result {
            Ok(value) => match serde_json::to_value(value) {
                Ok(serde_json::Value::Null) => CommandResponse::ok(),
                Ok(data) => CommandResponse::ok_with_data(data),
                Err(e) => CommandResponse::err(e.to_string()),
            },
            Err(e) => CommandResponse::err(e.to_string()),
        }
    }
}

/// Execute a single command on the session
pub fn execute_command<G: GeometryBackend>(
    session: &mut EditorSession<G>,
    cmd: SessionCommand,
) -> CommandResponse {
    tracing::debug!("Command: {cmd:?}");
    match cmd {
        SessionCommand::CreateCube { center, size } => {
            let defaults = &session.settings().defaults;
            let center = center.unwrap_or([0.0; 3]);
            let size = size.unwrap_or(defaults.cube_size);
            session
                .create_cube(center, size)
                .map(|id| serde_json::json!({ "id": id }))
                .into()
        }

        SessionCommand::CreateCylinder { start, end, radius } => {
            let defaults = &session.settings().defaults;
            let start = start.unwrap_or([0.0; 3]);
            let axis = defaults.cylinder_axis;
            let end = end.unwrap_or([start[0] + axis[0], start[1] + axis[1], start[2] + axis[2]]);
            let radius = radius.unwrap_or(defaults.cylinder_radius);
            session
                .create_cylinder(start, end, radius)
                .map(|id| serde_json::json!({ "id": id }))
                .into()
        }

        SessionCommand::Delete { id } => session
            .delete(&id)
            .map(|()| serde_json::json!({ "removed": id }))
            .into(),

        SessionCommand::DeleteSelected => session
            .delete_selected()
            .map(|removed| serde_json::json!({ "removed": removed }))
            .into(),

        SessionCommand::Duplicate { id, offset } => {
            let result = match offset {
                Some(offset) => session.duplicate_with_offset(&id, offset),
                None => session.duplicate(&id),
            };
            result.map(|id| serde_json::json!({ "id": id })).into()
        }

        SessionCommand::DuplicateSelected => session
            .duplicate_selected()
            .map(|id| serde_json::json!({ "id": id }))
            .into(),

        SessionCommand::Select { id } => session
            .select(&id)
            .map(|()| serde_json::json!({ "selected": id }))
            .into(),

        SessionCommand::ClearSelection => {
            session.clear_selection();
            CommandResponse::ok()
        }

        SessionCommand::SetProperty { id, name, value } => {
            session.update_property(&id, &name, value).into()
        }

        SessionCommand::Undo => session
            .undo()
            .map(|undone| serde_json::json!({ "undone": undone }))
            .into(),

        SessionCommand::Redo => session
            .redo()
            .map(|redone| serde_json::json!({ "redone": redone }))
            .into(),

        SessionCommand::ClearHistory => {
            session.clear_history();
            CommandResponse::ok()
        }

        SessionCommand::NewProject => session.new_project().into(),

        SessionCommand::Inspect => {
            let objects: Vec<serde_json::Value> = session
                .registry()
                .objects()
                .iter()
                .map(|object| {
                    serde_json::json!({
                        "id": object.id,
                        "name": object.name,
                        "kind": object.kind(),
                        "visible": object.visible,
                        "params": object.primitive.to_params(),
                    })
                })
                .collect();
            let history = session.history();
            let labels: Vec<&str> = history.commands().iter().map(|c| c.label()).collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "object_count": objects.len(),
                "objects": objects,
                "selected": session.registry().selected_id(),
                "cursor": history.cursor(),
                "undo_count": history.undo_count(),
                "redo_count": history.redo_count(),
                "history": labels,
            }))
        }

        SessionCommand::ExportScene => {
            let json = session.export_scene_json();
            CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json }))
        }
    }
}

/// Parse and execute a single JSON command string
pub fn execute_json<G: GeometryBackend>(
    session: &mut EditorSession<G>,
    json: &str,
) -> Result<CommandResponse, String> {
    let cmd: SessionCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(session, cmd))
}

/// Parse and execute multiple JSON commands (array)
pub fn execute_json_batch<G: GeometryBackend>(
    session: &mut EditorSession<G>,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<SessionCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(session, cmd))
        .collect())
}
