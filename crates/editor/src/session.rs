//! Editor session: registry, history and settings wired together.
//!
//! The session is constructed explicitly and passed to whatever drives it (UI
//! callbacks, the JSON command surface, tests). There is no global instance.

use shared::{ObjectId, ParamMap, Primitive, PrimitiveKind, PropertyValue};

use crate::error::EditorResult;
use crate::geometry::{GeometryBackend, MeshStore};
use crate::history::{EditCommand, EditHistory};
use crate::state::{EditorSettings, SceneObject, SceneRegistry, ViewBinder};

pub struct EditorSession<G: GeometryBackend = MeshStore> {
    registry: SceneRegistry<G>,
    history: EditHistory,
    settings: EditorSettings,
}

impl EditorSession<MeshStore> {
    /// Session backed by the in-memory mesh store
    pub fn new(settings: EditorSettings) -> Self {
        let store = MeshStore::new(settings.geometry.segments);
        Self::with_backend(store, settings)
    }
}

impl Default for EditorSession<MeshStore> {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl<G: GeometryBackend> EditorSession<G> {
    pub fn with_backend(geometry: G, settings: EditorSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            registry: SceneRegistry::new(geometry),
            history: EditHistory::new(settings.history.max_depth),
            settings,
        }
    }

    /// Install the view binder notified after every mutation
    pub fn set_binder(&mut self, binder: ViewBinder) {
        self.registry.set_binder(binder);
    }

    pub fn registry(&self) -> &SceneRegistry<G> {
        &self.registry
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn geometry_mut(&mut self) -> &mut G {
        self.registry.geometry_mut()
    }

    // ── Reversible edits ──────────────────────────────────────

    /// Create an object through the history and return its id
    pub fn create(&mut self, primitive: Primitive) -> EditorResult<ObjectId> {
        self.execute_for_id(EditCommand::create(primitive))
    }

    pub fn create_cube(&mut self, center: [f64; 3], size: f64) -> EditorResult<ObjectId> {
        self.create(Primitive::Cube { center, size })
    }

    pub fn create_cylinder(&mut self, start: [f64; 3], end: [f64; 3], radius: f64) -> EditorResult<ObjectId> {
        self.create(Primitive::Cylinder { start, end, radius })
    }

    pub fn create_from_params(&mut self, kind: PrimitiveKind, params: &ParamMap) -> EditorResult<ObjectId> {
        let primitive = Primitive::from_params(kind, params)?;
        self.create(primitive)
    }

    pub fn delete(&mut self, id: &str) -> EditorResult<()> {
        self.history.execute(EditCommand::delete(id), &mut self.registry)?;
        Ok(())
    }

    /// Delete the selected object. `Ok(None)` if nothing is selected.
    pub fn delete_selected(&mut self) -> EditorResult<Option<ObjectId>> {
        let Some(id) = self.registry.selected_id().cloned() else {
            return Ok(None);
        };
        self.delete(&id)?;
        Ok(Some(id))
    }

    /// Duplicate with the configured offset
    pub fn duplicate(&mut self, id: &str) -> EditorResult<ObjectId> {
        let offset = self.settings.duplicate.offset;
        self.duplicate_with_offset(id, offset)
    }

    pub fn duplicate_with_offset(&mut self, id: &str, offset: [f64; 3]) -> EditorResult<ObjectId> {
        self.execute_for_id(EditCommand::duplicate(id, offset))
    }

    /// Duplicate the selected object. `Ok(None)` if nothing is selected.
    pub fn duplicate_selected(&mut self) -> EditorResult<Option<ObjectId>> {
        let Some(id) = self.registry.selected_id().cloned() else {
            return Ok(None);
        };
        self.duplicate(&id).map(Some)
    }

    /// Undo the last edit. `Ok(false)` if there is nothing to undo.
    pub fn undo(&mut self) -> EditorResult<bool> {
        self.history.undo(&mut self.registry)
    }

    /// Redo the last undone edit. `Ok(false)` if there is nothing to redo.
    pub fn redo(&mut self) -> EditorResult<bool> {
        self.history.redo(&mut self.registry)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Remove every object and forget all history.
    ///
    /// History is cleared even if some objects could not be removed, since its
    /// commands may refer to objects that are already gone.
    pub fn new_project(&mut self) -> EditorResult<()> {
        let cleared = self.registry.clear();
        self.history.clear();
        cleared?;
        tracing::info!("New project");
        Ok(())
    }

    fn execute_for_id(&mut self, command: EditCommand) -> EditorResult<ObjectId> {
        let recorded = self.history.execute(command, &mut self.registry)?;
        Ok(recorded.object_id().cloned().unwrap_or_default())
    }

    // ── Direct (non-recorded) edits ───────────────────────────

    pub fn select(&mut self, id: &str) -> EditorResult<()> {
        self.registry.select(id)
    }

    pub fn clear_selection(&mut self) {
        self.registry.clear_selection();
    }

    pub fn selected(&self) -> Option<&SceneObject> {
        self.registry.selected()
    }

    pub fn update_property(
        &mut self,
        id: &str,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> EditorResult<()> {
        self.registry.update_property(id, name, value)
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn object_count(&self) -> usize {
        self.registry.len()
    }

    pub fn get(&self, id: &str) -> EditorResult<&SceneObject> {
        self.registry.get(id)
    }

    /// Current objects as pretty JSON (no history, no meshes)
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(&self.registry.export()).unwrap_or_default()
    }
}
