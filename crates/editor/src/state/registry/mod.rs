//! Scene registry
//!
//! Owns every placed object, the selection and the binding to the view layer.
//! Render resources stay with the geometry backend; objects only hold a handle.

mod object_ops;
mod property_ops;

use shared::{ObjectId, ObjectSnapshot, Primitive, PrimitiveKind, SceneExport};

use super::selection::SelectionState;
use crate::error::{EditorError, EditorResult};
use crate::geometry::{GeometryBackend, MeshHandle, MeshStore};

/// Callback receiving the affected object after a mutation, or `None` after
/// a deletion or deselection. The return value is ignored.
pub type ViewBinder = Box<dyn FnMut(Option<&SceneObject>)>;

/// One placed primitive
#[derive(Debug, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub primitive: Primitive,
    pub visible: bool,
    mesh: MeshHandle,
}

impl SceneObject {
    pub fn kind(&self) -> PrimitiveKind {
        self.primitive.kind()
    }

    /// Render resource key owned by the geometry backend
    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// Value copy of everything except the mesh handle
    pub fn snapshot(&self) -> ObjectSnapshot {
        ObjectSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            primitive: self.primitive.clone(),
            visible: self.visible,
        }
    }
}

/// Registry of scene objects keyed by id, in insertion order
pub struct SceneRegistry<G: GeometryBackend = MeshStore> {
    objects: Vec<SceneObject>,
    geometry: G,
    selection: SelectionState,
    binder: Option<ViewBinder>,
    /// Serial used for default names (`Cube_1`, `Cylinder_2`, ...)
    serial: u64,
    /// Monotonically increasing version counter, bumped on every mutation
    version: u64,
}

impl Default for SceneRegistry<MeshStore> {
    fn default() -> Self {
        Self::new(MeshStore::default())
    }
}

impl<G: GeometryBackend> SceneRegistry<G> {
    pub fn new(geometry: G) -> Self {
        Self {
            objects: Vec::new(),
            geometry,
            selection: SelectionState::default(),
            binder: None,
            serial: 0,
            version: 0,
        }
    }

    /// Install the view binder, replacing any previous one
    pub fn set_binder(&mut self, binder: ViewBinder) {
        self.binder = Some(binder);
    }

    /// Get an object by ID
    pub fn get(&self, id: &str) -> EditorResult<&SceneObject> {
        self.objects
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| EditorError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects in insertion order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id.clone()).collect()
    }

    /// Value copies of all objects
    pub fn export(&self) -> SceneExport {
        SceneExport {
            objects: self.objects.iter().map(SceneObject::snapshot).collect(),
        }
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    /// Current registry version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    // ── Selection ─────────────────────────────────────────────

    /// Currently selected object
    pub fn selected(&self) -> Option<&SceneObject> {
        self.selection
            .primary()
            .and_then(|id| self.objects.iter().find(|o| &o.id == id))
    }

    pub fn selected_id(&self) -> Option<&ObjectId> {
        self.selection.primary()
    }

    /// Select an object and show it in the view
    pub fn select(&mut self, id: &str) -> EditorResult<()> {
        if !self.contains(id) {
            return Err(EditorError::NotFound(id.to_string()));
        }
        self.selection.select(id.to_string());
        self.notify(Some(id));
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.notify(None);
    }

    pub(crate) fn index_of(&self, id: &str) -> EditorResult<usize> {
        self.objects
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| EditorError::NotFound(id.to_string()))
    }

    fn notify(&mut self, id: Option<&str>) {
        let Some(binder) = self.binder.as_mut() else {
            return;
        };
        let object = id.and_then(|id| self.objects.iter().find(|o| o.id == id));
        binder(object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{unit_cube, RecordingBinder};

    #[test]
    fn test_new_registry_empty() {
        let r = SceneRegistry::default();
        assert!(r.is_empty());
        assert!(r.selected().is_none());
        assert_eq!(r.version(), 0);
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let r = SceneRegistry::default();
        assert!(matches!(r.get("nope"), Err(EditorError::NotFound(id)) if id == "nope"));
    }

    #[test]
    fn test_select_unknown_fails_without_notify() {
        let rec = RecordingBinder::new();
        let mut r = SceneRegistry::default();
        r.set_binder(rec.binder());
        assert!(r.select("nope").is_err());
        assert!(rec.events().is_empty());
    }

    #[test]
    fn test_select_and_clear_notify() {
        let rec = RecordingBinder::new();
        let mut r = SceneRegistry::default();
        let id = r.create(unit_cube()).unwrap();
        r.clear_selection();
        r.set_binder(rec.binder());

        r.select(&id).unwrap();
        assert_eq!(r.selected().map(|o| o.id.clone()), Some(id.clone()));
        r.clear_selection();
        assert!(r.selected().is_none());

        let events = rec.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].as_ref().map(|s| s.id.clone()), Some(id));
        assert!(events[1].is_none());
    }

    #[test]
    fn test_snapshot_excludes_mesh() {
        let mut r = SceneRegistry::default();
        let id = r.create(unit_cube()).unwrap();
        let obj = r.get(&id).unwrap();
        let snap = obj.snapshot();
        assert_eq!(snap.id, obj.id);
        assert_eq!(snap.primitive, obj.primitive);
        assert_eq!(r.geometry().owner(obj.mesh()), Some(id.as_str()));
    }
}
