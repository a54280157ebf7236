//! Object create/remove/restore operations

use shared::{ObjectId, ObjectSnapshot, ParamMap, Primitive, PrimitiveKind};

use super::{SceneObject, SceneRegistry};
use crate::error::{EditorError, EditorResult};
use crate::geometry::GeometryBackend;

impl<G: GeometryBackend> SceneRegistry<G> {
    /// Create an object with a freshly minted id and a default name
    pub fn create(&mut self, primitive: Primitive) -> EditorResult<ObjectId> {
        primitive.validate()?;

        let id = uuid::Uuid::new_v4().to_string();
        let name = format!("{}_{}", primitive.kind().label(), self.serial + 1);
        self.insert(ObjectSnapshot {
            id: id.clone(),
            name,
            primitive,
            visible: true,
        })?;
        self.serial += 1;
        Ok(id)
    }

    /// Create an object from loose parameters (every field of `kind` required)
    pub fn create_from_params(&mut self, kind: PrimitiveKind, params: &ParamMap) -> EditorResult<ObjectId> {
        let primitive = Primitive::from_params(kind, params)?;
        self.create(primitive)
    }

    /// Re-create a previously known object under its original identity
    pub fn create_with_id(&mut self, id: &str, name: &str, primitive: Primitive) -> EditorResult<()> {
        self.insert(ObjectSnapshot {
            id: id.to_string(),
            name: name.to_string(),
            primitive,
            visible: true,
        })
    }

    /// Re-insert a captured snapshot under `id`
    pub fn restore(&mut self, id: &str, snapshot: &ObjectSnapshot) -> EditorResult<()> {
        self.insert(ObjectSnapshot {
            id: id.to_string(),
            ..snapshot.clone()
        })
    }

    /// Remove an object and drop its mesh. Returns the removed state.
    pub fn remove(&mut self, id: &str) -> EditorResult<ObjectSnapshot> {
        let index = self.index_of(id)?;
        self.geometry.remove_mesh(self.objects[index].mesh)?;

        let removed = self.objects.remove(index);
        self.selection.deselect(id);
        self.version += 1;
        tracing::info!("Removed {} ({})", removed.name, removed.id);
        self.notify(None);
        Ok(removed.snapshot())
    }

    /// Remove every object, newest first.
    ///
    /// Stops at the first geometry failure. Objects removed before the failure
    /// stay removed, and the selection and binder reflect what is left.
    pub fn clear(&mut self) -> EditorResult<()> {
        let mut result = Ok(());
        while let Some(object) = self.objects.last() {
            if let Err(e) = self.geometry.remove_mesh(object.mesh) {
                result = Err(e.into());
                break;
            }
            self.objects.pop();
        }

        let selection_gone = self
            .selection
            .primary()
            .is_some_and(|id| !self.objects.iter().any(|o| &o.id == id));
        if selection_gone {
            self.selection.clear();
        }
        self.version += 1;
        match &result {
            Ok(()) => tracing::info!("Registry cleared"),
            Err(e) => tracing::warn!("Registry clear stopped with {} left: {e}", self.objects.len()),
        }
        self.notify(None);
        result
    }

    /// Validate, build the mesh, then commit. Nothing changes on failure.
    fn insert(&mut self, snapshot: ObjectSnapshot) -> EditorResult<()> {
        if self.contains(&snapshot.id) {
            return Err(EditorError::AlreadyExists(snapshot.id));
        }
        snapshot.primitive.validate()?;

        let mesh = self.geometry.build_mesh(&snapshot.id, &snapshot.primitive)?;
        let ObjectSnapshot {
            id,
            name,
            primitive,
            visible,
        } = snapshot;
        tracing::info!("Inserted {name} ({id})");
        self.objects.push(SceneObject {
            id: id.clone(),
            name,
            primitive,
            visible,
            mesh,
        });
        self.selection.select(id.clone());
        self.version += 1;
        self.notify(Some(&id));
        Ok(())
    }
}
