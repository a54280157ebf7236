//! Factory functions and test doubles.
//!
//! Provides primitive factories, a view binder that records notifications and a
//! geometry backend that fails on demand.

use std::cell::RefCell;
use std::rc::Rc;

use shared::{ObjectSnapshot, Primitive};

use crate::geometry::{GeometryBackend, GeometryError, MeshHandle, MeshStore};
use crate::state::{SceneObject, ViewBinder};

// ── Primitive factories ─────────────────────────────────────────

/// Unit cube at the origin
pub fn unit_cube() -> Primitive {
    cube_at([0.0, 0.0, 0.0], 1.0)
}

/// Cube with the given center and size
pub fn cube_at(center: [f64; 3], size: f64) -> Primitive {
    Primitive::Cube { center, size }
}

/// Cylinder from the origin up the Z axis, length 2, radius 0.5
pub fn z_cylinder() -> Primitive {
    cylinder_between([0.0, 0.0, 0.0], [0.0, 0.0, 2.0], 0.5)
}

pub fn cylinder_between(start: [f64; 3], end: [f64; 3], radius: f64) -> Primitive {
    Primitive::Cylinder { start, end, radius }
}

// ── View binder ─────────────────────────────────────────────────

/// Records every notification as a snapshot (`None` for deselection)
#[derive(Clone, Default)]
pub struct RecordingBinder {
    events: Rc<RefCell<Vec<Option<ObjectSnapshot>>>>,
}

impl RecordingBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A binder feeding this recorder
    pub fn binder(&self) -> ViewBinder {
        let events = Rc::clone(&self.events);
        Box::new(move |object: Option<&SceneObject>| {
            events.borrow_mut().push(object.map(|o| o.snapshot()));
        })
    }

    pub fn events(&self) -> Vec<Option<ObjectSnapshot>> {
        self.events.borrow().clone()
    }

    /// Most recent notification, if any
    pub fn last(&self) -> Option<Option<ObjectSnapshot>> {
        self.events.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

// ── Geometry backend ────────────────────────────────────────────

/// `MeshStore` wrapper whose calls can be made to fail
#[derive(Default)]
pub struct FlakyBackend {
    pub inner: MeshStore,
    pub fail_build: bool,
    pub fail_remove: bool,
    pub fail_rebuild: bool,
}

impl FlakyBackend {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl GeometryBackend for FlakyBackend {
    fn build_mesh(&mut self, owner: &str, primitive: &Primitive) -> Result<MeshHandle, GeometryError> {
        if self.fail_build {
            return Err(GeometryError::Tessellation("injected build failure".into()));
        }
        self.inner.build_mesh(owner, primitive)
    }

    fn remove_mesh(&mut self, handle: MeshHandle) -> Result<(), GeometryError> {
        if self.fail_remove {
            return Err(GeometryError::UnknownMesh(handle));
        }
        self.inner.remove_mesh(handle)
    }

    fn rebuild_mesh(
        &mut self,
        handle: MeshHandle,
        primitive: &Primitive,
    ) -> Result<MeshHandle, GeometryError> {
        if self.fail_rebuild {
            return Err(GeometryError::Tessellation("injected rebuild failure".into()));
        }
        self.inner.rebuild_mesh(handle, primitive)
    }
}
