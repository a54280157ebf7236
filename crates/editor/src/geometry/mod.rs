//! Geometry collaborator interface.
//!
//! The registry never owns render resources. It holds a [`MeshHandle`] and
//! drives the mesh lifecycle only through [`GeometryBackend`] calls.

pub mod mesh;
mod store;
pub mod validation;

pub use store::MeshStore;
pub use validation::{MeshProblem, MeshValidator};

use shared::Primitive;
use thiserror::Error;

/// Opaque key of a mesh owned by a geometry backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u64);

impl std::fmt::Display for MeshHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("unknown mesh handle {0}")]
    UnknownMesh(MeshHandle),

    #[error("tessellation failed: {0}")]
    Tessellation(String),
}

/// Turns primitive parameters into displayable meshes.
///
/// Calls are synchronous. An error is fatal to the registry operation that
/// made the call, which then leaves its own state untouched.
pub trait GeometryBackend {
    /// Build and register a mesh for the object `owner`.
    fn build_mesh(&mut self, owner: &str, primitive: &Primitive) -> Result<MeshHandle, GeometryError>;

    /// Drop a mesh previously returned by this backend.
    fn remove_mesh(&mut self, handle: MeshHandle) -> Result<(), GeometryError>;

    /// Replace the mesh behind `handle` with one built from `primitive`.
    fn rebuild_mesh(
        &mut self,
        handle: MeshHandle,
        primitive: &Primitive,
    ) -> Result<MeshHandle, GeometryError>;
}
