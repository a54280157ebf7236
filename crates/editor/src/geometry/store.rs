use std::collections::HashMap;

use shared::Primitive;

use super::mesh::{tessellate, MeshData};
use super::{GeometryBackend, GeometryError, MeshHandle, MeshValidator};

pub const DEFAULT_SEGMENTS: u32 = 32;

/// In-memory geometry backend: tessellates primitives and keeps the meshes
/// keyed by handle until they are removed.
pub struct MeshStore {
    meshes: HashMap<MeshHandle, (String, MeshData)>,
    next_handle: u64,
    segments: u32,
    build_count: u64,
}

impl Default for MeshStore {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENTS)
    }
}

impl MeshStore {
    pub fn new(segments: u32) -> Self {
        Self {
            meshes: HashMap::new(),
            next_handle: 1,
            segments: segments.clamp(3, 256),
            build_count: 0,
        }
    }

    /// Number of live meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Get mesh data by handle
    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(&handle).map(|(_, mesh)| mesh)
    }

    /// Object id the mesh was built for
    pub fn owner(&self, handle: MeshHandle) -> Option<&str> {
        self.meshes.get(&handle).map(|(owner, _)| owner.as_str())
    }

    /// Total number of tessellations (builds + rebuilds)
    pub fn build_count(&self) -> u64 {
        self.build_count
    }

    fn tessellate(&mut self, primitive: &Primitive) -> Result<MeshData, GeometryError> {
        primitive
            .validate()
            .map_err(|e| GeometryError::Tessellation(e.to_string()))?;
        self.build_count += 1;
        accept(tessellate(primitive, self.segments))
    }
}

/// Refuse meshes the renderer could not draw
fn accept(mesh: MeshData) -> Result<MeshData, GeometryError> {
    MeshValidator::new(&mesh)
        .check()
        .map_err(|problem| GeometryError::Tessellation(problem.to_string()))?;
    Ok(mesh)
}

impl GeometryBackend for MeshStore {
    fn build_mesh(&mut self, owner: &str, primitive: &Primitive) -> Result<MeshHandle, GeometryError> {
        let mesh = self.tessellate(primitive)?;
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;
        self.meshes.insert(handle, (owner.to_string(), mesh));
        tracing::debug!("Built {handle} for {owner}");
        Ok(handle)
    }

    fn remove_mesh(&mut self, handle: MeshHandle) -> Result<(), GeometryError> {
        self.meshes
            .remove(&handle)
            .map(|_| tracing::debug!("Removed {handle}"))
            .ok_or(GeometryError::UnknownMesh(handle))
    }

    fn rebuild_mesh(
        &mut self,
        handle: MeshHandle,
        primitive: &Primitive,
    ) -> Result<MeshHandle, GeometryError> {
        if !self.meshes.contains_key(&handle) {
            return Err(GeometryError::UnknownMesh(handle));
        }
        let mesh = self.tessellate(primitive)?;
        if let Some(entry) = self.meshes.get_mut(&handle) {
            entry.1 = mesh;
        }
        tracing::debug!("Rebuilt {handle}");
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> Primitive {
        Primitive::Cube {
            center: [0.0; 3],
            size: 1.0,
        }
    }

    #[test]
    fn test_build_and_remove() {
        let mut store = MeshStore::default();
        let h = store.build_mesh("a", &unit_cube()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.owner(h), Some("a"));
        store.remove_mesh(h).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_handles_are_distinct() {
        let mut store = MeshStore::default();
        let a = store.build_mesh("a", &unit_cube()).unwrap();
        let b = store.build_mesh("b", &unit_cube()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_unknown_handle() {
        let mut store = MeshStore::default();
        assert_eq!(
            store.remove_mesh(MeshHandle(42)),
            Err(GeometryError::UnknownMesh(MeshHandle(42)))
        );
    }

    #[test]
    fn test_rebuild_keeps_handle() {
        let mut store = MeshStore::default();
        let h = store.build_mesh("a", &unit_cube()).unwrap();
        let bigger = Primitive::Cube {
            center: [0.0; 3],
            size: 4.0,
        };
        assert_eq!(store.rebuild_mesh(h, &bigger).unwrap(), h);
        assert_eq!(store.build_count(), 2);
        let dims = MeshValidator::new(store.mesh(h).unwrap()).dimensions();
        assert!((dims[0] - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_cylinder_fails() {
        let mut store = MeshStore::default();
        let p = Primitive::Cylinder {
            start: [0.0; 3],
            end: [0.0; 3],
            radius: 1.0,
        };
        assert!(matches!(
            store.build_mesh("a", &p),
            Err(GeometryError::Tessellation(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_near_degenerate_cylinder_fails() {
        let mut store = MeshStore::default();
        let p = Primitive::Cylinder {
            start: [0.0; 3],
            end: [0.0, 0.0, 1e-50],
            radius: 0.5,
        };
        assert!(matches!(
            store.build_mesh("a", &p),
            Err(GeometryError::Tessellation(_))
        ));
        assert!(store.is_empty());
        assert_eq!(store.build_count(), 0);
    }

    #[test]
    fn test_corrupt_mesh_refused() {
        let corrupt = MeshData {
            vertices: vec![0.0, 0.0, 0.0, f32::NAN, f32::NAN, f32::NAN, 0.5, 0.5, 0.5],
            indices: vec![0, 0, 0],
        };
        let err = accept(corrupt).unwrap_err();
        assert!(matches!(err, GeometryError::Tessellation(ref msg) if msg.contains("non-finite")));
    }

    #[test]
    fn test_segments_clamped() {
        let mut store = MeshStore::new(1);
        let p = Primitive::Cylinder {
            start: [0.0; 3],
            end: [0.0, 0.0, 1.0],
            radius: 1.0,
        };
        let h = store.build_mesh("c", &p).unwrap();
        // 3 segments: 12 side vertices + 2 caps of 4
        assert_eq!(store.mesh(h).unwrap().vertex_count(), 20);
    }
}
