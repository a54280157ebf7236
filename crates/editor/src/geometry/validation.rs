//! Integrity checks run on every freshly tessellated mesh.

use thiserror::Error;

use super::mesh::{Aabb, MeshData};

/// Floats per interleaved vertex: position, normal, colour
const STRIDE: usize = 9;

/// Largest accepted deviation of a normal's length from 1
const NORMAL_TOLERANCE: f32 = 0.1;

/// A defect found in a mesh
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshProblem {
    #[error("mesh has no triangles")]
    Empty,

    #[error("vertex buffer of {0} floats is not a whole number of vertices")]
    VertexStride(usize),

    #[error("index buffer of {0} entries is not a whole number of triangles")]
    IndexStride(usize),

    #[error("index {index} points past the last of {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("vertex {0} has a non-finite component")]
    NonFinite(usize),

    #[error("vertex {0} has a normal that is not unit length")]
    BadNormal(usize),
}

/// Checks over a borrowed `MeshData`
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    /// First defect found, if any
    pub fn check(&self) -> Result<(), MeshProblem> {
        match self.problems().into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }

    /// Every defect, one entry per kind of problem
    pub fn problems(&self) -> Vec<MeshProblem> {
        let MeshData { vertices, indices } = self.mesh;
        let mut problems = Vec::new();

        if indices.is_empty() {
            problems.push(MeshProblem::Empty);
        }
        if vertices.len() % STRIDE != 0 {
            problems.push(MeshProblem::VertexStride(vertices.len()));
        }
        if indices.len() % 3 != 0 {
            problems.push(MeshProblem::IndexStride(indices.len()));
        }

        let vertex_count = self.mesh.vertex_count();
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            problems.push(MeshProblem::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        let non_finite = vertices
            .chunks_exact(STRIDE)
            .position(|v| v.iter().any(|x| !x.is_finite()));
        let bad_normal = vertices.chunks_exact(STRIDE).position(|v| {
            let len = (v[3] * v[3] + v[4] * v[4] + v[5] * v[5]).sqrt();
            (len - 1.0).abs() > NORMAL_TOLERANCE
        });
        if let Some(i) = non_finite {
            problems.push(MeshProblem::NonFinite(i));
        } else if let Some(i) = bad_normal {
            problems.push(MeshProblem::BadNormal(i));
        }

        problems
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_mesh(self.mesh)
    }

    /// Bounding box extents (x, y, z)
    pub fn dimensions(&self) -> [f32; 3] {
        self.aabb().size().to_array()
    }

    pub fn dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        self.dimensions()
            .iter()
            .zip(expected.iter())
            .all(|(d, e)| (d - e).abs() < tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::{cube, cylinder, CUBE_COLOR, CYLINDER_COLOR};
    use glam::Vec3;

    #[test]
    fn test_generated_meshes_pass() {
        let c = cube(Vec3::ZERO, 1.0, CUBE_COLOR);
        let y = cylinder(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), 0.3, 24, CYLINDER_COLOR);
        for mesh in [&c, &y] {
            let problems = MeshValidator::new(mesh).problems();
            assert!(problems.is_empty(), "{problems:?}");
        }
    }

    #[test]
    fn test_dimensions_approx() {
        let c = cube(Vec3::ONE, 3.0, CUBE_COLOR);
        let v = MeshValidator::new(&c);
        assert!(v.dimensions_approx([3.0, 3.0, 3.0], 0.01));
        assert!(!v.dimensions_approx([1.0, 3.0, 3.0], 0.01));
    }

    #[test]
    fn test_bad_buffers() {
        let bad = MeshData {
            vertices: vec![0.0; 10],
            indices: vec![0, 5],
        };
        let problems = MeshValidator::new(&bad).problems();
        assert!(problems.contains(&MeshProblem::VertexStride(10)));
        assert!(problems.contains(&MeshProblem::IndexStride(2)));
        assert!(problems.contains(&MeshProblem::IndexOutOfRange {
            index: 5,
            vertex_count: 1
        }));
    }

    #[test]
    fn test_empty_mesh() {
        let empty = MeshData {
            vertices: vec![],
            indices: vec![],
        };
        assert_eq!(MeshValidator::new(&empty).check(), Err(MeshProblem::Empty));
    }

    #[test]
    fn test_long_normal() {
        let bad = MeshData {
            vertices: vec![0.0, 0.0, 0.0, 0.0, 0.0, 5.0, 0.5, 0.5, 0.5],
            indices: vec![0, 0, 0],
        };
        assert_eq!(MeshValidator::new(&bad).check(), Err(MeshProblem::BadNormal(0)));
    }

    #[test]
    fn test_nan_vertex() {
        let bad = MeshData {
            vertices: vec![0.0, 0.0, 0.0, f32::NAN, f32::NAN, f32::NAN, 0.5, 0.5, 0.5],
            indices: vec![0, 0, 0],
        };
        assert_eq!(MeshValidator::new(&bad).check(), Err(MeshProblem::NonFinite(0)));
    }
}
