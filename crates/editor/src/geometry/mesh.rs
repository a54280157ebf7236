use glam::Vec3;
use shared::Primitive;

/// Cube colour (blue)
pub const CUBE_COLOR: [f32; 3] = [0.2, 0.4, 0.9];
/// Cylinder colour (red)
pub const CYLINDER_COLOR: [f32; 3] = [0.9, 0.25, 0.2];

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_mesh(mesh: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in mesh.vertices.chunks_exact(9) {
            let p = Vec3::new(v[0], v[1], v[2]);
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Tessellate a primitive with its kind colour
pub fn tessellate(primitive: &Primitive, segments: u32) -> MeshData {
    match primitive {
        Primitive::Cube { center, size } => cube(to_vec3(center), *size as f32, CUBE_COLOR),
        Primitive::Cylinder { start, end, radius } => cylinder(
            to_vec3(start),
            to_vec3(end),
            *radius as f32,
            segments,
            CYLINDER_COLOR,
        ),
    }
}

fn to_vec3(p: &[f64; 3]) -> Vec3 {
    Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32)
}

pub fn cube(center: Vec3, size: f32, color: [f32; 3]) -> MeshData {
    let h = size * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-h, -h, h), Vec3::new(h, -h, h), Vec3::new(h, h, h), Vec3::new(-h, h, h)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(h, -h, -h), Vec3::new(-h, -h, -h), Vec3::new(-h, h, -h), Vec3::new(h, h, -h)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(h, -h, h), Vec3::new(h, -h, -h), Vec3::new(h, h, -h), Vec3::new(h, h, h)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-h, -h, -h), Vec3::new(-h, -h, h), Vec3::new(-h, h, h), Vec3::new(-h, h, -h)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-h, h, h), Vec3::new(h, h, h), Vec3::new(h, h, -h), Vec3::new(-h, h, -h)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-h, -h, -h), Vec3::new(h, -h, -h), Vec3::new(h, -h, h), Vec3::new(-h, -h, h)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * 9);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / 9) as u32;
        for v in quad {
            push_vert(&mut vertices, center + *v, *normal, color);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Cylinder whose axis runs from `start` to `end`. Caller guarantees `start != end`.
pub fn cylinder(start: Vec3, end: Vec3, radius: f32, segments: u32, color: [f32; 3]) -> MeshData {
    let axis = (end - start).normalize();
    let (u, v) = axis.any_orthonormal_pair();
    let ring = |i: u32| {
        let a = (i as f32) * std::f32::consts::TAU / segments as f32;
        u * a.cos() + v * a.sin()
    };

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side faces
    for i in 0..segments {
        let d0 = ring(i);
        let d1 = ring(i + 1);
        let base = (vertices.len() / 9) as u32;

        push_vert(&mut vertices, start + d0 * radius, d0, color);
        push_vert(&mut vertices, start + d1 * radius, d1, color);
        push_vert(&mut vertices, end + d1 * radius, d1, color);
        push_vert(&mut vertices, end + d0 * radius, d0, color);

        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    // Caps
    for (center, normal) in [(end, axis), (start, -axis)] {
        let base = (vertices.len() / 9) as u32;
        push_vert(&mut vertices, center, normal, color);
        for i in 0..segments {
            push_vert(&mut vertices, center + ring(i) * radius, normal, color);
        }
        for i in 0..segments {
            let a = base + 1 + i;
            let b = base + 1 + (i + 1) % segments;
            if normal == axis {
                indices.extend_from_slice(&[base, a, b]);
            } else {
                indices.extend_from_slice(&[base, b, a]);
            }
        }
    }

    MeshData { vertices, indices }
}

fn push_vert(vertices: &mut Vec<f32>, p: Vec3, n: Vec3, color: [f32; 3]) {
    vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, color[0], color[1], color[2]]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let m = cube(Vec3::ZERO, 1.0, CUBE_COLOR);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.triangle_count(), 12);
    }

    #[test]
    fn test_cube_bounds_follow_center() {
        let m = cube(Vec3::new(1.0, 2.0, 3.0), 2.0, CUBE_COLOR);
        let aabb = Aabb::from_mesh(&m);
        assert!((aabb.center() - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
        assert!((aabb.size() - Vec3::splat(2.0)).length() < 1e-5);
    }

    #[test]
    fn test_cylinder_counts() {
        let m = cylinder(Vec3::ZERO, Vec3::Z, 0.5, 16, CYLINDER_COLOR);
        // 4 per side quad + (center + ring) per cap
        assert_eq!(m.vertex_count(), 16 * 4 + 2 * 17);
        assert_eq!(m.triangle_count(), 16 * 2 + 2 * 16);
    }

    #[test]
    fn test_cylinder_bounds_along_z() {
        let m = cylinder(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), 0.5, 32, CYLINDER_COLOR);
        let aabb = Aabb::from_mesh(&m);
        assert!((aabb.min.z - 0.0).abs() < 1e-5);
        assert!((aabb.max.z - 2.0).abs() < 1e-5);
        assert!((aabb.size().x - 1.0).abs() < 1e-3);
    }
}
