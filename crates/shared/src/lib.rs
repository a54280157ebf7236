use serde::{Deserialize, Serialize};

pub mod parameters;

pub use parameters::{ParamMap, ParameterError, PropertyValue};

/// Unique identifier of an object in the scene
pub type ObjectId = String;

/// Kind of primitive solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Cube,
    Cylinder,
}

impl PrimitiveKind {
    /// Display label used for default object names
    pub fn label(&self) -> &'static str {
        match self {
            PrimitiveKind::Cube => "Cube",
            PrimitiveKind::Cylinder => "Cylinder",
        }
    }

    /// Numeric geometry fields of this kind, in display order
    pub fn numeric_fields(&self) -> &'static [&'static str] {
        match self {
            PrimitiveKind::Cube => &["center_x", "center_y", "center_z", "size"],
            PrimitiveKind::Cylinder => &[
                "start_x", "start_y", "start_z", "end_x", "end_y", "end_z", "radius",
            ],
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Geometry parameters of a primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    /// Axis-aligned cube with uniform edge length
    Cube { center: [f64; 3], size: f64 },
    /// Cylinder along the axis from `start` to `end`
    Cylinder {
        start: [f64; 3],
        end: [f64; 3],
        radius: f64,
    },
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Cube { .. } => PrimitiveKind::Cube,
            Primitive::Cylinder { .. } => PrimitiveKind::Cylinder,
        }
    }

    /// Copy of this primitive with every point shifted by `offset`.
    /// Non-positional parameters are copied verbatim.
    pub fn translated(&self, offset: [f64; 3]) -> Primitive {
        let shift = |p: &[f64; 3]| [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]];
        match self {
            Primitive::Cube { center, size } => Primitive::Cube {
                center: shift(center),
                size: *size,
            },
            Primitive::Cylinder { start, end, radius } => Primitive::Cylinder {
                start: shift(start),
                end: shift(end),
                radius: *radius,
            },
        }
    }

    /// Cylinder axis length (0 for cubes)
    pub fn axis_length(&self) -> f64 {
        match self {
            Primitive::Cube { .. } => 0.0,
            Primitive::Cylinder { start, end, .. } => {
                let d = [end[0] - start[0], end[1] - start[1], end[2] - start[2]];
                (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
            }
        }
    }
}

/// Value copy of an object's public state, without its render resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub id: ObjectId,
    pub name: String,
    pub primitive: Primitive,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl ObjectSnapshot {
    pub fn kind(&self) -> PrimitiveKind {
        self.primitive.kind()
    }
}

fn default_true() -> bool {
    true
}

/// Exported scene content (objects only, no history)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SceneExport {
    pub objects: Vec<ObjectSnapshot>,
}
