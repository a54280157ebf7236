use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Primitive, PrimitiveKind};

/// Loose numeric parameters keyed by field name (`center_x`, `radius`, ...)
pub type ParamMap = BTreeMap<String, f64>;

/// Errors raised while validating primitive parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// A field required by the kind was not supplied
    #[error("missing parameter '{0}'")]
    Missing(String),
    /// The field does not exist for the kind
    #[error("unknown parameter '{0}'")]
    Unknown(String),
    /// The value is not finite or outside the accepted range
    #[error("parameter '{field}' out of range: {value}")]
    OutOfRange { field: String, value: f64 },
    /// The parameters describe a shape with no volume
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// A property value coming from the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Number(v) => write!(f, "{v}"),
            PropertyValue::Flag(b) => write!(f, "{b}"),
            PropertyValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Number(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Flag(b)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl Primitive {
    /// Build a primitive from loose parameters. Every numeric field of `kind`
    /// is required and unknown fields are rejected.
    pub fn from_params(kind: PrimitiveKind, params: &ParamMap) -> Result<Primitive, ParameterError> {
        if let Some(unknown) = params
            .keys()
            .find(|k| !kind.numeric_fields().contains(&k.as_str()))
        {
            return Err(ParameterError::Unknown(unknown.clone()));
        }

        let get = |field: &str| {
            params
                .get(field)
                .copied()
                .ok_or_else(|| ParameterError::Missing(field.to_string()))
        };

        let primitive = match kind {
            PrimitiveKind::Cube => Primitive::Cube {
                center: [get("center_x")?, get("center_y")?, get("center_z")?],
                size: get("size")?,
            },
            PrimitiveKind::Cylinder => Primitive::Cylinder {
                start: [get("start_x")?, get("start_y")?, get("start_z")?],
                end: [get("end_x")?, get("end_y")?, get("end_z")?],
                radius: get("radius")?,
            },
        };
        primitive.validate()?;
        Ok(primitive)
    }

    /// Check value ranges: every value finite and representable as `f32`,
    /// positive size/radius, and an axis that survives the cast to `f32`.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let kind = self.kind();
        for field in kind.numeric_fields() {
            let value = self.field(field).unwrap_or(f64::NAN);
            if !value.is_finite() || value.abs() > f32::MAX as f64 {
                return Err(ParameterError::OutOfRange {
                    field: field.to_string(),
                    value,
                });
            }
        }

        match self {
            Primitive::Cube { size, .. } if *size as f32 <= 0.0 => Err(ParameterError::OutOfRange {
                field: "size".into(),
                value: *size,
            }),
            Primitive::Cylinder { radius, .. } if *radius as f32 <= 0.0 => {
                Err(ParameterError::OutOfRange {
                    field: "radius".into(),
                    value: *radius,
                })
            }
            Primitive::Cylinder { start, end, .. } if f32_distance(start, end) < f32::EPSILON => {
                Err(ParameterError::Degenerate(
                    "cylinder start and end coincide".into(),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Read a numeric field by name
    pub fn field(&self, name: &str) -> Option<f64> {
        match (self, name) {
            (Primitive::Cube { center, .. }, "center_x") => Some(center[0]),
            (Primitive::Cube { center, .. }, "center_y") => Some(center[1]),
            (Primitive::Cube { center, .. }, "center_z") => Some(center[2]),
            (Primitive::Cube { size, .. }, "size") => Some(*size),
            (Primitive::Cylinder { start, .. }, "start_x") => Some(start[0]),
            (Primitive::Cylinder { start, .. }, "start_y") => Some(start[1]),
            (Primitive::Cylinder { start, .. }, "start_z") => Some(start[2]),
            (Primitive::Cylinder { end, .. }, "end_x") => Some(end[0]),
            (Primitive::Cylinder { end, .. }, "end_y") => Some(end[1]),
            (Primitive::Cylinder { end, .. }, "end_z") => Some(end[2]),
            (Primitive::Cylinder { radius, .. }, "radius") => Some(*radius),
            _ => None,
        }
    }

    /// Write a numeric field by name. Returns false if the kind has no such field.
    pub fn set_field(&mut self, name: &str, value: f64) -> bool {
        let slot = match (self, name) {
            (Primitive::Cube { center, .. }, "center_x") => &mut center[0],
            (Primitive::Cube { center, .. }, "center_y") => &mut center[1],
            (Primitive::Cube { center, .. }, "center_z") => &mut center[2],
            (Primitive::Cube { size, .. }, "size") => size,
            (Primitive::Cylinder { start, .. }, "start_x") => &mut start[0],
            (Primitive::Cylinder { start, .. }, "start_y") => &mut start[1],
            (Primitive::Cylinder { start, .. }, "start_z") => &mut start[2],
            (Primitive::Cylinder { end, .. }, "end_x") => &mut end[0],
            (Primitive::Cylinder { end, .. }, "end_y") => &mut end[1],
            (Primitive::Cylinder { end, .. }, "end_z") => &mut end[2],
            (Primitive::Cylinder { radius, .. }, "radius") => radius,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// All numeric fields as a parameter map
    pub fn to_params(&self) -> ParamMap {
        self.kind()
            .numeric_fields()
            .iter()
            .filter_map(|f| self.field(f).map(|v| (f.to_string(), v)))
            .collect()
    }
}

/// Distance between two points after narrowing them to mesh precision
fn f32_distance(a: &[f64; 3], b: &[f64; 3]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(a, b)| *b as f32 - *a as f32)
        .map(|d| d * d)
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_params(size: f64) -> ParamMap {
        [
            ("center_x", 0.0),
            ("center_y", 0.0),
            ("center_z", 0.0),
            ("size", size),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn test_from_params_cube() {
        let p = Primitive::from_params(PrimitiveKind::Cube, &cube_params(2.0)).unwrap();
        assert_eq!(
            p,
            Primitive::Cube {
                center: [0.0, 0.0, 0.0],
                size: 2.0
            }
        );
    }

    #[test]
    fn test_from_params_missing_field() {
        let mut params = cube_params(1.0);
        params.remove("center_y");
        let err = Primitive::from_params(PrimitiveKind::Cube, &params).unwrap_err();
        assert_eq!(err, ParameterError::Missing("center_y".into()));
    }

    #[test]
    fn test_from_params_unknown_field() {
        let mut params = cube_params(1.0);
        params.insert("radius".into(), 1.0);
        let err = Primitive::from_params(PrimitiveKind::Cube, &params).unwrap_err();
        assert_eq!(err, ParameterError::Unknown("radius".into()));
    }

    #[test]
    fn test_negative_size_rejected() {
        let err = Primitive::from_params(PrimitiveKind::Cube, &cube_params(-1.0)).unwrap_err();
        assert!(matches!(err, ParameterError::OutOfRange { ref field, .. } if field == "size"));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let p = Primitive::Cylinder {
            start: [0.0; 3],
            end: [0.0, 0.0, 1.0],
            radius: -0.5,
        };
        assert!(matches!(
            p.validate(),
            Err(ParameterError::OutOfRange { ref field, .. }) if field == "radius"
        ));
    }

    #[test]
    fn test_zero_length_cylinder_rejected() {
        let p = Primitive::Cylinder {
            start: [1.0; 3],
            end: [1.0; 3],
            radius: 0.5,
        };
        assert!(matches!(p.validate(), Err(ParameterError::Degenerate(_))));
    }

    #[test]
    fn test_axis_below_f32_precision_rejected() {
        let p = Primitive::Cylinder {
            start: [0.0; 3],
            end: [0.0, 0.0, 1e-50],
            radius: 0.5,
        };
        assert!(matches!(p.validate(), Err(ParameterError::Degenerate(_))));

        let far = Primitive::Cylinder {
            start: [1e9, 0.0, 0.0],
            end: [1e9 + 1e-3, 0.0, 0.0],
            radius: 0.5,
        };
        assert!(matches!(far.validate(), Err(ParameterError::Degenerate(_))));
    }

    #[test]
    fn test_values_beyond_f32_range_rejected() {
        let p = Primitive::Cube {
            center: [0.0; 3],
            size: 1e300,
        };
        assert!(matches!(
            p.validate(),
            Err(ParameterError::OutOfRange { ref field, .. }) if field == "size"
        ));

        let tiny = Primitive::Cylinder {
            start: [0.0; 3],
            end: [0.0, 0.0, 1.0],
            radius: 1e-60,
        };
        assert!(matches!(
            tiny.validate(),
            Err(ParameterError::OutOfRange { ref field, .. }) if field == "radius"
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let p = Primitive::Cube {
            center: [f64::NAN, 0.0, 0.0],
            size: 1.0,
        };
        assert!(matches!(
            p.validate(),
            Err(ParameterError::OutOfRange { ref field, .. }) if field == "center_x"
        ));
    }

    #[test]
    fn test_set_field_wrong_kind() {
        let mut p = Primitive::Cube {
            center: [0.0; 3],
            size: 1.0,
        };
        assert!(!p.set_field("radius", 2.0));
        assert!(p.set_field("center_z", 4.0));
        assert_eq!(p.field("center_z"), Some(4.0));
    }

    #[test]
    fn test_to_params_feeds_from_params() {
        let p = Primitive::Cylinder {
            start: [0.0, 1.0, 2.0],
            end: [3.0, 4.0, 5.0],
            radius: 0.25,
        };
        let params = p.to_params();
        assert_eq!(params.len(), 7);
        assert_eq!(Primitive::from_params(PrimitiveKind::Cylinder, &params).unwrap(), p);
    }

    #[test]
    fn test_property_value_untagged() {
        let v: PropertyValue = serde_json::from_str("1.5").unwrap();
        assert_eq!(v, PropertyValue::Number(1.5));
        let v: PropertyValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, PropertyValue::Flag(true));
        let v: PropertyValue = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(v, PropertyValue::Text("abc".into()));
    }
}
