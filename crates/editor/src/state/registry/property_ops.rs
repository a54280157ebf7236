//! Property editing

use shared::PropertyValue;

use super::SceneRegistry;
use crate::error::{EditorError, EditorResult};
use crate::geometry::GeometryBackend;

impl<G: GeometryBackend> SceneRegistry<G> {
    /// Update one property of an object and rebuild its mesh.
    ///
    /// Numeric fields accept numbers or numeric strings. `name` is stored
    /// verbatim and `visible` accepts a flag or `"true"`/`"false"`.
    pub fn update_property(
        &mut self,
        id: &str,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> EditorResult<()> {
        let value = value.into();
        let index = self.index_of(id)?;
        let object = &self.objects[index];
        let kind = object.kind();

        let invalid = || EditorError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };

        let mut primitive = object.primitive.clone();
        let mut label = object.name.clone();
        let mut visible = object.visible;

        match name {
            "name" => label = value.to_string(),
            "visible" => {
                visible = match &value {
                    PropertyValue::Flag(b) => *b,
                    PropertyValue::Text(s) => s.trim().parse().map_err(|_| invalid())?,
                    PropertyValue::Number(_) => return Err(invalid()),
                }
            }
            field if kind.numeric_fields().contains(&field) => {
                let number = match &value {
                    PropertyValue::Number(v) => *v,
                    PropertyValue::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
                    PropertyValue::Flag(_) => return Err(invalid()),
                };
                primitive.set_field(field, number);
                primitive.validate().map_err(|_| invalid())?;
            }
            _ => {
                return Err(EditorError::InvalidProperty {
                    kind,
                    name: name.to_string(),
                })
            }
        }

        let mesh = self.geometry.rebuild_mesh(object.mesh, &primitive)?;

        let object = &mut self.objects[index];
        object.primitive = primitive;
        object.name = label;
        object.visible = visible;
        object.mesh = mesh;
        self.version += 1;
        tracing::debug!("Set {name} = {value} on {id}");
        self.notify(Some(id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use shared::Primitive;

    use super::*;
    use crate::fixtures::{unit_cube, z_cylinder, FlakyBackend, RecordingBinder};

    #[test]
    fn test_numeric_string_coerced() {
        let mut r = SceneRegistry::default();
        let id = r.create(unit_cube()).unwrap();
        r.update_property(&id, "size", "2.5").unwrap();
        assert_eq!(r.get(&id).unwrap().primitive.field("size"), Some(2.5));
        // create + rebuild
        assert_eq!(r.geometry().build_count(), 2);
    }

    #[test]
    fn test_number_value() {
        let mut r = SceneRegistry::default();
        let id = r.create(z_cylinder()).unwrap();
        r.update_property(&id, "end_z", 3.0).unwrap();
        assert_eq!(r.get(&id).unwrap().primitive.axis_length(), 3.0);
    }

    #[test]
    fn test_non_numeric_input_is_invalid_value() {
        let mut r = SceneRegistry::default();
        let id = r.create(unit_cube()).unwrap();
        let err = r.update_property(&id, "size", "big").unwrap_err();
        assert!(matches!(err, EditorError::InvalidValue { ref name, .. } if name == "size"));
        assert_eq!(r.get(&id).unwrap().primitive, unit_cube());
    }

    #[test]
    fn test_out_of_range_is_invalid_value() {
        let mut r = SceneRegistry::default();
        let id = r.create(z_cylinder()).unwrap();
        assert!(matches!(
            r.update_property(&id, "radius", -1.0),
            Err(EditorError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unknown_property_for_kind() {
        let mut r = SceneRegistry::default();
        let id = r.create(unit_cube()).unwrap();
        let err = r.update_property(&id, "radius", 1.0).unwrap_err();
        assert!(matches!(err, EditorError::InvalidProperty { ref name, .. } if name == "radius"));
    }

    #[test]
    fn test_unknown_object() {
        let mut r = SceneRegistry::default();
        assert!(matches!(
            r.update_property("missing", "size", 1.0),
            Err(EditorError::NotFound(_))
        ));
    }

    #[test]
    fn test_name_set_verbatim() {
        let mut r = SceneRegistry::default();
        let id = r.create(unit_cube()).unwrap();
        r.update_property(&id, "name", "  Base plate ").unwrap();
        assert_eq!(r.get(&id).unwrap().name, "  Base plate ");
    }

    #[test]
    fn test_visible_flag() {
        let mut r = SceneRegistry::default();
        let id = r.create(unit_cube()).unwrap();
        r.update_property(&id, "visible", false).unwrap();
        assert!(!r.get(&id).unwrap().visible);
        r.update_property(&id, "visible", "true").unwrap();
        assert!(r.get(&id).unwrap().visible);
        assert!(r.update_property(&id, "visible", "maybe").is_err());
    }

    #[test]
    fn test_update_notifies_binder() {
        let rec = RecordingBinder::new();
        let mut r = SceneRegistry::default();
        let id = r.create(unit_cube()).unwrap();
        r.set_binder(rec.binder());
        r.update_property(&id, "center_x", 4.0).unwrap();
        let last = rec.last().flatten().unwrap();
        assert_eq!(last.primitive.field("center_x"), Some(4.0));
    }

    #[test]
    fn test_rebuild_failure_leaves_object_unchanged() {
        let mut r = SceneRegistry::new(FlakyBackend::default());
        let id = r.create(unit_cube()).unwrap();
        let version = r.version();
        r.geometry_mut().fail_rebuild = true;
        assert!(matches!(
            r.update_property(&id, "size", 9.0),
            Err(EditorError::Geometry(_))
        ));
        assert_eq!(r.get(&id).unwrap().primitive, unit_cube());
        assert_eq!(r.version(), version);
        assert!(matches!(r.get(&id).unwrap().primitive, Primitive::Cube { .. }));
    }
}
