//! Error taxonomy for registry, command and history operations.

use shared::{ObjectId, ParameterError, PrimitiveKind};
use thiserror::Error;

use crate::geometry::GeometryError;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    #[error("object already exists: {0}")]
    AlreadyExists(ObjectId),

    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),

    #[error("{kind} has no property '{name}'")]
    InvalidProperty { kind: PrimitiveKind, name: String },

    #[error("invalid value for '{name}': {value}")]
    InvalidValue { name: String, value: String },

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("command has not been executed")]
    NotExecuted,

    #[error("settings error: {0}")]
    Settings(String),
}
