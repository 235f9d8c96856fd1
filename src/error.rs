use crate::identity::{Action, NodeId, Resource};
use thiserror::Error;

/// Malformed static navigation or permission data.
///
/// Raised only while building a registry or permission table; a value that
/// fails construction is never handed out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("navigation node under {parent} has an empty id")]
    EmptyId { parent: String },
    #[error("navigation node '{id}' has no allowed roles")]
    EmptyRoles { id: NodeId },
    #[error("duplicate navigation id '{id}' under {parent}")]
    DuplicateId { id: NodeId, parent: String },
    #[error("permission {resource}.{action} lists no roles")]
    EmptyPermission { resource: Resource, action: Action },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
