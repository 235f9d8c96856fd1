//! Role-based navigation and permission resolution for the FinFlow shell.
//!
//! The crate owns two static, validated tables and answers pure queries over
//! them: which sections and routes a role may see (`NavigationRegistry`) and
//! whether a role may perform an action on a resource (`PermissionTable`).
//! `AccessControl` bundles both and is built once at startup from the
//! compiled-in document or from a JSON file checked against
//! `schema/access_config.schema.json`. Unknown roles, resources and actions
//! are never errors; they simply see nothing and may do nothing.
//!
//! Permission answers are advisory and meant for UI gating. Enforcement
//! belongs to the backend.

pub mod access;
pub mod config;
pub mod error;
pub mod identity;
pub mod lint;
pub mod navigation;
pub mod observability;
pub mod permissions;
mod schema_loader;

pub use access::AccessControl;
pub use config::{AccessConfig, CONFIG_ENV, ConfigSource};
pub use error::{ConfigError, ConfigResult};
pub use identity::{Action, IconKey, NodeId, Resource, Role, RoleSet};
pub use lint::{LintFinding, lint_navigation, lint_permissions};
pub use navigation::{NavigationNode, NavigationRegistry};
pub use permissions::{PermissionMap, PermissionTable};

/// Split comma- or whitespace-delimited lists (e.g. `--role pm,fa`) into
/// tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
