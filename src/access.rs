//! Composition root for navigation and permissions.
//!
//! `AccessControl` owns one validated navigation registry and one permission
//! table. The two halves never consult each other; this type only keeps them
//! together so the shell can pass a single immutable value (usually behind an
//! `Arc`) to every screen.

use crate::config::{AccessConfig, ConfigSource};
use crate::error::ConfigResult;
use crate::identity::{Action, NodeId, Resource, Role};
use crate::lint::{LintFinding, lint_navigation, lint_permissions};
use crate::navigation::{NavigationNode, NavigationRegistry};
use crate::permissions::PermissionTable;
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Clone, Debug)]
pub struct AccessControl {
    navigation: NavigationRegistry,
    permissions: PermissionTable,
}

impl AccessControl {
    /// Lint findings are left to the caller; see [`AccessControl::lint`].
    pub fn new(navigation: NavigationRegistry, permissions: PermissionTable) -> Self {
        Self {
            navigation,
            permissions,
        }
    }

    /// Build and validate both halves of a parsed document.
    pub fn from_config(config: AccessConfig) -> ConfigResult<Self> {
        let navigation = NavigationRegistry::new(config.navigation)?;
        let permissions = PermissionTable::new(config.permissions)?;
        Ok(Self::new(navigation, permissions))
    }

    /// The product's compiled-in configuration.
    pub fn builtin() -> Result<Self> {
        Self::from_source(&ConfigSource::Builtin)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_source(&ConfigSource::File(path.to_path_buf()))
    }

    pub fn from_source(source: &ConfigSource) -> Result<Self> {
        let config = source.load()?;
        Self::from_config(config)
            .with_context(|| format!("invalid access configuration ({})", source.describe()))
    }

    pub fn navigation(&self) -> &NavigationRegistry {
        &self.navigation
    }

    pub fn permissions(&self) -> &PermissionTable {
        &self.permissions
    }

    pub fn visible_sections(&self, role: &Role) -> Vec<NavigationNode> {
        self.navigation.visible_sections(role)
    }

    pub fn accessible_routes(&self, role: &Role) -> Vec<&str> {
        self.navigation.accessible_routes(role)
    }

    pub fn can_access_route(&self, role: &Role, path: &str) -> bool {
        self.navigation.can_access_route(role, path)
    }

    pub fn find_section(&self, id: &NodeId) -> Option<&NavigationNode> {
        self.navigation.find_section(id)
    }

    pub fn has_permission(&self, role: &Role, resource: &Resource, action: &Action) -> bool {
        self.permissions.has_permission(role, resource, action)
    }

    /// Navigation findings first, then permission findings.
    pub fn lint(&self) -> Vec<LintFinding> {
        let mut findings = lint_navigation(&self.navigation);
        findings.extend(lint_permissions(&self.permissions));
        findings
    }
}
