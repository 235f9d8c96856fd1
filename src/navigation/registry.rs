//! Validated navigation tree plus role-scoped queries over it.
//!
//! Construction is strict: empty ids, empty role sets and duplicate sibling
//! ids are rejected so the shell never renders a half-configured menu. Once
//! built, the registry is read-only and every query is a pure walk of the
//! tree.

use crate::error::{ConfigError, ConfigResult};
use crate::identity::{NodeId, Role};
use crate::navigation::model::NavigationNode;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Clone, Debug)]
/// Ordered top-level sections and their descendants.
pub struct NavigationRegistry {
    sections: Vec<NavigationNode>,
}

impl NavigationRegistry {
    /// Validate the tree at every depth and take ownership of it.
    pub fn new(sections: Vec<NavigationNode>) -> ConfigResult<Self> {
        validate_level(&sections, None)?;
        let registry = Self { sections };
        debug!(
            sections = registry.sections.len(),
            nodes = registry.nodes().len(),
            "navigation registry built"
        );
        Ok(registry)
    }

    /// The configured tree, unfiltered.
    pub fn sections(&self) -> &[NavigationNode] {
        &self.sections
    }

    /// Sections visible to `role`, with children filtered by the same rule.
    ///
    /// Top-level and sibling order is preserved. A visible node keeps its
    /// place even when none of its children survive.
    pub fn visible_sections(&self, role: &Role) -> Vec<NavigationNode> {
        filter_visible(&self.sections, role)
    }

    /// Paths of every node visible to `role`, depth-first, parent first.
    ///
    /// The walk covers the unfiltered tree, so a child that names `role` is
    /// listed even when its parent does not. Paths are not deduplicated.
    pub fn accessible_routes(&self, role: &Role) -> Vec<&str> {
        self.nodes()
            .into_iter()
            .filter(|node| node.is_visible_to(role))
            .map(|node| node.path.as_str())
            .collect()
    }

    /// Route guard over the same inclusion rule as `accessible_routes`.
    pub fn can_access_route(&self, role: &Role, path: &str) -> bool {
        self.nodes()
            .into_iter()
            .any(|node| node.path == path && node.is_visible_to(role))
    }

    /// First node with `id` in pre-order, at any depth.
    ///
    /// Ids are only unique among siblings; the earliest match wins.
    pub fn find_section(&self, id: &NodeId) -> Option<&NavigationNode> {
        self.nodes().into_iter().find(|node| &node.id == id)
    }

    /// Every node in pre-order.
    pub fn nodes(&self) -> Vec<&NavigationNode> {
        let mut out = Vec::new();
        preorder(&self.sections, &mut out);
        out
    }
}

fn filter_visible(nodes: &[NavigationNode], role: &Role) -> Vec<NavigationNode> {
    nodes
        .iter()
        .filter(|node| node.is_visible_to(role))
        .map(|node| NavigationNode {
            children: filter_visible(&node.children, role),
            ..node.clone()
        })
        .collect()
}

fn preorder<'a>(nodes: &'a [NavigationNode], out: &mut Vec<&'a NavigationNode>) {
    for node in nodes {
        out.push(node);
        preorder(&node.children, out);
    }
}

fn validate_level(nodes: &[NavigationNode], parent: Option<&NodeId>) -> ConfigResult<()> {
    let parent_label = || match parent {
        Some(id) => format!("'{id}'"),
        None => "top level".to_string(),
    };

    let mut seen: BTreeSet<&NodeId> = BTreeSet::new();
    for node in nodes {
        if node.id.0.trim().is_empty() {
            return Err(ConfigError::EmptyId {
                parent: parent_label(),
            });
        }
        if node.allowed_roles.is_empty() {
            return Err(ConfigError::EmptyRoles {
                id: node.id.clone(),
            });
        }
        if !seen.insert(&node.id) {
            return Err(ConfigError::DuplicateId {
                id: node.id.clone(),
                parent: parent_label(),
            });
        }
        validate_level(&node.children, Some(&node.id))?;
    }
    Ok(())
}
