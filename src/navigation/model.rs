//! Serializable shape of one navigation section.
//!
//! The same struct is used for the configured tree and for the role-filtered
//! copies handed to the presentation layer, so a filtered menu serializes
//! exactly like the configuration it came from.

use crate::identity::{IconKey, NodeId, Role, RoleSet};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// One addressable section of the application.
pub struct NavigationNode {
    pub id: NodeId,
    pub label: String,
    pub path: String,
    pub icon: IconKey,
    pub allowed_roles: RoleSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_count: Option<u32>,
    #[serde(default)]
    pub children: Vec<NavigationNode>,
}

impl NavigationNode {
    pub fn new(id: &str, label: &str, path: &str, icon: &str, roles: &[Role]) -> Self {
        Self {
            id: NodeId(id.to_string()),
            label: label.to_string(),
            path: path.to_string(),
            icon: IconKey(icon.to_string()),
            allowed_roles: roles.iter().cloned().collect(),
            badge_count: None,
            children: Vec::new(),
        }
    }

    pub fn with_badge(mut self, count: u32) -> Self {
        self.badge_count = Some(count);
        self
    }

    pub fn with_children(mut self, children: Vec<NavigationNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether `role` may see this node. Children are not consulted.
    pub fn is_visible_to(&self, role: &Role) -> bool {
        self.allowed_roles.contains(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_deserializes_with_defaults() {
        let node: NavigationNode = serde_json::from_value(json!({
            "id": "chat",
            "label": "Messages",
            "path": "/chat",
            "icon": "message-square",
            "allowed_roles": ["pm", "client", "vendor"]
        }))
        .unwrap();
        assert!(node.children.is_empty());
        assert_eq!(node.badge_count, None);
        assert!(node.is_visible_to(&Role::Client));
        assert!(node.is_visible_to(&Role::Other("vendor".to_string())));
        assert!(!node.is_visible_to(&Role::Owner));
    }

    #[test]
    fn badge_is_omitted_when_absent() {
        let plain = NavigationNode::new("files", "Files", "/files", "folder", &[Role::Pm]);
        let value = serde_json::to_value(&plain).unwrap();
        assert!(value.get("badge_count").is_none());

        let badged = plain.with_badge(5);
        let value = serde_json::to_value(&badged).unwrap();
        assert_eq!(value.get("badge_count").and_then(|v| v.as_u64()), Some(5));
    }
}
