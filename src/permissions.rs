//! Advisory (resource, action) -> roles table.
//!
//! Answers "may this role do that" for UI gating. It is not a security
//! boundary: whatever the table says, the backend has to enforce the same rule
//! on its own.

use crate::error::{ConfigError, ConfigResult};
use crate::identity::{Action, Resource, Role, RoleSet};
use std::collections::BTreeMap;
use tracing::debug;

/// Raw table shape as it appears in configuration documents.
pub type PermissionMap = BTreeMap<Resource, BTreeMap<Action, RoleSet>>;

/// Validated permission table. Pairs that are not listed deny everyone.
#[derive(Clone, Debug)]
pub struct PermissionTable {
    entries: PermissionMap,
}

impl PermissionTable {
    /// Build a table, rejecting listed pairs that name no role.
    pub fn new(entries: PermissionMap) -> ConfigResult<Self> {
        for (resource, actions) in &entries {
            for (action, roles) in actions {
                if roles.is_empty() {
                    return Err(ConfigError::EmptyPermission {
                        resource: resource.clone(),
                        action: action.clone(),
                    });
                }
            }
        }
        debug!(resources = entries.len(), "permission table built");
        Ok(Self { entries })
    }

    /// Whether `role` may perform `action` on `resource`.
    ///
    /// Unknown resources and actions deny rather than fail.
    pub fn has_permission(&self, role: &Role, resource: &Resource, action: &Action) -> bool {
        self.allowed_roles(resource, action)
            .is_some_and(|roles| roles.contains(role))
    }

    pub fn allowed_roles(&self, resource: &Resource, action: &Action) -> Option<&RoleSet> {
        self.entries.get(resource)?.get(action)
    }

    /// Actions `role` may take on `resource`, in stable order.
    pub fn permitted_actions(&self, role: &Role, resource: &Resource) -> Vec<&Action> {
        self.entries
            .get(resource)
            .map(|actions| {
                actions
                    .iter()
                    .filter(|(_, roles)| roles.contains(role))
                    .map(|(action, _)| action)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn entries(&self) -> &PermissionMap {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> PermissionTable {
        let entries: PermissionMap = serde_json::from_value(json!({
            "clients": {
                "create": ["admin", "owner"],
                "edit": ["pm", "admin", "owner"],
                "delete": ["owner"],
                "view": ["pm", "admin", "owner"]
            },
            "billing": {
                "view": ["admin", "owner", "client"],
                "edit": ["owner"]
            }
        }))
        .unwrap();
        PermissionTable::new(entries).expect("valid table")
    }

    #[test]
    fn billing_edit_is_owner_only() {
        let table = table();
        assert!(!table.has_permission(&Role::Client, &Resource::Billing, &Action::Edit));
        assert!(table.has_permission(&Role::Owner, &Resource::Billing, &Action::Edit));
        assert!(table.has_permission(&Role::Client, &Resource::Billing, &Action::View));
    }

    #[test]
    fn missing_entries_deny_without_error() {
        let table = table();
        assert!(!table.has_permission(&Role::Pm, &Resource::Clients, &Action::Delete));
        assert!(!table.has_permission(
            &Role::from("anything"),
            &Resource::from("nonexistent-resource"),
            &Action::View
        ));
        assert!(!table.has_permission(&Role::Owner, &Resource::Billing, &Action::Delete));
        assert!(!table.has_permission(&Role::Owner, &Resource::Deals, &Action::View));
        assert!(table.allowed_roles(&Resource::Billing, &Action::Create).is_none());
    }

    #[test]
    fn spelled_out_tags_resolve_like_variants() {
        let table = table();
        let owner = Role::Other("owner".to_string());
        let billing = Resource::Other("billing".to_string());
        let edit = Action::Other("edit".to_string());
        assert!(table.has_permission(&owner, &Resource::Billing, &Action::Edit));
        assert!(table.has_permission(&Role::Owner, &billing, &edit));
        assert!(!table.has_permission(&Role::Other("client".to_string()), &billing, &edit));
        assert_eq!(
            table.permitted_actions(&owner, &billing),
            [&Action::Edit, &Action::View]
        );
    }

    #[test]
    fn has_permission_is_total_over_known_tags() {
        let table = table();
        let roles = Role::CANONICAL
            .into_iter()
            .chain([Role::from("vendor")])
            .collect::<Vec<_>>();
        let resources = [
            Resource::Deals,
            Resource::Clients,
            Resource::Users,
            Resource::Reports,
            Resource::Billing,
            Resource::from("payroll"),
        ];
        let actions = [
            Action::Create,
            Action::Edit,
            Action::Delete,
            Action::View,
            Action::from("export"),
        ];
        for role in &roles {
            for resource in &resources {
                for action in &actions {
                    let expected = table
                        .allowed_roles(resource, action)
                        .is_some_and(|set| set.contains(role));
                    assert_eq!(table.has_permission(role, resource, action), expected);
                }
            }
        }
    }

    #[test]
    fn permitted_actions_follow_action_order() {
        let table = table();
        let actions = table.permitted_actions(&Role::Pm, &Resource::Clients);
        assert_eq!(actions, [&Action::Edit, &Action::View]);
        assert!(table.permitted_actions(&Role::Client, &Resource::Clients).is_empty());
        assert!(
            table
                .permitted_actions(&Role::Owner, &Resource::from("payroll"))
                .is_empty()
        );
    }

    #[test]
    fn rejects_empty_role_set() {
        let entries: PermissionMap =
            serde_json::from_value(json!({"reports": {"view": []}})).unwrap();
        let err = PermissionTable::new(entries).expect_err("empty set must fail");
        assert_eq!(
            err,
            ConfigError::EmptyPermission {
                resource: Resource::Reports,
                action: Action::View
            }
        );
    }
}
