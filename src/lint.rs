//! Non-fatal consistency checks over a built configuration.
//!
//! Findings never block startup. They flag the two known soft spots of the
//! model: children that admit roles their parent hides, and role tags outside
//! the canonical set (which only match tables that spell them out).

use crate::identity::{Action, NodeId, Resource, Role};
use crate::navigation::{NavigationNode, NavigationRegistry};
use crate::permissions::PermissionTable;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LintFinding {
    ChildWiderThanParent {
        parent: NodeId,
        child: NodeId,
        roles: Vec<Role>,
    },
    UnknownNavigationRole {
        node: NodeId,
        role: Role,
    },
    UnknownPermissionRole {
        resource: Resource,
        action: Action,
        role: Role,
    },
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintFinding::ChildWiderThanParent {
                parent,
                child,
                roles,
            } => {
                let roles = roles.iter().map(Role::as_str).collect::<Vec<_>>().join(", ");
                write!(
                    f,
                    "'{child}' admits [{roles}] which its parent '{parent}' does not"
                )
            }
            LintFinding::UnknownNavigationRole { node, role } => {
                write!(f, "'{node}' names non-canonical role '{role}'")
            }
            LintFinding::UnknownPermissionRole {
                resource,
                action,
                role,
            } => write!(
                f,
                "permission {resource}.{action} names non-canonical role '{role}'"
            ),
        }
    }
}

pub fn lint_navigation(registry: &NavigationRegistry) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    for node in registry.nodes() {
        for role in node.allowed_roles.iter().filter(|role| !role.is_canonical()) {
            findings.push(LintFinding::UnknownNavigationRole {
                node: node.id.clone(),
                role: role.clone(),
            });
        }
    }
    for section in registry.sections() {
        check_children(section, &mut findings);
    }
    findings
}

fn check_children(parent: &NavigationNode, findings: &mut Vec<LintFinding>) {
    for child in &parent.children {
        let extra: Vec<Role> = child
            .allowed_roles
            .difference(&parent.allowed_roles)
            .cloned()
            .collect();
        if !extra.is_empty() {
            findings.push(LintFinding::ChildWiderThanParent {
                parent: parent.id.clone(),
                child: child.id.clone(),
                roles: extra,
            });
        }
        check_children(child, findings);
    }
}

pub fn lint_permissions(table: &PermissionTable) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    for (resource, actions) in table.entries() {
        for (action, roles) in actions {
            for role in roles.iter().filter(|role| !role.is_canonical()) {
                findings.push(LintFinding::UnknownPermissionRole {
                    resource: resource.clone(),
                    action: action.clone(),
                    role: role.clone(),
                });
            }
        }
    }
    findings
}
