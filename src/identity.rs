use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Set of roles attached to a navigation node or a permission entry.
pub type RoleSet = BTreeSet<Role>;

/// Stable key of a navigation node, unique among its siblings.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

/// Opaque presentation handle for a node's icon.
///
/// The presentation layer maps the key to an asset; nothing in this crate
/// looks inside it.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconKey(pub String);

/// A user's function within the product.
///
/// The six named variants form the canonical role set. `Other` carries any
/// tag outside it (e.g. `vendor`) so lookups stay total: such a role only
/// matches tables that name it literally.
///
/// Equality, ordering and hashing go through the tag string, so
/// `Role::Other("owner".into())` is the same role as `Role::Owner`.
#[derive(Clone, Debug)]
pub enum Role {
    Pm,
    Fa,
    Reviewer,
    Admin,
    Client,
    Owner,
    Other(String),
}

/// Category of protected action (the resource half of a permission key).
#[derive(Clone, Debug)]
pub enum Resource {
    Deals,
    Clients,
    Users,
    Reports,
    Billing,
    Other(String),
}

/// Operation on a resource. Which actions apply depends on the resource and
/// is not cross-checked.
#[derive(Clone, Debug)]
pub enum Action {
    Create,
    Edit,
    Delete,
    View,
    Other(String),
}

impl Role {
    pub const CANONICAL: [Role; 6] = [
        Role::Pm,
        Role::Fa,
        Role::Reviewer,
        Role::Admin,
        Role::Client,
        Role::Owner,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Role::Pm => "pm",
            Role::Fa => "fa",
            Role::Reviewer => "reviewer",
            Role::Admin => "admin",
            Role::Client => "client",
            Role::Owner => "owner",
            Role::Other(value) => value.as_str(),
        }
    }

    pub fn is_canonical(&self) -> bool {
        Role::CANONICAL.contains(self)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "pm" => Role::Pm,
            "fa" => Role::Fa,
            "reviewer" => Role::Reviewer,
            "admin" => Role::Admin,
            "client" => Role::Client,
            "owner" => Role::Owner,
            other => Role::Other(other.to_string()),
        }
    }
}

impl Resource {
    pub const CANONICAL: [Resource; 5] = [
        Resource::Deals,
        Resource::Clients,
        Resource::Users,
        Resource::Reports,
        Resource::Billing,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Resource::Deals => "deals",
            Resource::Clients => "clients",
            Resource::Users => "users",
            Resource::Reports => "reports",
            Resource::Billing => "billing",
            Resource::Other(value) => value.as_str(),
        }
    }
}

impl From<&str> for Resource {
    fn from(value: &str) -> Self {
        match value {
            "deals" => Resource::Deals,
            "clients" => Resource::Clients,
            "users" => Resource::Users,
            "reports" => Resource::Reports,
            "billing" => Resource::Billing,
            other => Resource::Other(other.to_string()),
        }
    }
}

impl Action {
    pub const CANONICAL: [Action; 4] = [Action::Create, Action::Edit, Action::Delete, Action::View];

    pub fn as_str(&self) -> &str {
        match self {
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::View => "view",
            Action::Other(value) => value.as_str(),
        }
    }
}

impl From<&str> for Action {
    fn from(value: &str) -> Self {
        match value {
            "create" => Action::Create,
            "edit" => Action::Edit,
            "delete" => Action::Delete,
            "view" => Action::View,
            other => Action::Other(other.to_string()),
        }
    }
}

// Identity of a tag is its string form. Known tags keep their declaration
// order; everything else sorts after them by name.
macro_rules! tag_identity {
    ($tag:ident) => {
        impl $tag {
            fn identity_key(&self) -> (usize, &str) {
                let tag = self.as_str();
                let rank = $tag::CANONICAL
                    .iter()
                    .position(|known| known.as_str() == tag)
                    .unwrap_or($tag::CANONICAL.len());
                (rank, tag)
            }
        }

        impl PartialEq for $tag {
            fn eq(&self, other: &Self) -> bool {
                self.as_str() == other.as_str()
            }
        }

        impl Eq for $tag {}

        impl Ord for $tag {
            fn cmp(&self, other: &Self) -> Ordering {
                self.identity_key().cmp(&other.identity_key())
            }
        }

        impl PartialOrd for $tag {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Hash for $tag {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.as_str().hash(state);
            }
        }
    };
}

tag_identity!(Role);
tag_identity!(Resource);
tag_identity!(Action);

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from(value.as_str()))
    }
}

impl Serialize for Resource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from(value.as_str()))
    }
}

impl Serialize for Action {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from(value.as_str()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_known_and_unknown() {
        let known = Role::Reviewer;
        let json = serde_json::to_string(&known).unwrap();
        assert_eq!(json, "\"reviewer\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, known);

        let vendor: Role = serde_json::from_str("\"vendor\"").unwrap();
        assert_eq!(vendor, Role::Other("vendor".to_string()));
        assert!(!vendor.is_canonical());
        assert_eq!(serde_json::to_string(&vendor).unwrap(), "\"vendor\"");
    }

    #[test]
    fn from_str_normalizes_canonical_tags() {
        for role in Role::CANONICAL {
            assert_eq!(Role::from(role.as_str()), role);
            assert!(role.is_canonical());
        }
        assert_eq!(Resource::from("billing"), Resource::Billing);
        assert_eq!(
            Resource::from("payroll"),
            Resource::Other("payroll".to_string())
        );
        assert_eq!(Action::from("delete"), Action::Delete);
        assert_eq!(Action::from("export"), Action::Other("export".to_string()));
    }

    #[test]
    fn spelled_out_canonical_tags_are_the_same_tag() {
        use std::collections::HashSet;

        let spelled = Role::Other("owner".to_string());
        assert_eq!(spelled, Role::Owner);
        assert_eq!(spelled.cmp(&Role::Owner), Ordering::Equal);
        assert!(spelled.is_canonical());
        let set: HashSet<Role> = [Role::Owner, spelled].into_iter().collect();
        assert_eq!(set.len(), 1);

        let roles: RoleSet = [Role::Client, Role::Owner].into_iter().collect();
        assert!(roles.contains(&Role::Other("client".to_string())));
        assert!(!roles.contains(&Role::Other("vendor".to_string())));

        assert_eq!(Resource::Other("billing".to_string()), Resource::Billing);
        assert_eq!(Action::Other("edit".to_string()), Action::Edit);
        assert_ne!(Action::Other("export".to_string()), Action::Edit);
    }

    #[test]
    fn known_tags_sort_before_extended_ones() {
        let mut actions = vec![
            Action::from("approve"),
            Action::View,
            Action::Other("create".to_string()),
            Action::Delete,
        ];
        actions.sort();
        assert_eq!(
            actions,
            [
                Action::Create,
                Action::Delete,
                Action::View,
                Action::Other("approve".to_string())
            ]
        );
        assert!(Role::Owner < Role::from("client_owner"));
        assert!(Role::from("auditor") < Role::from("vendor"));
    }

    #[test]
    fn tags_work_as_json_map_keys() {
        let parsed: std::collections::BTreeMap<Resource, Vec<Action>> =
            serde_json::from_str(r#"{"deals":["view","approve"]}"#).unwrap();
        let actions = parsed.get(&Resource::Deals).expect("deals key");
        assert_eq!(
            actions,
            &vec![Action::View, Action::Other("approve".to_string())]
        );
        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"{"deals":["view","approve"]}"#);
    }

    #[test]
    fn node_id_and_icon_are_transparent() {
        let id = NodeId("billing-payment".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"billing-payment\"");
        let icon: IconKey = serde_json::from_str("\"credit-card\"").unwrap();
        assert_eq!(icon, IconKey("credit-card".to_string()));
        assert_eq!(id.to_string(), "billing-payment");
    }
}
