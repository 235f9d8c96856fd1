//! Access configuration documents.
//!
//! A document bundles the navigation tree and the permission table under a
//! pinned `schema_version`. Documents are checked against the bundled JSON
//! Schema before deserialization so shape errors point at the offending
//! field; semantic checks (empty role sets, duplicate ids) happen when the
//! registry and table are built from the result.

use crate::navigation::NavigationNode;
use crate::permissions::PermissionMap;
use crate::schema_loader::{SchemaLoadOptions, SchemaLoadResult, load_json_schema};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an alternate configuration document.
pub const CONFIG_ENV: &str = "FINFLOW_ACCESS_CONFIG";

const CONFIG_SCHEMA: &str = include_str!("../schema/access_config.schema.json");
const BUILTIN_CONFIG: &str = include_str!("../schema/finflow_access.json");

// Only one document layout exists so far; anything else is rejected rather
// than half-understood.
const DEFAULT_SCHEMA_VERSION: &str = "finflow_access_v1";

#[derive(Clone, Debug, Deserialize)]
/// Navigation tree plus permission table as stored on disk.
pub struct AccessConfig {
    pub schema_version: String,
    pub navigation: Vec<NavigationNode>,
    pub permissions: PermissionMap,
}

impl AccessConfig {
    /// The product's compiled-in configuration.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CONFIG, "built-in access config")
    }

    /// Read, schema-check and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json_str(&data, &path.display().to_string())
    }

    pub fn from_json_str(data: &str, source: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(data).with_context(|| format!("parsing {source}"))?;
        Self::from_value(value, source)
    }

    pub fn from_value(value: Value, source: &str) -> Result<Self> {
        let schema = config_schema()?;
        schema.validate(&value, source)?;
        let config: AccessConfig =
            serde_json::from_value(value).with_context(|| format!("decoding {source}"))?;
        if config.schema_version != schema.schema_version {
            bail!(
                "{source} declares schema_version '{}', expected '{}'",
                config.schema_version,
                schema.schema_version
            );
        }
        Ok(config)
    }
}

fn config_schema() -> Result<SchemaLoadResult> {
    let allowed = BTreeSet::from([DEFAULT_SCHEMA_VERSION.to_string()]);
    load_json_schema(
        "access_config.schema.json",
        CONFIG_SCHEMA,
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            ..Default::default()
        },
    )
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where a caller's configuration comes from.
pub enum ConfigSource {
    Builtin,
    File(PathBuf),
}

impl ConfigSource {
    /// Explicit path first, then `FINFLOW_ACCESS_CONFIG`, then the built-in
    /// document.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        resolve_source(explicit, env::var_os(CONFIG_ENV))
    }

    pub fn load(&self) -> Result<AccessConfig> {
        match self {
            ConfigSource::Builtin => AccessConfig::builtin(),
            ConfigSource::File(path) => AccessConfig::load(path),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ConfigSource::Builtin => "built-in".to_string(),
            ConfigSource::File(path) => path.display().to_string(),
        }
    }
}

fn resolve_source(explicit: Option<PathBuf>, from_env: Option<OsString>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::File(path);
    }
    match from_env {
        Some(value) if !value.is_empty() => ConfigSource::File(PathBuf::from(value)),
        _ => ConfigSource::Builtin,
    }
}
