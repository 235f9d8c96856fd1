//! JSON Schema loading for configuration documents.
//!
//! Schemas ship inside the crate; this module compiles them once per call,
//! pulls the `schema_version` const they pin, and turns validation failures
//! into a single readable error listing every violation.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;

/// Compiled schema plus the version it pins.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// Controls how a schema is normalized before compilation.
pub(crate) struct SchemaLoadOptions<'a> {
    /// Where to find the schema_version const inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
}

impl Default for SchemaLoadOptions<'_> {
    fn default() -> Self {
        Self {
            schema_version_pointer: "/properties/schema_version/const",
            allowed_versions: None,
        }
    }
}

pub(crate) fn load_json_schema(
    label: &str,
    raw: &str,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let schema: Value =
        serde_json::from_str(raw).with_context(|| format!("parsing schema {label}"))?;

    let schema_version = extract_schema_version(&schema, options.schema_version_pointer)
        .ok_or_else(|| anyhow!("schema {label} missing schema_version const"))?;

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling schema {label}: {err}"))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

impl SchemaLoadResult {
    /// Validate `instance`, reporting every violation at once.
    pub fn validate(&self, instance: &Value, subject: &str) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{subject} failed schema validation:\n{details}");
        }
        Ok(())
    }
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
