//! Validate access configuration documents.
//!
//! Each document is schema-checked, built into a registry and permission
//! table, and linted. Configuration errors always fail the run; lint findings
//! only fail it under `--strict`. With no paths the built-in document is
//! checked. `--json` prints one record per document instead of text lines.

use anyhow::{Result, bail};
use finflow_access::observability::init_tracing;
use finflow_access::{AccessControl, ConfigSource, LintFinding};
use serde_json::json;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

fn main() {
    init_tracing();
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

/// Returns false when any document fails.
fn run() -> Result<bool> {
    let args = LintArgs::parse(env::args_os().skip(1))?;
    let sources: Vec<ConfigSource> = if args.paths.is_empty() {
        vec![ConfigSource::Builtin]
    } else {
        args.paths.iter().cloned().map(ConfigSource::File).collect()
    };

    let mut clean = true;
    for source in &sources {
        let label = source.describe();
        let built = source
            .load()
            .and_then(|config| AccessControl::from_config(config).map_err(anyhow::Error::from));
        let access = match built {
            Ok(access) => access,
            Err(err) => {
                if args.json {
                    let record = json!({"source": label, "error": format!("{err:#}")});
                    println!("{}", serde_json::to_string(&record)?);
                } else {
                    println!("{label}: error: {err:#}");
                }
                clean = false;
                continue;
            }
        };

        let findings = access.lint();
        if args.strict && !findings.is_empty() {
            clean = false;
        }
        if args.json {
            print_json(&label, &findings)?;
        } else {
            print_text(&label, &findings);
        }
    }
    Ok(clean)
}

fn print_text(label: &str, findings: &[LintFinding]) {
    for finding in findings {
        println!("{label}: warning: {finding}");
    }
    if findings.is_empty() {
        println!("{label}: ok");
    }
}

fn print_json(label: &str, findings: &[LintFinding]) -> Result<()> {
    let record = json!({"source": label, "findings": findings});
    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}

struct LintArgs {
    strict: bool,
    json: bool,
    paths: Vec<PathBuf>,
}

impl LintArgs {
    fn parse(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut strict = false;
        let mut json = false;
        let mut paths = Vec::new();
        for arg in args {
            match arg.to_str() {
                Some("--strict") => strict = true,
                Some("--json") => json = true,
                Some("--help") | Some("-h") => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                Some(flag) if flag.starts_with("--") => {
                    bail!("unknown flag: {flag}\n{}", usage())
                }
                _ => paths.push(PathBuf::from(&arg)),
            }
        }
        Ok(Self {
            strict,
            json,
            paths,
        })
    }
}

fn usage() -> &'static str {
    "Usage: access-lint [--strict] [--json] [PATH...]\n\
Validates access configuration documents (default: the built-in one). Configuration errors exit 1; \
lint warnings exit 1 only with --strict. --json prints one record per document.\n"
}
