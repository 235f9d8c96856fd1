use anyhow::{Context, Result, bail};
use finflow_access::{AccessControl, CONFIG_ENV};
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

pub fn builtin() -> AccessControl {
    AccessControl::builtin().expect("built-in configuration must load")
}

pub fn access_query() -> Command {
    helper_command(env!("CARGO_BIN_EXE_access-query"))
}

pub fn access_lint() -> Command {
    helper_command(env!("CARGO_BIN_EXE_access-lint"))
}

// Keep the caller's environment from pointing helpers at another document.
fn helper_command(path: &str) -> Command {
    let mut cmd = Command::new(PathBuf::from(path));
    cmd.env_remove(CONFIG_ENV);
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn write_config(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate config file")?;
    serde_json::to_writer(&mut file, value)?;
    file.flush()?;
    Ok(file)
}
