//! Query the access configuration from the command line.
//!
//! Prints the menu, the route list, or permission answers for a role as JSON
//! so shell scripts and fixtures can check what a role would see without
//! running the UI. Configuration comes from `--config`, then
//! `FINFLOW_ACCESS_CONFIG`, then the built-in document.

use anyhow::{Context, Result, bail};
use finflow_access::observability::init_tracing;
use finflow_access::{AccessControl, Action, ConfigSource, Resource, Role, split_list};
use serde_json::json;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::warn;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse(env::args_os().skip(1))?;
    let source = ConfigSource::resolve(cli.config.clone());
    let access = AccessControl::from_source(&source)?;
    for finding in access.lint() {
        warn!(%finding, "access configuration lint");
    }

    match &cli.command {
        QueryCommand::Sections { role } => {
            let sections = access.visible_sections(role);
            println!("{}", serde_json::to_string_pretty(&sections)?);
        }
        QueryCommand::Routes { role } => {
            let routes = access.accessible_routes(role);
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        QueryCommand::Check {
            roles,
            resource,
            action,
        } => {
            for role in roles {
                let record = json!({
                    "role": role,
                    "resource": resource,
                    "action": action,
                    "allowed": access.has_permission(role, resource, action),
                });
                println!("{}", serde_json::to_string(&record)?);
            }
        }
    }
    Ok(())
}

#[derive(Debug)]
struct Cli {
    config: Option<PathBuf>,
    command: QueryCommand,
}

#[derive(Debug, PartialEq)]
enum QueryCommand {
    Sections {
        role: Role,
    },
    Routes {
        role: Role,
    },
    Check {
        roles: Vec<Role>,
        resource: Resource,
        action: Action,
    },
}

impl Cli {
    fn parse(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut config: Option<PathBuf> = None;
        let mut subcommand: Option<String> = None;
        let mut role: Option<String> = None;
        let mut resource: Option<String> = None;
        let mut action: Option<String> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--config" => config = Some(PathBuf::from(next_value(&mut args, "--config")?)),
                "--role" => role = Some(next_value(&mut args, "--role")?),
                "--resource" => resource = Some(next_value(&mut args, "--resource")?),
                "--action" => action = Some(next_value(&mut args, "--action")?),
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                "sections" | "routes" | "check" if subcommand.is_none() => {
                    subcommand = Some(arg);
                }
                other => bail!("unknown argument: {other}\n{}", usage()),
            }
        }

        let Some(subcommand) = subcommand else {
            bail!("missing command\n{}", usage());
        };
        let role = role.context("--role is required")?;

        let command = match subcommand.as_str() {
            "sections" => QueryCommand::Sections {
                role: single_role(&role)?,
            },
            "routes" => QueryCommand::Routes {
                role: single_role(&role)?,
            },
            _ => {
                let roles: Vec<Role> = split_list(&role)
                    .iter()
                    .map(|tag| Role::from(tag.as_str()))
                    .collect();
                if roles.is_empty() {
                    bail!("--role must name at least one role");
                }
                QueryCommand::Check {
                    roles,
                    resource: Resource::from(
                        resource.context("check requires --resource")?.as_str(),
                    ),
                    action: Action::from(action.context("check requires --action")?.as_str()),
                }
            }
        };

        Ok(Cli { config, command })
    }
}

fn single_role(raw: &str) -> Result<Role> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains(',') {
        bail!("--role takes exactly one role for this command, got '{raw}'");
    }
    Ok(Role::from(trimmed))
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: access-query [--config PATH] <command> --role ROLE [options]\n\n\
Commands:\n  \
sections --role ROLE                              Print the role's filtered navigation tree.\n  \
routes   --role ROLE                              Print every route the role can reach.\n  \
check    --role ROLE[,ROLE...] --resource R --action A\n                                                    \
Print one permission answer per role (NDJSON).\n"
}
