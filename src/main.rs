//! aclgraph - inspect an authorization graph from the command line
//!
//! Loads a configuration (and its seed graph) and answers role and
//! permission questions for a user.

#![allow(missing_docs)]

use aclgraph::utils::logging::init_tracing;
use aclgraph::{AccessControlList, Config, SecurityService};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ACLGRAPH_GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "aclgraph", version = VERSION, about = "Role-based access-control inspector")]
struct Cli {
    /// Path to configuration file. Without one, ACLGRAPH_* variables are used.
    #[arg(short, long, env = "ACLGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask whether a user holds a role or permission. Exits 1 when denied.
    Check(CheckArgs),
    /// Print a user's groups, roles and permissions
    Show {
        #[arg(short, long)]
        user: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[arg(short, long)]
    user: String,
    #[arg(short, long, conflicts_with = "permission", required_unless_present = "permission")]
    role: Option<String>,
    #[arg(short, long)]
    permission: Option<String>,
    /// Restrict the check to one group
    #[arg(short, long)]
    group: Option<String>,
}

#[derive(Serialize)]
struct UserReport {
    user: String,
    model: String,
    groups: Vec<String>,
    roles: Option<Vec<String>>,
    permissions: Option<Vec<String>>,
}

impl UserReport {
    fn from_acl(acl: &dyn AccessControlList) -> Result<Self> {
        Ok(Self {
            user: acl.user().name.clone(),
            model: acl.model().to_string(),
            groups: acl.groups().names(),
            roles: unless_unsupported(acl.roles())?.map(|roles| roles.names()),
            permissions: unless_unsupported(acl.permissions())?
                .map(|permissions| permissions.names()),
        })
    }

    fn print_text(&self) {
        println!("user:        {}", self.user);
        println!("model:       {}", self.model);
        println!("groups:      {}", self.groups.join(", "));
        if let Some(roles) = &self.roles {
            println!("roles:       {}", roles.join(", "));
        }
        if let Some(permissions) = &self.permissions {
            println!("permissions: {}", permissions.join(", "));
        }
    }
}

/// `None` when the model has no roles or permissions to report
fn unless_unsupported<T>(result: aclgraph::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_access_control() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Config::from_env().context("Failed to load configuration from environment"),
    }
}

fn check(service: &SecurityService, args: &CheckArgs) -> Result<bool> {
    let acl = service.access_control_list_for(&args.user)?;
    let allowed = match (&args.role, &args.permission, &args.group) {
        (Some(role), _, Some(group)) => acl.has_role_in(role, group)?,
        (Some(role), _, None) => acl.has_role(role)?,
        (None, Some(permission), Some(group)) => acl.has_permission_in(permission, group)?,
        (None, Some(permission), None) => acl.has_permission(permission)?,
        (None, None, _) => anyhow::bail!("Either --role or --permission is required"),
    };
    Ok(allowed)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_ref())?;
    let service = SecurityService::from_config(&config)?;

    match cli.command {
        Command::Check(args) => {
            let allowed = check(&service, &args)?;
            println!("{}", if allowed { "allowed" } else { "denied" });
            Ok(if allowed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Command::Show { user, json } => {
            let acl = service.access_control_list_for(&user)?;
            let report = UserReport::from_acl(acl.as_ref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.print_text();
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing("warn", cli.json_logs) {
        eprintln!("Error: {}", e);
        return ExitCode::from(2);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
