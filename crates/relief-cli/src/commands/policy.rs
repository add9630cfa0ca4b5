//! Policy table inspection.

use clap::{Args, Subcommand};

use relief_auth::PolicyEvaluator;
use relief_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for policy commands
#[derive(Debug, Args)]
pub struct PolicyArgs {
    /// Policy subcommand
    #[command(subcommand)]
    pub command: PolicyCommand,
}

/// Policy subcommands
#[derive(Debug, Subcommand)]
pub enum PolicyCommand {
    /// List every (resource, action) rule
    List,
}

/// Execute policy commands
pub fn execute(args: &PolicyArgs, format: OutputFormat) -> Result<(), AppError> {
    match args.command {
        PolicyCommand::List => {
            let policies = PolicyEvaluator::new().policies();
            match format {
                OutputFormat::Json => output::print_json(&policies)?,
                OutputFormat::Table => {
                    let rows: Vec<Vec<String>> = policies
                        .iter()
                        .map(|p| {
                            vec![
                                p.resource.to_string(),
                                p.action.to_string(),
                                p.roles
                                    .iter()
                                    .map(|r| r.as_str())
                                    .collect::<Vec<_>>()
                                    .join(","),
                                p.description.to_string(),
                            ]
                        })
                        .collect();
                    output::print_table(&["RESOURCE", "ACTION", "ROLES", "RULE"], &rows);
                }
            }
        }
    }
    Ok(())
}
