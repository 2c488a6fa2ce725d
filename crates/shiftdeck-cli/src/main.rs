//! Shiftdeck CLI - admin console for workforce time-clock data
//!
//! Lists entries and overlap conflicts, and drives the cut/split/delete
//! resolution flows with a preview-then-confirm step.

mod cli;
mod commands;
mod config_profiles;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands, ConfigCommands, ResolveCommands};
use crate::commands::completions::run_completions;
use crate::commands::config::{run_config_init, run_config_path, run_config_show};
use crate::commands::conflicts::run_conflicts;
use crate::commands::entries::{run_entries, EntriesArgs};
use crate::commands::resolve::{run_cut, run_delete, ResolveArgs};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shiftdeck=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Entries {
            from,
            to,
            user,
            shift,
            search,
            sort,
            desc,
            page,
            per_page,
            json,
        } => {
            run_entries(
                EntriesArgs {
                    from: &from,
                    to: &to,
                    user,
                    shift,
                    search,
                    sort,
                    desc,
                    page,
                    per_page,
                    as_json: json,
                },
                profile,
            )
            .await?;
        }
        Commands::Conflicts { from, to, json } => {
            run_conflicts(&from, &to, json, profile).await?;
        }
        Commands::Resolve { command } => match command {
            ResolveCommands::Cut {
                from,
                to,
                conflict,
                item,
                yes,
            } => {
                run_cut(
                    ResolveArgs {
                        from: &from,
                        to: &to,
                        conflict,
                        item,
                        assume_yes: yes,
                    },
                    profile,
                )
                .await?;
            }
            ResolveCommands::Delete {
                from,
                to,
                conflict,
                item,
                yes,
            } => {
                run_delete(
                    ResolveArgs {
                        from: &from,
                        to: &to,
                        conflict,
                        item: Some(item),
                        assume_yes: yes,
                    },
                    profile,
                )
                .await?;
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Init {
                api_base_url,
                access_token,
                user_id,
            } => run_config_init(profile, api_base_url, access_token, user_id)?,
            ConfigCommands::Show => run_config_show(profile)?,
            ConfigCommands::Path => run_config_path()?,
        },
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
