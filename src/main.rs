use std::path::Path;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use pbi_chat_cli::cli::args::{Cli, Commands, ConfigAction};
use pbi_chat_cli::cli::commands;
use pbi_chat_cli::config::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let explicit = cli.runtime.config.as_deref().map(Path::new);
    let mut settings = Settings::load_with(explicit)?;

    match &cli.command {
        Some(Commands::Interactive) => {
            commands::handle_interactive(&settings, &cli.runtime).await?
        }
        Some(Commands::Ask) => {
            let prompt = if !cli.prompt.is_empty() {
                Some(cli.prompt.join(" "))
            } else {
                None
            };
            commands::handle_ask(&settings, prompt, &cli.runtime, &cli.io).await?
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Status => {
                commands::handle_config_status(&settings, &cli.runtime).await?
            }
            ConfigAction::Init { force } => commands::handle_config_init(*force).await?,
            ConfigAction::List => commands::handle_config_list(&settings).await?,
            ConfigAction::Set { key, value } => {
                commands::handle_config_set(&mut settings, key, value, explicit).await?
            }
        },
        Some(Commands::Schema) => commands::handle_schema(&settings, &cli.runtime).await?,
        None => {
            if !cli.prompt.is_empty() {
                let prompt = cli.prompt.join(" ");
                commands::handle_ask(&settings, Some(prompt), &cli.runtime, &cli.io).await?
            } else {
                // No command and no prompt: show help
                Cli::command().print_help()?;
                println!();
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
