//! Command line for inspecting and editing the bot config file.

use std::env;

use anyhow::{Context, Result};
use bot_config::{ConfigEditor, ConfigFile, DEFAULT_CONFIG_PATH};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::handlers::config_command::{display_value, RESTART_NOTICE};

#[derive(Parser, Debug)]
#[command(name = "bot")]
#[command(about = "Chat bot config tool: view, edit and migrate the config file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file; defaults to $CONFIG, then config.toml.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// View or change config properties.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Upgrade the config file to the current schema version.
    Migrate,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print a property value, e.g. `openai.model`.
    Get { property: String },
    /// Change a property, e.g. `telegram.usernames +alice`.
    Set {
        property: String,
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Print the whole config as stored.
    Show,
}

impl Cli {
    pub fn config_file(&self) -> ConfigFile {
        let path = self
            .config
            .clone()
            .or_else(|| env::var("CONFIG").ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        ConfigFile::new(path)
    }
}

/// Runs a CLI command and returns the text to print.
pub fn run(cli: &Cli) -> Result<String> {
    let file = cli.config_file();
    let path = file.path().display().to_string();

    match &cli.command {
        Commands::Migrate => {
            let (_, changed) = file
                .migrate()
                .with_context(|| format!("Failed to migrate {path}"))?;
            Ok(if changed {
                format!("✓ Migrated {path} to the current schema")
            } else {
                format!("{path} is up to date")
            })
        }
        Commands::Config { action } => {
            let mut config = file.load().with_context(|| format!("Failed to load {path}"))?;
            let mut editor = ConfigEditor::new(&mut config, &file);
            match action {
                ConfigAction::Get { property } => {
                    Ok(display_value(editor.get_value(property)?.as_ref()))
                }
                ConfigAction::Set { property, value } => {
                    let value = value.join(" ");
                    let old = display_value(editor.get_value(property)?.as_ref());
                    let outcome = editor.set_value(property, &value)?;
                    if !outcome.changed {
                        return Ok(format!("✗ The `{property}` property already equals to `{value}`"));
                    }
                    editor.save()?;
                    info!(property = %property, "Config property changed from the command line");
                    let mut text = format!(
                        "✓ Changed the `{property}` property: `{old}` → `{}`",
                        display_value(outcome.value.as_ref())
                    );
                    if !outcome.immediate {
                        text.push('\n');
                        text.push_str(RESTART_NOTICE);
                    }
                    Ok(text)
                }
                ConfigAction::Show => {
                    let value = editor.config().to_value()?;
                    Ok(serde_json::to_string_pretty(&value)?)
                }
            }
        }
    }
}
