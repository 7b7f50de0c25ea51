//! `bot`: config file tool for the chat bot.

use std::env;

use anyhow::Result;
use clap::Parser;
use telegram_bot::cli::{run, Cli};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    match env::var("LOG_FILE") {
        Ok(path) if !path.is_empty() => bot_core::init_tracing(&path)?,
        _ => bot_core::init_console_tracing()?,
    }

    let cli = Cli::parse();
    println!("{}", run(&cli)?);
    Ok(())
}
