mod api;
mod browser;
mod cli;
mod command;
mod commands;
mod context;
mod error;
mod logging;
mod models;
mod output;
mod packager;
mod prompt;
mod resolver;
mod service;
mod session;
#[cfg(test)]
mod testing;

use anyhow::{Context as _, Result};
use clap::Parser;
use cli::Cli;

use crate::api::HttpConnector;
use crate::browser::SystemBrowser;
use crate::command::Command;
use crate::context::Context;
use crate::output::Stdout;
use crate::prompt::TerminalPrompt;
use crate::session::SessionStore;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.log);

    if let Err(e) = run(cli.command.into()).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<()> {
    let store = SessionStore::at_default_location()
        .context("Cannot determine where to keep the login session")?;
    let work_dir = std::env::current_dir().context("Cannot read the working directory")?;

    let ctx = Context {
        store: &store,
        connector: &HttpConnector,
        prompt: &TerminalPrompt,
        browser: &SystemBrowser,
        out: &Stdout,
        work_dir: &work_dir,
    };

    commands::execute(&ctx, command).await?;
    Ok(())
}
