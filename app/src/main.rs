use std::io;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use clap::Parser;
use employee_app::cli::CommandLineArgs;
use employee_app::shell::remote_factory;
use employee_app::{repl, TerminalPrompt, ViewShell};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = CommandLineArgs::parse();
    init_tracing(args.default_log_filter())?;

    let mut shell = ViewShell::new(
        remote_factory(args.client_config()),
        Rc::new(TerminalPrompt),
        args.variant,
    )?;

    repl::run(&mut shell, io::stdin().lock(), io::stdout().lock())
}

/// Logs go to stderr so they stay out of the way of the rendered views.
fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}
