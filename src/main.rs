// gh-activity: show a GitHub user's recent public activity.
//
// Errors from every stage propagate here; main is the only place that
// prints them and picks the exit code.

mod activity;
mod app;
mod cache;
mod config;
mod error;
mod github;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::{Cli, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let config = Config::from(Cli::parse());
    let result = match App::new(config) {
        Ok(mut app) => app.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Log to stderr so stdout carries only the rendered activity.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
