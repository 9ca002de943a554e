// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sgf: render-publish hooks for the tracking store, render farm and
//! project bucket

mod color;
mod commands;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::complete::DescriptorArgs;
use commands::event::EventArgs;
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "sgf",
    version,
    about = "Render-publish hooks: farm submission, review movies and publish registration",
    styles = color::styles()
)]
struct Cli {
    /// Settings file [env: SGF_CONFIG]
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Debug logging for every sgf crate
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short = 'o', long = "output", global = true, value_enum, default_value_t)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new lighting scene to the render farm
    SubmitMaya(EventArgs),
    /// Submit a precomp of a new lighting render over the plate
    SubmitNuke(EventArgs),
    /// Encode a review movie and create a Version for a new render
    CreateVersion(EventArgs),
    /// Run every hook for an event, in order
    Dispatch(EventArgs),
    /// Upload rendered frames to the project bucket (farm side)
    PostRender,
    /// Register the pending publish in the tracking store (farm side)
    RegisterPublish(DescriptorArgs),
    /// Upload frames, then register the publish (farm side)
    Finalize(DescriptorArgs),
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    let format = cli.output;
    match cli.command {
        Commands::SubmitMaya(args) => commands::event::handle(Some("submit-maya"), args, config, format).await,
        Commands::SubmitNuke(args) => commands::event::handle(Some("submit-nuke"), args, config, format).await,
        Commands::CreateVersion(args) => commands::event::handle(Some("create-version"), args, config, format).await,
        Commands::Dispatch(args) => commands::event::handle(None, args, config, format).await,
        Commands::PostRender => commands::complete::post_render(format).await,
        Commands::RegisterPublish(args) => commands::complete::register_publish(args, config, format).await,
        Commands::Finalize(args) => commands::complete::finalize(args, config, format).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = sgf_engine::env::log_dir();
    let _guard = match logging::init(cli.verbose, log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
