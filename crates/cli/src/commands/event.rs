// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event-triggered commands: run one hook, or all of them, for an event id

use anyhow::{anyhow, Result};
use clap::Args;
use sgf_core::SystemClock;
use sgf_engine::{all_hooks, hook_by_name, Config, Dispatcher, PublishHook, Settings};
use std::path::Path;

use crate::output::{self, OutputFormat};

/// Printed when the trigger fires without an event id.
pub const NO_EVENT_ID: &str = "No event id given, exiting";

#[derive(Args)]
pub struct EventArgs {
    /// EventLogEntry id from the tracking store
    #[arg(value_name = "EVENT_ID")]
    pub event_id: Option<i64>,
}

/// Hooks to run: one named hook, or every hook in order.
pub fn select_hooks(only: Option<&str>, settings: &Settings) -> Result<Vec<Box<dyn PublishHook>>> {
    match only {
        Some(name) => {
            let hook = hook_by_name(name, settings).ok_or_else(|| anyhow!("unknown hook '{name}'"))?;
            Ok(vec![hook])
        }
        None => Ok(all_hooks(settings)),
    }
}

pub async fn handle(only: Option<&str>, args: EventArgs, config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let Some(event_id) = args.event_id else {
        println!("{NO_EVENT_ID}");
        return Ok(());
    };

    let config = Config::load(config_path)?;
    let hooks = select_hooks(only, &config.settings)?;
    let services = super::services(&config).await;
    let dispatcher = Dispatcher::new(services, config.settings.clone(), hooks, SystemClock);

    tracing::info!(event_id, hook = only.unwrap_or("all"), "handling event");
    let reports = dispatcher.handle_event_id(event_id).await?;
    output::print_reports(event_id, &reports, format)
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
