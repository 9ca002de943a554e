// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde_json::{json, Value};
use sgf_core::EntityRef;
use sgf_engine::{CompletionReport, HookOutcome, HookReport};

use crate::color;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One line per hook, without color.
pub fn report_line(report: &HookReport) -> String {
    match &report.outcome {
        HookOutcome::Skipped { reason } => format!("{}: skipped ({})", report.hook, reason),
        HookOutcome::Submitted { handle, descriptor } => {
            format!("{}: submitted job {} (descriptor {})", report.hook, handle, descriptor.display())
        }
        HookOutcome::Reviewed { version, movie } => {
            format!("{}: created {} with {}", report.hook, version, movie.display())
        }
    }
}

pub fn report_json(event_id: i64, reports: &[HookReport]) -> Value {
    let hooks: Vec<Value> = reports
        .iter()
        .map(|report| match &report.outcome {
            HookOutcome::Skipped { reason } => json!({
                "hook": report.hook,
                "outcome": "skipped",
                "reason": reason,
            }),
            HookOutcome::Submitted { handle, descriptor } => json!({
                "hook": report.hook,
                "outcome": "submitted",
                "job_id": handle.job_id,
                "uri": handle.uri,
                "descriptor": descriptor,
            }),
            HookOutcome::Reviewed { version, movie } => json!({
                "hook": report.hook,
                "outcome": "reviewed",
                "version": version,
                "movie": movie,
            }),
        })
        .collect();
    json!({ "event_id": event_id, "hooks": hooks })
}

pub fn print_reports(event_id: i64, reports: &[HookReport], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for report in reports {
                let line = report_line(report);
                if matches!(report.outcome, HookOutcome::Skipped { .. }) {
                    println!("{}", color::muted(&line));
                } else {
                    println!("{}", line.replacen(report.hook, &color::header(report.hook), 1));
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report_json(event_id, reports))?),
    }
    Ok(())
}

pub fn print_uploads(keys: &[String], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for key in keys {
                println!("uploaded {key}");
            }
            println!("{} file(s) uploaded", keys.len());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "uploaded": keys }))?),
    }
    Ok(())
}

pub fn print_published(published: &EntityRef, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("registered {published}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "published": published }))?),
    }
    Ok(())
}

pub fn print_completion(report: &CompletionReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{} file(s) uploaded", report.uploaded.len());
            println!("registered {}", report.published);
        }
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "uploaded": report.uploaded,
                "published": report.published,
            }))?
        ),
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
