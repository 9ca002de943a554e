//! Event-triggered commands

use crate::prelude::*;

#[test]
fn missing_event_id_exits_zero_for_every_trigger() {
    for command in ["submit-maya", "submit-nuke", "create-version", "dispatch"] {
        cli().args(&[command]).passes().stdout_is("No event id given, exiting\n");
    }
}

#[test]
fn missing_tracking_credentials_fail() {
    cli().args(&["submit-maya", "42"]).fails().stderr_has("SHOTGUN_SERVER");
}

#[test]
fn missing_bucket_fails() {
    cli()
        .env("SHOTGUN_SERVER", "https://studio.example.com")
        .env("SHOTGUN_SCRIPT_NAME", "render_daemon")
        .env("SHOTGUN_SCRIPT_KEY", "s3cret")
        .args(&["create-version", "42"])
        .fails()
        .stderr_has("AWS_PROJECT_BUCKET");
}

#[test]
fn unreadable_settings_file_fails() {
    cli()
        .env("SHOTGUN_SERVER", "https://studio.example.com")
        .env("SHOTGUN_SCRIPT_NAME", "render_daemon")
        .env("SHOTGUN_SCRIPT_KEY", "s3cret")
        .env("AWS_PROJECT_BUCKET", "project-bucket")
        .args(&["dispatch", "42", "--config", "/nonexistent/sgf.toml"])
        .fails()
        .stderr_has("/nonexistent/sgf.toml");
}

#[test]
fn non_numeric_event_id_is_rejected() {
    cli().args(&["submit-nuke", "latest"]).fails().stderr_has("invalid value");
}
