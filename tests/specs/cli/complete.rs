//! Farm-side completion commands

use crate::prelude::*;

#[test]
fn post_render_requires_output_path() {
    cli().args(&["post-render"]).fails().stderr_has("CONDUCTOR_OUTPUT_PATH");
}

#[test]
fn register_publish_requires_tracking_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = dir.path().join("published_file.json");
    std::fs::write(&descriptor, "{}").unwrap();

    cli()
        .args(&["register-publish", "--descriptor", descriptor.to_str().unwrap()])
        .fails()
        .stderr_has("SHOTGUN_SERVER");
}

#[test]
fn register_publish_reports_a_missing_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = dir.path().join("absent.json");

    cli()
        .env("SHOTGUN_SERVER", "https://studio.example.com")
        .env("SHOTGUN_SCRIPT_NAME", "render_daemon")
        .env("SHOTGUN_SCRIPT_KEY", "s3cret")
        .args(&["register-publish", "--descriptor", descriptor.to_str().unwrap()])
        .fails()
        .stderr_has("absent.json");
}
