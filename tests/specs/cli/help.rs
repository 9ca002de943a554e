//! Help and usage output

use crate::prelude::*;

#[test]
fn help_lists_every_command() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("submit-maya")
        .stdout_has("submit-nuke")
        .stdout_has("create-version")
        .stdout_has("dispatch")
        .stdout_has("post-render")
        .stdout_has("register-publish")
        .stdout_has("finalize");
}

#[test]
fn no_command_is_a_usage_error() {
    cli().fails().stderr_has("Usage:");
}

#[test]
fn submit_help_names_the_event_id() {
    cli().args(&["submit-maya", "--help"]).passes().stdout_has("EVENT_ID");
}

#[test]
fn register_publish_help_shows_descriptor_flag() {
    cli().args(&["register-publish", "--help"]).passes().stdout_has("--descriptor");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}
