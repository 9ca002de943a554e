// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    maya   = { "submit-maya" },
    nuke   = { "submit-nuke" },
    review = { "create-version" },
)]
fn selects_named_hook(name: &str) {
    let hooks = select_hooks(Some(name), &Settings::default()).unwrap();
    assert_eq!(hooks.len(), 1);
    assert_eq!(hooks[0].name(), name);
}

#[test]
fn selects_every_hook_in_order() {
    let hooks = select_hooks(None, &Settings::default()).unwrap();
    let names: Vec<_> = hooks.iter().map(|hook| hook.name()).collect();
    assert_eq!(names, vec!["submit-maya", "submit-nuke", "create-version"]);
}

#[test]
fn unknown_hook_is_an_error() {
    let err = select_hooks(Some("submit-houdini"), &Settings::default()).err().unwrap();
    assert_eq!(err.to_string(), "unknown hook 'submit-houdini'");
}

#[tokio::test]
async fn missing_event_id_exits_cleanly_without_config() {
    let missing = std::path::PathBuf::from("/nonexistent/sgf.toml");
    handle(Some("submit-maya"), EventArgs { event_id: None }, Some(&missing), OutputFormat::Text).await.unwrap();
}
