//! Integration tests for the `setup-rome` binary

#![allow(deprecated)] // cargo_bin is deprecated in favor of cargo_bin! in newer assert_cmd

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use mockito::Server;
use predicates::prelude::*;
use setup_rome_testkit::{
    RunnerSandbox, asset_path, graphql_releases_body, mock_asset, mock_release_feed,
};
use std::fs;
use std::process::Command;

/// Command isolated from the runner variables of the machine running the tests
fn setup_rome(sandbox: &RunnerSandbox) -> Command {
    let mut cmd = Command::cargo_bin("setup-rome").unwrap();
    for var in [
        "INPUT_VERSION",
        "INPUT_PREVIEW",
        "INPUT_GITHUB-TOKEN",
        "GITHUB_TOKEN",
        "RUNNER_ARCH",
        "RUNNER_TEMP",
        "GITHUB_PATH",
        "RUST_LOG",
        "SETUP_ROME_GRAPHQL_URL",
        "SETUP_ROME_RELEASE_HOST",
    ] {
        cmd.env_remove(var);
    }
    cmd.current_dir(sandbox.work_dir())
        .env("PATH", sandbox.path_var())
        .env("RUNNER_TEMP", sandbox.runner_temp())
        .env("GITHUB_PATH", sandbox.github_path_file());
    cmd
}

/// Asset name of the host platform on an X64 runner
fn host_asset() -> String {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    };
    format!("rome-{}-x64{}", os, std::env::consts::EXE_SUFFIX)
}

fn point_at(cmd: &mut Command, server: &Server) {
    cmd.env("SETUP_ROME_GRAPHQL_URL", format!("{}/graphql", server.url()))
        .env("SETUP_ROME_RELEASE_HOST", server.url())
        .env("INPUT_GITHUB-TOKEN", "test-token")
        .env("RUNNER_ARCH", "X64");
}

#[test]
fn test_help_lists_inputs() {
    let sandbox = RunnerSandbox::new();
    setup_rome(&sandbox)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--version"))
        .stdout(predicate::str::contains("--github-token"))
        .stdout(predicate::str::contains("resolve"));
}

#[test]
fn test_preinstalled_rome_needs_no_token() {
    let sandbox = RunnerSandbox::new();
    sandbox.preinstall("rome");

    setup_rome(&sandbox)
        .env("RUNNER_ARCH", "X64")
        .assert()
        .success()
        .stdout(predicate::str::contains("Use pre-installed rome"))
        .stdout(predicate::str::contains("::group::").not())
        .stdout(predicate::str::contains("::endgroup::").not());

    assert!(sandbox.github_path_entries().is_empty());
}

#[test]
fn test_missing_arch_fails() {
    let sandbox = RunnerSandbox::new();

    setup_rome(&sandbox)
        .env("INPUT_GITHUB-TOKEN", "test-token")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("::error::UNSUPPORTED_ARCHITECTURE"));
}

#[test]
fn test_unsupported_arch_fails() {
    let sandbox = RunnerSandbox::new();

    setup_rome(&sandbox)
        .env("RUNNER_ARCH", "X86")
        .assert()
        .failure()
        .stdout(predicate::str::contains("unsupported architecture 'X86'"));
}

#[test]
fn test_missing_token_fails() {
    let sandbox = RunnerSandbox::new();

    setup_rome(&sandbox)
        .env("RUNNER_ARCH", "X64")
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::MISSING_CREDENTIAL"))
        .stdout(predicate::str::contains("github-token"));
}

#[test]
fn test_installs_latest_release() {
    let mut server = Server::new();
    let feed = mock_release_feed(
        &mut server,
        &graphql_releases_body(&[("cli-v12.1.0-nightly", true), ("cli-v12.0.0", false)]),
    );
    let asset = mock_asset(
        &mut server,
        &asset_path("rome", "tools", "cli-v12.0.0", &host_asset()),
        200,
        b"#!/bin/sh\necho rome 12.0.0\n",
    );

    let sandbox = RunnerSandbox::new();
    let mut cmd = setup_rome(&sandbox);
    point_at(&mut cmd, &server);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("::group::Installing rome"))
        .stdout(predicate::str::contains("Rome is not installed"))
        .stdout(predicate::str::contains("::endgroup::"));

    feed.assert();
    asset.assert();

    let install_dir = sandbox.runner_temp().join(".rome_bin");
    let binary = install_dir.join(format!("rome{}", std::env::consts::EXE_SUFFIX));
    assert!(binary.is_file());
    assert_eq!(
        sandbox.github_path_entries(),
        vec![install_dir.display().to_string()]
    );
}

#[test]
fn test_missing_version_reports_download_error() {
    let mut server = Server::new();
    let _feed = mock_release_feed(&mut server, &graphql_releases_body(&[("cli-v9.9.9", false)]));
    let _asset = mock_asset(
        &mut server,
        &asset_path("rome", "tools", "cli-v9.9.9", &host_asset()),
        404,
        b"Not Found",
    );

    let sandbox = RunnerSandbox::new();
    let mut cmd = setup_rome(&sandbox);
    point_at(&mut cmd, &server);

    cmd.env("INPUT_VERSION", "9.9.9")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("::error::DOWNLOAD_CLIENT_ERROR"))
        .stdout(predicate::str::contains("'9.9.9'"))
        .stdout(predicate::str::contains("cli-v9.9.9"));

    assert!(sandbox.github_path_entries().is_empty());
}

#[test]
fn test_resolve_prints_tag_and_url() {
    let mut server = Server::new();
    let _feed = mock_release_feed(
        &mut server,
        &graphql_releases_body(&[("cli-v12.1.0-nightly", true), ("cli-v12.0.0", false)]),
    );

    let sandbox = RunnerSandbox::new();
    let mut cmd = setup_rome(&sandbox);
    point_at(&mut cmd, &server);

    cmd.args(["resolve", "--preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tag: cli-v12.1.0-nightly"))
        .stdout(predicate::str::contains(format!(
            "/rome/tools/releases/download/cli-v12.1.0-nightly/{}",
            host_asset()
        )));

    assert!(!sandbox.runner_temp().join(".rome_bin").exists());
    assert!(fs::read_dir(sandbox.runner_temp()).unwrap().next().is_none());
}

#[test]
fn test_resolve_preview_without_prerelease_falls_back() {
    let mut server = Server::new();
    let _feed = mock_release_feed(
        &mut server,
        &graphql_releases_body(&[("cli-v12.0.0", false), ("cli-v11.0.0", false)]),
    );

    let sandbox = RunnerSandbox::new();
    let mut cmd = setup_rome(&sandbox);
    point_at(&mut cmd, &server);

    cmd.args(["resolve", "--preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "::warning::Failed to retrieve pre-release, falling back to latest.",
        ))
        .stdout(predicate::str::contains("tag: cli-v12.0.0"))
        .stdout(predicate::str::contains(
            "note: no prerelease found, resolved to the latest release",
        ));
}
