//! Run context built from the CLI inputs
//!
//! This is the only place that reads the process environment; everything
//! below receives explicit values.

use anyhow::{Context as _, Result};
use setup_rome_core::{RunnerEnv, ToolSpec};
use setup_rome_install::github::{build_client, build_default_client};
use setup_rome_install::{
    GitHubReleaseFeed, Installer, PlatformDescriptor, RunnerPath, VersionSelector,
};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::cli::Cli;

/// Everything a command needs
pub struct Context {
    pub tool: ToolSpec,
    pub runner: RunnerEnv,
    pub selector: VersionSelector,
    token: Option<String>,
    graphql_url: Option<Url>,
}

impl Context {
    /// Creates the context for the current process
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let work_dir = env::current_dir().context("Failed to determine current directory")?;

        let mut tool = ToolSpec::rome();
        if let Some(host) = non_empty(cli.release_host.clone()) {
            tool.release_host = host;
        }

        let mut runner = RunnerEnv::new(PlatformDescriptor::host_os_id(), work_dir);
        runner.arch_id = non_empty(cli.arch.clone());
        runner.temp_root = non_empty_path(cli.temp_dir.clone());
        runner.path_var = env::var_os("PATH");
        runner.github_path_file = non_empty_path(cli.github_path.clone());
        runner.download_timeout = Duration::from_secs(cli.timeout_secs);

        let token = non_empty(cli.github_token.clone())
            .or_else(|| non_empty(env::var("GITHUB_TOKEN").ok()));

        Ok(Self {
            tool,
            runner,
            selector: VersionSelector::from_inputs(&cli.version, cli.preview),
            token,
            graphql_url: cli.graphql_url.clone(),
        })
    }

    /// Release feed for the tool's repository
    pub fn release_feed(&self) -> Result<GitHubReleaseFeed> {
        let client = build_default_client().context("Failed to build HTTP client")?;
        let feed = GitHubReleaseFeed::new(client, &self.tool, self.token.clone())?;

        Ok(match &self.graphql_url {
            Some(url) => feed.with_endpoint(url.clone()),
            None => feed,
        })
    }

    /// Installer wired to the GitHub feed and the runner's path
    pub fn installer(&self) -> Result<Installer<GitHubReleaseFeed, RunnerPath>> {
        let feed = self.release_feed()?;
        let path = RunnerPath::from_runner(&self.runner);
        let client =
            build_client(self.runner.download_timeout).context("Failed to build HTTP client")?;

        Ok(Installer::new(
            self.tool.clone(),
            self.runner.clone(),
            feed,
            path,
            client,
        ))
    }
}

// Actions passes unset inputs as empty strings
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|p| !p.as_os_str().is_empty())
}
