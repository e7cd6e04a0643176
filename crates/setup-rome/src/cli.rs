//! CLI command structure using clap
//!
//! Every input also reads the variable the Actions runner sets for it, so the
//! binary runs as an action step without arguments.

use clap::{ArgAction, Parser, Subcommand, builder::BoolishValueParser};
use setup_rome_core::config::consts;
use std::path::PathBuf;
use url::Url;

#[derive(Parser)]
#[command(name = "setup-rome")]
#[command(about = "Install the Rome CLI on a CI runner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Version to install: "latest", "preview" or a version such as "12.1.3"
    #[arg(long = "version", global = true, env = "INPUT_VERSION", default_value = "latest")]
    pub version: String,

    /// Install the newest prerelease
    #[arg(
        long,
        global = true,
        env = "INPUT_PREVIEW",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub preview: bool,

    /// Token for the GitHub GraphQL API (falls back to GITHUB_TOKEN)
    #[arg(long, global = true, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Runner architecture ("X64", "ARM64")
    #[arg(long, global = true, env = "RUNNER_ARCH")]
    pub arch: Option<String>,

    /// Runner temp directory; the binary goes into `.rome_bin` below it
    #[arg(long, global = true, env = "RUNNER_TEMP")]
    pub temp_dir: Option<PathBuf>,

    /// File collecting path additions for later steps
    #[arg(long, global = true, env = "GITHUB_PATH")]
    pub github_path: Option<PathBuf>,

    /// Upper bound for the binary download, in seconds
    #[arg(long, global = true, default_value_t = consts::download::DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, global = true, hide = true, env = "SETUP_ROME_GRAPHQL_URL")]
    pub graphql_url: Option<Url>,

    #[arg(long, global = true, hide = true, env = "SETUP_ROME_RELEASE_HOST")]
    pub release_host: Option<String>,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Install the binary and add it to the path (default)
    Install,

    /// Print the release tag and download URL without installing
    Resolve,
}
