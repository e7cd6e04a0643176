//! Rome CLI installation for CI runners.
//!
//! This crate ensures a given version of the Rome binary is available on the
//! runner's execution path, downloading it from the GitHub releases when it
//! is not installed yet.
//!
//! # Architecture
//!
//! - [`install`]: Platform mapping, release resolution, artifact location and download
//! - [`github`]: HTTP client, GraphQL release feed and URL helpers
//! - [`exec_path`]: Probing and extending the execution path
//!
//! # Installation Flow
//!
//! ```text
//! Installer::ensure_installed()
//!     ↓
//! 1. Probe PATH for the tool
//!     → found: AlreadyPresent (no network, no filesystem writes)
//!     ↓ (not found)
//! 2. Resolve the platform (os + RUNNER_ARCH)
//!     ↓
//! 3. Query the release feed (100 most recent releases)
//!     → filter by tag marker ("cli")
//!     → select latest / preview / exact version
//!     ↓
//! 4. Locate the asset
//!     → {host}/{owner}/{repo}/releases/download/{tag}/{name}-{os}-{arch}{ext}
//!     ↓
//! 5. Download to {RUNNER_TEMP}/.rome_bin/rome{ext}
//!     → chmod 0755 on POSIX
//!     ↓
//! 6. Register the directory on PATH (and in GITHUB_PATH)
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use setup_rome_core::{RunnerEnv, ToolSpec};
//! use setup_rome_install::{GitHubReleaseFeed, Installer, RunnerPath, VersionSelector};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tool = ToolSpec::rome();
//! let mut runner = RunnerEnv::new("linux", std::env::current_dir()?);
//! runner.arch_id = Some("X64".to_string());
//!
//! let feed = GitHubReleaseFeed::new(
//!     setup_rome_install::github::build_default_client()?,
//!     &tool,
//!     std::env::var("GITHUB_TOKEN").ok(),
//! )?;
//! let path = RunnerPath::from_runner(&runner);
//! let client = setup_rome_install::github::build_client(runner.download_timeout)?;
//!
//! let mut installer = Installer::new(tool, runner, feed, path, client);
//! installer.ensure_installed(&VersionSelector::from_inputs("latest", false))?;
//! # Ok(())
//! # }
//! ```

pub mod exec_path;
pub mod github;
pub mod install;

// Re-export commonly used types
pub use exec_path::{ExecutionPath, RunnerPath};
pub use github::{GitHubReleaseFeed, ReleaseFeed};
pub use install::{
    ArtifactRef, InstallPlan, InstallResult, Installer, PlatformDescriptor, ReleaseInfo,
    Resolution, VersionSelector,
};

// Type alias for convenience
pub type Result<T> = setup_rome_core::Result<T>;
