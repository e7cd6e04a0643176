//! Installation workflow
//!
//! ```text
//! CheckExisting ── found ──→ AlreadyPresent
//!     ↓ not found
//! Resolving   (release feed)
//!     ↓
//! Locating    (platform + release → asset URL)
//!     ↓
//! Fetching    ({temp}/.rome_bin/rome)
//!     ↓
//! Finalizing  (chmod 0755 on POSIX, register directory on PATH)
//!     ↓
//! Installed
//! ```

use log::{debug, error, info, warn};
use reqwest::blocking::Client;
use setup_rome_core::{Result, RunnerEnv, SetupError, ToolSpec};
use std::io;
use std::path::{Path, PathBuf};

use crate::exec_path::ExecutionPath;
use crate::github::ReleaseFeed;
use crate::install::download::{self, FetchError};
use crate::install::locate::{ArtifactRef, locate, release_page_url};
use crate::install::platform::PlatformDescriptor;
use crate::install::release::{ReleaseInfo, Resolution, VersionSelector};
use crate::install::resolve::ReleaseResolver;

/// Terminal state of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallResult {
    /// The binary was already on the path (its full path)
    AlreadyPresent(PathBuf),
    /// The binary was downloaded (the directory added to the path)
    Installed(PathBuf),
}

/// Everything decided before touching the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub platform: PlatformDescriptor,
    pub resolution: Resolution,
    pub artifact: ArtifactRef,
}

impl InstallPlan {
    pub fn release(&self) -> &ReleaseInfo {
        self.resolution.release()
    }
}

/// Ensures the tool binary is installed and on the execution path
pub struct Installer<F, P> {
    tool: ToolSpec,
    runner: RunnerEnv,
    resolver: ReleaseResolver<F>,
    path: P,
    client: Client,
}

impl<F: ReleaseFeed, P: ExecutionPath> Installer<F, P> {
    /// Creates an installer
    ///
    /// `client` is used for the artifact download only; its timeout bounds
    /// a hung fetch.
    pub fn new(tool: ToolSpec, runner: RunnerEnv, feed: F, path: P, client: Client) -> Self {
        let resolver = ReleaseResolver::new(feed, tool.tag_marker.clone());
        Self {
            tool,
            runner,
            resolver,
            path,
            client,
        }
    }

    pub fn path(&self) -> &P {
        &self.path
    }

    pub fn resolver(&self) -> &ReleaseResolver<F> {
        &self.resolver
    }

    /// Directory the binary is downloaded into
    ///
    /// Falls back to the working directory, with a warning, when the runner
    /// exposes no temp root.
    pub fn install_dir(&self) -> PathBuf {
        let (root, from_temp) = self.runner.install_root();
        if !from_temp {
            warn!(
                "Temp directory not exposed via 'RUNNER_TEMP' environment variable. Uses current directory instead."
            );
        }
        root.join(self.tool.install_dir_name())
    }

    /// Resolves the platform, the release and the artifact without installing
    ///
    /// # Errors
    ///
    /// Platform, feed and resolution errors, unchanged
    pub fn plan(&self, selector: &VersionSelector) -> Result<InstallPlan> {
        let platform =
            PlatformDescriptor::resolve(&self.runner.os_id, self.runner.arch_id.as_deref())?;
        debug!("Detected platform {}", platform);

        let resolution = self.resolver.resolve(selector)?;
        let artifact = locate(resolution.release(), &platform, &self.tool)?;
        debug!("Artifact URL: {}", artifact.download_url);

        Ok(InstallPlan {
            platform,
            resolution,
            artifact,
        })
    }

    /// Runs the installation workflow
    ///
    /// # Errors
    ///
    /// Returns the single terminal failure of the run; nothing is retried.
    /// A 4xx download becomes `DownloadClientError` naming the requested
    /// version, the resolved tag and the release page.
    pub fn ensure_installed(&mut self, selector: &VersionSelector) -> Result<InstallResult> {
        match self.find_existing() {
            Some(existing) => Ok(InstallResult::AlreadyPresent(existing)),
            None => self.install(selector).map(InstallResult::Installed),
        }
    }

    /// Probes the execution path for the tool
    ///
    /// No feed, network or filesystem access.
    pub fn find_existing(&self) -> Option<PathBuf> {
        let existing = self.path.probe(&self.tool.name)?;
        info!("Use pre-installed {} {}", self.tool.name, existing.display());
        Some(existing)
    }

    /// Downloads the tool and registers its directory, without probing first
    ///
    /// Returns the directory added to the path.
    ///
    /// # Errors
    ///
    /// See [`Installer::ensure_installed`]
    pub fn install(&mut self, selector: &VersionSelector) -> Result<PathBuf> {
        info!(
            "{} is not installed, installing it now...",
            capitalize(&self.tool.name)
        );

        let plan = self.plan(selector)?;
        let install_dir = self.install_dir();
        let binary = install_dir.join(&plan.artifact.local_binary_name);

        debug!(
            "Download tool from '{}' to {}.",
            plan.artifact.download_url,
            binary.display()
        );
        let bytes = download::fetch_to(&self.client, &plan.artifact.download_url, &binary)
            .map_err(|err| self.fetch_failure(err, selector, &plan))?;
        debug!("Downloaded {} bytes", bytes);

        self.finalize(&plan.platform, &binary, &install_dir)?;

        info!(
            "Installed {} {} to {}",
            self.tool.name,
            plan.release().tag_name,
            install_dir.display()
        );
        Ok(install_dir)
    }

    fn finalize(&mut self, platform: &PlatformDescriptor, binary: &Path, dir: &Path) -> Result<()> {
        if platform.os.is_posix() {
            download::set_executable_permissions(binary)?;
        }

        // Path registration works on directories
        self.path.register(dir)
    }

    fn fetch_failure(
        &self,
        err: FetchError,
        selector: &VersionSelector,
        plan: &InstallPlan,
    ) -> SetupError {
        let tag = &plan.release().tag_name;

        let err = match err {
            FetchError::Io { operation, source } => {
                error!(
                    "Failed to write the {} binary to {}.",
                    self.tool.name,
                    self.install_dir().display()
                );
                return SetupError::IoError(io::Error::new(
                    source.kind(),
                    format!("{} failed: {}", operation, source),
                ));
            }
            other => other,
        };

        match err.client_status() {
            Some(status) => {
                error!("{}", err);
                let release_url = release_page_url(tag, &self.tool)
                    .map(|url| url.to_string())
                    .unwrap_or_else(|_| plan.artifact.download_url.to_string());

                SetupError::DownloadClientError {
                    tool: self.tool.name.clone(),
                    requested: selector.to_string(),
                    tag: tag.clone(),
                    status,
                    release_url,
                }
            }
            None => {
                error!(
                    "Failed to retrieve the {} binary from '{}'.",
                    self.tool.name, plan.artifact.download_url
                );
                SetupError::DownloadTransportError {
                    url: plan.artifact.download_url.to_string(),
                    source: Box::new(err),
                }
            }
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
