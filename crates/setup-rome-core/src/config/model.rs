use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts;

/// Identity of the tool being installed and where its releases live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Binary name, also the prefix of every release asset (e.g. "rome")
    pub name: String,
    pub owner: String,
    pub repo: String,
    /// Substring identifying this tool's tags when the feed is shared
    pub tag_marker: Option<String>,
    /// Host serving release pages and assets
    pub release_host: String,
}

impl ToolSpec {
    /// The Rome CLI as published on `github.com/rome/tools`
    pub fn rome() -> Self {
        Self {
            name: consts::rome::TOOL_NAME.to_string(),
            owner: consts::rome::OWNER.to_string(),
            repo: consts::rome::REPO.to_string(),
            tag_marker: Some(consts::rome::TAG_MARKER.to_string()),
            release_host: consts::rome::RELEASE_HOST.to_string(),
        }
    }

    /// Name of the directory that holds the downloaded binary (e.g. ".rome_bin")
    ///
    /// Path registration works on directories, so the binary gets one of its own.
    pub fn install_dir_name(&self) -> String {
        format!(".{}_bin", self.name)
    }
}

impl Default for ToolSpec {
    fn default() -> Self {
        Self::rome()
    }
}

/// Everything the installer needs to know about the CI runner
///
/// Built once by the CLI layer; nothing below it reads the process environment.
#[derive(Debug, Clone)]
pub struct RunnerEnv {
    /// OS identifier ("linux", "darwin"/"macos", "win32"/"windows")
    pub os_id: String,
    /// Architecture identifier as published by the runner (`RUNNER_ARCH`)
    pub arch_id: Option<String>,
    /// Runner temp root (`RUNNER_TEMP`)
    pub temp_root: Option<PathBuf>,
    /// Fallback location when no temp root is configured
    pub work_dir: PathBuf,
    /// Current value of `PATH`
    pub path_var: Option<OsString>,
    /// File collecting path additions for later steps (`GITHUB_PATH`)
    pub github_path_file: Option<PathBuf>,
    /// Upper bound for a single download
    pub download_timeout: Duration,
}

impl RunnerEnv {
    /// Creates a runner description for `os_id` with every optional field unset
    pub fn new(os_id: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            os_id: os_id.into(),
            arch_id: None,
            temp_root: None,
            work_dir: work_dir.into(),
            path_var: None,
            github_path_file: None,
            download_timeout: Duration::from_secs(consts::download::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Root under which the install directory is created
    ///
    /// Returns the temp root when the runner exposes one, otherwise the
    /// working directory. The boolean is `false` for the fallback.
    pub fn install_root(&self) -> (&Path, bool) {
        match &self.temp_root {
            Some(root) => (root.as_path(), true),
            None => (self.work_dir.as_path(), false),
        }
    }
}
