//! Runner filesystem fixtures
//!
//! A [`RunnerSandbox`] lays out what a GitHub Actions runner exposes to a
//! step: a temp root, a `GITHUB_PATH` file, a working directory and a
//! directory for pre-installed tools.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated runner layout, removed on drop
///
/// ```text
/// {root}/
///   runner-temp/     RUNNER_TEMP
///   work/            working directory
///   system-bin/      stands in for /usr/local/bin
///   github_path      GITHUB_PATH
/// ```
pub struct RunnerSandbox {
    root: TempDir,
}

impl RunnerSandbox {
    /// # Panics
    ///
    /// Panics if the directories cannot be created
    pub fn new() -> Self {
        let root = crate::temp_dir_in_workspace();
        for dir in ["runner-temp", "work", "system-bin"] {
            fs::create_dir_all(root.path().join(dir)).expect("Failed to create sandbox directory");
        }
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn runner_temp(&self) -> PathBuf {
        self.root.path().join("runner-temp")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    pub fn system_bin(&self) -> PathBuf {
        self.root.path().join("system-bin")
    }

    pub fn github_path_file(&self) -> PathBuf {
        self.root.path().join("github_path")
    }

    /// `PATH` value holding only the system bin directory
    pub fn path_var(&self) -> std::ffi::OsString {
        std::env::join_paths([self.system_bin()]).expect("Failed to join PATH")
    }

    /// Directories appended to `GITHUB_PATH` so far
    pub fn github_path_entries(&self) -> Vec<String> {
        match fs::read_to_string(self.github_path_file()) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Puts an executable `name` into the system bin directory
    pub fn preinstall(&self, name: &str) -> PathBuf {
        write_fake_binary(&self.system_bin(), name)
    }
}

impl Default for RunnerSandbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes an executable shell script named `name` (plus the host's
/// executable suffix) into `dir`
///
/// # Panics
///
/// Panics if the file cannot be written
pub fn write_fake_binary(dir: &Path, name: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create binary directory");
    let path = dir.join(format!("{}{}", name, std::env::consts::EXE_SUFFIX));
    fs::write(&path, "#!/bin/sh\necho fake\n").expect("Failed to write fake binary");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to set permissions");
    }

    path
}
