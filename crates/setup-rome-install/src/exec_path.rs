//! Execution path adapter
//!
//! Probing and registration go through [`ExecutionPath`] so the installer never
//! touches the process environment directly.

use log::{debug, warn};
use setup_rome_core::{Result, RunnerEnv, SetupError};
use std::ffi::{OsStr, OsString};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The ordered list of directories searched for commands
pub trait ExecutionPath {
    /// Looks up `binary`; `None` when it is not installed
    fn probe(&self, binary: &str) -> Option<PathBuf>;

    /// Adds `dir` to the path for the rest of the job
    fn register(&mut self, dir: &Path) -> Result<()>;
}

/// Execution path of a GitHub Actions runner
///
/// Keeps its own copy of `PATH`. Registration prepends to that copy and
/// appends the directory to the `GITHUB_PATH` file, which the runner reads
/// before every later step.
#[derive(Debug, Clone)]
pub struct RunnerPath {
    path_var: OsString,
    work_dir: PathBuf,
    github_path_file: Option<PathBuf>,
}

impl RunnerPath {
    pub fn new(
        path_var: Option<OsString>,
        work_dir: impl Into<PathBuf>,
        github_path_file: Option<PathBuf>,
    ) -> Self {
        Self {
            path_var: path_var.unwrap_or_default(),
            work_dir: work_dir.into(),
            github_path_file,
        }
    }

    pub fn from_runner(env: &RunnerEnv) -> Self {
        Self::new(
            env.path_var.clone(),
            env.work_dir.clone(),
            env.github_path_file.clone(),
        )
    }

    /// Current `PATH` value including registered directories
    pub fn path_var(&self) -> &OsStr {
        &self.path_var
    }

    pub fn entries(&self) -> Vec<PathBuf> {
        std::env::split_paths(&self.path_var).collect()
    }

    fn append_to_github_path(&self, file: &Path, dir: &Path) -> Result<()> {
        let mut handle = OpenOptions::new().create(true).append(true).open(file)?;
        writeln!(handle, "{}", dir.display())?;
        Ok(())
    }
}

impl ExecutionPath for RunnerPath {
    fn probe(&self, binary: &str) -> Option<PathBuf> {
        match which::which_in(binary, Some(&self.path_var), &self.work_dir) {
            Ok(path) => Some(path),
            Err(err) => {
                debug!("{} not found on PATH: {}", binary, err);
                None
            }
        }
    }

    fn register(&mut self, dir: &Path) -> Result<()> {
        let mut entries = self.entries();
        if entries.iter().any(|entry| entry == dir) {
            debug!("{} is already on PATH", dir.display());
            return Ok(());
        }

        entries.insert(0, dir.to_path_buf());
        self.path_var = std::env::join_paths(entries).map_err(|e| SetupError::InvalidInput {
            field: "PATH".to_string(),
            reason: e.to_string(),
        })?;

        match &self.github_path_file {
            Some(file) => self.append_to_github_path(file, dir)?,
            None => warn!(
                "GITHUB_PATH is not set; {} is only on PATH for this process",
                dir.display()
            ),
        }

        debug!("Added {} to PATH", dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_fake_binary(dir: &Path, name: &str) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    #[test]
    fn test_probe_finds_binary_on_path() {
        let temp = TempDir::new().unwrap();
        let bin_dir = temp.path().join("bin");
        let expected = write_fake_binary(&bin_dir, &format!("rome{}", std::env::consts::EXE_SUFFIX));

        let path_var = std::env::join_paths([&bin_dir]).unwrap();
        let runner = RunnerPath::new(Some(path_var), temp.path(), None);

        assert_eq!(runner.probe("rome"), Some(expected));
    }

    #[test]
    fn test_probe_returns_none_when_missing() {
        let temp = TempDir::new().unwrap();
        let path_var = std::env::join_paths([temp.path()]).unwrap();
        let runner = RunnerPath::new(Some(path_var), temp.path(), None);

        assert_eq!(runner.probe("rome"), None);
    }

    #[test]
    fn test_probe_with_empty_path() {
        let temp = TempDir::new().unwrap();
        let runner = RunnerPath::new(None, temp.path(), None);
        assert_eq!(runner.probe("rome"), None);
    }

    #[test]
    fn test_register_prepends_and_writes_github_path() {
        let temp = TempDir::new().unwrap();
        let github_path = temp.path().join("github_path");
        let existing = temp.path().join("usr-bin");
        let path_var = std::env::join_paths([&existing]).unwrap();
        let mut runner = RunnerPath::new(Some(path_var), temp.path(), Some(github_path.clone()));

        let install_dir = temp.path().join(".rome_bin");
        runner.register(&install_dir).unwrap();

        assert_eq!(runner.entries(), vec![install_dir.clone(), existing]);
        assert_eq!(
            fs::read_to_string(&github_path).unwrap(),
            format!("{}\n", install_dir.display())
        );
    }

    #[test]
    fn test_register_twice_adds_directory_once() {
        let temp = TempDir::new().unwrap();
        let github_path = temp.path().join("github_path");
        let mut runner = RunnerPath::new(None, temp.path(), Some(github_path.clone()));

        let install_dir = temp.path().join(".rome_bin");
        runner.register(&install_dir).unwrap();
        runner.register(&install_dir).unwrap();

        let count = runner.entries().iter().filter(|e| **e == install_dir).count();
        assert_eq!(count, 1);
        assert_eq!(fs::read_to_string(&github_path).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_register_without_github_path_updates_own_copy() {
        let temp = TempDir::new().unwrap();
        let mut runner = RunnerPath::new(None, temp.path(), None);

        let install_dir = temp.path().join(".rome_bin");
        runner.register(&install_dir).unwrap();

        assert!(runner.entries().contains(&install_dir));
    }

    #[test]
    fn test_registered_directory_is_probed() {
        let temp = TempDir::new().unwrap();
        let install_dir = temp.path().join(".rome_bin");
        write_fake_binary(&install_dir, &format!("rome{}", std::env::consts::EXE_SUFFIX));

        let mut runner = RunnerPath::new(None, temp.path(), None);
        assert_eq!(runner.probe("rome"), None);

        runner.register(&install_dir).unwrap();
        assert!(runner.probe("rome").is_some());
    }
}
