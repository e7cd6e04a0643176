//! Test utilities for setup-rome
//!
//! This crate provides shared testing utilities used across the setup-rome workspace.

pub mod fixtures;
pub mod mock;

pub use fixtures::{RunnerSandbox, write_fake_binary};
pub use mock::{
    asset_path, graphql_error_body, graphql_releases_body, mock_asset, mock_release_feed,
};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// This keeps test files in a single gitignored location that is easy to
/// clean up manually if needed.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot be created
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
