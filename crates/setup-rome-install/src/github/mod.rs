//! Shared GitHub interaction utilities
//!
//! This module provides common functionality for interacting with GitHub:
//! - HTTP client construction with appropriate user-agent and timeouts
//! - The release feed (GraphQL release listing) behind the [`ReleaseFeed`] trait
//! - Safe URL construction helpers

pub mod client;
pub mod feed;
pub mod url;

// Re-exports for convenient access
pub use client::{DEFAULT_TIMEOUT, USER_AGENT, build_client, build_default_client};
pub use feed::{GitHubReleaseFeed, ReleaseFeed};
pub use url::{UrlError, add_path_segments, github_graphql_url, parse_host};
