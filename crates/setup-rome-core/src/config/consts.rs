//! Constants shared across the workspace

/// Release feed settings
pub mod feed {
    /// Releases fetched per query. The feed is never paginated further.
    pub const RELEASE_PAGE_SIZE: usize = 100;

    /// GraphQL endpoint of the release-hosting service
    pub const GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";
}

/// Defaults for the Rome CLI distribution
pub mod rome {
    pub const TOOL_NAME: &str = "rome";
    pub const OWNER: &str = "rome";
    pub const REPO: &str = "tools";

    /// The `rome/tools` feed is shared with other products; CLI tags contain this marker.
    pub const TAG_MARKER: &str = "cli";

    pub const RELEASE_HOST: &str = "https://github.com";
}

/// Download settings
pub mod download {
    /// Default timeout for artifact downloads, in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
}
