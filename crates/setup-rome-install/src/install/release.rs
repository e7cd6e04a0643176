//! Release metadata and version selection
//!
//! Releases come from the GraphQL release feed, newest first. Their order is
//! part of the feed contract and is never changed here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One release as listed by the feed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseInfo {
    /// Release tag (e.g. "cli/v12.1.3")
    pub tag_name: String,
    /// Whether the release is flagged as not yet stable
    pub is_prerelease: bool,
}

impl ReleaseInfo {
    pub fn new(tag_name: impl Into<String>, is_prerelease: bool) -> Self {
        Self {
            tag_name: tag_name.into(),
            is_prerelease,
        }
    }
}

/// Which release the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    /// Any release whose tag contains this string
    Exact(String),
    /// Newest production release
    Latest,
    /// Newest prerelease, degrading to `Latest`
    Preview,
}

impl VersionSelector {
    /// Builds the selector from the `version` and `preview` inputs
    ///
    /// `preview` wins over any version. An empty version means latest.
    pub fn from_inputs(version: &str, preview: bool) -> Self {
        if preview {
            return VersionSelector::Preview;
        }

        match version.trim() {
            "" | "latest" => VersionSelector::Latest,
            "preview" => VersionSelector::Preview,
            exact => VersionSelector::Exact(exact.to_string()),
        }
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSelector::Exact(version) => f.write_str(version),
            VersionSelector::Latest => f.write_str("latest"),
            VersionSelector::Preview => f.write_str("preview"),
        }
    }
}

/// Outcome of resolving a selector against the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The selector matched directly
    Matched(ReleaseInfo),
    /// `Preview` found no prerelease and fell back to the latest production release
    PreviewFallback(ReleaseInfo),
}

impl Resolution {
    pub fn release(&self) -> &ReleaseInfo {
        match self {
            Resolution::Matched(release) | Resolution::PreviewFallback(release) => release,
        }
    }

    pub fn into_release(self) -> ReleaseInfo {
        match self {
            Resolution::Matched(release) | Resolution::PreviewFallback(release) => release,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::PreviewFallback(_))
    }
}
