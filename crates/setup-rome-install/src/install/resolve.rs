//! Release resolution
//!
//! Turns a [`VersionSelector`] into one concrete release from the feed:
//!
//! ```text
//! feed.list_recent_releases()      (newest first, at most 100)
//!     ↓
//! keep tags containing the marker  (shared feeds only)
//!     ↓
//! Latest  → first production release
//! Preview → first prerelease, else Latest (warning)
//! Exact   → first tag containing the version
//! ```

use log::{info, warn};
use setup_rome_core::{Result, SetupError};

use crate::github::ReleaseFeed;
use crate::install::release::{ReleaseInfo, Resolution, VersionSelector};

/// Resolves selectors against a release feed
pub struct ReleaseResolver<F> {
    feed: F,
    tag_marker: Option<String>,
}

impl<F: ReleaseFeed> ReleaseResolver<F> {
    pub fn new(feed: F, tag_marker: Option<String>) -> Self {
        Self {
            feed,
            tag_marker: tag_marker.map(|marker| marker.to_lowercase()),
        }
    }

    /// Queries the feed once and picks the release matching `selector`
    ///
    /// # Errors
    ///
    /// - `UpstreamUnavailable` / `MissingCredential` from the feed, or an empty feed
    /// - `NoProductionRelease` when `Latest` (or the `Preview` fallback) finds nothing
    /// - `VersionNotFound` when no tag contains the exact version
    pub fn resolve(&self, selector: &VersionSelector) -> Result<Resolution> {
        let releases = self.feed.list_recent_releases()?;
        if releases.is_empty() {
            return Err(SetupError::UpstreamUnavailable(
                "the release feed returned no releases".to_string(),
            ));
        }

        let releases = self.filter_by_marker(releases);
        select_release(&releases, selector)
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    fn filter_by_marker(&self, releases: Vec<ReleaseInfo>) -> Vec<ReleaseInfo> {
        match &self.tag_marker {
            Some(marker) => releases
                .into_iter()
                .filter(|release| release.tag_name.to_lowercase().contains(marker.as_str()))
                .collect(),
            None => releases,
        }
    }
}

/// Picks a release from an already newest-first list
pub fn select_release(releases: &[ReleaseInfo], selector: &VersionSelector) -> Result<Resolution> {
    match selector {
        VersionSelector::Latest => {
            let release = first_production(releases)?;
            info!(
                "Chosen first production release with version {}",
                release.tag_name
            );
            Ok(Resolution::Matched(release))
        }
        VersionSelector::Preview => match releases.iter().find(|r| r.is_prerelease) {
            Some(release) => {
                info!("Resolved latest preview version to {}", release.tag_name);
                Ok(Resolution::Matched(release.clone()))
            }
            None => {
                warn!("Failed to retrieve pre-release, falling back to latest.");
                let release = first_production(releases)?;
                info!("Choosing latest release with version {}", release.tag_name);
                Ok(Resolution::PreviewFallback(release))
            }
        },
        // Substring match: "1.0" also matches "v1.0.1"
        VersionSelector::Exact(version) => {
            let release = releases
                .iter()
                .find(|r| r.tag_name.contains(version.as_str()))
                .ok_or_else(|| SetupError::VersionNotFound {
                    version: version.clone(),
                })?;
            info!("Resolved version {} to {}", version, release.tag_name);
            Ok(Resolution::Matched(release.clone()))
        }
    }
}

fn first_production(releases: &[ReleaseInfo]) -> Result<ReleaseInfo> {
    releases
        .iter()
        .find(|r| !r.is_prerelease)
        .cloned()
        .ok_or(SetupError::NoProductionRelease)
}
