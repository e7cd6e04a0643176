//! URL construction helpers for GitHub resources

use setup_rome_core::config::consts;
use thiserror::Error;
use url::Url;

/// Builds the GraphQL endpoint URL
pub fn github_graphql_url() -> Result<Url, url::ParseError> {
    Url::parse(consts::feed::GRAPHQL_ENDPOINT)
}

/// Parses a release host (e.g. "https://github.com") into a base URL
///
/// # Errors
///
/// Returns error if the host does not parse or cannot carry path segments
pub fn parse_host(host: &str) -> Result<Url, UrlError> {
    let url = Url::parse(host)?;
    if url.cannot_be_a_base() {
        return Err(UrlError::CannotBeABase { url });
    }
    Ok(url)
}

/// Helper to safely add path segments to URL
///
/// Segments are appended after any path the URL already has, so a host
/// mounted under a prefix keeps it. Every segment is percent-encoded on its
/// own, so a `/` inside a tag stays inside that segment.
///
/// # Errors
///
/// Returns error if URL cannot be a base
pub fn add_path_segments(url: &mut Url, segments: &[&str]) -> Result<(), UrlError> {
    // Clone URL before mutable borrow to avoid borrow checker error
    let url_for_error = url.clone();
    url.path_segments_mut()
        .map_err(|_| UrlError::CannotBeABase { url: url_for_error })?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

/// URL construction errors
#[derive(Debug, Error)]
pub enum UrlError {
    /// URL cannot be used as a base
    #[error("URL cannot be a base: {url}")]
    CannotBeABase {
        /// The problematic URL
        url: Url,
    },

    /// Invalid URL parse error
    #[error("Invalid URL: {0}")]
    ParseError(#[from] url::ParseError),
}
