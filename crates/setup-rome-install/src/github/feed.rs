//! Release listing through the GitHub GraphQL API

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use setup_rome_core::config::consts;
use setup_rome_core::{Result, SetupError, ToolSpec};
use url::Url;

use crate::install::release::ReleaseInfo;

/// Source of recent releases, newest first
pub trait ReleaseFeed {
    /// Lists up to [`consts::feed::RELEASE_PAGE_SIZE`] releases ordered by
    /// creation time, descending
    fn list_recent_releases(&self) -> Result<Vec<ReleaseInfo>>;
}

impl<F: ReleaseFeed + ?Sized> ReleaseFeed for &F {
    fn list_recent_releases(&self) -> Result<Vec<ReleaseInfo>> {
        (**self).list_recent_releases()
    }
}

const RELEASES_QUERY: &str = r#"
query($owner: String!, $name: String!, $first: Int!) {
    repository(owner: $owner, name: $name) {
        releases(orderBy: { field: CREATED_AT, direction: DESC }, first: $first) {
            nodes {
                isPrerelease
                tagName
            }
        }
    }
}"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<RepositoryData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct RepositoryData {
    repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    releases: ReleaseConnection,
}

#[derive(Debug, Deserialize)]
struct ReleaseConnection {
    nodes: Vec<ReleaseInfo>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Release feed backed by the GitHub GraphQL API
///
/// The token is only checked when the feed is queried, so a run that finds
/// the binary already installed never needs one.
pub struct GitHubReleaseFeed {
    client: Client,
    endpoint: Url,
    token: Option<String>,
    owner: String,
    repo: String,
}

impl GitHubReleaseFeed {
    /// Creates a feed for the repository of `tool`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the built-in GraphQL endpoint does not parse
    pub fn new(client: Client, tool: &ToolSpec, token: Option<String>) -> Result<Self> {
        let endpoint = super::url::github_graphql_url().map_err(|e| SetupError::InvalidInput {
            field: "graphql-endpoint".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            token: token.filter(|t| !t.trim().is_empty()),
            owner: tool.owner.clone(),
            repo: tool.repo.clone(),
        })
    }

    /// Points the feed at another GraphQL endpoint
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ReleaseFeed for GitHubReleaseFeed {
    fn list_recent_releases(&self) -> Result<Vec<ReleaseInfo>> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| SetupError::MissingCredential("github-token".to_string()))?;

        let body = json!({
            "query": RELEASES_QUERY,
            "variables": {
                "owner": self.owner,
                "name": self.repo,
                "first": consts::feed::RELEASE_PAGE_SIZE,
            },
        });

        debug!(
            "Querying releases of {}/{} from {}",
            self.owner, self.repo, self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.as_str())
            .bearer_auth(token)
            .json(&body)
            .send()
            .map_err(|e| SetupError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SetupError::UpstreamUnavailable(format!(
                "GraphQL API responded with HTTP {}",
                status
            )));
        }

        let payload: GraphQlResponse = response
            .json()
            .map_err(|e| SetupError::UpstreamUnavailable(format!("invalid response: {}", e)))?;

        if !payload.errors.is_empty() {
            let messages: Vec<&str> = payload.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(SetupError::UpstreamUnavailable(messages.join("; ")));
        }

        let repository = payload
            .data
            .and_then(|data| data.repository)
            .ok_or_else(|| {
                SetupError::UpstreamUnavailable(format!(
                    "repository {}/{} not found",
                    self.owner, self.repo
                ))
            })?;

        let releases = repository.releases.nodes;
        debug!("Release feed returned {} releases", releases.len());
        Ok(releases)
    }
}
