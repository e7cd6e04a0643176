//! Mock GitHub endpoints
//!
//! Helpers for standing up the GraphQL release feed and the release asset
//! download on a mockito server.

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{Value, json};

/// GraphQL response body listing `releases` as `(tag, is_prerelease)`, newest first
pub fn graphql_releases_body(releases: &[(&str, bool)]) -> String {
    let nodes: Vec<Value> = releases
        .iter()
        .map(|(tag, prerelease)| json!({ "tagName": tag, "isPrerelease": prerelease }))
        .collect();

    json!({
        "data": {
            "repository": {
                "releases": { "nodes": nodes }
            }
        }
    })
    .to_string()
}

/// GraphQL response body carrying a single error
pub fn graphql_error_body(message: &str) -> String {
    json!({
        "data": null,
        "errors": [{ "message": message, "type": "NOT_FOUND" }]
    })
    .to_string()
}

/// Mocks `POST /graphql` answering with `body`
///
/// Only requests carrying a bearer token match.
pub fn mock_release_feed(server: &mut ServerGuard, body: &str) -> Mock {
    server
        .mock("POST", "/graphql")
        .match_header("authorization", Matcher::Regex("^Bearer .+".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

/// Request path of a release asset
pub fn asset_path(owner: &str, repo: &str, tag: &str, asset: &str) -> String {
    format!("/{}/{}/releases/download/{}/{}", owner, repo, tag, asset)
}

/// Mocks a release asset download answering `status` with `body`
pub fn mock_asset(
    server: &mut ServerGuard,
    path: &str,
    status: usize,
    body: &[u8],
) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body(body)
        .create()
}
