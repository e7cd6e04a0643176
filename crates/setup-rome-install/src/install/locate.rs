//! Artifact location
//!
//! Maps a resolved release and a platform onto the release asset to download.
//! Pure: no network, no filesystem.

use setup_rome_core::{Result, SetupError, ToolSpec};
use url::Url;

use crate::github::url::{UrlError, add_path_segments, parse_host};
use crate::install::platform::PlatformDescriptor;
use crate::install::release::ReleaseInfo;

/// The asset to download and the file name it is installed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub download_url: Url,
    /// Release asset file name, e.g. "rome-win32-x64.exe"
    pub asset_name: String,
    /// Installed file name, e.g. "rome.exe", so the tool is invocable by its plain name
    pub local_binary_name: String,
}

/// Asset base name, e.g. "rome-linux-x64"
pub fn binary_base_name(tool: &ToolSpec, platform: &PlatformDescriptor) -> String {
    format!(
        "{}-{}-{}",
        tool.name,
        platform.os.asset_segment(),
        platform.arch.as_str()
    )
}

/// Locates the release asset for `platform`
///
/// The asset is named after the platform, the installed file after the tool.
/// The URL follows `{host}/{owner}/{repo}/releases/download/{tag}/{file}`
/// with the tag and file name encoded as independent segments.
///
/// # Errors
///
/// Returns `InvalidInput` if the tool's release host is not a usable base URL
pub fn locate(
    release: &ReleaseInfo,
    platform: &PlatformDescriptor,
    tool: &ToolSpec,
) -> Result<ArtifactRef> {
    let asset_name = format!(
        "{}{}",
        binary_base_name(tool, platform),
        platform.binary_extension
    );
    let local_binary_name = format!("{}{}", tool.name, platform.binary_extension);

    let mut download_url = parse_host(&tool.release_host).map_err(invalid_host)?;
    add_path_segments(
        &mut download_url,
        &[
            &tool.owner,
            &tool.repo,
            "releases",
            "download",
            &release.tag_name,
            &asset_name,
        ],
    )
    .map_err(invalid_host)?;

    Ok(ArtifactRef {
        download_url,
        asset_name,
        local_binary_name,
    })
}

/// Human-browsable page of a release, e.g. for error messages
///
/// # Errors
///
/// Returns `InvalidInput` if the tool's release host is not a usable base URL
pub fn release_page_url(tag: &str, tool: &ToolSpec) -> Result<Url> {
    let mut url = parse_host(&tool.release_host).map_err(invalid_host)?;
    add_path_segments(&mut url, &[&tool.owner, &tool.repo, "releases", "tag", tag])
        .map_err(invalid_host)?;
    Ok(url)
}

fn invalid_host(err: UrlError) -> SetupError {
    SetupError::InvalidInput {
        field: "release-host".to_string(),
        reason: err.to_string(),
    }
}
