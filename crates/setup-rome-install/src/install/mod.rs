pub mod download;
pub mod installer;
pub mod locate;
pub mod platform;
pub mod release;
pub mod resolve;

// Re-export for convenience
pub use download::{FetchError, fetch_to, set_executable_permissions};
pub use installer::{InstallPlan, InstallResult, Installer};
pub use locate::{ArtifactRef, binary_base_name, locate, release_page_url};
pub use platform::{Arch, Os, PlatformDescriptor};
pub use release::{ReleaseInfo, Resolution, VersionSelector};
pub use resolve::{ReleaseResolver, select_release};
