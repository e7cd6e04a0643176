use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    // Platform errors
    #[error("UNSUPPORTED_PLATFORM: unsupported platform '{0}'")]
    UnsupportedPlatform(String),

    #[error("UNSUPPORTED_ARCHITECTURE: unsupported architecture '{0}'")]
    UnsupportedArchitecture(String),

    // Release feed errors
    #[error("UPSTREAM_UNAVAILABLE: failed to retrieve the list of releases: {0}")]
    UpstreamUnavailable(String),

    #[error("NO_PRODUCTION_RELEASE: no production release found in the release feed")]
    NoProductionRelease,

    #[error("VERSION_NOT_FOUND: unable to find a release for the version {version}")]
    VersionNotFound { version: String },

    #[error("MISSING_CREDENTIAL: input '{0}' is required to query the release feed")]
    MissingCredential(String),

    // Download errors
    #[error(
        "DOWNLOAD_CLIENT_ERROR: failed to retrieve the binary for {tool} version '{requested}' \
         (resolved to tag '{tag}', HTTP {status}). Is {requested} ({release_url}) a valid {tool} version?"
    )]
    DownloadClientError {
        tool: String,
        requested: String,
        tag: String,
        status: u16,
        release_url: String,
    },

    #[error("DOWNLOAD_TRANSPORT_ERROR: failed to retrieve the binary from '{url}': {source}")]
    DownloadTransportError {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // Input errors
    #[error("INVALID_INPUT: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl SetupError {
    /// Whether the failure is most likely caused by the user's version input
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            SetupError::VersionNotFound { .. }
                | SetupError::DownloadClientError { .. }
                | SetupError::MissingCredential(_)
                | SetupError::InvalidInput { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;
