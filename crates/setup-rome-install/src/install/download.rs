//! Asset download
//!
//! Streams a release asset into a temporary file next to its destination and
//! persists it under the final name, so an interrupted download never leaves
//! a truncated binary behind.

use reqwest::blocking::Client;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Download error types
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with an error status
    #[error("HTTP {status} downloading {url}")]
    Status {
        url: Url,
        status: u16,
        #[source]
        source: reqwest::Error,
    },

    /// Connection, TLS or timeout failure
    #[error("Network error downloading {url}: {source}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    /// The connection broke while the body was streaming
    #[error("Download of {url} interrupted: {source}")]
    Interrupted {
        url: Url,
        #[source]
        source: io::Error,
    },

    /// Local filesystem error while writing or persisting the file
    #[error("I/O error during {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// The HTTP status when it is in the 4xx range
    pub fn client_status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } if (400..500).contains(status) => Some(*status),
            _ => None,
        }
    }
}

/// Downloads `url` to `dest`, creating the parent directory if needed
///
/// # Returns
///
/// Number of bytes written
///
/// # Errors
///
/// - `Status` for non-success responses
/// - `Transport` when the request cannot be sent
/// - `Interrupted` when reading the body fails
/// - `Io` when creating, writing or persisting the file fails
pub fn fetch_to(client: &Client, url: &Url, dest: &Path) -> Result<u64, FetchError> {
    let dest_dir = dest.parent().ok_or_else(|| FetchError::Io {
        operation: format!("get parent directory of {}", dest.display()),
        source: io::Error::other("no parent directory"),
    })?;
    fs::create_dir_all(dest_dir).map_err(|e| FetchError::Io {
        operation: format!("create directory {}", dest_dir.display()),
        source: e,
    })?;

    // Send GET request
    let mut response = client
        .get(url.as_str())
        .send()
        .map_err(|e| FetchError::Transport {
            url: url.clone(),
            source: e,
        })?;

    // Check status and convert to error without unwrap
    if let Err(err) = response.error_for_status_ref() {
        return Err(FetchError::Status {
            url: url.clone(),
            status: response.status().as_u16(),
            source: err,
        });
    }

    // Temp file in the destination directory keeps the final rename on one filesystem
    let mut temp_file = tempfile::NamedTempFile::new_in(dest_dir).map_err(|e| FetchError::Io {
        operation: format!("create temporary file in {}", dest_dir.display()),
        source: e,
    })?;

    let mut downloaded: u64 = 0;
    let mut buffer = [0; 8192];

    loop {
        let bytes_read = response.read(&mut buffer).map_err(|e| FetchError::Interrupted {
            url: url.clone(),
            source: e,
        })?;

        if bytes_read == 0 {
            break;
        }

        temp_file
            .write_all(&buffer[..bytes_read])
            .map_err(|e| FetchError::Io {
                operation: "write to temporary file".to_string(),
                source: e,
            })?;

        downloaded += bytes_read as u64;
    }

    temp_file.as_file().sync_all().map_err(|e| FetchError::Io {
        operation: "sync temporary file".to_string(),
        source: e,
    })?;

    temp_file.persist(dest).map_err(|e| FetchError::Io {
        operation: format!("persist {}", dest.display()),
        source: e.error,
    })?;

    Ok(downloaded)
}

/// Sets mode 0755 on `path`
#[cfg(unix)]
pub fn set_executable_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions)
}

/// Windows has no executable bit
#[cfg(not(unix))]
pub fn set_executable_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tempfile::TempDir;

    fn client() -> Client {
        crate::github::build_default_client().unwrap()
    }

    #[test]
    fn test_fetch_writes_body_to_destination() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/download/rome-linux-x64")
            .with_status(200)
            .with_body(b"#!/bin/sh\necho rome\n")
            .create();

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("bin").join("rome-linux-x64");
        let url = Url::parse(&format!("{}/download/rome-linux-x64", server.url())).unwrap();

        let written = fetch_to(&client(), &url, &dest).unwrap();

        mock.assert();
        assert_eq!(written, 20);
        assert_eq!(fs::read(&dest).unwrap(), b"#!/bin/sh\necho rome\n");
    }

    #[test]
    fn test_fetch_replaces_existing_file() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/rome")
            .with_status(200)
            .with_body("new")
            .create();

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("rome");
        fs::write(&dest, "old contents").unwrap();

        let url = Url::parse(&format!("{}/rome", server.url())).unwrap();
        fetch_to(&client(), &url, &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn test_fetch_404_is_client_status() {
        let mut server = Server::new();
        let _mock = server.mock("GET", "/missing").with_status(404).create();

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("rome");
        let url = Url::parse(&format!("{}/missing", server.url())).unwrap();

        let err = fetch_to(&client(), &url, &dest).unwrap_err();
        assert_eq!(err.client_status(), Some(404));
        assert!(!dest.exists(), "nothing is written on error");
    }

    #[test]
    fn test_fetch_500_is_not_client_status() {
        let mut server = Server::new();
        let _mock = server.mock("GET", "/broken").with_status(503).create();

        let temp = TempDir::new().unwrap();
        let url = Url::parse(&format!("{}/broken", server.url())).unwrap();

        let err = fetch_to(&client(), &url, &temp.path().join("rome")).unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status, 503),
            other => panic!("Expected Status error, got: {other:?}"),
        }
        assert_eq!(
            fetch_to(&client(), &url, &temp.path().join("rome"))
                .unwrap_err()
                .client_status(),
            None
        );
    }

    #[test]
    fn test_fetch_connection_refused_is_transport() {
        // Nothing listens on port 9 (discard) on test machines
        let url = Url::parse("http://127.0.0.1:9/rome").unwrap();
        let temp = TempDir::new().unwrap();

        let err = fetch_to(&client(), &url, &temp.path().join("rome")).unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        assert_eq!(err.client_status(), None);
    }

    #[test]
    fn test_unwritable_destination_is_io_error() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/rome")
            .with_status(200)
            .with_body("bin")
            .create();

        // The parent of the destination is a regular file
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let url = Url::parse(&format!("{}/rome", server.url())).unwrap();

        let err = fetch_to(&client(), &url, &blocker.join("rome")).unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
        assert_eq!(err.client_status(), None);
    }

    #[test]
    #[cfg(unix)]
    fn test_set_executable_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rome");
        fs::write(&path, "bin").unwrap();

        set_executable_permissions(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
