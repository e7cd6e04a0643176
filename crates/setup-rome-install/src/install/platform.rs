use setup_rome_core::{Result, SetupError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    Darwin,
    Windows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X64,
    Arm64,
}

impl Os {
    /// Parses a runner OS identifier
    ///
    /// Accepts the Node-style names used by the release assets (`linux`,
    /// `darwin`, `win32`) and the Rust host names (`macos`, `windows`).
    pub fn parse(id: &str) -> Result<Self> {
        match id {
            "linux" => Ok(Os::Linux),
            "darwin" | "macos" => Ok(Os::Darwin),
            "win32" | "windows" => Ok(Os::Windows),
            other => Err(SetupError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// OS segment of release asset names
    pub fn asset_segment(self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
            Os::Windows => "win32",
        }
    }

    /// Linux and macOS need the executable bit set explicitly
    pub fn is_posix(self) -> bool {
        matches!(self, Os::Linux | Os::Darwin)
    }
}

impl Arch {
    /// Parses a runner architecture identifier, ignoring case (`X64`, `ARM64`)
    pub fn parse(id: &str) -> Result<Self> {
        match id.to_lowercase().as_str() {
            "x64" => Ok(Arch::X64),
            "arm64" => Ok(Arch::Arm64),
            _ => Err(SetupError::UnsupportedArchitecture(id.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.asset_segment())
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized description of the platform a binary is installed for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDescriptor {
    pub os: Os,
    pub arch: Arch,
    /// ".exe" on Windows, empty elsewhere
    pub binary_extension: &'static str,
}

impl PlatformDescriptor {
    /// Resolves the descriptor from explicit OS and architecture identifiers
    ///
    /// A missing architecture is an error; there is no default.
    pub fn resolve(os_id: &str, arch_id: Option<&str>) -> Result<Self> {
        let os = Os::parse(os_id)?;
        let arch = match arch_id {
            Some(id) => Arch::parse(id)?,
            None => {
                return Err(SetupError::UnsupportedArchitecture(
                    "<unset> (expected RUNNER_ARCH)".to_string(),
                ));
            }
        };
        let binary_extension = if os == Os::Windows { ".exe" } else { "" };

        Ok(Self {
            os,
            arch,
            binary_extension,
        })
    }

    /// OS identifier of the machine this program was compiled for
    pub fn host_os_id() -> &'static str {
        std::env::consts::OS
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}
