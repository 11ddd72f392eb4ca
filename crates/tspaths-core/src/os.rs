use std::{env, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::PathsError;

/// Operating system family a default path is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Windows,
    Darwin,
    Ios,
    Linux,
    FreeBsd,
    OpenBsd,
    Android,
    /// Any remaining unix-like target.
    Other,
}

impl Os {
    /// Returns the OS this binary was built for.
    pub fn current() -> Self {
        env::consts::OS.parse().unwrap_or(Os::Other)
    }

    pub fn is_windows(self) -> bool {
        matches!(self, Os::Windows)
    }

    /// macOS proper. iOS builds do not take the macOS socket location.
    pub fn is_darwin(self) -> bool {
        matches!(self, Os::Darwin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Os::Windows => "windows",
            Os::Darwin => "darwin",
            Os::Ios => "ios",
            Os::Linux => "linux",
            Os::FreeBsd => "freebsd",
            Os::OpenBsd => "openbsd",
            Os::Android => "android",
            Os::Other => "other",
        }
    }

    /// Path separator used when joining components for this OS.
    pub(crate) fn separator(self) -> char {
        if self.is_windows() { '\\' } else { '/' }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = PathsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "windows" => Ok(Os::Windows),
            "darwin" | "macos" => Ok(Os::Darwin),
            "ios" => Ok(Os::Ios),
            "linux" => Ok(Os::Linux),
            "freebsd" => Ok(Os::FreeBsd),
            "openbsd" => Ok(Os::OpenBsd),
            "android" => Ok(Os::Android),
            "other" => Ok(Os::Other),
            _ => Err(PathsError::UnknownOs(value.to_string())),
        }
    }
}
