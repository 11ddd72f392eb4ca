use std::{
    fmt,
    path::Path,
    sync::{Arc, OnceLock},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{DirProbe, Env, Os, PathsError, ProcessEnv, StdDirProbe};

/// Config file of the pre-tailscaled relaynode daemon.
pub const LEGACY_CONFIG_PATH: &str = "/var/lib/tailscale/relay.conf";
/// Control socket location on macOS.
pub const DARWIN_SOCKET: &str = "/var/run/tailscaled.socket";
/// Socket inside the Synology package install directory (`SYNOPKG_PKGDEST`).
pub const SYNOLOGY_SOCKET: &str = "/volume1/@appstore/Tailscale/var/tailscaled.sock";
pub const VAR_RUN_DIR: &str = "/var/run";
pub const VAR_RUN_SOCKET: &str = "/var/run/tailscale/tailscaled.sock";
/// Last resort, relative to the daemon working directory.
pub const FALLBACK_SOCKET: &str = "tailscaled.sock";
/// Environment variable holding the Windows local application data directory.
pub const LOCAL_APP_DATA: &str = "LocalAppData";

/// Replaces the state file computation entirely.
pub type StateFileFn = Arc<dyn Fn() -> String + Send + Sync>;

static STATE_FILE_OVERRIDE: OnceLock<StateFileFn> = OnceLock::new();

/// Installs a process-wide state file override used by
/// [`default_tailscaled_state_file`]. Only the first install wins.
pub fn install_state_file_override<F>(f: F) -> Result<(), PathsError>
where
    F: Fn() -> String + Send + Sync + 'static,
{
    STATE_FILE_OVERRIDE
        .set(Arc::new(f))
        .map_err(|_| PathsError::StateFileOverrideInstalled)
}

/// Computes default daemon paths for one OS.
///
/// Every lookup returns either a path or the empty string, which means no
/// reasonable default exists and the caller must require an explicit path.
#[derive(Clone)]
pub struct PathResolver {
    os: Os,
    probe: Arc<dyn DirProbe>,
    env: Arc<dyn Env>,
    state_file_override: Option<StateFileFn>,
}

/// All defaults of one resolver, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultPaths {
    pub os: Os,
    pub legacy_config: String,
    pub socket: String,
    pub state_file: String,
}

impl PathResolver {
    /// Resolver for `os` backed by the real filesystem and process environment.
    pub fn new(os: Os) -> Self {
        Self {
            os,
            probe: Arc::new(StdDirProbe),
            env: Arc::new(ProcessEnv),
            state_file_override: None,
        }
    }

    /// Resolver for the running host, honoring the process-wide override.
    pub fn host() -> Self {
        let resolver = Self::new(Os::current());
        match STATE_FILE_OVERRIDE.get() {
            Some(f) => resolver.with_state_file_override(Arc::clone(f)),
            None => resolver,
        }
    }

    pub fn with_probe(mut self, probe: Arc<dyn DirProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_env(mut self, env: Arc<dyn Env>) -> Self {
        self.env = env;
        self
    }

    pub fn with_state_file_override(mut self, f: StateFileFn) -> Self {
        self.state_file_override = Some(f);
        self
    }

    pub fn os(&self) -> Os {
        self.os
    }

    /// Path of the relaynode config, empty where relaynode never ran.
    pub fn legacy_config_path(&self) -> String {
        if self.os.is_windows() {
            return String::new();
        }
        LEGACY_CONFIG_PATH.to_string()
    }

    /// Path of the tailscaled control socket, or empty if there's no
    /// reasonable default.
    pub fn default_tailscaled_socket(&self) -> String {
        if self.os.is_windows() {
            return String::new();
        }
        if self.os.is_darwin() {
            return DARWIN_SOCKET.to_string();
        }
        if let Some(sock) = self.synology_socket() {
            return sock.to_string();
        }
        if self.dir_exists(Path::new(VAR_RUN_DIR)) {
            return VAR_RUN_SOCKET.to_string();
        }
        FALLBACK_SOCKET.to_string()
    }

    /// Heuristic for a Synology DSM package install.
    // TODO: confirm the package directory is unchanged on DSM 7.
    fn synology_socket(&self) -> Option<&'static str> {
        let dir = Path::new(SYNOLOGY_SOCKET).parent()?;
        self.dir_exists(dir).then_some(SYNOLOGY_SOCKET)
    }

    /// Path of the tailscaled state file, or empty if there's no reasonable
    /// default.
    pub fn default_tailscaled_state_file(&self) -> String {
        if let Some(f) = &self.state_file_override {
            return f();
        }
        if self.os.is_windows() {
            let base = self.env.var(LOCAL_APP_DATA).unwrap_or_default();
            return join(self.os, &[&base, "Tailscale", "server-state.conf"]);
        }
        String::new()
    }

    pub fn defaults(&self) -> DefaultPaths {
        DefaultPaths {
            os: self.os,
            legacy_config: self.legacy_config_path(),
            socket: self.default_tailscaled_socket(),
            state_file: self.default_tailscaled_state_file(),
        }
    }

    fn dir_exists(&self, path: &Path) -> bool {
        match self.probe.is_dir(path) {
            Ok(is_dir) => is_dir,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "directory probe failed");
                false
            }
        }
    }
}

impl fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResolver")
            .field("os", &self.os)
            .field("state_file_override", &self.state_file_override.is_some())
            .finish_non_exhaustive()
    }
}

/// Joins non-empty components with the separator of `os`, folding `/` into
/// `\` on Windows and collapsing repeated separators. A leading `\\` (UNC
/// prefix) is kept.
fn join(os: Os, parts: &[&str]) -> String {
    let sep = os.separator();
    let joined = parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(&sep.to_string());

    let is_sep = |c: char| c == '/' || c == sep;
    let unc = os.is_windows() && joined.len() >= 2 && joined.chars().take(2).all(is_sep);
    let mut out = String::with_capacity(joined.len());
    let rest = if unc {
        out.push(sep);
        out.push(sep);
        &joined[2..]
    } else {
        joined.as_str()
    };
    for c in rest.chars() {
        if !is_sep(c) {
            out.push(c);
        } else if !out.ends_with(sep) {
            out.push(sep);
        }
    }
    out
}

/// See [`PathResolver::legacy_config_path`].
pub fn legacy_config_path() -> String {
    PathResolver::host().legacy_config_path()
}

/// See [`PathResolver::default_tailscaled_socket`].
pub fn default_tailscaled_socket() -> String {
    PathResolver::host().default_tailscaled_socket()
}

/// See [`PathResolver::default_tailscaled_state_file`].
pub fn default_tailscaled_state_file() -> String {
    PathResolver::host().default_tailscaled_state_file()
}
