use std::{env, fs, io, path::Path};

/// Read-only filesystem capability used to pick between candidate paths.
pub trait DirProbe: Send + Sync {
    /// Reports whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> io::Result<bool>;
}

/// Probes the real filesystem, following symlinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDirProbe;

impl DirProbe for StdDirProbe {
    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        fs::metadata(path).map(|metadata| metadata.is_dir())
    }
}

/// Environment variable lookup.
pub trait Env: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}
