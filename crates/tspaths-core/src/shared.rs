use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing::debug;

use crate::PathsError;

/// Directory the iOS host app can read and write, written once at startup.
#[derive(Debug, Default)]
pub struct IosSharedDir {
    dir: OnceLock<PathBuf>,
}

/// Process-wide slot filled by the iOS app shim.
pub static IOS_SHARED_DIR: IosSharedDir = IosSharedDir::new();

impl IosSharedDir {
    pub const fn new() -> Self {
        Self {
            dir: OnceLock::new(),
        }
    }

    /// Stores the directory. Later calls fail and keep the first value.
    pub fn set(&self, dir: impl Into<PathBuf>) -> Result<(), PathsError> {
        let dir = dir.into();
        debug!(dir = %dir.display(), "setting ios shared dir");
        self.dir
            .set(dir)
            .map_err(|_| PathsError::SharedDirAlreadySet)
    }

    pub fn get(&self) -> Option<&Path> {
        self.dir.get().map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    #[test]
    fn second_set_is_rejected() {
        let slot = IosSharedDir::new();
        assert_eq!(slot.get(), None);

        slot.set("/private/var/mobile/shared")
            .expect("first set should succeed");
        assert_eq!(
            slot.set("/elsewhere"),
            Err(PathsError::SharedDirAlreadySet)
        );
        assert_eq!(slot.get(), Some(Path::new("/private/var/mobile/shared")));
    }

    #[test]
    fn readers_see_unset_or_full_value() {
        let slot = Arc::new(IosSharedDir::new());
        let expected = "/var/mobile/Containers/Shared/AppGroup/tailscale";

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let slot = Arc::clone(&slot);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        if let Some(dir) = slot.get() {
                            assert_eq!(dir, Path::new(expected));
                        }
                    }
                })
            })
            .collect();

        slot.set(expected).expect("set should succeed");
        for reader in readers {
            reader.join().expect("reader thread should not panic");
        }
        assert_eq!(slot.get(), Some(Path::new(expected)));
    }
}
