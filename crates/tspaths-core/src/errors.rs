use thiserror::Error;

/// Failures reported by the set-once hooks and OS name parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathsError {
    /// The OS name is not one this crate knows about.
    #[error("unknown operating system: {0}")]
    UnknownOs(String),
    /// The shared directory was already written.
    #[error("ios shared directory is already set")]
    SharedDirAlreadySet,
    /// A process-wide state file override was already installed.
    #[error("state file override is already installed")]
    StateFileOverrideInstalled,
}
