//! Platform default locations for tailscaled files and sockets.

pub mod errors;
pub mod os;
pub mod paths;
pub mod probe;
pub mod shared;

pub use errors::PathsError;
pub use os::Os;
pub use paths::{
    DefaultPaths, PathResolver, StateFileFn, default_tailscaled_socket,
    default_tailscaled_state_file, install_state_file_override, legacy_config_path,
};
pub use probe::{DirProbe, Env, ProcessEnv, StdDirProbe};
pub use shared::{IOS_SHARED_DIR, IosSharedDir};
