//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Name of the environment variable pointing at the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "PATTERN_SW_ROOT";

/// Get the path to the root of the software directory.
///
/// The root is read from the `PATTERN_SW_ROOT` environment variable, and is the directory
/// containing `params` and `sessions`.
pub fn get_sw_root() -> Result<PathBuf, env::VarError> {
    env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
