//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Environment variable pointing at the console's software root.
///
/// The root holds the `params` directory and is where `sessions` are created.
pub const SW_ROOT_ENV_VAR: &str = "ARM_CONSOLE_ROOT";

/// Get the software root directory from the environment.
pub fn get_console_root() -> Result<PathBuf, env::VarError> {
    env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}

/// Short description of the host, used in the start of execution logs.
pub fn describe() -> String {
    format!("{} ({})", env::consts::OS, env::consts::ARCH)
}
