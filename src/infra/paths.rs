// src/infra/paths.rs — Config path management
//
// All paths respect the FOVEA_HOME environment variable for isolation.
// When FOVEA_HOME is set, config lives under that directory.
// When unset, config uses ~/.fovea/.

use std::path::PathBuf;

/// Returns the FOVEA_HOME override, if set.
fn fovea_home() -> Option<PathBuf> {
    std::env::var_os("FOVEA_HOME").map(PathBuf::from)
}

/// Configuration directory: $FOVEA_HOME/ or ~/.fovea/
pub fn config_dir() -> PathBuf {
    if let Some(home) = fovea_home() {
        return home;
    }
    dirs_home().join(".fovea")
}

/// Home directory
pub fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .expect("Could not determine home directory")
        .home_dir()
        .to_path_buf()
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
