use std::path::{Path, PathBuf};

use configparser::ini::Ini;

use crate::error::{Error, Result};

pub const CONFIG_FILENAME: &str = "config.cfg";

const CONFIG_SECTION: &str = "CONFIG";
const MUSIC_PATH_KEY: &str = "music_path";

/// Default directory searched for `config.cfg` when none is given on the
/// command line.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tunepull"))
}

/// Resolve the music output directory from `config.cfg` in `config_dir`.
///
/// The configured path is returned as-is when it exists on disk; a configured
/// path that doesn't exist falls back to the user's home directory. A missing
/// config file or a missing `CONFIG`/`music_path` entry is fatal.
pub fn music_path(config_dir: &Path) -> Result<PathBuf> {
    let config_file = config_dir.join(CONFIG_FILENAME);
    if !config_file.exists() {
        tracing::error!(
            "{} doesn't exist in the directory {}",
            CONFIG_FILENAME,
            config_dir.display()
        );
        return Err(Error::ConfigNotFound(config_dir.to_path_buf()));
    }

    let mut ini = Ini::new();
    ini.load(&config_file).map_err(|e| {
        tracing::error!("failed to parse {}: {}", config_file.display(), e);
        Error::ConfigMalformed(e)
    })?;

    let configured = ini.get(CONFIG_SECTION, MUSIC_PATH_KEY).ok_or_else(|| {
        tracing::error!("missing [{}] {} in {}", CONFIG_SECTION, MUSIC_PATH_KEY, config_file.display());
        Error::ConfigMalformed(format!(
            "missing [{}] {} in {}",
            CONFIG_SECTION,
            MUSIC_PATH_KEY,
            config_file.display()
        ))
    })?;

    let configured = PathBuf::from(configured);
    if configured.exists() {
        Ok(configured)
    } else {
        tracing::warn!(
            "configured music path {} doesn't exist, using the home directory",
            configured.display()
        );
        dirs::home_dir().ok_or(Error::NoHomeDir)
    }
}
