// Config resolution: --config / $TRIPBOARD_CONFIG, then
// ~/.config/tripboard/config.toml, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use tripboard_dashboard::BoardConfig;

use crate::exit_codes::EXIT_CONFIG;
use crate::CliError;

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tripboard").join("config.toml"))
}

pub fn load(explicit: Option<&Path>) -> Result<BoardConfig, CliError> {
    if let Some(path) = explicit {
        return load_file(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => load_file(&path),
        _ => {
            log::debug!("no config file, using defaults");
            Ok(BoardConfig::default())
        }
    }
}

fn load_file(path: &Path) -> Result<BoardConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|e| CliError {
        code: EXIT_CONFIG,
        message: format!("cannot read config {}: {e}", path.display()),
        hint: None,
    })?;
    let config = BoardConfig::from_toml(&text).map_err(|e| CliError {
        code: EXIT_CONFIG,
        message: format!("{}: {e}", path.display()),
        hint: None,
    })?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display]\npage_size = 3\n").unwrap();
        let config = load(Some(path.as_path())).unwrap();
        assert_eq!(config.display.page_size, 3);
    }

    #[test]
    fn explicit_missing_file_is_config_error() {
        let dir = tempdir().unwrap();
        let err = load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert_eq!(err.code, EXIT_CONFIG);
        assert!(err.message.contains("absent.toml"));
    }

    #[test]
    fn invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display]\npage_size = 0\n").unwrap();
        let err = load(Some(path.as_path())).unwrap_err();
        assert_eq!(err.code, EXIT_CONFIG);
        assert!(err.message.contains("page_size"));
    }
}
