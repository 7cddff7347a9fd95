use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::bencode::DEFAULT_MAX_DEPTH;

pub const DEFAULT_CONFIG_PATH: &str = "rusbit.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub max_depth: usize,        // deepest list/dict nesting the decoder accepts
    pub show_piece_hashes: bool, // print every piece hash in `info`
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            show_piece_hashes: true,
        }
    }
}

impl Config {
    /// Loads the config at `path`, falling back to defaults when it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Self::from_toml(&contents)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if config.max_depth == 0 {
            anyhow::bail!("max_depth must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join(DEFAULT_CONFIG_PATH)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("max_depth = 16").unwrap();
        assert_eq!(config.max_depth, 16);
        assert!(config.show_piece_hashes);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_PATH);
        fs::write(&path, "show_piece_hashes = false\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.show_piece_hashes);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_toml("max_depth = 0").is_err());
        assert!(Config::from_toml("max_dpeth = 3").is_err());
        assert!(Config::from_toml("max_depth = \"deep\"").is_err());
    }

    #[test]
    fn test_serializes_back() {
        let text = toml::to_string(&Config::default()).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), Config::default());
    }
}
