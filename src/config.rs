use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Optional TOML config; every key can be overridden on the CLI.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub author: Option<String>,
    pub days: Option<u32>,
    #[serde(default)]
    pub roots: Vec<PathBuf>,
    #[serde(rename = "ignore-file")]
    pub ignore_file: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a config file.
///
/// # Errors
/// Returns an error when the file cannot be read or is not valid TOML.
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg: FileConfig = toml::from_str(
            "author = \"Alice\"\ndays = 14\nroots = [\"~/src\", \"/work\"]\nignore-file = \".scanignore\"\n",
        )
        .expect("parse");
        assert_eq!(cfg.author.as_deref(), Some("Alice"));
        assert_eq!(cfg.days, Some(14));
        assert_eq!(cfg.roots.len(), 2);
        assert_eq!(cfg.ignore_file.as_deref(), Some(".scanignore"));
    }

    #[test]
    fn all_keys_are_optional() {
        let cfg: FileConfig = toml::from_str("").expect("parse");
        assert!(cfg.author.is_none());
        assert!(cfg.days.is_none());
        assert!(cfg.roots.is_empty());
        assert!(cfg.ignore_file.is_none());
    }

    #[test]
    fn missing_file_reports_read_error() {
        let err = load_config(Path::new("/nonexistent/standup.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
