//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Reads `config.toml`, substituting environment references and `~` paths.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io(e),
        })?;
        Self::load_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Ok(Self::expand_paths(Config::default()));
        }
        Self::load(path)
    }

    /// Parse TOML text.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(Self::expand_paths(config))
    }

    /// Substitute `${VAR}` and `${VAR:-fallback}` references.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let mut expanded = String::with_capacity(content.len());
        let mut last = 0;
        for caps in re.captures_iter(content) {
            let Some(whole) = caps.get(0) else { continue };
            let name = &caps[1];
            let value = match (std::env::var(name), caps.get(2)) {
                (Ok(value), _) => value,
                (Err(_), Some(fallback)) => fallback.as_str().to_string(),
                (Err(_), None) => return Err(ConfigError::EnvVarNotSet(name.to_string())),
            };
            expanded.push_str(&content[last..whole.start()]);
            expanded.push_str(&value);
            last = whole.end();
        }
        expanded.push_str(&content[last..]);
        Ok(expanded)
    }

    /// Expand a leading `~` to the home directory.
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }

    fn expand_paths(mut config: Config) -> Config {
        config.bookmarks.file = Self::expand_path_buf(&config.bookmarks.file);
        config.storage.path = Self::expand_path_buf(&config.storage.path);
        config
    }

    fn expand_path_buf(path: &Path) -> PathBuf {
        PathBuf::from(Self::expand_path(&path.to_string_lossy()))
    }
}
