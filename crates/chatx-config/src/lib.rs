use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-level config file name, looked up from the current directory upwards
pub const PROJECT_FILE: &str = "chatx.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("{0} already exists")]
    AlreadyExists(PathBuf),

    #[error("No target author configured (set `author` in {0} or pass --author)")]
    MissingAuthor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration for chatx
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Display name to extract, matched exactly against each message's `from`
    #[serde(default)]
    pub author: String,

    /// Chat export to read
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Text file to (over)write with the joined messages
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// BPE encoding used for exact token counts
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

/// Where a loaded config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`
    Explicit(PathBuf),
    /// Nearest `chatx.toml`
    Project(PathBuf),
    /// Platform config directory
    Global(PathBuf),
    /// No config file found; built-in defaults
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(path)
            | ConfigSource::Project(path)
            | ConfigSource::Global(path) => Some(path),
            ConfigSource::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}", path.display()),
            None => f.write_str(PROJECT_FILE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author: String::new(),
            input: default_input(),
            output: default_output(),
            encoding: default_encoding(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("result.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("messages.txt")
}

fn default_encoding() -> String {
    "cl100k_base".to_string()
}

impl Config {
    /// Load the global config if one exists. Never creates it.
    pub fn load_global(path: Option<&Path>) -> Result<Option<Self>> {
        match path {
            Some(path) if path.is_file() => Self::load_file(path).map(Some),
            _ => Ok(None),
        }
    }

    /// Global config file path, if the platform has a config directory
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "chatx", "chatx")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load a config file as is, without resolving relative paths
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Find the config to use: `explicit` if given, else the nearest
    /// `chatx.toml` from the current directory, else the global config,
    /// else defaults. Reads only; nothing is written.
    ///
    /// Relative `input`/`output` paths in an explicit or project file are
    /// resolved against that file's directory.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let current = std::env::current_dir()?;
        Self::discover_from(explicit, &current, Self::config_path().as_deref())
    }

    /// [`Config::discover`] with the start directory and global path given
    pub fn discover_from(
        explicit: Option<&Path>,
        start: &Path,
        global: Option<&Path>,
    ) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::load_file(path)?.relative_to(parent_dir(path));
            return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
        }

        if let Some(path) = Self::find_project_file_from(start) {
            let config = Self::load_file(&path)?.relative_to(parent_dir(&path));
            return Ok((config, ConfigSource::Project(path)));
        }

        if let (Some(config), Some(path)) = (Self::load_global(global)?, global) {
            return Ok((config, ConfigSource::Global(path.to_path_buf())));
        }

        tracing::debug!("No config file found, using defaults");
        Ok((Self::default(), ConfigSource::Defaults))
    }

    /// Find `chatx.toml` by walking up from given directory
    pub fn find_project_file_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Write a default `chatx.toml` into `dir`, refusing to overwrite
    pub fn init_project(dir: &Path, author: Option<String>) -> Result<PathBuf> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path));
        }

        let config = Config {
            author: author.unwrap_or_default(),
            ..Config::default()
        };
        config.save(&path)?;
        Ok(path)
    }

    /// Check that the config can drive a run
    pub fn validate(&self, source: &ConfigSource) -> Result<()> {
        if self.author.is_empty() {
            return Err(ConfigError::MissingAuthor(source.to_string()));
        }
        Ok(())
    }

    fn relative_to(mut self, base: &Path) -> Self {
        if self.input.is_relative() {
            self.input = base.join(&self.input);
        }
        if self.output.is_relative() {
            self.output = base.join(&self.output);
        }
        self
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.author, "");
        assert_eq!(config.input, PathBuf::from("result.json"));
        assert_eq!(config.output, PathBuf::from("messages.txt"));
        assert_eq!(config.encoding, "cl100k_base");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            author: "alice".to_string(),
            ..Config::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(r#"author = "Иван""#).unwrap();
        assert_eq!(config.author, "Иван");
        assert_eq!(config.input, PathBuf::from("result.json"));
        assert_eq!(config.encoding, "cl100k_base");
    }

    #[test]
    fn test_validate_requires_author() {
        let source = ConfigSource::Project(PathBuf::from("/tmp/chatx.toml"));
        let err = Config::default().validate(&source).unwrap_err();
        assert!(matches!(err, ConfigError::MissingAuthor(_)));

        let config = Config {
            author: "alice".to_string(),
            ..Config::default()
        };
        assert!(config.validate(&source).is_ok());
    }

    #[test]
    fn test_explicit_config_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "author = \"alice\"\ninput = \"export/result.json\"\noutput = \"/abs/out.txt\"\n",
        )
        .unwrap();

        let (config, source) = Config::discover(Some(&path)).unwrap();
        assert_eq!(source, ConfigSource::Explicit(path.clone()));
        assert_eq!(config.input, dir.path().join("export/result.json"));
        assert_eq!(config.output, PathBuf::from("/abs/out.txt"));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::discover(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_find_project_file_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(PROJECT_FILE), "author = \"alice\"\n").unwrap();

        let found = Config::find_project_file_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(PROJECT_FILE));
    }

    #[test]
    fn test_init_project_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();

        let path = Config::init_project(dir.path(), Some("alice".to_string())).unwrap();
        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.author, "alice");

        let err = Config::init_project(dir.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
    }

    #[test]
    fn test_discover_without_config_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let work = dir.path().join("work");
        std::fs::create_dir_all(&work).unwrap();
        let global = dir.path().join("xdg/chatx/config.toml");

        let (config, source) = Config::discover_from(None, &work, Some(&global)).unwrap();

        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config, Config::default());
        assert!(!dir.path().join("xdg").exists());
        assert_eq!(std::fs::read_dir(&work).unwrap().count(), 0);
    }

    #[test]
    fn test_discover_with_unusable_global_dir() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("xdg");
        std::fs::write(&not_a_dir, "").unwrap();
        let global = not_a_dir.join("chatx/config.toml");

        let (_, source) = Config::discover_from(None, dir.path(), Some(&global)).unwrap();
        assert_eq!(source, ConfigSource::Defaults);

        let (_, source) = Config::discover_from(None, dir.path(), None).unwrap();
        assert_eq!(source, ConfigSource::Defaults);
    }

    #[test]
    fn test_discover_reads_existing_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("xdg/chatx/config.toml");
        std::fs::create_dir_all(global.parent().unwrap()).unwrap();
        std::fs::write(&global, "author = \"alice\"\n").unwrap();

        let (config, source) = Config::discover_from(None, dir.path(), Some(&global)).unwrap();
        assert_eq!(source, ConfigSource::Global(global.clone()));
        assert_eq!(config.author, "alice");
        assert_eq!(config.input, PathBuf::from("result.json"));
    }

    #[test]
    fn test_missing_author_names_project_file_for_defaults() {
        let err = Config::default()
            .validate(&ConfigSource::Defaults)
            .unwrap_err();
        assert!(err.to_string().contains(PROJECT_FILE));
    }
}
