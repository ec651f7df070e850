use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "codewiki.toml";
pub const INDEX_FILE_NAME: &str = "index.json";
pub const FUNCTION_REFERENCE_FILE_NAME: &str = "function-reference.md";
pub const API_REFERENCE_FILE_NAME: &str = "api-reference.md";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directories, relative to the project root, scanned for declarations.
    pub source_dirs: Vec<String>,
    /// Output directory for the index and the generated reports.
    pub wiki_dir: String,
    /// Extensions (without the dot) read by the function scan.
    pub function_extensions: Vec<String>,
    /// Extensions (without the dot) read by the class scan.
    pub class_extensions: Vec<String>,
    pub routes: RouteConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteConfig {
    /// Detect Express-style `app.get('/path', ...)` routes.
    pub express: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dirs: vec!["src".to_string(), "lib".to_string()],
            wiki_dir: "wiki".to_string(),
            function_extensions: vec!["ts".to_string(), "tsx".to_string()],
            class_extensions: vec!["ts".to_string()],
            routes: RouteConfig::default(),
        }
    }
}

impl Config {
    /// Get the path to the user-level config file (~/.codewiki/config.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".codewiki").join("config.toml"))
    }

    /// Load `codewiki.toml` from the project root, then the user config,
    /// or return defaults if neither exists.
    pub fn load(root: &Path) -> Result<Self> {
        let project_path = root.join(CONFIG_FILE_NAME);
        if project_path.exists() {
            return Self::load_from(&project_path);
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from(&user_path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))?;

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the project root: explicit flag, then `CODEWIKI_ROOT`, then
    /// the current directory.
    pub fn project_root(explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| {
                std::env::var("CODEWIKI_ROOT")
                    .ok()
                    .filter(|v| !v.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    pub fn source_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.source_dirs.iter().map(|dir| root.join(dir)).collect()
    }

    pub fn wiki_path(&self, root: &Path) -> PathBuf {
        root.join(&self.wiki_dir)
    }

    pub fn index_path(&self, root: &Path) -> PathBuf {
        self.wiki_path(root).join(INDEX_FILE_NAME)
    }
}
