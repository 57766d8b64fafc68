use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ErrorContext, MigrateError, Result};
use crate::remote::{RemoteConfig, DEFAULT_RPC_FUNCTION, DEFAULT_TIMEOUT_SECS};

pub const CONFIG_FILE: &str = "thrive.toml";
pub const SAMPLE_CONFIG_FILE: &str = "thrive.toml.example";
pub const DEFAULT_MIGRATIONS_DIR: &str = "supabase/migrations";
pub const DEFAULT_SEED_DIR: &str = "supabase/seed";

pub const ENV_FILE: &str = ".env";
pub const ENV_PROJECT_URL: &str = "VITE_SUPABASE_URL";
pub const ENV_SERVICE_KEY: &str = "VITE_SUPABASE_SERVICE_ROLE_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrateConfig {
    /// Base URL of the hosted project
    pub project_url: Option<String>,

    /// Service role key. Prefer the environment or .env over committing this.
    pub service_key: Option<String>,

    /// Directory containing migration files
    pub migrations_dir: Option<PathBuf>,

    /// Directory containing seed data files
    pub seed_dir: Option<PathBuf>,

    /// RPC function that executes raw SQL (default: exec)
    pub rpc_function: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Post-migration checks
    pub verify: Option<VerifyConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Tables that must be readable after migrating
    pub tables: Vec<String>,

    /// RPC functions that must be callable after migrating
    pub functions: Vec<String>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            tables: vec!["posts".to_string()],
            functions: vec!["get_posts_with_counts".to_string()],
        }
    }
}

impl MigrateConfig {
    /// Load configuration from thrive.toml in the current directory
    pub fn load_from_file() -> Result<Option<Self>> {
        Self::load_from_path(Path::new(CONFIG_FILE))
    }

    pub fn load_from_path(config_path: &Path) -> Result<Option<Self>> {
        if !config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(config_path).file_context(config_path)?;
        let config: MigrateConfig = toml::from_str(&content).map_err(|e| MigrateError::ConfigLoad {
            path: config_path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Some(config))
    }

    /// Load `KEY=value` lines from an env file into the process environment.
    ///
    /// Returns `Ok(false)` when the file does not exist. Variables that are
    /// already set are left alone.
    pub fn load_env_file(path: &Path) -> Result<bool> {
        match dotenvy::from_path(path) {
            Ok(()) => Ok(true),
            Err(e) if e.not_found() => Ok(false),
            Err(e) => Err(MigrateError::ConfigLoad {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Overlay credentials found in the environment.
    ///
    /// `lookup` is normally `std::env::var(..).ok()`; empty values are ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_PROJECT_URL) {
            self.project_url = Some(url);
        }
        if let Some(key) = non_empty(ENV_SERVICE_KEY) {
            self.service_key = Some(key);
        }
        self
    }

    /// Merge CLI arguments with config file values
    /// CLI arguments take precedence over config file values
    pub fn merge_with_cli(
        config_file: Option<Self>,
        cli_project_url: Option<String>,
        cli_service_key: Option<String>,
        cli_migrations_dir: Option<PathBuf>,
    ) -> Self {
        let base_config = config_file.unwrap_or_default();

        Self {
            project_url: cli_project_url.or(base_config.project_url),
            service_key: cli_service_key.or(base_config.service_key),
            migrations_dir: cli_migrations_dir.or(base_config.migrations_dir),
            seed_dir: base_config.seed_dir,
            rpc_function: base_config.rpc_function,
            timeout_secs: base_config.timeout_secs,
            verify: base_config.verify,
        }
    }

    pub fn migrations_dir(&self) -> PathBuf {
        self.migrations_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MIGRATIONS_DIR))
    }

    pub fn seed_dir(&self) -> PathBuf {
        self.seed_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_DIR))
    }

    pub fn verify_config(&self) -> VerifyConfig {
        self.verify.clone().unwrap_or_default()
    }

    /// Build the remote connection settings, reporting every missing value at once
    pub fn remote_config(&self) -> Result<RemoteConfig> {
        let project_url = self.project_url.as_deref().filter(|v| !v.trim().is_empty());
        let service_key = self.service_key.as_deref().filter(|v| !v.trim().is_empty());

        let (project_url, service_key) = match (project_url, service_key) {
            (Some(url), Some(key)) => (url, key),
            (url, key) => {
                let mut missing = Vec::new();
                if url.is_none() {
                    missing.push(ENV_PROJECT_URL);
                }
                if key.is_none() {
                    missing.push(ENV_SERVICE_KEY);
                }
                return Err(MigrateError::MissingCredentials { missing });
            }
        };

        let rpc_function = self.rpc_function.as_deref().unwrap_or(DEFAULT_RPC_FUNCTION);
        let timeout = Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        Ok(RemoteConfig::new(project_url, service_key)?
            .with_rpc_function(rpc_function)
            .with_timeout(timeout))
    }

    /// Create a sample configuration file in `dir`
    pub fn write_sample_config(dir: &Path) -> Result<PathBuf> {
        let sample_config = MigrateConfig {
            project_url: Some("https://your-project.supabase.co".to_string()),
            service_key: None,
            migrations_dir: Some(PathBuf::from(DEFAULT_MIGRATIONS_DIR)),
            seed_dir: Some(PathBuf::from(DEFAULT_SEED_DIR)),
            rpc_function: Some(DEFAULT_RPC_FUNCTION.to_string()),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            verify: Some(VerifyConfig::default()),
        };

        let content = toml::to_string_pretty(&sample_config)?;
        let path = dir.join(SAMPLE_CONFIG_FILE);
        fs::write(&path, content).map_err(|source| MigrateError::FileWrite {
            path: path.clone(),
            message: source.to_string(),
            source,
        })?;

        Ok(path)
    }
}
