use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolupError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Install prefix passed to every build (`--prefix=...`).
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Where git-based tools keep their clones.
    #[serde(default = "default_repositories_dir")]
    pub repositories_dir: String,
    /// Where tarball-based tools keep their unpacked sources.
    #[serde(default = "default_packages_dir")]
    pub packages_dir: String,
    /// Checkout holding per-tool config files (init.vim, vifmrc, bashrc, ...).
    #[serde(default = "default_configs_dir")]
    pub configs_dir: String,
    /// Scratch directory for downloads and extraction.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,
    /// Shell rc file that receives the managed source block.
    #[serde(default = "default_shell_rc")]
    pub shell_rc: String,
    /// Parallel make jobs. 0 means one per available CPU.
    #[serde(default)]
    pub jobs: usize,
}

fn default_prefix() -> String {
    "~/.local".to_string()
}

fn default_repositories_dir() -> String {
    "~/Repositories".to_string()
}

fn default_packages_dir() -> String {
    "~/Packages".to_string()
}

fn default_configs_dir() -> String {
    "~/.config/toolup/configs".to_string()
}

fn default_temp_dir() -> String {
    "/tmp".to_string()
}

fn default_shell_rc() -> String {
    "~/.bashrc".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            repositories_dir: default_repositories_dir(),
            packages_dir: default_packages_dir(),
            configs_dir: default_configs_dir(),
            temp_dir: default_temp_dir(),
            shell_rc: default_shell_rc(),
            jobs: 0,
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| ToolupError::Config("HOME environment variable not set".to_string()))?;
        Ok(PathBuf::from(home).join(".config").join("toolup"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Load the config file, falling back to defaults when it does not exist
    /// so that `toolup install` works on a fresh machine without `toolup init`.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)
                .map_err(|e| ToolupError::Config(format!("Invalid config: {}", e)))?
        } else {
            Self::default()
        };

        // Environment overrides
        if let Ok(prefix) = std::env::var("TOOLUP_PREFIX") {
            config.prefix = prefix;
        }
        if let Ok(configs_dir) = std::env::var("TOOLUP_CONFIGS_DIR") {
            config.configs_dir = configs_dir;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| ToolupError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("prefix", &self.prefix),
            ("repositories_dir", &self.repositories_dir),
            ("packages_dir", &self.packages_dir),
            ("temp_dir", &self.temp_dir),
            ("shell_rc", &self.shell_rc),
        ] {
            if value.trim().is_empty() {
                return Err(ToolupError::Config(format!("{} must not be empty", field)));
            }
        }

        if self.jobs > 512 {
            return Err(ToolupError::Config(format!(
                "jobs = {} is not a sensible parallelism level",
                self.jobs
            )));
        }

        Ok(())
    }

    /// Number of `make -j` jobs to request.
    pub fn make_jobs(&self) -> usize {
        if self.jobs > 0 {
            self.jobs
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }

    /// Set a config value by key name, as used by `toolup config set`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "prefix" => self.prefix = value.to_string(),
            "repositories_dir" => self.repositories_dir = value.to_string(),
            "packages_dir" => self.packages_dir = value.to_string(),
            "configs_dir" => self.configs_dir = value.to_string(),
            "temp_dir" => self.temp_dir = value.to_string(),
            "shell_rc" => self.shell_rc = value.to_string(),
            "jobs" => {
                self.jobs = value.parse().map_err(|_| {
                    ToolupError::Config(format!("jobs must be a number, got '{}'", value))
                })?
            }
            _ => {
                return Err(ToolupError::Config(format!(
                    "Unknown config key '{}'. Valid keys: prefix, repositories_dir, \
                     packages_dir, configs_dir, temp_dir, shell_rc, jobs",
                    key
                )))
            }
        }
        self.validate()
    }
}
