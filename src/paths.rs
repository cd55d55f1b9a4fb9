//! Well-known filesystem locations used by the installers.
//!
//! Every path is resolved once from the configuration, with `~` expansion,
//! and handed to installers through [`Resources`].

use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::{Result, ToolupError};

#[derive(Debug, Clone)]
pub struct Resources {
    /// The current user's home directory.
    pub home: PathBuf,
    /// Where git-based tools are cloned.
    pub repositories: PathBuf,
    /// Where tarball sources are unpacked and built.
    pub packages: PathBuf,
    /// The install prefix every build targets.
    pub prefix: PathBuf,
    /// `~/.config` - per-tool runtime config lands under here.
    pub config_dir: PathBuf,
    /// The user's checkout of per-tool config files.
    pub configs_src: PathBuf,
    /// Scratch space for downloads and extraction.
    pub temp: PathBuf,
    /// The shell rc file that receives the managed source block.
    pub shell_rc: PathBuf,
    /// Directory of rc snippets sourced from the shell rc file.
    pub rc_snippets: PathBuf,
}

fn expand(value: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(value).as_ref())
}

impl Resources {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| ToolupError::Config("Could not determine home directory".to_string()))?;
        let config_dir = home.join(".config");

        Ok(Self {
            rc_snippets: config_dir.join("bashrc"),
            home,
            repositories: expand(&config.repositories_dir),
            packages: expand(&config.packages_dir),
            prefix: expand(&config.prefix),
            configs_src: expand(&config.configs_dir),
            temp: expand(&config.temp_dir),
            shell_rc: expand(&config.shell_rc),
            config_dir,
        })
    }

    /// Create the directories the installers rely on.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            &self.repositories,
            &self.packages,
            &self.prefix,
            &self.config_dir,
            &self.rc_snippets,
        ] {
            if !dir.exists() {
                tracing::debug!("creating {}", dir.display());
                std::fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }

    /// The directory a tool's runtime config lives in, e.g. `~/.config/nvim`.
    pub fn tool_config_dir(&self, name: &str) -> PathBuf {
        self.config_dir.join(name)
    }

    /// A source config file inside the user's configs checkout.
    pub fn config_source(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.configs_src.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> AppConfig {
        AppConfig {
            prefix: dir.join("local").display().to_string(),
            repositories_dir: dir.join("Repositories").display().to_string(),
            packages_dir: dir.join("Packages").display().to_string(),
            configs_dir: dir.join("configs").display().to_string(),
            temp_dir: dir.join("tmp").display().to_string(),
            shell_rc: dir.join(".bashrc").display().to_string(),
            jobs: 1,
        }
    }

    #[test]
    fn test_from_config_resolves_absolute_paths() {
        let temp = tempfile::tempdir().unwrap();
        let res = Resources::from_config(&config_in(temp.path())).unwrap();

        assert_eq!(res.prefix, temp.path().join("local"));
        assert_eq!(res.packages, temp.path().join("Packages"));
        assert_eq!(res.shell_rc, temp.path().join(".bashrc"));
        assert!(res.config_dir.ends_with(".config"));
        assert!(res.rc_snippets.ends_with(".config/bashrc"));
    }

    #[test]
    fn test_tilde_expansion() {
        let config = AppConfig::default();
        let res = Resources::from_config(&config).unwrap();

        assert!(!res.prefix.display().to_string().contains('~'));
        assert!(res.prefix.ends_with(".local"));
        assert!(res.repositories.ends_with("Repositories"));
    }

    #[test]
    fn test_ensure_dirs_creates_missing() {
        let temp = tempfile::tempdir().unwrap();
        let mut res = Resources::from_config(&config_in(temp.path())).unwrap();
        // Keep everything inside the test sandbox.
        res.config_dir = temp.path().join(".config");
        res.rc_snippets = res.config_dir.join("bashrc");

        res.ensure_dirs().unwrap();

        assert!(res.repositories.is_dir());
        assert!(res.packages.is_dir());
        assert!(res.prefix.is_dir());
        assert!(res.rc_snippets.is_dir());

        // Idempotent on a second run.
        res.ensure_dirs().unwrap();
    }

    #[test]
    fn test_tool_config_dir() {
        let temp = tempfile::tempdir().unwrap();
        let res = Resources::from_config(&config_in(temp.path())).unwrap();
        assert!(res.tool_config_dir("nvim").ends_with(".config/nvim"));
    }
}
