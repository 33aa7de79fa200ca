//! Global context for lockmerge operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::util::config::{global_config_path, load_config, project_config_path, Config};

static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "lockmerge", "lockmerge"));

/// Global context for lockmerge operations.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Per-user cache directory
    cache_dir: PathBuf,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let cache_dir = match PROJECT_DIRS.as_ref() {
            Some(dirs) => dirs.cache_dir().to_path_buf(),
            None => directories::BaseDirs::new()
                .map(|b| b.home_dir().join(".lockmerge").join("cache"))
                .unwrap_or_else(|| cwd.join(".lockmerge").join("cache")),
        };

        Ok(GlobalContext {
            cwd,
            cache_dir,
            verbose: false,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Default location of the shared pnpm store in local mode.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Project config file path, relative to the working directory.
    pub fn project_config_path(&self) -> PathBuf {
        project_config_path(&self.cwd)
    }

    /// Load global and project config, or only `explicit` when given.
    pub fn load_config(&self, explicit: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            return Config::load(path);
        }

        let global = global_config_path().unwrap_or_default();
        Ok(load_config(&global, &self.project_config_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();

        assert_eq!(ctx.cwd(), tmp.path());
        assert_eq!(
            ctx.project_config_path(),
            tmp.path().join(".lockmerge/config.toml")
        );
        assert!(!ctx.is_verbose());
    }

    #[test]
    fn test_explicit_config_must_load() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();

        assert!(ctx.load_config(Some(&tmp.path().join("missing.toml"))).is_err());

        let path = tmp.path().join("custom.toml");
        std::fs::write(&path, "[pnpm]\nbin = \"/opt/pnpm\"\n").unwrap();
        let config = ctx.load_config(Some(&path)).unwrap();
        assert_eq!(config.pnpm.bin, Some(PathBuf::from("/opt/pnpm")));
    }
}
