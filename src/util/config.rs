//! Configuration file support for lockmerge.
//!
//! lockmerge supports two configuration file locations:
//! - Global: `~/.lockmerge/config.toml` - User-wide defaults
//! - Project: `.lockmerge/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ops::aggregate::ManagerConfig;

/// lockmerge configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source and build tree layout
    pub paths: PathsConfig,

    /// Installer settings
    pub pnpm: PnpmConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the source tree
    pub source_root: Option<PathBuf>,

    /// Root of the build output tree
    pub build_root: Option<PathBuf>,

    /// Tarball directory relative to the build root (default: contrib/npm)
    pub contribs: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PnpmConfig {
    /// pnpm executable (default: looked up on PATH)
    pub bin: Option<PathBuf>,

    /// Registry URL passed to pnpm
    pub registry: Option<String>,

    /// Store directory used in local mode
    pub store_cache_dir: Option<PathBuf>,

    /// Node.js executable (default: looked up on PATH)
    pub node: Option<PathBuf>,

    /// Prebuilder checkout; when set, prebuilt addons are applied after install
    pub prebuilder: Option<PathBuf>,
}

impl Config {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load config from a file, or return default if not found or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.paths.source_root.is_some() {
            self.paths.source_root = other.paths.source_root;
        }
        if other.paths.build_root.is_some() {
            self.paths.build_root = other.paths.build_root;
        }
        if other.paths.contribs.is_some() {
            self.paths.contribs = other.paths.contribs;
        }

        if other.pnpm.bin.is_some() {
            self.pnpm.bin = other.pnpm.bin;
        }
        if other.pnpm.registry.is_some() {
            self.pnpm.registry = other.pnpm.registry;
        }
        if other.pnpm.store_cache_dir.is_some() {
            self.pnpm.store_cache_dir = other.pnpm.store_cache_dir;
        }
        if other.pnpm.node.is_some() {
            self.pnpm.node = other.pnpm.node;
        }
        if other.pnpm.prebuilder.is_some() {
            self.pnpm.prebuilder = other.pnpm.prebuilder;
        }
    }

    /// Build the package manager configuration for `module`.
    ///
    /// Roots must be set by now, either in a config file or on the command
    /// line. `default_cache_dir` is used when no store cache is configured.
    pub fn manager_config(&self, module: &Path, default_cache_dir: &Path) -> Result<ManagerConfig> {
        let source_root = self
            .paths
            .source_root
            .as_deref()
            .context("source root is not set (use --source-root or [paths] source_root)")?;
        let build_root = self
            .paths
            .build_root
            .as_deref()
            .context("build root is not set (use --build-root or [paths] build_root)")?;

        let cache_dir = self
            .pnpm
            .store_cache_dir
            .clone()
            .unwrap_or_else(|| default_cache_dir.to_path_buf());
        let mut config = ManagerConfig::new(source_root, build_root, module).with_cache_dir(cache_dir);

        if let Some(ref contribs) = self.paths.contribs {
            config = config.with_contribs_path(contribs);
        }
        if let Some(ref registry) = self.pnpm.registry {
            config = config.with_registry(registry);
        }
        if let Some(ref bin) = self.pnpm.bin {
            config = config.with_pnpm(bin);
        }
        if let Some(ref node) = self.pnpm.node {
            config = config.with_node(node);
        }
        if let Some(ref prebuilder) = self.pnpm.prebuilder {
            config = config.with_prebuilder(prebuilder);
        }
        Ok(config)
    }
}

/// Load merged config from global and project locations.
///
/// Project config takes precedence over global config.
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config directory (~/.lockmerge).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".lockmerge"))
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|d| d.join("config.toml"))
}

/// Get the project config file path.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".lockmerge").join("config.toml")
}
