//! pnpm workspace config model.
//!
//! `pnpm-workspace.yaml` lists the in-repo packages pnpm links instead of
//! fetching. Members are stored relative to the config's directory; `.`
//! is the package owning the config.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::core::errors::PackageManagerError;
use crate::core::manifest::PackageManifest;
use crate::util::fs::write_atomic;
use crate::util::paths::{normalize, relative_path, to_slash};

/// Member entry of the owning package.
pub const SELF_MEMBER: &str = ".";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceData {
    #[serde(default)]
    pub packages: BTreeSet<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A workspace config bound to its location on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceConfig {
    path: PathBuf,
    data: WorkspaceData,
}

impl WorkspaceConfig {
    /// Create an empty config that will be written to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        WorkspaceConfig {
            path: path.into(),
            data: WorkspaceData::default(),
        }
    }

    /// Load a workspace config from a path.
    pub fn load(path: &Path) -> Result<Self, PackageManagerError> {
        let content = std::fs::read_to_string(path).map_err(|source| PackageManagerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = if content.trim().is_empty() {
            WorkspaceData::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| PackageManagerError::parse(path, e))?
        };
        Ok(WorkspaceConfig {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Members as written to disk.
    pub fn packages(&self) -> &BTreeSet<String> {
        &self.data.packages
    }

    fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn insert_abs(&mut self, abs: &Path) {
        let rel = relative_path(&self.dir(), abs);
        self.data.packages.insert(to_slash(&rel));
    }

    /// Replace the members with the manifest's package and every in-repo
    /// package it reaches.
    ///
    /// Members are taken relative to the manifest's directory, so a config
    /// in the build tree can be seeded from a manifest in the source tree
    /// as long as both trees share a layout.
    pub fn set_from_package_manifest(
        &mut self,
        manifest: &PackageManifest,
    ) -> Result<(), PackageManagerError> {
        let members = manifest.workspace_map(false)?;
        let manifest_dir = normalize(&manifest.dir());
        self.data.packages = members
            .keys()
            .map(|dir| to_slash(&relative_path(&manifest_dir, dir)))
            .collect();
        Ok(())
    }

    /// Member directories joined onto `base_path` (the config's directory
    /// when `None`).
    pub fn paths(&self, base_path: Option<&Path>, ignore_self: bool) -> Vec<PathBuf> {
        let base = base_path.map(Path::to_path_buf).unwrap_or_else(|| self.dir());
        self.data
            .packages
            .iter()
            .filter(|p| !(ignore_self && p.as_str() == SELF_MEMBER))
            .map(|p| normalize(&base.join(p)))
            .collect()
    }

    /// Add `other`'s members, rebased onto this config's directory.
    pub fn merge(&mut self, other: &WorkspaceConfig) {
        let other_dir = other.dir();
        for member in &other.data.packages {
            self.insert_abs(&normalize(&other_dir.join(member)));
        }
    }

    pub fn to_yaml(&self) -> Result<String, PackageManagerError> {
        serde_yaml::to_string(&self.data).map_err(|e| PackageManagerError::parse(&self.path, e))
    }

    /// Write the config to its path, replacing any previous file whole.
    pub fn write(&self) -> anyhow::Result<()> {
        let content = self.to_yaml()?;
        write_atomic(&self.path, content.as_bytes())
    }
}
