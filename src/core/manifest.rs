//! `package.json` manifest model.
//!
//! Only the dependency sections are modelled; every other field is carried
//! through untouched when the manifest is copied into the build tree.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::PackageManagerError;
use crate::util::fs::write_atomic;
use crate::util::paths::{build_pj_path, normalize};

/// Specifier prefix of an in-repo dependency (`workspace:../lib`).
pub const WORKSPACE_SPEC_PREFIX: &str = "workspace:";

/// Section of the manifest a dependency is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DependencyKind {
    Normal,
    Dev,
    Peer,
    Optional,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyKind::Normal => "dependencies",
            DependencyKind::Dev => "devDependencies",
            DependencyKind::Peer => "peerDependencies",
            DependencyKind::Optional => "optionalDependencies",
        };
        f.write_str(s)
    }
}

/// On-disk `package.json` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJsonData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dev_dependencies: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub peer_dependencies: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub optional_dependencies: BTreeMap<String, String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An in-repo package reached through `workspace:` dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceMember {
    /// How the package that first reached this member declared it;
    /// `None` for the manifest's own package
    pub kind: Option<DependencyKind>,
    /// Internal-dependency hops from the manifest's package
    pub depth: usize,
}

/// A `package.json` bound to its location on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    path: PathBuf,
    data: PackageJsonData,
}

impl PackageManifest {
    pub fn from_data(path: impl Into<PathBuf>, data: PackageJsonData) -> Self {
        PackageManifest {
            path: path.into(),
            data,
        }
    }

    /// Load a manifest from a path.
    pub fn load(path: &Path) -> Result<Self, PackageManagerError> {
        let content = std::fs::read_to_string(path).map_err(|source| PackageManagerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data =
            serde_json::from_str(&content).map_err(|e| PackageManagerError::parse(path, e))?;
        Ok(PackageManifest::from_data(path, data))
    }

    /// Load `package.json` from a package directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self, PackageManagerError> {
        Self::load(&build_pj_path(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    /// Directory of the package.
    pub fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn data(&self) -> &PackageJsonData {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.data.name.as_deref()
    }

    /// Whether the package declares any dependency at all.
    pub fn has_dependencies(&self) -> bool {
        self.dependencies().next().is_some()
    }

    /// Every declared dependency with its section.
    pub fn dependencies(&self) -> impl Iterator<Item = (DependencyKind, &str, &str)> {
        let sections = [
            (DependencyKind::Normal, &self.data.dependencies),
            (DependencyKind::Dev, &self.data.dev_dependencies),
            (DependencyKind::Peer, &self.data.peer_dependencies),
            (DependencyKind::Optional, &self.data.optional_dependencies),
        ];
        sections.into_iter().flat_map(|(kind, deps)| {
            deps.iter()
                .map(move |(name, spec)| (kind, name.as_str(), spec.as_str()))
        })
    }

    /// Directories of the direct in-repo dependencies.
    ///
    /// A `workspace:` specifier must be a relative path.
    pub fn workspace_dep_paths(&self) -> Result<Vec<(DependencyKind, PathBuf)>, PackageManagerError> {
        let dir = self.dir();
        let mut paths = Vec::new();
        for (kind, name, spec) in self.dependencies() {
            let Some(rel) = spec.strip_prefix(WORKSPACE_SPEC_PREFIX) else {
                continue;
            };
            if !rel.starts_with('.') {
                return Err(PackageManagerError::WorkspaceSpec {
                    path: self.path.clone(),
                    name: name.to_string(),
                    spec: spec.to_string(),
                });
            }
            paths.push((kind, normalize(&dir.join(rel))));
        }
        Ok(paths)
    }

    /// Every in-repo package reachable from this one, keyed by directory.
    ///
    /// The walk is breadth-first, so each member records the shortest
    /// number of hops to reach it. Manifests of dependencies are read from
    /// disk next to this manifest's location.
    pub fn workspace_map(
        &self,
        ignore_self: bool,
    ) -> Result<BTreeMap<PathBuf, WorkspaceMember>, PackageManagerError> {
        let self_dir = normalize(&self.dir());
        let mut map = BTreeMap::new();
        map.insert(
            self_dir.clone(),
            WorkspaceMember {
                kind: None,
                depth: 0,
            },
        );

        let mut queue = VecDeque::new();
        queue.push_back((self.workspace_dep_paths()?, 1));

        while let Some((deps, depth)) = queue.pop_front() {
            for (kind, dir) in deps {
                if map.contains_key(&dir) {
                    continue;
                }
                tracing::trace!("workspace member {} at depth {}", dir.display(), depth);
                map.insert(
                    dir.clone(),
                    WorkspaceMember {
                        kind: Some(kind),
                        depth,
                    },
                );
                let dep = PackageManifest::load_from_dir(&dir)?;
                queue.push_back((dep.workspace_dep_paths()?, depth + 1));
            }
        }

        if ignore_self {
            map.remove(&self_dir);
        }
        Ok(map)
    }

    /// Write the manifest to its path.
    pub fn write(&self) -> anyhow::Result<()> {
        let mut content = serde_json::to_string_pretty(&self.data)
            .map_err(|e| PackageManagerError::parse(&self.path, e))?;
        content.push('\n');
        write_atomic(&self.path, content.as_bytes())
    }
}
