//! Test fixtures for common test scenarios.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::lockfile::{Lockfile, LockfileData, PackageSnapshot, Resolution};
use crate::core::package_meta::parse_package_key;
use crate::ops::aggregate::{ManagerConfig, PnpmPackageManager};
use crate::util::paths::build_pj_path;

/// Registry URL of the tarball pnpm would record for `key`.
pub fn registry_tarball(key: &str) -> String {
    let (name, version) = parse_package_key(key).expect("fixture key must be valid");
    let basename = name.rsplit('/').next().unwrap_or(&name);
    format!("https://registry.npmjs.org/{name}/-/{basename}-{version}.tgz")
}

/// Deterministic integrity for a fixture package.
pub fn fixture_integrity(key: &str) -> String {
    use base64::Engine;
    format!("sha512-{}", base64::engine::general_purpose::STANDARD.encode(key))
}

/// Builder for lockfile documents.
#[derive(Debug, Clone, Default)]
pub struct LockfileFixture {
    packages: Vec<(String, String, Option<String>)>,
}

impl LockfileFixture {
    pub fn new() -> Self {
        LockfileFixture::default()
    }

    /// Add a package resolved from the public registry, with integrity.
    pub fn package(self, key: &str) -> Self {
        let tarball = registry_tarball(key);
        let integrity = fixture_integrity(key);
        self.package_full(key, &tarball, &integrity)
    }

    /// Add a package with an explicit tarball and no integrity.
    pub fn package_with_tarball(mut self, key: &str, tarball: &str) -> Self {
        self.packages
            .push((key.to_string(), tarball.to_string(), None));
        self
    }

    /// Add a package with an explicit tarball and integrity.
    pub fn package_full(mut self, key: &str, tarball: &str, integrity: &str) -> Self {
        self.packages.push((
            key.to_string(),
            tarball.to_string(),
            Some(integrity.to_string()),
        ));
        self
    }

    pub fn data(&self) -> LockfileData {
        let mut data = LockfileData {
            lockfile_version: Some(serde_yaml::Value::from(5.4)),
            ..LockfileData::default()
        };
        for (key, tarball, integrity) in &self.packages {
            let mut extra = BTreeMap::new();
            extra.insert("dev".to_string(), serde_yaml::Value::Bool(false));
            data.packages.insert(
                key.clone(),
                PackageSnapshot {
                    resolution: Resolution {
                        integrity: integrity.clone(),
                        tarball: Some(tarball.clone()),
                        extra: BTreeMap::new(),
                    },
                    extra,
                },
            );
        }
        data
    }

    /// Build an in-memory lockfile bound to `path`.
    pub fn build(&self, path: impl Into<PathBuf>) -> Lockfile {
        Lockfile::from_data(path, self.data())
    }

    /// Write the lockfile to `path`.
    pub fn write(&self, path: &Path) {
        self.build(path).write().expect("failed to write fixture lockfile");
    }
}

/// Write `<root>/<dir>/package.json` with the given dependencies.
pub fn write_manifest(root: &Path, dir: &str, deps: &[(&str, &str)]) -> PathBuf {
    let name = dir.rsplit('/').next().unwrap_or(dir);
    let deps: serde_json::Map<String, serde_json::Value> = deps
        .iter()
        .map(|(n, s)| (n.to_string(), serde_json::Value::from(*s)))
        .collect();
    let mut doc = serde_json::json!({ "name": name, "version": "1.0.0" });
    if !deps.is_empty() {
        doc["dependencies"] = serde_json::Value::Object(deps);
    }

    let path = build_pj_path(&root.join(dir));
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
    path
}

/// A temporary monorepo with separate source and build roots.
pub struct Monorepo {
    _tmp: TempDir,
    pub sources_root: PathBuf,
    pub build_root: PathBuf,
}

impl Monorepo {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let sources_root = tmp.path().join("arcadia");
        let build_root = tmp.path().join("build");
        std::fs::create_dir_all(&sources_root).unwrap();
        std::fs::create_dir_all(&build_root).unwrap();
        Monorepo {
            _tmp: tmp,
            sources_root,
            build_root,
        }
    }

    /// Write a source manifest for `module`.
    pub fn manifest(&self, module: &str, deps: &[(&str, &str)]) -> PathBuf {
        write_manifest(&self.sources_root, module, deps)
    }

    /// Write a source lockfile for `module`.
    pub fn lockfile(&self, module: &str, fixture: LockfileFixture) -> PathBuf {
        let path = self.sources_root.join(module).join("pnpm-lock.yaml");
        fixture.write(&path);
        path
    }

    pub fn config(&self, module: &str) -> ManagerConfig {
        ManagerConfig::new(&self.sources_root, &self.build_root, module)
            .with_cache_dir(self.build_root.join(".cache"))
    }

    pub fn package_manager(&self, module: &str) -> PnpmPackageManager {
        PnpmPackageManager::new(self.config(module))
    }

    pub fn read_build(&self, rel: &str) -> String {
        std::fs::read_to_string(self.build_root.join(rel)).unwrap()
    }
}

impl Default for Monorepo {
    fn default() -> Self {
        Self::new()
    }
}
