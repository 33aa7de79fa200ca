//! pnpm lockfile model.
//!
//! `pnpm-lock.yaml` is parsed into explicit record types. Every record keeps
//! the fields it does not model in a passthrough map so that a
//! load/write cycle never drops data written by a newer pnpm.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::core::errors::{MergeConflict, PackageManagerError};
use crate::core::package_meta::TarballDescriptor;
use crate::util::fs::write_atomic;
use crate::util::paths::{normalize, relative_path, to_slash};

/// Importer key of the package owning the lockfile.
pub const ROOT_IMPORTER: &str = ".";

/// Dependency sections of an importer, keyed by dependency name.
pub type DependencyMap = BTreeMap<String, Value>;

/// On-disk lockfile document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockfileData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lockfile_version: Option<Value>,

    /// Single-project form: direct specifiers of the owning package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifiers: Option<DependencyMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<DependencyMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_dependencies: Option<DependencyMap>,

    /// Monorepo form: per-package direct dependencies, keyed by the
    /// package directory relative to the lockfile
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub importers: BTreeMap<String, Importer>,

    /// Resolved packages keyed by `/name/version`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub packages: BTreeMap<String, PackageSnapshot>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Direct dependencies of one workspace package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Importer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifiers: Option<DependencyMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<DependencyMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_dependencies: Option<DependencyMap>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A resolved external package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageSnapshot {
    #[serde(default)]
    pub resolution: Resolution,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Where a package tarball comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarball: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Resolution {
    /// Whether two resolutions point at the same archive.
    ///
    /// The integrity hash identifies the content when both sides carry it;
    /// the tarball URL may then differ (a dependency's merged lockfile has
    /// already been rewritten to build-local URLs). Without a hash on both
    /// sides the URLs must match.
    pub fn same_archive(&self, other: &Resolution) -> bool {
        match (&self.integrity, &other.integrity) {
            (Some(a), Some(b)) => a == b,
            _ => self.tarball == other.tarball && self.extra == other.extra,
        }
    }

    fn describe(&self) -> String {
        match (&self.tarball, &self.integrity) {
            (Some(t), Some(i)) => format!("{} ({})", t, i),
            (Some(t), None) => t.clone(),
            (None, Some(i)) => i.clone(),
            (None, None) => "<no tarball>".to_string(),
        }
    }
}

impl Importer {
    fn is_empty(&self) -> bool {
        self.specifiers.is_none()
            && self.dependencies.is_none()
            && self.dev_dependencies.is_none()
            && self.optional_dependencies.is_none()
            && self.extra.is_empty()
    }
}

/// Result of folding one lockfile into another.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum MergeOutcome {
    /// Entries were folded in; `added` counts new packages.
    Merged { added: usize },
    /// Nothing was changed because the lockfiles disagree.
    Conflict(Vec<MergeConflict>),
}

impl MergeOutcome {
    /// Turn a conflict into an error naming the merged-in lockfile.
    pub fn into_result(self, source_path: &Path) -> Result<usize, PackageManagerError> {
        match self {
            MergeOutcome::Merged { added } => Ok(added),
            MergeOutcome::Conflict(conflicts) => Err(PackageManagerError::Conflict {
                source_path: source_path.to_path_buf(),
                conflicts,
            }),
        }
    }
}

/// A pnpm lockfile bound to its location on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Lockfile {
    path: PathBuf,
    data: LockfileData,
}

impl Lockfile {
    /// Create an empty lockfile that will be written to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Lockfile {
            path: path.into(),
            data: LockfileData::default(),
        }
    }

    pub fn from_data(path: impl Into<PathBuf>, data: LockfileData) -> Self {
        Lockfile {
            path: path.into(),
            data,
        }
    }

    /// Load a lockfile from a path.
    pub fn load(path: &Path) -> Result<Self, PackageManagerError> {
        let content = std::fs::read_to_string(path).map_err(|source| PackageManagerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse lockfile content that belongs at `path`.
    pub fn parse(path: &Path, content: &str) -> Result<Self, PackageManagerError> {
        // An empty document is a lockfile without packages.
        let data = if content.trim().is_empty() {
            LockfileData::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| PackageManagerError::parse(path, e))?
        };
        Ok(Lockfile::from_data(path, data))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the lockfile. Merges resolve importer paths against the
    /// current location, so set this before merging.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    pub fn data(&self) -> &LockfileData {
        &self.data
    }

    pub fn packages(&self) -> &BTreeMap<String, PackageSnapshot> {
        &self.data.packages
    }

    pub fn importers(&self) -> &BTreeMap<String, Importer> {
        &self.data.importers
    }

    fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Tarball descriptors of every package entry.
    ///
    /// The iterator is lazy and can be restarted by calling this again.
    /// Entries that cannot be described yield an error item; iteration
    /// continues past them.
    pub fn packages_meta(
        &self,
    ) -> impl Iterator<Item = Result<TarballDescriptor, PackageManagerError>> + '_ {
        self.data.packages.iter().map(move |(key, pkg)| {
            TarballDescriptor::from_entry(
                key,
                pkg.resolution.tarball.as_deref(),
                pkg.resolution.integrity.as_deref(),
            )
            .map_err(|message| PackageManagerError::parse(&self.path, message))
        })
    }

    /// Importers in monorepo form, without modifying the document.
    fn importers_view(&self) -> BTreeMap<String, Importer> {
        let mut importers = self.data.importers.clone();
        let root = Importer {
            specifiers: self.data.specifiers.clone(),
            dependencies: self.data.dependencies.clone(),
            dev_dependencies: self.data.dev_dependencies.clone(),
            optional_dependencies: self.data.optional_dependencies.clone(),
            extra: BTreeMap::new(),
        };
        if !root.is_empty() {
            importers.insert(ROOT_IMPORTER.to_string(), root);
        }
        importers
    }

    /// Move single-project sections under the `.` importer.
    ///
    /// This is the form every merge leaves the lockfile in; merging a
    /// lockfile into itself yields exactly its normalized form.
    pub fn normalize_importers(&mut self) {
        self.data.importers = self.importers_view();
        self.data.specifiers = None;
        self.data.dependencies = None;
        self.data.dev_dependencies = None;
        self.data.optional_dependencies = None;
    }

    /// `other`'s importers re-keyed relative to this lockfile's directory.
    fn rebased_importers(&self, other: &Lockfile) -> BTreeMap<String, Importer> {
        let self_dir = self.dir();
        let other_dir = other.dir();
        other
            .importers_view()
            .into_iter()
            .map(|(key, importer)| {
                let abs = normalize(&other_dir.join(&key));
                (to_slash(&relative_path(&self_dir, &abs)), importer)
            })
            .collect()
    }

    /// Fold `other`'s importers, packages and remaining top-level sections
    /// into this lockfile.
    ///
    /// Packages are keyed by `/name/version`. A key present on both sides
    /// with different archives, or an importer present on both sides with
    /// different content, is a conflict. Unmodelled top-level sections
    /// (e.g. `snapshots`) are unioned one level deep; an entry present on
    /// both sides with different values is a conflict too. Every conflict
    /// is reported and this lockfile is left untouched.
    pub fn merge(&mut self, other: &Lockfile) -> MergeOutcome {
        let incoming = self.rebased_importers(other);
        let ours = self.importers_view();
        let mut conflicts = Vec::new();

        for (key, importer) in &incoming {
            if let Some(existing) = ours.get(key) {
                if existing != importer {
                    conflicts.push(MergeConflict {
                        key: format!("importer {}", key),
                        ours: format!("{:?}", existing.dependencies),
                        theirs: format!("{:?}", importer.dependencies),
                    });
                }
            }
        }

        for (key, pkg) in &other.data.packages {
            if let Some(existing) = self.data.packages.get(key) {
                if !existing.resolution.same_archive(&pkg.resolution) {
                    conflicts.push(MergeConflict {
                        key: key.clone(),
                        ours: existing.resolution.describe(),
                        theirs: pkg.resolution.describe(),
                    });
                }
            }
        }

        let extra = merge_sections(&self.data.extra, &other.data.extra, &mut conflicts);

        if !conflicts.is_empty() {
            return MergeOutcome::Conflict(conflicts);
        }

        self.normalize_importers();
        for (key, importer) in incoming {
            self.data.importers.entry(key).or_insert(importer);
        }

        let mut added = 0;
        for (key, pkg) in &other.data.packages {
            if !self.data.packages.contains_key(key) {
                self.data.packages.insert(key.clone(), pkg.clone());
                added += 1;
            }
        }

        self.data.extra = extra;
        if self.data.lockfile_version.is_none() {
            self.data.lockfile_version = other.data.lockfile_version.clone();
        }

        MergeOutcome::Merged { added }
    }

    /// Point every registry tarball at the URL returned by `resolve`.
    ///
    /// Entries whose tarball is already a local `file:` URL are left as
    /// they are; an entry without a tarball is an error. The store path a
    /// descriptor carries is derived from the original URL and never
    /// changes.
    pub fn update_tarball_resolutions<F>(&mut self, resolve: F) -> Result<(), PackageManagerError>
    where
        F: Fn(&TarballDescriptor) -> String,
    {
        for (key, pkg) in self.data.packages.iter_mut() {
            let tarball = pkg.resolution.tarball.as_deref();
            if tarball.is_some_and(|t| t.starts_with("file:")) {
                continue;
            }
            let meta =
                TarballDescriptor::from_entry(key, tarball, pkg.resolution.integrity.as_deref())
                    .map_err(|message| PackageManagerError::parse(&self.path, message))?;
            pkg.resolution.tarball = Some(resolve(&meta));
        }
        Ok(())
    }

    /// Serialize the lockfile.
    ///
    /// Maps are ordered by key, so identical documents always produce
    /// identical bytes.
    pub fn to_yaml(&self) -> Result<String, PackageManagerError> {
        serde_yaml::to_string(&self.data).map_err(|e| PackageManagerError::parse(&self.path, e))
    }

    /// Write the lockfile to its path, replacing any previous file whole.
    pub fn write(&self) -> anyhow::Result<()> {
        let content = self.to_yaml()?;
        write_atomic(&self.path, content.as_bytes())
    }
}

/// Union of two sets of top-level sections.
///
/// Mappings present on both sides are unioned by key; any other value, or
/// a mapping entry, that differs between the sides is recorded as a
/// conflict.
fn merge_sections(
    ours: &BTreeMap<String, Value>,
    theirs: &BTreeMap<String, Value>,
    conflicts: &mut Vec<MergeConflict>,
) -> BTreeMap<String, Value> {
    let mut merged = ours.clone();
    for (key, value) in theirs {
        let Some(existing) = merged.get_mut(key) else {
            merged.insert(key.clone(), value.clone());
            continue;
        };
        match (existing, value) {
            (Value::Mapping(mine), Value::Mapping(other)) => {
                for (entry, v) in other {
                    match mine.get(entry) {
                        Some(current) if current != v => conflicts.push(MergeConflict {
                            key: format!("{} {}", key, describe_value(entry)),
                            ours: describe_value(current),
                            theirs: describe_value(v),
                        }),
                        Some(_) => {}
                        None => {
                            mine.insert(entry.clone(), v.clone());
                        }
                    }
                }
            }
            (existing, value) if *existing != *value => conflicts.push(MergeConflict {
                key: key.clone(),
                ours: describe_value(existing),
                theirs: describe_value(value),
            }),
            _ => {}
        }
    }
    merged
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::LockfileFixture;
    use tempfile::TempDir;

    fn keys(lf: &Lockfile) -> Vec<&str> {
        lf.packages().keys().map(String::as_str).collect()
    }

    #[test]
    fn test_merge_unions_packages() {
        let mut a = LockfileFixture::new()
            .package("/p1/1.0.0")
            .package("/p2/2.0.0")
            .build("/b/a/pnpm-lock.yaml");
        let b = LockfileFixture::new()
            .package("/p2/2.0.0")
            .package("/p3/1.0.0")
            .build("/b/a/pnpm-lock.yaml");

        assert_eq!(a.merge(&b), MergeOutcome::Merged { added: 1 });
        assert_eq!(keys(&a), vec!["/p1/1.0.0", "/p2/2.0.0", "/p3/1.0.0"]);
    }

    #[test]
    fn test_merge_is_commutative_and_idempotent() {
        let a = LockfileFixture::new()
            .package("/p1/1.0.0")
            .package("/p2/2.0.0")
            .build("/b/a/pnpm-lock.yaml");
        let b = LockfileFixture::new()
            .package("/p2/2.0.0")
            .package("/p3/1.0.0")
            .build("/b/a/pnpm-lock.yaml");

        let mut ab = a.clone();
        let _ = ab.merge(&b);
        let mut ba = b.clone();
        let _ = ba.merge(&a);
        assert_eq!(ab.to_yaml().unwrap(), ba.to_yaml().unwrap());

        let mut aa = a.clone();
        assert_eq!(aa.merge(&a), MergeOutcome::Merged { added: 0 });
        assert_eq!(aa, a);
    }

    #[test]
    fn test_merge_conflict_leaves_lockfile_untouched() {
        let mut a = LockfileFixture::new()
            .package("/p1/1.0.0")
            .package_with_tarball("/p2/2.0.0", "https://registry.npmjs.org/p2/-/p2-2.0.0.tgz")
            .build("/b/a/pnpm-lock.yaml");
        let b = LockfileFixture::new()
            .package_with_tarball("/p2/2.0.0", "https://mirror.example.com/p2/-/p2-2.0.0.tgz")
            .package("/p3/1.0.0")
            .build("/b/c/pnpm-lock.yaml");
        let before = a.clone();

        match a.merge(&b) {
            MergeOutcome::Conflict(conflicts) => {
                assert_eq!(conflicts.len(), 1);
                assert_eq!(conflicts[0].key, "/p2/2.0.0");
            }
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(a, before);

        let err = a.merge(&b).into_result(b.path()).unwrap_err();
        assert!(err.to_string().contains("/b/c/pnpm-lock.yaml"));
    }

    #[test]
    fn test_merge_accepts_rewritten_tarball_with_same_integrity() {
        let mut a = LockfileFixture::new()
            .package_full(
                "/p1/1.0.0",
                "https://registry.npmjs.org/p1/-/p1-1.0.0.tgz",
                "sha1-AAEC",
            )
            .build("/b/a/pnpm-lock.yaml");
        let b = LockfileFixture::new()
            .package_full("/p1/1.0.0", "file:/b/contrib/p1/-/p1-1.0.0.tgz", "sha1-AAEC")
            .build("/b/c/pnpm-lock.yaml");

        assert_eq!(a.merge(&b), MergeOutcome::Merged { added: 0 });
    }

    #[test]
    fn test_merge_rebases_importers() {
        let mut a = Lockfile::parse(
            Path::new("/b/app/pnpm-lock.yaml"),
            r#"
lockfileVersion: 5.4
specifiers:
  lib: workspace:../libs/lib
dependencies:
  lib: link:../libs/lib
"#,
        )
        .unwrap();
        let b = Lockfile::parse(
            Path::new("/b/libs/lib/pnpm-lock.yaml"),
            r#"
lockfileVersion: 5.4
specifiers:
  left-pad: 1.3.0
dependencies:
  left-pad: 1.3.0
packages:
  /left-pad/1.3.0:
    resolution: {integrity: sha1-AAEC, tarball: 'https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz'}
    dev: false
"#,
        )
        .unwrap();

        assert_eq!(a.merge(&b), MergeOutcome::Merged { added: 1 });
        assert!(a.data().dependencies.is_none());
        assert_eq!(
            a.importers().keys().map(String::as_str).collect::<Vec<_>>(),
            vec![".", "../libs/lib"]
        );
        let lib = &a.importers()["../libs/lib"];
        assert!(lib.dependencies.as_ref().unwrap().contains_key("left-pad"));
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pnpm-lock.yaml");
        let content = r#"lockfileVersion: '6.0'
settings:
  autoInstallPeers: true
packages:
  /left-pad@1.3.0:
    resolution:
      integrity: sha1-AAEC
      tarball: https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz
    dev: false
    hasBin: true
"#;
        std::fs::write(&path, content).unwrap();

        let lf = Lockfile::load(&path).unwrap();
        lf.write().unwrap();
        let reloaded = Lockfile::load(&path).unwrap();

        assert_eq!(lf, reloaded);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("autoInstallPeers: true"));
        assert!(written.contains("hasBin: true"));
    }

    #[test]
    fn test_packages_meta_is_restartable() {
        let lf = LockfileFixture::new()
            .package("/p1/1.0.0")
            .package("/p2/2.0.0")
            .build("/b/a/pnpm-lock.yaml");

        let first: Vec<_> = lf.packages_meta().collect::<Result<_, _>>().unwrap();
        let second: Vec<_> = lf.packages_meta().collect::<Result<_, _>>().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_eq!(first[0].tarball_path, "p1/-/p1-1.0.0.tgz");
    }

    #[test]
    fn test_update_tarball_resolutions() {
        let mut lf = LockfileFixture::new()
            .package("/p1/1.0.0")
            .package_with_tarball("/p2/2.0.0", "file:/b/contrib/p2/-/p2-2.0.0.tgz")
            .build("/b/a/pnpm-lock.yaml");

        lf.update_tarball_resolutions(|meta| format!("file:/b/contrib/{}", meta.tarball_path))
            .unwrap();

        let tarball = |key: &str| lf.packages()[key].resolution.tarball.clone().unwrap();
        assert_eq!(tarball("/p1/1.0.0"), "file:/b/contrib/p1/-/p1-1.0.0.tgz");
        assert_eq!(tarball("/p2/2.0.0"), "file:/b/contrib/p2/-/p2-2.0.0.tgz");
    }

    #[test]
    fn test_update_tarball_resolutions_requires_tarball() {
        let mut lf = Lockfile::parse(
            Path::new("/b/a/pnpm-lock.yaml"),
            r#"
lockfileVersion: 5.4
packages:
  /p1/1.0.0:
    resolution: {integrity: sha512-AAEC}
"#,
        )
        .unwrap();

        let err = lf
            .update_tarball_resolutions(|meta| format!("file:/b/contrib/{}", meta.tarball_path))
            .unwrap_err();

        assert!(matches!(err, PackageManagerError::Parse { .. }));
        assert!(err.to_string().contains("/p1/1.0.0: resolution has no tarball"));
    }

    fn single_project(path: &str) -> Lockfile {
        Lockfile::parse(
            Path::new(path),
            r#"
lockfileVersion: 5.4
specifiers:
  left-pad: 1.3.0
dependencies:
  left-pad: 1.3.0
packages:
  /left-pad/1.3.0:
    resolution: {integrity: sha1-AAEC, tarball: 'https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz'}
    dev: false
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_self_merge_yields_normalized_form() {
        let a = single_project("/b/app/pnpm-lock.yaml");
        let mut normalized = a.clone();
        normalized.normalize_importers();
        assert!(normalized.data().dependencies.is_none());
        assert_eq!(
            normalized.importers().keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["."]
        );

        let mut aa = a.clone();
        assert_eq!(aa.merge(&a), MergeOutcome::Merged { added: 0 });
        assert_eq!(aa, normalized);

        let mut again = aa.clone();
        assert_eq!(again.merge(&a), MergeOutcome::Merged { added: 0 });
        assert_eq!(again.merge(&aa), MergeOutcome::Merged { added: 0 });
        assert_eq!(again, normalized);
    }

    const V9_LOCKFILE: &str = r#"
lockfileVersion: '9.0'
settings:
  autoInstallPeers: true
packages:
  p1@1.0.0:
    resolution: {integrity: sha1-AAEC, tarball: 'https://registry.npmjs.org/p1/-/p1-1.0.0.tgz'}
snapshots:
  p1@1.0.0: {}
"#;

    #[test]
    fn test_merge_keeps_unmodelled_sections() {
        let mut a = Lockfile::parse(Path::new("/b/app/pnpm-lock.yaml"), "lockfileVersion: '9.0'\n")
            .unwrap();
        let b = Lockfile::parse(Path::new("/b/lib/pnpm-lock.yaml"), V9_LOCKFILE).unwrap();

        assert_eq!(a.merge(&b), MergeOutcome::Merged { added: 1 });

        let yaml = a.to_yaml().unwrap();
        assert!(yaml.contains("snapshots:"));
        let snapshots = a.data().extra["snapshots"].as_mapping().unwrap();
        assert!(snapshots.contains_key("p1@1.0.0"));
        assert!(yaml.contains("autoInstallPeers: true"));
    }

    #[test]
    fn test_merge_unions_and_checks_section_entries() {
        let mut a = Lockfile::parse(
            Path::new("/b/app/pnpm-lock.yaml"),
            r#"
lockfileVersion: '9.0'
settings:
  autoInstallPeers: true
snapshots:
  p2@2.0.0: {}
"#,
        )
        .unwrap();
        let b = Lockfile::parse(Path::new("/b/lib/pnpm-lock.yaml"), V9_LOCKFILE).unwrap();

        assert_eq!(a.merge(&b), MergeOutcome::Merged { added: 1 });
        let snapshots = a.data().extra["snapshots"].as_mapping().unwrap();
        assert_eq!(snapshots.len(), 2);

        let mut c = Lockfile::parse(
            Path::new("/b/other/pnpm-lock.yaml"),
            r#"
lockfileVersion: '9.0'
settings:
  autoInstallPeers: false
"#,
        )
        .unwrap();
        let before = c.clone();
        match c.merge(&b) {
            MergeOutcome::Conflict(conflicts) => {
                assert_eq!(conflicts.len(), 1);
                assert_eq!(conflicts[0].key, "settings autoInstallPeers");
            }
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(c, before);
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pnpm-lock.yaml");
        std::fs::write(&path, "packages: [unclosed").unwrap();

        let err = Lockfile::load(&path).unwrap_err();
        assert!(matches!(err, PackageManagerError::Parse { .. }));
        assert!(err.to_string().contains("pnpm-lock.yaml"));
    }
}
