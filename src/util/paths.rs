//! Well-known file names and path helpers.
//!
//! Build-graph paths are reported relative to one of two roots: the source
//! tree (`$S`) and the build output tree (`$B`). Everything else in here is
//! purely lexical; none of these functions touch the filesystem.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Serialize, Serializer};

/// Manifest file name.
pub const PACKAGE_JSON_FILENAME: &str = "package.json";

/// pnpm lockfile name.
pub const LOCKFILE_FILENAME: &str = "pnpm-lock.yaml";

/// pnpm workspace config file name.
pub const WS_CONFIG_FILENAME: &str = "pnpm-workspace.yaml";

/// Dependency tree directory name.
pub const NODE_MODULES_DIRNAME: &str = "node_modules";

/// Archive produced from the installed dependency tree.
pub const NODE_MODULES_WORKSPACE_BUNDLE_FILENAME: &str = "workspace_node_modules.tar";

/// Installer debug log, relative to the dependency tree root.
pub const DEBUG_LOG_FILENAME: &str = ".pnpm-debug.log";

pub fn build_pj_path(dir: &Path) -> PathBuf {
    dir.join(PACKAGE_JSON_FILENAME)
}

pub fn build_lockfile_path(dir: &Path) -> PathBuf {
    dir.join(LOCKFILE_FILENAME)
}

pub fn build_ws_config_path(dir: &Path) -> PathBuf {
    dir.join(WS_CONFIG_FILENAME)
}

pub fn build_nm_path(dir: &Path) -> PathBuf {
    dir.join(NODE_MODULES_DIRNAME)
}

pub fn build_nm_bundle_path(dir: &Path) -> PathBuf {
    dir.join(NODE_MODULES_WORKSPACE_BUNDLE_FILENAME)
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component where possible.
///
/// Unlike `canonicalize`, this works for paths that don't exist yet and
/// never resolves symlinks.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Get the relative path from `base` to `path`, normalized.
///
/// Returns `.` when both point at the same directory.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    let base = normalize(base);
    let path = normalize(path);
    let rel = pathdiff::diff_paths(&path, &base).unwrap_or(path);
    normalize(&rel)
}

/// Render a path with forward slashes, as written into lockfiles and
/// workspace configs.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Root a build-graph path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Root {
    /// Source tree (`$S`)
    Source,
    /// Build output tree (`$B`)
    Build,
}

impl Root {
    pub fn prefix(self) -> &'static str {
        match self {
            Root::Source => "$S",
            Root::Build => "$B",
        }
    }
}

/// A path relative to either the source or the build root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RootedPath {
    root: Root,
    path: PathBuf,
}

impl RootedPath {
    pub fn new(root: Root, path: impl AsRef<Path>) -> Self {
        RootedPath {
            root,
            path: normalize(path.as_ref()),
        }
    }
}

impl fmt::Display for RootedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.root.prefix(), to_slash(&self.path))
    }
}

impl Serialize for RootedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `$S/<path>`
pub fn s_rooted(path: impl AsRef<Path>) -> RootedPath {
    RootedPath::new(Root::Source, path)
}

/// `$B/<path>`
pub fn b_rooted(path: impl AsRef<Path>) -> RootedPath {
    RootedPath::new(Root::Build, path)
}
