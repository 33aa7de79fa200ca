//! lockmerge - pnpm lockfile aggregation for monorepo builds
//!
//! This crate merges the lockfiles and workspace configs of in-repo npm
//! packages so each build target can be installed offline from a single
//! lockfile, and reports the files that step reads and writes.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities for lockmerge unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides builders for manifests, lockfiles and
/// throwaway source/build trees.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    lockfile::Lockfile, manifest::PackageManifest, package_meta::TarballDescriptor,
    workspace::WorkspaceConfig, PackageManagerError,
};

pub use ops::aggregate::{ManagerConfig, PnpmPackageManager};
pub use util::context::GlobalContext;
