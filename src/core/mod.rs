//! Core data structures for lockmerge.
//!
//! This module contains the on-disk documents the aggregation works on:
//! - Package manifests (`package.json`)
//! - pnpm lockfiles and workspace configs
//! - Tarball descriptors derived from lockfile entries

pub mod errors;
pub mod lockfile;
pub mod manifest;
pub mod package_meta;
pub mod workspace;

pub use errors::{MergeConflict, PackageManagerError};
pub use lockfile::{Lockfile, MergeOutcome};
pub use manifest::{DependencyKind, PackageManifest, WorkspaceMember};
pub use package_meta::{Integrity, TarballDescriptor};
pub use workspace::WorkspaceConfig;
