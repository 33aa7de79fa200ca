//! High-level operations.
//!
//! This module contains the implementation of lockmerge commands.

pub mod aggregate;
pub mod extract;
pub mod install;

pub use aggregate::{
    InputsOutputs, ManagerConfig, MergedArtifacts, PnpmPackageManager, StoreLayout,
    DEFAULT_CONTRIBS_PATH, DEFAULT_REGISTRY,
};
pub use extract::{extract_packages_meta, packages_meta, Extraction, PackagesMeta};
pub use install::{install, InstallOptions, InstallResult};
