//! Test utilities for lockmerge unit tests.
//!
//! Builders for lockfiles and manifests, and a throwaway monorepo with a
//! source tree and a build tree under one temporary directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use lockmerge::test_support::{LockfileFixture, Monorepo};
//!
//! #[test]
//! fn test_example() {
//!     let repo = Monorepo::new();
//!     repo.manifest("app", &[("lodash", "4.17.21")]);
//!     repo.lockfile("app", LockfileFixture::new().package("/lodash/4.17.21"));
//!
//!     let pm = repo.package_manager("app");
//!     // Use the package manager in tests...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
