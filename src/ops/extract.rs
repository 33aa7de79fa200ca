//! Tarball metadata extraction across many lockfiles.
//!
//! A corrupt lockfile must not hide problems in the others, so per-file
//! failures are recorded and the scan moves on. Callers get every
//! descriptor that could be read plus the list of failures.

use std::collections::HashSet;
use std::path::Path;

use crate::core::errors::PackageManagerError;
use crate::core::lockfile::Lockfile;
use crate::core::package_meta::TarballDescriptor;

/// Lazy scan over a list of lockfiles.
///
/// Yields each tarball once, identified by its store path, in the order it
/// is first seen. Failures are kept until [`PackagesMeta::finish`].
pub struct PackagesMeta<I> {
    paths: I,
    pending: std::vec::IntoIter<TarballDescriptor>,
    seen: HashSet<String>,
    errors: Vec<String>,
}

impl<I, P> PackagesMeta<I>
where
    I: Iterator<Item = P>,
    P: AsRef<Path>,
{
    fn new(paths: I) -> Self {
        PackagesMeta {
            paths,
            pending: Vec::new().into_iter(),
            seen: HashSet::new(),
            errors: Vec::new(),
        }
    }

    /// Load the next lockfile and queue its unseen descriptors.
    fn scan(&mut self, path: &Path) {
        let lockfile = match Lockfile::load(path) {
            Ok(lf) => lf,
            Err(e) => {
                tracing::debug!("skipping {}: {}", path.display(), e.detail());
                self.errors.push(format!("{}: {}", path.display(), e.detail()));
                return;
            }
        };

        let mut batch = Vec::new();
        let mut failures = Vec::new();
        for item in lockfile.packages_meta() {
            match item {
                Ok(pkg) => {
                    if self.seen.insert(pkg.tarball_path.clone()) {
                        batch.push(pkg);
                    }
                }
                Err(e) => failures.push(e.detail()),
            }
        }

        if let Some(first) = failures.first() {
            let more = match failures.len() {
                1 => String::new(),
                n => format!(" (and {} more)", n - 1),
            };
            self.errors
                .push(format!("{}: {}{}", path.display(), first, more));
        }
        self.pending = batch.into_iter();
    }

    /// Failures recorded so far, as `<path>: <message>`.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Drain the remaining lockfiles and report any recorded failure.
    pub fn finish(mut self) -> Result<(), PackageManagerError> {
        while self.next().is_some() {}
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(PackageManagerError::Aggregate {
                errors: self.errors,
            })
        }
    }
}

impl<I, P> Iterator for PackagesMeta<I>
where
    I: Iterator<Item = P>,
    P: AsRef<Path>,
{
    type Item = TarballDescriptor;

    fn next(&mut self) -> Option<TarballDescriptor> {
        loop {
            if let Some(pkg) = self.pending.next() {
                return Some(pkg);
            }
            let path = self.paths.next()?;
            self.scan(path.as_ref());
        }
    }
}

/// Scan `lockfile_paths` lazily for tarball descriptors.
pub fn packages_meta<I, P>(lockfile_paths: I) -> PackagesMeta<I::IntoIter>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    PackagesMeta::new(lockfile_paths.into_iter())
}

/// Everything a full scan produced.
#[derive(Debug, Default)]
pub struct Extraction {
    pub packages: Vec<TarballDescriptor>,
    /// Failures as `<path>: <message>`, one per lockfile
    pub errors: Vec<String>,
}

impl Extraction {
    /// The aggregate error, if any lockfile failed.
    pub fn error(&self) -> Option<PackageManagerError> {
        if self.errors.is_empty() {
            None
        } else {
            Some(PackageManagerError::Aggregate {
                errors: self.errors.clone(),
            })
        }
    }

    /// Descriptors, or the aggregate error if any lockfile failed.
    pub fn into_result(self) -> Result<Vec<TarballDescriptor>, PackageManagerError> {
        if self.errors.is_empty() {
            Ok(self.packages)
        } else {
            Err(PackageManagerError::Aggregate {
                errors: self.errors,
            })
        }
    }
}

/// Scan every lockfile and collect descriptors and failures.
pub fn extract_packages_meta<I, P>(lockfile_paths: I) -> Extraction
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut scan = packages_meta(lockfile_paths);
    let packages: Vec<_> = scan.by_ref().collect();
    Extraction {
        packages,
        errors: scan.errors,
    }
}
