//! Tarball descriptors derived from lockfile package entries.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use semver::Version;
use url::Url;

/// Integrity hash of a tarball, as recorded in the lockfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integrity {
    /// Hash algorithm (e.g. `sha512`)
    pub algorithm: String,
    /// Hex-encoded digest
    pub hex_digest: String,
}

impl Integrity {
    /// Parse an SRI string such as `sha512-<base64>`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let (algorithm, b64) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid integrity '{}': expected <algo>-<base64>", s))?;
        if algorithm.is_empty() || b64.is_empty() {
            return Err(format!("invalid integrity '{}': expected <algo>-<base64>", s));
        }
        let digest = STANDARD
            .decode(b64)
            .map_err(|e| format!("invalid integrity '{}': {}", s, e))?;

        Ok(Integrity {
            algorithm: algorithm.to_string(),
            hex_digest: hex::encode(digest),
        })
    }
}

/// An external package archive referenced by a lockfile.
///
/// Two descriptors are the same tarball when their store paths match,
/// whatever lockfile they came from.
#[derive(Debug, Clone)]
pub struct TarballDescriptor {
    /// Lockfile key (`/name/version`)
    pub key: String,
    pub name: String,
    pub version: Version,
    /// Store path of the tarball, relative to the tarball store
    /// (e.g. `@scope/pkg/-/pkg-1.0.0.tgz`)
    pub tarball_path: String,
    /// Source URL as recorded in the lockfile
    pub tarball_url: String,
    pub integrity: Option<Integrity>,
}

impl TarballDescriptor {
    /// Build a descriptor from a lockfile entry.
    pub fn from_entry(
        key: &str,
        tarball: Option<&str>,
        integrity: Option<&str>,
    ) -> Result<Self, String> {
        let (name, version) = parse_package_key(key)?;
        let tarball_url = tarball.ok_or_else(|| format!("{}: resolution has no tarball", key))?;
        let tarball_path = tarball_store_path(tarball_url).map_err(|e| format!("{}: {}", key, e))?;
        let integrity = integrity
            .map(Integrity::parse)
            .transpose()
            .map_err(|e| format!("{}: {}", key, e))?;

        Ok(TarballDescriptor {
            key: key.to_string(),
            name,
            version,
            tarball_path,
            tarball_url: tarball_url.to_string(),
            integrity,
        })
    }

    /// Path of the tarball under a contrib directory.
    pub fn contrib_path(&self, contribs: &Path) -> std::path::PathBuf {
        contribs.join(&self.tarball_path)
    }
}

impl PartialEq for TarballDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.tarball_path == other.tarball_path
    }
}

impl Eq for TarballDescriptor {}

impl Hash for TarballDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tarball_path.hash(state);
    }
}

impl fmt::Display for TarballDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.tarball_path)
    }
}

/// Split a lockfile package key into name and version.
///
/// Handles both `/name/1.0.0` (with an optional `_peer@x` suffix) and
/// `/name@1.0.0` (with an optional `(peer@x)` suffix), scoped or not.
pub fn parse_package_key(key: &str) -> Result<(String, Version), String> {
    let bare = key.trim_start_matches('/');
    let bare = bare.split('(').next().unwrap_or(bare);

    if let Some((name, rest)) = bare.rsplit_once('/') {
        let ver = rest.split('_').next().unwrap_or(rest);
        if let Ok(version) = Version::parse(ver) {
            if !name.is_empty() {
                return Ok((name.to_string(), version));
            }
        }
    }

    if let Some(idx) = bare.rfind('@').filter(|&i| i > 0) {
        let (name, ver) = (&bare[..idx], &bare[idx + 1..]);
        if let Ok(version) = Version::parse(ver) {
            return Ok((name.to_string(), version));
        }
    }

    Err(format!("invalid package key '{}'", key))
}

/// Derive the store path of a tarball from its URL.
pub fn tarball_store_path(tarball_url: &str) -> Result<String, String> {
    let url = Url::parse(tarball_url)
        .map_err(|e| format!("invalid tarball url '{}': {}", tarball_url, e))?;
    if url.scheme() == "file" {
        return Err(format!("local tarball '{}' is not supported", tarball_url));
    }

    let path = url.path().trim_start_matches('/');
    if path.is_empty() {
        return Err(format!("tarball url '{}' has no path", tarball_url));
    }
    Ok(path.to_string())
}
