//! Error types for lockfile aggregation.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// A single disagreement found while merging two lockfiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    /// Package key (`/name/version`) or importer path
    pub key: String,
    /// Resolution already present in the target lockfile
    pub ours: String,
    /// Resolution coming from the merged-in lockfile
    pub theirs: String,
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} != {}", self.key, self.ours, self.theirs)
    }
}

/// Error raised by the package manager layer.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum PackageManagerError {
    #[error("{}: {message}", path.display())]
    #[diagnostic(
        code(lockmerge::parse),
        help("The file may be corrupted. Regenerate it with `pnpm install`")
    )]
    Parse { path: PathBuf, message: String },

    #[error("{}: {source}", path.display())]
    #[diagnostic(code(lockmerge::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "conflicting resolutions while merging {}:\n{}",
        source_path.display(),
        conflicts.iter().map(|c| format!("  {c}")).collect::<Vec<_>>().join("\n")
    )]
    #[diagnostic(
        code(lockmerge::merge_conflict),
        help("Align the dependency versions of the conflicting packages")
    )]
    Conflict {
        /// Lockfile being merged in
        source_path: PathBuf,
        conflicts: Vec<MergeConflict>,
    },

    #[error("unable to process some lockfiles:\n{}", errors.join("\n"))]
    #[diagnostic(code(lockmerge::lockfiles))]
    Aggregate { errors: Vec<String> },

    #[error("`{command}` failed with exit code {code:?}\n{stderr}")]
    #[diagnostic(code(lockmerge::external_tool))]
    ExternalTool {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error(
        "expected relative path specifier for workspace dependency, but got '{spec}' for {name} in {}",
        path.display()
    )]
    #[diagnostic(code(lockmerge::workspace_spec))]
    WorkspaceSpec {
        path: PathBuf,
        name: String,
        spec: String,
    },
}

impl PackageManagerError {
    pub fn parse(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        PackageManagerError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// The message without the path prefix, for callers that print the
    /// path themselves.
    pub fn detail(&self) -> String {
        match self {
            PackageManagerError::Parse { message, .. } => message.clone(),
            PackageManagerError::Io { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            PackageManagerError::Parse { path, message } => {
                Diagnostic::error(format!("failed to parse {}", path.display()))
                    .with_location(path)
                    .with_context(message.clone())
                    .with_suggestion(suggestions::REGENERATE_LOCKFILE)
            }

            PackageManagerError::Io { path, source } => {
                Diagnostic::error(format!("failed to access {}", path.display()))
                    .with_location(path)
                    .with_context(source.to_string())
            }

            PackageManagerError::Conflict {
                source_path,
                conflicts,
            } => {
                let mut diag = Diagnostic::error("conflicting resolutions in merged lockfile")
                    .with_location(source_path);
                for conflict in conflicts {
                    diag = diag.with_context(conflict.to_string());
                }
                diag.with_suggestion(suggestions::ALIGN_VERSIONS)
            }

            PackageManagerError::Aggregate { errors } => {
                let mut diag = Diagnostic::error("unable to process some lockfiles");
                for e in errors {
                    diag = diag.with_context(e.clone());
                }
                diag.with_suggestion(suggestions::REGENERATE_LOCKFILE)
            }

            PackageManagerError::ExternalTool {
                command,
                code,
                stderr,
            } => {
                let mut diag = Diagnostic::error(format!("`{}` failed", command))
                    .with_context(format!("exit code: {:?}", code));
                for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
                    diag = diag.with_context(line.to_string());
                }
                diag.with_suggestion(suggestions::INSTALL_FAILED)
            }

            PackageManagerError::WorkspaceSpec { path, name, spec } => Diagnostic::error(format!(
                "invalid workspace specifier '{}' for `{}`",
                spec, name
            ))
            .with_location(path)
            .with_suggestion(suggestions::WORKSPACE_SPEC),
        }
    }
}
