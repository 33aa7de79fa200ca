//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// lockmerge - pnpm lockfile aggregation for monorepo builds
#[derive(Parser)]
#[command(name = "lockmerge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use this config file instead of the global and project ones
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root of the source tree
    #[arg(long, global = true, env = "LOCKMERGE_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// Root of the build output tree
    #[arg(long, global = true, env = "LOCKMERGE_BUILD_ROOT")]
    pub build_root: Option<PathBuf>,

    /// Target package relative to the roots (defaults to the current
    /// directory's position in the source tree)
    #[arg(long, global = true)]
    pub module: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the merged lockfile and workspace config for the target
    Prepare,

    /// Show the files installing the target reads and writes
    Inouts(InoutsArgs),

    /// List the tarballs referenced by lockfiles
    Extract(ExtractArgs),

    /// Merge lockfiles and install the target's dependencies with pnpm
    Install(InstallArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct InoutsArgs {
    /// Use the shared store instead of bundling node_modules
    #[arg(long)]
    pub local: bool,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Lockfiles to scan
    #[arg(required = true)]
    pub lockfiles: Vec<PathBuf>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct InstallArgs {
    /// Use the shared store under the user cache directory
    #[arg(long)]
    pub local: bool,

    /// Prebuilder checkout whose native addons are applied after install
    #[arg(long, value_name = "DIR")]
    pub prebuilder: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
