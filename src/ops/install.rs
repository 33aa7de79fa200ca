//! Installing a target's dependencies from its merged lockfile.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::ops::aggregate::{MergedArtifacts, PnpmPackageManager, StoreLayout};
use crate::util::process::{find_executable, ProcessBuilder};

/// Entry point of the prebuilder CLI, relative to its checkout.
const PREBUILDER_SCRIPT: &str = "build/bin/prebuilder.js";

/// Options for [`install`].
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Share one store across projects instead of an isolated one.
    pub local_mode: bool,
}

/// What an install run did.
#[derive(Debug)]
pub struct InstallResult {
    pub artifacts: MergedArtifacts,
    pub store: StoreLayout,
    /// Command line that was executed.
    pub command: String,
}

impl PnpmPackageManager {
    fn pnpm_executable(&self) -> Result<PathBuf> {
        if let Some(ref pnpm) = self.config().pnpm {
            return Ok(pnpm.clone());
        }
        find_executable("pnpm").context("pnpm not found in PATH")
    }

    fn node_executable(&self) -> Result<PathBuf> {
        if let Some(ref node) = self.config().node {
            return Ok(node.clone());
        }
        find_executable("node").context("node not found in PATH")
    }

    /// Prebuilder command that swaps prebuilt native addons into the
    /// virtual store, or `None` when no prebuilder is configured.
    ///
    /// Runs without the default pnpm options.
    pub fn apply_addons_command(&self, virtual_store_dir: &Path) -> Result<Option<ProcessBuilder>> {
        let Some(ref prebuilder) = self.config().prebuilder else {
            return Ok(None);
        };
        let cmd = ProcessBuilder::new(self.node_executable()?)
            .arg(prebuilder.join(PREBUILDER_SCRIPT))
            .args(["apply-addons", "--virtual-store"])
            .arg(virtual_store_dir)
            .cwd(self.build_path());
        Ok(Some(cmd))
    }

    /// Arguments of the frozen, offline `pnpm install` for `store`.
    pub fn install_args(&self, store: &StoreLayout) -> Vec<String> {
        let mut args: Vec<String> = [
            "install",
            "--frozen-lockfile",
            "--ignore-pnpmfile",
            "--ignore-scripts",
            "--no-verify-store-integrity",
            "--offline",
            "--package-import-method",
            "hardlink",
            "--store-dir",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        args.push(store.store_dir.display().to_string());
        args.push("--strict-peer-dependencies".to_string());
        args.push("--virtual-store-dir".to_string());
        args.push(store.virtual_store_dir.display().to_string());
        args.extend(self.default_options());
        args
    }

    /// Options passed to every pnpm command.
    fn default_options(&self) -> Vec<String> {
        vec![
            "--registry".to_string(),
            self.config().registry.clone(),
            "--stream".to_string(),
            "--reporter".to_string(),
            "append-only".to_string(),
            "--no-color".to_string(),
        ]
    }
}

/// Merge the target's lockfiles, then run pnpm against the result.
///
/// pnpm runs in the target's build directory and must succeed on the first
/// try. With a prebuilder configured, its native addons are then applied to
/// the virtual store. Finally the lockfile pnpm keeps in the virtual store
/// is replaced with the target's source lockfile.
pub fn install(pm: &PnpmPackageManager, opts: &InstallOptions) -> Result<InstallResult> {
    let artifacts = pm.prepare_merged_artifacts()?;
    let store = pm.store_layout(opts.local_mode);

    let cmd = ProcessBuilder::new(pm.pnpm_executable()?)
        .args(pm.install_args(&store))
        .cwd(pm.build_path());
    let command = cmd.display_command();

    tracing::info!("Installing dependencies of {}", pm.module_path().display());
    tracing::debug!("running {}", command);

    cmd.exec_and_check().with_context(|| {
        format!(
            "failed to install dependencies, see {}",
            pm.debug_log_path().display()
        )
    })?;

    if let Some(addons) = pm.apply_addons_command(&store.virtual_store_dir)? {
        tracing::info!("Applying prebuilt addons");
        tracing::debug!("running {}", addons.display_command());
        addons.exec_and_check().context("failed to apply prebuilt addons")?;
    }

    pm.replace_internal_lockfile_with_original(&store.virtual_store_dir)?;

    Ok(InstallResult {
        artifacts,
        store,
        command,
    })
}
