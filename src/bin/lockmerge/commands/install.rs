//! `lockmerge install` command

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, InstallArgs};
use crate::commands::package_manager;
use lockmerge::ops::install::{install, InstallOptions};
use lockmerge::PnpmPackageManager;

pub fn execute(args: InstallArgs, global: &GlobalArgs) -> Result<()> {
    let mut pm = package_manager(global)?;
    if let Some(prebuilder) = args.prebuilder {
        // The addon script runs from the build directory.
        let prebuilder = std::env::current_dir()
            .context("failed to get current directory")?
            .join(prebuilder);
        pm = PnpmPackageManager::new(pm.config().clone().with_prebuilder(prebuilder));
    }
    let result = install(
        &pm,
        &InstallOptions {
            local_mode: args.local,
        },
    )?;

    eprintln!(
        "   Installed {} packages into {}",
        result.artifacts.lockfile.packages().len(),
        result.store.virtual_store_dir.display()
    );

    Ok(())
}
