//! `lockmerge prepare` command

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::commands::package_manager;

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let pm = package_manager(global)?;
    let merged = pm.prepare_merged_artifacts()?;

    eprintln!(
        "     Written {} ({} packages)",
        merged.lockfile.path().display(),
        merged.lockfile.packages().len()
    );
    eprintln!(
        "     Written {} ({} members)",
        merged.workspace.path().display(),
        merged.workspace.packages().len()
    );

    Ok(())
}
