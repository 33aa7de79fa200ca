//! Command implementations

pub mod completions;
pub mod extract;
pub mod inouts;
pub mod install;
pub mod prepare;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::cli::GlobalArgs;
use lockmerge::util::config::{Config, PathsConfig};
use lockmerge::util::GlobalContext;
use lockmerge::PnpmPackageManager;

/// Build the package manager for the target selected on the command line.
///
/// Flags override the loaded config. Relative roots are taken from the
/// working directory.
pub fn package_manager(global: &GlobalArgs) -> Result<PnpmPackageManager> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(global.verbose);

    let mut config = ctx.load_config(global.config.as_deref())?;
    config.merge(Config {
        paths: PathsConfig {
            source_root: global.source_root.clone(),
            build_root: global.build_root.clone(),
            contribs: None,
        },
        ..Config::default()
    });
    config.paths.source_root = config.paths.source_root.map(|p| ctx.cwd().join(p));
    config.paths.build_root = config.paths.build_root.map(|p| ctx.cwd().join(p));

    let module = match global.module {
        Some(ref module) => module.clone(),
        None => module_from_cwd(ctx.cwd(), config.paths.source_root.as_deref())?,
    };

    let manager_config = config.manager_config(&module, ctx.cache_dir())?;
    tracing::debug!("using {:?}", manager_config);
    Ok(PnpmPackageManager::new(manager_config))
}

fn module_from_cwd(cwd: &Path, source_root: Option<&Path>) -> Result<PathBuf> {
    let Some(source_root) = source_root else {
        bail!("source root is not set (use --source-root or [paths] source_root)");
    };
    match cwd.strip_prefix(source_root) {
        Ok(module) if !module.as_os_str().is_empty() => Ok(module.to_path_buf()),
        _ => bail!(
            "{} is not a package inside {}, pass --module",
            cwd.display(),
            source_root.display()
        ),
    }
}
