//! `lockmerge extract` command

use anyhow::{Context, Result};
use serde_json::json;

use crate::cli::{ExtractArgs, GlobalArgs};
use lockmerge::ops::extract::extract_packages_meta;

pub fn execute(args: ExtractArgs, _global: &GlobalArgs) -> Result<()> {
    let extraction = extract_packages_meta(&args.lockfiles);

    if args.json {
        let packages: Vec<_> = extraction
            .packages
            .iter()
            .map(|pkg| {
                json!({
                    "name": pkg.name,
                    "version": pkg.version.to_string(),
                    "tarball_path": pkg.tarball_path,
                    "tarball_url": pkg.tarball_url,
                    "integrity": pkg.integrity.as_ref().map(|i| format!("{}:{}", i.algorithm, i.hex_digest)),
                })
            })
            .collect();
        let json = serde_json::to_string_pretty(&packages).context("failed to serialize output")?;
        println!("{}", json);
    } else {
        for pkg in &extraction.packages {
            println!("{}@{} {}", pkg.name, pkg.version, pkg.tarball_path);
        }
    }

    extraction.into_result()?;
    Ok(())
}
