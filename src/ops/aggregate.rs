//! Merged lockfile and workspace config for one build target.
//!
//! Every in-repo package owns its lockfile. A target that depends on other
//! in-repo packages is installed from a single lockfile and workspace config
//! assembled here from the target's own files and the merged files its
//! internal dependencies already wrote to the build tree.
//!
//! # Ordering contract
//!
//! The host build graph must finish the merge of every depth-1 internal
//! dependency before the dependent target runs. The files those steps write
//! are reported as inputs by [`PnpmPackageManager::compute_inputs_outputs`]
//! so that the build system can schedule accordingly; nothing here waits for
//! or checks them beyond skipping files that are absent.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::errors::PackageManagerError;
use crate::core::lockfile::Lockfile;
use crate::core::manifest::PackageManifest;
use crate::core::package_meta::TarballDescriptor;
use crate::core::workspace::WorkspaceConfig;
use crate::ops::extract::extract_packages_meta;
use crate::util::paths::{
    b_rooted, build_lockfile_path, build_nm_bundle_path, build_nm_path, build_pj_path,
    build_ws_config_path, normalize, relative_path, s_rooted, RootedPath, DEBUG_LOG_FILENAME,
};

/// Default location of npm tarballs, relative to the build root.
pub const DEFAULT_CONTRIBS_PATH: &str = "contrib/npm";

/// Default registry passed to the installer.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";

/// Everything the package manager needs to know about its environment.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Root of the source tree (`$S`)
    pub sources_root: PathBuf,
    /// Root of the build output tree (`$B`)
    pub build_root: PathBuf,
    /// Target package, relative to both roots
    pub module_path: PathBuf,
    /// Tarball directory, relative to the build root
    pub contribs_path: PathBuf,
    /// User cache directory holding the shared store in local mode
    pub cache_dir: PathBuf,
    /// Registry URL passed to the installer
    pub registry: String,
    /// Installer executable; looked up on PATH when unset
    pub pnpm: Option<PathBuf>,
    /// Node.js executable for addon scripts; looked up on PATH when unset
    pub node: Option<PathBuf>,
    /// Prebuilder checkout whose native addons are applied after install
    pub prebuilder: Option<PathBuf>,
}

impl ManagerConfig {
    pub fn new(
        sources_root: impl AsRef<Path>,
        build_root: impl AsRef<Path>,
        module_path: impl AsRef<Path>,
    ) -> Self {
        let build_root = normalize(build_root.as_ref());
        ManagerConfig {
            sources_root: normalize(sources_root.as_ref()),
            cache_dir: build_root.join(".cache"),
            build_root,
            module_path: normalize(module_path.as_ref()),
            contribs_path: PathBuf::from(DEFAULT_CONTRIBS_PATH),
            registry: DEFAULT_REGISTRY.to_string(),
            pnpm: None,
            node: None,
            prebuilder: None,
        }
    }

    pub fn with_contribs_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.contribs_path = path.into();
        self
    }

    pub fn with_cache_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_dir = path.into();
        self
    }

    pub fn with_registry(mut self, registry: impl Into<String>) -> Self {
        self.registry = registry.into();
        self
    }

    pub fn with_pnpm(mut self, pnpm: impl Into<PathBuf>) -> Self {
        self.pnpm = Some(pnpm.into());
        self
    }

    pub fn with_node(mut self, node: impl Into<PathBuf>) -> Self {
        self.node = Some(node.into());
        self
    }

    pub fn with_prebuilder(mut self, path: impl Into<PathBuf>) -> Self {
        self.prebuilder = Some(path.into());
        self
    }
}

/// Where the installer keeps packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    /// Content-addressed package store
    pub store_dir: PathBuf,
    /// Resolved packages laid out as a dependency tree
    pub virtual_store_dir: PathBuf,
}

/// Files a build step reads and writes, declared ahead of running it.
#[derive(Debug, Default)]
pub struct InputsOutputs {
    /// Problems met while scanning lockfiles; the lists are still complete
    /// for every lockfile that could be read
    pub errors: Vec<PackageManagerError>,
    pub inputs: Vec<RootedPath>,
    pub outputs: Vec<RootedPath>,
}

/// The merged artifacts written for a target.
#[derive(Debug, Clone)]
pub struct MergedArtifacts {
    pub lockfile: Lockfile,
    pub workspace: WorkspaceConfig,
}

/// pnpm lockfile aggregation for one target package.
#[derive(Debug, Clone)]
pub struct PnpmPackageManager {
    config: ManagerConfig,
}

impl PnpmPackageManager {
    const STORE_NM_PATH: &'static str = ".pnpm/store";
    const VSTORE_NM_PATH: &'static str = ".pnpm/virtual-store";
    const LOCAL_STORE_DIRNAME: &'static str = "pnpm-store";
    const LOCAL_VSTORE_NM_PATH: &'static str = ".pnpm";

    pub fn new(config: ManagerConfig) -> Self {
        PnpmPackageManager { config }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn module_path(&self) -> &Path {
        &self.config.module_path
    }

    /// Target package directory in the source tree.
    pub fn sources_path(&self) -> PathBuf {
        self.config.sources_root.join(&self.config.module_path)
    }

    /// Target package directory in the build tree.
    pub fn build_path(&self) -> PathBuf {
        self.config.build_root.join(&self.config.module_path)
    }

    /// Path under the target's dependency tree.
    pub fn nm_path(&self, sub: impl AsRef<Path>) -> PathBuf {
        build_nm_path(&self.build_path()).join(sub)
    }

    /// Installer debug log.
    pub fn debug_log_path(&self) -> PathBuf {
        self.nm_path(DEBUG_LOG_FILENAME)
    }

    /// Store directories for an isolated build, or for a developer machine
    /// sharing one store across projects.
    pub fn store_layout(&self, local_mode: bool) -> StoreLayout {
        if local_mode {
            StoreLayout {
                store_dir: self.config.cache_dir.join(Self::LOCAL_STORE_DIRNAME),
                virtual_store_dir: self.nm_path(Self::LOCAL_VSTORE_NM_PATH),
            }
        } else {
            StoreLayout {
                store_dir: self.nm_path(Self::STORE_NM_PATH),
                virtual_store_dir: self.nm_path(Self::VSTORE_NM_PATH),
            }
        }
    }

    /// Tarball location relative to the build root.
    pub fn contrib_tarball_path(&self, pkg: &TarballDescriptor) -> PathBuf {
        pkg.contrib_path(&self.config.contribs_path)
    }

    /// Build-local URL the installer fetches a tarball from.
    pub fn contrib_tarball_url(&self, pkg: &TarballDescriptor) -> String {
        let path = self.config.build_root.join(self.contrib_tarball_path(pkg));
        format!("file:{}", path.display())
    }

    /// Module path of a package directory in the source tree.
    fn module_of(&self, src_dir: &Path) -> PathBuf {
        match src_dir.strip_prefix(&self.config.sources_root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => relative_path(&self.config.sources_root, src_dir),
        }
    }

    /// Copy the source manifest into the build tree, where the installer
    /// reads it.
    fn build_package_json(&self) -> Result<PackageManifest> {
        let mut pj = PackageManifest::load_from_dir(&self.sources_path())?;
        pj.set_path(build_pj_path(&self.build_path()));
        pj.write()?;
        Ok(pj)
    }

    /// Fold every dependency's build-tree workspace config into `ws` and
    /// write it.
    fn build_merged_workspace_config(
        &self,
        ws: &mut WorkspaceConfig,
        dep_paths: &[PathBuf],
    ) -> Result<()> {
        for dep_path in dep_paths {
            let ws_config_path = build_ws_config_path(dep_path);
            if ws_config_path.is_file() {
                tracing::debug!("merging {}", ws_config_path.display());
                ws.merge(&WorkspaceConfig::load(&ws_config_path)?);
            }
        }

        ws.write()
            .with_context(|| format!("failed to write {}", ws.path().display()))
    }

    /// Merge the target's lockfile with every dependency's build-tree
    /// lockfile, point tarballs at the build-local store and write it.
    ///
    /// Dependency lockfiles in the build tree already carry build-local
    /// URLs, so the target's entries are rewritten before merging and
    /// both sides compare in the same form. A conflict aborts before
    /// anything is written.
    fn build_merged_lockfile(&self, dep_paths: &[PathBuf]) -> Result<Lockfile> {
        let mut lf = Lockfile::load(&build_lockfile_path(&self.sources_path()))?;
        // Importer paths are rebased against the output location.
        lf.set_path(build_lockfile_path(&self.build_path()));
        lf.update_tarball_resolutions(|pkg| self.contrib_tarball_url(pkg))?;

        for dep_path in dep_paths {
            let lf_path = build_lockfile_path(dep_path);
            if lf_path.is_file() {
                let dep_lf = Lockfile::load(&lf_path)?;
                let added = lf.merge(&dep_lf).into_result(&lf_path)?;
                tracing::debug!("merged {} ({} new packages)", lf_path.display(), added);
            }
        }

        // Entries merged in from dependencies not prepared by this tool.
        lf.update_tarball_resolutions(|pkg| self.contrib_tarball_url(pkg))?;
        lf.write()
            .with_context(|| format!("failed to write {}", lf.path().display()))?;
        Ok(lf)
    }

    /// Write the merged manifest, workspace config and lockfile for the
    /// target into the build tree and return them.
    ///
    /// Requires the merged files of depth-1 internal dependencies to be in
    /// the build tree already (see the module docs). The target's own
    /// lockfile must exist and parse.
    pub fn prepare_merged_artifacts(&self) -> Result<MergedArtifacts> {
        tracing::info!("Merging lockfiles for {}", self.module_path().display());

        let src_pj = PackageManifest::load_from_dir(&self.sources_path())?;
        self.build_package_json()?;

        let mut ws = WorkspaceConfig::new(build_ws_config_path(&self.build_path()));
        ws.set_from_package_manifest(&src_pj)?;
        let dep_paths = ws.paths(None, true);

        self.build_merged_workspace_config(&mut ws, &dep_paths)?;
        let lockfile = self.build_merged_lockfile(&dep_paths)?;

        tracing::info!(
            "Merged {} packages from {} internal dependencies",
            lockfile.packages().len(),
            dep_paths.len()
        );

        Ok(MergedArtifacts {
            lockfile,
            workspace: ws,
        })
    }

    /// Inputs and outputs of the step that installs the target's
    /// dependencies, computed from the source tree without installing.
    ///
    /// Inputs: the source manifest and lockfile, the build-tree manifests
    /// of all internal dependencies, the merged lockfiles and workspace
    /// configs of depth-1 internal dependencies, and every tarball.
    /// Outputs: the merged lockfile, the workspace config and, outside
    /// local mode, the dependency tree bundle.
    ///
    /// Lockfile problems end up in `errors`; only an unreadable manifest
    /// fails the call.
    pub fn compute_inputs_outputs(&self, local_mode: bool) -> Result<InputsOutputs> {
        let module = self.module_path().to_path_buf();
        let mut inputs = vec![s_rooted(build_pj_path(&module))];
        let mut outputs = Vec::new();

        let pj = PackageManifest::load_from_dir(&self.sources_path())?;
        let own_lf_path = build_lockfile_path(&self.sources_path());
        // Source lockfiles are read only for tarball metadata.
        let mut src_lf_paths = Vec::new();

        if pj.has_dependencies() {
            inputs.push(s_rooted(build_lockfile_path(&module)));
            outputs.push(b_rooted(build_lockfile_path(&module)));
            outputs.push(b_rooted(build_ws_config_path(&module)));
            if !local_mode {
                outputs.push(b_rooted(build_nm_bundle_path(&module)));
            }
            src_lf_paths.push(own_lf_path);
        } else if own_lf_path.is_file() {
            src_lf_paths.push(own_lf_path);
        }

        for (dep_src_path, member) in pj.workspace_map(true)? {
            let dep_module = self.module_of(&dep_src_path);
            // pnpm needs the manifest of every workspace package.
            inputs.push(b_rooted(build_pj_path(&dep_module)));

            let dep_lf_src_path = build_lockfile_path(&dep_src_path);
            if !dep_lf_src_path.is_file() {
                // Leaves may have no dependencies of their own.
                continue;
            }
            src_lf_paths.push(dep_lf_src_path);

            if member.depth == 1 {
                inputs.push(b_rooted(build_ws_config_path(&dep_module)));
                inputs.push(b_rooted(build_lockfile_path(&dep_module)));
            }
        }

        let extraction = extract_packages_meta(&src_lf_paths);
        for pkg in &extraction.packages {
            inputs.push(b_rooted(self.contrib_tarball_path(pkg)));
        }
        let errors = extraction.error().into_iter().collect();

        Ok(InputsOutputs {
            errors,
            inputs,
            outputs,
        })
    }

    /// Copy the target's source lockfile over the one pnpm keeps in the
    /// virtual store, so later tooling sees the original resolutions.
    pub fn replace_internal_lockfile_with_original(&self, virtual_store_dir: &Path) -> Result<()> {
        let original = build_lockfile_path(&self.sources_path());
        let internal = virtual_store_dir.join("lock.yaml");
        crate::util::fs::copy_file(&original, &internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{LockfileFixture, Monorepo};

    fn strings(paths: &[RootedPath]) -> Vec<String> {
        paths.iter().map(ToString::to_string).collect()
    }

    /// app -> libs/ui -> libs/core, all with external dependencies.
    fn three_level_repo() -> Monorepo {
        let repo = Monorepo::new();
        repo.manifest("app", &[("ui", "workspace:../libs/ui"), ("react", "18.2.0")]);
        repo.manifest("libs/ui", &[("core", "workspace:../core"), ("left-pad", "1.3.0")]);
        repo.manifest("libs/core", &[("lodash", "4.17.21")]);
        repo.lockfile("app", LockfileFixture::new().package("/react/18.2.0"));
        repo.lockfile(
            "libs/ui",
            LockfileFixture::new()
                .package("/left-pad/1.3.0")
                .package("/lodash/4.17.21"),
        );
        repo.lockfile("libs/core", LockfileFixture::new().package("/lodash/4.17.21"));
        repo
    }

    #[test]
    fn test_inouts_without_dependencies() {
        let repo = Monorepo::new();
        repo.manifest("leaf", &[]);

        let io = repo
            .package_manager("leaf")
            .compute_inputs_outputs(false)
            .unwrap();

        assert!(io.errors.is_empty());
        assert_eq!(strings(&io.inputs), vec!["$S/leaf/package.json"]);
        assert!(io.outputs.is_empty());
    }

    #[test]
    fn test_inouts_transitive() {
        let repo = three_level_repo();

        let io = repo
            .package_manager("app")
            .compute_inputs_outputs(false)
            .unwrap();

        assert!(io.errors.is_empty(), "{:?}", io.errors);
        assert_eq!(
            strings(&io.inputs),
            vec![
                "$S/app/package.json",
                "$S/app/pnpm-lock.yaml",
                "$B/libs/core/package.json",
                "$B/libs/ui/package.json",
                "$B/libs/ui/pnpm-workspace.yaml",
                "$B/libs/ui/pnpm-lock.yaml",
                "$B/contrib/npm/react/-/react-18.2.0.tgz",
                "$B/contrib/npm/lodash/-/lodash-4.17.21.tgz",
                "$B/contrib/npm/left-pad/-/left-pad-1.3.0.tgz",
            ]
        );
        assert_eq!(
            strings(&io.outputs),
            vec![
                "$B/app/pnpm-lock.yaml",
                "$B/app/pnpm-workspace.yaml",
                "$B/app/workspace_node_modules.tar",
            ]
        );

        let local = repo
            .package_manager("app")
            .compute_inputs_outputs(true)
            .unwrap();
        assert_eq!(local.outputs.len(), 2);
    }

    #[test]
    fn test_inouts_collects_lockfile_errors() {
        let repo = three_level_repo();
        std::fs::write(
            repo.sources_root.join("libs/core/pnpm-lock.yaml"),
            "packages: [unclosed",
        )
        .unwrap();

        let io = repo
            .package_manager("app")
            .compute_inputs_outputs(false)
            .unwrap();

        assert_eq!(io.errors.len(), 1);
        assert!(io.errors[0].to_string().contains("libs/core/pnpm-lock.yaml"));
        // Tarballs of the readable lockfiles are still declared.
        assert!(strings(&io.inputs).contains(&"$B/contrib/npm/left-pad/-/left-pad-1.3.0.tgz".to_string()));
        assert!(strings(&io.inputs).contains(&"$B/libs/core/package.json".to_string()));
    }

    #[test]
    fn test_prepare_merges_dependency_artifacts() {
        let repo = Monorepo::new();
        repo.manifest("app", &[("q", "workspace:../q"), ("p1", "1.0.0")]);
        repo.manifest("q", &[("p3", "1.0.0")]);
        repo.lockfile(
            "app",
            LockfileFixture::new().package("/p1/1.0.0").package("/p2/2.0.0"),
        );
        repo.lockfile(
            "q",
            LockfileFixture::new().package("/p2/2.0.0").package("/p3/1.0.0"),
        );

        repo.package_manager("q").prepare_merged_artifacts().unwrap();
        let merged = repo.package_manager("app").prepare_merged_artifacts().unwrap();

        assert_eq!(
            merged.lockfile.packages().keys().collect::<Vec<_>>(),
            vec!["/p1/1.0.0", "/p2/2.0.0", "/p3/1.0.0"]
        );
        assert!(merged.workspace.packages().contains("../q"));
        assert!(repo.build_root.join("app/package.json").is_file());

        let tarball = merged.lockfile.packages()["/p3/1.0.0"]
            .resolution
            .tarball
            .clone()
            .unwrap();
        let expected = repo.build_root.join("contrib/npm/p3/-/p3-1.0.0.tgz");
        assert_eq!(tarball, format!("file:{}", expected.display()));

        let ws = repo.read_build("app/pnpm-workspace.yaml");
        assert!(ws.contains("../q"));
    }

    #[test]
    fn test_prepare_is_deterministic() {
        let repo = three_level_repo();
        for module in ["libs/core", "libs/ui"] {
            repo.package_manager(module).prepare_merged_artifacts().unwrap();
        }

        let pm = repo.package_manager("app");
        pm.prepare_merged_artifacts().unwrap();
        let lf1 = repo.read_build("app/pnpm-lock.yaml");
        let ws1 = repo.read_build("app/pnpm-workspace.yaml");

        pm.prepare_merged_artifacts().unwrap();
        assert_eq!(lf1, repo.read_build("app/pnpm-lock.yaml"));
        assert_eq!(ws1, repo.read_build("app/pnpm-workspace.yaml"));

        assert!(ws1.contains("../libs/ui"));
        assert!(ws1.contains("../libs/core"));
        assert!(lf1.contains("/left-pad/1.3.0"));
        assert!(lf1.contains("/react/18.2.0"));
    }

    #[test]
    fn test_prepare_conflict_writes_no_lockfile() {
        let repo = Monorepo::new();
        repo.manifest("app", &[("q", "workspace:../q")]);
        repo.manifest("q", &[("p2", "2.0.0")]);
        repo.lockfile(
            "app",
            LockfileFixture::new()
                .package_with_tarball("/p2/2.0.0", "https://registry.npmjs.org/p2/-/p2-2.0.0.tgz"),
        );
        LockfileFixture::new()
            .package_with_tarball("/p2/2.0.0", "https://mirror.example.com/p2/-/p2-2.0.0.tgz")
            .write(&repo.build_root.join("q/pnpm-lock.yaml"));

        let err = repo
            .package_manager("app")
            .prepare_merged_artifacts()
            .unwrap_err();

        let pm_err = err.downcast_ref::<PackageManagerError>().unwrap();
        assert!(matches!(pm_err, PackageManagerError::Conflict { .. }));
        assert!(!repo.build_root.join("app/pnpm-lock.yaml").exists());
    }

    #[test]
    fn test_prepare_shared_registry_tarball_without_integrity() {
        let repo = Monorepo::new();
        repo.manifest("app", &[("q", "workspace:../q"), ("p2", "2.0.0")]);
        repo.manifest("q", &[("p2", "2.0.0")]);
        let registry = "https://registry.npmjs.org/p2/-/p2-2.0.0.tgz";
        repo.lockfile("app", LockfileFixture::new().package_with_tarball("/p2/2.0.0", registry));
        repo.lockfile("q", LockfileFixture::new().package_with_tarball("/p2/2.0.0", registry));

        repo.package_manager("q").prepare_merged_artifacts().unwrap();
        let merged = repo.package_manager("app").prepare_merged_artifacts().unwrap();

        let expected = repo.build_root.join("contrib/npm/p2/-/p2-2.0.0.tgz");
        assert_eq!(
            merged.lockfile.packages()["/p2/2.0.0"].resolution.tarball.as_deref(),
            Some(format!("file:{}", expected.display()).as_str())
        );
        assert!(!repo.read_build("app/pnpm-lock.yaml").contains("registry.npmjs.org"));
    }

    #[test]
    fn test_prepare_rejects_package_without_tarball() {
        let repo = Monorepo::new();
        repo.manifest("app", &[("p1", "1.0.0")]);
        let path = repo.sources_root.join("app/pnpm-lock.yaml");
        std::fs::write(
            &path,
            "lockfileVersion: 5.4\npackages:\n  /p1/1.0.0:\n    resolution: {integrity: sha512-AAEC}\n",
        )
        .unwrap();

        let err = repo
            .package_manager("app")
            .prepare_merged_artifacts()
            .unwrap_err();

        assert!(err.to_string().contains("/p1/1.0.0"), "{err:#}");
        assert!(!repo.build_root.join("app/pnpm-lock.yaml").exists());
    }

    /// Lockfile with top-level `specifiers`/`dependencies` and no importers.
    fn write_single_project_lockfile(repo: &Monorepo, module: &str, name: &str, version: &str) {
        let content = format!(
            "lockfileVersion: 5.4\n\
             specifiers:\n  {name}: {version}\n\
             dependencies:\n  {name}: {version}\n\
             packages:\n  /{name}/{version}:\n    \
             resolution: {{integrity: sha512-AAEC, tarball: 'https://registry.npmjs.org/{name}/-/{name}-{version}.tgz'}}\n    \
             dev: false\n"
        );
        std::fs::write(repo.sources_root.join(module).join("pnpm-lock.yaml"), content).unwrap();
    }

    #[test]
    fn test_prepare_single_project_lockfiles_is_deterministic() {
        let repo = Monorepo::new();
        repo.manifest("app", &[("q", "workspace:../q"), ("left-pad", "1.3.0")]);
        repo.manifest("q", &[("lodash", "4.17.21")]);
        write_single_project_lockfile(&repo, "app", "left-pad", "1.3.0");
        write_single_project_lockfile(&repo, "q", "lodash", "4.17.21");

        repo.package_manager("q").prepare_merged_artifacts().unwrap();
        let pm = repo.package_manager("app");
        let merged = pm.prepare_merged_artifacts().unwrap();
        let first = repo.read_build("app/pnpm-lock.yaml");

        pm.prepare_merged_artifacts().unwrap();
        assert_eq!(first, repo.read_build("app/pnpm-lock.yaml"));

        assert!(merged.lockfile.data().specifiers.is_none());
        assert!(merged.lockfile.data().dependencies.is_none());
        assert_eq!(
            merged.lockfile.importers().keys().map(String::as_str).collect::<Vec<_>>(),
            vec![".", "../q"]
        );
        assert_eq!(merged.lockfile.packages().len(), 2);
    }

    #[test]
    fn test_prepare_requires_own_lockfile() {
        let repo = Monorepo::new();
        repo.manifest("app", &[("p1", "1.0.0")]);

        let err = repo
            .package_manager("app")
            .prepare_merged_artifacts()
            .unwrap_err();

        assert!(err.to_string().contains("pnpm-lock.yaml"));
    }

    #[test]
    fn test_store_layout() {
        let repo = Monorepo::new();
        let pm = repo.package_manager("app");

        let isolated = pm.store_layout(false);
        assert_eq!(
            isolated.store_dir,
            repo.build_root.join("app/node_modules/.pnpm/store")
        );
        assert_eq!(
            isolated.virtual_store_dir,
            repo.build_root.join("app/node_modules/.pnpm/virtual-store")
        );

        let local = pm.store_layout(true);
        assert_eq!(local.store_dir, repo.build_root.join(".cache/pnpm-store"));
        assert_eq!(
            local.virtual_store_dir,
            repo.build_root.join("app/node_modules/.pnpm")
        );
        assert_eq!(
            pm.debug_log_path(),
            repo.build_root.join("app/node_modules/.pnpm-debug.log")
        );
    }
}
