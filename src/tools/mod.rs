//! Tool installers.
//!
//! Every supported tool implements the [`Tool`] trait and registers itself in
//! [`ToolRegistry::with_defaults`]. An install is a straight-line sequence of
//! fetch, extract, configure, compile and install calls; the shared helpers
//! below cover the sequences that repeat across tools.
//!
//! Dependencies between tools are flat, explicit lists consumed by
//! `toolup install --with-dependencies`. There is no resolver: a tool names
//! the installers to run before it, nothing transitive.
//!
//! # Adding a New Tool
//!
//! 1. Create a new module (e.g., `ripgrep.rs`)
//! 2. Implement the `Tool` trait
//! 3. Register it in `ToolRegistry::with_defaults()`

pub mod autoconf;
pub mod automake;
pub mod bash;
pub mod cmake;
pub mod libtool;
pub mod llvm;
pub mod ncurses;
pub mod neovim;
pub mod ninja;
pub mod node;
pub mod openssl;
pub mod vifm;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::build::StepOutput;
use crate::config::AppConfig;
use crate::error::{Result, ToolupError};
use crate::paths::Resources;
use crate::{build, fetch, fsutil, ui};

/// Everything an installer needs: resolved paths, configuration, and a
/// shared HTTP client.
pub struct InstallContext {
    pub config: AppConfig,
    pub res: Resources,
    pub client: reqwest::Client,
}

impl InstallContext {
    pub fn new(config: AppConfig) -> Result<Self> {
        let res = Resources::from_config(&config)?;
        Ok(Self {
            config,
            res,
            client: reqwest::Client::new(),
        })
    }

    /// `--prefix=<install prefix>` as passed to configure scripts.
    pub fn prefix_flag(&self) -> String {
        format!("--prefix={}", self.res.prefix.display())
    }
}

/// One installable tool.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn version(&self) -> Option<&'static str> {
        None
    }

    fn homepage(&self) -> &'static str;

    fn summary(&self) -> &'static str;

    /// Tools to install first when `--with-dependencies` is given.
    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    /// External commands the build shells out to.
    fn required_commands(&self) -> &'static [&'static str] {
        &[]
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()>;
}

/// Serializable tool metadata for `toolup info`.
#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<&'static str>,
    pub homepage: &'static str,
    pub summary: &'static str,
    pub dependencies: Vec<&'static str>,
}

impl ToolInfo {
    pub fn of(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name(),
            version: tool.version(),
            homepage: tool.homepage(),
            summary: tool.summary(),
            dependencies: tool.dependencies().to_vec(),
        }
    }
}

/// Registry of all installable tools, looked up by name.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(autoconf::Autoconf);
        registry.register(automake::Automake);
        registry.register(libtool::Libtool);
        registry.register(ncurses::Ncurses);
        registry.register(cmake::Cmake);
        registry.register(ninja::Ninja);
        registry.register(neovim::Neovim);
        registry.register(vifm::Vifm);
        registry.register(openssl::Openssl);
        registry.register(node::Node);
        registry.register(llvm::Llvm);
        registry.register(bash::Bash);
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.push(Arc::new(tool));
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Tool>> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .ok_or_else(|| ToolupError::UnknownTool {
                name: name.to_string(),
                supported: self.names(),
            })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }
}

/// A release tarball to download and unpack.
pub struct ArchiveSource {
    pub url: &'static str,
    /// File name the download is stored under in the scratch dir.
    pub archive_file: &'static str,
    /// Top-level directory the archive unpacks to.
    pub top_dir: &'static str,
    /// Pinned SHA-256 digest, verified when present.
    pub sha256: Option<&'static str>,
}

/// Check a finished build step, printing its captured output and failing the
/// install when the subprocess exited non-zero.
pub(crate) fn check_step(tool: &str, action: &str, out: StepOutput) -> Result<()> {
    if out.success {
        return Ok(());
    }

    tracing::debug!("{} {} exited with {:?}", tool, action, out.code);
    ui::print_step_output(
        &format!("Error while {} {}", action, tool),
        &out.stdout,
        &out.stderr,
    );
    Err(ToolupError::StepFailed {
        tool: tool.to_string(),
        step: action.to_string(),
    })
}

/// Download a release tarball and extract it in the scratch dir, clearing a
/// stale extracted tree first. Returns the extracted top-level directory.
/// A pinned SHA-256 digest, when present, is verified before extraction.
pub(crate) async fn stage_download(
    ctx: &InstallContext,
    tool: &str,
    source: &ArchiveSource,
) -> Result<PathBuf> {
    let archive_path = ctx.res.temp.join(source.archive_file);
    fetch::http::download_archive(&ctx.client, source.url, &archive_path, tool).await?;

    if let Some(expected) = source.sha256 {
        fetch::http::verify_sha256(&archive_path, expected)?;
    }

    let staged = ctx.res.temp.join(source.top_dir);
    if staged.exists() {
        fsutil::remove_path(&staged)?;
    }

    let spinner = ui::step_spinner(&format!("Extracting {} archive", tool));
    let extracted = fetch::extract::extract_archive(&archive_path, &ctx.res.temp);
    spinner.finish_and_clear();
    extracted?;
    ui::done(&format!("Extracted {} archive", tool));

    Ok(staged)
}

/// Stage a release tarball and move the unpacked tree into the packages dir,
/// replacing any stale copy. Returns the package path the build runs in.
pub(crate) async fn stage_archive(
    ctx: &InstallContext,
    tool: &str,
    source: &ArchiveSource,
) -> Result<PathBuf> {
    let staged = stage_download(ctx, tool, source).await?;

    let package = ctx.res.packages.join(tool);
    if package.exists() {
        fsutil::remove_path(&package)?;
    }
    fsutil::move_path(&staged, &package)?;

    Ok(package)
}

/// The classic tarball sequence: `./configure <args>`, `make`, `make install`.
pub(crate) async fn autotools_build(
    ctx: &InstallContext,
    tool: &str,
    dir: &Path,
    configure_args: &[String],
) -> Result<()> {
    check_step(
        tool,
        "configuring",
        build::configure(dir, configure_args, tool).await?,
    )?;
    check_step(
        tool,
        "compiling",
        build::make(dir, &[], ctx.config.make_jobs(), tool).await?,
    )?;
    check_step(tool, "installing", build::make_install(dir, &[], tool).await?)?;
    Ok(())
}

/// Bring a git-based tool's clone up to date: clone when absent, otherwise
/// optionally discard local changes, then fast-forward from origin.
pub(crate) fn sync_repository(
    tool: &str,
    url: &str,
    repo_path: &Path,
    discard_changes: bool,
) -> Result<()> {
    match fetch::git::clone_repository(url, repo_path, tool) {
        Ok(()) => Ok(()),
        Err(ToolupError::LocationExists(_)) => {
            if discard_changes {
                fetch::git::discard_local_changes(repo_path, tool)?;
            }
            fetch::git::update_repository(repo_path, tool)
        }
        Err(e) => Err(e),
    }
}

/// Copy a tool's config file from the user's configs checkout into its
/// runtime config directory. A missing source is reported and skipped so an
/// install without a dotfiles checkout still succeeds.
pub(crate) fn install_config_file(
    ctx: &InstallContext,
    tool: &str,
    source_relative: &str,
    dest_dir: &Path,
) -> Result<()> {
    let source = ctx.res.config_source(source_relative);
    if !source.exists() {
        ui::note(&format!(
            "{} config {} not found, skipping",
            tool,
            source.display()
        ));
        return Ok(());
    }

    if !dest_dir.exists() {
        fsutil::create_directory(dest_dir)?;
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| ToolupError::LocationMissing(source.clone()))?;
    let dest = dest_dir.join(file_name);
    fsutil::copy_file(&source, &dest)?;

    ui::done(&format!("Installed {} config to {}", tool, dest.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_context(dir: &Path) -> InstallContext {
        let config = AppConfig {
            prefix: dir.join("local").display().to_string(),
            repositories_dir: dir.join("Repositories").display().to_string(),
            packages_dir: dir.join("Packages").display().to_string(),
            configs_dir: dir.join("configs").display().to_string(),
            temp_dir: dir.join("tmp").display().to_string(),
            shell_rc: dir.join(".bashrc").display().to_string(),
            jobs: 1,
        };
        let mut res = Resources::from_config(&config).unwrap();
        res.config_dir = dir.join(".config");
        res.rc_snippets = res.config_dir.join("bashrc");
        InstallContext {
            config,
            res,
            client: reqwest::Client::new(),
        }
    }

    #[test]
    fn test_install_config_file_copies_into_tool_dir() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = test_context(temp.path());

        let source_dir = ctx.res.configs_src.join("demo");
        std::fs::create_dir_all(&source_dir).unwrap();
        std::fs::write(source_dir.join("demorc"), "set option").unwrap();

        let dest_dir = ctx.res.tool_config_dir("demo");
        install_config_file(&ctx, "demo", "demo/demorc", &dest_dir).unwrap();

        assert_eq!(
            std::fs::read_to_string(dest_dir.join("demorc")).unwrap(),
            "set option"
        );
    }

    #[test]
    fn test_install_config_file_skips_missing_source() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = test_context(temp.path());

        let dest_dir = ctx.res.tool_config_dir("demo");
        install_config_file(&ctx, "demo", "demo/demorc", &dest_dir).unwrap();

        assert!(!dest_dir.exists());
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = ToolRegistry::with_defaults();
        let names = registry.names();

        for expected in [
            "autoconf", "automake", "libtool", "ncurses", "cmake", "ninja", "neovim", "vifm",
            "openssl", "node", "llvm", "bash",
        ] {
            assert!(names.contains(&expected), "missing tool: {}", expected);
        }
    }

    #[test]
    fn test_registry_get_unknown() {
        let registry = ToolRegistry::with_defaults();
        let result = registry.get("emacs");
        match result {
            Err(ToolupError::UnknownTool { name, supported }) => {
                assert_eq!(name, "emacs");
                assert!(supported.contains(&"neovim"));
            }
            _ => panic!("expected UnknownTool"),
        }
    }

    #[test]
    fn test_declared_dependencies() {
        let registry = ToolRegistry::with_defaults();

        assert_eq!(
            registry.get("neovim").unwrap().dependencies(),
            ["automake", "libtool"]
        );
        assert_eq!(registry.get("vifm").unwrap().dependencies(), ["ncurses"]);
        assert_eq!(registry.get("automake").unwrap().dependencies(), ["autoconf"]);
        assert_eq!(registry.get("ninja").unwrap().dependencies(), ["cmake"]);
        assert!(registry.get("autoconf").unwrap().dependencies().is_empty());
    }

    #[test]
    fn test_dependencies_are_registered_tools() {
        let registry = ToolRegistry::with_defaults();
        let names = registry.names();

        for tool in registry.iter() {
            for dep in tool.dependencies() {
                assert!(
                    names.contains(dep),
                    "{} depends on unregistered tool {}",
                    tool.name(),
                    dep
                );
            }
        }
    }

    #[test]
    fn test_tool_info_serializes() {
        let registry = ToolRegistry::with_defaults();
        let info = ToolInfo::of(&*registry.get("automake").unwrap());

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"name\":\"automake\""));
        assert!(json.contains("\"dependencies\":[\"autoconf\"]"));
    }

    #[test]
    fn test_check_step_failure() {
        let out = StepOutput {
            success: false,
            code: Some(2),
            stdout: String::new(),
            stderr: "boom".to_string(),
        };
        let result = check_step("demo", "compiling", out);
        assert!(matches!(result, Err(ToolupError::StepFailed { .. })));
    }

    #[test]
    fn test_check_step_success() {
        let out = StepOutput {
            success: true,
            code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        };
        check_step("demo", "compiling", out).unwrap();
    }
}
