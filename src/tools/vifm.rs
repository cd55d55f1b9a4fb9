use async_trait::async_trait;

use crate::build;
use crate::error::Result;
use crate::tools::{self, check_step, InstallContext, Tool};

const NAME: &str = "vifm";
const HOMEPAGE: &str = "https://vifm.info/";
const REPO_URL: &str = "https://github.com/vifm/vifm.git";
const VIFMRC: &str = "vifm/vifmrc";

pub struct Vifm;

#[async_trait]
impl Tool for Vifm {
    fn name(&self) -> &'static str {
        NAME
    }

    fn homepage(&self) -> &'static str {
        HOMEPAGE
    }

    fn summary(&self) -> &'static str {
        "vifm file manager, built from the git checkout against the prefix's curses"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["ncurses"]
    }

    fn required_commands(&self) -> &'static [&'static str] {
        &["autoreconf", "make"]
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()> {
        let repo = ctx.res.repositories.join(NAME);
        // The build dirties tracked files, so start every run from a clean tree.
        tools::sync_repository(NAME, REPO_URL, &repo, true)?;

        check_step(
            NAME,
            "reconfiguring",
            build::autoreconf(&repo, &["-f".to_string(), "-i".to_string()], NAME).await?,
        )?;

        let curses_flag = format!("--with-curses={}", ctx.res.prefix.display());
        check_step(
            NAME,
            "configuring",
            build::configure(&repo, &[ctx.prefix_flag(), curses_flag], NAME).await?,
        )?;

        check_step(
            NAME,
            "compiling",
            build::make(&repo, &[], ctx.config.make_jobs(), NAME).await?,
        )?;

        check_step(NAME, "installing", build::make_install(&repo, &[], NAME).await?)?;

        let config_dir = ctx.res.tool_config_dir(NAME);
        tools::install_config_file(ctx, NAME, VIFMRC, &config_dir)?;

        Ok(())
    }
}
