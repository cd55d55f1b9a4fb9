use async_trait::async_trait;

use crate::error::Result;
use crate::build;
use crate::tools::{self, check_step, InstallContext, Tool};

const NAME: &str = "neovim";
const HOMEPAGE: &str = "https://neovim.io/";
const REPO_URL: &str = "https://github.com/neovim/neovim.git";
const INIT_VIM: &str = "neovim/init.vim";

pub struct Neovim;

#[async_trait]
impl Tool for Neovim {
    fn name(&self) -> &'static str {
        NAME
    }

    fn homepage(&self) -> &'static str {
        HOMEPAGE
    }

    fn summary(&self) -> &'static str {
        "neovim editor, built from the git checkout"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["automake", "libtool"]
    }

    fn required_commands(&self) -> &'static [&'static str] {
        &["make", "cmake"]
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()> {
        let repo = ctx.res.repositories.join(NAME);
        tools::sync_repository(NAME, REPO_URL, &repo, false)?;

        // neovim's top-level Makefile drives its own cmake invocation; the
        // prefix is forwarded as a make variable.
        let prefix_var = format!("CMAKE_INSTALL_PREFIX={}", ctx.res.prefix.display());
        check_step(
            NAME,
            "compiling",
            build::make(&repo, &[prefix_var], ctx.config.make_jobs(), NAME).await?,
        )?;
        check_step(NAME, "installing", build::make_install(&repo, &[], NAME).await?)?;

        let config_dir = ctx.res.tool_config_dir("nvim");
        tools::install_config_file(ctx, NAME, INIT_VIM, &config_dir)?;

        Ok(())
    }
}
