use async_trait::async_trait;

use crate::build;
use crate::error::Result;
use crate::tools::{self, check_step, InstallContext, Tool};

const NAME: &str = "openssl";
const HOMEPAGE: &str = "https://www.openssl.org/";
const REPO_URL: &str = "https://github.com/openssl/openssl.git";

pub struct Openssl;

#[async_trait]
impl Tool for Openssl {
    fn name(&self) -> &'static str {
        NAME
    }

    fn homepage(&self) -> &'static str {
        HOMEPAGE
    }

    fn summary(&self) -> &'static str {
        "openssl libraries and CLI, built from the git checkout"
    }

    fn required_commands(&self) -> &'static [&'static str] {
        &["make", "perl"]
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()> {
        let repo = ctx.res.repositories.join(NAME);
        tools::sync_repository(NAME, REPO_URL, &repo, true)?;

        let ssl_dir = format!("--openssldir={}", ctx.res.home.join(".ssl").display());
        check_step(
            NAME,
            "configuring",
            build::configure_perl(&repo, &[ctx.prefix_flag(), ssl_dir], NAME).await?,
        )?;

        check_step(
            NAME,
            "compiling",
            build::make(&repo, &[], ctx.config.make_jobs(), NAME).await?,
        )?;

        check_step(NAME, "installing", build::make_install(&repo, &[], NAME).await?)?;

        Ok(())
    }
}
