use async_trait::async_trait;

use crate::build;
use crate::error::Result;
use crate::tools::{self, check_step, InstallContext, Tool};

const NAME: &str = "ninja";
const HOMEPAGE: &str = "https://ninja-build.org/";
const REPO_URL: &str = "https://github.com/ninja-build/ninja.git";
const BUILD_DIR: &str = "build-cmake";

pub struct Ninja;

#[async_trait]
impl Tool for Ninja {
    fn name(&self) -> &'static str {
        NAME
    }

    fn homepage(&self) -> &'static str {
        HOMEPAGE
    }

    fn summary(&self) -> &'static str {
        "ninja build system, built from the git checkout with cmake"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["cmake"]
    }

    fn required_commands(&self) -> &'static [&'static str] {
        &["cmake"]
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()> {
        let repo = ctx.res.repositories.join(NAME);
        tools::sync_repository(NAME, REPO_URL, &repo, false)?;

        check_step(
            NAME,
            "configuring",
            build::cmake(
                &repo,
                &[format!("-B{}", BUILD_DIR), "-H.".to_string()],
                NAME,
            )
            .await?,
        )?;

        check_step(
            NAME,
            "compiling",
            build::cmake(
                &repo,
                &["--build".to_string(), BUILD_DIR.to_string()],
                NAME,
            )
            .await?,
        )?;

        // The build leaves a single binary in build-cmake/.
        let binary = repo.join(BUILD_DIR).join(NAME);
        let dest = ctx.res.prefix.join("bin").join(NAME);
        crate::fsutil::copy_file(&binary, &dest)?;
        crate::ui::done(&format!("Installed {} to {}", NAME, dest.display()));

        Ok(())
    }
}
