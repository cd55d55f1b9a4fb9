use async_trait::async_trait;

use crate::build;
use crate::error::Result;
use crate::tools::{self, check_step, ArchiveSource, InstallContext, Tool};

const NAME: &str = "cmake";
const VERSION: &str = "3.19.2";
const HOMEPAGE: &str = "https://cmake.org/";
const ARCHIVE: ArchiveSource = ArchiveSource {
    url: "https://github.com/Kitware/CMake/releases/download/v3.19.2/cmake-3.19.2.tar.gz",
    archive_file: "cmake.tar.gz",
    top_dir: "cmake-3.19.2",
    sha256: None,
};

pub struct Cmake;

#[async_trait]
impl Tool for Cmake {
    fn name(&self) -> &'static str {
        NAME
    }

    fn version(&self) -> Option<&'static str> {
        Some(VERSION)
    }

    fn homepage(&self) -> &'static str {
        HOMEPAGE
    }

    fn summary(&self) -> &'static str {
        "cross-platform build generator, bootstrapped from the source tarball"
    }

    fn required_commands(&self) -> &'static [&'static str] {
        &["make"]
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()> {
        let package = tools::stage_archive(ctx, NAME, &ARCHIVE).await?;

        check_step(
            NAME,
            "bootstrapping",
            build::bootstrap(
                &package,
                &[
                    ctx.prefix_flag(),
                    "--".to_string(),
                    "-DCMAKE_BUILD_TYPE:STRING=Release".to_string(),
                ],
                NAME,
            )
            .await?,
        )?;

        check_step(
            NAME,
            "compiling",
            build::make(&package, &[], ctx.config.make_jobs(), NAME).await?,
        )?;

        check_step(
            NAME,
            "installing",
            build::make_install(&package, &[], NAME).await?,
        )?;

        Ok(())
    }
}
