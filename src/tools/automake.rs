use async_trait::async_trait;

use crate::error::Result;
use crate::tools::{self, ArchiveSource, InstallContext, Tool};

const NAME: &str = "automake";
const VERSION: &str = "1.16.3";
const HOMEPAGE: &str = "https://www.gnu.org/software/automake/";
const ARCHIVE: ArchiveSource = ArchiveSource {
    url: "https://ftp.gnu.org/gnu/automake/automake-1.16.3.tar.gz",
    archive_file: "automake.tar.gz",
    top_dir: "automake-1.16.3",
    sha256: None,
};

pub struct Automake;

#[async_trait]
impl Tool for Automake {
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
        "GNU Makefile generator, built from the release tarball"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["autoconf"]
    }

    fn required_commands(&self) -> &'static [&'static str] {
        &["make"]
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()> {
        let package = tools::stage_archive(ctx, NAME, &ARCHIVE).await?;

        tools::autotools_build(ctx, NAME, &package, &[ctx.prefix_flag()]).await
    }
}
