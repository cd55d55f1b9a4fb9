use async_trait::async_trait;

use crate::error::Result;
use crate::tools::{self, ArchiveSource, InstallContext, Tool};

const NAME: &str = "autoconf";
const VERSION: &str = "2.70";
const HOMEPAGE: &str = "https://www.gnu.org/software/autoconf/";
const ARCHIVE: ArchiveSource = ArchiveSource {
    url: "https://ftp.gnu.org/gnu/autoconf/autoconf-2.70.tar.gz",
    archive_file: "autoconf.tar.gz",
    top_dir: "autoconf-2.70",
    sha256: None,
};

pub struct Autoconf;

#[async_trait]
impl Tool for Autoconf {
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
        "GNU configure-script generator, built from the release tarball"
    }

    fn required_commands(&self) -> &'static [&'static str] {
        &["make"]
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()> {
        let package = tools::stage_archive(ctx, NAME, &ARCHIVE).await?;

        tools::autotools_build(ctx, NAME, &package, &[ctx.prefix_flag()]).await
    }
}
