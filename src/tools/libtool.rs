use async_trait::async_trait;

use crate::error::Result;
use crate::tools::{self, ArchiveSource, InstallContext, Tool};

const NAME: &str = "libtool";
const VERSION: &str = "2.4.6";
const HOMEPAGE: &str = "https://www.gnu.org/software/libtool/";
const ARCHIVE: ArchiveSource = ArchiveSource {
    url: "https://ftpmirror.gnu.org/libtool/libtool-2.4.6.tar.gz",
    archive_file: "libtool.tar.gz",
    top_dir: "libtool-2.4.6",
    sha256: None,
};

pub struct Libtool;

#[async_trait]
impl Tool for Libtool {
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
        "GNU shared-library build helper, built from the release tarball"
    }

    fn required_commands(&self) -> &'static [&'static str] {
        &["make"]
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()> {
        let package = tools::stage_archive(ctx, NAME, &ARCHIVE).await?;

        tools::autotools_build(ctx, NAME, &package, &[ctx.prefix_flag()]).await
    }
}
