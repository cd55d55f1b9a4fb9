use async_trait::async_trait;

use crate::error::Result;
use crate::tools::{self, ArchiveSource, InstallContext, Tool};

const NAME: &str = "ncurses";
const VERSION: &str = "6.2";
const HOMEPAGE: &str = "https://invisible-island.net/ncurses/";
const ARCHIVE: ArchiveSource = ArchiveSource {
    url: "https://invisible-island.net/datafiles/release/ncurses.tar.gz",
    archive_file: "ncurses.tar.gz",
    top_dir: "ncurses-6.2",
    sha256: None,
};

pub struct Ncurses;

#[async_trait]
impl Tool for Ncurses {
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
        "terminal control library, built twice for the narrow and wide-char flavors"
    }

    fn required_commands(&self) -> &'static [&'static str] {
        &["make"]
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()> {
        let package = tools::stage_archive(ctx, NAME, &ARCHIVE).await?;

        // First pass: the narrow-char libraries.
        tools::autotools_build(
            ctx,
            NAME,
            &package,
            &[ctx.prefix_flag(), "--with-shared".to_string()],
        )
        .await?;

        // Second pass from the same tree: the wide-char flavor most modern
        // terminal software links against.
        let wide_name = format!("{}w", NAME);
        tools::autotools_build(
            ctx,
            &wide_name,
            &package,
            &[
                ctx.prefix_flag(),
                "--enable-widec".to_string(),
                "--with-shared".to_string(),
            ],
        )
        .await
    }
}
