use async_trait::async_trait;

use crate::error::Result;
use crate::tools::{self, ArchiveSource, InstallContext, Tool};
use crate::{fsutil, ui};

const NAME: &str = "node";
const VERSION: &str = "14.15.3";
const HOMEPAGE: &str = "https://nodejs.org/en/";
const ARCHIVE: ArchiveSource = ArchiveSource {
    url: "https://nodejs.org/dist/v14.15.3/node-v14.15.3-linux-x64.tar.xz",
    archive_file: "node.tar.xz",
    top_dir: "node-v14.15.3-linux-x64",
    sha256: None,
};

pub struct Node;

#[async_trait]
impl Tool for Node {
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
        "Node.js runtime, relocated from the prebuilt linux-x64 distribution"
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()> {
        // No build here: the prebuilt tree already mirrors the prefix layout
        // (bin/, lib/, share/), it just needs to be merged in.
        let staged = tools::stage_download(ctx, NAME, &ARCHIVE).await?;

        fsutil::merge_move(&staged, &ctx.res.prefix)?;
        ui::done(&format!("Relocated {} into {}", NAME, ctx.res.prefix.display()));

        Ok(())
    }
}
