use async_trait::async_trait;

use crate::error::Result;
use crate::tools::{self, ArchiveSource, InstallContext, Tool};
use crate::{fsutil, ui};

const NAME: &str = "llvm";
const VERSION: &str = "11.0.0";
const HOMEPAGE: &str = "https://llvm.org/";
const ARCHIVE: ArchiveSource = ArchiveSource {
    url: "https://github.com/llvm/llvm-project/releases/download/llvmorg-11.0.0/clang+llvm-11.0.0-x86_64-linux-gnu-ubuntu-20.04.tar.xz",
    archive_file: "llvm.tar.xz",
    top_dir: "clang+llvm-11.0.0-x86_64-linux-gnu-ubuntu-20.04",
    sha256: None,
};

pub struct Llvm;

#[async_trait]
impl Tool for Llvm {
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
        "clang+llvm toolchain, relocated from the prebuilt release archive"
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()> {
        let staged = tools::stage_download(ctx, NAME, &ARCHIVE).await?;

        fsutil::merge_move(&staged, &ctx.res.prefix)?;
        ui::done(&format!("Relocated {} into {}", NAME, ctx.res.prefix.display()));

        Ok(())
    }
}
