use async_trait::async_trait;

use crate::error::Result;
use crate::shell;
use crate::tools::{InstallContext, Tool};
use crate::{fsutil, ui};

const NAME: &str = "bash";
const HOMEPAGE: &str = "https://www.gnu.org/software/bash/";
const BASHRC: &str = "bash/bashrc";

pub struct Bash;

#[async_trait]
impl Tool for Bash {
    fn name(&self) -> &'static str {
        NAME
    }

    fn homepage(&self) -> &'static str {
        HOMEPAGE
    }

    fn summary(&self) -> &'static str {
        "no build; installs the bashrc file and the managed source block"
    }

    async fn install(&self, ctx: &InstallContext) -> Result<()> {
        let source = ctx.res.config_source(BASHRC);
        if source.exists() {
            fsutil::copy_file(&source, &ctx.res.shell_rc)?;
            ui::done(&format!(
                "Installed bashrc from {} to {}",
                source.display(),
                ctx.res.shell_rc.display()
            ));
        } else {
            ui::note(&format!(
                "{} config {} not found, keeping the existing rc file",
                NAME,
                source.display()
            ));
        }

        shell::write_env_snippet(&ctx.res)?;
        if shell::wire_shell_rc(&ctx.res)? {
            ui::done(&format!(
                "Wired managed block into {}",
                ctx.res.shell_rc.display()
            ));
        }

        Ok(())
    }
}
