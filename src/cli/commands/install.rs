use std::sync::Arc;
use std::time::Instant;

use console::style;

use crate::config::AppConfig;
use crate::error::{Result, ToolupError};
use crate::tools::{InstallContext, Tool, ToolRegistry};
use crate::utils::format_duration;

pub async fn execute(config: &AppConfig, tool_name: &str, with_dependencies: bool) -> Result<()> {
    config.validate()?;

    let registry = ToolRegistry::with_defaults();
    let tool = registry.get(tool_name)?;

    let ctx = InstallContext::new(config.clone())?;
    ctx.res.ensure_dirs()?;

    // Flat dependency chain: the declared installers run first, in order.
    // Nothing transitive happens here.
    let mut queue: Vec<Arc<dyn Tool>> = Vec::new();
    if with_dependencies {
        for dep in tool.dependencies() {
            queue.push(registry.get(dep)?);
        }
    }
    queue.push(tool);

    for tool in &queue {
        preflight(tool.as_ref())?;
    }

    if queue.len() > 1 {
        let order: Vec<&str> = queue.iter().map(|t| t.name()).collect();
        crate::ui::detail(&format!("install order: {}", order.join(", ")));
    }

    for tool in queue {
        println!();
        println!(
            "{} Installing {}",
            style("◐").cyan().bold(),
            style(tool.name()).white().bold()
        );

        let started = Instant::now();
        if let Err(e) = tool.install(&ctx).await {
            crate::ui::fail(&format!("{} install failed", tool.name()));
            return Err(e);
        }

        println!(
            "{} {} installed in {}",
            style("✓").green().bold(),
            style(tool.name()).cyan(),
            style(format_duration(started.elapsed().as_secs())).dim()
        );
    }

    Ok(())
}

/// Verify every external command a build shells out to before starting it.
fn preflight(tool: &dyn Tool) -> Result<()> {
    for command in tool.required_commands() {
        if which::which(command).is_err() {
            return Err(ToolupError::MissingCommand(command.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeTool {
        commands: &'static [&'static str],
    }

    #[async_trait::async_trait]
    impl Tool for FakeTool {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn homepage(&self) -> &'static str {
            "https://example.com"
        }

        fn summary(&self) -> &'static str {
            "test double"
        }

        fn required_commands(&self) -> &'static [&'static str] {
            self.commands
        }

        async fn install(&self, _ctx: &InstallContext) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_preflight_passes_for_common_command() {
        let tool = FakeTool { commands: &["sh"] };
        preflight(&tool).unwrap();
    }

    #[test]
    fn test_preflight_fails_for_missing_command() {
        let tool = FakeTool {
            commands: &["definitely-not-a-real-binary-9000"],
        };
        let result = preflight(&tool);
        assert!(matches!(result, Err(ToolupError::MissingCommand(_))));
    }
}
