use console::style;

use crate::error::Result;
use crate::tools::ToolRegistry;

pub async fn execute() -> Result<()> {
    let registry = ToolRegistry::with_defaults();

    println!();
    for tool in registry.iter() {
        let version = tool.version().unwrap_or("git");
        println!(
            "  {} {} {}",
            style(format!("{:<10}", tool.name())).cyan(),
            style(format!("{:<8}", version)).dim(),
            tool.summary()
        );
    }
    println!();
    println!(
        "  Run {} to install one.",
        style("toolup install <tool>").cyan()
    );

    Ok(())
}
