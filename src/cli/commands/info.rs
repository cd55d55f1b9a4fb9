use console::style;

use crate::error::Result;
use crate::tools::{ToolInfo, ToolRegistry};

pub async fn execute(tool_name: &str, json: bool) -> Result<()> {
    let registry = ToolRegistry::with_defaults();
    let tool = registry.get(tool_name)?;
    let info = ToolInfo::of(tool.as_ref());

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!();
    match info.version {
        Some(version) => println!(
            "  {} {}",
            style(info.name).white().bold(),
            style(version).dim()
        ),
        None => println!("  {}", style(info.name).white().bold()),
    }
    println!();
    println!("  {}   {}", style("Homepage").dim(), info.homepage);
    println!("  {}    {}", style("Summary").dim(), info.summary);
    if !info.dependencies.is_empty() {
        println!(
            "  {}  {}",
            style("Depends on").dim(),
            info.dependencies.join(", ")
        );
    }
    println!();

    Ok(())
}
