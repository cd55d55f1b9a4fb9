use console::style;

use crate::config::AppConfig;
use crate::error::{Result, ToolupError};

pub async fn show() -> Result<()> {
    let config = AppConfig::load()?;
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| ToolupError::Config(format!("Failed to serialize config: {}", e)))?;

    let path = AppConfig::config_path()?;
    if path.exists() {
        println!("{}", style(format!("# {}", path.display())).dim());
    } else {
        println!(
            "{}",
            style("# defaults (no config file yet, run `toolup init`)").dim()
        );
    }
    print!("{}", yaml);

    Ok(())
}

pub async fn set(key: String, value: String) -> Result<()> {
    let mut config = AppConfig::load()?;
    config.set_value(&key, &value)?;
    config.save()?;

    println!(
        "{} {} = {}",
        style("✓").green().bold(),
        style(&key).cyan(),
        value
    );

    Ok(())
}

pub async fn edit() -> Result<()> {
    let path = AppConfig::config_path()?;

    if !path.exists() {
        // Seed the file so the editor has something to open.
        AppConfig::default().save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = tokio::process::Command::new(&editor)
        .arg(&path)
        .status()
        .await?;

    if !status.success() {
        return Err(ToolupError::Config(format!(
            "Editor '{}' exited with {}",
            editor, status
        )));
    }

    // Re-parse and validate what the editor left behind.
    AppConfig::load()?.validate()?;
    println!("{} Configuration OK", style("✓").green().bold());

    Ok(())
}
