use console::style;
use dialoguer::{Confirm, Input};

use crate::config::AppConfig;
use crate::error::Result;
use crate::paths::Resources;
use crate::shell;

pub async fn execute() -> Result<()> {
    println!("{}", style("Welcome to toolup!").bold().cyan());
    println!("Let's configure where your tools get built and installed.\n");

    let defaults = AppConfig::default();

    let prefix: String = Input::new()
        .with_prompt("Install prefix")
        .default(defaults.prefix.clone())
        .interact_text()?;

    let repositories_dir: String = Input::new()
        .with_prompt("Git repositories directory")
        .default(defaults.repositories_dir.clone())
        .interact_text()?;

    let packages_dir: String = Input::new()
        .with_prompt("Package sources directory")
        .default(defaults.packages_dir.clone())
        .interact_text()?;

    let configs_dir: String = Input::new()
        .with_prompt("Config files checkout (your dotfiles configs)")
        .default(defaults.configs_dir.clone())
        .interact_text()?;

    let jobs: usize = Input::new()
        .with_prompt("Parallel make jobs (0 = one per CPU)")
        .default(defaults.jobs)
        .interact_text()?;

    let config = AppConfig {
        prefix,
        repositories_dir,
        packages_dir,
        configs_dir,
        jobs,
        ..defaults
    };
    config.validate()?;
    config.save()?;

    let res = Resources::from_config(&config)?;
    res.ensure_dirs()?;

    println!();
    println!("{}", style("✓ Configuration saved!").green().bold());
    println!(
        "Config file: {}",
        style(AppConfig::config_path()?.display()).dim()
    );

    let wire = Confirm::new()
        .with_prompt(format!(
            "Add the managed source block to {}?",
            res.shell_rc.display()
        ))
        .default(true)
        .interact()?;

    if wire {
        let snippet = shell::write_env_snippet(&res)?;
        shell::wire_shell_rc(&res)?;
        println!(
            "{} Shell wired: {} sources {}",
            style("✓").green().bold(),
            style(res.shell_rc.display()).cyan(),
            style(snippet.display()).dim()
        );
    }

    println!(
        "\nRun {} to see what you can build.",
        style("toolup list").cyan()
    );

    Ok(())
}
