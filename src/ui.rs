//! Console output helpers.
//!
//! All user-facing output goes through this module so the glyph and color
//! grammar stays consistent: `✓` for completed work, `◐` for work in
//! progress, `✕` for failures, `!` for warnings.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;

pub fn done(msg: &str) {
    println!("  {} {}", style("✓").green().bold(), msg);
}

pub fn fail(msg: &str) {
    println!("  {} {}", style("✕").red().bold(), style(msg).red());
}

pub fn note(msg: &str) {
    println!("  {} {}", style("!").yellow().bold(), msg);
}

pub fn detail(msg: &str) {
    println!("    {}", style(msg).dim());
}

/// A transient spinner shown while a build step runs.
pub fn step_spinner(label: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(label.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// A byte-progress bar for archive downloads. Length is set once the
/// Content-Length header is known; until then it renders as a spinner.
pub fn download_bar(label: &str) -> Result<ProgressBar> {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template(
        "  {spinner:.cyan} {msg:<40} {bytes}/{total_bytes} [{wide_bar:.cyan/blue}]",
    )?);
    bar.set_message(label.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}

/// An object-progress bar for git clone transfers.
pub fn transfer_bar(label: &str) -> Result<ProgressBar> {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template(
        "  {spinner:.cyan} {msg:<40} {pos}/{len} objects [{wide_bar:.cyan/blue}]",
    )?);
    bar.set_message(label.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}

fn rule(title: &str) -> String {
    const WIDTH: usize = 60;
    let used = title.chars().count() + 4;
    let tail = WIDTH.saturating_sub(used);
    format!("── {} {}", title, "─".repeat(tail))
}

/// Print the captured outputs of a failed subprocess step.
pub fn print_step_output(title: &str, stdout: &str, stderr: &str) {
    println!();
    println!("  {}", style(title).red().bold());
    println!("  {}", style(rule("stdout")).dim());
    for line in stdout.lines() {
        println!("  {}", line);
    }
    println!("  {}", style(rule("stderr")).dim());
    for line in stderr.lines() {
        println!("  {}", line);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_width() {
        let line = rule("stdout");
        assert!(line.starts_with("── stdout "));
        assert_eq!(line.chars().count(), 60);
    }

    #[test]
    fn test_rule_long_title_does_not_panic() {
        let title = "x".repeat(100);
        let line = rule(&title);
        assert!(line.contains(&title));
    }

    #[test]
    fn test_bars_build() {
        assert!(download_bar("Downloading archive").is_ok());
        assert!(transfer_bar("Cloning repository").is_ok());
        let spinner = step_spinner("Configuring");
        spinner.finish_and_clear();
    }
}
