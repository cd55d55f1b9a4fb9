//! Subprocess wrappers around the build toolchain.
//!
//! Each wrapper runs one step (`./configure`, `make`, `cmake`, ...) inside a
//! source directory, shows a transient spinner while it runs, and hands the
//! captured output back to the caller for inspection. Nothing here decides
//! what a failure means; installers do.

use std::ffi::OsStr;
use std::path::Path;

use crate::error::{Result, ToolupError};
use crate::ui;

/// Captured result of one build step.
#[derive(Debug)]
pub struct StepOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

async fn run_step(
    dir: &Path,
    program: impl AsRef<OsStr>,
    args: &[String],
    label: &str,
) -> Result<StepOutput> {
    if !dir.exists() {
        return Err(ToolupError::LocationMissing(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ToolupError::NotADirectory(dir.to_path_buf()));
    }

    tracing::debug!(
        "running {:?} {:?} in {}",
        program.as_ref(),
        args,
        dir.display()
    );

    let spinner = ui::step_spinner(label);
    let output = tokio::process::Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .await;
    spinner.finish_and_clear();

    let output = output?;
    let step = StepOutput {
        success: output.status.success(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    };

    if step.success {
        ui::done(label);
    }

    Ok(step)
}

/// Run `./configure` in the source directory.
pub async fn configure(dir: &Path, args: &[String], name: &str) -> Result<StepOutput> {
    run_step(
        dir,
        dir.join("configure"),
        args,
        &format!("Configuring {}", name),
    )
    .await
}

/// Run `./Configure` - the capital-C perl variant openssl ships.
pub async fn configure_perl(dir: &Path, args: &[String], name: &str) -> Result<StepOutput> {
    run_step(
        dir,
        dir.join("Configure"),
        args,
        &format!("Configuring {}", name),
    )
    .await
}

/// Run `./bootstrap` in the source directory (cmake's configure stage).
pub async fn bootstrap(dir: &Path, args: &[String], name: &str) -> Result<StepOutput> {
    run_step(
        dir,
        dir.join("bootstrap"),
        args,
        &format!("Bootstrapping {}", name),
    )
    .await
}

/// Run `autoreconf` in the source directory.
pub async fn autoreconf(dir: &Path, args: &[String], name: &str) -> Result<StepOutput> {
    run_step(dir, "autoreconf", args, &format!("Reconfiguring {}", name)).await
}

/// Run `cmake` in the source directory.
pub async fn cmake(dir: &Path, args: &[String], name: &str) -> Result<StepOutput> {
    run_step(dir, "cmake", args, &format!("Running cmake for {}", name)).await
}

/// Run `make` with the configured parallelism.
pub async fn make(dir: &Path, args: &[String], jobs: usize, name: &str) -> Result<StepOutput> {
    run_step(
        dir,
        "make",
        &make_args(jobs, args, false),
        &format!("Compiling {}", name),
    )
    .await
}

/// Run `make install`.
pub async fn make_install(dir: &Path, args: &[String], name: &str) -> Result<StepOutput> {
    run_step(
        dir,
        "make",
        &make_args(0, args, true),
        &format!("Installing {}", name),
    )
    .await
}

fn make_args(jobs: usize, args: &[String], install: bool) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len() + 2);
    if install {
        out.push("install".to_string());
    }
    if jobs > 0 {
        out.push(format!("-j{}", jobs));
    }
    out.extend(args.iter().cloned());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_step_captures_output() {
        let temp = tempfile::tempdir().unwrap();
        let out = run_step(
            temp.path(),
            "sh",
            &["-c".to_string(), "echo out; echo err 1>&2".to_string()],
            "Running test step",
        )
        .await
        .unwrap();

        assert!(out.success);
        assert_eq!(out.code, Some(0));
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
    }

    #[tokio::test]
    async fn test_run_step_reports_failure() {
        let temp = tempfile::tempdir().unwrap();
        let out = run_step(
            temp.path(),
            "sh",
            &["-c".to_string(), "echo broken 1>&2; exit 3".to_string()],
            "Running test step",
        )
        .await
        .unwrap();

        assert!(!out.success);
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stderr, "broken\n");
    }

    #[tokio::test]
    async fn test_run_step_runs_in_directory() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("marker"), "x").unwrap();

        let out = run_step(
            temp.path(),
            "sh",
            &["-c".to_string(), "ls".to_string()],
            "Listing",
        )
        .await
        .unwrap();

        assert!(out.stdout.contains("marker"));
    }

    #[tokio::test]
    async fn test_run_step_missing_dir() {
        let temp = tempfile::tempdir().unwrap();
        let result = run_step(&temp.path().join("ghost"), "sh", &[], "Running").await;
        assert!(matches!(result, Err(ToolupError::LocationMissing(_))));
    }

    #[tokio::test]
    async fn test_run_step_not_a_directory() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("file");
        std::fs::write(&file, "x").unwrap();

        let result = run_step(&file, "sh", &[], "Running").await;
        assert!(matches!(result, Err(ToolupError::NotADirectory(_))));
    }

    #[test]
    fn test_make_args_parallelism() {
        let args = make_args(4, &["CC=gcc".to_string()], false);
        assert_eq!(args, vec!["-j4".to_string(), "CC=gcc".to_string()]);
    }

    #[test]
    fn test_make_args_install() {
        let args = make_args(0, &[], true);
        assert_eq!(args, vec!["install".to_string()]);
    }
}
