//! Git operations for repository-based tools.
//!
//! Clones and updates go through libgit2 with `auth-git2` supplying
//! credentials, so no `git` binary is required on the host.

use std::path::Path;
use std::time::{Duration, Instant};

use auth_git2::GitAuthenticator;
use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{FetchOptions, RemoteCallbacks, Repository, ResetType};

use crate::error::{Result, ToolupError};
use crate::ui;

fn remote_callbacks<'a>(
    authenticator: &'a GitAuthenticator,
    config: &'a git2::Config,
) -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(authenticator.credentials(config));
    callbacks
}

/// Clone a repository. Errors with [`ToolupError::LocationExists`] when the
/// target path is already present; callers treat that as "skip and update".
pub fn clone_repository(url: &str, dest: &Path, label: &str) -> Result<()> {
    if dest.exists() {
        return Err(ToolupError::LocationExists(dest.to_path_buf()));
    }

    tracing::info!("cloning {} into {}", url, dest.display());

    let bar = ui::transfer_bar(&format!("Cloning {} repository", label))?;
    let authenticator = GitAuthenticator::default();
    let config = git2::Config::open_default()?;

    let mut callbacks = remote_callbacks(&authenticator, &config);
    let progress = bar.clone();
    let mut throttle = Instant::now();
    callbacks.transfer_progress(move |stats| {
        if throttle.elapsed() > Duration::from_millis(10) {
            throttle = Instant::now();
            progress.set_length(stats.total_objects() as u64);
            progress.set_position(stats.received_objects() as u64);
        }
        true
    });

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    let result = RepoBuilder::new()
        .fetch_options(fetch_options)
        .clone(url, dest);

    bar.finish_and_clear();
    result?;

    ui::done(&format!("Cloned {} repository", label));
    Ok(())
}

/// Fetch origin and fast-forward the current branch, the equivalent of a
/// plain `git pull` on a clean checkout. Diverged local history is an error
/// rather than a merge.
pub fn update_repository(repo_path: &Path, label: &str) -> Result<()> {
    if !repo_path.exists() {
        return Err(ToolupError::LocationMissing(repo_path.to_path_buf()));
    }

    let repo = Repository::open(repo_path)
        .map_err(|_| ToolupError::NotAGitRepo(repo_path.to_path_buf()))?;

    let spinner = ui::step_spinner(&format!("Updating {} repository", label));

    let authenticator = GitAuthenticator::default();
    let config = git2::Config::open_default()?;
    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(remote_callbacks(&authenticator, &config));

    let fetch_result = (|| -> Result<bool> {
        let mut remote = repo.find_remote("origin")?;
        remote.fetch(&[] as &[&str], Some(&mut fetch_options), None)?;

        let head = repo.head()?;
        let branch = head
            .shorthand()
            .ok_or_else(|| anyhow::anyhow!("HEAD is not a named branch"))?
            .to_string();
        let refname = format!("refs/heads/{}", branch);

        let remote_ref = repo.find_reference(&format!("refs/remotes/origin/{}", branch))?;
        let fetch_commit = repo.reference_to_annotated_commit(&remote_ref)?;

        let (analysis, _) = repo.merge_analysis(&[&fetch_commit])?;
        if analysis.is_up_to_date() {
            return Ok(false);
        }

        if !analysis.is_fast_forward() {
            return Err(ToolupError::Other(anyhow::anyhow!(
                "cannot fast-forward {}: local history has diverged from origin",
                repo_path.display()
            )));
        }

        let mut reference = repo.find_reference(&refname)?;
        reference.set_target(fetch_commit.id(), "fast-forward")?;
        repo.set_head(&refname)?;
        repo.checkout_head(Some(CheckoutBuilder::default().force()))?;
        Ok(true)
    })();

    spinner.finish_and_clear();

    match fetch_result? {
        true => ui::done(&format!("Updated {} repository", label)),
        false => ui::done(&format!("{} repository already up to date", label)),
    }
    Ok(())
}

/// Hard-reset the working tree to HEAD, throwing away local edits left over
/// from previous builds (`configure` likes to touch tracked files).
pub fn discard_local_changes(repo_path: &Path, label: &str) -> Result<()> {
    if !repo_path.exists() {
        return Err(ToolupError::LocationMissing(repo_path.to_path_buf()));
    }

    let repo = Repository::open(repo_path)
        .map_err(|_| ToolupError::NotAGitRepo(repo_path.to_path_buf()))?;

    let spinner = ui::step_spinner(&format!("Discarding {} local changes", label));
    let result = (|| -> Result<()> {
        let head = repo.head()?.peel_to_commit()?;
        repo.reset(head.as_object(), ResetType::Hard, None)?;
        Ok(())
    })();
    spinner.finish_and_clear();
    result?;

    ui::done(&format!("Discarded {} local changes", label));
    Ok(())
}
