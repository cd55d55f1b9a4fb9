use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown tool '{name}'. Supported tools: {supported:?}")]
    UnknownTool {
        name: String,
        supported: Vec<&'static str>,
    },

    #[error("Required command '{0}' not found in PATH")]
    MissingCommand(String),

    #[error("{} already exists", .0.display())]
    LocationExists(PathBuf),

    #[error("{} does not exist", .0.display())]
    LocationMissing(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("{} is not a git repository", .0.display())]
    NotAGitRepo(PathBuf),

    #[error("Download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("Checksum mismatch for {}: expected {expected}, got {actual}", .path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("{step} failed for {tool}")]
    StepFailed { tool: String, step: String },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Dialog error: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("Progress template error: {0}")]
    Progress(#[from] indicatif::style::TemplateError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ToolupError>;
