//! Fetching sources: HTTP archive downloads and git repositories.

pub mod extract;
pub mod git;
pub mod http;
