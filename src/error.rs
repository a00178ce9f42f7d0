use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub search API error: {0}")]
    SearchApi(String),

    #[error("GitHub login failed for user {0}")]
    LoginFailed(String),

    #[error("Code search crawl error: {0}")]
    Crawl(String),

    #[error("There are no files to analyze: {0} does not exist")]
    MissingAnalysisFolder(PathBuf),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors that abort only the current query group, not the whole run.
    pub fn is_group_local(&self) -> bool {
        matches!(self, Error::LoginFailed(_) | Error::MissingAnalysisFolder(_))
    }
}
