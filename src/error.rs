use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config.cfg not found in {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("config file is not correctly filled: {0}")]
    ConfigMalformed(String),

    #[error("could not determine the current user's home directory")]
    NoHomeDir,

    #[error("no valid YouTube URLs in the input file")]
    NoValidUrls,

    #[error("required program not found: {0}")]
    MissingDependency(String),

    #[error("failed to read metadata for {url}: {reason}")]
    Metadata { url: String, reason: String },

    #[error("download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
