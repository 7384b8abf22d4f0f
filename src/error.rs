use std::path::PathBuf;

use thiserror::Error;

use crate::format::RecipeFormat;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to turn one Mela document into a [`Recipe`](crate::Recipe).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid recipe JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("recipe has no date")]
    MissingDate,

    #[error("recipe date is not a valid time interval: {0}")]
    InvalidDate(serde_json::Value),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "file must be format '.{}' or '.{}': {}",
        RecipeFormat::Archive.extension(),
        RecipeFormat::Document.extension(),
        path.display()
    )]
    UnsupportedFormat { path: PathBuf },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("archive entry #{index} ({name}): {source}")]
    Entry {
        index: usize,
        name: String,
        #[source]
        source: ParseError,
    },

    #[error("invalid recipe archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}
