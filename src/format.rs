use std::path::Path;

pub const DOCUMENT_EXTENSION: &str = "melarecipe";
pub const ARCHIVE_EXTENSION: &str = "melarecipes";

/// The two kinds of file Mela exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeFormat {
    /// `.melarecipe`: one JSON document.
    Document,
    /// `.melarecipes`: a ZIP archive of `.melarecipe` payloads.
    Archive,
}

impl RecipeFormat {
    /// Classify a path by its extension (ASCII case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION) {
            Some(RecipeFormat::Document)
        } else if ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION) {
            Some(RecipeFormat::Archive)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            RecipeFormat::Document => DOCUMENT_EXTENSION,
            RecipeFormat::Archive => ARCHIVE_EXTENSION,
        }
    }
}
