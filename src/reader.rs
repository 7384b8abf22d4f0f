use std::fs;
use std::path::Path;

use tracing::debug;

use crate::decode;
use crate::error::{Error, Result};
use crate::format::RecipeFormat;
use crate::recipe::{Recipe, RecipeFile};
use crate::zip_scan::{self, ArchiveDecode, EntryErrorPolicy, SkippedEntry};

fn unsupported(path: &Path) -> Error {
    Error::UnsupportedFormat {
        path: path.to_path_buf(),
    }
}

fn classify(path: &Path) -> Result<RecipeFormat> {
    match RecipeFormat::from_path(path) {
        Some(format) => Ok(format),
        None => Err(unsupported(path)),
    }
}

fn expect_format(path: &Path, expected: RecipeFormat) -> Result<()> {
    if classify(path)? != expected {
        return Err(unsupported(path));
    }
    Ok(())
}

fn read_document(path: &Path) -> Result<Recipe> {
    let text = fs::read_to_string(path)?;
    Ok(decode::decode_recipe(&text)?)
}

fn read_archive(path: &Path, policy: EntryErrorPolicy) -> Result<ArchiveDecode> {
    let data = fs::read(path)?;
    zip_scan::decode_archive_with(&data, policy)
}

/// Read a `.melarecipe` or `.melarecipes` file.
///
/// The extension decides the format; anything else fails with
/// [`Error::UnsupportedFormat`] before the file is opened.
pub fn read_from_file(path: &Path) -> Result<RecipeFile> {
    let (file, _) = read_from_file_with(path, EntryErrorPolicy::Abort)?;
    Ok(file)
}

/// Like [`read_from_file`], also returning entries skipped under
/// [`EntryErrorPolicy::Skip`] (always empty for a single document).
pub fn read_from_file_with(
    path: &Path,
    policy: EntryErrorPolicy,
) -> Result<(RecipeFile, Vec<SkippedEntry>)> {
    let (file, skipped) = match classify(path)? {
        RecipeFormat::Document => {
            let recipe = read_document(path)?;
            (RecipeFile::Single(recipe), Vec::new())
        }
        RecipeFormat::Archive => {
            let decoded = read_archive(path, policy)?;
            (RecipeFile::Collection(decoded.recipes), decoded.skipped)
        }
    };
    debug!(path = %path.display(), recipes = file.len(), "read recipe file");
    Ok((file, skipped))
}

/// Read a `.melarecipe` file.
pub fn read_recipe_file(path: &Path) -> Result<Recipe> {
    expect_format(path, RecipeFormat::Document)?;
    read_document(path)
}

/// Read a `.melarecipes` file, aborting on the first bad entry.
pub fn read_archive_file(path: &Path) -> Result<Vec<Recipe>> {
    expect_format(path, RecipeFormat::Archive)?;
    let decoded = read_archive(path, EntryErrorPolicy::Abort)?;
    Ok(decoded.recipes)
}
