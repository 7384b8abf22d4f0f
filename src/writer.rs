use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::recipe::{Recipe, RecipeFile};

/// File stem used when writing a collection of recipes.
pub const COLLECTION_FILE_STEM: &str = "Recipes";

/// File stem used when a recipe has neither a usable title nor id.
pub const FALLBACK_FILE_STEM: &str = "Recipe";

/// Longest sanitized stem, in bytes. Leaves room for `.json` under the
/// usual 255-byte file name limit.
pub const MAX_STEM_BYTES: usize = 200;

static UNSAFE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f\x7f]"#).unwrap());

/// What gets written: one recipe, or a collection.
#[derive(Debug, Clone, Copy)]
pub enum Snapshot<'a> {
    One(&'a Recipe),
    Many(&'a [Recipe]),
}

impl<'a> From<&'a Recipe> for Snapshot<'a> {
    fn from(recipe: &'a Recipe) -> Self {
        Snapshot::One(recipe)
    }
}

impl<'a> From<&'a [Recipe]> for Snapshot<'a> {
    fn from(recipes: &'a [Recipe]) -> Self {
        Snapshot::Many(recipes)
    }
}

impl<'a> From<&'a Vec<Recipe>> for Snapshot<'a> {
    fn from(recipes: &'a Vec<Recipe>) -> Self {
        Snapshot::Many(recipes)
    }
}

impl<'a> From<&'a RecipeFile> for Snapshot<'a> {
    fn from(file: &'a RecipeFile) -> Self {
        match file {
            RecipeFile::Single(recipe) => Snapshot::One(recipe),
            RecipeFile::Collection(recipes) => Snapshot::Many(recipes),
        }
    }
}

/// Output settings for [`write_to_dir_with`].
#[derive(Debug, Clone, Copy)]
pub struct WriteSettings {
    pub indent: usize,
    pub sanitize_file_names: bool,
}

impl Default for WriteSettings {
    fn default() -> Self {
        Self {
            indent: 4,
            sanitize_file_names: true,
        }
    }
}

/// Make a free-text title usable as a single path component.
///
/// Normalizes to NFC, replaces separators, reserved and control characters
/// with `_`, cuts the result to [`MAX_STEM_BYTES`] on a character boundary,
/// and trims surrounding whitespace and dots. May return an empty string.
pub fn sanitize_file_stem(name: &str) -> String {
    let normalized: String = name.nfc().collect();
    let replaced = UNSAFE_CHARS_RE.replace_all(&normalized, "_");
    shorten(&replaced, MAX_STEM_BYTES)
        .trim_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string()
}

fn shorten(name: &str, max_len: usize) -> &str {
    if name.len() <= max_len {
        return name;
    }
    let mut end = max_len;
    while end > 0 && !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Pick the output file stem: `Recipes` for a collection, otherwise the title.
///
/// A single recipe without a usable title falls back to its id, then to
/// `Recipe`.
pub fn file_stem(snapshot: Snapshot<'_>, sanitize: bool) -> String {
    let recipe = match snapshot {
        Snapshot::Many(_) => return COLLECTION_FILE_STEM.to_string(),
        Snapshot::One(recipe) => recipe,
    };

    let candidates = [recipe.title.as_deref(), Some(recipe.id.as_str())];
    for candidate in candidates.into_iter().flatten() {
        let stem = if sanitize {
            sanitize_file_stem(candidate)
        } else {
            candidate.to_string()
        };
        if !stem.is_empty() {
            return stem;
        }
    }

    FALLBACK_FILE_STEM.to_string()
}

/// Serialize to pretty JSON with the given indent width.
pub fn to_pretty_json(snapshot: Snapshot<'_>, indent: usize) -> Result<Vec<u8>> {
    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = Serializer::with_formatter(&mut out, formatter);
    let result = match snapshot {
        Snapshot::One(recipe) => recipe.serialize(&mut ser),
        Snapshot::Many(recipes) => recipes.serialize(&mut ser),
    };
    result.map_err(Error::Serialize)?;
    Ok(out)
}

/// Write a recipe or a collection to `<dir>/<name>.json`, overwriting any
/// existing file. The directory must already exist.
pub fn write_to_dir<'a>(dir: &Path, recipes: impl Into<Snapshot<'a>>) -> Result<PathBuf> {
    write_to_dir_with(dir, recipes, WriteSettings::default())
}

pub fn write_to_dir_with<'a>(
    dir: &Path,
    recipes: impl Into<Snapshot<'a>>,
    settings: WriteSettings,
) -> Result<PathBuf> {
    let snapshot = recipes.into();
    let json = to_pretty_json(snapshot, settings.indent)?;
    let stem = file_stem(snapshot, settings.sanitize_file_names);
    let dest = dir.join(format!("{}.json", stem));

    fs::write(&dest, json)?;
    debug!(path = %dest.display(), "wrote recipes");

    Ok(dest)
}
