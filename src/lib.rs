pub mod date;
pub mod decode;
pub mod error;
pub mod format;
pub mod reader;
pub mod recipe;
pub mod writer;
pub mod zip_scan;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use error::{Error, ParseError, Result};
pub use format::RecipeFormat;
pub use reader::{read_archive_file, read_from_file, read_recipe_file};
pub use recipe::{Recipe, RecipeFile};
pub use writer::{write_to_dir, Snapshot};
pub use zip_scan::{ArchiveDecode, EntryErrorPolicy, SkippedEntry};

fn default_indent() -> usize {
    4
}

fn default_sanitize() -> bool {
    true
}

/// Conversion settings. Every field has a default, so a partial JSON object
/// (or `{}`) deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertOptions {
    #[serde(default)]
    pub on_entry_error: EntryErrorPolicy,
    /// Spaces per indent level in written JSON.
    #[serde(default = "default_indent")]
    pub indent: usize,
    /// Make titles safe to use as file names before writing.
    #[serde(default = "default_sanitize")]
    pub sanitize_file_names: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            on_entry_error: EntryErrorPolicy::default(),
            indent: default_indent(),
            sanitize_file_names: default_sanitize(),
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry_error_policy(mut self, policy: EntryErrorPolicy) -> Self {
        self.on_entry_error = policy;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_sanitize_file_names(mut self, sanitize: bool) -> Self {
        self.sanitize_file_names = sanitize;
        self
    }

    fn write_settings(&self) -> writer::WriteSettings {
        writer::WriteSettings {
            indent: self.indent,
            sanitize_file_names: self.sanitize_file_names,
        }
    }
}

/// Result of [`convert_file`].
#[derive(Debug, Clone)]
pub struct ConvertResult {
    pub output: PathBuf,
    pub recipes_written: usize,
    pub skipped: Vec<SkippedEntry>,
}

/// Read a Mela export with the given options.
pub fn read_from_file_with(
    path: &Path,
    options: &ConvertOptions,
) -> Result<(RecipeFile, Vec<SkippedEntry>)> {
    reader::read_from_file_with(path, options.on_entry_error)
}

/// Write a recipe or collection with the given options.
pub fn write_to_dir_with<'a>(
    dir: &Path,
    recipes: impl Into<Snapshot<'a>>,
    options: &ConvertOptions,
) -> Result<PathBuf> {
    writer::write_to_dir_with(dir, recipes, options.write_settings())
}

/// Read a Mela export and write it straight back out as JSON into `output_dir`.
pub fn convert_file(
    input: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    let (file, skipped) = read_from_file_with(input, options)?;
    let output = write_to_dir_with(output_dir, &file, options)?;
    Ok(ConvertResult {
        output,
        recipes_written: file.len(),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::fixtures::{minimal, BANANA_BREAD};
    use crate::zip_scan::fixtures::build_zip;
    use tempfile::tempdir;

    #[test]
    fn test_options_defaults_from_json() {
        let options: ConvertOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ConvertOptions::default());
        assert_eq!(options.indent, 4);
        assert!(options.sanitize_file_names);
        assert_eq!(options.on_entry_error, EntryErrorPolicy::Abort);

        let json = r#"{"on_entry_error":"skip","indent":2}"#;
        let options: ConvertOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.on_entry_error, EntryErrorPolicy::Skip);
        assert_eq!(options.indent, 2);
    }

    #[test]
    fn test_convert_document() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.melarecipe");
        std::fs::write(&input, BANANA_BREAD).unwrap();

        let options = ConvertOptions::new();
        let result = convert_file(&input, dir.path(), &options).unwrap();
        assert_eq!(result.output, dir.path().join("Banana Bread.json"));
        assert_eq!(result.recipes_written, 1);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_convert_archive_roundtrip() {
        let docs: Vec<String> = (0..10)
            .map(|i| minimal(&format!("r{}", i), i as f64 * 3600.25))
            .collect();
        let names: Vec<String> = (0..10).map(|i| format!("{}.melarecipe", i)).collect();
        let entries: Vec<(&str, &[u8])> = names
            .iter()
            .zip(&docs)
            .map(|(n, d)| (n.as_str(), d.as_bytes()))
            .collect();

        let dir = tempdir().unwrap();
        let input = dir.path().join("all.melarecipes");
        std::fs::write(&input, build_zip(&entries)).unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();

        let options = ConvertOptions::default();
        let result = convert_file(&input, &out, &options).unwrap();
        assert_eq!(result.recipes_written, 10);
        assert_eq!(result.output, out.join("Recipes.json"));

        let original = read_archive_file(&input).unwrap();
        let bytes = std::fs::read(&result.output).unwrap();
        let written: Vec<Recipe> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(written, original);
    }

    #[test]
    fn test_convert_skips_bad_entries() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("mixed.melarecipes");
        let good = minimal("good", 0.0);
        let data = build_zip(&[
            ("good.melarecipe", good.as_bytes()),
            ("bad.melarecipe", &b"{}"[..]),
        ]);
        std::fs::write(&input, data).unwrap();

        let options = ConvertOptions::default();
        let strict = convert_file(&input, dir.path(), &options).unwrap_err();
        assert!(matches!(strict, Error::Entry { index: 1, .. }));

        let options = ConvertOptions::new()
            .with_entry_error_policy(EntryErrorPolicy::Skip);
        let result = convert_file(&input, dir.path(), &options).unwrap();
        assert_eq!(result.recipes_written, 1);
        assert_eq!(result.skipped[0].index, 1);
    }
}
