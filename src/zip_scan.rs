use std::io::{Cursor, Read};

use encoding_rs::SHIFT_JIS;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::decode;
use crate::error::{Error, ParseError, Result};
use crate::recipe::Recipe;

/// Upper bound on the read buffer reserved from an entry's declared size.
const MAX_PREALLOC: u64 = 1024 * 1024; // 1 MiB

/// What to do with an archive entry that does not decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryErrorPolicy {
    /// Fail the whole archive on the first bad entry.
    #[default]
    Abort,
    /// Drop bad entries and report them in [`ArchiveDecode::skipped`].
    Skip,
}

/// An archive entry left out under [`EntryErrorPolicy::Skip`].
#[derive(Debug, Clone)]
pub struct SkippedEntry {
    pub index: usize,
    pub name: String,
    pub reason: String,
}

/// Result of decoding a `.melarecipes` archive.
#[derive(Debug, Clone, Default)]
pub struct ArchiveDecode {
    /// Decoded recipes, in archive order.
    pub recipes: Vec<Recipe>,
    pub skipped: Vec<SkippedEntry>,
}

/// A file entry pulled out of the archive, not yet decoded.
struct RawEntry {
    index: usize,
    name: String,
    bytes: Vec<u8>,
}

/// Decode ZIP entry name, trying UTF-8 first, then Shift_JIS
fn decode_entry_name(raw: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(raw) {
        return s.to_string();
    }

    let (decoded, _, had_errors) = SHIFT_JIS.decode(raw);
    if !had_errors {
        return decoded.into_owned();
    }

    String::from_utf8_lossy(raw).into_owned()
}

/// Read every file entry out of the archive, in archive order.
fn read_entries(data: &[u8]) -> Result<Vec<RawEntry>> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let name = decode_entry_name(entry.name_raw());
        // The declared size comes from the archive and may be anything.
        let mut bytes = Vec::with_capacity(entry.size().min(MAX_PREALLOC) as usize);
        entry.read_to_end(&mut bytes).map_err(ZipError::Io)?;
        entries.push(RawEntry {
            index: i,
            name,
            bytes,
        });
    }

    Ok(entries)
}

/// Decode a `.melarecipes` archive, aborting on the first bad entry.
pub fn decode_archive(data: &[u8]) -> Result<Vec<Recipe>> {
    let decoded = decode_archive_with(data, EntryErrorPolicy::Abort)?;
    Ok(decoded.recipes)
}

/// Decode a `.melarecipes` archive under the given entry error policy.
///
/// Entries are decoded in parallel; the output keeps archive order. Under
/// [`EntryErrorPolicy::Abort`] the reported failure is the first bad entry
/// in archive order, whichever finished first.
pub fn decode_archive_with(data: &[u8], policy: EntryErrorPolicy) -> Result<ArchiveDecode> {
    let entries = read_entries(data)?;

    let results: Vec<(RawEntry, std::result::Result<Recipe, ParseError>)> = entries
        .into_par_iter()
        .map(|entry| {
            let result = decode::decode_recipe_slice(&entry.bytes);
            (entry, result)
        })
        .collect();

    let mut decoded = ArchiveDecode {
        recipes: Vec::with_capacity(results.len()),
        skipped: Vec::new(),
    };

    for (entry, result) in results {
        match result {
            Ok(recipe) => decoded.recipes.push(recipe),
            Err(source) => match policy {
                EntryErrorPolicy::Abort => {
                    return Err(Error::Entry {
                        index: entry.index,
                        name: entry.name,
                        source,
                    });
                }
                EntryErrorPolicy::Skip => {
                    warn!(
                        index = entry.index,
                        name = %entry.name,
                        error = %source,
                        "skipping archive entry"
                    );
                    decoded.skipped.push(SkippedEntry {
                        index: entry.index,
                        name: entry.name,
                        reason: source.to_string(),
                    });
                }
            },
        }
    }

    debug!(
        recipes = decoded.recipes.len(),
        skipped = decoded.skipped.len(),
        "decoded recipe archive"
    );
    Ok(decoded)
}
