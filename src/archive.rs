//! In-memory access to downloaded artifact zips

use regex::Regex;
use std::fmt;
use std::io::{Cursor, Read};
use tracing::debug;

/// Regex that selects an archive entry by matching from the start of its name
///
/// Only the start is anchored: `input-leap_.*_amd64.deb` also accepts
/// `input-leap_3.0_amd64.deb.sig`.
#[derive(Clone, Debug)]
pub struct EntryPattern {
    source: String,
    regex: Regex,
}

impl EntryPattern {
    /// Compile a pattern, anchoring it at the start of the entry name
    pub fn new(source: &str) -> std::result::Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})", source))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Pattern text as written in the artifact table
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if the pattern matches at the start of `name`
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl fmt::Display for EntryPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Position of the first name in listing order matched by `pattern`
pub fn select_entry<'a, I>(names: I, pattern: &EntryPattern) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().position(|name| pattern.matches(name))
}

/// A downloaded artifact zip held in memory
pub struct ArtifactArchive {
    archive: zip::ZipArchive<Cursor<Vec<u8>>>,
}

impl ArtifactArchive {
    /// Open the downloaded bytes as a zip container
    pub fn from_bytes(bytes: Vec<u8>) -> zip::result::ZipResult<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        debug!(entries = archive.len(), "opened artifact archive");
        Ok(Self { archive })
    }

    /// Number of entries in the central directory
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// True if the archive has no entries
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Entry names in central-directory order
    ///
    /// `ZipArchive::file_names` iterates a hash map, so the order comes from
    /// walking the indices instead.
    pub fn entry_names(&mut self) -> zip::result::ZipResult<Vec<String>> {
        let mut names = Vec::with_capacity(self.archive.len());
        for i in 0..self.archive.len() {
            let entry = self.archive.by_index_raw(i)?;
            names.push(entry.name().to_string());
        }
        Ok(names)
    }

    /// Decompressed contents of the entry at `index`
    ///
    /// Reading by name would resolve duplicate names to the last entry.
    pub fn read_entry(&mut self, index: usize) -> zip::result::ZipResult<Vec<u8>> {
        let mut entry = self.archive.by_index(index)?;
        let mut buf = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or_default());
        entry.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl fmt::Debug for ArtifactArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactArchive")
            .field("entries", &self.archive.len())
            .finish()
    }
}
