//! # Source Accessors
//!
//! A dataset arrives either as the zip file Ordnance Survey publishes or as
//! an extracted directory tree. Both are reached through the [`Source`]
//! trait, so the parsers and the record stream never know which one they
//! are reading from.
//!
//! - [`archive`]: entries inside a zip, resolved under the layout's root folder
//! - [`directory`]: files on disk, rooted at the root folder when present

use std::fmt::Debug;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::codepoint::types::error::Result;
use crate::codepoint::types::layout::Layout;
use crate::codepoint::types::models::SourceKind;

pub mod archive;
pub mod directory;

pub use archive::ArchiveSource;
pub use directory::DirectorySource;

/// Byte-level access to the named entries of a dataset.
///
/// Names are relative to the dataset root and use `/` separators
/// (`Doc/metadata.txt`, `Data/nr.csv`).
pub trait Source: Debug + Send + Sync {
    /// Which storage variant this is.
    fn kind(&self) -> SourceKind;

    /// Opens a streaming reader over an entry.
    ///
    /// # Errors
    /// `NotFound` when the entry does not exist.
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>>;

    /// Reads an entry fully into memory.
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let mut reader = self.open(name)?;
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Names of all `<data_dir>/*.csv` entries, in a stable order.
    ///
    /// The names are in the backend's own form (full archive names or
    /// filesystem paths); only their final `/<area>.csv` part is meaningful.
    fn list_data_files(&self) -> Result<Vec<String>>;
}

/// Picks the backend for `path`: a directory is read in place, anything
/// else is opened as an archive.
pub fn open_source(path: &Path, layout: &Layout) -> Result<Box<dyn Source>> {
    if path.is_dir() {
        debug!("{} is a directory, reading extracted dataset", path.display());
        Ok(Box::new(DirectorySource::new(path, layout)))
    } else {
        debug!("{} is not a directory, reading as zip archive", path.display());
        Ok(Box::new(ArchiveSource::new(path, layout)?))
    }
}

/// Normalises an entry name to `/` separators.
pub(crate) fn normalize_name(name: &str) -> String {
    name.replace('\\', "/")
}
