//! Zip-backed dataset access.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use flate2::read::DeflateDecoder;
use log::{info, trace};
use zip::result::ZipError;
use zip::{CompressionMethod, ZipArchive};

use super::{normalize_name, Source};
use crate::codepoint::types::error::{CodePointError, Result};
use crate::codepoint::types::layout::Layout;
use crate::codepoint::types::models::SourceKind;

/// Reads a dataset straight out of the downloaded zip.
///
/// The central directory is parsed once and kept behind a mutex. Entries
/// handed out by [`Source::open`] own their own file handle, so several
/// streams can be alive at once without sharing a cursor.
///
/// Streams from `open` are inflated directly and do not verify the entry
/// CRC; `read` does.
pub struct ArchiveSource {
    path: PathBuf,
    root: String,
    data_dir: String,
    archive: Mutex<ZipArchive<File>>,
    /// Normalised (`/`-separated) name to the name stored in the archive.
    names: HashMap<String, String>,
    /// Stored names in central directory order.
    listing: Vec<String>,
}

impl fmt::Debug for ArchiveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveSource")
            .field("path", &self.path)
            .field("root", &self.root)
            .field("entries", &self.listing.len())
            .finish()
    }
}

impl ArchiveSource {
    /// Opens the zip at `path`.
    ///
    /// # Errors
    /// - `NotFound` if `path` does not exist
    /// - `MalformedArchive` if it is not a readable zip
    pub fn new(path: impl AsRef<Path>, layout: &Layout) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening Code-Point archive: {}", path.display());
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CodePointError::not_found(path.display().to_string()),
            _ => CodePointError::Io(e),
        })?;
        let archive = ZipArchive::new(file).map_err(|e| {
            CodePointError::MalformedArchive(format!("{}: {}", path.display(), e))
        })?;

        let listing: Vec<String> = archive.file_names().map(str::to_string).collect();
        let names = listing
            .iter()
            .map(|name| (normalize_name(name), name.clone()))
            .collect();
        trace!("Archive holds {} entries", listing.len());

        Ok(Self {
            path: path.to_path_buf(),
            root: root_prefix(layout),
            data_dir: layout.data_dir.trim_end_matches('/').to_string(),
            archive: Mutex::new(archive),
            names,
            listing,
        })
    }

    /// Path of the zip file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maps a root-relative name to the name stored in the archive.
    fn stored_name(&self, name: &str) -> Result<&str> {
        let full = format!("{}{}", self.root, normalize_name(name));
        self.names
            .get(&full)
            .map(String::as_str)
            .ok_or_else(|| CodePointError::not_found(full))
    }
}

impl Source for ArchiveSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Archive
    }

    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>> {
        let stored = self.stored_name(name)?;
        let (method, data_start, compressed_size) = {
            let mut archive = self.archive.lock().map_err(|_| CodePointError::LockPoisoned)?;
            let entry = archive.by_name(stored).map_err(|e| entry_error(stored, e))?;
            (entry.compression(), entry.data_start(), entry.compressed_size())
        };
        trace!(
            "Streaming {} ({:?}, {} bytes at offset {})",
            stored, method, compressed_size, data_start
        );

        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(data_start))?;
        let raw = BufReader::new(file).take(compressed_size);

        match method {
            CompressionMethod::Stored => Ok(Box::new(raw)),
            CompressionMethod::Deflated => Ok(Box::new(DeflateDecoder::new(raw))),
            other => Err(CodePointError::MalformedArchive(format!(
                "{}: unsupported compression method {:?}",
                stored, other
            ))),
        }
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let stored = self.stored_name(name)?;
        let mut archive = self.archive.lock().map_err(|_| CodePointError::LockPoisoned)?;
        let mut entry = archive.by_name(stored).map_err(|e| entry_error(stored, e))?;
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes).map_err(|e| {
            CodePointError::MalformedArchive(format!("{}: {}", stored, e))
        })?;
        Ok(bytes)
    }

    fn list_data_files(&self) -> Result<Vec<String>> {
        let prefix = format!("{}{}/", self.root, self.data_dir);
        Ok(self
            .listing
            .iter()
            .filter(|name| {
                let normalized = normalize_name(name);
                normalized.starts_with(&prefix) && normalized.ends_with(".csv")
            })
            .cloned()
            .collect())
    }
}

/// Root folder as an entry-name prefix: `/`-separated, with one trailing `/`.
fn root_prefix(layout: &Layout) -> String {
    let root = normalize_name(layout.root_dir());
    if root.is_empty() {
        root
    } else {
        format!("{}/", root)
    }
}

fn entry_error(name: &str, error: ZipError) -> CodePointError {
    match error {
        ZipError::FileNotFound => CodePointError::not_found(name),
        other => CodePointError::MalformedArchive(format!("{}: {}", name, other)),
    }
}
