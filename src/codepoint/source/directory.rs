//! Extracted-directory dataset access.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use log::{info, trace};

use super::Source;
use crate::codepoint::types::error::{CodePointError, Result};
use crate::codepoint::types::layout::Layout;
use crate::codepoint::types::models::SourceKind;

/// Reads a dataset that has already been unzipped.
///
/// The caller may point at the folder that contains `Code-Point Open/` or
/// at `Code-Point Open/` itself; both resolve to the same root.
#[derive(Debug)]
pub struct DirectorySource {
    root: PathBuf,
    data_dir: String,
}

impl DirectorySource {
    pub fn new(path: impl AsRef<Path>, layout: &Layout) -> Self {
        let path = path.as_ref();
        let nested = path.join(layout.root_dir());
        let root = if nested.is_dir() {
            nested
        } else {
            path.to_path_buf()
        };
        info!("Opening Code-Point directory: {}", root.display());
        Self {
            root,
            data_dir: layout.data_dir.trim_end_matches('/').to_string(),
        }
    }

    /// Effective dataset root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path for a root-relative entry name.
    fn resolve(&self, name: &str) -> PathBuf {
        name.split(['/', '\\'])
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }
}

impl Source for DirectorySource {
    fn kind(&self) -> SourceKind {
        SourceKind::Directory
    }

    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>> {
        let path = self.resolve(name);
        trace!("Opening {}", path.display());
        let file = File::open(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CodePointError::not_found(path.display().to_string()),
            _ => CodePointError::Io(e),
        })?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn list_data_files(&self) -> Result<Vec<String>> {
        let data_dir = self.resolve(&self.data_dir);
        if !data_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&data_dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            // Glob semantics: `*` never matches a leading dot.
            if file_name.starts_with('.') || !file_name.ends_with(".csv") {
                continue;
            }
            // Follows symlinks, like a glob would.
            if entry.path().is_file() {
                names.push(entry.path().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
