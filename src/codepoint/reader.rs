use std::path::Path;
use std::sync::OnceLock;

use log::{debug, info};

use super::format::codelist::{GeneralCodelist, NhsCodelist};
use super::format::{areas, headers, metadata};
use super::format::metadata::Metadata;
use super::iter::{Entries, EntryOptions};
use super::source::{self, Source};
use super::types::error::Result;
use super::types::layout::Layout;
use super::types::models::{ColumnHeaders, SourceKind};
use super::utils;

/// The main reader for Code-Point Open datasets.
///
/// Reads either the downloaded zip or an extracted directory. Derived
/// properties (areas, headers, metadata, codelists) are computed on first
/// access and kept for the lifetime of the reader; a failed computation is
/// retried on the next access. Dropping the reader closes the archive.
#[derive(Debug)]
pub struct CodePointReader {
    source: Box<dyn Source>,
    layout: Layout,

    areas: OnceLock<Vec<String>>,
    headers: OnceLock<ColumnHeaders>,
    metadata: OnceLock<Metadata>,
    codelist: OnceLock<GeneralCodelist>,
    nhs_codelist: OnceLock<NhsCodelist>,
}

impl CodePointReader {
    /// Open a Code-Point Open zip file or directory.
    ///
    /// Directories are read in place, either the folder containing
    /// `Code-Point Open/` or that folder itself. Any other path is opened
    /// as a zip archive.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The archive does not exist (`NotFound`)
    /// - The archive is not a readable zip (`MalformedArchive`)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_layout(path, Layout::default())
    }

    /// Like [`open`](Self::open), with non-default entry names or encoding.
    pub fn open_with_layout(path: impl AsRef<Path>, layout: Layout) -> Result<Self> {
        let path = path.as_ref();
        let source = source::open_source(path, &layout)?;
        info!("Opened Code-Point dataset {} ({})", path.display(), source.kind());
        Ok(Self::from_source(source, layout))
    }

    /// Wraps an already constructed source.
    pub fn from_source(source: Box<dyn Source>, layout: Layout) -> Self {
        Self {
            source,
            layout,
            areas: OnceLock::new(),
            headers: OnceLock::new(),
            metadata: OnceLock::new(),
            codelist: OnceLock::new(),
            nhs_codelist: OnceLock::new(),
        }
    }

    /// Storage variant backing this reader.
    pub fn kind(&self) -> SourceKind {
        self.source.kind()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Lowercase codes of the postcode areas present, in listing order.
    pub fn areas(&self) -> Result<&[String]> {
        memoize(&self.areas, || {
            let names = self.source.list_data_files()?;
            let areas = areas::areas_from_names(&names);
            debug!("Found {} postcode areas in {} data files", areas.len(), names.len());
            Ok(areas)
        })
        .map(Vec::as_slice)
    }

    /// Both header rows.
    ///
    /// # Errors
    /// `NotFound` if the header entry is missing, `MalformedHeaders` if it
    /// does not hold exactly two rows.
    pub fn headers(&self) -> Result<&ColumnHeaders> {
        memoize(&self.headers, || {
            let name = &self.layout.headers_name;
            headers::parse(self.source.open(name)?, name, self.layout.encoding)
        })
    }

    /// Long column names used as record field names.
    pub fn long_headers(&self) -> Result<&[String]> {
        self.headers().map(|headers| &*headers.long)
    }

    /// Parsed `Doc/metadata.txt`.
    pub fn metadata(&self) -> Result<&Metadata> {
        memoize(&self.metadata, || {
            let bytes = self.source.read(&self.layout.metadata_name)?;
            metadata::parse(&utils::decode_text(&bytes, self.layout.encoding))
        })
    }

    /// Lookup tables from `Doc/Codelist.xls`, with `AREA_CODES` aliases.
    pub fn codelist(&self) -> Result<&GeneralCodelist> {
        memoize(&self.codelist, || {
            let name = &self.layout.codelist_name;
            GeneralCodelist::from_bytes(name, self.source.read(name)?)
        })
    }

    /// Lookup tables from `Doc/NHS_Codelist.xls`.
    pub fn nhs_codelist(&self) -> Result<&NhsCodelist> {
        memoize(&self.nhs_codelist, || {
            let name = &self.layout.nhs_codelist_name;
            NhsCodelist::from_bytes(name, self.source.read(name)?)
        })
    }

    /// Streams every postcode in every area, converted to WGS84.
    ///
    /// Shortcut for `entries_with(EntryOptions::default())`.
    pub fn entries(&self) -> Entries<'_> {
        self.entries_with(EntryOptions::default())
    }

    /// Streams postcode records as configured by `options`.
    ///
    /// Nothing is read until the first call to `next()`. Each call starts an
    /// independent pass over the data files.
    pub fn entries_with(&self, options: EntryOptions) -> Entries<'_> {
        Entries::new(self, options)
    }

    pub(crate) fn source(&self) -> &dyn Source {
        self.source.as_ref()
    }
}

/// Returns the cached value, computing and storing it on first success.
fn memoize<T>(cell: &OnceLock<T>, init: impl FnOnce() -> Result<T>) -> Result<&T> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value))
}
