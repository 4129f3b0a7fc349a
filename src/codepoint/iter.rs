//! Streaming access to postcode records.
//!
//! [`Entries`] walks the requested areas one data file at a time and yields
//! one [`Record`] per CSV row. Only the current row is held in memory.
//!
//! # Example
//! ```no_run
//! # use codepoint_reader::{CodePointReader, EntryOptions};
//! let reader = CodePointReader::open("codepo_gb.zip").unwrap();
//! for result in reader.entries_with(EntryOptions::new().areas(["NR", "IP"])) {
//!     let record = result.unwrap();
//!     println!("{:?} {:?} {:?}", record.postcode(), record.latitude(), record.longitude());
//! }
//! ```

use std::io::Read;
use std::sync::Arc;
use std::vec::IntoIter;

use log::{debug, trace};

use super::format::areas;
use super::projection::{GridTransform, Projection};
use super::reader::CodePointReader;
use super::types::error::{CodePointError, Result};
use super::types::models::Record;
use super::utils;

/// What a record stream should cover and how to convert coordinates.
#[derive(Debug, Clone)]
pub struct EntryOptions {
    areas: Option<Vec<String>>,
    projection: Option<Projection>,
}

impl Default for EntryOptions {
    /// All areas, converted to WGS84.
    fn default() -> Self {
        Self {
            areas: None,
            projection: Some(Projection::wgs84()),
        }
    }
}

impl EntryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the stream to these areas, in this order. Codes are
    /// validated when their turn comes.
    pub fn areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.areas = Some(areas.into_iter().map(Into::into).collect());
        self
    }

    /// Convert Eastings/Northings into `projection`.
    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Leave Eastings/Northings as they are and add no position.
    pub fn without_projection(mut self) -> Self {
        self.projection = None;
        self
    }
}

/// Rows of the area currently being read.
struct AreaRows {
    area: String,
    name: String,
    records: csv::ByteRecordsIntoIter<Box<dyn Read + Send>>,
}

/// Iterator over the postcode records of a dataset.
///
/// Errors are yielded in place; the iterator ends after the first one.
///
/// Created by [`CodePointReader::entries()`] and
/// [`CodePointReader::entries_with()`].
pub struct Entries<'a> {
    reader: &'a CodePointReader,
    requested: Option<Vec<String>>,
    projection: Option<Projection>,

    areas: Option<IntoIter<String>>,
    headers: Option<Arc<[String]>>,
    transform: Option<GridTransform>,
    current: Option<AreaRows>,
    finished: bool,
}

impl<'a> Entries<'a> {
    pub(super) fn new(reader: &'a CodePointReader, options: EntryOptions) -> Self {
        Self {
            reader,
            requested: options.areas,
            projection: options.projection,
            areas: None,
            headers: None,
            transform: None,
            current: None,
            finished: false,
        }
    }

    /// Resolves the area list, headers and transform on first use.
    fn start(&mut self) -> Result<()> {
        if self.areas.is_some() {
            return Ok(());
        }
        let areas = match self.requested.take() {
            Some(areas) => areas,
            None => self.reader.areas()?.to_vec(),
        };
        debug!("Streaming {} postcode areas", areas.len());
        self.headers = Some(Arc::clone(&self.reader.headers()?.long));
        if let Some(projection) = self.projection.take() {
            self.transform = Some(GridTransform::new(projection)?);
        }
        self.areas = Some(areas.into_iter());
        Ok(())
    }

    /// Opens the next area's data file, or returns `false` when none are left.
    fn open_next_area(&mut self) -> Result<bool> {
        let Some(area) = self.areas.as_mut().and_then(Iterator::next) else {
            return Ok(false);
        };
        let area = areas::normalize_area(&area)?;
        let name = self.reader.layout().data_name(&area);
        trace!("Opening area {} ({})", area, name);

        let stream = self.reader.source().open(&name)?;
        let records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(stream)
            .into_byte_records();
        self.current = Some(AreaRows { area, name, records });
        Ok(true)
    }

    fn build_record(&self, area: &str, row: &csv::ByteRecord) -> Result<Record> {
        let encoding = self.reader.layout().encoding;
        let headers = self.headers.clone().unwrap_or_else(|| Arc::from(Vec::new()));
        let values = row.iter().map(|field| utils::decode_text(field, encoding)).collect();
        let mut record = Record::new(area, headers, values);

        if let Some(transform) = &self.transform {
            let eastings = coordinate(&record, "Eastings")?;
            let northings = coordinate(&record, "Northings")?;
            record.set_position(transform.convert(eastings, northings)?);
        }
        Ok(record)
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        self.start()?;
        loop {
            if let Some(rows) = self.current.as_mut() {
                match rows.records.next() {
                    Some(Ok(row)) => {
                        let area = rows.area.clone();
                        return self.build_record(&area, &row).map(Some);
                    }
                    Some(Err(e)) => return Err(CodePointError::csv(rows.name.clone(), e)),
                    None => self.current = None,
                }
            }
            if !self.open_next_area()? {
                return Ok(None);
            }
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                self.current = None;
                Some(Err(e))
            }
        }
    }
}

/// Parses a grid coordinate column of a record.
fn coordinate(record: &Record, field: &'static str) -> Result<f64> {
    let value = record
        .get(field)
        .ok_or_else(|| CodePointError::MissingField(field.to_string()))?;
    value.trim().parse::<f64>().map_err(|_| CodePointError::InvalidCoordinate {
        field,
        value: value.to_string(),
    })
}
