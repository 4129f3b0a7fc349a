//! Core data structures shared by the reader, the parsers and the record stream.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Which physical storage backs a dataset handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The zip file as downloaded.
    Archive,
    /// An extracted copy on disk.
    Directory,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Archive => f.write_str("archive"),
            SourceKind::Directory => f.write_str("directory"),
        }
    }
}

/// A converted position in the target coordinate system.
///
/// For geographic targets (WGS84, ETRS89) the values are degrees; for
/// projected targets they are the target's native units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

/// The two header rows of the dataset.
///
/// `long` names label every record; `short` is kept for callers that want
/// the abbreviated form.
#[derive(Debug, Clone)]
pub struct ColumnHeaders {
    pub short: Vec<String>,
    pub long: Arc<[String]>,
}

/// One postcode row, labelled with the long column headers.
///
/// Headers are shared between all records of a stream; only the values
/// are owned per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    area: String,
    headers: Arc<[String]>,
    values: Vec<String>,
    position: Option<LonLat>,
}

impl Record {
    /// Builds a record by pairing `values` positionally with `headers`.
    /// Values beyond the last header are dropped.
    pub fn new(area: impl Into<String>, headers: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.truncate(headers.len());
        Self {
            area: area.into(),
            headers,
            values,
            position: None,
        }
    }

    pub(crate) fn set_position(&mut self, position: LonLat) {
        self.position = Some(position);
    }

    /// Lowercase area code of the data file this row came from.
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Value of a column, by long header name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == field)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    pub fn postcode(&self) -> Option<&str> {
        self.get("Postcode")
    }

    /// `(header, value)` pairs in file column order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .zip(self.values.iter())
            .map(|(h, v)| (h.as_str(), v.as_str()))
    }

    /// Number of dataset columns carried by this record.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converted position, if the stream was asked to project coordinates.
    pub fn position(&self) -> Option<LonLat> {
        self.position
    }

    pub fn longitude(&self) -> Option<f64> {
        self.position.map(|p| p.longitude)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.position.map(|p| p.latitude)
    }

    /// Dictionary view of the record. `Longitude` and `Latitude` are added
    /// when a position is present.
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map: HashMap<String, String> = self
            .fields()
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        if let Some(position) = self.position {
            map.insert("Longitude".to_string(), position.longitude.to_string());
            map.insert("Latitude".to_string(), position.latitude.to_string());
        }
        map
    }
}
