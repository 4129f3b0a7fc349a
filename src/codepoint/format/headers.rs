//! Column header definition parsing.
//!
//! `Doc/Code-Point_Open_Column_Headers.csv` holds two rows: abbreviated
//! names, then the long names that label every data row.

use std::io::Read;
use std::sync::Arc;

use encoding_rs::Encoding;
use log::debug;

use crate::codepoint::types::error::{CodePointError, Result};
use crate::codepoint::types::models::ColumnHeaders;
use crate::codepoint::utils;

/// Parses the header definition entry.
///
/// # Errors
/// `MalformedHeaders` unless the entry holds exactly two rows.
pub fn parse<R: Read>(reader: R, name: &str, encoding: &'static Encoding) -> Result<ColumnHeaders> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::with_capacity(2);
    for record in csv_reader.byte_records() {
        let record = record.map_err(|e| CodePointError::csv(name, e))?;
        let row: Vec<String> = record
            .iter()
            .map(|field| utils::decode_text(field, encoding))
            .collect();
        rows.push(row);
    }

    if rows.len() != 2 {
        return Err(CodePointError::MalformedHeaders { rows: rows.len() });
    }
    let long = rows.pop().unwrap_or_default();
    let short = rows.pop().unwrap_or_default();
    debug!("Column headers: {}", long.join(", "));

    Ok(ColumnHeaders {
        short,
        long: Arc::from(long),
    })
}
