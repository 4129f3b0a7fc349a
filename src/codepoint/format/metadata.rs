//! # `Doc/metadata.txt` Parsing
//!
//! The summary file mixes free-form `key: value` lines with a table of
//! per-area postcode counts, with no section markers in between:
//!
//! ```text
//! ORDNANCE SURVEY
//! PRODUCT: Code-Point Open
//! DATASET VERSION NUMBER: 2012.4.0
//!      AB    12345
//!      AL     8190
//! ```
//!
//! Each line is classified by its shape and fed through a small state
//! machine (`file_start` → `magic` → `header`* → `area_count`*). Anything
//! that does not fit the current state is rejected.
//!
//! Known edge case: once past the banner, any line shaped like an area
//! count ends the header section, and nothing marks where that section
//! should end. A descriptive line that happened to look like
//! `   XX   123` would be read as a count.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use log::{debug, trace};
use regex::Regex;

use crate::codepoint::types::error::{CodePointError, Result};

/// Text that must appear alone on the first line.
pub const MAGIC: &str = "ORDNANCE SURVEY";

static HEADER_PATTERN: OnceLock<Regex> = OnceLock::new();
static AREA_COUNT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn header_regex() -> &'static Regex {
    HEADER_PATTERN.get_or_init(|| {
        Regex::new(r"^([^:]+):\s*([^:]+)$").expect("Invalid metadata header pattern")
    })
}

fn area_count_regex() -> &'static Regex {
    AREA_COUNT_PATTERN.get_or_init(|| {
        Regex::new(r"^\s+([A-Z]{1,2})\s+(\d+)$").expect("Invalid area count pattern")
    })
}

/// Parser state, named after the kind of the last line consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    FileStart,
    Magic,
    Header,
    AreaCount,
}

impl fmt::Display for LineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineMode::FileStart => "file_start",
            LineMode::Magic => "magic",
            LineMode::Header => "header",
            LineMode::AreaCount => "area_count",
        })
    }
}

/// Parsed contents of the summary file.
///
/// `total_count()` always equals the sum of `area_counts()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: BTreeMap<String, String>,
    area_counts: BTreeMap<String, u64>,
    total_count: u64,
}

impl Metadata {
    /// A descriptive field, e.g. `get("PRODUCT")`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// All descriptive `key: value` fields.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Postcode count per (uppercase) area code.
    pub fn area_counts(&self) -> &BTreeMap<String, u64> {
        &self.area_counts
    }

    /// Postcode count for one area, in either case.
    pub fn area_count(&self, area: &str) -> Option<u64> {
        self.area_counts.get(&area.to_ascii_uppercase()).copied()
    }

    /// Sum of all area counts.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }
}

/// Parses the summary text.
///
/// Trailing whitespace (including `\r`) is ignored on every line. Repeated
/// keys keep the last value.
///
/// # Errors
/// `InvalidFormat` if the first line is not [`MAGIC`], or if a line does not
/// fit the state the parser is in. The error carries the line and state.
pub fn parse(text: &str) -> Result<Metadata> {
    let mut metadata = Metadata::default();
    let mut mode = LineMode::FileStart;

    for line in text.lines() {
        let line = line.trim_end();
        mode = next_mode(line, mode)?;
        trace!("metadata [{}] {}", mode, line);

        match mode {
            LineMode::Header => {
                if let Some(caps) = header_regex().captures(line) {
                    metadata.fields.insert(caps[1].to_string(), caps[2].to_string());
                }
            }
            LineMode::AreaCount => {
                if let Some(caps) = area_count_regex().captures(line) {
                    let count = caps[2].parse::<u64>().map_err(|e| CodePointError::InvalidFormat {
                        reason: format!("area count out of range: {}", e),
                        state: mode,
                        line: line.to_string(),
                    })?;
                    metadata.area_counts.insert(caps[1].to_string(), count);
                }
            }
            LineMode::FileStart | LineMode::Magic => {}
        }
    }

    if mode == LineMode::FileStart {
        return Err(missing_magic(""));
    }

    metadata.total_count = metadata.area_counts.values().sum();
    debug!(
        "Metadata parsed: {} fields, {} areas, {} postcodes",
        metadata.fields.len(),
        metadata.area_counts.len(),
        metadata.total_count
    );
    Ok(metadata)
}

/// Classifies `line` given the previous state.
fn next_mode(line: &str, prev: LineMode) -> Result<LineMode> {
    match prev {
        LineMode::FileStart if line == MAGIC => return Ok(LineMode::Magic),
        LineMode::FileStart => return Err(missing_magic(line)),
        LineMode::Magic | LineMode::Header => {
            if header_regex().is_match(line) {
                return Ok(LineMode::Header);
            }
            if area_count_regex().is_match(line) {
                return Ok(LineMode::AreaCount);
            }
        }
        LineMode::AreaCount => {
            if area_count_regex().is_match(line) {
                return Ok(LineMode::AreaCount);
            }
        }
    }

    Err(CodePointError::InvalidFormat {
        reason: "line does not fit the current section".to_string(),
        state: prev,
        line: line.to_string(),
    })
}

fn missing_magic(line: &str) -> CodePointError {
    CodePointError::InvalidFormat {
        reason: format!("expected {:?} on the first line", MAGIC),
        state: LineMode::FileStart,
        line: line.to_string(),
    }
}
