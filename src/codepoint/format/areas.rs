//! Postcode area codes: discovery from file names and validation of
//! caller input.

use std::sync::OnceLock;

use regex::Regex;

use crate::codepoint::types::error::{CodePointError, Result};

/// Matches `/<area>.csv` (either separator) at the end of a data file name.
static AREA_FILE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Matches a caller-supplied area code.
static AREA_CODE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn area_file_regex() -> &'static Regex {
    AREA_FILE_PATTERN
        .get_or_init(|| Regex::new(r"[\\/]([a-z]{1,2})\.csv$").expect("Invalid area file pattern"))
}

fn area_code_regex() -> &'static Regex {
    AREA_CODE_PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z]{1,2}$").expect("Invalid area code pattern"))
}

/// Extracts area codes from data file names, keeping listing order.
///
/// Names that do not end in `/<one or two lowercase letters>.csv` are
/// skipped.
pub fn areas_from_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let re = area_file_regex();
    names
        .into_iter()
        .filter_map(|name| {
            re.captures(name.as_ref())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Checks that `area` is 1 or 2 ASCII letters and returns it lowercased,
/// ready to name its data file.
pub fn normalize_area(area: &str) -> Result<String> {
    if area_code_regex().is_match(area) {
        Ok(area.to_ascii_lowercase())
    } else {
        Err(CodePointError::InvalidArea(area.to_string()))
    }
}
