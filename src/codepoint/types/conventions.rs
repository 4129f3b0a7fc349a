//! Specialization logic for the two codelist spreadsheets.
//!
//! `Doc/Codelist.xls` and `Doc/NHS_Codelist.xls` carry one lookup table per
//! worksheet but disagree on column order and on which sheets are special.

/// A trait that describes how a codelist workbook is laid out.
pub trait CodelistConvention {
    /// A short name used for debugging and logging.
    const DEBUG_NAME: &'static str;

    /// Column holding the code (the lookup key).
    const KEY_COLUMN: usize;

    /// Column holding the descriptive label.
    const VALUE_COLUMN: usize;

    /// Sheet that carries no lookups and is skipped, if any.
    const SKIPPED_SHEET: Option<&'static str>;

    /// Sheet whose table maps alias names to real sheet names, if any.
    const ALIAS_SHEET: Option<&'static str>;
}

/// Zero-cost marker struct for `Doc/Codelist.xls`.
///
/// Label first, code second; the `Metadata` sheet is ignored and
/// `AREA_CODES` supplies friendlier names for other sheets.
#[derive(Debug)]
pub struct General;

impl CodelistConvention for General {
    const DEBUG_NAME: &'static str = "Codelist";
    const KEY_COLUMN: usize = 1;
    const VALUE_COLUMN: usize = 0;
    const SKIPPED_SHEET: Option<&'static str> = Some("Metadata");
    const ALIAS_SHEET: Option<&'static str> = Some("AREA_CODES");
}

/// Zero-cost marker struct for `Doc/NHS_Codelist.xls`.
///
/// Code first, label second; every sheet is a lookup table.
#[derive(Debug)]
pub struct Nhs;

impl CodelistConvention for Nhs {
    const DEBUG_NAME: &'static str = "NHS Codelist";
    const KEY_COLUMN: usize = 0;
    const VALUE_COLUMN: usize = 1;
    const SKIPPED_SHEET: Option<&'static str> = None;
    const ALIAS_SHEET: Option<&'static str> = None;
}
