//! # Codelist Lookup Tables
//!
//! The dataset ships two workbooks that translate coded fields
//! (`Admin_county_code`, `NHS_HA_code`, ...) into names. Each worksheet is
//! one lookup table. How a workbook is read is decided by its
//! [`CodelistConvention`]:
//!
//! - [`General`]: label in column A, code in column B. `Metadata` is skipped.
//!   `AREA_CODES` maps alias names to sheet names; once every sheet has been
//!   read, each alias is inserted pointing at the *same* table as its target.
//! - [`Nhs`]: code in column A, label in column B. Every sheet is read.

use std::collections::HashMap;
use std::fmt;
use std::io::{Cursor, Read, Seek};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use log::{debug, warn};

use crate::codepoint::types::conventions::{CodelistConvention, General, Nhs};
use crate::codepoint::types::error::{CodePointError, Result};

/// Code to label mapping for one worksheet.
pub type LookupTable = HashMap<String, String>;

/// All lookup tables of one codelist workbook, keyed by sheet name
/// (and, for [`General`], by alias).
pub struct Codelist<T: CodelistConvention> {
    tables: HashMap<String, Arc<LookupTable>>,
    _convention: PhantomData<T>,
}

/// Tables from `Doc/Codelist.xls`.
pub type GeneralCodelist = Codelist<General>;

/// Tables from `Doc/NHS_Codelist.xls`.
pub type NhsCodelist = Codelist<Nhs>;

impl<T: CodelistConvention> fmt::Debug for Codelist<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.tables.keys().collect();
        names.sort();
        f.debug_struct("Codelist")
            .field("convention", &T::DEBUG_NAME)
            .field("tables", &names)
            .finish()
    }
}

impl<T: CodelistConvention> Codelist<T> {
    /// Reads a workbook from disk. The format (xls, xlsx, ods) is detected
    /// from the file.
    ///
    /// # Errors
    /// `MalformedSpreadsheet` if the file cannot be read as a workbook.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let mut workbook =
            open_workbook_auto(path).map_err(|e| CodePointError::spreadsheet(&name, e))?;
        Self::from_workbook(&mut workbook, &name)
    }

    /// Reads a workbook held in memory, e.g. an entry read out of the
    /// dataset archive. `name` is only used in errors and logs.
    pub fn from_bytes(name: &str, bytes: Vec<u8>) -> Result<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| CodePointError::spreadsheet(name, e))?;
        Self::from_workbook(&mut workbook, name)
    }

    fn from_workbook<RS: Read + Seek>(workbook: &mut Sheets<RS>, name: &str) -> Result<Self> {
        let mut tables: HashMap<String, Arc<LookupTable>> = HashMap::new();
        let mut aliases: Option<Arc<LookupTable>> = None;

        for sheet_name in workbook.sheet_names() {
            if T::SKIPPED_SHEET == Some(sheet_name.as_str()) {
                debug!("{}: skipping sheet {}", T::DEBUG_NAME, sheet_name);
                continue;
            }

            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| {
                    CodePointError::spreadsheet(name, format!("sheet {}: {}", sheet_name, e))
                })?;

            let mut table = LookupTable::with_capacity(range.height());
            for (row_index, row) in range.rows().enumerate() {
                let (key, value) = match (row.get(T::KEY_COLUMN), row.get(T::VALUE_COLUMN)) {
                    (Some(key), Some(value)) => (cell_text(key), cell_text(value)),
                    _ => {
                        return Err(CodePointError::spreadsheet(
                            name,
                            format!(
                                "sheet {} row {} has fewer than two cells",
                                sheet_name, row_index
                            ),
                        ))
                    }
                };
                table.insert(key, value);
            }

            let table = Arc::new(table);
            if T::ALIAS_SHEET == Some(sheet_name.as_str()) {
                aliases = Some(Arc::clone(&table));
            }
            tables.insert(sheet_name, table);
        }

        // Aliases are resolved only after every sheet is in, so their order
        // in the workbook does not matter.
        if let Some(aliases) = aliases {
            let mut pairs: Vec<(&String, &String)> = aliases.iter().collect();
            pairs.sort();
            for (alias, target) in pairs {
                let table = tables.get(target).cloned().ok_or_else(|| {
                    CodePointError::spreadsheet(
                        name,
                        format!("alias {} refers to missing sheet {}", alias, target),
                    )
                })?;
                if tables.contains_key(alias) {
                    warn!("{}: alias {} shadows an existing table", T::DEBUG_NAME, alias);
                }
                tables.insert(alias.clone(), table);
            }
        }

        debug!("{}: loaded {} lookup tables from {}", T::DEBUG_NAME, tables.len(), name);
        Ok(Self {
            tables,
            _convention: PhantomData,
        })
    }

    /// The table for a sheet or alias.
    pub fn get(&self, sheet: &str) -> Option<&Arc<LookupTable>> {
        self.tables.get(sheet)
    }

    /// Label for `code` in `sheet`.
    pub fn lookup(&self, sheet: &str, code: &str) -> Option<&str> {
        self.tables.get(sheet)?.get(code).map(String::as_str)
    }

    /// Sheet and alias names, sorted.
    pub fn sheet_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<LookupTable>)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }
}

/// Text of a cell. Numbers print without a trailing `.0`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
