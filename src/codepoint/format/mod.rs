//! Parsing layer for the files inside a Code-Point Open dataset.
//!
//! This module turns raw entries handed out by a
//! [`Source`](crate::codepoint::source::Source) into structured data.
//!
//! # Module Organization
//!
//! - [`areas`]: Derives postcode areas from data file names
//! - [`headers`]: Reads the two-row column header definition
//! - [`metadata`]: Line-classifying parser for `Doc/metadata.txt`
//! - [`codelist`]: Builds lookup tables from the codelist workbooks
//!
//! # Architecture
//!
//! ```text
//! Code-Point Open/
//! ├── Doc/
//! │   ├── Code-Point_Open_Column_Headers.csv  ← headers::parse()
//! │   ├── metadata.txt                        ← metadata::parse()
//! │   ├── Codelist.xls                        ← codelist::Codelist::<General>
//! │   └── NHS_Codelist.xls                    ← codelist::Codelist::<Nhs>
//! └── Data/
//!     └── <area>.csv                          ← areas::areas_from_names()
//! ```

pub mod areas;
pub mod codelist;
pub mod headers;
pub mod metadata;
