//! # codepoint-reader
//!
//! A reader for Ordnance Survey's Code-Point Open, the free dataset that
//! maps UK postcodes to National Grid coordinates.
//!
//! The data can be read straight from the downloaded zip or from an
//! extracted copy. Grid references are converted to latitude and longitude
//! on the fly, and the codelist workbooks that decode administrative codes
//! are exposed as lookup tables.
//!
//! ```no_run
//! use codepoint_reader::{open_codepoint, EntryOptions};
//!
//! let codepoint = open_codepoint("codepo_gb.zip").unwrap();
//! let counties = codepoint.codelist().unwrap().get("County").cloned();
//! for entry in codepoint.entries_with(EntryOptions::new().areas(["NR"])) {
//!     let entry = entry.unwrap();
//!     let county = entry
//!         .get("Admin_county_code")
//!         .and_then(|code| counties.as_ref()?.get(code));
//!     println!("{:?} {:?} {:?} {:?}", entry.postcode(), entry.latitude(), entry.longitude(), county);
//!     break;
//! }
//! println!("{} postcodes", codepoint.metadata().unwrap().total_count());
//! ```
pub mod codepoint;

// Re-export the main types for convenience
pub use codepoint::{
    open_codepoint,
    CodePointError,
    CodePointReader,
    Entries,
    EntryOptions,
    Result,
    format::{
        codelist::{Codelist, GeneralCodelist, LookupTable, NhsCodelist},
        metadata::{LineMode, Metadata},
    },
    projection::{GridTransform, Projection},
    source::{ArchiveSource, DirectorySource, Source},
    types::{
        conventions::{CodelistConvention, General, Nhs},
        layout::Layout,
        models::{ColumnHeaders, LonLat, Record, SourceKind},
    },
};
