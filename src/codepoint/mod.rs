//! Core Code-Point Open reader module

pub mod format;
pub mod iter;
pub mod projection;
pub mod reader;
pub mod source;
pub mod types;
mod utils;

use std::path::Path;

pub use iter::{Entries, EntryOptions};
pub use reader::CodePointReader;
pub use types::error::{CodePointError, Result};

/// Open a Code-Point Open directory or zip file.
///
/// Equivalent to [`CodePointReader::open`].
pub fn open_codepoint(path: impl AsRef<Path>) -> Result<CodePointReader> {
    CodePointReader::open(path)
}
