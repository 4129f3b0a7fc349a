//! Where things live inside a Code-Point Open download.

use encoding_rs::Encoding;

/// Entry names and text encoding of a Code-Point Open dataset.
///
/// All names are relative to the dataset root and use `/` separators.
/// The default is the layout Ordnance Survey ships:
///
/// ```text
/// Code-Point Open/
///   Doc/Code-Point_Open_Column_Headers.csv
///   Doc/metadata.txt
///   Doc/Codelist.xls
///   Doc/NHS_Codelist.xls
///   Data/<area>.csv
/// ```
#[derive(Debug, Clone)]
pub struct Layout {
    /// Folder that wraps the dataset inside the archive (with trailing `/`).
    pub root: String,
    pub headers_name: String,
    pub metadata_name: String,
    pub codelist_name: String,
    pub nhs_codelist_name: String,
    /// Folder holding one `<area>.csv` per postcode area.
    pub data_dir: String,
    /// Encoding used to decode CSV fields and the metadata text.
    pub encoding: &'static Encoding,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            root: "Code-Point Open/".to_string(),
            headers_name: "Doc/Code-Point_Open_Column_Headers.csv".to_string(),
            metadata_name: "Doc/metadata.txt".to_string(),
            codelist_name: "Doc/Codelist.xls".to_string(),
            nhs_codelist_name: "Doc/NHS_Codelist.xls".to_string(),
            data_dir: "Data".to_string(),
            encoding: encoding_rs::UTF_8,
        }
    }
}

impl Layout {
    /// Entry name of the data file for a (lowercase) area code.
    pub fn data_name(&self, area: &str) -> String {
        format!("{}/{}.csv", self.data_dir.trim_end_matches('/'), area)
    }

    /// Root folder name without its trailing separator.
    pub fn root_dir(&self) -> &str {
        self.root.trim_end_matches(['/', '\\'])
    }
}
