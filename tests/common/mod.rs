//! Throw-away Code-Point Open datasets for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const ROOT: &str = "Code-Point Open";

pub const SHORT_HEADERS: &str = "PC,PQ,EA,NO,CY,RH,LH,CC,DC,WC";
pub const LONG_HEADERS: &str = "Postcode,Positional_quality_indicator,Eastings,Northings,Country_code,\
NHS_regional_HA_code,NHS_HA_code,Admin_county_code,Admin_district_code,Admin_ward_code";

pub const NR_CSV: &str =
    "\"NR1 1AA\",10,624068,308352,\"E92000001\",\"E19000001\",\"E18000007\",\"E10000020\",\"E07000148\",\"E05005790\"\r\n";

pub const IP_CSV: &str = concat!(
    "\"IP1 1AA\",10,616350,244600,\"E92000001\",\"E19000001\",\"E18000008\",\"E10000029\",\"E07000202\",\"E05007046\"\r\n",
    "\"IP1 1AB\",10,616400,244650,\"E92000001\",\"E19000001\",\"E18000008\",\"E10000029\",\"E07000202\",\"E05007046\"\r\n",
);

pub const B_CSV: &str =
    "\"B1 1AA\",10,406689,286822,\"E92000001\",\"E19000002\",\"E18000009\",\"\",\"E08000025\",\"E05001130\"\r\n";

pub const METADATA: &str = concat!(
    "ORDNANCE SURVEY\r\n",
    "PRODUCT: Code-Point Open\r\n",
    "DATASET VERSION NUMBER: 2012.4.0\r\n",
    "COPYRIGHT DATE: 20121120\r\n",
    "     B        1\r\n",
    "     IP       2\r\n",
    "     NR       1\r\n",
);

/// A worksheet cell.
#[derive(Clone, Copy)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

pub type Sheet<'a> = (&'a str, Vec<Vec<Cell<'a>>>);

pub fn text_rows<'a>(rows: &[[&'a str; 2]]) -> Vec<Vec<Cell<'a>>> {
    rows.iter()
        .map(|row| row.iter().map(|value| Cell::Text(*value)).collect())
        .collect()
}

/// `Doc/Codelist.xls`: label first, code second. `AREA_CODES` comes before
/// the sheets it names.
pub fn general_codelist() -> Vec<u8> {
    xlsx(&[
        ("Metadata", text_rows(&[["Code-Point Open codelist", "2012"]])),
        ("AREA_CODES", text_rows(&[["CTY", "County"], ["DIS", "District"]])),
        (
            "CTY",
            text_rows(&[["Norfolk County", "E10000020"], ["Suffolk County", "E10000029"]]),
        ),
        ("DIS", text_rows(&[["Norwich District", "E07000148"]])),
    ])
}

/// `Doc/NHS_Codelist.xls`: code first, label second.
pub fn nhs_codelist() -> Vec<u8> {
    xlsx(&[
        ("HA", text_rows(&[["E18000007", "Norfolk HA"], ["E18000008", "Suffolk HA"]])),
        ("RHA", text_rows(&[["E19000001", "East RHA"]])),
        (
            "Metadata",
            vec![vec![Cell::Number(1.0), Cell::Text("Quality one")]],
        ),
    ])
}

/// Every entry of the standard fixture, relative to the dataset root.
pub fn standard_entries() -> Vec<(String, Vec<u8>)> {
    vec![
        (
            "Doc/Code-Point_Open_Column_Headers.csv".to_string(),
            format!("{}\r\n{}\r\n", SHORT_HEADERS, LONG_HEADERS).into_bytes(),
        ),
        ("Doc/metadata.txt".to_string(), METADATA.as_bytes().to_vec()),
        ("Doc/Codelist.xls".to_string(), general_codelist()),
        ("Doc/NHS_Codelist.xls".to_string(), nhs_codelist()),
        ("Data/b.csv".to_string(), B_CSV.as_bytes().to_vec()),
        ("Data/ip.csv".to_string(), IP_CSV.as_bytes().to_vec()),
        ("Data/nr.csv".to_string(), NR_CSV.as_bytes().to_vec()),
    ]
}

/// Replaces (or adds) one entry of `entries`.
pub fn with_entry(mut entries: Vec<(String, Vec<u8>)>, name: &str, bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    entries.retain(|(n, _)| n != name);
    entries.push((name.to_string(), bytes.to_vec()));
    entries
}

/// Writes `entries` under `<tmp>/Code-Point Open/` and returns the temp dir.
pub fn dataset_dir(entries: &[(String, Vec<u8>)]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    let root = dir.path().join(ROOT);
    for (name, bytes) in entries {
        let path = root.join(name);
        fs::create_dir_all(path.parent().expect("entry has a parent")).expect("create entry dir");
        fs::write(&path, bytes).expect("write entry");
    }
    dir
}

/// Writes `entries` into `<tmp>/codepo_gb.zip` under the root folder.
pub fn dataset_zip(entries: &[(String, Vec<u8>)], method: CompressionMethod) -> (TempDir, PathBuf) {
    dataset_zip_with_separator(entries, method, '/')
}

pub fn dataset_zip_with_separator(
    entries: &[(String, Vec<u8>)],
    method: CompressionMethod,
    separator: char,
) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("codepo_gb.zip");
    let file = fs::File::create(&path).expect("create zip");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(method);
    for (name, bytes) in entries {
        let full = format!("{}/{}", ROOT, name).replace('/', &separator.to_string());
        zip.start_file(full, options).expect("start zip entry");
        zip.write_all(bytes).expect("write zip entry");
    }
    zip.finish().expect("finish zip");
    (dir, path)
}

pub fn root_of(dir: &TempDir) -> PathBuf {
    dir.path().join(ROOT)
}


/// A minimal SpreadsheetML workbook with inline-string cells.
pub fn xlsx(sheets: &[Sheet<'_>]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    );
    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    let mut worksheets = Vec::new();

    for (index, (name, rows)) in sheets.iter().enumerate() {
        let n = index + 1;
        content_types.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
        workbook.push_str(&format!(
            r#"<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
            escape(name)
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        ));

        let mut sheet = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );
        for (r, row) in rows.iter().enumerate() {
            sheet.push_str(&format!(r#"<row r="{}">"#, r + 1));
            for (c, cell) in row.iter().enumerate() {
                let reference = format!("{}{}", (b'A' + c as u8) as char, r + 1);
                match cell {
                    Cell::Text(value) => sheet.push_str(&format!(
                        r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                        reference,
                        escape(value)
                    )),
                    Cell::Number(value) => {
                        sheet.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value))
                    }
                }
            }
            sheet.push_str("</row>");
        }
        sheet.push_str("</sheetData></worksheet>");
        worksheets.push((format!("xl/worksheets/sheet{n}.xml"), sheet));
    }

    content_types.push_str("</Types>");
    workbook.push_str("</sheets></workbook>");
    rels.push_str("</Relationships>");

    let package_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

    let mut parts: Vec<(String, String)> = vec![
        ("[Content_Types].xml".to_string(), content_types),
        ("_rels/.rels".to_string(), package_rels.to_string()),
        ("xl/workbook.xml".to_string(), workbook),
        ("xl/_rels/workbook.xml.rels".to_string(), rels),
    ];
    parts.extend(worksheets);

    for (name, body) in parts {
        zip.start_file(name, options).expect("start xlsx part");
        zip.write_all(body.as_bytes()).expect("write xlsx part");
    }
    zip.finish().expect("finish xlsx").into_inner()
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
