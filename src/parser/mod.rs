//! CSV reading with encoding and delimiter auto-detection.
//!
//! Produces a header row plus raw string cells. Nothing here knows about
//! entity types; validation and transformation happen downstream.

use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Parsed CSV content with detection metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCsv {
    /// Trimmed header names from the first row.
    pub columns: Vec<String>,
    /// Data rows, cells trimmed. Rows may be shorter or longer than the
    /// header; consumers zip positionally.
    pub rows: Vec<Vec<String>>,
    /// Detected or requested encoding.
    pub encoding: String,
    /// Detected or requested delimiter.
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding name.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.to_string()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        other => {
            let Some(codec) = encoding_rs::Encoding::for_label(other.as_bytes()) else {
                return Err(CsvError::Encoding(other.to_string()));
            };
            codec.decode(bytes).0.to_string()
        }
    };
    Ok(decoded)
}

/// Detect the delimiter by counting candidates in the first line.
///
/// Semicolon wins ties, matching the most common export format seen in
/// practice.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse a CSV file, detecting encoding and delimiter from its content.
pub fn parse_file(path: impl AsRef<Path>) -> CsvResult<ParsedCsv> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, None)
}

/// Parse a CSV file with a caller-supplied delimiter.
pub fn parse_file_with_delimiter(path: impl AsRef<Path>, delimiter: char) -> CsvResult<ParsedCsv> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, Some(delimiter))
}

/// Parse raw CSV bytes. Encoding is always detected; the delimiter is
/// detected unless one is supplied.
pub fn parse_bytes(bytes: &[u8], delimiter: Option<char>) -> CsvResult<ParsedCsv> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));
    parse_content(&content, delimiter, encoding)
}

/// Parse decoded CSV text with an explicit delimiter.
pub fn parse_content(content: &str, delimiter: char, encoding: String) -> CsvResult<ParsedCsv> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(CsvError::EmptyFile),
    };

    let mut columns: Vec<String> = header.iter().map(|c| c.trim().to_string()).collect();
    // Trailing separators in the header line produce phantom columns.
    while columns.last().is_some_and(String::is_empty) {
        columns.pop();
    }
    if columns.is_empty() {
        return Err(CsvError::NoHeaders);
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let cells: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        rows.push(cells);
    }

    Ok(ParsedCsv {
        columns,
        rows,
        encoding,
        delimiter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_simple_csv() {
        let result = parse_content("handle;name\ndefault;Default\nde;German", ';', "utf-8".into())
            .unwrap();

        assert_eq!(result.columns, vec!["handle", "name"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0], vec!["default", "Default"]);
        assert_eq!(result.rows[1], vec!["de", "German"]);
    }

    #[test]
    fn test_quoted_cells_with_delimiter_inside() {
        let result = parse_content(
            "handle,name\nblog,\"News, Updates\"",
            ',',
            "utf-8".into(),
        )
        .unwrap();

        assert_eq!(result.rows[0], vec!["blog", "News, Updates"]);
    }

    #[test]
    fn test_cells_and_headers_trimmed() {
        let result =
            parse_content(" handle ; name \n default ; Default Site ", ';', "utf-8".into())
                .unwrap();

        assert_eq!(result.columns, vec!["handle", "name"]);
        assert_eq!(result.rows[0], vec!["default", "Default Site"]);
    }

    #[test]
    fn test_blank_rows_skipped() {
        let result =
            parse_content("a;b\n1;2\n;\n\n3;4\n", ';', "utf-8".into()).unwrap();
        assert_eq!(result.rows.len(), 2);
    }

    #[test]
    fn test_trailing_phantom_headers_dropped() {
        let result = parse_content("handle;name;;\ndefault;Default;;", ';', "utf-8".into())
            .unwrap();
        assert_eq!(result.columns, vec!["handle", "name"]);
        // Cells are kept; consumers zip against the surviving columns.
        assert_eq!(result.rows[0].len(), 4);
    }

    #[test]
    fn test_ragged_rows_kept_as_is() {
        let result = parse_content("a;b;c\n1;2\n1;2;3;4", ';', "utf-8".into()).unwrap();
        assert_eq!(result.rows[0], vec!["1", "2"]);
        assert_eq!(result.rows[1], vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_empty_content_is_an_error() {
        assert!(matches!(
            parse_content("", ';', "utf-8".into()),
            Err(CsvError::EmptyFile)
        ));
        assert!(matches!(
            parse_content("   \n  ", ';', "utf-8".into()),
            Err(CsvError::EmptyFile)
        ));
    }

    #[test]
    fn test_detect_delimiter_candidates() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
        assert_eq!(detect_delimiter("a|b|c"), '|');
        // No candidate at all falls back to semicolon.
        assert_eq!(detect_delimiter("justonecolumn"), ';');
    }

    #[test]
    fn test_detect_encoding_utf8() {
        assert_eq!(detect_encoding("handle;name\na;b".as_bytes()), "utf-8");
    }

    #[test]
    fn test_latin1_bytes_decoded() {
        // "Société" in ISO-8859-1.
        let mut bytes = b"name\n".to_vec();
        bytes.extend([0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9]);

        let result = parse_bytes(&bytes, None).unwrap();
        assert_eq!(result.rows[0][0], "Société");
    }

    #[test]
    fn test_parse_bytes_detects_delimiter() {
        let result = parse_bytes(b"a,b\n1,2", None).unwrap();
        assert_eq!(result.delimiter, ',');

        let result = parse_bytes(b"a,b\n1,2", Some(';')).unwrap();
        assert_eq!(result.delimiter, ';');
        assert_eq!(result.columns, vec!["a,b"]);
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "handle;name\ndefault;Default Site").unwrap();

        let result = parse_file(file.path()).unwrap();
        assert_eq!(result.columns, vec!["handle", "name"]);
        assert_eq!(result.rows.len(), 1);
    }

    #[test]
    fn test_parse_missing_file() {
        assert!(matches!(
            parse_file("/nonexistent/input.csv"),
            Err(CsvError::Io(_))
        ));
    }
}
