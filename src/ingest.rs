//! CSV text to string-keyed records.
//!
//! Records are single-line: the text is split on newlines first and each
//! line is tokenized on its own, so a quoted field can hold commas but never
//! a line break. Blank lines are skipped and never become empty records.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::IngestError;

/// One data row keyed by header name.
///
/// A row shorter than the header simply lacks the trailing keys; callers
/// treat an absent field the same as an invalid one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parse quote-aware CSV text: commas inside `"..."` do not split fields.
pub fn parse_csv(text: &str) -> Result<Vec<RawRecord>, IngestError> {
    parse_lines(text, true)
}

/// Parse CSV text with a plain comma split; double quotes are removed from
/// every field and never group commas.
pub fn parse_flat_csv(text: &str) -> Result<Vec<RawRecord>, IngestError> {
    parse_lines(text, false)
}

fn parse_lines(text: &str, quoting: bool) -> Result<Vec<RawRecord>, IngestError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_idx, header_line) = lines.next().ok_or(IngestError::MissingHeader)?;
    let headers = split_line(header_line, header_idx + 1, quoting)?;

    let mut records: Vec<RawRecord> = Vec::new();
    for (idx, line) in lines {
        let fields = split_line(line, idx + 1, quoting)?;
        records.push(
            headers
                .iter()
                .zip(fields.iter())
                .map(|(h, v)| (h.as_str(), v.as_str()))
                .collect(),
        );
    }
    Ok(records)
}

/// Tokenize one line into cleaned fields.
fn split_line(line: &str, line_no: usize, quoting: bool) -> Result<Vec<String>, IngestError> {
    if quoting {
        return Ok(split_quoted(line));
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    rdr.read_record(&mut record)
        .map_err(|source| IngestError::Csv {
            line: line_no,
            source,
        })?;

    Ok(record
        .iter()
        .map(|f| f.replace('"', "").trim().to_string())
        .collect())
}

/// Character scan: every `"` toggles the in-quotes state and is dropped,
/// and only commas outside quotes split. Quotes may open anywhere in a
/// field, and a doubled `""` simply closes and reopens.
fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields.iter().map(|f| f.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_inside_quotes_do_not_split() {
        let records = parse_csv("a,\"b,c\",d\n1,\"2,3\",4").unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.get("a"), Some("1"));
        assert_eq!(r.get("b,c"), Some("2,3"));
        assert_eq!(r.get("d"), Some("4"));
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "x,y\n\n1,2\n   \n3,4\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("x"), Some("3"));
    }

    #[test]
    fn short_rows_leave_trailing_fields_absent() {
        let records = parse_csv("a,b,c\n1,2").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("b"), Some("2"));
        assert_eq!(records[0].get("c"), None);
    }

    #[test]
    fn fields_are_trimmed_and_windows_newlines_handled() {
        let records = parse_csv("name , value\r\n  Chile , \"55.1\" \r\n").unwrap();
        assert_eq!(records[0].get("name"), Some("Chile"));
        assert_eq!(records[0].get("value"), Some("55.1"));
    }

    #[test]
    fn quoted_field_never_spans_lines() {
        let records = parse_csv("a,b\n\"open,1\n2,3").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("a"), Some("2"));
    }

    #[test]
    fn quote_after_leading_space_still_groups() {
        let records = parse_csv("a,b\n1, \"2,3\"").unwrap();
        assert_eq!(records[0].get("a"), Some("1"));
        assert_eq!(records[0].get("b"), Some("2,3"));
    }

    #[test]
    fn quote_inside_a_field_groups_commas() {
        let records = parse_csv("a,b\nx\"y,z\",w").unwrap();
        assert_eq!(records[0].get("a"), Some("xy,z"));
        assert_eq!(records[0].get("b"), Some("w"));
    }

    #[test]
    fn doubled_quotes_are_dropped() {
        let records = parse_csv("a,b\n\"say \"\"hi\"\", ok\",2").unwrap();
        assert_eq!(records[0].get("a"), Some("say hi, ok"));
        assert_eq!(records[0].get("b"), Some("2"));
    }

    #[test]
    fn flat_parse_splits_every_comma() {
        let records = parse_flat_csv("Pais,Monto\n\"Chile\",\"1,2\"").unwrap();
        assert_eq!(records[0].get("Pais"), Some("Chile"));
        assert_eq!(records[0].get("Monto"), Some("1"));
    }

    #[test]
    fn empty_text_has_no_header() {
        assert!(matches!(parse_csv(" \n\n"), Err(IngestError::MissingHeader)));
    }
}
