pub mod error;

pub use error::{ParseError, ParseErrorKind};

use serde_json::{Map, Value};

use crate::CardDocument;
use crate::element::json_kind;

/// Parser entry point.
pub struct Parser<'a> {
    source: &'a str,
    file_id: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Parse the raw card text into a [`CardDocument`].
    ///
    /// Only the JSON syntax and the top-level shape are checked here.
    pub fn parse(&self) -> Result<CardDocument, ParseError> {
        let value: Value = serde_json::from_str(self.source).map_err(|e| {
            let offset = line_column_to_offset(self.source, e.line(), e.column());
            ParseError::syntax(format!("malformed card document: {}", e), offset..offset, self.file_id)
        })?;

        let mut root = match value {
            Value::Object(map) => map,
            other => {
                return Err(ParseError::not_an_object(
                    json_kind(&other),
                    0..self.source.trim_end().len(),
                    self.file_id,
                ));
            }
        };

        Ok(CardDocument {
            config: take_present(&mut root, "config"),
            header: take_present(&mut root, "header"),
            elements: take_present(&mut root, "elements"),
            source_id: self.file_id,
        })
    }
}

/// Remove `key` from the map, treating `null` the same as a missing key.
fn take_present(map: &mut Map<String, Value>, key: &str) -> Option<Value> {
    map.remove(key).filter(|v| !v.is_null())
}

/// Convert serde_json's 1-based line/column into a byte offset in `source`.
/// serde_json reports line 0 for errors with no position (e.g. I/O).
fn line_column_to_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return source.len();
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}
