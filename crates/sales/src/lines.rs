//! Line parser for the raw sales table.
//!
//! Splits raw text into a header row and a sequence of [`RawRow`]s, each
//! mapping a header name to the trimmed value found at the same position.
//!
//! # Format
//!
//! ```csv
//! fecha,producto,franja,familia,unidades,precio_unitario,importe
//! 2024-03-01,Paella,Comida,Principal,2,12.5,25
//! ```
//!
//! # Limitations
//!
//! Fields are split on every comma. Quotes are ordinary characters, so a value
//! with an embedded comma is split in two. The export path has the same
//! limitation.

use std::collections::HashMap;

use tracing::trace;

/// Unvalidated field values of one input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    line: u64,
    fields: HashMap<String, String>,
}

impl RawRow {
    /// Builds a row from `(name, value)` pairs. Later duplicates of a name win.
    ///
    /// # Example
    ///
    /// ```
    /// use sales::RawRow;
    ///
    /// let row = RawRow::new(2, [("producto", "Paella"), ("unidades", "2")]);
    /// assert_eq!(row.get("producto"), Some("Paella"));
    /// assert_eq!(row.get("familia"), None);
    /// ```
    pub fn new<I, K, V>(line: u64, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { line, fields: fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Returns the value stored under `name`, if the line had one.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// 1-based line number in the trimmed source text.
    #[must_use]
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Number of fields present in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Header plus data rows of a parsed table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Trimmed header names in their original order.
    pub headers: Vec<String>,
    /// One entry per data line, blank interior lines included.
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// First `n` data rows.
    #[must_use]
    pub fn preview(&self, n: usize) -> &[RawRow] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// Parses raw text into a [`RawTable`].
///
/// The whole text is trimmed first, so leading and trailing blank lines
/// vanish. The first remaining line is the header; every later line becomes a
/// [`RawRow`], including an empty one in the middle of the table (its first
/// field is then empty and the row fails validation). A line shorter than the
/// header leaves the trailing names absent, a longer one has its extra values
/// ignored. Empty or header-only input yields no rows.
///
/// # Example
///
/// ```
/// use sales::parse_lines;
///
/// let table = parse_lines("fecha, producto\n2024-03-01 , Paella\n\n2024-03-02\n\n");
/// assert_eq!(table.headers, vec!["fecha", "producto"]);
/// assert_eq!(table.rows.len(), 3);
/// assert_eq!(table.rows[0].get("producto"), Some("Paella"));
/// assert_eq!(table.rows[1].get("fecha"), Some(""));
/// assert_eq!(table.rows[2].get("producto"), None);
/// ```
pub fn parse_lines(text: &str) -> RawTable {
    let mut lines = text.trim().lines();
    let Some(header) = lines.next() else {
        return RawTable::default();
    };

    let headers: Vec<String> = split_fields(header).map(str::to_string).collect();
    let rows: Vec<RawRow> = lines
        .enumerate()
        .map(|(idx, line)| {
            let fields = headers.iter().cloned().zip(split_fields(line).map(str::to_string));
            // header is line 1
            RawRow::new(idx as u64 + 2, fields)
        })
        .collect();

    trace!(columns = headers.len(), rows = rows.len(), "parsed raw table");
    RawTable { headers, rows }
}

/// Splits one line on every comma and trims each value.
fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim)
}
