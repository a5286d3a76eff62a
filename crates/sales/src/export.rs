//! CSV export of a cleaned record set.
//!
//! Renders records back into the same line-oriented format the line parser
//! reads, so an exported file can be cleaned again with identical results.
//!
//! # Format
//!
//! ```csv
//! fecha,producto,franja,familia,unidades,precio_unitario,importe
//! 2024-03-01,paella,Comida,Principal,2,12.5,25
//! ```
//!
//! Values are never quoted. A product name containing a comma is written as
//! is and will not survive a round trip, mirroring the parser's limitation.
//!
//! # Streaming Example
//!
//! ```ignore
//! use sales::export::RecordWriter;
//! use std::fs::File;
//!
//! let mut writer = RecordWriter::new(File::create("ventas_clean.csv")?);
//! writer.write_header()?;
//! writer.write_all(&outcome.records)?;
//! writer.flush()?;
//! ```

use std::io::Write;

use crate::{
    error::{ExportError, ExportResult},
    record::{Record, fields},
};

/// Column names of the export, in output order.
pub const HEADER: [&str; 7] = [
    fields::DATE,
    fields::PRODUCT,
    fields::TIME_SLOT,
    fields::FAMILY,
    fields::UNITS,
    fields::UNIT_PRICE,
    fields::AMOUNT,
];

/// Streaming writer for cleaned records.
///
/// Wraps a [`csv::Writer`] configured to never quote, with `\n` line endings.
/// Output is buffered; call [`flush`](Self::flush) or
/// [`into_inner`](Self::into_inner) when done.
pub struct RecordWriter<W: Write> {
    inner: ::csv::Writer<W>,
    /// Number of records written so far.
    records_written: usize,
    /// Whether the header line has been written.
    header_written: bool,
}

impl<W: Write> RecordWriter<W> {
    /// Creates a new writer.
    pub fn new(writer: W) -> Self {
        let inner = ::csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(::csv::QuoteStyle::Never)
            .terminator(::csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        Self { inner, records_written: 0, header_written: false }
    }

    /// Writes the header line. Only the first call has an effect.
    pub fn write_header(&mut self) -> ExportResult<()> {
        if !self.header_written {
            self.inner.write_record(HEADER)?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Writes a single record.
    pub fn write(&mut self, record: &Record) -> ExportResult<()> {
        self.inner.write_record(record.to_fields())?;
        self.records_written += 1;
        Ok(())
    }

    /// Writes several records.
    pub fn write_all(&mut self, records: &[Record]) -> ExportResult<()> {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Flushes buffered output to the underlying writer.
    pub fn flush(&mut self) -> ExportResult<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Returns the number of records written.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> ExportResult<W> {
        self.inner.into_inner().map_err(|e| ExportError::Io(e.into_error()))
    }
}

/// Writes a header plus every record, returning how many records were written.
///
/// An empty set still produces the header line.
pub fn write_csv<W: Write>(writer: W, records: &[Record]) -> ExportResult<usize> {
    let mut writer = RecordWriter::new(writer);
    writer.write_header()?;
    writer.write_all(records)?;
    writer.flush()?;
    Ok(writer.records_written())
}

/// Renders records as CSV text (header included, one line per record).
///
/// # Example
///
/// ```
/// use sales::{clean, export};
///
/// let outcome = clean(
///     "fecha,producto,familia,unidades,precio_unitario\n\
///      2024-03-01,Flan,Postre,2,4",
/// );
/// let text = export::to_string(&outcome.records).unwrap();
/// assert_eq!(
///     text,
///     "fecha,producto,franja,familia,unidades,precio_unitario,importe\n\
///      2024-03-01,flan,Comida,Postre,2,4,8\n"
/// );
/// ```
pub fn to_string(records: &[Record]) -> ExportResult<String> {
    let mut writer = RecordWriter::new(Vec::new());
    writer.write_header()?;
    writer.write_all(records)?;
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}
