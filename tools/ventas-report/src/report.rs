//! Report rendering for a cleaned sales table.
//!
//! The report only reads what the `sales` crate returns. It never re-derives
//! cleaning rules or touches raw rows.

use std::{collections::BTreeMap, fmt};

use sales::{export::HEADER, prelude::*};
use serde::Serialize;

/// Everything shown to the user after a run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub count_before: usize,
    pub count_after: usize,
    pub duplicates: usize,
    /// Rejected rows per reason, keyed by the short reason name.
    pub rejected: BTreeMap<&'static str, usize>,
    pub totals: &'a Aggregates,
    /// Header of the raw table.
    pub raw_headers: &'a [String],
    /// First raw rows as values in header order, empty unless a preview was requested.
    pub raw_preview: Vec<Vec<&'a str>>,
    /// First cleaned records, empty unless a preview was requested.
    pub preview: &'a [Record],
}

impl<'a> Report<'a> {
    /// Collects the report from a cleaning outcome and its aggregates.
    pub fn new(outcome: &'a CleanOutcome, totals: &'a Aggregates, preview: usize) -> Self {
        Self {
            count_before: outcome.count_before,
            count_after: outcome.count_after,
            duplicates: outcome.duplicates,
            rejected: outcome
                .rejected
                .iter()
                .map(|(reason, count)| (reason.as_str(), *count))
                .collect(),
            totals,
            raw_headers: &outcome.raw.headers,
            raw_preview: outcome
                .raw_preview(preview)
                .iter()
                .map(|row| {
                    outcome.raw.headers.iter().map(|name| row.get(name).unwrap_or("")).collect()
                })
                .collect(),
            preview: outcome.records.preview(preview),
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Rows before cleaning: {} | Rows after cleaning: {}",
            self.count_before, self.count_after
        )?;
        if self.count_before > self.count_after {
            write!(f, "Removed: duplicates={}", self.duplicates)?;
            for (reason, count) in &self.rejected {
                write!(f, ", {reason}={count}")?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(f, "Total sales: € {:.2}", self.totals.total_revenue)?;
        writeln!(f, "Total units: {}", self.totals.total_units)?;

        write_section(
            f,
            "Top products",
            self.totals.top_products.iter().map(|(name, amount)| (name.as_str(), *amount)),
        )?;
        write_section(
            f,
            "Sales by time slot",
            self.totals.by_time_slot.iter().map(|(slot, amount)| (slot.as_str(), amount)),
        )?;
        write_section(
            f,
            "Sales by family",
            self.totals.by_family.iter().map(|(family, amount)| (family.as_str(), amount)),
        )?;

        if !self.raw_preview.is_empty() {
            writeln!(f)?;
            writeln!(f, "Raw preview:")?;
            writeln!(f, "{}", self.raw_headers.join(","))?;
            for values in &self.raw_preview {
                writeln!(f, "{}", values.join(","))?;
            }
        }

        if !self.preview.is_empty() {
            writeln!(f)?;
            writeln!(f, "Cleaned preview:")?;
            writeln!(f, "{}", HEADER.join(","))?;
            for record in self.preview {
                writeln!(f, "{}", record.to_fields().join(","))?;
            }
        }
        Ok(())
    }
}

/// Writes a titled two-column table of labels and amounts.
fn write_section<'a>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    rows: impl Iterator<Item = (&'a str, f64)>,
) -> fmt::Result {
    let rows: Vec<_> = rows.collect();
    writeln!(f)?;
    writeln!(f, "{title}:")?;
    if rows.is_empty() {
        return writeln!(f, "  (none)");
    }

    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    for (label, amount) in rows {
        writeln!(f, "  {label:<width$}  {amount:>10.2}")?;
    }
    Ok(())
}
