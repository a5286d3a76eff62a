//! Удаление точных дубликатов.
//!
//! Две записи считаются дубликатами, только если совпадают все семь полей,
//! включая округлённую сумму. Числа сравниваются побитово.
//!
//! В ключ входит уже округлённая сумма, а не сырое произведение. Количество и
//! цена тоже входят в ключ, так что строки с разными ценами не схлопываются,
//! даже если их суммы совпали после округления. Строки, которые различаются
//! хотя бы на цент суммы, остаются обе.

use std::{collections::HashSet, ops::Deref};

use jiff::civil::Date;
use serde::Serialize;
use tracing::debug;

use crate::record::{Family, Record, TimeSlot};

/// Очищенный набор: записи без дубликатов в порядке первого появления.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CleanedSet(Vec<Record>);

impl CleanedSet {
    /// Возвращает записи как срез.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.0
    }

    /// Первые `n` записей (для предпросмотра).
    #[must_use]
    pub fn preview(&self, n: usize) -> &[Record] {
        &self.0[..n.min(self.0.len())]
    }

    /// Забирает записи.
    #[must_use]
    pub fn into_inner(self) -> Vec<Record> {
        self.0
    }
}

impl Deref for CleanedSet {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a CleanedSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for CleanedSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Каноничный ключ точного совпадения записи.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RecordKey {
    date: Date,
    product: String,
    time_slot: TimeSlot,
    family: Family,
    units: u64,
    unit_price: u64,
    amount: u64,
}

impl From<&Record> for RecordKey {
    fn from(record: &Record) -> Self {
        Self {
            date: record.date(),
            product: record.product().to_string(),
            time_slot: record.time_slot(),
            family: record.family(),
            units: record.units().to_bits(),
            unit_price: record.unit_price().to_bits(),
            amount: record.amount().to_bits(),
        }
    }
}

/// Удаляет точные дубликаты, оставляя первое вхождение.
///
/// # Пример
///
/// ```
/// use jiff::civil::date;
/// use sales::{Family, Record, TimeSlot, deduplicate};
///
/// let paella = Record::new(date(2024, 3, 1), "paella", TimeSlot::Lunch, Family::Main, 2.0, 12.5)
///     .unwrap();
/// let cleaned = deduplicate(vec![paella.clone(), paella]);
/// assert_eq!(cleaned.len(), 1);
/// ```
pub fn deduplicate<I>(records: I) -> CleanedSet
where
    I: IntoIterator<Item = Record>,
{
    let mut seen = HashSet::new();
    let kept = records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(RecordKey::from(record));
            if !fresh {
                debug!(product = record.product(), date = %record.date(), "dropping duplicate");
            }
            fresh
        })
        .collect();
    CleanedSet(kept)
}
