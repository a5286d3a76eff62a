//! Полный проход очистки: разбор, нормализация, удаление дубликатов.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    dedup::{CleanedSet, deduplicate},
    lines::{RawRow, RawTable, parse_lines},
    record::{Rejection, normalize},
};

/// Результат очистки сырого текста.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanOutcome {
    /// Очищенные записи в порядке первого появления.
    pub records: CleanedSet,
    /// Число сырых строк данных (без заголовка).
    pub count_before: usize,
    /// Число записей в очищенном наборе.
    pub count_after: usize,
    /// Сколько строк отклонено по каждой причине.
    pub rejected: BTreeMap<Rejection, usize>,
    /// Сколько корректных строк отброшено как дубликаты.
    pub duplicates: usize,
    /// Разобранная сырая таблица, как она была до валидации.
    #[serde(skip)]
    pub raw: RawTable,
}

impl CleanOutcome {
    /// Сколько строк было удалено в общей сложности.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.count_before - self.count_after
    }

    /// Первые `n` сырых строк (для предпросмотра исходных данных).
    #[must_use]
    pub fn raw_preview(&self, n: usize) -> &[RawRow] {
        self.raw.preview(n)
    }

    /// Сколько строк отклонено по указанной причине.
    #[must_use]
    pub fn rejected_for(&self, reason: Rejection) -> usize {
        self.rejected.get(&reason).copied().unwrap_or(0)
    }
}

/// Очищает сырой текст таблицы продаж.
///
/// Функция никогда не завершается ошибкой: некорректные строки просто
/// отбрасываются, а пустой текст или текст из одного заголовка даёт пустой
/// набор. Вызов не имеет состояния, каждый запуск независим.
///
/// # Пример
///
/// ```
/// use sales::{Rejection, clean};
///
/// let outcome = clean(
///     "fecha,producto,franja,familia,unidades,precio_unitario\n\
///      2024-03-01,Flan,Comida,postre,0,4\n\
///      31/02/2024,Flan,Comida,postre,1,4",
/// );
/// assert_eq!(outcome.count_before, 2);
/// assert_eq!(outcome.count_after, 0);
/// assert_eq!(outcome.rejected_for(Rejection::InvalidUnits), 1);
/// assert_eq!(outcome.rejected_for(Rejection::InvalidDate), 1);
/// ```
#[must_use]
pub fn clean(raw: &str) -> CleanOutcome {
    let table = parse_lines(raw);
    let count_before = table.rows.len();

    let mut rejected = BTreeMap::new();
    let valid: Vec<_> = table
        .rows
        .iter()
        .filter_map(|row| match normalize(row) {
            Ok(record) => Some(record),
            Err(reason) => {
                debug!(line = row.line(), reason = reason.as_str(), "rejecting row");
                *rejected.entry(reason).or_insert(0) += 1;
                None
            }
        })
        .collect();

    let valid_count = valid.len();
    let records = deduplicate(valid);
    let count_after = records.len();
    let duplicates = valid_count - count_after;

    info!(count_before, count_after, duplicates, "cleaned sales table");

    CleanOutcome { records, count_before, count_after, rejected, duplicates, raw: table }
}
