//! Библиотека очистки и агрегации таблицы продаж.
//!
//! Крейт принимает сырой текст в формате CSV (заголовок + строки через запятую)
//! и проводит его через конвейер:
//!
//! - **[`lines`]**: разбиение текста на заголовок и сырые строки [`RawRow`]
//! - **[`record`]**: валидация и нормализация строки в [`Record`]
//! - **[`dedup`]**: удаление точных дубликатов с сохранением порядка
//! - **[`aggregate`]**: итоги и группировки по продукту, смене и семейству
//! - **[`export`]**: обратная сериализация очищенного набора в CSV
//!
//! Ядро не выполняет I/O: загрузка исходного файла, отрисовка отчёта и
//! сохранение выгрузки остаются на стороне вызывающего кода.
//!
//! # Быстрый старт
//!
//! ```
//! use sales::prelude::*;
//!
//! let raw = "fecha,producto,franja,familia,unidades,precio_unitario\n\
//!            2024-03-01,Paella,Comida,Principal,2,12.5\n\
//!            2024-03-01,paella, comida ,principal,2,12.5";
//!
//! let outcome = clean(raw);
//! assert_eq!(outcome.count_before, 2);
//! assert_eq!(outcome.count_after, 1);
//!
//! let totals = aggregate(&outcome.records);
//! assert_eq!(totals.total_revenue, 25.0);
//! assert_eq!(totals.by_family.get(&Family::Main), Some(25.0));
//! ```

pub mod aggregate;
pub mod dedup;
pub mod error;
pub mod export;
pub mod lines;
pub mod pipeline;
pub mod record;

pub use aggregate::{Aggregates, Breakdown, aggregate, aggregate_with_top};
pub use dedup::{CleanedSet, deduplicate};
pub use lines::{RawRow, RawTable, parse_lines};
pub use pipeline::{CleanOutcome, clean};
pub use record::{Family, Record, Rejection, TimeSlot, normalize};

/// Реэкспорт всего, что нужно типичному потребителю конвейера.
pub mod prelude {
    pub use crate::{
        aggregate::{Aggregates, Breakdown, DEFAULT_TOP_N, aggregate, aggregate_with_top},
        dedup::CleanedSet,
        error::{ExportError, ExportResult},
        export::RecordWriter,
        pipeline::{CleanOutcome, clean},
        record::{Family, Record, Rejection, TimeSlot},
    };
}
