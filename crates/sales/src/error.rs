//! Ошибки выгрузки очищенного набора.
//!
//! Отказы по отдельным строкам описаны в [`Rejection`](crate::record::Rejection)
//! и никогда не прерывают конвейер. Здесь собраны только ошибки записи, которые
//! могут возникнуть у сериализатора при работе с внешним [`Write`](std::io::Write).

use thiserror::Error;

/// Ошибка записи очищенных записей в CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Ошибка ввода/вывода.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка CSV-писателя.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Итоговый буфер не является корректной UTF-8 строкой.
    #[error("Invalid UTF-8 in export: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Удобный alias для Result с [`ExportError`].
pub type ExportResult<T> = Result<T, ExportError>;
