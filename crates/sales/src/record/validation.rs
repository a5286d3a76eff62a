//! Валидация и нормализация сырых строк.

use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};
use serde::Serialize;
use thiserror::Error;

use super::{Family, Record, TimeSlot, fields, types::normalize_product};
use crate::lines::RawRow;

/// Дополнительные форматы дат, которые не покрывает ISO 8601.
const FALLBACK_DATE_FORMATS: [&str; 2] = ["%Y/%m/%d", "%m/%d/%Y"];

/// Причина, по которой сырая строка не попала в очищенный набор.
///
/// Это отказ на уровне строки, а не ошибка процесса: строка просто
/// исключается, конвейер продолжает работу.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Error)]
pub enum Rejection {
    #[error("Некорректная или несуществующая дата")]
    InvalidDate,
    #[error("Отсутствует название продукта")]
    MissingProduct,
    #[error("Неизвестное семейство продукта")]
    UnknownFamily,
    #[error("Недопустимое количество (не число, ноль или отрицательное)")]
    InvalidUnits,
    #[error("Недопустимая цена (не число, ноль или отрицательная)")]
    InvalidPrice,
}

impl Rejection {
    /// Все причины отказа в порядке применения правил.
    pub const ALL: [Self; 5] = [
        Self::InvalidDate,
        Self::MissingProduct,
        Self::UnknownFamily,
        Self::InvalidUnits,
        Self::InvalidPrice,
    ];

    /// Короткое машинное имя причины (для логов и отчётов).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidDate => "invalid_date",
            Self::MissingProduct => "missing_product",
            Self::UnknownFamily => "unknown_family",
            Self::InvalidUnits => "invalid_units",
            Self::InvalidPrice => "invalid_price",
        }
    }
}

/// Превращает сырую строку в нормализованную [`Record`].
///
/// # Правила (по порядку, первый отказ прерывает проверку)
///
/// 1. `fecha`: разбирается как дата, время суток отбрасывается
/// 2. `producto`: обязателен, обрезается и приводится к нижнему регистру
/// 3. `franja`: `"desa"` даёт завтрак, всё остальное обед
/// 4. `familia`: распознаётся по маркеру, иначе отказ
/// 5. `unidades`: положительное число
/// 6. `precio_unitario`: положительное число
/// 7. `importe`: всегда пересчитывается, входное значение игнорируется
///
/// Входная строка не изменяется.
///
/// # Пример
///
/// ```
/// use sales::{Family, RawRow, Rejection, TimeSlot, normalize};
///
/// let row = RawRow::new(2, [
///     ("fecha", "2024-03-01"),
///     ("producto", " Paella "),
///     ("franja", "Comida"),
///     ("familia", "Principal"),
///     ("unidades", "2"),
///     ("precio_unitario", "12.5"),
///     ("importe", "999"),
/// ]);
///
/// let record = normalize(&row).unwrap();
/// assert_eq!(record.product(), "paella");
/// assert_eq!(record.family(), Family::Main);
/// assert_eq!(record.amount(), 25.0);
///
/// let broken = RawRow::new(3, [("fecha", "31/02/2024")]);
/// assert_eq!(normalize(&broken), Err(Rejection::InvalidDate));
/// ```
pub fn normalize(row: &RawRow) -> Result<Record, Rejection> {
    let date = row.get(fields::DATE).and_then(parse_date).ok_or(Rejection::InvalidDate)?;

    let product = normalize_product(row.get(fields::PRODUCT).unwrap_or_default())?;

    let time_slot = TimeSlot::classify(row.get(fields::TIME_SLOT));
    let family = Family::classify(row.get(fields::FAMILY))?;

    let units = coerce_number(row.get(fields::UNITS));
    let unit_price = coerce_number(row.get(fields::UNIT_PRICE));

    Record::new(date, product, time_slot, family, units, unit_price)
}

/// Разбирает дату в одном из поддерживаемых форматов.
///
/// Поддерживаются:
/// - метки времени RFC 3339 со смещением (дата берётся в UTC)
/// - дата со временем без смещения (`2024-03-01T10:30`, `2024-03-01 10:30:00`)
/// - `YYYY-MM-DD`, `YYYY/MM/DD` и `MM/DD/YYYY`
///
/// Несуществующие даты календаря отклоняются.
///
/// # Пример
/// ```
/// use jiff::civil::date;
/// use sales::record::parse_date;
///
/// assert_eq!(parse_date("2024-03-01"), Some(date(2024, 3, 1)));
/// assert_eq!(parse_date("2024-03-01T23:30:00-02:00"), Some(date(2024, 3, 2)));
/// assert_eq!(parse_date("2024-02-30"), None);
/// ```
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Some(timestamp.to_zoned(TimeZone::UTC).date());
    }
    if let Ok(datetime) = raw.parse::<DateTime>() {
        return Some(datetime.date());
    }
    if let Ok(date) = raw.parse::<Date>() {
        return Some(date);
    }

    FALLBACK_DATE_FORMATS.iter().find_map(|format| Date::strptime(format, raw).ok())
}

/// Приводит сырое значение к числу.
///
/// Отсутствующее значение даёт NaN, пустое даёт ноль. Оба варианта затем
/// отклоняются проверкой на положительность.
fn coerce_number(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.map(str::trim) else {
        return f64::NAN;
    };
    if raw.is_empty() {
        return 0.0;
    }
    raw.parse().unwrap_or(f64::NAN)
}
