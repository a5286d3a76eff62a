//! Модель нормализованной записи продаж.
//!
//! Этот модуль определяет [`Record`] и связанные перечисления, а также
//! правила, по которым сырая строка превращается в запись или отклоняется.

mod types;
mod validation;

pub use types::{Family, MAX_AMOUNT, Record, TimeSlot, fields, round_cents};
pub use validation::{Rejection, normalize, parse_date};
