//! Основные типы нормализованной записи продаж.

use std::fmt;

use jiff::civil::Date;
use serde::Serialize;

use super::Rejection;

/// Имена полей входного и выходного CSV.
pub mod fields {
    /// Дата продажи.
    pub const DATE: &str = "fecha";
    /// Название продукта.
    pub const PRODUCT: &str = "producto";
    /// Смена (завтрак или обед).
    pub const TIME_SLOT: &str = "franja";
    /// Семейство продукта.
    pub const FAMILY: &str = "familia";
    /// Количество единиц.
    pub const UNITS: &str = "unidades";
    /// Цена за единицу.
    pub const UNIT_PRICE: &str = "precio_unitario";
    /// Сумма строки. Во входных данных игнорируется и всегда пересчитывается.
    pub const AMOUNT: &str = "importe";
}

/// Смена, в которую была совершена продажа.
///
/// Классификация бинарная: всё, что не помечено как завтрак, считается обедом.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TimeSlot {
    /// Завтрак. Сырое значение содержит маркер `"desa"`.
    #[serde(rename = "Desayuno")]
    Breakfast,
    /// Обед. Значение по умолчанию для любых других сырых значений.
    #[serde(rename = "Comida")]
    Lunch,
}

impl TimeSlot {
    /// Подстрока, по которой сырое значение распознаётся как завтрак.
    pub const BREAKFAST_MARKER: &'static str = "desa";

    /// Классифицирует сырое значение смены.
    ///
    /// Отказа здесь не бывает: пустое, отсутствующее или бессмысленное
    /// значение молча превращается в [`TimeSlot::Lunch`]. Мусор во входных
    /// данных поглощается обедом.
    ///
    /// # Пример
    /// ```
    /// use sales::TimeSlot;
    /// assert_eq!(TimeSlot::classify(Some("DESAYUNO")), TimeSlot::Breakfast);
    /// assert_eq!(TimeSlot::classify(Some("cena")), TimeSlot::Lunch);
    /// assert_eq!(TimeSlot::classify(None), TimeSlot::Lunch);
    /// ```
    #[must_use]
    pub fn classify(raw: Option<&str>) -> Self {
        let raw = raw.unwrap_or_default().to_lowercase();
        if raw.contains(Self::BREAKFAST_MARKER) { Self::Breakfast } else { Self::DEFAULT }
    }

    /// Смена, которую получает любое значение без маркера завтрака.
    pub const DEFAULT: Self = Self::Lunch;

    /// Возвращает метку смены в выходном формате.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "Desayuno",
            Self::Lunch => "Comida",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Семейство продукта.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Family {
    /// Напитки.
    #[serde(rename = "Bebida")]
    Drink,
    /// Закуски.
    #[serde(rename = "Entrante")]
    Starter,
    /// Основные блюда.
    #[serde(rename = "Principal")]
    Main,
    /// Десерты.
    #[serde(rename = "Postre")]
    Dessert,
}

impl Family {
    /// Маркеры семейств в порядке проверки.
    const MARKERS: [(&'static str, Self); 4] =
        [("beb", Self::Drink), ("entra", Self::Starter), ("prin", Self::Main), ("post", Self::Dessert)];

    /// Распознаёт семейство по подстроке в сыром значении.
    ///
    /// Маркеры проверяются по порядку: `beb`, `entra`, `prin`, `post`.
    /// Если ни один не найден, возвращается [`Rejection::UnknownFamily`].
    ///
    /// # Пример
    /// ```
    /// use sales::{Family, Rejection};
    /// assert_eq!(Family::classify(Some("Bebidas frías")), Ok(Family::Drink));
    /// assert_eq!(Family::classify(Some("POSTRE")), Ok(Family::Dessert));
    /// assert_eq!(Family::classify(Some("guarnición")), Err(Rejection::UnknownFamily));
    /// ```
    pub fn classify(raw: Option<&str>) -> Result<Self, Rejection> {
        let raw = raw.unwrap_or_default().to_lowercase();
        Self::MARKERS
            .iter()
            .find(|(marker, _)| raw.contains(*marker))
            .map(|&(_, family)| family)
            .ok_or(Rejection::UnknownFamily)
    }

    /// Возвращает метку семейства в выходном формате.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Drink => "Bebida",
            Self::Starter => "Entrante",
            Self::Main => "Principal",
            Self::Dessert => "Postre",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Наибольшая допустимая сумма строки.
///
/// Выше этой границы сумма в центах перестаёт точно представляться в `f64`.
pub const MAX_AMOUNT: f64 = 1e13;

/// Обрезает и приводит название продукта к нижнему регистру.
///
/// Пустое после обрезки название даёт [`Rejection::MissingProduct`].
pub(super) fn normalize_product(raw: &str) -> Result<String, Rejection> {
    let product = raw.trim();
    if product.is_empty() {
        return Err(Rejection::MissingProduct);
    }
    Ok(product.to_lowercase())
}

/// Округляет денежную сумму до двух знаков (половина округляется от нуля).
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Нормализованная строка продаж.
///
/// Создаётся только через [`Record::new`] или
/// [`normalize`](crate::record::normalize) и после этого не изменяется.
/// Поле `amount` всегда вычисляется из `units * unit_price`.
///
/// # Пример
///
/// ```
/// use jiff::civil::date;
/// use sales::{Family, Record, TimeSlot};
///
/// let record =
///     Record::new(date(2024, 3, 1), "paella", TimeSlot::Lunch, Family::Main, 2.0, 12.5).unwrap();
/// assert_eq!(record.amount(), 25.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "fecha")]
    date: Date,
    #[serde(rename = "producto")]
    product: String,
    #[serde(rename = "franja")]
    time_slot: TimeSlot,
    #[serde(rename = "familia")]
    family: Family,
    #[serde(rename = "unidades")]
    units: f64,
    #[serde(rename = "precio_unitario")]
    unit_price: f64,
    #[serde(rename = "importe")]
    amount: f64,
}

impl Record {
    /// Собирает запись, проверяя инварианты и вычисляя сумму.
    ///
    /// Название продукта обрезается и приводится к нижнему регистру, пустое
    /// отклоняется. Количество и цена должны быть конечными и положительными,
    /// а сумма не больше [`MAX_AMOUNT`] (иначе [`Rejection::InvalidPrice`]).
    pub fn new(
        date: Date,
        product: impl Into<String>,
        time_slot: TimeSlot,
        family: Family,
        units: f64,
        unit_price: f64,
    ) -> Result<Self, Rejection> {
        let product = normalize_product(&product.into())?;
        if !is_positive(units) {
            return Err(Rejection::InvalidUnits);
        }
        if !is_positive(unit_price) {
            return Err(Rejection::InvalidPrice);
        }

        let amount = round_cents(units * unit_price);
        if amount > MAX_AMOUNT {
            return Err(Rejection::InvalidPrice);
        }
        Ok(Self { date, product, time_slot, family, units, unit_price, amount })
    }

    /// Дата продажи без времени.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Название продукта в нижнем регистре.
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    #[must_use]
    pub fn time_slot(&self) -> TimeSlot {
        self.time_slot
    }

    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    #[must_use]
    pub fn units(&self) -> f64 {
        self.units
    }

    #[must_use]
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// Сумма строки, округлённая до двух знаков.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Сумма строки в центах. Точна, потому что `amount` уже округлена и не
    /// превышает [`MAX_AMOUNT`].
    #[must_use]
    pub fn amount_cents(&self) -> i64 {
        (self.amount * 100.0).round() as i64
    }

    /// Значения полей в порядке [`export::HEADER`](crate::export::HEADER).
    ///
    /// Даты выводятся как `YYYY-MM-DD`, числа в обычной десятичной записи
    /// без лишних нулей (`25`, `12.5`).
    #[must_use]
    pub fn to_fields(&self) -> [String; 7] {
        [
            self.date.to_string(),
            self.product.clone(),
            self.time_slot.as_str().to_string(),
            self.family.as_str().to_string(),
            self.units.to_string(),
            self.unit_price.to_string(),
            self.amount.to_string(),
        ]
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn make_record(units: f64, unit_price: f64) -> Result<Record, Rejection> {
        Record::new(date(2024, 3, 1), "paella", TimeSlot::Lunch, Family::Main, units, unit_price)
    }

    // ==================== Классификация смены ====================

    #[test]
    fn breakfast_marker_anywhere() {
        assert_eq!(TimeSlot::classify(Some("Desayuno")), TimeSlot::Breakfast);
        assert_eq!(TimeSlot::classify(Some("turno desayunos")), TimeSlot::Breakfast);
    }

    #[test]
    fn anything_else_is_lunch() {
        assert_eq!(TimeSlot::classify(Some("Comida")), TimeSlot::Lunch);
        assert_eq!(TimeSlot::classify(Some("???")), TimeSlot::Lunch);
        assert_eq!(TimeSlot::classify(Some("")), TimeSlot::Lunch);
        assert_eq!(TimeSlot::classify(None), TimeSlot::Lunch);
    }

    // ==================== Классификация семейства ====================

    #[test]
    fn family_markers() {
        assert_eq!(Family::classify(Some("Bebida")), Ok(Family::Drink));
        assert_eq!(Family::classify(Some("ENTRANTES")), Ok(Family::Starter));
        assert_eq!(Family::classify(Some("Plato principal")), Ok(Family::Main));
        assert_eq!(Family::classify(Some("postres")), Ok(Family::Dessert));
    }

    #[test]
    fn family_markers_checked_in_order() {
        // Содержит и "beb", и "post", побеждает первый маркер.
        assert_eq!(Family::classify(Some("bebida postre")), Ok(Family::Drink));
        assert_eq!(Family::classify(Some("principal entrante")), Ok(Family::Starter));
    }

    #[test]
    fn unknown_family_rejected() {
        assert_eq!(Family::classify(Some("Guarnición")), Err(Rejection::UnknownFamily));
        assert_eq!(Family::classify(Some("")), Err(Rejection::UnknownFamily));
        assert_eq!(Family::classify(None), Err(Rejection::UnknownFamily));
    }

    #[test]
    fn labels_are_recognized_again() {
        for family in [Family::Drink, Family::Starter, Family::Main, Family::Dessert] {
            assert_eq!(Family::classify(Some(family.as_str())), Ok(family));
        }
        for slot in [TimeSlot::Breakfast, TimeSlot::Lunch] {
            assert_eq!(TimeSlot::classify(Some(slot.as_str())), slot);
        }
    }

    // ==================== Инварианты записи ====================

    #[test]
    fn amount_is_rounded_product() {
        let record = make_record(3.0, 1.2).unwrap();
        // 3 * 1.2 = 3.5999999999999996
        assert_eq!(record.amount(), 3.6);
        assert_eq!(record.amount_cents(), 360);
    }

    #[test]
    fn amount_rounds_half_away_from_zero() {
        assert_eq!(round_cents(0.125), 0.13);
        assert_eq!(round_cents(2.0), 2.0);
    }

    #[test]
    fn non_positive_units_rejected() {
        assert_eq!(make_record(0.0, 1.0), Err(Rejection::InvalidUnits));
        assert_eq!(make_record(-1.0, 1.0), Err(Rejection::InvalidUnits));
        assert_eq!(make_record(f64::NAN, 1.0), Err(Rejection::InvalidUnits));
    }

    #[test]
    fn non_positive_price_rejected() {
        assert_eq!(make_record(1.0, 0.0), Err(Rejection::InvalidPrice));
        assert_eq!(make_record(1.0, f64::INFINITY), Err(Rejection::InvalidPrice));
    }

    #[test]
    fn empty_product_rejected() {
        let result = Record::new(date(2024, 3, 1), "", TimeSlot::Lunch, Family::Main, 1.0, 1.0);
        assert_eq!(result, Err(Rejection::MissingProduct));
    }

    #[test]
    fn product_is_trimmed_and_lowercased() {
        let record =
            Record::new(date(2024, 3, 1), " PAELLA ", TimeSlot::Lunch, Family::Main, 1.0, 1.0)
                .unwrap();
        assert_eq!(record.product(), "paella");

        let blank = Record::new(date(2024, 3, 1), "   ", TimeSlot::Lunch, Family::Main, 1.0, 1.0);
        assert_eq!(blank, Err(Rejection::MissingProduct));
    }

    #[test]
    fn oversized_amount_rejected() {
        assert_eq!(make_record(1e9, 1e9), Err(Rejection::InvalidPrice));
        assert_eq!(make_record(f64::MAX, 2.0), Err(Rejection::InvalidPrice));

        let largest = make_record(1.0, MAX_AMOUNT).unwrap();
        assert_eq!(largest.amount_cents(), 1_000_000_000_000_000);
    }

    #[test]
    fn fields_use_plain_decimal_notation() {
        let record = make_record(2.0, 12.5).unwrap();
        assert_eq!(
            record.to_fields(),
            ["2024-03-01", "paella", "Comida", "Principal", "2", "12.5", "25"].map(String::from)
        );
    }
}
