//! Итоги и группировки по очищенному набору.
//!
//! Агрегаты не хранятся: каждый вызов [`aggregate`] заново проходит по записям.
//! Суммы копятся в целых центах, поэтому итог по выручке в точности равен сумме
//! любой из трёх группировок. Центы копятся в `i128`, так что переполнение
//! недостижимо при любом числе записей с суммой не больше
//! [`MAX_AMOUNT`](crate::record::MAX_AMOUNT).

use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::record::{Family, Record, TimeSlot};

/// Сколько продуктов попадает в топ по умолчанию.
pub const DEFAULT_TOP_N: usize = 5;

/// Суммы по категориям в порядке первого появления категории.
#[derive(Debug, Clone)]
pub struct Breakdown<K> {
    entries: Vec<(K, i128)>,
    index: HashMap<K, usize>,
}

impl<K: PartialEq> PartialEq for Breakdown<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq> Eq for Breakdown<K> {}

impl<K> Default for Breakdown<K> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }
}

impl<K: Clone + Eq + Hash> Breakdown<K> {
    fn add(&mut self, key: &K, cents: i64) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 += i128::from(cents),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key.clone(), i128::from(cents)));
            }
        }
    }

    /// Сумма по категории, если она встречалась.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&pos| cents_to_amount(self.entries[pos].1))
    }

    /// Категории и суммы в порядке первого появления.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.entries.iter().map(|(key, cents)| (key, cents_to_amount(*cents)))
    }

    /// Сумма по всем категориям.
    #[must_use]
    pub fn total(&self) -> f64 {
        cents_to_amount(self.entries.iter().map(|(_, cents)| cents).sum())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Первые `n` категорий по убыванию суммы.
    ///
    /// Сортировка стабильная: при равных суммах раньше идёт категория,
    /// которая раньше встретилась в наборе.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<(K, f64)> {
        let mut ranked: Vec<&(K, i128)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(key, cents)| (key.clone(), cents_to_amount(*cents)))
            .collect()
    }
}

impl<K: Serialize> Serialize for Breakdown<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, cents) in &self.entries {
            map.serialize_entry(key, &cents_to_amount(*cents))?;
        }
        map.end()
    }
}

/// Сводные показатели по очищенному набору.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    /// Общая выручка (сумма `amount`).
    pub total_revenue: f64,
    /// Общее количество проданных единиц.
    pub total_units: f64,
    /// Выручка по продуктам.
    pub by_product: Breakdown<String>,
    /// Выручка по сменам.
    pub by_time_slot: Breakdown<TimeSlot>,
    /// Выручка по семействам.
    pub by_family: Breakdown<Family>,
    /// Продукты с наибольшей выручкой, по убыванию.
    pub top_products: Vec<(String, f64)>,
}

/// Считает агрегаты с топом из [`DEFAULT_TOP_N`] продуктов.
///
/// Пустой набор даёт нулевые итоги и пустые группировки.
///
/// # Пример
///
/// ```
/// use sales::{Family, TimeSlot, aggregate, clean};
///
/// let outcome = clean(
///     "fecha,producto,franja,familia,unidades,precio_unitario\n\
///      2024-03-01,Paella,Comida,Principal,2,12.5\n\
///      2024-03-01,Café,Desayuno,Bebida,2,1.5",
/// );
/// let totals = aggregate(&outcome.records);
///
/// assert_eq!(totals.total_revenue, 28.0);
/// assert_eq!(totals.total_units, 4.0);
/// assert_eq!(totals.by_time_slot.get(&TimeSlot::Breakfast), Some(3.0));
/// assert_eq!(totals.by_family.get(&Family::Main), Some(25.0));
/// assert_eq!(totals.top_products[0], ("paella".to_string(), 25.0));
/// ```
#[must_use]
pub fn aggregate(records: &[Record]) -> Aggregates {
    aggregate_with_top(records, DEFAULT_TOP_N)
}

/// Считает агрегаты с топом из `top_n` продуктов.
#[must_use]
pub fn aggregate_with_top(records: &[Record], top_n: usize) -> Aggregates {
    let mut revenue_cents = 0_i128;
    let mut total_units = 0.0;
    let mut by_product = Breakdown::default();
    let mut by_time_slot = Breakdown::default();
    let mut by_family = Breakdown::default();

    for record in records {
        let cents = record.amount_cents();
        revenue_cents += i128::from(cents);
        total_units += record.units();
        by_product.add(&record.product().to_string(), cents);
        by_time_slot.add(&record.time_slot(), cents);
        by_family.add(&record.family(), cents);
    }

    let top_products = by_product.top(top_n);
    Aggregates {
        total_revenue: cents_to_amount(revenue_cents),
        total_units,
        by_product,
        by_time_slot,
        by_family,
        top_products,
    }
}

fn cents_to_amount(cents: i128) -> f64 {
    cents as f64 / 100.0
}
