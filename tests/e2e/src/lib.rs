//! # e2e-tests - End-to-end тесты CLI инструментов
//!
//! Этот крейт содержит e2e тесты для CLI инструмента воркспейса:
//! - `ventas-report`: очистка таблицы продаж, отчёт и выгрузка
//!
//! ## Фикстуры
//!
//! Тестовые файлы расположены в `fixtures/`:
//! - `ventas_raw.csv`: сырая таблица с дубликатами и всеми видами отказов
//! - `ventas_clean.csv`: ожидаемая выгрузка после очистки `ventas_raw.csv`

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

/// Получить путь к директории фикстур.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Получить путь к фикстуре по имени файла.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Прочитать содержимое фикстуры.
pub fn read_fixture(name: &str) -> Result<String> {
    let path = fixture(name);
    fs::read_to_string(&path).with_context(|| format!("не удалось прочитать {}", path.display()))
}
