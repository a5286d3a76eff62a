//! # xtask - Автоматизация сборки проекта
//!
//! Команды для проверки воркспейса и прогона отчёта по продажам на
//! тестовых данных. Список команд см. в [`HELP_TEXT`].
use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use xshell::{Shell, cmd};

/// Текст справки для команды xtask.
pub const HELP_TEXT: &str = r#"xtask

Использование:
  cargo run -p xtask -- <команда>

Команды:
  help         Показать это сообщение
  fmt          Запустить rustfmt
  fmt-check    Проверить форматирование (CI)
  clippy       Запустить clippy (воркспейс)
  test         Запустить тесты через nextest (воркспейс)
  ci           Запустить fmt-check + clippy + test (профиль CI)
  demo         Очистить tests/e2e/fixtures/ventas_raw.csv и выгрузить результат в target/demo/

Примечание:
  cargo-nextest устанавливается автоматически при первом запуске тестов
"#;

/// Сырая таблица, на которой показывается `demo`.
const DEMO_INPUT: &str = "tests/e2e/fixtures/ventas_raw.csv";

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "help".to_string());

    let sh = Shell::new()?;

    match cmd.as_str() {
        "help" | "-h" | "--help" => help(),
        "fmt" => Ok(cmd!(sh, "cargo +nightly fmt --all").run()?),
        "fmt-check" => Ok(cmd!(sh, "cargo +nightly fmt --all -- --check").run()?),
        "clippy" => Ok(cmd!(sh, "cargo +nightly clippy --workspace -- -D warnings").run()?),
        "test" => {
            ensure_nextest(&sh)?;
            cmd!(sh, "cargo nextest run --workspace").run()?;
            // nextest не умеет doc-тесты
            cmd!(sh, "cargo +nightly test --workspace --doc").run()?;
            Ok(())
        }
        "ci" => {
            ensure_nextest(&sh)?;
            cmd!(sh, "cargo +nightly fmt --all -- --check").run()?;
            cmd!(sh, "cargo +nightly clippy --workspace -- -D warnings").run()?;
            // e2e-тестам нужен собранный ventas-report
            cmd!(sh, "cargo build --workspace").run()?;
            cmd!(sh, "cargo nextest run --workspace --profile ci").run()?;
            cmd!(sh, "cargo +nightly test --workspace --doc").run()?;
            Ok(())
        }
        "demo" => demo(&sh),
        other => bail!("Неизвестная команда: {other}\n\nЗапустите: cargo run -p xtask -- help"),
    }
}

/// Показать сообщение справки.
fn help() -> Result<()> {
    println!("{}", HELP_TEXT);
    Ok(())
}

/// Прогнать `ventas-report` на тестовой таблице.
///
/// Отчёт печатается в консоль, очищенная таблица сохраняется в
/// `target/demo/ventas_clean.csv`.
fn demo(sh: &Shell) -> Result<()> {
    let project = project_root()?;
    let out_dir = project.join("target/demo");
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("не удалось создать {}", out_dir.display()))?;

    let input = project.join(DEMO_INPUT);
    let export = out_dir.join("ventas_clean.csv");

    sh.change_dir(&project);
    cmd!(sh, "cargo run -q -p ventas-report -- --input {input} --export {export} --preview 5")
        .run()?;
    Ok(())
}

/// Корень воркспейса: родитель директории манифеста xtask.
fn project_root() -> Result<PathBuf> {
    Ok(std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)?
        .parent()
        .context("CARGO_MANIFEST_DIR не имеет родительской директории")?
        .to_path_buf())
}

/// Проверить наличие cargo-nextest и установить при необходимости.
fn ensure_nextest(sh: &Shell) -> Result<()> {
    if cmd!(sh, "cargo nextest --version").quiet().run().is_ok() {
        return Ok(());
    }

    eprintln!("cargo-nextest не найден, устанавливаю...");
    cmd!(sh, "cargo install cargo-nextest --locked").run()?;
    eprintln!("cargo-nextest успешно установлен");
    Ok(())
}
