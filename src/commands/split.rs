use std::path::Path;

use serde::Serialize;

use crate::error::{MigrateError, Result};
use crate::sql::{split_sql_file, MigrationFile, SqlStatement};

#[derive(Debug, Clone, Serialize)]
pub struct SplitResult {
    pub migration: String,
    pub statements: Vec<SqlStatement>,
}

/// Split a migration file without sending anything anywhere.
pub fn execute_split(file: &Path) -> Result<SplitResult> {
    if !file.is_file() {
        return Err(MigrateError::FileNotFound(file.to_path_buf()));
    }

    let migration = MigrationFile::from_path(file);
    let content = migration.read_content()?;

    Ok(SplitResult {
        migration: migration.name,
        statements: split_sql_file(&content),
    })
}

pub fn split_to_json(result: &SplitResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(feature = "cli")]
pub fn print_split_summary(result: &SplitResult) {
    use owo_colors::OwoColorize;

    println!("{} {} statements in {}",
        "→".cyan(),
        result.statements.len().to_string().yellow(),
        result.migration.bright_blue()
    );

    for statement in &result.statements {
        let marker = if statement.routine_body { " [routine]" } else { "" };
        println!("\n{}{}", format!("-- statement {}", statement.index + 1).dimmed(), marker.magenta());
        println!("{}", statement.sql);
    }
}
