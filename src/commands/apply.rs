use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::commands::verify::{execute_verify, VerifyResult};
use crate::config::VerifyConfig;
use crate::error::{MigrateError, Result};
use crate::output::OutputHandler;
use crate::remote::{ExecOutcome, SqlBackend};
use crate::sql::{clean_sql, scan_migrations, split_clean_sql, MigrationFile, SqlStatement};

/// Preview length shown while executing a statement
pub const PROGRESS_PREVIEW_CHARS: usize = 60;
/// Preview length attached to a failure report
pub const FAILURE_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Send the whole file as a single request instead of splitting it
    pub no_split: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementFailure {
    /// 0-based statement index within the migration
    pub index: usize,
    pub preview: String,
    /// HTTP status when the backend rejected the statement, `None` for transport errors
    pub status: Option<u16>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    pub name: String,
    pub total_statements: usize,
    pub succeeded: usize,
    pub failures: Vec<StatementFailure>,
    /// The file had no executable SQL once comments were removed
    pub skipped: bool,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ApplyResult {
    pub migrations: Vec<MigrationReport>,
    pub verification: Option<VerifyResult>,
    pub elapsed: Duration,
}

impl ApplyResult {
    pub fn total_statements(&self) -> usize {
        self.migrations.iter().map(|m| m.total_statements).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.migrations.iter().map(|m| m.failures.len()).sum()
    }
}

/// Send statements one at a time, in order.
///
/// Rejections and transport errors are recorded and the loop moves on.
/// A 401/403 aborts immediately with [`MigrateError::Authentication`].
pub async fn apply_statements<B: SqlBackend>(
    backend: &B,
    migration_name: &str,
    statements: &[SqlStatement],
    output: &dyn OutputHandler,
) -> Result<MigrationReport> {
    let total = statements.len();
    let mut report = MigrationReport {
        name: migration_name.to_string(),
        total_statements: total,
        ..Default::default()
    };

    for statement in statements {
        let position = statement.index + 1;
        output.statement(position, total, &statement.preview(PROGRESS_PREVIEW_CHARS));
        debug!(
            migration = migration_name,
            statement = position,
            routine_body = statement.routine_body,
            "executing statement"
        );

        match backend.exec_sql(&statement.sql).await {
            Ok(ExecOutcome::Success) => {
                report.succeeded += 1;
                output.success("Statement executed successfully");
            }
            Ok(ExecOutcome::Rejected { status: status @ (401 | 403), body }) => {
                error!(migration = migration_name, statement = position, status, "authentication failed");
                output.error(&format!("Authentication failed ({}), aborting", status));
                return Err(MigrateError::Authentication { status, body });
            }
            Ok(ExecOutcome::Rejected { status, body }) => {
                let failure = StatementFailure {
                    index: statement.index,
                    preview: statement.preview(FAILURE_PREVIEW_CHARS),
                    status: Some(status),
                    message: body,
                };
                warn!(
                    migration = migration_name,
                    statement = position,
                    status,
                    error = %failure.message,
                    preview = %failure.preview,
                    "statement rejected"
                );
                output.warning(&format!(
                    "Failed to execute statement {} (HTTP {}): {}",
                    position, status, failure.message
                ));
                report.failures.push(failure);
            }
            Err(err @ MigrateError::Authentication { .. }) => return Err(err),
            Err(err) => {
                let failure = StatementFailure {
                    index: statement.index,
                    preview: statement.preview(FAILURE_PREVIEW_CHARS),
                    status: None,
                    message: err.to_string(),
                };
                warn!(
                    migration = migration_name,
                    statement = position,
                    error = %failure.message,
                    preview = %failure.preview,
                    "statement failed"
                );
                output.warning(&format!("Error executing statement {}: {}", position, failure.message));
                report.failures.push(failure);
            }
        }
    }

    Ok(report)
}

/// Apply one migration's SQL text.
pub async fn apply_migration_sql<B: SqlBackend>(
    backend: &B,
    migration_name: &str,
    sql: &str,
    options: ApplyOptions,
    output: &dyn OutputHandler,
) -> Result<MigrationReport> {
    output.heading(&format!("Applying migration: {}", migration_name));

    let cleaned = clean_sql(sql);
    if cleaned.is_empty() {
        info!(migration = migration_name, "empty migration, skipping");
        output.info("Empty migration file, skipping...");
        return Ok(MigrationReport {
            name: migration_name.to_string(),
            skipped: true,
            ..Default::default()
        });
    }

    let statements = if options.no_split {
        vec![SqlStatement {
            index: 0,
            sql: sql.trim().to_string(),
            routine_body: false,
        }]
    } else {
        split_clean_sql(&cleaned)
    };

    crate::log_migration!(migration_name, "start");
    let report = apply_statements(backend, migration_name, &statements, output).await?;
    crate::log_migration!(migration_name, "complete");

    if report.is_clean() {
        output.success(&format!("Completed migration: {}", migration_name));
    } else {
        output.warning(&format!(
            "Completed migration {} with {} failed statement(s)",
            migration_name,
            report.failures.len()
        ));
    }

    Ok(report)
}

/// Apply a single migration file.
pub async fn execute_apply<B: SqlBackend>(
    backend: &B,
    file: &Path,
    options: ApplyOptions,
    output: &dyn OutputHandler,
) -> Result<ApplyResult> {
    let started = Instant::now();

    if !file.is_file() {
        return Err(MigrateError::FileNotFound(file.to_path_buf()));
    }

    let migration = MigrationFile::from_path(file);
    let sql = migration.read_content()?;
    let report = apply_migration_sql(backend, &migration.name, &sql, options, output).await?;

    Ok(ApplyResult {
        migrations: vec![report],
        verification: None,
        elapsed: started.elapsed(),
    })
}

/// Apply every migration in `migrations_dir` in file-name order, then run the
/// verification probes unless `verify` is `None`.
pub async fn execute_apply_all<B: SqlBackend>(
    backend: &B,
    migrations_dir: &Path,
    options: ApplyOptions,
    verify: Option<&VerifyConfig>,
    output: &dyn OutputHandler,
) -> Result<ApplyResult> {
    let started = Instant::now();

    let migrations = scan_migrations(migrations_dir)?;
    info!(count = migrations.len(), dir = %migrations_dir.display(), "found migration files");
    output.info(&format!(
        "Found {} migration files in {}",
        migrations.len(),
        migrations_dir.display()
    ));

    let mut result = ApplyResult::default();

    for migration in &migrations {
        let sql = migration.read_content()?;
        let report = apply_migration_sql(backend, &migration.name, &sql, options, output).await?;
        result.migrations.push(report);
    }

    output.success("All migrations applied!");

    if let Some(verify) = verify {
        result.verification = Some(execute_verify(backend, verify, output).await);
    }

    result.elapsed = started.elapsed();
    Ok(result)
}

#[cfg(feature = "cli")]
pub fn print_apply_summary(result: &ApplyResult) {
    use owo_colors::OwoColorize;

    println!("\n{}", "=== Migration Summary ===".bold().blue());

    for migration in &result.migrations {
        if migration.skipped {
            println!("  {} {} (empty)", "-".dimmed(), migration.name.cyan());
        } else if migration.is_clean() {
            println!("  {} {}: {} statements",
                "✓".green().bold(),
                migration.name.cyan(),
                migration.succeeded.to_string().yellow()
            );
        } else {
            println!("  {} {}: {}/{} statements succeeded",
                "✗".red().bold(),
                migration.name.cyan(),
                migration.succeeded.to_string().yellow(),
                migration.total_statements.to_string().yellow()
            );
            for failure in &migration.failures {
                let status = failure.status
                    .map(|s| format!("HTTP {}", s))
                    .unwrap_or_else(|| "transport error".to_string());
                println!("      {} statement {} ({}): {}",
                    "-".red(),
                    failure.index + 1,
                    status,
                    failure.preview.dimmed()
                );
            }
        }
    }

    println!("\n{}: {} migrations, {} statements, {} failed, {}",
        "Summary".bold(),
        result.migrations.len().to_string().yellow(),
        result.total_statements().to_string().yellow(),
        result.total_failures().to_string().yellow(),
        crate::logging::format_duration(result.elapsed)
    );

    if let Some(verification) = &result.verification {
        crate::commands::verify::print_verify_summary(verification);
    }
}
