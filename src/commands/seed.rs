use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::commands::apply::{apply_migration_sql, ApplyOptions, MigrationReport};
use crate::error::Result;
use crate::output::OutputHandler;
use crate::remote::SqlBackend;
use crate::sql::scan_migrations;

#[derive(Debug, Default)]
pub struct SeedResult {
    pub files: Vec<MigrationReport>,
    /// Seed file whose failed statements stopped the run
    pub halted_at: Option<String>,
    pub elapsed: Duration,
}

impl SeedResult {
    pub fn total_statements(&self) -> usize {
        self.files.iter().map(|f| f.total_statements).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.files.iter().map(|f| f.failures.len()).sum()
    }

    pub fn is_success(&self) -> bool {
        self.halted_at.is_none()
    }
}

/// Execute the `.sql` files in `seed_dir` in file-name order.
///
/// Later seed files usually reference rows inserted by earlier ones, so the
/// first file with a failed statement stops the run. There is no transaction
/// over the RPC endpoint: statements that already succeeded stay applied.
pub async fn execute_seed<B: SqlBackend>(
    backend: &B,
    seed_dir: &Path,
    output: &dyn OutputHandler,
) -> Result<SeedResult> {
    let started = Instant::now();

    let seed_files = scan_migrations(seed_dir)?;
    if seed_files.is_empty() {
        info!(dir = %seed_dir.display(), "no seed files found");
        output.info(&format!("No seed files found in {}", seed_dir.display()));
        return Ok(SeedResult::default());
    }

    info!(count = seed_files.len(), dir = %seed_dir.display(), "found seed files");
    output.info(&format!("Found {} seed files to execute", seed_files.len()));

    let mut result = SeedResult::default();

    for seed_file in &seed_files {
        let sql = seed_file.read_content()?;
        let report = apply_migration_sql(backend, &seed_file.name, &sql, ApplyOptions::default(), output).await?;
        let clean = report.is_clean();
        result.files.push(report);

        if !clean {
            warn!(seed = %seed_file.name, "seed file failed, stopping");
            output.error(&format!("Seeding stopped at {}", seed_file.name));
            result.halted_at = Some(seed_file.name.clone());
            break;
        }
    }

    result.elapsed = started.elapsed();
    Ok(result)
}

#[cfg(feature = "cli")]
pub fn print_seed_summary(result: &SeedResult) {
    use owo_colors::OwoColorize;

    println!("\n{}", "=== Seed Summary ===".bold().blue());

    if result.files.is_empty() {
        println!("\n{}", "No seed files found or processed.".yellow());
        return;
    }

    for file in &result.files {
        let mark = if file.is_clean() { "✓".green().bold().to_string() } else { "✗".red().bold().to_string() };
        println!("  {} {}: {}/{} statements",
            mark,
            file.name.cyan(),
            file.succeeded.to_string().yellow(),
            file.total_statements.to_string().yellow()
        );
    }

    match &result.halted_at {
        None => println!("\n{} {} {}",
            "✓".green().bold(),
            "Successfully executed".green().bold(),
            format!("{} seed files", result.files.len()).yellow()
        ),
        Some(name) => println!("\n{} {} {}",
            "✗".red().bold(),
            "Seeding stopped at".red().bold(),
            name.yellow()
        ),
    }
}
