use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{MigrateError, Result};

#[derive(Debug)]
pub struct NewResult {
    pub migration_file: String,
    pub migration_path: PathBuf,
}

/// Create an empty `{YYYYMMDDHHMMSS}_{name}.sql` migration.
pub fn execute_new(migrations_dir: &Path, migration_name: &str) -> Result<NewResult> {
    create_migration(migrations_dir, migration_name, Utc::now())
}

pub fn create_migration(
    migrations_dir: &Path,
    migration_name: &str,
    now: DateTime<Utc>,
) -> Result<NewResult> {
    let migration_name = migration_name.trim();

    if migration_name.is_empty() {
        return Err(MigrateError::InvalidMigrationName("name cannot be empty".to_string()));
    }

    if !migration_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(MigrateError::InvalidMigrationName(migration_name.to_string()));
    }

    if !migrations_dir.exists() {
        fs::create_dir_all(migrations_dir).map_err(|source| MigrateError::FileWrite {
            path: migrations_dir.to_path_buf(),
            message: source.to_string(),
            source,
        })?;
    }

    let migration_file = format!("{}_{}.sql", now.format("%Y%m%d%H%M%S"), migration_name);
    let migration_path = migrations_dir.join(&migration_file);

    if migration_path.exists() {
        return Err(MigrateError::MigrationExists(migration_path));
    }

    let content = format!(
        "/*\n  # {}\n\n  Created: {}\n*/\n\n",
        migration_name,
        now.format("%Y-%m-%d %H:%M:%S UTC")
    );

    fs::write(&migration_path, content).map_err(|source| MigrateError::FileWrite {
        path: migration_path.clone(),
        message: source.to_string(),
        source,
    })?;

    Ok(NewResult {
        migration_file,
        migration_path,
    })
}

#[cfg(feature = "cli")]
pub fn print_new_summary(result: &NewResult) {
    use owo_colors::OwoColorize;

    println!("{} Created migration: {}", "✓".green().bold(), result.migration_file.cyan());
    println!("  Path: {}", result.migration_path.display().to_string().dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 29, 17, 31, 34).unwrap()
    }

    #[test]
    fn test_create_migration() {
        let temp_dir = tempdir().unwrap();
        let dir = temp_dir.path().join("supabase").join("migrations");

        let result = create_migration(&dir, "throbbing_cloud", fixed_time()).unwrap();

        assert_eq!(result.migration_file, "20250629173134_throbbing_cloud.sql");
        assert!(result.migration_path.exists());

        // The template is comment-only, so it splits to nothing
        let content = fs::read_to_string(&result.migration_path).unwrap();
        assert!(content.contains("throbbing_cloud"));
        assert!(crate::sql::split_sql_file(&content).is_empty());
    }

    #[test]
    fn test_create_migration_rejects_bad_names() {
        let temp_dir = tempdir().unwrap();

        for name in ["", "   ", "drop table", "../escape", "name;"] {
            let result = create_migration(temp_dir.path(), name, fixed_time());
            assert!(
                matches!(result, Err(MigrateError::InvalidMigrationName(_))),
                "expected {:?} to be rejected",
                name
            );
        }
    }

    #[test]
    fn test_create_migration_refuses_to_overwrite() {
        let temp_dir = tempdir().unwrap();

        create_migration(temp_dir.path(), "init", fixed_time()).unwrap();
        let second = create_migration(temp_dir.path(), "init", fixed_time());

        assert!(matches!(second, Err(MigrateError::MigrationExists(_))));
    }
}
