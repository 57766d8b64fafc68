use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ErrorContext, MigrateError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// File stem, e.g. `20250629173134_throbbing_cloud`
    pub name: String,
    pub path: PathBuf,
}

impl MigrationFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        Self { name, path }
    }

    pub fn read_content(&self) -> Result<String> {
        fs::read_to_string(&self.path).file_context(&self.path)
    }
}

/// Scan the migrations directory for .sql files, sorted by file name.
///
/// Timestamp-prefixed names (`YYYYMMDDHHMMSS_name.sql`) therefore come back
/// in chronological order.
pub fn scan_migrations(migrations_dir: &Path) -> Result<Vec<MigrationFile>> {
    if !migrations_dir.is_dir() {
        return Err(MigrateError::DirectoryNotFound(migrations_dir.to_path_buf()));
    }

    let mut migrations = Vec::new();

    for entry in fs::read_dir(migrations_dir).file_context(migrations_dir)? {
        let path = entry.file_context(migrations_dir)?.path();

        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("sql") {
            migrations.push(MigrationFile::from_path(path));
        }
    }

    migrations.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

    Ok(migrations)
}
