use std::path::PathBuf;
use thiserror::Error;

/// Main error type for thrive-migrate
#[derive(Error, Debug)]
pub enum MigrateError {
    // File System Errors
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read {path}: {message}")]
    FileRead {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {message}")]
    FileWrite {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    // Remote Errors
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Authentication failed ({status}). Please check your service role key.")]
    Authentication {
        status: u16,
        body: String,
    },

    #[error("Invalid project URL: {0}")]
    InvalidProjectUrl(String),

    // Migration Errors
    #[error("Invalid migration name: {0}")]
    InvalidMigrationName(String),

    #[error("Migration file already exists: {0}")]
    MigrationExists(PathBuf),

    // Configuration Errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing required settings: {}", .missing.join(", "))]
    MissingCredentials {
        missing: Vec<&'static str>,
    },

    #[error("Failed to load configuration from {path}: {message}")]
    ConfigLoad {
        path: PathBuf,
        message: String,
    },

    // General Errors
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for MigrateError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => {
                MigrateError::FileNotFound(PathBuf::from("unknown"))
            }
            std::io::ErrorKind::PermissionDenied => {
                MigrateError::PermissionDenied(PathBuf::from("unknown"))
            }
            _ => MigrateError::FileRead {
                path: PathBuf::from("unknown"),
                message: err.to_string(),
                source: err,
            },
        }
    }
}

impl From<url::ParseError> for MigrateError {
    fn from(err: url::ParseError) -> Self {
        MigrateError::InvalidProjectUrl(err.to_string())
    }
}

impl From<toml::ser::Error> for MigrateError {
    fn from(err: toml::ser::Error) -> Self {
        MigrateError::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for MigrateError {
    fn from(err: serde_json::Error) -> Self {
        MigrateError::Other(err.to_string())
    }
}

/// Result type alias for thrive-migrate operations
pub type Result<T> = std::result::Result<T, MigrateError>;

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context about which file caused the error
    fn file_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<MigrateError>,
{
    fn file_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| {
            let mut err = e.into();
            match &mut err {
                MigrateError::FileNotFound(p) => *p = path.into(),
                MigrateError::PermissionDenied(p) => *p = path.into(),
                MigrateError::DirectoryNotFound(p) => *p = path.into(),
                MigrateError::FileRead { path: p, .. } => *p = path.into(),
                MigrateError::FileWrite { path: p, .. } => *p = path.into(),
                MigrateError::ConfigLoad { path: p, .. } => *p = path.into(),
                _ => {}
            }
            err
        })
    }
}

/// Helper function to format error with all its causes
pub fn format_error_chain(err: &MigrateError) -> String {
    use std::error::Error;

    let mut output = format!("Error: {}", err);

    let mut current_err: &dyn Error = err;
    while let Some(source) = current_err.source() {
        output.push_str(&format!("\n  Caused by: {}", source));
        current_err = source;
    }

    output
}

/// Helper function to suggest fixes for common errors
pub fn suggest_fix(err: &MigrateError) -> Option<String> {
    match err {
        MigrateError::Authentication { .. } => Some(
            "Suggestions:\n\
             - Use the service role key, not the anon key\n\
             - Check VITE_SUPABASE_SERVICE_ROLE_KEY in your environment or .env file\n\
             - Ensure the key belongs to the project at VITE_SUPABASE_URL".to_string()
        ),
        MigrateError::MissingCredentials { missing } => Some(
            format!("Set the following in your environment, .env file or thrive.toml:\n{}",
                missing.iter().map(|m| format!("  - {}", m)).collect::<Vec<_>>().join("\n"))
        ),
        MigrateError::InvalidProjectUrl(_) => Some(
            "Project URL should look like:\n\
             https://<project-ref>.supabase.co".to_string()
        ),
        MigrateError::Http { .. } => Some(
            "Suggestions:\n\
             - Check your network connection\n\
             - Verify the project URL is correct\n\
             - Ensure the SQL execution function is deployed on the project".to_string()
        ),
        MigrateError::FileNotFound(path) => Some(
            format!("File not found: {}\n\
                    - Check if the path is correct\n\
                    - Ensure you're running thrive-migrate from the project root", path.display())
        ),
        MigrateError::DirectoryNotFound(path) => Some(
            format!("Directory not found: {}\n\
                    - Pass --migrations-dir or set migrations_dir in thrive.toml", path.display())
        ),
        MigrateError::PermissionDenied(path) => Some(
            format!("Permission denied for: {}\n\
                    - Check file permissions", path.display())
        ),
        MigrateError::InvalidMigrationName(_) => Some(
            "Migration names may only contain alphanumeric characters, underscores, and hyphens".to_string()
        ),
        _ => None,
    }
}
