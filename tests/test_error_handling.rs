use std::path::PathBuf;
use thrive_migrate::error::{format_error_chain, suggest_fix, ErrorContext, MigrateError};

#[test]
fn test_error_display() {
    let err = MigrateError::Authentication {
        status: 401,
        body: r#"{"message":"Invalid API key"}"#.to_string(),
    };

    let display = err.to_string();
    assert!(display.contains("401"));
    assert!(display.contains("service role key"));
}

#[test]
fn test_error_context() {
    let result: Result<(), MigrateError> = Err(MigrateError::Other("test error".to_string()));
    let with_context = result.file_context("my_file.sql");

    match with_context {
        Err(e) => assert_eq!(e.to_string(), "test error"),
        Ok(_) => panic!("Expected error"),
    }
}

#[test]
fn test_file_context_fills_in_path() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let result: Result<String, std::io::Error> = Err(io_err);

    match result.file_context("supabase/migrations/001_init.sql") {
        Err(MigrateError::FileNotFound(path)) => {
            assert_eq!(path, PathBuf::from("supabase/migrations/001_init.sql"));
        }
        other => panic!("Expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_error_suggestions() {
    let auth_err = MigrateError::Authentication { status: 403, body: String::new() };
    let suggestion = suggest_fix(&auth_err);
    assert!(suggestion.is_some());
    assert!(suggestion.unwrap().contains("VITE_SUPABASE_SERVICE_ROLE_KEY"));

    let missing = MigrateError::MissingCredentials { missing: vec!["VITE_SUPABASE_URL"] };
    let suggestion = suggest_fix(&missing).unwrap();
    assert!(suggestion.contains("  - VITE_SUPABASE_URL"));

    let file_err = MigrateError::FileNotFound(PathBuf::from("/tmp/missing.sql"));
    let suggestion = suggest_fix(&file_err);
    assert!(suggestion.is_some());
    assert!(suggestion.unwrap().contains("Check if the path is correct"));

    let url_err = MigrateError::InvalidProjectUrl("ftp://example.com".to_string());
    assert!(suggest_fix(&url_err).unwrap().contains("supabase.co"));

    assert!(suggest_fix(&MigrateError::Other("whatever".to_string())).is_none());
}

#[test]
fn test_error_chain_formatting() {
    let err = MigrateError::FileRead {
        path: PathBuf::from("001_init.sql"),
        message: "Read failed".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
    };

    let formatted = format_error_chain(&err);
    assert!(formatted.starts_with("Error: Failed to read 001_init.sql: Read failed"));
    assert!(formatted.contains("Caused by: stream did not contain valid UTF-8"));
}
