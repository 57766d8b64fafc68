//! Migration runner for the Thrive Nation forum database.
//!
//! The interesting part is [`sql::splitter`], which turns a migration file
//! into statements that can be sent one at a time over the hosted
//! project's SQL-execution RPC without breaking dollar-quoted routine
//! bodies apart. Everything else is plumbing around it: a REST client
//! behind the [`remote::SqlBackend`] trait, configuration, and commands.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod remote;
pub mod sql;

#[cfg(feature = "cli")]
pub mod cli;

pub use commands::{ApplyOptions, ApplyResult, MigrationReport, VerifyResult};
pub use config::{MigrateConfig, VerifyConfig};
pub use error::{MigrateError, Result};
pub use output::{LibraryOutputHandler, OutputHandler, SilentOutputHandler};
pub use remote::{ExecOutcome, RemoteConfig, RestClient, SqlBackend};
pub use sql::{split_sql_file, SqlStatement};

/// Apply every migration in the configured directory, then verify.
///
/// Builds its own [`RestClient`] from `config`; use
/// [`commands::execute_apply_all`] directly to supply a different backend.
pub async fn apply_migrations(
    config: &MigrateConfig,
    output: &dyn OutputHandler,
) -> Result<ApplyResult> {
    let client = RestClient::new(config.remote_config()?)?;
    let verify = config.verify_config();

    commands::execute_apply_all(
        &client,
        &config.migrations_dir(),
        ApplyOptions::default(),
        Some(&verify),
        output,
    )
    .await
}
