pub mod client;

use std::future::Future;

use crate::error::Result;

pub use client::{RemoteConfig, RestClient, DEFAULT_RPC_FUNCTION, DEFAULT_TIMEOUT_SECS};

/// What the backend said about a request that reached it.
///
/// Transport failures (connection refused, timeout) are reported as
/// `Err(MigrateError::Http)` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    Success,
    Rejected { status: u16, body: String },
}

/// The hosted database as seen by the migration runner.
pub trait SqlBackend: Send + Sync {
    /// Execute one SQL statement through the generic SQL-execution RPC.
    fn exec_sql(&self, sql: &str) -> impl Future<Output = Result<ExecOutcome>> + Send;

    /// Check that a table is exposed and readable.
    fn probe_table(&self, table: &str) -> impl Future<Output = Result<ExecOutcome>> + Send;

    /// Call an RPC function with no arguments.
    fn call_function(&self, name: &str) -> impl Future<Output = Result<ExecOutcome>> + Send;
}
