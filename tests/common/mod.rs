#![allow(dead_code)]

pub mod fixtures;
pub mod http;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;
use thrive_migrate::error::{MigrateError, Result};
use thrive_migrate::remote::{ExecOutcome, SqlBackend};

/// How the fake backend answers a request
#[derive(Debug, Clone)]
pub enum Reply {
    Ok,
    Reject(u16, &'static str),
    /// Simulates a connection failure
    Transport(&'static str),
}

/// In-memory stand-in for the hosted project.
///
/// Requests whose SQL (or table/function name) contains a rule's pattern get
/// that rule's reply; everything else succeeds. Every request is recorded.
#[derive(Default)]
pub struct FakeBackend {
    rules: Vec<(String, Reply)>,
    pub executed: Mutex<Vec<String>>,
    pub probed_tables: Mutex<Vec<String>>,
    pub called_functions: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_when(mut self, pattern: &str, reply: Reply) -> Self {
        self.rules.push((pattern.to_string(), reply));
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn probed_tables(&self) -> Vec<String> {
        self.probed_tables.lock().unwrap().clone()
    }

    pub fn called_functions(&self) -> Vec<String> {
        self.called_functions.lock().unwrap().clone()
    }

    fn respond(&self, key: &str) -> Result<ExecOutcome> {
        let reply = self
            .rules
            .iter()
            .find(|(pattern, _)| key.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or(Reply::Ok);

        match reply {
            Reply::Ok => Ok(ExecOutcome::Success),
            Reply::Reject(status, body) => Ok(ExecOutcome::Rejected {
                status,
                body: body.to_string(),
            }),
            Reply::Transport(message) => Err(MigrateError::Other(message.to_string())),
        }
    }
}

impl SqlBackend for FakeBackend {
    async fn exec_sql(&self, sql: &str) -> Result<ExecOutcome> {
        self.executed.lock().unwrap().push(sql.to_string());
        self.respond(sql)
    }

    async fn probe_table(&self, table: &str) -> Result<ExecOutcome> {
        self.probed_tables.lock().unwrap().push(table.to_string());
        self.respond(table)
    }

    async fn call_function(&self, name: &str) -> Result<ExecOutcome> {
        self.called_functions.lock().unwrap().push(name.to_string());
        self.respond(name)
    }
}

/// Temporary project layout with a migrations directory
pub struct TestProject {
    pub temp_dir: TempDir,
    pub migrations_dir: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let migrations_dir = temp_dir.path().join("supabase").join("migrations");
        std::fs::create_dir_all(&migrations_dir).expect("create migrations dir");
        Self { temp_dir, migrations_dir }
    }

    pub fn write_migration(&self, name: &str, sql: &str) -> PathBuf {
        let path = self.migrations_dir.join(format!("{}.sql", name));
        std::fs::write(&path, sql).expect("write migration");
        path
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }
}

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
