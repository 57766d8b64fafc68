use serde::Serialize;
use tracing::{info, warn};

use crate::config::VerifyConfig;
use crate::output::OutputHandler;
use crate::remote::{ExecOutcome, SqlBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbeKind {
    Table,
    Function,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub kind: ProbeKind,
    pub name: String,
    pub ok: bool,
    /// Rejection body or transport error, when the probe failed
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyResult {
    pub probes: Vec<ProbeResult>,
}

impl VerifyResult {
    pub fn all_passed(&self) -> bool {
        self.probes.iter().all(|p| p.ok)
    }

    pub fn failed(&self) -> impl Iterator<Item = &ProbeResult> {
        self.probes.iter().filter(|p| !p.ok)
    }
}

/// Check that the configured tables and functions are reachable.
///
/// Never fails: a failed probe (authorization failures included) is
/// reported as a warning.
pub async fn execute_verify<B: SqlBackend>(
    backend: &B,
    config: &VerifyConfig,
    output: &dyn OutputHandler,
) -> VerifyResult {
    output.heading("Testing database setup");

    let mut result = VerifyResult::default();

    for table in &config.tables {
        let outcome = backend.probe_table(table).await;
        result.probes.push(record(ProbeKind::Table, table, outcome, output));
    }

    for function in &config.functions {
        let outcome = backend.call_function(function).await;
        result.probes.push(record(ProbeKind::Function, function, outcome, output));
    }

    result
}

fn record(
    kind: ProbeKind,
    name: &str,
    outcome: crate::error::Result<ExecOutcome>,
    output: &dyn OutputHandler,
) -> ProbeResult {
    let label = match kind {
        ProbeKind::Table => "table",
        ProbeKind::Function => "function",
    };

    let detail = match outcome {
        Ok(ExecOutcome::Success) => None,
        Ok(ExecOutcome::Rejected { status, body }) => Some(format!("HTTP {}: {}", status, body)),
        Err(err) => Some(err.to_string()),
    };

    match &detail {
        None => {
            info!(kind = label, probe = name, "probe passed");
            output.success(&format!("{} {} exists and is accessible", label, name));
        }
        Some(detail) => {
            warn!(kind = label, probe = name, error = %detail, "probe failed");
            output.warning(&format!("{} {} check failed: {}", label, name, detail));
        }
    }

    ProbeResult {
        kind,
        name: name.to_string(),
        ok: detail.is_none(),
        detail,
    }
}

#[cfg(feature = "cli")]
pub fn print_verify_summary(result: &VerifyResult) {
    use owo_colors::OwoColorize;

    if result.probes.is_empty() {
        println!("\n{}", "No verification probes configured.".yellow());
    } else if result.all_passed() {
        println!("\n{} {}", "✓".green().bold(), format!("All {} verification probes passed", result.probes.len()).green());
    } else {
        println!("\n{}:", "Verification warnings".bold().yellow());
        for probe in result.failed() {
            println!("  {} {:?} {}: {}",
                "⚠".yellow(),
                probe.kind,
                probe.name.cyan(),
                probe.detail.as_deref().unwrap_or("unknown error")
            );
        }
    }
}
