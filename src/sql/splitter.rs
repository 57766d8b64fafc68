//! Line-oriented statement splitter for migration files.
//!
//! This is deliberately a heuristic and not a SQL lexer. Lines are fed
//! through a two-state machine:
//!
//! * [`SplitState::Normal`]: a line whose trimmed form ends in `;` closes
//!   the current statement.
//! * [`SplitState::InFunctionBody`]: entered when a line opens a routine
//!   (`CREATE [OR REPLACE] FUNCTION`, `CREATE [OR REPLACE] PROCEDURE` or an
//!   anonymous `DO $$` block). The state is left again on a `;`-terminated
//!   line once the number of `$$` tokens seen is even, i.e. the dollar-quoted
//!   body has been closed.
//!
//! The heuristic assumes one `$$ ... $$` region per routine. Only the
//! untagged `$$` delimiter is counted, so `DO $body$` is not an opener and
//! splits like ordinary statements. Unbalanced dollar quotes never return
//! the machine to `Normal`, so everything after them folds into a single
//! trailing statement.

use serde::Serialize;

use super::comments::clean_sql;

const DOLLAR_QUOTE: &str = "$$";

const ROUTINE_OPENERS: &[&str] = &[
    "CREATE FUNCTION",
    "CREATE OR REPLACE FUNCTION",
    "CREATE PROCEDURE",
    "CREATE OR REPLACE PROCEDURE",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlStatement {
    pub index: usize,
    pub sql: String,
    /// The statement was accumulated inside a dollar-quoted routine body.
    pub routine_body: bool,
}

impl SqlStatement {
    /// First `max_chars` characters of the statement, with `...` appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        preview(&self.sql, max_chars)
    }
}

/// Truncate `sql` to `max_chars` characters on a char boundary.
pub fn preview(sql: &str, max_chars: usize) -> String {
    match sql.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &sql[..byte_idx]),
        None => sql.to_string(),
    }
}

/// State of the splitter between lines.
///
/// Both variants carry the number of `$$` tokens seen since the last
/// emitted statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitState {
    Normal { dollar_quotes: usize },
    InFunctionBody { dollar_quotes: usize },
}

/// Result of feeding one line to [`SplitState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: SplitState,
    /// The accumulated statement is complete and should be emitted.
    pub complete: bool,
}

impl Default for SplitState {
    fn default() -> Self {
        SplitState::Normal { dollar_quotes: 0 }
    }
}

impl SplitState {
    pub fn dollar_quotes(&self) -> usize {
        match *self {
            SplitState::Normal { dollar_quotes } | SplitState::InFunctionBody { dollar_quotes } => {
                dollar_quotes
            }
        }
    }

    pub fn in_function_body(&self) -> bool {
        matches!(self, SplitState::InFunctionBody { .. })
    }

    /// Apply one line of cleaned text.
    pub fn advance(self, line: &str) -> Transition {
        let trimmed = line.trim();
        let dollar_quotes = self.dollar_quotes() + line.matches(DOLLAR_QUOTE).count();
        let mut in_body = self.in_function_body() || opens_routine_body(trimmed);

        if trimmed.ends_with(';') {
            if in_body && dollar_quotes % 2 == 0 {
                in_body = false;
            }
            if !in_body {
                return Transition {
                    next: SplitState::default(),
                    complete: true,
                };
            }
        }

        let next = if in_body {
            SplitState::InFunctionBody { dollar_quotes }
        } else {
            SplitState::Normal { dollar_quotes }
        };
        Transition { next, complete: false }
    }
}

/// Does this (trimmed) line start a routine whose body may contain `;`?
pub fn opens_routine_body(trimmed_line: &str) -> bool {
    let normalized = trimmed_line
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase();

    if ROUTINE_OPENERS.iter().any(|opener| normalized.contains(opener)) {
        return true;
    }

    // Anonymous block: `DO $$`, or `DO` alone with the `$$` on the next line
    normalized == "DO" || normalized.starts_with("DO $$")
}

/// Split migration text into individually executable statements.
///
/// Comments are removed first. Every returned statement is trimmed and
/// non-empty, and statements appear in input order. This never fails.
pub fn split_sql_file(file_content: &str) -> Vec<SqlStatement> {
    let cleaned = clean_sql(file_content);
    split_clean_sql(&cleaned)
}

/// Split text that has already had its comments removed.
pub fn split_clean_sql(cleaned: &str) -> Vec<SqlStatement> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut state = SplitState::default();
    let mut saw_body = false;

    for line in cleaned.split('\n') {
        current.push_str(line);
        current.push('\n');

        saw_body |= state.in_function_body() || opens_routine_body(line.trim());
        let transition = state.advance(line);

        if transition.complete {
            push_statement(&mut statements, &current, saw_body);
            current.clear();
            saw_body = false;
        }
        state = transition.next;
    }

    push_statement(&mut statements, &current, saw_body);
    statements
}

fn push_statement(statements: &mut Vec<SqlStatement>, raw: &str, routine_body: bool) {
    let sql = raw.trim();
    if sql.is_empty() {
        return;
    }
    statements.push(SqlStatement {
        index: statements.len(),
        sql: sql.to_string(),
        routine_body,
    });
}
