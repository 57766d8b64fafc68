use once_cell::sync::Lazy;
use regex::Regex;

/// `/* ... */`, non-greedy, may span lines.
static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern is valid")
});

/// `-- ...` up to (not including) the line terminator. CRLF mode keeps the `\r`.
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mR)--.*$").expect("line comment pattern is valid")
});

/// Remove block and line comments from migration text.
///
/// This is a textual heuristic: a `--` or `/*` inside a string literal is
/// treated as a comment too. Migration files are hand-written and trusted,
/// so that trade-off is acceptable.
pub fn strip_comments(sql: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(sql, "");
    LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
}

/// Strip comments and trim the result. This is the text the splitter works on.
pub fn clean_sql(sql: &str) -> String {
    strip_comments(sql).trim().to_string()
}
