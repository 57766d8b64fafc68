pub mod comments;
pub mod splitter;
pub mod scanner;

pub use comments::{clean_sql, strip_comments};
pub use splitter::{split_sql_file, split_clean_sql, opens_routine_body, preview, SqlStatement, SplitState, Transition};
pub use scanner::{scan_migrations, MigrationFile};
