pub mod apply;
pub mod split;
pub mod verify;
pub mod new;
pub mod seed;

pub use apply::{
    apply_migration_sql, apply_statements, execute_apply, execute_apply_all, ApplyOptions,
    ApplyResult, MigrationReport, StatementFailure,
};
pub use split::{execute_split, split_to_json, SplitResult};
pub use verify::{execute_verify, ProbeKind, ProbeResult, VerifyResult};
pub use new::{create_migration, execute_new, NewResult};
pub use seed::{execute_seed, SeedResult};

#[cfg(feature = "cli")]
pub use apply::print_apply_summary;
#[cfg(feature = "cli")]
pub use split::print_split_summary;
#[cfg(feature = "cli")]
pub use verify::print_verify_summary;
#[cfg(feature = "cli")]
pub use new::print_new_summary;
#[cfg(feature = "cli")]
pub use seed::print_seed_summary;
