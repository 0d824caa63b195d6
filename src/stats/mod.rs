pub mod aggregate;
pub mod exec;
pub mod normalize;
pub mod output;

pub use aggregate::{analyze_branches, iter_commits};
pub use exec::{analyze, report};
pub use normalize::{normalize, table_rows};
pub use output::{output_table, write_csv, write_files};
