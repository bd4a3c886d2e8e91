//! Output
//!
//! Round measurement, the per-run round table, and run summaries.

pub mod measure;
pub mod recorder;
pub mod summary;

pub use measure::{group_bias, measure_round};
pub use recorder::RoundRecorder;
pub use summary::{population_report, run_table_path, summary_path, write_summary};
