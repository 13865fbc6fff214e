pub mod formatter;
pub mod report;

pub use formatter::{
    format_factors_table, format_level, format_number, format_ranges, format_report, format_summary,
    format_tsv, should_use_colors,
};
pub use report::ScoreReport;
