//! Result rendering and export
//!
//! All rendering here is presentation over plain data: nothing in this
//! module mutates an audit result.

mod export;
mod summary;

pub use export::{findings_csv, write_findings_csv, write_json_report, ReportEnvelope};
pub use summary::{render_comparison, render_summary};
