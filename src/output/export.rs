//! Report export
//!
//! Serializes audit results to JSON and the findings checklist to CSV.
//! Exports are stamped with a generation timestamp; the audit data itself
//! stays untouched so repeated analysis of the same snapshot is
//! byte-identical.

use crate::audit::SiteAudit;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Envelope wrapping an exported payload with its generation time
#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a, T: Serialize> {
    pub generated_at: DateTime<Utc>,
    pub report: &'a T,
}

/// Writes any serializable report as pretty-printed JSON
pub fn write_json_report<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    let envelope = ReportEnvelope {
        generated_at: Utc::now(),
        report,
    };
    let json = serde_json::to_string_pretty(&envelope)?;
    std::fs::write(path, json)?;
    tracing::info!("wrote JSON report to {}", path.display());
    Ok(())
}

/// Renders the findings checklist as CSV
pub fn findings_csv(audit: &SiteAudit) -> String {
    let mut out = String::from("url,priority,finding,detail,recommendation\n");
    let url = audit.target.url.to_string();

    for finding in &audit.findings {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            csv_field(&url),
            finding.priority.label(),
            csv_field(&finding.title),
            csv_field(&finding.detail),
            csv_field(&finding.recommendation),
        ));
    }

    out
}

/// Writes the findings checklist to a CSV file
pub fn write_findings_csv(path: &Path, audit: &SiteAudit) -> Result<()> {
    std::fs::write(path, findings_csv(audit))?;
    tracing::info!("wrote findings CSV to {}", path.display());
    Ok(())
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_field_unquoted() {
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn test_comma_field_quoted() {
        assert_eq!(csv_field("a,b"), "\"a,b\"");
    }

    #[test]
    fn test_quote_field_escaped() {
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_newline_field_quoted() {
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }
}
