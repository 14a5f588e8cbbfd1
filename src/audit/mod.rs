//! Audit pipeline orchestration and the findings checklist

mod findings;
mod orchestrator;

pub use findings::{derive_findings, Finding, Priority};
pub use orchestrator::{
    Auditor, ComparativeEntry, ComparativeReport, SiteAudit, SkippedTarget, COMPETITOR_CAP,
};
