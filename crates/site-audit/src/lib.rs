//! Recommendation ranking and audit summaries for website SEO and performance audits.
//!
//! An [`audit::AuditResult`] collected elsewhere (PageSpeed findings, crawl counts, detected
//! CMS and plugins) is turned into a short, prioritized list of remediation steps.

pub mod audit;
pub mod config;
pub mod error;
pub mod telemetry;
