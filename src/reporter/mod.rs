//! Rendering of run reports.
//!
//! A [`RunReport`] is plain data; reporters turn it into human- or
//! machine-readable output without touching the run itself.
mod json;
mod text;

pub use json::JsonReporter;
pub use text::TextReporter;

use crate::report::RunReport;

/// Renders a finished run.
pub trait Reporter {
    /// Print the report to the given writer.
    fn print(&self, w: &mut dyn std::io::Write, report: &RunReport) -> anyhow::Result<()>;
}
