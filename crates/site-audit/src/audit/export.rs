use super::views::RecommendationView;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write recommendation csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush recommendation csv: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct CsvRow<'a> {
    rank: usize,
    title: &'a str,
    impact: &'a str,
    effort: &'a str,
    category: &'a str,
    description: &'a str,
    steps: String,
}

/// Write ranked recommendations as CSV with a header row.
pub fn write_csv<W: Write>(writer: W, views: &[RecommendationView]) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    for view in views {
        out.serialize(CsvRow {
            rank: view.rank,
            title: &view.title,
            impact: view.impact_label,
            effort: view.effort_label,
            category: view.category_label,
            description: &view.description,
            steps: view.steps.join(" | "),
        })?;
    }
    out.flush()?;
    Ok(())
}
