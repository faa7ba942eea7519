use crate::infra::sample_audit;
use clap::{Args, ValueEnum};
use site_audit::audit::{
    analyze_audit, recommendation_views, write_csv, AuditAnalysis, AuditResult, Impact,
    RecommendationEngine, RecommendationFilter, RecommendationView,
};
use site_audit::config::AppConfig;
use site_audit::error::AppError;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AuditReportArgs {
    /// Audit result JSON file (defaults to a bundled WordPress sample)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
    /// Only list recommendations with this impact
    #[arg(long, value_enum)]
    pub(crate) impact: Option<ImpactArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ImpactArg {
    High,
    Medium,
    Low,
}

impl From<ImpactArg> for Impact {
    fn from(value: ImpactArg) -> Self {
        match value {
            ImpactArg::High => Impact::High,
            ImpactArg::Medium => Impact::Medium,
            ImpactArg::Low => Impact::Low,
        }
    }
}

pub(crate) fn run_audit_report(args: AuditReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let audit = load_audit(args.input.as_ref())?;
    let engine = RecommendationEngine::new(config.ranking);
    let analysis = analyze_audit(&engine, &audit)?;

    let filter = RecommendationFilter {
        impact: args.impact.map(Impact::from),
        ..RecommendationFilter::default()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_report(&analysis, &filter, args.format, &mut out)
}

fn load_audit(input: Option<&PathBuf>) -> Result<AuditResult, AppError> {
    match input {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(sample_audit()?),
    }
}

pub(crate) fn render_report<W: Write>(
    analysis: &AuditAnalysis,
    filter: &RecommendationFilter,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), AppError> {
    let views = filter.apply(recommendation_views(&analysis.recommendations));

    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "summary": &analysis.summary,
                "recommendations": views,
            });
            serde_json::to_writer_pretty(&mut *out, &payload)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(&mut *out, &views)?,
        OutputFormat::Table => render_table(analysis, &views, out)?,
    }
    Ok(())
}

fn render_table<W: Write>(
    analysis: &AuditAnalysis,
    views: &[RecommendationView],
    out: &mut W,
) -> io::Result<()> {
    let summary = &analysis.summary;
    writeln!(out, "Site audit for {}", summary.url)?;
    match (summary.overall_score, summary.health) {
        (Some(score), Some(health)) => {
            writeln!(out, "Overall score: {} ({})", score, health.label())?
        }
        _ => writeln!(out, "Overall score: not reported")?,
    }
    writeln!(
        out,
        "Issues: {} critical, {} warning, {} notice",
        summary.severity_counts.critical,
        summary.severity_counts.warning,
        summary.severity_counts.notice
    )?;

    if !summary.quick_wins.is_empty() {
        writeln!(out, "Quick wins: {}", summary.quick_wins.join(", "))?;
    }

    writeln!(out, "\nRecommendations:")?;
    if views.is_empty() {
        writeln!(out, "  none")?;
        return Ok(());
    }

    for view in views {
        writeln!(
            out,
            "  {:>2}. [{:<6}] {} (effort: {}, {})",
            view.rank, view.impact_label, view.title, view.effort_label, view.category_label
        )?;
        for step in &view.steps {
            writeln!(out, "        - {step}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_audit::audit::RankingConfig;

    fn sample_analysis() -> AuditAnalysis {
        let engine = RecommendationEngine::new(RankingConfig::default());
        let audit = sample_audit().expect("sample parses");
        analyze_audit(&engine, &audit).expect("sample is valid")
    }

    fn render(filter: &RecommendationFilter, format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        render_report(&sample_analysis(), filter, format, &mut buffer).expect("report renders");
        String::from_utf8(buffer).expect("utf8 output")
    }

    #[test]
    fn table_lists_summary_and_ranked_titles() {
        let output = render(&RecommendationFilter::default(), OutputFormat::Table);

        assert!(output.starts_with("Site audit for https://bakery.example.com"));
        assert!(output.contains("Overall score: 73 (Needs Improvement)"));
        assert!(output.contains(" 1. [High  ] Fix Broken Links"));
        assert!(output.contains("Quick wins: "));
    }

    #[test]
    fn impact_filter_keeps_original_ranks() {
        let filter = RecommendationFilter {
            impact: Some(Impact::Medium),
            ..RecommendationFilter::default()
        };
        let output = render(&filter, OutputFormat::Csv);
        let rows: Vec<&str> = output.lines().skip(1).collect();

        assert!(!rows.is_empty());
        assert!(rows.iter().all(|row| row.contains(",Medium,")));
        assert!(!rows[0].starts_with("1,"));
    }

    #[test]
    fn json_output_includes_summary() {
        let output = render(&RecommendationFilter::default(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(value["summary"]["overall_score"], 73);
        assert_eq!(value["recommendations"][0]["title"], "Fix Broken Links");
    }
}
