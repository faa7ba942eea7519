use super::Recommendation;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How many raw findings are enriched and how many ranked records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub finding_limit: usize,
    pub recommendation_limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            finding_limit: 6,
            recommendation_limit: 10,
        }
    }
}

/// Drop suppressed records, keep the first of each title, then order by impact.
///
/// The sort is stable: records of equal impact keep their insertion order, so technical
/// issues stay ahead of finding-derived records. Effort plays no part in the order.
pub fn prioritize(records: Vec<Recommendation>, limit: usize) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    let mut ranked: Vec<Recommendation> = records
        .into_iter()
        .filter(|record| !record.is_suppressed())
        .filter(|record| seen.insert(record.title.clone()))
        .collect();

    ranked.sort_by_key(|record| record.impact.rank());
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::recommendations::{
        Effort, Impact, RecommendationCategory, RecommendationOrigin,
    };

    fn record(title: &str, impact: Impact, effort: Effort) -> Recommendation {
        Recommendation {
            title: title.to_string(),
            description: format!("{title} description"),
            impact,
            effort,
            category: RecommendationCategory::Performance,
            origin: RecommendationOrigin::Finding,
            steps: Vec::new(),
            plugins: Vec::new(),
        }
    }

    fn titles(records: &[Recommendation]) -> Vec<&str> {
        records.iter().map(|record| record.title.as_str()).collect()
    }

    #[test]
    fn sorts_by_impact_and_keeps_insertion_order_within_a_level() {
        let ranked = prioritize(
            vec![
                record("low-a", Impact::Low, Effort::Easy),
                record("high-a", Impact::High, Effort::Hard),
                record("medium-a", Impact::Medium, Effort::Easy),
                record("high-b", Impact::High, Effort::Easy),
                record("low-b", Impact::Low, Effort::Hard),
            ],
            10,
        );

        assert_eq!(
            titles(&ranked),
            vec!["high-a", "high-b", "medium-a", "low-a", "low-b"]
        );
    }

    #[test]
    fn duplicate_titles_keep_the_first_occurrence() {
        let ranked = prioritize(
            vec![
                record("Fix Broken Links", Impact::Medium, Effort::Medium),
                record("Optimize Images", Impact::High, Effort::Easy),
                record("Fix Broken Links", Impact::High, Effort::Easy),
            ],
            10,
        );

        assert_eq!(titles(&ranked), vec!["Optimize Images", "Fix Broken Links"]);
        assert_eq!(ranked[1].impact, Impact::Medium);
    }

    #[test]
    fn suppressed_records_are_removed_before_dedupe() {
        let ranked = prioritize(
            vec![
                Recommendation::suppressed(RecommendationOrigin::Finding),
                record("Keep", Impact::Low, Effort::Easy),
                Recommendation::suppressed(RecommendationOrigin::Finding),
            ],
            10,
        );

        assert_eq!(titles(&ranked), vec!["Keep"]);
    }

    #[test]
    fn whitespace_titles_are_not_suppressed() {
        let ranked = prioritize(vec![record(" ", Impact::Low, Effort::Easy)], 10);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn truncates_after_sorting() {
        let mut records: Vec<Recommendation> = (0..12)
            .map(|index| record(&format!("low-{index}"), Impact::Low, Effort::Easy))
            .collect();
        records.push(record("late-high", Impact::High, Effort::Hard));

        let ranked = prioritize(records, 10);

        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].title, "late-high");
        assert_eq!(ranked[9].title, "low-8");
    }

    #[test]
    fn output_is_unique_and_non_decreasing_in_rank() {
        let impacts = [Impact::Medium, Impact::Low, Impact::High];
        let records: Vec<Recommendation> = (0..30)
            .map(|index| {
                record(
                    &format!("item-{}", index % 17),
                    impacts[index % impacts.len()],
                    Effort::Medium,
                )
            })
            .collect();

        let ranked = prioritize(records, 10);

        assert!(ranked.len() <= 10);
        let unique: HashSet<&str> = ranked.iter().map(|record| record.title.as_str()).collect();
        assert_eq!(unique.len(), ranked.len());
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].impact.rank() <= pair[1].impact.rank()));
    }
}
