use super::recommendations::{Effort, Impact, Recommendation, RecommendationCategory};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationView {
    pub rank: usize,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub impact_label: &'static str,
    pub effort: Effort,
    pub effort_label: &'static str,
    pub category: RecommendationCategory,
    pub category_label: &'static str,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
}

impl RecommendationView {
    pub fn new(rank: usize, record: &Recommendation) -> Self {
        Self {
            rank,
            title: record.title.clone(),
            description: record.description.clone(),
            impact: record.impact,
            impact_label: record.impact.label(),
            effort: record.effort,
            effort_label: record.effort.label(),
            category: record.category,
            category_label: record.category.label(),
            steps: record.steps.clone(),
            plugins: record.plugins.clone(),
        }
    }
}

/// Ranks are 1-based and follow the ranked list order.
pub fn recommendation_views(ranked: &[Recommendation]) -> Vec<RecommendationView> {
    ranked
        .iter()
        .enumerate()
        .map(|(index, record)| RecommendationView::new(index + 1, record))
        .collect()
}

/// Dashboard filter; unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RecommendationFilter {
    #[serde(default)]
    pub impact: Option<Impact>,
    #[serde(default)]
    pub effort: Option<Effort>,
    #[serde(default)]
    pub category: Option<RecommendationCategory>,
}

impl RecommendationFilter {
    pub fn matches(&self, view: &RecommendationView) -> bool {
        self.impact.map_or(true, |impact| view.impact == impact)
            && self.effort.map_or(true, |effort| view.effort == effort)
            && self
                .category
                .map_or(true, |category| view.category == category)
    }

    /// Ranks are kept from the unfiltered list.
    pub fn apply(&self, views: Vec<RecommendationView>) -> Vec<RecommendationView> {
        views.into_iter().filter(|view| self.matches(view)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice one 1-based page out of `items`. Page 0 is read as page 1 and `per_page` is
/// clamped to `1..=MAX_PAGE_SIZE`; pages past the end come back empty.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.clamp(1, MAX_PAGE_SIZE);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}
