use super::{Effort, Impact, Recommendation, RecommendationCategory, RecommendationOrigin};
use crate::audit::catalog::{platform_guidance, UseCase};
use crate::audit::domain::{AuditContext, Cms, PageBuilder};

/// Recommendations synthesized from crawl counts, in a fixed order.
pub fn technical_issue_recommendations(context: &AuditContext<'_>) -> Vec<Recommendation> {
    let issues = context.technical_issues;
    let mut records = Vec::new();

    if issues.broken_links > 0 {
        records.push(build(
            context,
            "Fix Broken Links",
            format!(
                "{} returning 4xx or 5xx responses {} found during the crawl.",
                plural(issues.broken_links, "link"),
                were(issues.broken_links)
            ),
            (Impact::High, Effort::Medium, RecommendationCategory::Links),
            Some(UseCase::LinkChecking),
            vec![
                "Export the broken URL list with the pages that link to them".to_string(),
                "Update each link to the correct destination or remove it".to_string(),
                "Add 301 redirects for removed pages that still receive external links"
                    .to_string(),
            ],
        ));
    }

    if issues.missing_titles > 0 {
        records.push(build(
            context,
            "Add Missing Page Titles",
            format!(
                "{} {} no <title> element; search results will show a generated title.",
                plural(issues.missing_titles, "page"),
                have(issues.missing_titles)
            ),
            (Impact::High, Effort::Easy, RecommendationCategory::Metadata),
            Some(UseCase::Seo),
            vec!["Write a unique title under 60 characters that leads with the page topic"
                .to_string()],
        ));
    }

    if issues.missing_h1 > 0 {
        records.push(build(
            context,
            "Add Missing H1 Headings",
            format!(
                "{} {} no H1 heading describing the main topic.",
                plural(issues.missing_h1, "page"),
                have(issues.missing_h1)
            ),
            (Impact::High, Effort::Easy, RecommendationCategory::Content),
            None,
            heading_steps(context, "Add exactly one H1 that states the page's primary topic"),
        ));
    }

    if issues.multiple_h1 > 0 {
        records.push(build(
            context,
            "Use a Single H1 per Page",
            format!(
                "{} {} more than one H1, which blurs the page's main topic.",
                plural(issues.multiple_h1, "page"),
                have(issues.multiple_h1)
            ),
            (Impact::Medium, Effort::Easy, RecommendationCategory::Content),
            None,
            heading_steps(context, "Keep one H1 and demote the other headings to H2 or H3"),
        ));
    }

    if issues.missing_meta_descriptions > 0 {
        records.push(build(
            context,
            "Add Meta Descriptions",
            format!(
                "{} {} no meta description, so search engines pick snippet text themselves.",
                plural(issues.missing_meta_descriptions, "page"),
                have(issues.missing_meta_descriptions)
            ),
            (Impact::Medium, Effort::Easy, RecommendationCategory::Metadata),
            Some(UseCase::Seo),
            vec!["Write a unique 120-155 character description for each page".to_string()],
        ));
    }

    if issues.duplicate_titles > 0 {
        records.push(build(
            context,
            "Make Page Titles Unique",
            format!(
                "{} {} a title used elsewhere on the site.",
                plural(issues.duplicate_titles, "page"),
                share(issues.duplicate_titles)
            ),
            (Impact::Medium, Effort::Medium, RecommendationCategory::Metadata),
            Some(UseCase::Seo),
            vec![
                "Differentiate titles with the product, location or category of each page"
                    .to_string(),
                "Canonicalize or noindex paginated and filtered duplicates".to_string(),
            ],
        ));
    }

    if issues.missing_alt_text > 0 {
        let mut steps =
            vec!["Describe each meaningful image in a short alt attribute".to_string()];
        if context.is_wordpress() {
            steps.push(
                "In Media > Library, open each image and fill in the Alternative Text field"
                    .to_string(),
            );
        } else if context.cms == Some(Cms::Shopify) {
            steps.push(
                "In Products > [product] > Media, use Add alt text on each image".to_string(),
            );
        }
        records.push(build(
            context,
            "Add Alt Text to Images",
            format!(
                "{} {} missing alt text.",
                plural(issues.missing_alt_text, "image"),
                are(issues.missing_alt_text)
            ),
            (Impact::Medium, Effort::Easy, RecommendationCategory::Images),
            None,
            steps,
        ));
    }

    if issues.redirect_chains > 0 {
        records.push(build(
            context,
            "Collapse Redirect Chains",
            format!(
                "{} {} through more than one hop before reaching the final URL.",
                plural(issues.redirect_chains, "redirect"),
                pass(issues.redirect_chains)
            ),
            (Impact::Medium, Effort::Medium, RecommendationCategory::Links),
            Some(UseCase::Redirects),
            vec!["Point every redirect and internal link at the final destination".to_string()],
        ));
    }

    if issues.missing_canonical > 0 {
        records.push(build(
            context,
            "Add Canonical Tags",
            format!(
                "{} {} no canonical URL.",
                plural(issues.missing_canonical, "page"),
                have(issues.missing_canonical)
            ),
            (Impact::Low, Effort::Easy, RecommendationCategory::Crawlability),
            Some(UseCase::Seo),
            vec!["Add a self-referencing rel=\"canonical\" link to each indexable page"
                .to_string()],
        ));
    }

    if issues.sitemap_found == Some(false) {
        records.push(build(
            context,
            "Create an XML Sitemap",
            "No XML sitemap was found at the usual locations.".to_string(),
            (Impact::Medium, Effort::Easy, RecommendationCategory::Crawlability),
            Some(UseCase::Seo),
            vec![
                "Publish /sitemap.xml listing every indexable URL".to_string(),
                "Submit the sitemap in Google Search Console".to_string(),
            ],
        ));
    }

    if issues.robots_txt_found == Some(false) {
        records.push(build(
            context,
            "Add a robots.txt File",
            "The site does not serve /robots.txt.".to_string(),
            (Impact::Low, Effort::Easy, RecommendationCategory::Crawlability),
            None,
            vec!["Serve a robots.txt that allows crawling and references the sitemap".to_string()],
        ));
    }

    records
}

fn build(
    context: &AuditContext<'_>,
    title: &str,
    description: String,
    (impact, effort, category): (Impact, Effort, RecommendationCategory),
    use_case: Option<UseCase>,
    generic_steps: Vec<String>,
) -> Recommendation {
    let mut steps = Vec::new();
    let mut plugins = Vec::new();

    if let Some(use_case) = use_case {
        let guidance = platform_guidance(context, use_case);
        steps.extend(guidance.steps);
        plugins.extend(guidance.plugins);
    }
    steps.extend(generic_steps);

    Recommendation {
        title: title.to_string(),
        description,
        impact,
        effort,
        category,
        origin: RecommendationOrigin::TechnicalIssue,
        steps,
        plugins,
    }
}

fn heading_steps(context: &AuditContext<'_>, generic: &str) -> Vec<String> {
    let mut steps = vec![generic.to_string()];

    if let Some(builder) = context
        .page_builder
        .filter(|builder| *builder != PageBuilder::Unknown)
    {
        steps.push(format!(
            "In {}, select the main Heading widget and set its HTML tag to H1; use H2 for the rest",
            builder.label()
        ));
    } else if context.is_wordpress() {
        steps.push(
            "In the block editor, make the page title the only Heading block set to H1".to_string(),
        );
    } else if let Some(cms) = context.cms.filter(|cms| cms.is_hosted()) {
        steps.push(format!(
            "In the {} editor, apply the Heading 1 text style to the main headline only",
            cms.label()
        ));
    }

    steps
}

fn plural(count: u32, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn verb(count: u32, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

fn were(count: u32) -> &'static str {
    verb(count, "was", "were")
}

fn have(count: u32) -> &'static str {
    verb(count, "has", "have")
}

fn are(count: u32) -> &'static str {
    verb(count, "is", "are")
}

fn share(count: u32) -> &'static str {
    verb(count, "shares", "share")
}

fn pass(count: u32) -> &'static str {
    verb(count, "passes", "pass")
}
