use super::{Effort, Impact, Recommendation, RecommendationCategory, RecommendationOrigin};
use crate::audit::catalog::{page_builder_optimizations, platform_guidance, UseCase};
use crate::audit::domain::AuditContext;

/// Fixed remediation text for a finding family.
struct Template {
    title: &'static str,
    description: &'static str,
    impact: Impact,
    effort: Effort,
    category: RecommendationCategory,
    use_case: Option<UseCase>,
    page_builder_tips: bool,
    steps: &'static [&'static str],
}

enum RuleBuilder {
    Template(&'static Template),
    Custom(fn(&AuditContext<'_>) -> Recommendation),
}

/// Case-insensitive substring predicate paired with the record it produces.
struct KeywordRule {
    keywords: &'static [&'static str],
    build: RuleBuilder,
}

impl KeywordRule {
    fn matches(&self, needle: &str) -> bool {
        self.keywords.iter().any(|keyword| needle.contains(keyword))
    }

    fn build(&self, context: &AuditContext<'_>) -> Recommendation {
        match &self.build {
            RuleBuilder::Template(template) => from_template(template, context),
            RuleBuilder::Custom(build) => build(context),
        }
    }
}

const RENDER_BLOCKING: Template = Template {
    title: "Eliminate Render-Blocking Resources",
    description: "Stylesheets and scripts in the document head delay first paint until they download and execute.",
    impact: Impact::High,
    effort: Effort::Medium,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::AssetOptimization),
    page_builder_tips: true,
    steps: &[
        "Inline the critical CSS needed for above-the-fold content",
        "Load remaining stylesheets asynchronously with media=\"print\" onload swaps or preload",
        "Add defer or async to scripts that do not need to run before first paint",
    ],
};

const UNUSED_JAVASCRIPT: Template = Template {
    title: "Reduce Unused JavaScript",
    description: "Large portions of the shipped JavaScript never execute on this page but still cost download and parse time.",
    impact: Impact::High,
    effort: Effort::Hard,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::AssetOptimization),
    page_builder_tips: true,
    steps: &[
        "Use the Coverage panel in Chrome DevTools to find scripts with low usage",
        "Load feature scripts only on the pages that use them",
        "Split bundles so route-specific code is fetched on demand",
    ],
};

const UNUSED_CSS: Template = Template {
    title: "Remove Unused CSS",
    description: "Most rules in the loaded stylesheets do not apply to this page.",
    impact: Impact::Medium,
    effort: Effort::Medium,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::AssetOptimization),
    page_builder_tips: true,
    steps: &[
        "Generate per-page critical CSS and defer the full stylesheet",
        "Dequeue theme or plugin stylesheets on pages that never render their components",
    ],
};

const MINIFY: Template = Template {
    title: "Minify CSS and JavaScript",
    description: "Whitespace and comments in text assets add avoidable bytes to every page view.",
    impact: Impact::Low,
    effort: Effort::Easy,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::AssetOptimization),
    page_builder_tips: false,
    steps: &["Serve minified builds of every stylesheet and script"],
};

const OPTIMIZE_IMAGES: Template = Template {
    title: "Optimize Images",
    description: "Images are larger than their rendered size or use formats heavier than WebP/AVIF.",
    impact: Impact::High,
    effort: Effort::Easy,
    category: RecommendationCategory::Images,
    use_case: Some(UseCase::ImageOptimization),
    page_builder_tips: false,
    steps: &[
        "Resize images to the largest size they are displayed at",
        "Serve WebP or AVIF with a JPEG/PNG fallback",
        "Provide srcset so small screens download small files",
    ],
};

const LAZY_LOAD: Template = Template {
    title: "Lazy Load Offscreen Images",
    description: "Images below the fold are downloaded before the user can see them.",
    impact: Impact::Medium,
    effort: Effort::Easy,
    category: RecommendationCategory::Images,
    use_case: Some(UseCase::LazyLoading),
    page_builder_tips: false,
    steps: &[
        "Add loading=\"lazy\" to images and iframes below the fold",
        "Keep the hero image eager so it does not delay Largest Contentful Paint",
    ],
};

const SERVER_RESPONSE: Template = Template {
    title: "Improve Server Response Time",
    description: "The server takes too long to return the HTML document, delaying every other metric.",
    impact: Impact::High,
    effort: Effort::Hard,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::Caching),
    page_builder_tips: false,
    steps: &[
        "Serve cached HTML for anonymous visitors",
        "Upgrade to hosting with a current PHP/runtime version and object caching",
        "Profile slow database queries on the homepage and key templates",
    ],
};

const BROWSER_CACHING: Template = Template {
    title: "Leverage Browser Caching",
    description: "Static assets are served with short or missing cache lifetimes, so repeat visits download them again.",
    impact: Impact::Medium,
    effort: Effort::Easy,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::Caching),
    page_builder_tips: false,
    steps: &["Set Cache-Control max-age of at least one year for fingerprinted static assets"],
};

const TEXT_COMPRESSION: Template = Template {
    title: "Enable Text Compression",
    description: "HTML, CSS and JavaScript are sent uncompressed.",
    impact: Impact::Medium,
    effort: Effort::Easy,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::Caching),
    page_builder_tips: false,
    steps: &["Enable Brotli or GZIP compression on the web server or CDN"],
};

const MAIN_THREAD: Template = Template {
    title: "Minimize Main-Thread Work",
    description: "Script evaluation, style calculation and layout keep the main thread busy and delay interactivity.",
    impact: Impact::High,
    effort: Effort::Hard,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::AssetOptimization),
    page_builder_tips: true,
    steps: &[
        "Delay non-essential JavaScript until user interaction",
        "Break long tasks into smaller chunks",
    ],
};

const THIRD_PARTY: Template = Template {
    title: "Reduce Third-Party Code Impact",
    description: "Analytics, chat widgets and embeds block the main thread and add network round trips.",
    impact: Impact::Medium,
    effort: Effort::Medium,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::AssetOptimization),
    page_builder_tips: false,
    steps: &[
        "Audit third-party tags and remove the ones nobody uses",
        "Load chat widgets and video embeds on interaction with a facade",
    ],
};

const DOM_SIZE: Template = Template {
    title: "Reduce DOM Size",
    description: "A very large DOM increases memory use, style calculation and layout cost.",
    impact: Impact::Medium,
    effort: Effort::Hard,
    category: RecommendationCategory::Performance,
    use_case: None,
    page_builder_tips: true,
    steps: &[
        "Paginate or lazy-render long lists and mega menus",
        "Remove wrapper elements that only exist for spacing",
    ],
};

const LAYOUT_SHIFT: Template = Template {
    title: "Fix Layout Shifts",
    description: "Content moves after it first renders, which frustrates users and lowers Cumulative Layout Shift.",
    impact: Impact::Medium,
    effort: Effort::Medium,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::FontOptimization),
    page_builder_tips: false,
    steps: &[
        "Set explicit width and height on images, videos and ad slots",
        "Reserve space for banners and embeds injected after load",
    ],
};

const LARGEST_CONTENTFUL_PAINT: Template = Template {
    title: "Improve Largest Contentful Paint",
    description: "The main content element renders late.",
    impact: Impact::High,
    effort: Effort::Medium,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::ImageOptimization),
    page_builder_tips: false,
    steps: &[
        "Preload the hero image and serve it in a modern format",
        "Exclude the hero image from lazy loading",
    ],
};

const REDIRECTS: Template = Template {
    title: "Avoid Multiple Page Redirects",
    description: "Each redirect adds a full round trip before the page starts loading.",
    impact: Impact::Medium,
    effort: Effort::Medium,
    category: RecommendationCategory::Links,
    use_case: Some(UseCase::Redirects),
    page_builder_tips: false,
    steps: &["Link directly to final URLs and collapse http to https to www hops into one redirect"],
};

const WEB_FONTS: Template = Template {
    title: "Optimize Web Font Loading",
    description: "Text stays invisible while web fonts download.",
    impact: Impact::Low,
    effort: Effort::Easy,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::FontOptimization),
    page_builder_tips: false,
    steps: &["Add font-display: swap to every @font-face rule"],
};

const BROKEN_LINKS: Template = Template {
    title: "Fix Broken Links",
    description: "Links pointing at missing pages waste crawl budget and send visitors to dead ends.",
    impact: Impact::High,
    effort: Effort::Medium,
    category: RecommendationCategory::Links,
    use_case: Some(UseCase::LinkChecking),
    page_builder_tips: false,
    steps: &["Update or remove each link that returns a 4xx status"],
};

const CDN: Template = Template {
    title: "Use a Content Delivery Network",
    description: "Static assets are served from a single origin far from many visitors.",
    impact: Impact::Medium,
    effort: Effort::Medium,
    category: RecommendationCategory::Performance,
    use_case: Some(UseCase::Cdn),
    page_builder_tips: false,
    steps: &["Put images, stylesheets and scripts behind a CDN with edge caching"],
};

/// Evaluated top to bottom; the first rule with a matching keyword wins.
const RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["render-blocking", "render blocking"],
        build: RuleBuilder::Template(&RENDER_BLOCKING),
    },
    KeywordRule {
        keywords: &["unused javascript", "unused js"],
        build: RuleBuilder::Template(&UNUSED_JAVASCRIPT),
    },
    KeywordRule {
        keywords: &["unused css"],
        build: RuleBuilder::Template(&UNUSED_CSS),
    },
    KeywordRule {
        keywords: &["minify"],
        build: RuleBuilder::Template(&MINIFY),
    },
    KeywordRule {
        keywords: &["[alt]", "alt attribute", "alt text"],
        build: RuleBuilder::Custom(alt_text),
    },
    KeywordRule {
        keywords: &[
            "next-gen",
            "properly size",
            "encode images",
            "optimize images",
            "webp",
        ],
        build: RuleBuilder::Template(&OPTIMIZE_IMAGES),
    },
    KeywordRule {
        keywords: &["offscreen", "lazy load", "lazy-load"],
        build: RuleBuilder::Template(&LAZY_LOAD),
    },
    KeywordRule {
        keywords: &["server response", "ttfb", "time to first byte"],
        build: RuleBuilder::Template(&SERVER_RESPONSE),
    },
    KeywordRule {
        keywords: &["cache policy", "browser cach", "caching"],
        build: RuleBuilder::Template(&BROWSER_CACHING),
    },
    KeywordRule {
        keywords: &["text compression", "gzip", "brotli"],
        build: RuleBuilder::Template(&TEXT_COMPRESSION),
    },
    KeywordRule {
        keywords: &["main-thread", "main thread", "javascript execution"],
        build: RuleBuilder::Template(&MAIN_THREAD),
    },
    KeywordRule {
        keywords: &["third-party", "third party"],
        build: RuleBuilder::Template(&THIRD_PARTY),
    },
    KeywordRule {
        keywords: &["dom size"],
        build: RuleBuilder::Template(&DOM_SIZE),
    },
    KeywordRule {
        keywords: &["layout shift"],
        build: RuleBuilder::Template(&LAYOUT_SHIFT),
    },
    KeywordRule {
        keywords: &["largest contentful paint", "lcp"],
        build: RuleBuilder::Template(&LARGEST_CONTENTFUL_PAINT),
    },
    KeywordRule {
        keywords: &["redirect"],
        build: RuleBuilder::Template(&REDIRECTS),
    },
    KeywordRule {
        keywords: &["font-display", "web font", "webfont"],
        build: RuleBuilder::Template(&WEB_FONTS),
    },
    KeywordRule {
        keywords: &["meta description"],
        build: RuleBuilder::Custom(meta_descriptions),
    },
    KeywordRule {
        keywords: &["broken link"],
        build: RuleBuilder::Template(&BROKEN_LINKS),
    },
    KeywordRule {
        keywords: &["cdn", "content delivery"],
        build: RuleBuilder::Template(&CDN),
    },
];

/// Map one raw finding to a remediation record.
///
/// Findings no rule recognises keep their own text as the title.
pub fn enhance_recommendation(finding: &str, context: &AuditContext<'_>) -> Recommendation {
    let needle = finding.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&needle))
        .map(|rule| rule.build(context))
        .unwrap_or_else(|| fallback(finding))
}

fn from_template(template: &Template, context: &AuditContext<'_>) -> Recommendation {
    let mut steps = Vec::new();
    let mut plugins = Vec::new();

    if let Some(use_case) = template.use_case {
        let guidance = platform_guidance(context, use_case);
        steps.extend(guidance.steps);
        plugins.extend(guidance.plugins);
    }

    steps.extend(template.steps.iter().map(|step| step.to_string()));

    if template.page_builder_tips {
        if let Some(builder) = context.page_builder {
            steps.extend(
                page_builder_optimizations(builder)
                    .iter()
                    .map(|tip| tip.to_string()),
            );
        }
    }

    Recommendation {
        title: template.title.to_string(),
        description: template.description.to_string(),
        impact: template.impact,
        effort: template.effort,
        category: template.category,
        origin: RecommendationOrigin::Finding,
        steps,
        plugins,
    }
}

// The technical-issue table lists every image without alt text, so the finding adds nothing.
fn alt_text(context: &AuditContext<'_>) -> Recommendation {
    if context.technical_issues.missing_alt_text > 0 {
        return Recommendation::suppressed(RecommendationOrigin::Finding);
    }

    from_template(
        &Template {
            title: "Add Alt Text to Images",
            description: "Images without alt attributes are invisible to screen readers and image search.",
            impact: Impact::Medium,
            effort: Effort::Easy,
            category: RecommendationCategory::Images,
            use_case: Some(UseCase::Seo),
            page_builder_tips: false,
            steps: &["Describe each meaningful image in a short alt attribute; use alt=\"\" for decorative ones"],
        },
        context,
    )
}

fn meta_descriptions(context: &AuditContext<'_>) -> Recommendation {
    if context.technical_issues.missing_meta_descriptions > 0 {
        return Recommendation::suppressed(RecommendationOrigin::Finding);
    }

    from_template(
        &Template {
            title: "Add Meta Descriptions",
            description: "Pages without a meta description let search engines pick arbitrary snippet text.",
            impact: Impact::Medium,
            effort: Effort::Easy,
            category: RecommendationCategory::Metadata,
            use_case: Some(UseCase::Seo),
            page_builder_tips: false,
            steps: &["Write a unique 120-155 character description for each indexable page"],
        },
        context,
    )
}

fn fallback(finding: &str) -> Recommendation {
    Recommendation {
        title: finding.to_string(),
        description: "Reported by the audit. Review the affected resources and address the issue."
            .to_string(),
        impact: Impact::Medium,
        effort: Effort::Medium,
        category: RecommendationCategory::Performance,
        origin: RecommendationOrigin::Fallback,
        steps: Vec::new(),
        plugins: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::domain::{AuditResult, Cms, PageBuilder};

    fn wordpress_audit() -> AuditResult {
        let mut audit = AuditResult::new("https://shop.example.com");
        audit.cms = Some(Cms::WordPress);
        audit
    }

    #[test]
    fn matches_keywords_case_insensitively() {
        let audit = AuditResult::new("https://example.com");
        let record = enhance_recommendation("Eliminate RENDER-BLOCKING resources", &audit.context());

        assert_eq!(record.title, "Eliminate Render-Blocking Resources");
        assert_eq!(record.impact, Impact::High);
        assert_eq!(record.origin, RecommendationOrigin::Finding);
        assert!(record.plugins.is_empty());
    }

    #[test]
    fn first_matching_rule_wins() {
        let audit = AuditResult::new("https://example.com");
        // Mentions both unused CSS and minification; the earlier rule applies.
        let record = enhance_recommendation(
            "Reduce unused CSS and minify the remainder",
            &audit.context(),
        );

        assert_eq!(record.title, "Remove Unused CSS");
    }

    #[test]
    fn unmatched_findings_fall_back_to_their_own_text() {
        let audit = AuditResult::new("https://example.com");
        let record =
            enhance_recommendation("Avoid enormous network payloads", &audit.context());

        assert_eq!(record.title, "Avoid enormous network payloads");
        assert_eq!(record.origin, RecommendationOrigin::Fallback);
        assert_eq!(record.impact, Impact::Medium);
    }

    #[test]
    fn wordpress_findings_suggest_catalog_plugins() {
        let audit = wordpress_audit();
        let record = enhance_recommendation(
            "Serve images in next-gen formats",
            &audit.context(),
        );

        assert_eq!(record.title, "Optimize Images");
        assert_eq!(record.plugins, vec!["ShortPixel", "Imagify", "Smush"]);
        assert!(record.steps[0].starts_with("Install an image optimization plugin"));
    }

    #[test]
    fn detected_plugin_is_configured() {
        let mut audit = wordpress_audit();
        audit.plugins = vec!["WP Rocket".to_string()];
        let record = enhance_recommendation(
            "Serve static assets with an efficient cache policy",
            &audit.context(),
        );

        assert_eq!(record.title, "Leverage Browser Caching");
        assert_eq!(record.plugins, vec!["WP Rocket"]);
        assert!(record.steps[0].contains("already installed"));
    }

    #[test]
    fn page_builder_tips_are_appended_for_dom_findings() {
        let mut audit = wordpress_audit();
        audit.page_builder = Some(PageBuilder::Elementor);
        let record = enhance_recommendation("Avoid an excessive DOM size", &audit.context());

        assert_eq!(record.title, "Reduce DOM Size");
        assert!(record
            .steps
            .last()
            .expect("steps present")
            .contains("Elementor"));
    }

    #[test]
    fn alt_text_finding_is_suppressed_when_counted_elsewhere() {
        let mut audit = AuditResult::new("https://example.com");
        let finding = "Image elements do not have [alt] attributes";

        let record = enhance_recommendation(finding, &audit.context());
        assert_eq!(record.title, "Add Alt Text to Images");

        audit.technical_issues.missing_alt_text = 4;
        let record = enhance_recommendation(finding, &audit.context());
        assert!(record.is_suppressed());
    }

    #[test]
    fn meta_description_finding_is_suppressed_when_counted_elsewhere() {
        let mut audit = AuditResult::new("https://example.com");
        audit.technical_issues.missing_meta_descriptions = 1;

        let record =
            enhance_recommendation("Document does not have a meta description", &audit.context());
        assert!(record.is_suppressed());
    }

    #[test]
    fn empty_findings_produce_suppressed_fallbacks() {
        let audit = AuditResult::new("https://example.com");
        assert!(enhance_recommendation("", &audit.context()).is_suppressed());
    }
}
