use serde::{Deserialize, Serialize};

/// Content-management system detected on the audited site.
///
/// Payloads carry whatever label the detector produced, so deserialization goes
/// through [`Cms::detect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Cms {
    #[serde(rename = "wordpress")]
    WordPress,
    Shopify,
    Wix,
    Squarespace,
    Drupal,
    Joomla,
    Webflow,
    Unknown,
}

impl Cms {
    /// Parse a free-form detection label such as `"WordPress 6.4"` or `"Shopify Plus"`.
    pub fn detect(label: &str) -> Self {
        let label = label.trim().to_ascii_lowercase();
        let known = [
            ("wordpress", Self::WordPress),
            ("woocommerce", Self::WordPress),
            ("shopify", Self::Shopify),
            ("wix", Self::Wix),
            ("squarespace", Self::Squarespace),
            ("drupal", Self::Drupal),
            ("joomla", Self::Joomla),
            ("webflow", Self::Webflow),
        ];

        known
            .into_iter()
            .find(|(needle, _)| label.contains(needle))
            .map(|(_, cms)| cms)
            .unwrap_or(Self::Unknown)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::WordPress => "WordPress",
            Self::Shopify => "Shopify",
            Self::Wix => "Wix",
            Self::Squarespace => "Squarespace",
            Self::Drupal => "Drupal",
            Self::Joomla => "Joomla",
            Self::Webflow => "Webflow",
            Self::Unknown => "Unknown CMS",
        }
    }

    /// Hosted builders expose settings panels instead of installable plugins.
    pub const fn is_hosted(self) -> bool {
        matches!(self, Self::Wix | Self::Squarespace | Self::Webflow)
    }
}

impl From<String> for Cms {
    fn from(value: String) -> Self {
        Self::detect(&value)
    }
}

/// Visual page builder layered on top of the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum PageBuilder {
    Elementor,
    Divi,
    WpBakery,
    BeaverBuilder,
    Unknown,
}

impl PageBuilder {
    /// Accepts display labels (`"Beaver Builder"`, `"WPBakery"`) as well as snake_case names.
    pub fn detect(label: &str) -> Self {
        let compact: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let known = [
            ("elementor", Self::Elementor),
            ("divi", Self::Divi),
            ("wpbakery", Self::WpBakery),
            ("beaverbuilder", Self::BeaverBuilder),
        ];

        known
            .into_iter()
            .find(|(needle, _)| compact.contains(needle))
            .map(|(_, builder)| builder)
            .unwrap_or(Self::Unknown)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Elementor => "Elementor",
            Self::Divi => "Divi",
            Self::WpBakery => "WPBakery",
            Self::BeaverBuilder => "Beaver Builder",
            Self::Unknown => "page builder",
        }
    }
}

impl From<String> for PageBuilder {
    fn from(value: String) -> Self {
        Self::detect(&value)
    }
}

/// Structured crawl counts. `None` on the boolean checks means the check did not run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalIssues {
    pub broken_links: u32,
    pub missing_titles: u32,
    pub missing_h1: u32,
    pub multiple_h1: u32,
    pub missing_meta_descriptions: u32,
    pub duplicate_titles: u32,
    pub missing_alt_text: u32,
    pub redirect_chains: u32,
    pub missing_canonical: u32,
    pub sitemap_found: Option<bool>,
    pub robots_txt_found: Option<bool>,
}

/// Lighthouse-style category scores on a 0-100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryScores {
    pub performance: Option<u8>,
    pub seo: Option<u8>,
    pub accessibility: Option<u8>,
    pub best_practices: Option<u8>,
}

impl CategoryScores {
    pub fn entries(&self) -> [(&'static str, Option<u8>); 4] {
        [
            ("Performance", self.performance),
            ("SEO", self.seo),
            ("Accessibility", self.accessibility),
            ("Best Practices", self.best_practices),
        ]
    }
}

/// One audit run against a target URL, as collected by the crawler and PageSpeed probes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    pub url: String,
    #[serde(default)]
    pub cms: Option<Cms>,
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub page_builder: Option<PageBuilder>,
    #[serde(default)]
    pub findings: Vec<String>,
    #[serde(default)]
    pub technical_issues: TechnicalIssues,
    #[serde(default)]
    pub scores: CategoryScores,
}

impl AuditResult {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cms: None,
            plugins: Vec::new(),
            page_builder: None,
            findings: Vec::new(),
            technical_issues: TechnicalIssues::default(),
            scores: CategoryScores::default(),
        }
    }

    pub fn validate(&self) -> Result<(), AuditInputError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(AuditInputError::MissingUrl);
        }

        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(AuditInputError::UnsupportedScheme(url.to_string()));
        };
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(AuditInputError::UnsupportedScheme(scheme.to_string()));
        }
        if rest.trim_start_matches('/').is_empty() {
            return Err(AuditInputError::MissingHost(url.to_string()));
        }

        for (category, score) in self.scores.entries() {
            if let Some(score) = score {
                if score > 100 {
                    return Err(AuditInputError::ScoreOutOfRange { category, score });
                }
            }
        }

        Ok(())
    }

    pub fn context(&self) -> AuditContext<'_> {
        AuditContext {
            cms: self.cms,
            plugins: &self.plugins,
            page_builder: self.page_builder,
            technical_issues: &self.technical_issues,
        }
    }
}

/// Borrowed view handed to every recommendation builder.
#[derive(Debug, Clone, Copy)]
pub struct AuditContext<'a> {
    pub cms: Option<Cms>,
    pub plugins: &'a [String],
    pub page_builder: Option<PageBuilder>,
    pub technical_issues: &'a TechnicalIssues,
}

impl AuditContext<'_> {
    pub fn is_wordpress(&self) -> bool {
        self.cms == Some(Cms::WordPress)
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.plugins
            .iter()
            .any(|plugin| plugin.to_lowercase().contains(&needle))
    }
}

/// Rejections raised before an audit enters the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuditInputError {
    #[error("audit url is required")]
    MissingUrl,
    #[error("audit url must use http or https (got {0})")]
    UnsupportedScheme(String),
    #[error("audit url {0} has no host")]
    MissingHost(String),
    #[error("{category} score {score} exceeds 100")]
    ScoreOutOfRange { category: &'static str, score: u8 },
}
