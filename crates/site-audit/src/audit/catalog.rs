//! Static remediation tables keyed by platform, use case and page builder.
//!
//! Recommendation builders never branch on plugin names themselves; they ask this module
//! for instruction lines, so adding a platform means adding rows here.

use super::domain::{AuditContext, Cms, PageBuilder};
use serde::Serialize;

/// Remediation concern a plugin or platform setting can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UseCase {
    Caching,
    ImageOptimization,
    AssetOptimization,
    LazyLoading,
    Cdn,
    Seo,
    FontOptimization,
    LinkChecking,
    Redirects,
}

impl UseCase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Caching => "caching",
            Self::ImageOptimization => "image optimization",
            Self::AssetOptimization => "asset optimization",
            Self::LazyLoading => "lazy loading",
            Self::Cdn => "CDN",
            Self::Seo => "SEO",
            Self::FontOptimization => "font optimization",
            Self::LinkChecking => "link checking",
            Self::Redirects => "redirect management",
        }
    }

    const fn article(self) -> &'static str {
        match self {
            Self::ImageOptimization | Self::AssetOptimization | Self::Seo => "an",
            _ => "a",
        }
    }

    /// What to switch on once a plugin for this use case is installed.
    pub const fn configure_hint(self) -> &'static str {
        match self {
            Self::Caching => "enable page caching, browser caching and GZIP/Brotli compression",
            Self::ImageOptimization => "turn on WebP/AVIF conversion and bulk-compress the media library",
            Self::AssetOptimization => "enable CSS/JS minification, defer non-critical JavaScript and remove unused CSS",
            Self::LazyLoading => "enable lazy loading for images and iframes below the fold",
            Self::Cdn => "connect the CDN zone and rewrite static asset URLs",
            Self::Seo => "fill in the title and meta description templates for every post type",
            Self::FontOptimization => "preload the primary font files and set font-display: swap",
            Self::LinkChecking => "run a full scan and fix or unlink every reported URL",
            Self::Redirects => "point each legacy URL straight at its final destination",
        }
    }

    const fn hosted_setting(self) -> &'static str {
        match self {
            Self::Caching | Self::Cdn => "caching and CDN delivery are managed by the platform; keep custom code embeds to a minimum",
            Self::ImageOptimization | Self::LazyLoading => "upload images at display size; the platform handles format conversion and lazy loading",
            Self::AssetOptimization | Self::FontOptimization => "remove unused apps, embeds and custom fonts from the site settings",
            Self::Seo => "complete the SEO title and description fields in each page's settings panel",
            Self::LinkChecking | Self::Redirects => "manage URL redirects from the platform's SEO or redirect settings",
        }
    }
}

/// Plugin (or app/module/extension) that handles a use case on a given platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginSuggestion {
    pub name: &'static str,
    pub note: &'static str,
}

const fn plugin(name: &'static str, note: &'static str) -> PluginSuggestion {
    PluginSuggestion { name, note }
}

const WORDPRESS_CACHING: &[PluginSuggestion] = &[
    plugin("WP Rocket", "premium, page and browser caching out of the box"),
    plugin("LiteSpeed Cache", "free, best on LiteSpeed hosting"),
    plugin("W3 Total Cache", "free, granular cache controls"),
    plugin("WP Super Cache", "free, static HTML caching"),
];
const WORDPRESS_IMAGES: &[PluginSuggestion] = &[
    plugin("ShortPixel", "lossy/lossless compression with WebP and AVIF"),
    plugin("Imagify", "bulk optimization with WebP conversion"),
    plugin("Smush", "free compression and lazy loading"),
    plugin("EWWW Image Optimizer", "local compression without API limits"),
];
const WORDPRESS_ASSETS: &[PluginSuggestion] = &[
    plugin("WP Rocket", "file optimization tab handles minify and defer"),
    plugin("Autoptimize", "free CSS/JS aggregation and minification"),
    plugin("Perfmatters", "disables unused scripts per page"),
    plugin("Asset CleanUp", "unloads plugin assets where they are not used"),
];
const WORDPRESS_LAZY: &[PluginSuggestion] = &[
    plugin("WP Rocket", "LazyLoad for images, iframes and videos"),
    plugin("a3 Lazy Load", "free lazy loading for all media"),
    plugin("Smush", "free lazy loading toggle"),
];
const WORDPRESS_CDN: &[PluginSuggestion] = &[
    plugin("Cloudflare", "official plugin with automatic platform optimization"),
    plugin("BunnyCDN", "pull zone integration"),
    plugin("WP Rocket", "RocketCDN add-on"),
];
const WORDPRESS_SEO: &[PluginSuggestion] = &[
    plugin("Yoast SEO", "title and meta templates per post type"),
    plugin("Rank Math", "bulk meta editing and schema"),
    plugin("All in One SEO", "meta defaults and sitemap generation"),
];
const WORDPRESS_FONTS: &[PluginSuggestion] = &[
    plugin("OMGF", "hosts Google Fonts locally with font-display"),
    plugin("Perfmatters", "local fonts and preload settings"),
];
const WORDPRESS_LINKS: &[PluginSuggestion] = &[
    plugin("Broken Link Checker", "scans posts, comments and menus"),
    plugin("Redirection", "logs 404s and creates redirects"),
];
const WORDPRESS_REDIRECTS: &[PluginSuggestion] = &[
    plugin("Redirection", "manages 301s and flags chains"),
    plugin("Rank Math", "built-in redirect manager"),
];

const SHOPIFY_IMAGES: &[PluginSuggestion] = &[
    plugin("TinyIMG", "compression plus alt text automation"),
    plugin("Crush.pics", "automatic compression on upload"),
];
const SHOPIFY_ASSETS: &[PluginSuggestion] = &[
    plugin("Booster: Page Speed Optimizer", "preloading and script deferral"),
    plugin("Hyperspeed", "minification and lazy loading"),
];
const SHOPIFY_SEO: &[PluginSuggestion] = &[
    plugin("Plug in SEO", "meta templates and issue checks"),
    plugin("Smart SEO", "automated meta tags and alt text"),
];
const SHOPIFY_LINKS: &[PluginSuggestion] = &[
    plugin("Easy Redirects", "bulk 301 management and 404 tracking"),
];

const DRUPAL_CACHING: &[PluginSuggestion] = &[
    plugin("Internal Page Cache", "core module for anonymous traffic"),
    plugin("Dynamic Page Cache", "core module for authenticated traffic"),
];
const DRUPAL_ASSETS: &[PluginSuggestion] = &[plugin(
    "Advanced CSS/JS Aggregation",
    "aggregation, minification and deferral",
)];
const DRUPAL_SEO: &[PluginSuggestion] = &[
    plugin("Metatag", "per-entity title and description tokens"),
    plugin("Pathauto", "clean, stable URL aliases"),
];
const DRUPAL_REDIRECTS: &[PluginSuggestion] = &[plugin("Redirect", "301 management and loop detection")];

const JOOMLA_CACHING: &[PluginSuggestion] = &[
    plugin("JCH Optimize", "combines and minifies assets, adds caching"),
    plugin("Page Cache", "core system plugin"),
];
const JOOMLA_SEO: &[PluginSuggestion] = &[plugin("4SEO", "meta automation and sitemap")];

const PAGE_BUILDER_ELEMENTOR: &[&str] = &[
    "In Elementor > Settings > Features, activate Optimized DOM Output and Improved Asset Loading",
    "Replace nested inner sections with Flexbox Containers to cut wrapper elements",
    "Disable unused Elementor widgets and Google Fonts under Settings > Advanced",
];
const PAGE_BUILDER_DIVI: &[&str] = &[
    "In Divi > Theme Options > Performance, enable Dynamic Module Framework, Dynamic CSS and Critical CSS",
    "Turn on Defer jQuery and jQuery Migrate and Improve Google Fonts Loading",
];
const PAGE_BUILDER_WPBAKERY: &[&str] = &[
    "Remove unused WPBakery elements from Role Manager so their assets are not enqueued",
    "Flatten nested rows; each inner row adds several wrapper divs",
];
const PAGE_BUILDER_BEAVER: &[&str] = &[
    "Enable Render CSS/JS Inline in Beaver Builder > Tools only for small pages",
    "Avoid full-width rows nested inside columns to keep the DOM shallow",
];

/// Catalog rows for a platform and concern; empty when the platform has no plugin ecosystem.
pub fn plugins_by_use_case(cms: Cms, use_case: UseCase) -> &'static [PluginSuggestion] {
    match (cms, use_case) {
        (Cms::WordPress, UseCase::Caching) => WORDPRESS_CACHING,
        (Cms::WordPress, UseCase::ImageOptimization) => WORDPRESS_IMAGES,
        (Cms::WordPress, UseCase::AssetOptimization) => WORDPRESS_ASSETS,
        (Cms::WordPress, UseCase::LazyLoading) => WORDPRESS_LAZY,
        (Cms::WordPress, UseCase::Cdn) => WORDPRESS_CDN,
        (Cms::WordPress, UseCase::Seo) => WORDPRESS_SEO,
        (Cms::WordPress, UseCase::FontOptimization) => WORDPRESS_FONTS,
        (Cms::WordPress, UseCase::LinkChecking) => WORDPRESS_LINKS,
        (Cms::WordPress, UseCase::Redirects) => WORDPRESS_REDIRECTS,
        (Cms::Shopify, UseCase::ImageOptimization) => SHOPIFY_IMAGES,
        (Cms::Shopify, UseCase::AssetOptimization | UseCase::LazyLoading) => SHOPIFY_ASSETS,
        (Cms::Shopify, UseCase::Seo) => SHOPIFY_SEO,
        (Cms::Shopify, UseCase::LinkChecking | UseCase::Redirects) => SHOPIFY_LINKS,
        (Cms::Drupal, UseCase::Caching) => DRUPAL_CACHING,
        (Cms::Drupal, UseCase::AssetOptimization) => DRUPAL_ASSETS,
        (Cms::Drupal, UseCase::Seo) => DRUPAL_SEO,
        (Cms::Drupal, UseCase::Redirects | UseCase::LinkChecking) => DRUPAL_REDIRECTS,
        (Cms::Joomla, UseCase::Caching | UseCase::AssetOptimization) => JOOMLA_CACHING,
        (Cms::Joomla, UseCase::Seo) => JOOMLA_SEO,
        _ => &[],
    }
}

pub fn page_builder_optimizations(builder: PageBuilder) -> &'static [&'static str] {
    match builder {
        PageBuilder::Elementor => PAGE_BUILDER_ELEMENTOR,
        PageBuilder::Divi => PAGE_BUILDER_DIVI,
        PageBuilder::WpBakery => PAGE_BUILDER_WPBAKERY,
        PageBuilder::BeaverBuilder => PAGE_BUILDER_BEAVER,
        PageBuilder::Unknown => &[],
    }
}

/// First catalog entry for the use case that the site already runs.
pub fn installed_plugin(
    context: &AuditContext<'_>,
    cms: Cms,
    use_case: UseCase,
) -> Option<&'static PluginSuggestion> {
    plugins_by_use_case(cms, use_case)
        .iter()
        .find(|candidate| context.has_plugin(candidate.name))
}

/// Platform-specific instruction lines plus the plugin names they mention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformGuidance {
    pub steps: Vec<String>,
    pub plugins: Vec<String>,
}

pub fn platform_guidance(context: &AuditContext<'_>, use_case: UseCase) -> PlatformGuidance {
    let Some(cms) = context.cms else {
        return PlatformGuidance::default();
    };

    if cms.is_hosted() {
        return PlatformGuidance {
            steps: vec![format!("On {}, {}", cms.label(), use_case.hosted_setting())],
            plugins: Vec::new(),
        };
    }

    if let Some(installed) = installed_plugin(context, cms, use_case) {
        return PlatformGuidance {
            steps: vec![format!(
                "{} is already installed: open its settings and {}",
                installed.name,
                use_case.configure_hint()
            )],
            plugins: vec![installed.name.to_string()],
        };
    }

    let candidates = plugins_by_use_case(cms, use_case);
    if candidates.is_empty() {
        return PlatformGuidance::default();
    }

    let picks: Vec<&PluginSuggestion> = candidates.iter().take(3).collect();
    let names: Vec<String> = picks.iter().map(|pick| pick.name.to_string()).collect();
    let extension = match cms {
        Cms::Shopify => "app",
        Cms::Drupal => "module",
        Cms::Joomla => "extension",
        _ => "plugin",
    };

    let mut steps = vec![format!(
        "Install {} {} {} on {} such as {}",
        use_case.article(),
        use_case.label(),
        extension,
        cms.label(),
        join_names(&names)
    )];
    steps.push(format!("After activating it, {}", use_case.configure_hint()));

    PlatformGuidance {
        steps,
        plugins: names,
    }
}

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}
