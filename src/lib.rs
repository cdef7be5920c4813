//! Folio: portfolio page components
//!
//! Fetches a JSON project list and a public profile summary and renders them
//! into page containers, plus the shared page shell (theme switcher and
//! navigation) and the `mailto:` contact form encoder.
//!
//! # Pipeline
//!
//! - **Fetch** ([`fetch`]): GET a JSON document; failures are reported to a
//!   [`DiagnosticSink`] and surface as "no data".
//! - **Render** ([`render`]): turn records into display blocks inside a
//!   [`DisplayTarget`], with per-field fallbacks and a placeholder for
//!   empty or invalid input.
//!
//! # Example
//!
//! ```
//! use folio::{LogSink, MemoryTarget, Renderer};
//!
//! let records = serde_json::json!([{ "title": "A" }, { "description": "d" }]);
//! let mut target = MemoryTarget::new();
//! let renderer = Renderer::new(LogSink);
//! let blocks = renderer.render_projects(Some(&records), &mut target, Some("h2")).unwrap();
//! assert_eq!(blocks, 2);
//! ```

use std::collections::HashMap;

pub mod error;
pub use error::{Error, FetchError, RenderError, Result};

pub mod contact;
pub mod diagnostics;
pub mod fetch;
pub mod model;
pub mod nav;
pub mod render;
pub mod target;
pub mod theme;

// Page documents backed by scraper
#[cfg(feature = "html")]
pub mod html;

// Page drivers need real documents to write into
#[cfg(feature = "html")]
pub mod site;

pub use diagnostics::{Diagnostic, DiagnosticLevel, DiagnosticSink, LogSink, RecordingSink};
pub use fetch::{fetch_or_report, FetchOutcome, JsonSource, StaticSource};
pub use model::{HeadingRank, ProfileSummary, ProjectList, ProjectRecord};
pub use render::Renderer;
pub use target::{DisplayBlock, DisplayTarget, MemoryTarget};
pub use theme::{ColorScheme, PreferenceStore, ThemeSwitcher};

#[cfg(feature = "http")]
pub use fetch::HttpFetcher;

#[cfg(feature = "html")]
pub use html::PageDocument;

/// Site configuration
///
/// The defaults describe the published portfolio: projects come from
/// `lib/projects.json` relative to the page, profile stats from the public
/// GitHub API.
///
/// # Examples
///
/// ```
/// let cfg = folio::SiteConfig::default();
/// assert_eq!(cfg.latest_limit, 3);
/// assert!(cfg.user_agent.starts_with("folio/"));
/// ```
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Location of the page; relative locators resolve against it
    pub base_url: Option<String>,
    /// User agent string to send with requests (the GitHub API requires one)
    pub user_agent: String,
    /// Extra HTTP headers sent with every request
    pub headers: HashMap<String, String>,
    /// Project list document
    pub projects_locator: String,
    /// Profile whose stats are shown on the home page
    pub github_user: String,
    /// Base of the profile API
    pub github_api: String,
    /// Number of projects shown on the home page
    pub latest_limit: usize,
    /// Heading level hint for project titles
    pub heading: String,
    /// Container for the project list
    pub projects_selector: String,
    /// Container for the profile summary
    pub profile_selector: String,
    /// Preference key for the color scheme
    pub theme_key: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
            headers: HashMap::new(),
            projects_locator: "lib/projects.json".to_string(),
            github_user: "YoukaiKouhai".to_string(),
            github_api: "https://api.github.com".to_string(),
            latest_limit: 3,
            heading: "h2".to_string(),
            projects_selector: ".projects".to_string(),
            profile_selector: "#profile-stats".to_string(),
            theme_key: theme::THEME_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.projects_locator, "lib/projects.json");
        assert_eq!(config.heading, "h2");
        assert_eq!(config.theme_key, "colorScheme");
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_config_override() {
        let config = SiteConfig {
            latest_limit: 5,
            projects_selector: "#work".to_string(),
            ..Default::default()
        };
        assert_eq!(config.latest_limit, 5);
        assert_eq!(config.profile_selector, "#profile-stats");
    }
}
