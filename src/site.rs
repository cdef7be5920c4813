//! Page drivers.
//!
//! Each driver wires the components of one page: the shared shell (theme
//! switcher + navigation) and the data-driven sections. Sections fail
//! independently; a broken fetch or a missing container is reported and
//! the rest of the page still renders.

use crate::diagnostics::DiagnosticSink;
use crate::error::RenderError;
use crate::fetch::{fetch_or_report, fetch_profile, profile_locator, FetchOutcome, JsonSource};
use crate::html::PageDocument;
use crate::model::ProfileSummary;
use crate::nav;
use crate::render::Renderer;
use crate::target::DisplayTarget;
use crate::theme::{PreferenceStore, ThemeSwitcher};
use crate::SiteConfig;
use serde_json::Value;
use url::Url;

const SCOPE: &str = "site";

/// What happened to one page section
#[derive(Debug, Clone, PartialEq)]
pub enum SectionStatus {
    /// Blocks were written; `source_unavailable` is set when the fetch
    /// failed and the placeholder was shown instead
    Rendered { blocks: usize, source_unavailable: bool },
    /// Nothing was written (decorative section without data or container)
    Untouched,
    Failed(RenderError),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageReport {
    pub shell_installed: bool,
    pub projects: Option<SectionStatus>,
    pub profile: Option<SectionStatus>,
}

/// First `limit` records of a project document. Non-array documents are
/// returned unchanged so the renderer's invalid-input path sees them.
pub fn latest_projects(value: Value, limit: usize) -> Value {
    match value {
        Value::Array(mut items) => {
            items.truncate(limit);
            Value::Array(items)
        }
        other => other,
    }
}

pub struct Site<J, S> {
    config: SiteConfig,
    source: J,
    sink: S,
}

impl<J: JsonSource, S: DiagnosticSink> Site<J, S> {
    pub fn new(config: SiteConfig, source: J, sink: S) -> Self {
        Self { config, source, sink }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Theme switcher, root appearance and navigation bar.
    pub fn install_shell<P: PreferenceStore>(
        &self,
        doc: &mut PageDocument,
        location: &Url,
        theme: &ThemeSwitcher<P>,
    ) -> bool {
        doc.apply_appearance(&theme.appearance());
        let switcher = doc.prepend_to_body(&theme.switcher_markup());

        let links = nav::build_links(&nav::default_pages(), location);
        let placed = doc.insert_nav(&nav::nav_markup(&links), nav::placement(location));
        if !(switcher && placed) {
            self.sink.warn(SCOPE, "page has no <body>; shell not installed");
        }
        switcher && placed
    }

    /// Home page: shell, the latest projects and the profile summary.
    /// The two fetches run concurrently and feed disjoint containers.
    pub async fn home_page<P: PreferenceStore>(
        &self,
        doc: &mut PageDocument,
        location: &Url,
        theme: &ThemeSwitcher<P>,
    ) -> PageReport {
        self.sink.info(SCOPE, &format!("loading home page {}", location));
        let shell_installed = self.install_shell(doc, location, theme);

        let profile_url = profile_locator(&self.config.github_api, &self.config.github_user);
        let (projects, profile) = futures::join!(
            fetch_or_report(&self.source, &self.config.projects_locator, &self.sink),
            fetch_profile(&self.source, &profile_url, &self.sink),
        );

        let projects = match projects {
            FetchOutcome::Loaded(v) => FetchOutcome::Loaded(latest_projects(v, self.config.latest_limit)),
            unavailable => unavailable,
        };

        PageReport {
            shell_installed,
            projects: Some(self.render_projects(doc, &projects)),
            profile: Some(self.render_profile(doc, profile.as_ref())),
        }
    }

    /// Projects page: shell and the full project list.
    pub async fn projects_page<P: PreferenceStore>(
        &self,
        doc: &mut PageDocument,
        location: &Url,
        theme: &ThemeSwitcher<P>,
    ) -> PageReport {
        self.sink.info(SCOPE, &format!("loading projects page {}", location));
        let shell_installed = self.install_shell(doc, location, theme);
        let projects = fetch_or_report(&self.source, &self.config.projects_locator, &self.sink).await;

        PageReport {
            shell_installed,
            projects: Some(self.render_projects(doc, &projects)),
            profile: None,
        }
    }

    fn render_projects(&self, doc: &mut PageDocument, outcome: &FetchOutcome) -> SectionStatus {
        let renderer = Renderer::new(&self.sink);
        let mut target = doc.target(&self.config.projects_selector);
        match renderer.render_projects(outcome.data(), &mut target, Some(&self.config.heading)) {
            Ok(blocks) => SectionStatus::Rendered {
                blocks,
                source_unavailable: outcome.is_unavailable(),
            },
            Err(e) => SectionStatus::Failed(e),
        }
    }

    fn render_profile(&self, doc: &mut PageDocument, profile: Option<&ProfileSummary>) -> SectionStatus {
        let renderer = Renderer::new(&self.sink);
        let mut target = doc.target(&self.config.profile_selector);
        if profile.is_none() || !target.is_surface() {
            return SectionStatus::Untouched;
        }
        renderer.format_profile(profile, Some(&mut target));
        SectionStatus::Rendered {
            blocks: 1,
            source_unavailable: false,
        }
    }
}
