//! Navigation bar generation

use crate::target::html_escape;
use url::Url;

/// Base path of the site when served from a project page host
pub const PROJECT_BASE_PATH: &str = "/Project-Portfolio/";
pub const LOCAL_BASE_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavPage {
    /// Relative to the site base, or an absolute `http(s)` URL
    pub url: String,
    pub title: String,
}

impl NavPage {
    pub fn new(url: &str, title: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
        }
    }
}

pub fn default_pages() -> Vec<NavPage> {
    vec![
        NavPage::new("", "Home"),
        NavPage::new("CV/", "CV"),
        NavPage::new("projects/", "Projects"),
        NavPage::new("contact/", "Contact"),
        NavPage::new("https://github.com/YoukaiKouhai", "GitHub"),
    ]
}

/// `/` when developing locally, the project path otherwise
pub fn base_path(location: &Url) -> &'static str {
    match location.host_str() {
        Some("localhost") | Some("127.0.0.1") => LOCAL_BASE_PATH,
        _ => PROJECT_BASE_PATH,
    }
}

pub fn is_home_page(location: &Url) -> bool {
    let base = base_path(location);
    let path = location.path();
    path == base || path.strip_prefix(base) == Some("index.html")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub title: String,
    /// Points at the page being viewed
    pub current: bool,
    /// Points at another host; opens in a new tab
    pub external: bool,
}

fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}

pub fn build_links(pages: &[NavPage], location: &Url) -> Vec<NavLink> {
    let base = base_path(location);
    pages
        .iter()
        .map(|page| {
            let href = if page.url.starts_with("http") {
                page.url.clone()
            } else {
                format!("{}{}", base, page.url)
            };
            let (current, external) = match location.join(&href) {
                Ok(resolved) => {
                    let same = same_host(&resolved, location);
                    (same && resolved.path() == location.path(), !same)
                }
                Err(_) => (false, false),
            };
            NavLink {
                href,
                title: page.title.clone(),
                current,
                external,
            }
        })
        .collect()
}

pub fn nav_markup(links: &[NavLink]) -> String {
    let mut out = String::from("<nav>");
    for link in links {
        out.push_str(&format!("<a href=\"{}\"", html_escape(&link.href)));
        if link.current {
            out.push_str(" class=\"current\"");
        }
        if link.external {
            out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
        }
        out.push_str(&format!(">{}</a>", html_escape(&link.title)));
    }
    out.push_str("</nav>");
    out
}

/// Where the `<nav>` goes in the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPlacement {
    /// Right after the first `<h1>`, falling back to the start of `<body>`
    AfterFirstHeading,
    StartOfBody,
}

pub fn placement(location: &Url) -> NavPlacement {
    if is_home_page(location) {
        NavPlacement::AfterFirstHeading
    } else {
        NavPlacement::StartOfBody
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn base_path_depends_on_host() {
        assert_eq!(base_path(&url("http://localhost:5500/")), "/");
        assert_eq!(base_path(&url("http://127.0.0.1/projects/")), "/");
        assert_eq!(base_path(&url("https://someone.github.io/Project-Portfolio/")), PROJECT_BASE_PATH);
    }

    #[test]
    fn home_page_detection() {
        assert!(is_home_page(&url("http://localhost/")));
        assert!(is_home_page(&url("http://localhost/index.html")));
        assert!(!is_home_page(&url("http://localhost/projects/")));
        assert!(is_home_page(&url("https://someone.github.io/Project-Portfolio/index.html")));
    }

    #[test]
    fn links_mark_current_and_external() {
        let loc = url("https://someone.github.io/Project-Portfolio/projects/");
        let links = build_links(&default_pages(), &loc);
        assert_eq!(links.len(), 5);
        assert_eq!(links[0].href, "/Project-Portfolio/");
        assert!(!links[0].current);
        assert_eq!(links[2].href, "/Project-Portfolio/projects/");
        assert!(links[2].current);
        assert!(links[4].external);
        assert!(!links[4].current);
        assert!(links[..4].iter().all(|l| !l.external));
    }

    #[test]
    fn markup_carries_current_class_and_new_tab_attributes() {
        let loc = url("http://localhost:8000/");
        let html = nav_markup(&build_links(&default_pages(), &loc));
        assert!(html.starts_with("<nav><a href=\"/\" class=\"current\">Home</a>"));
        assert!(html.contains(
            "<a href=\"https://github.com/YoukaiKouhai\" target=\"_blank\" rel=\"noopener noreferrer\">GitHub</a>"
        ));
    }

    #[test]
    fn placement_follows_page() {
        assert_eq!(placement(&url("http://localhost/")), NavPlacement::AfterFirstHeading);
        assert_eq!(placement(&url("http://localhost/contact/")), NavPlacement::StartOfBody);
    }
}
