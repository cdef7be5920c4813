//! JSON fetching.
//!
//! `JsonSource::fetch` is the typed contract: a GET that fails on transport
//! errors, non-success statuses (body left unread) and unparsable bodies.
//! Page drivers go through [`fetch_or_report`], which reports failures to a
//! diagnostic sink and hands back a [`FetchOutcome`] whose data is `None`
//! on failure, so a broken resource renders as a placeholder.

use crate::diagnostics::DiagnosticSink;
use crate::error::FetchError;
use crate::model::ProfileSummary;
use serde_json::Value;
use std::collections::HashMap;

const SCOPE: &str = "fetch";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse a response or file body as JSON. A leading UTF-8 byte order mark
/// is dropped first, as a browser's UTF-8 decode does.
pub fn parse_body(body: &[u8]) -> Result<Value, FetchError> {
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
    serde_json::from_slice(body).map_err(|e| FetchError::InvalidBody(e.to_string()))
}

/// Anything that can resolve a resource locator to a JSON document.
#[allow(async_fn_in_trait)]
pub trait JsonSource {
    async fn fetch(&self, locator: &str) -> Result<Value, FetchError>;
}

impl<J: JsonSource + ?Sized> JsonSource for &J {
    async fn fetch(&self, locator: &str) -> Result<Value, FetchError> {
        (**self).fetch(locator).await
    }
}

/// Result of a fetch after the failure has been reported
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(Value),
    Unavailable(FetchError),
}

impl FetchOutcome {
    /// The document, or `None` ("no data") when the fetch failed
    pub fn data(&self) -> Option<&Value> {
        match self {
            FetchOutcome::Loaded(v) => Some(v),
            FetchOutcome::Unavailable(_) => None,
        }
    }

    pub fn into_data(self) -> Option<Value> {
        match self {
            FetchOutcome::Loaded(v) => Some(v),
            FetchOutcome::Unavailable(_) => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, FetchOutcome::Unavailable(_))
    }

    /// True when the resource loaded but holds no records (empty array)
    pub fn is_empty_resource(&self) -> bool {
        matches!(self, FetchOutcome::Loaded(Value::Array(items)) if items.is_empty())
    }
}

/// Fetch `locator`, reporting any failure to `sink` instead of returning it.
pub async fn fetch_or_report<J, S>(source: &J, locator: &str, sink: &S) -> FetchOutcome
where
    J: JsonSource + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    match source.fetch(locator).await {
        Ok(value) => FetchOutcome::Loaded(value),
        Err(err) => {
            sink.error(
                SCOPE,
                &format!("Error fetching or parsing JSON data from {locator}: {err}"),
            );
            FetchOutcome::Unavailable(err)
        }
    }
}

/// Public profile endpoint for `user`
pub fn profile_locator(api_base: &str, user: &str) -> String {
    format!("{}/users/{}", api_base.trim_end_matches('/'), user)
}

/// Fetch and parse a profile summary. Any failure yields `None`.
pub async fn fetch_profile<J, S>(source: &J, locator: &str, sink: &S) -> Option<ProfileSummary>
where
    J: JsonSource + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    let value = fetch_or_report(source, locator, sink).await.into_data()?;
    match ProfileSummary::from_value(&value) {
        Ok(profile) => Some(profile),
        Err(e) => {
            let err = FetchError::InvalidBody(e.to_string());
            sink.error(SCOPE, &format!("Unexpected profile document from {locator}: {err}"));
            None
        }
    }
}

/// Fixed set of documents keyed by locator. Unknown locators answer 404.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<String, Result<Value, FetchError>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, locator: impl Into<String>, value: Value) -> Self {
        self.documents.insert(locator.into(), Ok(value));
        self
    }

    pub fn with_failure(mut self, locator: impl Into<String>, err: FetchError) -> Self {
        self.documents.insert(locator.into(), Err(err));
        self
    }
}

impl JsonSource for StaticSource {
    async fn fetch(&self, locator: &str) -> Result<Value, FetchError> {
        self.documents.get(locator).cloned().unwrap_or_else(|| {
            Err(FetchError::HttpStatus {
                status: 404,
                status_text: "Not Found".into(),
            })
        })
    }
}

#[cfg(feature = "http")]
pub use http::HttpFetcher;

#[cfg(feature = "http")]
mod http {
    use super::{parse_body, JsonSource};
    use crate::error::FetchError;
    use crate::{Error, Result, SiteConfig};
    use reqwest::header::USER_AGENT;
    use reqwest::Client;
    use serde_json::Value;
    use std::collections::HashMap;
    use url::Url;

    /// Fetches documents over HTTP(S), or from disk for `file:` locations.
    ///
    /// Relative locators resolve against the configured base URL, the way a
    /// browser resolves them against the page location. No retries, no
    /// caching and no timeout beyond the transport's own.
    pub struct HttpFetcher {
        client: Client,
        base: Option<Url>,
        user_agent: String,
        headers: HashMap<String, String>,
    }

    impl HttpFetcher {
        pub fn new(config: &SiteConfig) -> Result<Self> {
            let client = Client::builder()
                .build()
                .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
            let base = config
                .base_url
                .as_deref()
                .map(Url::parse)
                .transpose()
                .map_err(|e| Error::Config(format!("Invalid base URL: {}", e)))?;
            Ok(Self {
                client,
                base,
                user_agent: config.user_agent.clone(),
                headers: config.headers.clone(),
            })
        }

        pub fn base(&self) -> Option<&Url> {
            self.base.as_ref()
        }

        fn resolve(&self, locator: &str) -> std::result::Result<Url, FetchError> {
            match (Url::parse(locator), &self.base) {
                (Ok(url), _) => Ok(url),
                (Err(url::ParseError::RelativeUrlWithoutBase), Some(base)) => base
                    .join(locator)
                    .map_err(|e| FetchError::Transport(format!("Invalid locator {}: {}", locator, e))),
                (Err(e), _) => Err(FetchError::Transport(format!("Invalid locator {}: {}", locator, e))),
            }
        }

        async fn read_file(url: &Url) -> std::result::Result<Vec<u8>, FetchError> {
            let path = url
                .to_file_path()
                .map_err(|_| FetchError::Transport(format!("Not a local path: {}", url)))?;
            tokio::fs::read(&path)
                .await
                .map_err(|e| FetchError::Transport(format!("Failed to read {}: {}", path.display(), e)))
        }
    }

    impl JsonSource for HttpFetcher {
        async fn fetch(&self, locator: &str) -> std::result::Result<Value, FetchError> {
            let url = self.resolve(locator)?;

            let body = if url.scheme() == "file" {
                Self::read_file(&url).await?
            } else {
                let mut req = self.client.get(url.clone()).header(USER_AGENT, self.user_agent.as_str());
                for (k, v) in &self.headers {
                    req = req.header(k.as_str(), v.as_str());
                }
                let resp = req
                    .send()
                    .await
                    .map_err(|e| FetchError::Transport(format!("HTTP GET {} failed: {}", url, e)))?;

                let status = resp.status();
                if !status.is_success() {
                    return Err(FetchError::HttpStatus {
                        status: status.as_u16(),
                        status_text: status.canonical_reason().unwrap_or_default().to_string(),
                    });
                }
                resp.bytes()
                    .await
                    .map_err(|e| FetchError::Transport(format!("Failed to read response body: {}", e)))?
                    .to_vec()
            };

            parse_body(&body)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn fetcher(base: Option<&str>) -> HttpFetcher {
            let config = SiteConfig {
                base_url: base.map(str::to_string),
                ..Default::default()
            };
            HttpFetcher::new(&config).unwrap()
        }

        #[test]
        fn relative_locators_resolve_against_base() {
            let f = fetcher(Some("http://localhost:8000/projects/index.html"));
            let url = f.resolve("../lib/projects.json").unwrap();
            assert_eq!(url.as_str(), "http://localhost:8000/lib/projects.json");
        }

        #[test]
        fn relative_locator_without_base_is_a_transport_error() {
            let f = fetcher(None);
            assert!(matches!(f.resolve("lib/projects.json"), Err(FetchError::Transport(_))));
        }

        #[test]
        fn invalid_base_url_is_a_config_error() {
            let config = SiteConfig {
                base_url: Some("not a url".into()),
                ..Default::default()
            };
            assert!(matches!(HttpFetcher::new(&config), Err(Error::Config(_))));
        }
    }
}
