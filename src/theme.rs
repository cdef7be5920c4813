//! Light/dark theme switching with a persisted preference.
//!
//! The chosen scheme lives in a single key of a [`PreferenceStore`], read once
//! when the switcher starts and written on every change (last write wins).
//! The switcher itself never touches a document; it hands back the
//! [`RootAppearance`] the page root should carry.

use crate::diagnostics::DiagnosticSink;
use crate::target::html_escape;
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Preference key used by the site
pub const THEME_KEY: &str = "colorScheme";

const SCOPE: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorScheme {
    /// Follow the system preference
    #[default]
    Automatic,
    Light,
    Dark,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 3] = [ColorScheme::Automatic, ColorScheme::Light, ColorScheme::Dark];

    /// Stored/option value
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Automatic => "light dark",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorScheme::Automatic => "Automatic",
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Attributes the document root should carry for a scheme
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RootAppearance {
    /// `data-theme` attribute; `None` removes it
    pub data_theme: Option<String>,
    /// `color-scheme` style property; `None` removes it
    pub color_scheme: Option<String>,
}

impl RootAppearance {
    pub fn for_scheme(scheme: ColorScheme, system_prefers_dark: bool) -> Self {
        match scheme {
            ColorScheme::Automatic => Self {
                data_theme: None,
                color_scheme: Some(if system_prefers_dark { "dark" } else { "light" }.to_string()),
            },
            explicit => Self {
                data_theme: Some(explicit.as_str().to_string()),
                color_scheme: Some(explicit.as_str().to_string()),
            },
        }
    }
}

/// Single-slot persistent string preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a JSON object in a single file.
/// A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        let json = serde_json::to_vec_pretty(&values)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Theme state for one page session
pub struct ThemeSwitcher<P> {
    store: P,
    key: String,
    scheme: ColorScheme,
    system_prefers_dark: bool,
}

impl<P: PreferenceStore> ThemeSwitcher<P> {
    /// Read the saved scheme. Unreadable or unknown values fall back to
    /// `Automatic` with a warning.
    pub fn init<S>(store: P, key: &str, system_prefers_dark: bool, sink: &S) -> Self
    where
        S: DiagnosticSink + ?Sized,
    {
        let scheme = match store.get(key) {
            Ok(None) => ColorScheme::Automatic,
            Ok(Some(saved)) => ColorScheme::parse(&saved).unwrap_or_else(|| {
                sink.warn(SCOPE, &format!("unknown saved color scheme {saved:?}; using automatic"));
                ColorScheme::Automatic
            }),
            Err(e) => {
                sink.warn(SCOPE, &format!("could not read theme preference: {e}"));
                ColorScheme::Automatic
            }
        };
        Self {
            store,
            key: key.to_string(),
            scheme,
            system_prefers_dark,
        }
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn appearance(&self) -> RootAppearance {
        RootAppearance::for_scheme(self.scheme, self.system_prefers_dark)
    }

    /// Switch scheme and persist it
    pub fn set(&mut self, scheme: ColorScheme) -> Result<RootAppearance> {
        self.scheme = scheme;
        self.store.set(&self.key, scheme.as_str())?;
        Ok(self.appearance())
    }

    /// Track a system preference change. Only an automatic scheme reacts.
    pub fn on_system_change(&mut self, prefers_dark: bool) -> Option<RootAppearance> {
        self.system_prefers_dark = prefers_dark;
        (self.scheme == ColorScheme::Automatic).then(|| self.appearance())
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// `<label>` + `<select>` control with the current scheme selected
    pub fn switcher_markup(&self) -> String {
        let mut out = String::from("<label class=\"color-scheme\">Theme: <select id=\"colorSchemeSelect\">");
        for s in ColorScheme::ALL {
            let selected = if s == self.scheme { " selected" } else { "" };
            out.push_str(&format!(
                "<option value=\"{}\"{}>{}</option>",
                html_escape(s.as_str()),
                selected,
                s.label()
            ));
        }
        out.push_str("</select></label>");
        out
    }
}
