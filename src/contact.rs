//! Contact form: turns submitted fields into a `mailto:` URL for the
//! user's mail client.

use std::collections::HashMap;
use url::form_urlencoded::byte_serialize;

/// Encode a form component, spaces as `%20` rather than `+` since mail
/// clients do not treat `+` as a space.
pub fn encode_component(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect::<String>().replace('+', "%20")
}

/// Build `{action}?name=value&...`, skipping fields whose value is blank.
pub fn mailto_url<'a, I>(action: &str, fields: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let params: Vec<String> = fields
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(value)))
        .collect();
    format!("{}?{}", action, params.join("&"))
}

/// A `mailto:` form found in a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub action: String,
    /// Named controls in document order
    pub fields: Vec<String>,
}

impl ContactForm {
    /// Only `mailto:` actions are handled; anything else is left to the browser.
    pub fn new(action: &str, fields: Vec<String>) -> Option<Self> {
        action.starts_with("mailto:").then(|| Self {
            action: action.to_string(),
            fields,
        })
    }

    /// Build the URL for submitted values. Fields keep the form's order;
    /// the n-th control with a given name takes the n-th value submitted
    /// under that name. Values for names the form does not declare, or
    /// beyond its controls for a name, are ignored.
    pub fn submit(&self, values: &[(&str, &str)]) -> String {
        let mut used: HashMap<&str, usize> = HashMap::new();
        let ordered = self.fields.iter().filter_map(|name| {
            let seen = used.entry(name.as_str()).or_default();
            let value = values.iter().filter(|(n, _)| *n == name.as_str()).nth(*seen)?;
            *seen += 1;
            Some((value.0, value.1))
        });
        mailto_url(&self.action, ordered)
    }
}
