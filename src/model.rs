//! Records consumed by the renderer

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One project entry of `projects.json`.
///
/// Every field is optional; the renderer supplies a fallback for each one
/// independently. A field holding a non-string JSON value is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Ordered project list; source order is display order.
pub type ProjectList = Vec<ProjectRecord>;

impl ProjectRecord {
    /// Lenient conversion from an arbitrary JSON value.
    ///
    /// Non-object values yield a record with every field absent.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            title: field("title"),
            image: field("image"),
            description: field("description"),
        }
    }
}

/// Normalize a fetched document into a project list.
///
/// Returns `None` when the document is not a JSON array.
pub fn project_list(value: &Value) -> Option<ProjectList> {
    value
        .as_array()
        .map(|items| items.iter().map(ProjectRecord::from_value).collect())
}

/// Counters shown in the profile summary.
///
/// Parsed from a public user-profile document; extra fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    #[serde(rename = "public_repos")]
    pub public_repo_count: u64,
    #[serde(rename = "public_gists")]
    pub public_gist_count: u64,
    #[serde(rename = "followers")]
    pub follower_count: u64,
    #[serde(rename = "following")]
    pub following_count: u64,
}

impl ProfileSummary {
    pub fn from_value(value: &Value) -> serde_json::Result<Self> {
        Self::deserialize(value)
    }
}

/// Heading level used for project titles (`<h1>` .. `<h6>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeadingRank {
    H1,
    #[default]
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingRank {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }

    /// Parse a heading hint such as `"h3"`, `"H3"` or `"3"`.
    pub fn parse(hint: &str) -> Option<Self> {
        let hint = hint.trim();
        let digits = hint
            .strip_prefix('h')
            .or_else(|| hint.strip_prefix('H'))
            .unwrap_or(hint);
        match digits.as_bytes() {
            [d @ b'1'..=b'6'] => Self::from_level(d - b'0'),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_from_value_ignores_non_string_fields() {
        let r = ProjectRecord::from_value(&json!({"title": 5, "image": "a.png", "description": null}));
        assert_eq!(r.title, None);
        assert_eq!(r.image.as_deref(), Some("a.png"));
        assert_eq!(r.description, None);
    }

    #[test]
    fn project_list_requires_array() {
        assert!(project_list(&json!({"title": "x"})).is_none());
        let list = project_list(&json!([{"title": "A"}, 7])).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1], ProjectRecord::default());
    }

    #[test]
    fn profile_summary_reads_counters_and_ignores_extras() {
        let v = json!({
            "login": "someone",
            "public_repos": 12,
            "public_gists": 0,
            "followers": 3,
            "following": 40
        });
        let p = ProfileSummary::from_value(&v).unwrap();
        assert_eq!(p.public_repo_count, 12);
        assert_eq!(p.following_count, 40);
    }

    #[test]
    fn profile_summary_rejects_missing_counter() {
        assert!(ProfileSummary::from_value(&json!({"public_repos": 1})).is_err());
    }

    #[test]
    fn heading_rank_parses_hints() {
        assert_eq!(HeadingRank::parse("h3"), Some(HeadingRank::H3));
        assert_eq!(HeadingRank::parse("H6"), Some(HeadingRank::H6));
        assert_eq!(HeadingRank::parse("1"), Some(HeadingRank::H1));
        assert_eq!(HeadingRank::parse("h7"), None);
        assert_eq!(HeadingRank::parse("header"), None);
        assert_eq!(HeadingRank::default().tag(), "h2");
    }

    #[test]
    fn heading_rank_rejects_signs_and_padding() {
        for hint in ["h+2", "+3", "h04", "0", "h0", "h", "", "h2h", "hh2", "h 2"] {
            assert_eq!(HeadingRank::parse(hint), None, "{hint:?}");
        }
    }
}
