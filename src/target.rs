//! Display surfaces and the blocks written into them

use crate::model::HeadingRank;

/// Text shown when there is nothing to render
pub const EMPTY_PLACEHOLDER: &str = "No projects available at the moment.";

/// A region of a page owned by someone else.
///
/// The renderer only ever clears it and appends whole blocks to it.
pub trait DisplayTarget {
    /// Whether this is a real display surface. Renderers refuse to touch a
    /// target that returns `false`.
    fn is_surface(&self) -> bool {
        true
    }

    /// Remove all existing content. Clearing an empty target is a no-op.
    fn clear(&mut self);

    /// Append a fully built block after the existing content.
    fn append(&mut self, block: DisplayBlock);
}

/// Heading of a project block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub rank: HeadingRank,
    pub text: String,
}

/// Image reference with its accessible description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBlock {
    pub heading: Heading,
    pub image: ImageRef,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileBlock {
    pub title: String,
    /// `(label, value)` pairs in display order
    pub entries: Vec<(String, String)>,
}

/// A constructed UI fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBlock {
    Project(ProjectBlock),
    Placeholder(String),
    Profile(ProfileBlock),
}

impl DisplayBlock {
    pub fn placeholder() -> Self {
        DisplayBlock::Placeholder(EMPTY_PLACEHOLDER.to_string())
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, DisplayBlock::Placeholder(_))
    }

    /// HTML markup for this block. Text and attribute values are escaped.
    pub fn to_html(&self) -> String {
        match self {
            DisplayBlock::Project(p) => {
                let tag = p.heading.rank.tag();
                format!(
                    "<article><{tag}>{}</{tag}><img src=\"{}\" alt=\"{}\"><p>{}</p></article>",
                    html_escape(&p.heading.text),
                    html_escape(&p.image.src),
                    html_escape(&p.image.alt),
                    html_escape(&p.description),
                )
            }
            DisplayBlock::Placeholder(text) => format!("<p>{}</p>", html_escape(text)),
            DisplayBlock::Profile(p) => {
                let mut out = format!("<h2>{}</h2><dl>", html_escape(&p.title));
                for (label, value) in &p.entries {
                    out.push_str(&format!(
                        "<dt>{}</dt><dd>{}</dd>",
                        html_escape(label),
                        html_escape(value)
                    ));
                }
                out.push_str("</dl>");
                out
            }
        }
    }
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// In-memory target holding the appended blocks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTarget {
    blocks: Vec<DisplayBlock>,
    detached: bool,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// A target that is not a display surface (e.g. a stale handle)
    pub fn detached() -> Self {
        Self {
            blocks: Vec::new(),
            detached: true,
        }
    }

    /// Start with existing content, as if the page already had children
    pub fn with_blocks(blocks: Vec<DisplayBlock>) -> Self {
        Self {
            blocks,
            detached: false,
        }
    }

    pub fn blocks(&self) -> &[DisplayBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn to_html(&self) -> String {
        self.blocks.iter().map(DisplayBlock::to_html).collect()
    }
}

impl DisplayTarget for MemoryTarget {
    fn is_surface(&self) -> bool {
        !self.detached
    }

    fn clear(&mut self) {
        self.blocks.clear();
    }

    fn append(&mut self, block: DisplayBlock) {
        self.blocks.push(block);
    }
}
