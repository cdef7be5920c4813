//! HTML page documents.
//!
//! A `PageDocument` owns a parsed page (scraper DOM). Components locate their
//! containers with CSS selectors and write into them through [`HtmlTarget`],
//! which implements [`DisplayTarget`]. New content is parsed as a fragment
//! and grafted into the document tree, so the result serializes like any
//! other DOM.
//!
//! Replaced content is unlinked from the tree but stays in the node arena
//! until the document is dropped or [`PageDocument::compact`]ed. A page
//! rendered once per load (the normal case) never notices; a long-lived
//! document that is re-rendered without bound should be compacted between
//! renders or rebuilt from source.

use crate::contact::ContactForm;
use crate::error::RenderError;
use crate::nav::NavPlacement;
use crate::target::{html_escape, DisplayBlock, DisplayTarget};
use crate::theme::RootAppearance;
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Node, Selector};

#[derive(Clone, Copy)]
enum Position {
    Append(NodeId),
    Prepend(NodeId),
    After(NodeId),
}

#[derive(Clone)]
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn document(&self) -> &Html {
        &self.html
    }

    /// Nodes held by the document, including ones no longer attached
    pub fn arena_len(&self) -> usize {
        self.html.tree.nodes().count()
    }

    /// Rebuild the document from its serialized form, dropping nodes left
    /// behind by earlier writes.
    pub fn compact(&mut self) {
        self.html = Html::parse_document(&self.to_html());
    }

    /// Serialize the whole page
    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>\n{}", self.html.root_element().html())
    }

    fn selector(selector: &str) -> Result<Selector, RenderError> {
        Selector::parse(selector)
            .map_err(|_| RenderError::InvalidTarget(format!("invalid selector {:?}", selector)))
    }

    fn first(&self, selector: &str) -> Result<Option<ElementRef<'_>>, RenderError> {
        let sel = Self::selector(selector)?;
        Ok(self.html.select(&sel).next())
    }

    pub fn contains(&self, selector: &str) -> bool {
        matches!(self.first(selector), Ok(Some(_)))
    }

    /// Inner markup of the first element matching `selector`
    pub fn inner_html(&self, selector: &str) -> Option<String> {
        self.first(selector).ok().flatten().map(|e| e.inner_html())
    }

    /// Display target for the first element matching `selector`.
    ///
    /// A selector that matches nothing (or does not parse) yields a target
    /// that is not a display surface, so renderers refuse to write to it.
    pub fn target(&mut self, selector: &str) -> HtmlTarget<'_> {
        let node = self.first(selector).ok().flatten().map(|e| e.id());
        HtmlTarget {
            doc: self,
            node,
            selector: selector.to_string(),
        }
    }

    fn clear_children(&mut self, id: NodeId) {
        loop {
            let child = self
                .html
                .tree
                .get(id)
                .and_then(|n| n.first_child())
                .map(|c| c.id());
            match child.and_then(|c| self.html.tree.get_mut(c)) {
                Some(mut c) => c.detach(),
                None => break,
            }
        }
    }

    /// Parse `markup` as a fragment and insert its top-level nodes at `pos`,
    /// preserving their order.
    fn graft(&mut self, markup: &str, pos: Position) {
        let fragment = Html::parse_fragment(markup);
        let top: Vec<NodeId> = fragment.root_element().children().map(|c| c.id()).collect();

        let ordered: Vec<NodeId> = match pos {
            Position::Append(_) => top,
            Position::Prepend(_) | Position::After(_) => top.into_iter().rev().collect(),
        };

        for src in ordered {
            let Some(value) = fragment.tree.get(src).map(|n| n.value().clone()) else {
                continue;
            };
            let inserted = match pos {
                Position::Append(parent) => self.html.tree.get_mut(parent).map(|mut p| p.append(value).id()),
                Position::Prepend(parent) => self.html.tree.get_mut(parent).map(|mut p| p.prepend(value).id()),
                Position::After(sibling) => self.html.tree.get_mut(sibling).map(|mut s| s.insert_after(value).id()),
            };
            if let Some(dst) = inserted {
                self.copy_children(&fragment, src, dst);
            }
        }
    }

    fn copy_children(&mut self, src_doc: &Html, src: NodeId, dst: NodeId) {
        let children: Vec<NodeId> = src_doc
            .tree
            .get(src)
            .map(|n| n.children().map(|c| c.id()).collect())
            .unwrap_or_default();
        for child in children {
            let Some(value) = src_doc.tree.get(child).map(|n| n.value().clone()) else {
                continue;
            };
            let Some(new_id) = self.html.tree.get_mut(dst).map(|mut p| p.append(value).id()) else {
                return;
            };
            self.copy_children(src_doc, child, new_id);
        }
    }

    fn body(&self) -> Option<NodeId> {
        self.first("body").ok().flatten().map(|e| e.id())
    }

    /// Insert markup as the first child of `<body>`. Returns false when the
    /// page has no body.
    pub fn prepend_to_body(&mut self, markup: &str) -> bool {
        match self.body() {
            Some(body) => {
                self.graft(markup, Position::Prepend(body));
                true
            }
            None => false,
        }
    }

    pub fn insert_nav(&mut self, markup: &str, placement: NavPlacement) -> bool {
        if placement == NavPlacement::AfterFirstHeading {
            if let Some(h1) = self.first("h1").ok().flatten().map(|e| e.id()) {
                self.graft(markup, Position::After(h1));
                return true;
            }
        }
        self.prepend_to_body(markup)
    }

    /// Set or remove `data-theme` and the `color-scheme` style property on
    /// the root `<html>` element, keeping every other attribute.
    pub fn apply_appearance(&mut self, look: &RootAppearance) {
        let root = self.html.root_element();
        let root_id = root.id();

        let mut attrs: Vec<(String, String)> = Vec::new();
        let mut style = String::new();
        for (name, value) in root.value().attrs() {
            match name {
                "data-theme" => {}
                "style" => style = value.to_string(),
                _ => attrs.push((name.to_string(), value.to_string())),
            }
        }
        if let Some(theme) = &look.data_theme {
            attrs.push(("data-theme".into(), theme.clone()));
        }
        let style = merge_color_scheme(&style, look.color_scheme.as_deref());
        if !style.is_empty() {
            attrs.push(("style".into(), style));
        }

        let rendered: String = attrs
            .iter()
            .map(|(k, v)| format!(" {}=\"{}\"", k, html_escape(v)))
            .collect();
        let shell = Html::parse_document(&format!("<html{}></html>", rendered));
        let element = shell.root_element().value().clone();

        if let Some(mut node) = self.html.tree.get_mut(root_id) {
            *node.value() = Node::Element(element);
        }
    }

    pub fn root_attr(&self, name: &str) -> Option<String> {
        self.html.root_element().value().attr(name).map(str::to_string)
    }

    /// The first form whose action is a `mailto:` URL, with its named controls
    pub fn contact_form(&self) -> Option<ContactForm> {
        let form = self.first("form[action^=\"mailto:\"]").ok().flatten()?;
        let action = form.value().attr("action")?;
        let controls = Self::selector("input[name], textarea[name], select[name]").ok()?;
        let fields = form
            .select(&controls)
            .filter_map(|e| e.value().attr("name").map(str::to_string))
            .collect();
        ContactForm::new(action, fields)
    }
}

fn merge_color_scheme(style: &str, color_scheme: Option<&str>) -> String {
    let mut decls: Vec<String> = style
        .split(';')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .filter(|d| d.split(':').next().map(str::trim) != Some("color-scheme"))
        .map(str::to_string)
        .collect();
    if let Some(cs) = color_scheme {
        decls.push(format!("color-scheme: {}", cs));
    }
    decls.join("; ")
}

/// A selector-located region of a [`PageDocument`]
pub struct HtmlTarget<'a> {
    doc: &'a mut PageDocument,
    node: Option<NodeId>,
    selector: String,
}

impl HtmlTarget<'_> {
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl DisplayTarget for HtmlTarget<'_> {
    fn is_surface(&self) -> bool {
        self.node.is_some()
    }

    fn clear(&mut self) {
        if let Some(id) = self.node {
            self.doc.clear_children(id);
        }
    }

    fn append(&mut self, block: DisplayBlock) {
        if let Some(id) = self.node {
            self.doc.graft(&block.to_html(), Position::Append(id));
        }
    }
}
