//! Dual rendering of the ordered node sequence.
//!
//! Walks content nodes in input order, inserting group prefix/postfix
//! wrappers at variant boundaries, and concatenates each node's
//! hypertext and plain-text fragments into two parallel streams. Info
//! nodes are not rendered inline; collaborators take their fragments
//! from the [`Document`] directly.

use std::path::Path;

use crate::document::Document;
use crate::highlight::Highlight;
use crate::inline;
use crate::node::{Node, NodeKind};

/// The two output streams of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Ordered hypertext fragments, one per content node, with group
    /// wrappers injected at variant transitions.
    pub html: String,
    /// Concatenated plain-text forms, for the archival/timestamping
    /// collaborator to wrap with provenance headers.
    pub text: String,
}

impl Node {
    /// Render this node's hypertext form.
    pub fn html(&self, highlighter: &dyn Highlight) -> String {
        match self.kind() {
            NodeKind::Text => format!("<p>{}</p>", inline::to_html(self.content())),
            NodeKind::ListItem => format!("<li>{}</li>", inline::to_html(self.content())),
            NodeKind::Tip => {
                format!("<div class=\"tip\">{}</div>", inline::to_html(self.content()))
            }
            NodeKind::CppCode | NodeKind::AsmCode | NodeKind::Code => {
                let body = highlighter.highlight(self.content(), self.lang());
                format!(
                    "<div class=\"expandable\">\
                     <div class=\"expandable-header\" onclick=\"toggleExpandable(this)\">{}</div>\
                     <div class=\"expandable-content open\" style=\"height: auto\">{}</div>\
                     </div>",
                    self.code_header(),
                    body
                )
            }
            // The page template supplies the title element.
            NodeKind::H1 => self.meta().to_string(),
            NodeKind::H2 => format!("<h2>{}</h2>", self.meta()),
            NodeKind::H3 => format!("<h3>{}</h3>", self.meta()),
            NodeKind::Description | NodeKind::Date => self.meta().to_string(),
            NodeKind::Todo => String::new(),
        }
    }

    /// Render this node's plain-text form.
    pub fn text(&self) -> String {
        match self.kind() {
            NodeKind::Text | NodeKind::Tip => {
                inline::to_text(self.content()).trim_start().to_string()
            }
            NodeKind::ListItem => format!("- {}", inline::to_text(self.content()).trim_start()),
            NodeKind::CppCode | NodeKind::AsmCode | NodeKind::Code => {
                format!("\n{}\n", self.content())
            }
            NodeKind::H1 | NodeKind::H2 | NodeKind::H3 => format!("\n[ {} ]\n", self.meta()),
            NodeKind::Description | NodeKind::Date => self.meta().to_string(),
            NodeKind::Todo => String::new(),
        }
    }

    /// Header of a rendered code block: the referenced file's base
    /// name, else the fence language, else a generic label.
    fn code_header(&self) -> &str {
        if !self.meta().is_empty() {
            return Path::new(self.meta())
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(self.meta());
        }
        if !self.lang().is_empty() {
            return self.lang();
        }
        "code"
    }
}

/// Render a validated document into its two output streams.
pub fn render(doc: &Document, highlighter: &dyn Highlight) -> Rendered {
    let mut html = String::new();
    let mut text = String::new();
    let mut prev: Option<NodeKind> = None;

    for node in doc.nodes() {
        if prev != Some(node.kind()) {
            if let Some(kind) = prev {
                html.push_str(kind.group_postfix_html());
            }
            html.push_str(node.kind().group_prefix_html());
        }

        html.push_str(&node.html(highlighter));
        html.push('\n');
        text.push_str(&node.text());
        text.push('\n');

        prev = Some(node.kind());
    }

    // The final run's wrapper must close even at document end.
    if let Some(kind) = prev {
        html.push_str(kind.group_postfix_html());
    }

    Rendered { html, text }
}
