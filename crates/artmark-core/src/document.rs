//! Document aggregation and validation.
//!
//! As nodes finalize they are checked against the three reserved info
//! roles. A role-bearing node is pulled out of the content sequence and
//! bound to its role; everything else keeps strict input order. A
//! document is valid only when every role is bound exactly once and at
//! least one content node remains.

use crate::error::BuildError;
use crate::node::{Node, NodeKind};

/// The three singleton metadata slots every document must bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoRole {
    Title,
    Date,
    Description,
}

impl InfoRole {
    /// Role name as it appears in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            InfoRole::Title => "Title",
            InfoRole::Date => "Date",
            InfoRole::Description => "Description",
        }
    }

    /// The role a node variant satisfies, if any.
    pub fn of(kind: NodeKind) -> Option<InfoRole> {
        match kind {
            NodeKind::H1 => Some(InfoRole::Title),
            NodeKind::Date => Some(InfoRole::Date),
            NodeKind::Description => Some(InfoRole::Description),
            _ => None,
        }
    }
}

/// A validated document: ordered content nodes plus the three bound
/// info nodes.
///
/// Construction goes through the parser, which guarantees every role is
/// bound; the accessors therefore never fail.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    title: Node,
    date: Node,
    description: Node,
}

impl Document {
    /// Content nodes in input order (info nodes excluded).
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node bound to the Title role.
    #[inline]
    pub fn title(&self) -> &Node {
        &self.title
    }

    /// The node bound to the Date role.
    #[inline]
    pub fn date(&self) -> &Node {
        &self.date
    }

    /// The node bound to the Description role.
    #[inline]
    pub fn description(&self) -> &Node {
        &self.description
    }

    /// The node bound to the given role.
    pub fn info(&self, role: InfoRole) -> &Node {
        match role {
            InfoRole::Title => &self.title,
            InfoRole::Date => &self.date,
            InfoRole::Description => &self.description,
        }
    }
}

/// Incremental aggregator consuming the finalized node stream.
#[derive(Debug, Default)]
pub(crate) struct DocumentBuilder {
    nodes: Vec<Node>,
    title: Option<Node>,
    date: Option<Node>,
    description: Option<Node>,
}

impl DocumentBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a finalized node, binding it to an info role when its
    /// variant carries one. Binding an already-bound role is fatal and
    /// reports the second occurrence's line.
    pub(crate) fn push(&mut self, node: Node, file: &str) -> Result<(), BuildError> {
        let Some(role) = InfoRole::of(node.kind()) else {
            self.nodes.push(node);
            return Ok(());
        };

        let slot = match role {
            InfoRole::Title => &mut self.title,
            InfoRole::Date => &mut self.date,
            InfoRole::Description => &mut self.description,
        };

        if slot.is_some() {
            return Err(BuildError::duplicate_role(role.name(), file, node.line()));
        }

        *slot = Some(node);
        Ok(())
    }

    /// Validate and seal the document.
    pub(crate) fn finish(self, file: &str) -> Result<Document, BuildError> {
        let title = self
            .title
            .ok_or_else(|| BuildError::missing_role(InfoRole::Title.name(), file))?;
        let date = self
            .date
            .ok_or_else(|| BuildError::missing_role(InfoRole::Date.name(), file))?;
        let description = self
            .description
            .ok_or_else(|| BuildError::missing_role(InfoRole::Description.name(), file))?;

        if self.nodes.is_empty() {
            return Err(BuildError::empty_document(file));
        }

        Ok(Document {
            nodes: self.nodes,
            title,
            date,
            description,
        })
    }
}
