//! Line classifier.
//!
//! Given the current open node (if any) and a raw line, decide what the
//! tokenizer should do with it. Variants are tested in the fixed
//! priority order of [`CLASSIFY_ORDER`]; prose is the guaranteed
//! catch-all, so classification itself can never fail.

use crate::node::{NodeKind, StartMatch, CLASSIFY_ORDER};

/// The action the tokenizer should take for one line.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    /// Append the line to the open node's content.
    Continue,
    /// The open node's end pattern matched; finalize it. The line is
    /// consumed as the terminator.
    Close,
    /// Start a new node (no node is currently open).
    Open(NodeKind, StartMatch<'a>),
    /// Finalize the open node, then start a new one.
    Split(NodeKind, StartMatch<'a>),
    /// No node is open and no variant claims the line (blank separator).
    Drop,
}

/// Scan the variant priority list for the first start-pattern match,
/// skipping `skip` so a line re-matching the open node's own variant
/// falls through to the lower-priority variants.
#[inline]
fn first_match<'a>(line: &'a str, skip: Option<NodeKind>) -> Option<(NodeKind, StartMatch<'a>)> {
    CLASSIFY_ORDER
        .iter()
        .filter(|&&kind| Some(kind) != skip)
        .find_map(|&kind| kind.match_start(line).map(|m| (kind, m)))
}

/// Classify one raw line against the current parser state.
pub fn classify<'a>(open: Option<NodeKind>, line: &'a str) -> Action<'a> {
    // An explicit end pattern terminates the node before the line is
    // consumed as content.
    if let Some(kind) = open {
        if kind.has_end_pattern() && kind.matches_end(line) {
            return Action::Close;
        }
    }

    let rescan = match open {
        None => true,
        Some(kind) => {
            kind.auto_end() || (kind.auto_split() && kind.match_start(line).is_some())
        }
    };

    if !rescan {
        return Action::Continue;
    }

    // The open node's own variant is excluded from the scan unless it
    // splits on self-repetition, so the line may still be claimed by a
    // lower-priority variant (prose continuation is the case where
    // nothing else claims it).
    let skip = open.filter(|kind| !kind.auto_split());

    match first_match(line, skip) {
        Some((kind, m)) => match open {
            Some(_) => Action::Split(kind, m),
            None => Action::Open(kind, m),
        },
        None => match open {
            Some(_) => Action::Continue,
            None => Action::Drop,
        },
    }
}
