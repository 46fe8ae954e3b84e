//! The closed node variant set and its behavior table.
//!
//! Each variant owns a grammar: a start pattern, an optional end
//! pattern, and behavioral options. `auto_end` variants close as soon as
//! a line no longer continues them; `auto_split` variants split into a
//! new sibling when a line re-matches their own start pattern (so each
//! `-` line becomes its own list item).

use std::path::Path;

use tracing::debug;

use crate::error::BuildError;

/// One typed unit of parsed markup.
///
/// The variant order here is not the classification order; see
/// [`CLASSIFY_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `//DESC:` single-line field (Description info role).
    Description,
    /// `//DATE:` single-line field (Date info role).
    Date,
    /// `//TODO:` single-line field, suppressed from all output.
    Todo,
    /// ```` ```tip ```` fenced callout block.
    Tip,
    /// ```` ```cpp ```` fenced code block.
    CppCode,
    /// ```` ```asm ```` fenced code block.
    AsmCode,
    /// Generic ```` ``` ```` fenced code block (fallback languages).
    Code,
    /// `###` heading.
    H3,
    /// `##` heading.
    H2,
    /// `#` heading (Title info role).
    H1,
    /// `-` list item.
    ListItem,
    /// Free-text paragraph, the universal fallback.
    Text,
}

/// Classification priority: most specific first, prose last.
///
/// At most one variant claims a given line because the first match
/// wins; `Text` matches any non-empty line and must stay last.
pub const CLASSIFY_ORDER: [NodeKind; 12] = [
    NodeKind::Description,
    NodeKind::Date,
    NodeKind::Todo,
    NodeKind::Tip,
    NodeKind::CppCode,
    NodeKind::AsmCode,
    NodeKind::Code,
    NodeKind::H3,
    NodeKind::H2,
    NodeKind::H1,
    NodeKind::ListItem,
    NodeKind::Text,
];

/// Result of matching a variant's start pattern against a line.
#[derive(Debug, Clone, Copy)]
pub struct StartMatch<'a> {
    /// Text remaining after the matched start pattern.
    pub rest: &'a str,
    /// Fence language captured by code variants (empty otherwise).
    pub lang: &'a str,
}

impl NodeKind {
    /// Whether this variant closes implicitly when a line no longer
    /// continues it.
    #[inline]
    pub fn auto_end(self) -> bool {
        !matches!(
            self,
            NodeKind::Tip | NodeKind::CppCode | NodeKind::AsmCode | NodeKind::Code
        )
    }

    /// Whether a line re-matching this variant's own start pattern
    /// forces a new sibling node instead of a continuation.
    #[inline]
    pub fn auto_split(self) -> bool {
        matches!(self, NodeKind::ListItem)
    }

    /// Whether this variant accumulates prose (reflowed with single
    /// spaces) rather than raw lines.
    #[inline]
    fn is_prose(self) -> bool {
        matches!(self, NodeKind::Text | NodeKind::ListItem | NodeKind::Tip)
    }

    /// Whether this variant accumulates raw code lines verbatim.
    #[inline]
    pub fn is_code(self) -> bool {
        matches!(self, NodeKind::CppCode | NodeKind::AsmCode | NodeKind::Code)
    }

    /// Test this variant's start pattern against a raw line.
    ///
    /// Returns the remainder after the matched prefix (for `Text`, the
    /// whole line: the universal fallback consumes the line as content).
    pub fn match_start(self, line: &str) -> Option<StartMatch<'_>> {
        match self {
            NodeKind::Description => marker_match(line, "//DESC:"),
            NodeKind::Date => marker_match(line, "//DATE:"),
            NodeKind::Todo => marker_match(line, "//TODO:"),
            NodeKind::Tip => {
                let rest = line.trim_start_matches(' ').strip_prefix("```tip")?;
                Some(StartMatch { rest, lang: "" })
            }
            NodeKind::CppCode => fence_match(line, "```cpp", "cpp"),
            NodeKind::AsmCode => fence_match(line, "```asm", "asm"),
            NodeKind::Code => {
                let at = line.find("```")?;
                let after_ticks = &line[at + 3..];
                let lang_len = after_ticks
                    .bytes()
                    .take_while(|b| b.is_ascii_lowercase())
                    .count();
                Some(StartMatch {
                    rest: &after_ticks[lang_len..],
                    lang: &after_ticks[..lang_len],
                })
            }
            NodeKind::H3 => heading_match(line, "###"),
            NodeKind::H2 => heading_match(line, "##"),
            NodeKind::H1 => heading_match(line, "#"),
            NodeKind::ListItem => {
                let rest = line.trim_start_matches(' ').strip_prefix('-')?;
                Some(StartMatch {
                    rest: rest.trim_start_matches(' '),
                    lang: "",
                })
            }
            NodeKind::Text => {
                if line.is_empty() {
                    None
                } else {
                    Some(StartMatch {
                        rest: line,
                        lang: "",
                    })
                }
            }
        }
    }

    /// Whether this variant declares an explicit end pattern.
    #[inline]
    pub fn has_end_pattern(self) -> bool {
        matches!(
            self,
            NodeKind::Text
                | NodeKind::ListItem
                | NodeKind::Tip
                | NodeKind::CppCode
                | NodeKind::AsmCode
                | NodeKind::Code
        )
    }

    /// Test this variant's end pattern against an incoming line.
    ///
    /// A match terminates the open node before the line is consumed as
    /// content.
    pub fn matches_end(self, line: &str) -> bool {
        match self {
            NodeKind::Text | NodeKind::ListItem => line.is_empty(),
            NodeKind::Tip => line.trim_start_matches(' ').starts_with("```"),
            NodeKind::CppCode | NodeKind::AsmCode | NodeKind::Code => line.contains("```"),
            _ => false,
        }
    }

    /// Group wrapper emitted before a maximal run of this variant.
    pub fn group_prefix_html(self) -> &'static str {
        match self {
            NodeKind::ListItem => "<ul>",
            _ => "",
        }
    }

    /// Group wrapper emitted after a maximal run of this variant.
    pub fn group_postfix_html(self) -> &'static str {
        match self {
            NodeKind::ListItem => "</ul>",
            _ => "",
        }
    }

    /// Short name used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Description => "description",
            NodeKind::Date => "date",
            NodeKind::Todo => "todo",
            NodeKind::Tip => "tip",
            NodeKind::CppCode | NodeKind::AsmCode | NodeKind::Code => "code",
            NodeKind::H3 => "h3",
            NodeKind::H2 => "h2",
            NodeKind::H1 => "h1",
            NodeKind::ListItem => "list item",
            NodeKind::Text => "text",
        }
    }
}

/// Marker fields match anywhere in the line; the remainder follows the
/// marker.
#[inline]
fn marker_match<'a>(line: &'a str, marker: &str) -> Option<StartMatch<'a>> {
    let at = line.find(marker)?;
    Some(StartMatch {
        rest: &line[at + marker.len()..],
        lang: "",
    })
}

/// Language-specific fences match anywhere in the line, like the
/// generic fence they specialize.
#[inline]
fn fence_match<'a>(line: &'a str, fence: &str, lang: &'static str) -> Option<StartMatch<'a>> {
    let at = line.find(fence)?;
    Some(StartMatch {
        rest: &line[at + fence.len()..],
        lang,
    })
}

/// Heading markers allow leading spaces and tabs.
#[inline]
fn heading_match<'a>(line: &'a str, marker: &str) -> Option<StartMatch<'a>> {
    let rest = line
        .trim_start_matches(|c| c == ' ' || c == '\t')
        .strip_prefix(marker)?;
    Some(StartMatch { rest, lang: "" })
}

/// One parsed node: a variant plus its accumulated state.
///
/// The content buffer is immutable once [`Node::finalize`] has run;
/// finalization strips trailing newline/space runs and resolves
/// external code-file references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    /// Extracted once at creation from the text after the start
    /// pattern: a code block's attached filename, a heading's text, a
    /// field's payload.
    meta: String,
    /// Fence language tag for code variants.
    lang: String,
    content: String,
    /// 1-based line where this node began.
    line: u32,
}

impl Node {
    /// Create a node from a matched start line.
    pub(crate) fn open(kind: NodeKind, m: StartMatch<'_>, line: u32) -> Self {
        debug!(kind = kind.label(), line, "node opened");

        let mut node = Self {
            kind,
            meta: String::new(),
            lang: m.lang.to_string(),
            content: String::new(),
            line,
        };

        if kind.is_prose() {
            node.append_segment(m.rest);
        } else {
            node.meta = m.rest.trim().to_string();
        }

        node
    }

    /// Consume a continuation line.
    pub(crate) fn append_line(&mut self, text: &str) {
        if self.kind.is_prose() {
            self.append_segment(text);
        } else if self.kind.is_code() {
            self.content.push_str(text);
            self.content.push('\n');
        }
        // Single-line variants only ever see blank continuations; they
        // carry no content buffer.
    }

    /// Prose segments reflow into one logical line: each is trimmed and
    /// joined with a single leading space. Internal spacing across
    /// source line breaks collapses, even inside inline code spans.
    fn append_segment(&mut self, segment: &str) {
        let trimmed = segment.trim();
        if !trimmed.is_empty() {
            self.content.push(' ');
            self.content.push_str(trimmed);
        }
    }

    /// Seal the node: normalize the content buffer and resolve external
    /// code-file references.
    pub(crate) fn finalize(&mut self, base_dir: &Path, file: &str) -> Result<(), BuildError> {
        if self.kind.is_code() {
            if !self.meta.is_empty() {
                let path = base_dir.join(&self.meta);
                if !path.exists() {
                    return Err(BuildError::missing_code_file(
                        &path.display().to_string(),
                        file,
                        self.line,
                    ));
                }
                if self.content.is_empty() {
                    self.content = std::fs::read_to_string(&path).map_err(|_| {
                        BuildError::missing_code_file(&path.display().to_string(), file, self.line)
                    })?;
                }
            } else if self.content.is_empty() {
                return Err(BuildError::empty_code_block(file, self.line));
            }
        }

        let trimmed = self.content.trim_end_matches(['\n', ' ']).len();
        self.content.truncate(trimmed);

        debug!(kind = self.kind.label(), line = self.line, "node finalized");
        Ok(())
    }

    /// The node's variant.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The extracted meta string (heading text, field payload, or code
    /// filename).
    #[inline]
    pub fn meta(&self) -> &str {
        &self.meta
    }

    /// The fence language tag (empty for non-code and untagged fences).
    #[inline]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// The finalized content buffer.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// 1-based line where this node began.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }
}
