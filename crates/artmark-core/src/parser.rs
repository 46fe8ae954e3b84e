//! The tokenizer state machine.
//!
//! Consumes input line by line: everything before the start-of-document
//! marker is discarded, lines after it are classified and dispatched
//! until the end-of-document marker or end of input. The marker lines
//! themselves are never fed to any node. Parsing one document is a
//! single synchronous pass; the first failure aborts the build with the
//! originating file and line attached.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::classify::{classify, Action};
use crate::document::{Document, DocumentBuilder};
use crate::error::BuildError;
use crate::lexer::Lexer;
use crate::node::Node;

/// Document boundary marker. The same string opens and closes a
/// document; it is matched by prefix.
pub const DOCUMENT_MARKER: &str = "__________";

/// Parser for one article source file.
///
/// `base_dir` is the directory code-block file references resolve
/// against (normally the article's own directory).
pub struct Parser {
    file_name: String,
    base_dir: PathBuf,
}

impl Parser {
    /// Create a parser with diagnostics attributed to `file_name`.
    pub fn new(file_name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            base_dir: base_dir.into(),
        }
    }

    /// Parse the input into a validated document.
    pub fn parse(&self, input: &str) -> Result<Document, BuildError> {
        let mut lexer = Lexer::new(input);
        let mut builder = DocumentBuilder::new();
        let mut current: Option<Node> = None;
        let mut started = false;

        while let Some(line) = lexer.next_line() {
            if !started {
                if line.text.starts_with(DOCUMENT_MARKER) {
                    debug!(file = %self.file_name, line = line.number, "document started");
                    started = true;
                }
                continue;
            }

            if line.text.starts_with(DOCUMENT_MARKER) {
                debug!(file = %self.file_name, line = line.number, "document ended");
                break;
            }

            match classify(current.as_ref().map(|n| n.kind()), line.text) {
                Action::Continue => {
                    if let Some(node) = current.as_mut() {
                        node.append_line(line.text);
                    }
                }
                Action::Close => {
                    if let Some(node) = current.take() {
                        self.seal(node, &mut builder)?;
                    }
                }
                Action::Open(kind, m) => {
                    current = Some(Node::open(kind, m, line.number));
                }
                Action::Split(kind, m) => {
                    if let Some(node) = current.take() {
                        self.seal(node, &mut builder)?;
                    }
                    current = Some(Node::open(kind, m, line.number));
                }
                Action::Drop => {}
            }
        }

        // End of input: only auto-end nodes may close implicitly.
        if let Some(node) = current.take() {
            if node.kind().auto_end() {
                self.seal(node, &mut builder)?;
            } else {
                return Err(BuildError::incomplete_node(
                    node.kind().label(),
                    &self.file_name,
                    node.line(),
                ));
            }
        }

        builder.finish(&self.file_name)
    }

    /// The directory code-file references resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn seal(&self, mut node: Node, builder: &mut DocumentBuilder) -> Result<(), BuildError> {
        node.finalize(&self.base_dir, &self.file_name)?;
        builder.push(node, &self.file_name)
    }
}
