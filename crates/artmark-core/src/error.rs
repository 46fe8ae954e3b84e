use std::fmt;

/// Error kinds for categorizing build failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A node without `auto_end` was still open at end of input
    IncompleteNode,
    /// A second node bound to an already-bound info role
    DuplicateRole,
    /// A required info role was never bound
    MissingRole,
    /// The document has no content nodes
    EmptyDocument,
    /// A code block references a file that does not exist
    MissingCodeFile,
    /// A code block has neither inline content nor a file reference
    EmptyCodeBlock,
}

impl ErrorKind {
    /// Whether this is a structural error (vs. a content error).
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            ErrorKind::IncompleteNode
                | ErrorKind::DuplicateRole
                | ErrorKind::MissingRole
                | ErrorKind::EmptyDocument
        )
    }
}

/// A fatal document build error with source context.
///
/// Every error names the originating file; errors tied to a specific
/// node carry the 1-based physical line where that node began or where
/// the failure was detected. No error is recoverable: the document's
/// build is aborted and no partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    /// Human-readable error message
    pub message: String,
    /// Originating file name
    pub file: String,
    /// 1-based physical line number, when known
    pub line: Option<u32>,
    /// Error categorization
    pub kind: ErrorKind,
}

impl BuildError {
    /// Create an error for a node left open at end of input.
    pub fn incomplete_node(label: &str, file: &str, line: u32) -> Self {
        Self {
            message: format!("incomplete {} node", label),
            file: file.to_string(),
            line: Some(line),
            kind: ErrorKind::IncompleteNode,
        }
    }

    /// Create an error for a duplicate info-role binding.
    pub fn duplicate_role(role: &str, file: &str, line: u32) -> Self {
        Self {
            message: format!("{} is already specified", role),
            file: file.to_string(),
            line: Some(line),
            kind: ErrorKind::DuplicateRole,
        }
    }

    /// Create an error for an unbound info role.
    pub fn missing_role(role: &str, file: &str) -> Self {
        Self {
            message: format!("{} is missing", role),
            file: file.to_string(),
            line: None,
            kind: ErrorKind::MissingRole,
        }
    }

    /// Create an error for a document with no content nodes.
    pub fn empty_document(file: &str) -> Self {
        Self {
            message: "expected at least one content node".to_string(),
            file: file.to_string(),
            line: None,
            kind: ErrorKind::EmptyDocument,
        }
    }

    /// Create an error for an unresolvable code-file reference.
    pub fn missing_code_file(path: &str, file: &str, line: u32) -> Self {
        Self {
            message: format!("file {} not found", path),
            file: file.to_string(),
            line: Some(line),
            kind: ErrorKind::MissingCodeFile,
        }
    }

    /// Create an error for a code block with no content at all.
    pub fn empty_code_block(file: &str, line: u32) -> Self {
        Self {
            message: "empty code block".to_string(),
            file: file.to_string(),
            line: Some(line),
            kind: ErrorKind::EmptyCodeBlock,
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.file, line, self.message),
            None => write!(f, "{}: {}", self.file, self.message),
        }
    }
}

impl std::error::Error for BuildError {}
