//! # artmark core
//!
//! A line-oriented article markup tokenizer producing two rendered
//! forms: hypertext fragments for publishing and a plain-text form for
//! archival/timestamping.
//!
//! The grammar is a fixed, closed set of line patterns: single-line info
//! fields, fenced callout and code blocks, three heading levels, list
//! items, and free-text paragraphs as the universal fallback. Documents
//! are delimited by a boundary marker line and must bind the three info
//! roles (Title, Date, Description) exactly once.
//!
//! ## Quick start
//!
//! ```rust
//! use artmark_core::{render, EscapeHighlight, Parser};
//!
//! let input = concat!(
//!     "__________\n",
//!     "# Hello\n",
//!     "//DATE: 2024-05-01\n",
//!     "//DESC: A first article\n",
//!     "\n",
//!     "Some **prose** here.\n",
//!     "__________\n",
//! );
//!
//! let parser = Parser::new("article.txt", ".");
//! let doc = parser.parse(input).unwrap();
//! let out = render(&doc, &EscapeHighlight);
//!
//! assert!(out.html.contains("<b>prose</b>"));
//! ```
//!
//! Parsing is a single synchronous pass; any failure is fatal to the
//! document and carries the originating file name and 1-based line.

pub mod classify;
pub mod document;
pub mod error;
pub mod highlight;
pub mod inline;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod render;

pub use document::{Document, InfoRole};
pub use error::{BuildError, ErrorKind};
pub use highlight::{EscapeHighlight, Highlight};
pub use node::{Node, NodeKind};
pub use parser::{Parser, DOCUMENT_MARKER};
pub use render::{render, Rendered};
