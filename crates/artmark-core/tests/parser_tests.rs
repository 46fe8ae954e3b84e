//! Integration tests for the artmark tokenizer and aggregator

use artmark_core::classify::{classify, Action};
use artmark_core::{BuildError, Document, ErrorKind, NodeKind, Parser};

fn parse(input: &str) -> Result<Document, BuildError> {
    Parser::new("article.txt", ".").parse(input)
}

/// Wrap a body in the boundary markers and the three required info
/// lines.
fn article(body: &str) -> String {
    format!(
        "__________\n# Title\n//DATE: 2024-05-01\n//DESC: About\n\n{}\n__________\n",
        body
    )
}

fn parse_body(body: &str) -> Document {
    parse(&article(body)).unwrap()
}

// ============================================================================
// Line Classification Tests
// ============================================================================

fn open_of(line: &str) -> NodeKind {
    match classify(None, line) {
        Action::Open(kind, _) => kind,
        other => panic!("expected Open for {:?}, got {:?}", line, other),
    }
}

#[test]
fn test_priority_order_is_total() {
    assert_eq!(open_of("//DESC: about"), NodeKind::Description);
    assert_eq!(open_of("//DATE: 2024-01-01"), NodeKind::Date);
    assert_eq!(open_of("//TODO: later"), NodeKind::Todo);
    assert_eq!(open_of("```tip"), NodeKind::Tip);
    assert_eq!(open_of("```cpp"), NodeKind::CppCode);
    assert_eq!(open_of("```asm"), NodeKind::AsmCode);
    assert_eq!(open_of("```python"), NodeKind::Code);
    assert_eq!(open_of("### deep"), NodeKind::H3);
    assert_eq!(open_of("## section"), NodeKind::H2);
    assert_eq!(open_of("# title"), NodeKind::H1);
    assert_eq!(open_of("- item"), NodeKind::ListItem);
    assert_eq!(open_of("plain prose"), NodeKind::Text);
}

#[test]
fn test_blank_line_with_no_open_node_is_dropped() {
    assert!(matches!(classify(None, ""), Action::Drop));
}

#[test]
fn test_blank_line_closes_open_paragraph() {
    assert!(matches!(classify(Some(NodeKind::Text), ""), Action::Close));
}

#[test]
fn test_prose_line_continues_open_paragraph() {
    assert!(matches!(
        classify(Some(NodeKind::Text), "more prose"),
        Action::Continue
    ));
}

#[test]
fn test_dash_line_splits_open_list_item() {
    assert!(matches!(
        classify(Some(NodeKind::ListItem), "- second"),
        Action::Split(NodeKind::ListItem, _)
    ));
}

#[test]
fn test_prose_line_after_list_item_starts_paragraph() {
    assert!(matches!(
        classify(Some(NodeKind::ListItem), "afterword"),
        Action::Split(NodeKind::Text, _)
    ));
}

#[test]
fn test_self_rematch_falls_through_to_lower_priority_variant() {
    assert!(matches!(
        classify(Some(NodeKind::H3), "### b"),
        Action::Split(NodeKind::H2, _)
    ));
    assert!(matches!(
        classify(Some(NodeKind::Description), "//DESC: again"),
        Action::Split(NodeKind::Text, _)
    ));
}

#[test]
fn test_code_block_consumes_everything_until_fence() {
    assert!(matches!(
        classify(Some(NodeKind::Code), "# not a heading"),
        Action::Continue
    ));
    assert!(matches!(classify(Some(NodeKind::Code), ""), Action::Continue));
    assert!(matches!(classify(Some(NodeKind::Code), "```"), Action::Close));
}

// ============================================================================
// Document Boundary Tests
// ============================================================================

#[test]
fn test_lines_before_start_marker_are_discarded() {
    let input = format!("ignored preamble\n# Not yet a title\n{}", article("body"));
    let doc = parse(&input).unwrap();
    assert_eq!(doc.title().meta(), "Title");
}

#[test]
fn test_lines_after_end_marker_are_discarded() {
    let input = format!("{}# Second title\ntrailing prose\n", article("body"));
    let doc = parse(&input).unwrap();
    assert_eq!(doc.nodes().len(), 1);
}

#[test]
fn test_missing_start_marker_yields_empty_document() {
    let err = parse("# Title\n//DATE: d\n//DESC: x\n\nbody\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingRole);
}

#[test]
fn test_end_of_input_without_end_marker_is_accepted() {
    let input = "__________\n# Title\n//DATE: d\n//DESC: x\n\nbody";
    let doc = parse(input).unwrap();
    assert_eq!(doc.nodes().len(), 1);
}

#[test]
fn test_crlf_input() {
    let input =
        "__________\r\n# Title\r\n//DATE: d\r\n//DESC: x\r\n\r\nsome prose\r\n__________\r\n";
    let doc = parse(input).unwrap();
    assert_eq!(doc.title().meta(), "Title");
    assert_eq!(doc.nodes()[0].content(), " some prose");
}

// ============================================================================
// Node Grammar Tests
// ============================================================================

#[test]
fn test_paragraph_reflows_multiple_lines() {
    let doc = parse_body("first line\nsecond line");
    assert_eq!(doc.nodes().len(), 1);
    assert_eq!(doc.nodes()[0].kind(), NodeKind::Text);
    assert_eq!(doc.nodes()[0].content(), " first line second line");
}

#[test]
fn test_blank_line_separates_paragraphs() {
    let doc = parse_body("first\n\nsecond");
    assert_eq!(doc.nodes().len(), 2);
    assert!(doc.nodes().iter().all(|n| n.kind() == NodeKind::Text));
}

#[test]
fn test_each_dash_line_is_its_own_list_item() {
    let doc = parse_body("- one\n- two\n- three");
    assert_eq!(doc.nodes().len(), 3);
    assert!(doc.nodes().iter().all(|n| n.kind() == NodeKind::ListItem));
    assert_eq!(doc.nodes()[0].content(), " one");
    assert_eq!(doc.nodes()[2].content(), " three");
}

#[test]
fn test_list_item_without_space_after_dash() {
    let doc = parse_body("-item");
    assert_eq!(doc.nodes()[0].kind(), NodeKind::ListItem);
    assert_eq!(doc.nodes()[0].content(), " item");
}

#[test]
fn test_heading_levels_and_meta() {
    let doc = parse_body("## Section\n### Deep");
    assert_eq!(doc.nodes()[0].kind(), NodeKind::H2);
    assert_eq!(doc.nodes()[0].meta(), "Section");
    assert_eq!(doc.nodes()[1].kind(), NodeKind::H3);
    assert_eq!(doc.nodes()[1].meta(), "Deep");
}

#[test]
fn test_four_hashes_classify_as_h3() {
    // The three-hash pattern claims the line; the fourth hash stays in
    // the heading text.
    let doc = parse_body("#### over");
    assert_eq!(doc.nodes()[0].kind(), NodeKind::H3);
    assert_eq!(doc.nodes()[0].meta(), "# over");
}

#[test]
fn test_consecutive_headings_are_both_kept() {
    let doc = parse_body("### a\n### b");
    assert_eq!(doc.nodes().len(), 2);
    assert_eq!(doc.nodes()[0].kind(), NodeKind::H3);
    assert_eq!(doc.nodes()[0].meta(), "a");
    // The second line falls through its own variant and re-matches one
    // level up, keeping the surplus hash in the heading text.
    assert_eq!(doc.nodes()[1].kind(), NodeKind::H2);
    assert_eq!(doc.nodes()[1].meta(), "# b");
}

#[test]
fn test_repeated_info_field_line_falls_back_to_prose() {
    let input = "__________\n# Title\n//DATE: d\n//DESC: one\n//DESC: two\n\nbody\n__________\n";
    let doc = parse(input).unwrap();
    assert_eq!(doc.description().meta(), "one");
    assert_eq!(doc.nodes()[0].kind(), NodeKind::Text);
    assert!(doc.nodes()[0].content().contains("//DESC: two"));
}

#[test]
fn test_code_fence_language_capture() {
    let doc = parse_body("```python\nprint(1)\n```");
    let node = &doc.nodes()[0];
    assert_eq!(node.kind(), NodeKind::Code);
    assert_eq!(node.lang(), "python");
    assert_eq!(node.content(), "print(1)");
}

#[test]
fn test_cpp_fence_is_its_own_variant() {
    let doc = parse_body("```cpp\nint x;\n```");
    assert_eq!(doc.nodes()[0].kind(), NodeKind::CppCode);
    assert_eq!(doc.nodes()[0].lang(), "cpp");
}

#[test]
fn test_code_preserves_blank_lines_and_markup() {
    let doc = parse_body("```asm\nmov rax, 1\n\n# a comment, not a heading\n```");
    assert_eq!(
        doc.nodes()[0].content(),
        "mov rax, 1\n\n# a comment, not a heading"
    );
}

#[test]
fn test_tip_block_accumulates_prose() {
    let doc = parse_body("```tip\nstay hydrated\nalways\n```");
    let node = &doc.nodes()[0];
    assert_eq!(node.kind(), NodeKind::Tip);
    assert_eq!(node.content(), " stay hydrated always");
}

#[test]
fn test_todo_is_parsed_without_error() {
    let doc = parse_body("//TODO: fix me\nprose after");
    assert_eq!(doc.nodes()[0].kind(), NodeKind::Todo);
    assert_eq!(doc.nodes()[1].kind(), NodeKind::Text);
}

#[test]
fn test_trailing_whitespace_is_stripped_at_finalization() {
    let doc = parse_body("```python\ncode()\n\n\n```");
    assert_eq!(doc.nodes()[0].content(), "code()");
}

// ============================================================================
// Info Role Tests
// ============================================================================

#[test]
fn test_info_roles_are_bound_and_extracted() {
    let doc = parse_body("content");
    assert_eq!(doc.title().meta(), "Title");
    assert_eq!(doc.date().meta(), "2024-05-01");
    assert_eq!(doc.description().meta(), "About");
    // Info nodes do not appear in the content sequence.
    assert_eq!(doc.nodes().len(), 1);
}

#[test]
fn test_missing_date_fails_naming_the_role() {
    let input = "__________\n# Title\n//DESC: x\n\nbody\n__________\n";
    let err = parse(input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingRole);
    assert!(err.message.contains("Date"));
    assert!(err.kind.is_structural());
}

#[test]
fn test_duplicate_description_fails_at_second_occurrence() {
    let input = "__________\n# Title\n//DATE: d\n//DESC: one\nprose\n//DESC: two\n\nbody\n__________\n";
    let err = parse(input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateRole);
    assert!(err.message.contains("Description"));
    assert_eq!(err.line, Some(6));
}

#[test]
fn test_duplicate_title_fails() {
    let err = parse(&article("# Another title")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateRole);
    assert!(err.message.contains("Title"));
}

#[test]
fn test_document_without_content_nodes_fails() {
    let input = "__________\n# Title\n//DATE: d\n//DESC: x\n__________\n";
    let err = parse(input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::EmptyDocument);
}

// ============================================================================
// Structural Error Tests
// ============================================================================

#[test]
fn test_unterminated_code_block_is_fatal() {
    let err = parse(&article("```cpp\nint x;")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IncompleteNode);
    assert!(err.message.contains("incomplete"));
    // Reported at the line where the node began.
    assert_eq!(err.line, Some(6));
}

#[test]
fn test_unterminated_tip_block_is_fatal() {
    let err = parse(&article("```tip\nnever closed")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IncompleteNode);
}

#[test]
fn test_open_paragraph_at_end_of_input_is_finalized() {
    let input = "__________\n# Title\n//DATE: d\n//DESC: x\n\ntrailing prose";
    let doc = parse(input).unwrap();
    assert_eq!(doc.nodes()[0].content(), " trailing prose");
}

#[test]
fn test_errors_carry_the_file_name() {
    let err = Parser::new("notes/article.txt", ".")
        .parse(&article("```cpp\nint x;"))
        .unwrap_err();
    assert_eq!(err.file, "notes/article.txt");
    assert!(err.to_string().contains("notes/article.txt"));
}

// ============================================================================
// External Code File Tests
// ============================================================================

#[test]
fn test_code_block_loads_referenced_file_when_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("main.cpp"), "int main() {}\n").unwrap();

    let doc = Parser::new("article.txt", dir.path())
        .parse(&article("```cpp main.cpp\n```"))
        .unwrap();
    assert_eq!(doc.nodes()[0].content(), "int main() {}");
    assert_eq!(doc.nodes()[0].meta(), "main.cpp");
}

#[test]
fn test_inline_content_wins_over_referenced_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("main.cpp"), "from file\n").unwrap();

    let doc = Parser::new("article.txt", dir.path())
        .parse(&article("```cpp main.cpp\ninline body\n```"))
        .unwrap();
    assert_eq!(doc.nodes()[0].content(), "inline body");
}

#[test]
fn test_missing_referenced_file_is_a_content_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = Parser::new("article.txt", dir.path())
        .parse(&article("```cpp nope.cpp\n```"))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingCodeFile);
    assert!(!err.kind.is_structural());
}

#[test]
fn test_code_block_with_no_content_at_all_is_a_content_error() {
    let err = parse(&article("```\n```")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::EmptyCodeBlock);
}
