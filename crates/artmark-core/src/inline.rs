//! Inline span transforms for prose content.
//!
//! Greedy, left-to-right scanning with no backtracking. Three span
//! grammars: backtick code spans, `**` emphasis, and `<<caption|target>>`
//! references (an embedded image when the target names an image file,
//! an anchor otherwise). Each transform is a full pass over the text,
//! applied in fixed order, so spans produced by an earlier pass are
//! visible to later ones.

use memchr::memchr;

/// Rewrite prose content into its hypertext form.
pub fn to_html(content: &str) -> String {
    let result = rewrite_code_spans(content, "<code>", "</code>");
    let result = rewrite_emphasis(&result, "<b>", "</b>");
    rewrite_references(&result, ReferenceStyle::Html)
}

/// Rewrite prose content into its plain-text form: markup decoration
/// stripped, inline text kept, references flattened to `caption (target)`.
pub fn to_text(content: &str) -> String {
    let result = rewrite_code_spans(content, "", "");
    let result = rewrite_emphasis(&result, "", "");
    rewrite_references(&result, ReferenceStyle::Plain)
}

/// Replace backtick-delimited spans with `open`/`close` wrappers.
///
/// An unpaired backtick is left as literal text.
fn rewrite_code_spans(text: &str, open: &str, close: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(rel) = memchr(b'`', &bytes[pos..]) {
        let tick = pos + rel;
        match memchr(b'`', &bytes[tick + 1..]) {
            Some(close_rel) => {
                let closing = tick + 1 + close_rel;
                out.push_str(&text[pos..tick]);
                out.push_str(open);
                out.push_str(&text[tick + 1..closing]);
                out.push_str(close);
                pos = closing + 1;
            }
            None => break,
        }
    }

    out.push_str(&text[pos..]);
    out
}

/// Replace `**span**` with `open`/`close` wrappers.
///
/// The span body may not contain `*`; a lone `*` after an opener leaves
/// the opener as literal text.
fn rewrite_emphasis(text: &str, open: &str, close: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(rel) = find_double(bytes, b'*', pos) {
        let opener = pos + rel;
        let body_start = opener + 2;

        let body_len = bytes[body_start..]
            .iter()
            .take_while(|&&b| b != b'*')
            .count();
        let body_end = body_start + body_len;

        if bytes[body_end..].starts_with(b"**") {
            out.push_str(&text[pos..opener]);
            out.push_str(open);
            out.push_str(&text[body_start..body_end]);
            out.push_str(close);
            pos = body_end + 2;
        } else {
            // No closing pair; emit the first star and rescan after it.
            out.push_str(&text[pos..opener + 1]);
            pos = opener + 1;
        }
    }

    out.push_str(&text[pos..]);
    out
}

/// Find the next position of a doubled byte at or after `from`,
/// relative to `from`.
#[inline]
fn find_double(bytes: &[u8], needle: u8, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = memchr(needle, &bytes[pos..]) {
        let at = pos + rel;
        if bytes.get(at + 1) == Some(&needle) {
            return Some(at - from);
        }
        pos = at + 1;
    }
    None
}

#[derive(Clone, Copy)]
enum ReferenceStyle {
    Html,
    Plain,
}

/// Replace `<<caption|target>>` spans.
///
/// The caption may not contain `|`, the target may not contain `>`. In
/// hypertext a target ending in an image extension becomes an embedded
/// image block (closing and reopening the surrounding paragraph), any
/// other target an anchor. In plain text both flatten to
/// `caption (target)`.
fn rewrite_references(text: &str, style: ReferenceStyle) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(rel) = text[pos..].find("<<") {
        let opener = pos + rel;

        match parse_reference(&text[opener..]) {
            Some((caption, target, span_len)) => {
                out.push_str(&text[pos..opener]);
                render_reference(&mut out, caption, target, style);
                pos = opener + span_len;
            }
            None => {
                out.push_str(&text[pos..opener + 1]);
                pos = opener + 1;
            }
        }
    }

    out.push_str(&text[pos..]);
    out
}

/// Parse `<<caption|target>>` at the start of `text`, returning the
/// caption, target, and total span length.
fn parse_reference(text: &str) -> Option<(&str, &str, usize)> {
    let inner = &text[2..];
    let pipe = inner.find('|')?;
    if pipe == 0 {
        return None;
    }

    let after_pipe = &inner[pipe + 1..];
    let gt = after_pipe.find('>')?;
    if gt == 0 || !after_pipe[gt..].starts_with(">>") {
        return None;
    }

    let caption = &inner[..pipe];
    let target = &after_pipe[..gt];
    Some((caption, target, 2 + pipe + 1 + gt + 2))
}

fn render_reference(out: &mut String, caption: &str, target: &str, style: ReferenceStyle) {
    match style {
        ReferenceStyle::Html => {
            if target.ends_with(".jpeg") || target.ends_with(".png") {
                out.push_str("</p><div class=imgdiv><img src='");
                out.push_str(target);
                out.push_str("' alt='");
                out.push_str(caption);
                out.push_str("'></div><p>");
            } else {
                out.push_str("<a href='");
                out.push_str(target);
                out.push_str("'>");
                out.push_str(caption);
                out.push_str("</a>");
            }
        }
        ReferenceStyle::Plain => {
            out.push_str(caption);
            out.push_str(" (");
            out.push_str(target);
            out.push(')');
        }
    }
}
