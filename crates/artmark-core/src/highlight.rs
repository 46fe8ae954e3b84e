//! Syntax highlighter collaborator seam.
//!
//! Code blocks are rendered through a [`Highlight`] implementation:
//! given raw code text and a declared language identifier, it returns a
//! hypertext fragment. The built-in [`EscapeHighlight`] is the fallback
//! for unrecognized or absent languages: it escapes the code and tags
//! it with the language so a client-side highlighter can take over.

/// Syntax highlighter collaborator.
///
/// Implementations must handle any language identifier, including the
/// empty string.
pub trait Highlight {
    /// Render raw code as a hypertext fragment. `lang` is the declared
    /// fence language, possibly empty.
    fn highlight(&self, code: &str, lang: &str) -> String;
}

/// Escaping fallback highlighter.
///
/// Produces a `<pre><code>` block with the code HTML-escaped and the
/// language carried as a `language-*` class when declared.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeHighlight;

impl Highlight for EscapeHighlight {
    fn highlight(&self, code: &str, lang: &str) -> String {
        let escaped = html_escape::encode_text(code);
        if lang.is_empty() {
            format!("<pre><code>{}</code></pre>", escaped)
        } else {
            format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                lang, escaped
            )
        }
    }
}
