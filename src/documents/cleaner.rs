//! Markdown syntax stripping.
//!
//! Removes markup from a text span while preserving the human-readable
//! content. Cleaning runs before chunking so the embedding model sees
//! prose, not syntax. `clean` is pure and idempotent.

use regex::Regex;
use std::sync::LazyLock;

/// `[label](target)`, with an optional leading `!` captured so image
/// spans can be recognized and left intact for the image pass.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").unwrap());

/// `![alt](target)`.
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap());

/// `**strong**` and `__strong__`.
static STRONG_ASTERISK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static STRONG_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([^_]+)__").unwrap());

/// `*emphasis*` and `_emphasis_`.
static EM_ASTERISK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static EM_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_]+)_").unwrap());

/// Inline code spans.
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]*)`").unwrap());

/// Leading list markers. Repeated markers are consumed in one match so
/// a single pass leaves nothing for a second pass to find.
static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(?:[*+-][ \t]+)+").unwrap());

/// Leading blockquote markers, possibly nested.
static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(?:> ?)+").unwrap());

/// Horizontal rules: three or more of `-`, `*`, `_` alone on a line.
static HRULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*_]{3,}[ \t]*$").unwrap());

/// Strip markdown syntax from `text`, keeping the readable content.
///
/// A single ordered pass can uncover markup an earlier step already
/// walked past (a link inside a code span, a list marker behind a
/// blockquote), so passes repeat until the text is stable. Every
/// replacement strictly shortens the text, so this terminates.
pub fn clean(text: &str) -> String {
    let mut out = strip_markup(text);
    loop {
        let next = strip_markup(&out);
        if next == out {
            return out;
        }
        out = next;
    }
}

/// One ordered sweep of all transformations. Links and images resolve
/// before emphasis so nested syntax is not mangled.
fn strip_markup(text: &str) -> String {
    let text = LINK_RE.replace_all(text, |caps: &regex::Captures| {
        if caps[0].starts_with('!') {
            // Image span; the image pass owns it.
            caps[0].to_string()
        } else {
            caps[1].to_string()
        }
    });
    let text = IMAGE_RE.replace_all(&text, "$1");
    let text = STRONG_ASTERISK_RE.replace_all(&text, "$1");
    let text = STRONG_UNDERSCORE_RE.replace_all(&text, "$1");
    let text = EM_ASTERISK_RE.replace_all(&text, "$1");
    let text = EM_UNDERSCORE_RE.replace_all(&text, "$1");
    let text = CODE_RE.replace_all(&text, "$1");
    let text = LIST_MARKER_RE.replace_all(&text, "");
    let text = BLOCKQUOTE_RE.replace_all(&text, "");
    let text = HRULE_RE.replace_all(&text, "");
    text.trim().to_string()
}
