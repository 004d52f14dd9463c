//! Markup to plain text, following how browsers render `innerText`

use html_escape::decode_html_entities;

/// Elements that start on a new line
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "header", "hr", "li", "main", "nav", "ol", "pre", "section", "table", "tr", "ul",
];

/// Elements separated from their neighbours by a blank line
const SPACED_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p"];

/// Elements whose contents are never rendered
const HIDDEN_TAGS: &[&str] = &["head", "script", "style", "template", "title"];

/// Extract the text a reader would see from rich-text markup.
///
/// Tags are dropped, whitespace runs collapse to one space, block elements
/// break lines (paragraphs and headings by a blank line), `<br>` breaks one
/// line and common entities are decoded. Images contribute nothing.
pub fn markup_to_text(markup: &str) -> String {
    let mut out = TextSink::default();
    let mut hidden: Option<String> = None;
    let mut rest = markup;

    while !rest.is_empty() {
        let Some(open) = rest.find('<') else {
            if hidden.is_none() {
                out.push_text(rest);
            }
            break;
        };
        if hidden.is_none() {
            out.push_text(&rest[..open]);
        }
        rest = &rest[open..];

        let Some(close) = tag_end(rest) else {
            // Unterminated tag: treat the remainder as text
            if hidden.is_none() {
                out.push_text(rest);
            }
            break;
        };
        let tag = Tag::parse(&rest[1..close]);
        rest = &rest[close + 1..];

        let Some(tag) = tag else { continue };
        if let Some(name) = &hidden {
            if tag.closing && tag.name == *name {
                hidden = None;
            }
            continue;
        }
        if HIDDEN_TAGS.contains(&tag.name.as_str()) {
            if !tag.closing && !tag.self_closing {
                hidden = Some(tag.name);
            }
            continue;
        }

        if tag.name == "br" {
            out.line_break();
        } else if SPACED_TAGS.contains(&tag.name.as_str()) {
            out.request_breaks(2);
        } else if BLOCK_TAGS.contains(&tag.name.as_str()) {
            out.request_breaks(1);
        } else if tag.name == "td" || tag.name == "th" {
            if !tag.closing {
                out.push_text("\t");
            }
        }
    }

    out.finish()
}

/// Offset of the `>` closing the tag at the start of `rest`.
///
/// Quoted attribute values may contain `>`.
fn tag_end(rest: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in rest.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

struct Tag {
    name: String,
    closing: bool,
    self_closing: bool,
}

impl Tag {
    /// Parse the inside of `<...>`; comments and doctypes yield `None`
    fn parse(inner: &str) -> Option<Self> {
        if inner.starts_with('!') || inner.starts_with('?') {
            return None;
        }
        let closing = inner.starts_with('/');
        let inner = inner.trim_start_matches('/');
        let self_closing = inner.trim_end().ends_with('/');
        let name: String = inner
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            closing,
            self_closing,
        })
    }
}

#[derive(Default)]
struct TextSink {
    text: String,
    /// Line breaks owed before the next visible text
    pending_breaks: usize,
    /// A collapsed whitespace run is waiting to become a space
    pending_space: bool,
}

impl TextSink {
    fn at_line_start(&self) -> bool {
        self.text.is_empty() || self.text.ends_with('\n')
    }

    fn request_breaks(&mut self, count: usize) {
        self.pending_breaks = self.pending_breaks.max(count);
        self.pending_space = false;
    }

    fn line_break(&mut self) {
        self.flush_breaks();
        self.text.push('\n');
        self.pending_space = false;
    }

    fn flush_breaks(&mut self) {
        if !self.text.is_empty() {
            let already = self.text.chars().rev().take_while(|&c| c == '\n').count();
            for _ in already..self.pending_breaks {
                self.text.push('\n');
            }
        }
        self.pending_breaks = 0;
    }

    fn push_text(&mut self, raw: &str) {
        for c in decode_html_entities(raw).chars() {
            if c.is_ascii_whitespace() && c != '\t' {
                self.pending_space = true;
                continue;
            }
            if self.pending_breaks > 0 {
                self.flush_breaks();
                self.pending_space = false;
            }
            if self.pending_space && !self.at_line_start() {
                self.text.push(' ');
            }
            self.pending_space = false;
            self.text.push(if c == '\u{a0}' { ' ' } else { c });
        }
    }

    fn finish(mut self) -> String {
        let trimmed = self.text.trim_end_matches('\n').len();
        self.text.truncate(trimmed);
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(markup_to_text("hello world"), "hello world");
    }

    #[test]
    fn test_inline_tags_dropped() {
        assert_eq!(markup_to_text("a <b>bold</b> <i>move</i>"), "a bold move");
    }

    #[test]
    fn test_blocks_break_lines() {
        assert_eq!(markup_to_text("<div>one</div><div>two</div>"), "one\ntwo");
        assert_eq!(markup_to_text("<h1>Title</h1><p>Body</p>"), "Title\n\nBody");
        assert_eq!(markup_to_text("line<br>next<br/>last"), "line\nnext\nlast");
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            markup_to_text("<ul><li>a</li><li>b</li></ul><p>after</p>"),
            "a\nb\n\nafter"
        );
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(markup_to_text("<p>\n  spaced \n  out  </p>"), "spaced out");
    }

    #[test]
    fn test_images_and_styles_excluded() {
        assert_eq!(
            markup_to_text("<style>p { color: red }</style>text<img src=\"x.png\">"),
            "text"
        );
    }

    #[test]
    fn test_entities() {
        assert_eq!(markup_to_text("a &amp; b &lt;c&gt; &#65;&#x42;&nbsp;!"), "a & b <c> AB !");
        assert_eq!(markup_to_text("a & b &bogus;"), "a & b &bogus;");
    }

    #[test]
    fn test_angle_bracket_inside_attribute() {
        assert_eq!(markup_to_text("<p><img alt=\"a>b\" src=\"x\">hi</p>"), "hi");
        assert_eq!(markup_to_text("<span title='1 > 0'>yes</span>"), "yes");
        assert_eq!(markup_to_text("<p>x<img alt=\"open"), "x<img alt=\"open");
    }

    #[test]
    fn test_empty_markup() {
        assert_eq!(markup_to_text(""), "");
        assert_eq!(markup_to_text("<p></p><div><br></div>"), "");
    }
}
