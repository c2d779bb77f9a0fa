//! Preview render tree.

use super::render;

/// Inline style flags for a text span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub underline: bool,
}

/// A styled inline span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

/// Kind of a preview block, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Run of plain lines
    Paragraph,
    /// Heading with level (2 or 3)
    Heading(u8),
    /// Bulleted or numbered list item
    ListItem,
}

/// One block of rendered preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewBlock {
    kind: BlockKind,
    spans: Vec<InlineSpan>,
}

impl PreviewBlock {
    pub const fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn spans(&self) -> &[InlineSpan] {
        &self.spans
    }

    /// Plain text of the block, with line breaks as `\n`.
    pub fn text(&self) -> String {
        self.spans.iter().map(InlineSpan::text).collect()
    }
}

/// Rendered preview of one piece of clause text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Original clause text
    source: String,
    /// Output of the substitution passes
    markup: String,
    blocks: Vec<PreviewBlock>,
}

impl Preview {
    /// Render `source` and read the markup back into blocks.
    pub fn parse(source: &str) -> Self {
        let markup = render(source);
        let blocks = markup.lines().filter_map(parse_block).collect();
        Self {
            source: source.to_string(),
            markup,
            blocks,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn blocks(&self) -> &[PreviewBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

const BLOCK_TAGS: [(&str, &str, BlockKind); 4] = [
    ("<h2>", "</h2>", BlockKind::Heading(2)),
    ("<h3>", "</h3>", BlockKind::Heading(3)),
    ("<li>", "</li>", BlockKind::ListItem),
    ("<p>", "</p>", BlockKind::Paragraph),
];

fn parse_block(line: &str) -> Option<PreviewBlock> {
    BLOCK_TAGS.iter().find_map(|(open, close, kind)| {
        let inner = line.strip_prefix(open)?.strip_suffix(close)?;
        Some(PreviewBlock {
            kind: *kind,
            spans: parse_inline(inner),
        })
    })
}

/// Split block content into styled spans.
///
/// Inline tags act as on/off switches rather than a nesting stack, so
/// mis-nested output from overlapping markers still yields a usable tree.
fn parse_inline(inner: &str) -> Vec<InlineSpan> {
    let mut spans: Vec<InlineSpan> = Vec::new();
    let mut style = InlineStyle::default();
    let mut text = String::new();
    let mut rest = inner;

    while !rest.is_empty() {
        let Some(tag_start) = rest.find('<') else {
            text.push_str(rest);
            break;
        };
        text.push_str(&rest[..tag_start]);
        let after = &rest[tag_start..];
        let Some(tag_len) = after.find('>').map(|i| i + 1) else {
            text.push_str(after);
            break;
        };
        let tag = &after[..tag_len];
        let next = match tag {
            "<strong>" => InlineStyle { strong: true, ..style },
            "</strong>" => InlineStyle { strong: false, ..style },
            "<em>" => InlineStyle { emphasis: true, ..style },
            "</em>" => InlineStyle { emphasis: false, ..style },
            "<u>" => InlineStyle { underline: true, ..style },
            "</u>" => InlineStyle { underline: false, ..style },
            "<br/>" => {
                text.push('\n');
                style
            }
            _ => {
                text.push_str(tag);
                style
            }
        };
        if next != style {
            push_span(&mut spans, &mut text, style);
            style = next;
        }
        rest = &after[tag_len..];
    }
    push_span(&mut spans, &mut text, style);
    spans
}

fn push_span(spans: &mut Vec<InlineSpan>, text: &mut String, style: InlineStyle) {
    if text.is_empty() {
        return;
    }
    let text = unescape(&std::mem::take(text));
    match spans.last_mut() {
        Some(last) if last.style == style => last.text.push_str(&text),
        _ => spans.push(InlineSpan::new(text, style)),
    }
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> InlineStyle {
        InlineStyle::default()
    }

    fn strong() -> InlineStyle {
        InlineStyle {
            strong: true,
            ..InlineStyle::default()
        }
    }

    #[test]
    fn test_parse_bold_paragraph() {
        let preview = Preview::parse("**bold** text");
        assert_eq!(preview.blocks().len(), 1);
        let block = &preview.blocks()[0];
        assert_eq!(block.kind(), BlockKind::Paragraph);
        assert_eq!(
            block.spans(),
            &[
                InlineSpan::new("bold".to_string(), strong()),
                InlineSpan::new(" text".to_string(), plain()),
            ]
        );
    }

    #[test]
    fn test_parse_block_kinds() {
        let preview = Preview::parse("## Terms\n### Scope\n• item\n1. first\n\nbody");
        let kinds: Vec<BlockKind> = preview.blocks().iter().map(PreviewBlock::kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading(2),
                BlockKind::Heading(3),
                BlockKind::ListItem,
                BlockKind::ListItem,
                BlockKind::Paragraph,
            ]
        );
        assert_eq!(preview.blocks()[3].text(), "first");
    }

    #[test]
    fn test_line_breaks_inside_paragraph() {
        let preview = Preview::parse("one\ntwo");
        assert_eq!(preview.blocks()[0].text(), "one\ntwo");
    }

    #[test]
    fn test_escaped_text_round_trips() {
        let preview = Preview::parse("a < b & c > d");
        assert_eq!(preview.blocks()[0].text(), "a < b & c > d");
    }

    #[test]
    fn test_misnested_tags_toggle_styles() {
        let preview = Preview::parse("***a***");
        let spans = preview.blocks()[0].spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(), "a");
        assert!(spans[0].style().strong);
        assert!(spans[0].style().emphasis);
    }

    #[test]
    fn test_nested_emphasis_inside_strong() {
        let preview = Preview::parse("**a*b*c**");
        let spans = preview.blocks()[0].spans();
        let texts: Vec<&str> = spans.iter().map(InlineSpan::text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert!(spans[1].style().strong && spans[1].style().emphasis);
        assert!(spans[2].style().strong && !spans[2].style().emphasis);
    }

    #[test]
    fn test_empty_source_has_no_blocks() {
        assert!(Preview::parse("").is_empty());
    }

    #[test]
    fn test_markup_and_source_are_kept() {
        let preview = Preview::parse("__u__");
        assert_eq!(preview.source(), "__u__");
        assert_eq!(preview.markup(), "<p><u>u</u></p>");
    }
}
