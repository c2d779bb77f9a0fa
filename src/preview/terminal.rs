use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};

use super::{BlockKind, InlineStyle, Preview};

const LIST_BULLET: &str = "  • ";

/// Write `preview` to a terminal-like sink.
///
/// With `styled` off, only plain text and block layout are written, which
/// keeps output readable when piped.
pub fn write_terminal(out: &mut impl Write, preview: &Preview, styled: bool) -> io::Result<()> {
    for block in preview.blocks() {
        match block.kind() {
            BlockKind::Heading(_) => {
                if styled {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
            }
            BlockKind::ListItem => queue!(out, Print(LIST_BULLET))?,
            BlockKind::Paragraph => {}
        }
        for span in block.spans() {
            if styled {
                set_style(out, span.style())?;
            }
            queue!(out, Print(span.text()))?;
            if styled {
                queue!(out, SetAttribute(Attribute::Reset))?;
                if matches!(block.kind(), BlockKind::Heading(_)) {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
            }
        }
        if styled {
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        queue!(out, Print("\n"))?;
        if !matches!(block.kind(), BlockKind::ListItem) {
            queue!(out, Print("\n"))?;
        }
    }
    out.flush()
}

fn set_style(out: &mut impl Write, style: InlineStyle) -> io::Result<()> {
    if style.strong {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.emphasis {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(source: &str) -> String {
        let mut out = Vec::new();
        write_terminal(&mut out, &Preview::parse(source), false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_output_drops_markers() {
        assert_eq!(plain("**Term**: one *year*"), "Term: one year\n\n");
    }

    #[test]
    fn test_plain_output_lists_are_tight() {
        assert_eq!(plain("• a\n• b"), "  • a\n  • b\n");
    }

    #[test]
    fn test_styled_output_contains_escape_codes() {
        let mut out = Vec::new();
        write_terminal(&mut out, &Preview::parse("**x**"), true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\u{1b}'));
        assert!(text.contains('x'));
    }
}
