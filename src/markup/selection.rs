/// Selected character range within a clause's text.
///
/// Offsets count Unicode scalar values, not bytes. `start == end` is a
/// caret with nothing selected. Bounds are always ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    start: usize,
    end: usize,
}

impl Selection {
    /// Create a selection, ordering the bounds if given reversed.
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A caret at `pos`.
    pub const fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Select the whole of `text`.
    pub fn all(text: &str) -> Self {
        Self::new(0, text.chars().count())
    }

    /// A caret after the last character of `text`.
    pub fn end_of(text: &str) -> Self {
        Self::caret(text.chars().count())
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clamp both bounds into `text`.
    #[must_use]
    pub fn clamped(self, text: &str) -> Self {
        let len = text.chars().count();
        Self::new(self.start.min(len), self.end.min(len))
    }

    /// Byte range of this selection within `text`.
    ///
    /// Bounds past the end of `text` map to `text.len()`.
    pub fn byte_range(&self, text: &str) -> std::ops::Range<usize> {
        char_to_byte(text, self.start)..char_to_byte(text, self.end)
    }
}

fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}
