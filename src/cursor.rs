//! Forward-only cursor over an immutable text buffer.
//!
//! The cursor tracks a byte offset into the text and never moves backwards.
//! Offsets always land on char boundaries, so `rest()` is always a valid
//! `&str` slice and no part of the buffer is ever copied.

#[derive(Clone, Copy, Debug)]
pub struct TextCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TextCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// The unscanned suffix.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Byte offset of the cursor within the whole text.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Move forward by `bytes`, clamped to the end of the text.
    ///
    /// `bytes` must be a char-boundary length of `rest()`; anything that
    /// would split a character is rounded up to the next boundary.
    pub fn advance(&mut self, bytes: usize) {
        let mut target = (self.pos + bytes).min(self.text.len());
        while !self.text.is_char_boundary(target) {
            target += 1;
        }
        self.pos = target;
    }

    /// Move to just after the next `ch`. Returns false (and stays put) when
    /// no `ch` remains.
    pub fn skip_past(&mut self, ch: char) -> bool {
        match self.rest().find(ch) {
            Some(idx) => {
                self.pos += idx + ch.len_utf8();
                true
            }
            None => false,
        }
    }

    /// The character immediately before byte position `pos` of `rest()`,
    /// looking only inside the unscanned suffix.
    pub fn char_before(&self, pos: usize) -> Option<char> {
        self.rest().get(..pos)?.chars().next_back()
    }
}
