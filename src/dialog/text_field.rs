//! Text field editing primitives.
//!
//! Cursor positions and ranges are char indices, not byte offsets, so
//! multibyte names edit correctly.

/// Editing operations for a dialog's text input.
pub struct TextField;

impl TextField {
    /// Insert a character at the cursor
    #[inline]
    pub fn insert_char(input: &mut String, cursor: &mut usize, c: char) {
        let at = byte_index(input, *cursor);
        input.insert(at, c);
        *cursor += 1;
    }

    /// Delete the character before the cursor
    #[inline]
    pub fn backspace(input: &mut String, cursor: &mut usize) {
        if *cursor > 0 {
            let at = byte_index(input, *cursor - 1);
            input.remove(at);
            *cursor -= 1;
        }
    }

    /// Delete the character at the cursor
    #[inline]
    pub fn delete(input: &mut String, cursor: usize) {
        if cursor < input.chars().count() {
            let at = byte_index(input, cursor);
            input.remove(at);
        }
    }

    /// Remove a char range, leaving the cursor at its start
    pub fn remove_range(input: &mut String, cursor: &mut usize, start: usize, end: usize) {
        let from = byte_index(input, start);
        let to = byte_index(input, end);
        input.replace_range(from..to, "");
        *cursor = start;
    }

    #[inline]
    pub fn left(cursor: &mut usize) {
        if *cursor > 0 {
            *cursor -= 1;
        }
    }

    #[inline]
    pub fn right(input: &str, cursor: &mut usize) {
        if *cursor < input.chars().count() {
            *cursor += 1;
        }
    }

    #[inline]
    pub fn home(cursor: &mut usize) {
        *cursor = 0;
    }

    #[inline]
    pub fn end(input: &str, cursor: &mut usize) {
        *cursor = input.chars().count();
    }
}

/// Byte offset of the given char index (input length when past the end).
fn byte_index(input: &str, char_idx: usize) -> usize {
    input
        .char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(input.len())
}
