use unicode_width::UnicodeWidthStr;

/// Single-line text field with a byte cursor that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = prev_char_boundary(&self.text, self.cursor);
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        let end = next_char_boundary(&self.text, self.cursor);
        self.text.replace_range(self.cursor..end, "");
    }

    /// Ctrl-W: drop the word before the cursor
    pub fn delete_word_back(&mut self) {
        let start = prev_word_boundary(&self.text, self.cursor);
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        self.cursor = prev_char_boundary(&self.text, self.cursor);
    }

    pub fn move_right(&mut self) {
        self.cursor = next_char_boundary(&self.text, self.cursor);
    }

    pub fn move_word_left(&mut self) {
        self.cursor = prev_word_boundary(&self.text, self.cursor);
    }

    pub fn move_word_right(&mut self) {
        self.cursor = next_word_boundary(&self.text, self.cursor);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Terminal columns between the start of the field and the cursor.
    pub fn display_cursor_offset(&self) -> u16 {
        self.text[..self.cursor].width() as u16
    }
}

fn prev_char_boundary(s: &str, byte_index: usize) -> usize {
    s[..byte_index]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(s: &str, byte_index: usize) -> usize {
    s[byte_index..]
        .chars()
        .next()
        .map(|c| byte_index + c.len_utf8())
        .unwrap_or(s.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn prev_word_boundary(s: &str, byte_index: usize) -> usize {
    let chars: Vec<(usize, char)> = s[..byte_index].char_indices().collect();
    let mut pos = chars.len();
    while pos > 0 && !is_word_char(chars[pos - 1].1) {
        pos -= 1;
    }
    while pos > 0 && is_word_char(chars[pos - 1].1) {
        pos -= 1;
    }
    chars.get(pos).map(|(i, _)| *i).unwrap_or(byte_index)
}

fn next_word_boundary(s: &str, byte_index: usize) -> usize {
    let mut chars = s[byte_index..].char_indices().peekable();
    while let Some((_, c)) = chars.peek() {
        if !is_word_char(*c) {
            break;
        }
        chars.next();
    }
    while let Some((_, c)) = chars.peek() {
        if is_word_char(*c) {
            break;
        }
        chars.next();
    }
    chars
        .peek()
        .map(|(i, _)| byte_index + i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> TextInput {
        let mut input = TextInput::new();
        for c in s.chars() {
            input.insert(c);
        }
        input
    }

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut input = typed("Zürich");
        assert_eq!(input.text(), "Zürich");
        assert_eq!(input.cursor(), "Zürich".len());

        for _ in 0..4 {
            input.backspace();
        }
        assert_eq!(input.text(), "Zü");
        input.backspace();
        assert_eq!(input.text(), "Z");
    }

    #[test]
    fn test_move_and_insert_in_middle() {
        let mut input = typed("Pars");
        input.move_left();
        input.move_left();
        input.insert('i');
        assert_eq!(input.text(), "Pairs");
        input.move_home();
        input.delete();
        assert_eq!(input.text(), "airs");
        input.move_end();
        input.delete();
        assert_eq!(input.text(), "airs");
    }

    #[test]
    fn test_word_motion() {
        let mut input = TextInput::with_text("buy oat milk");
        input.move_word_left();
        assert_eq!(input.cursor(), 8);
        input.move_word_left();
        assert_eq!(input.cursor(), 4);
        input.move_word_right();
        assert_eq!(input.cursor(), 8);
        input.move_end();
        input.delete_word_back();
        assert_eq!(input.text(), "buy oat ");
    }

    #[test]
    fn test_word_motion_with_punctuation() {
        let mut input = TextInput::with_text("hello, world!");
        input.move_home();
        input.move_word_right();
        assert_eq!(input.cursor(), 7);
        input.move_end();
        input.move_word_left();
        assert_eq!(input.cursor(), 7);
    }

    #[test]
    fn test_blank_and_clear() {
        let mut input = typed("   ");
        assert!(input.is_blank());
        input.clear();
        assert_eq!(input, TextInput::new());
    }

    #[test]
    fn test_display_cursor_offset_counts_wide_chars() {
        let input = typed("東京");
        assert_eq!(input.display_cursor_offset(), 4);
    }
}
