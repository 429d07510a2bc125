// Single line text input, based on ratatui's user_input example

use crossterm::event::KeyCode;
use ratatui::{
    style::Stylize,
    text::Text,
    widgets::{Block, Borders, Paragraph},
};

use crate::error::InputError;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Editing,
}

/// TextBox holds the state of the widget
#[derive(Debug, Clone)]
pub struct TextBox {
    /// Title of the box (displayed before text)
    title: String,
    /// Current value of the input box
    input: String,
    /// Position of cursor, counted in chars
    cursor_position: usize,
    pub input_mode: InputMode,
}

impl TextBox {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            input: String::new(),
            cursor_position: 0,
            input_mode: InputMode::Normal,
        }
    }

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }

    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }

    pub fn enter_char(&mut self, new_char: char) {
        self.input.insert(self.byte_index(), new_char);
        self.move_cursor_right();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        // rebuild from chars so multi-byte input is never split
        let before_char_to_delete = self.input.chars().take(self.cursor_position - 1);
        let after_char_to_delete = self.input.chars().skip(self.cursor_position);
        self.input = before_char_to_delete.chain(after_char_to_delete).collect();
        self.move_cursor_left();
    }

    /// Applies an editing key. Returns false when the key is not an editing key.
    pub fn handle_key(&mut self, key_code: KeyCode) -> bool {
        match key_code {
            KeyCode::Char(input_char) => self.enter_char(input_char),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.reset_cursor(),
            KeyCode::End => self.cursor_position = self.input.chars().count(),
            _ => return false,
        }
        true
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .map(|(index, _)| index)
            .nth(self.cursor_position)
            .unwrap_or(self.input.len())
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input.chars().count())
    }

    fn reset_cursor(&mut self) {
        self.cursor_position = 0;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.reset_cursor();
    }

    /// The input exactly as typed, refused when it is only whitespace
    pub fn value(&self) -> Result<&str, InputError> {
        if self.input.trim().is_empty() {
            return Err(InputError::Blank);
        }
        Ok(&self.input)
    }

    pub fn has_text(&self) -> bool {
        self.value().is_ok()
    }

    pub fn set_input_mode(&mut self, input_mode: InputMode) {
        self.input_mode = input_mode;
    }

    pub fn get_input(&self) -> &str {
        &self.input
    }

    pub fn get_widget(&self) -> Paragraph {
        let text = Text::from(format!(" {}: {}", self.title, self.input));
        let block = Block::default().borders(Borders::ALL);
        match self.input_mode {
            InputMode::Normal => Paragraph::new(text).left_aligned().block(block),
            InputMode::Editing => Paragraph::new(text.yellow().bold())
                .left_aligned()
                .block(block),
        }
    }
}
