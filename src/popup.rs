// this file contains the "add a song" popup form

use crossterm::event::KeyCode;

use crate::{
    error::InputError,
    song::Song,
    text_box::{InputMode, TextBox},
};

/// What a keypress did to the popup
#[derive(Debug, PartialEq)]
pub enum PopupEvent {
    None,
    Submitted(Song),
    Rejected(InputError),
}

// Popup stores the text boxes of the form and which one has focus
#[derive(Debug, Clone)]
pub struct Popup {
    pub artist_box: TextBox,
    pub title_box: TextBox,
    pub media_box: TextBox,
    focus: usize,
}

impl Popup {
    pub fn new() -> Self {
        Self {
            artist_box: TextBox::new("Artist"),
            title_box: TextBox::new("Title"),
            media_box: TextBox::new("Video URL"),
            focus: 0,
        }
    }

    /// Empties the form and puts the cursor in the first field
    pub fn open(&mut self) {
        self.clear_all_boxes();
        self.focus = 0;
        self.set_all_input_modes(InputMode::Normal);
        self.focused_box().set_input_mode(InputMode::Editing);
    }

    pub fn close(&mut self) {
        self.set_all_input_modes(InputMode::Normal);
    }

    pub fn handle_key(&mut self, key_code: KeyCode) -> PopupEvent {
        match key_code {
            KeyCode::Tab => self.next_field(),
            KeyCode::BackTab => self.previous_field(),
            KeyCode::Enter => {
                if self.do_all_boxes_have_text() {
                    return self.submit();
                }
                if let Err(error) = self.focused_box().value() {
                    return PopupEvent::Rejected(error);
                }
                self.next_field();
            }
            other => {
                self.focused_box().handle_key(other);
            }
        }
        PopupEvent::None
    }

    fn submit(&mut self) -> PopupEvent {
        match self.get_song_from_input() {
            Ok(song) => {
                self.open();
                PopupEvent::Submitted(song)
            }
            Err(error) => PopupEvent::Rejected(error),
        }
    }

    fn get_song_from_input(&self) -> Result<Song, InputError> {
        Ok(Song::new(
            self.artist_box.value()?,
            self.title_box.value()?,
            self.media_box.value()?,
        ))
    }

    fn next_field(&mut self) {
        self.move_focus(1);
    }

    fn previous_field(&mut self) {
        self.move_focus(2);
    }

    fn move_focus(&mut self, step: usize) {
        self.focused_box().set_input_mode(InputMode::Normal);
        self.focus = (self.focus + step) % 3;
        self.focused_box().set_input_mode(InputMode::Editing);
    }

    fn focused_box(&mut self) -> &mut TextBox {
        match self.focus {
            0 => &mut self.artist_box,
            1 => &mut self.title_box,
            _ => &mut self.media_box,
        }
    }

    fn clear_all_boxes(&mut self) {
        self.artist_box.clear_input();
        self.title_box.clear_input();
        self.media_box.clear_input();
    }

    pub fn do_all_boxes_have_text(&self) -> bool {
        self.artist_box.has_text() && self.title_box.has_text() && self.media_box.has_text()
    }

    fn set_all_input_modes(&mut self, new_mode: InputMode) {
        self.artist_box.set_input_mode(new_mode);
        self.title_box.set_input_mode(new_mode);
        self.media_box.set_input_mode(new_mode);
    }
}

impl Default for Popup {
    fn default() -> Self {
        Self::new()
    }
}
