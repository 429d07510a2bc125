// Numbered option list: pick with the arrow keys or by typing the option's number

use crossterm::event::KeyCode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::{
    error::InputError,
    text_box::{InputMode, TextBox},
};

/// Parses a 1-based choice typed by the operator into an index into `count` options
pub fn parse_choice(input: &str, count: usize) -> Result<usize, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InputError::Blank);
    }
    let choice: usize = input
        .parse()
        .map_err(|_| InputError::NotANumber(input.to_owned()))?;
    if choice == 0 || choice > count {
        return Err(InputError::OutOfRange { choice, count });
    }
    Ok(choice - 1)
}

#[derive(Debug, Clone)]
pub struct Selector {
    title: String,
    options: Vec<String>,
    selected: usize,
    number_box: TextBox,
}

impl Selector {
    pub fn new(title: &str, options: Vec<String>) -> Self {
        let mut number_box = TextBox::new("Your choice");
        number_box.set_input_mode(InputMode::Editing);
        Self {
            title: title.to_owned(),
            options,
            selected: 0,
            number_box,
        }
    }

    /// Handles a keypress. Enter yields the chosen index, or why the typed choice is invalid.
    pub fn handle_key(&mut self, key_code: KeyCode) -> Option<Result<usize, InputError>> {
        match key_code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Enter => return Some(self.choice()),
            other => {
                self.number_box.handle_key(other);
            }
        }
        None
    }

    fn choice(&mut self) -> Result<usize, InputError> {
        if self.number_box.get_input().trim().is_empty() {
            if self.options.is_empty() {
                return Err(InputError::OutOfRange { choice: 0, count: 0 });
            }
            return Ok(self.selected);
        }
        let choice = parse_choice(self.number_box.get_input(), self.options.len());
        self.number_box.clear_input();
        if let Ok(index) = choice {
            self.selected = index;
        }
        choice
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| ListItem::new(format!("{})  {}", index + 1, option)))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.title)),
            )
            .highlight_style(Style::new().reversed())
            .highlight_symbol(">>");
        let mut list_state = ListState::default().with_selected(Some(self.selected));

        frame.render_stateful_widget(list, layout[0], &mut list_state);
        frame.render_widget(self.number_box.get_widget(), layout[1]);
    }
}
