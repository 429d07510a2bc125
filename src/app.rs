use std::rc::Rc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    prelude::*,
    symbols::border,
    widgets::{
        block::{Position, Title},
        *,
    },
};
use tracing::{debug, info, warn};

use crate::{
    catalog::SongCatalog,
    error::{AppError, InputError},
    popup::{Popup, PopupEvent},
    request_queue::{EnqueueOutcome, RequestQueue},
    selector::Selector,
    song::{Song, SongRequest},
    text_box::{InputMode, TextBox},
    tui,
};

// AppMode stores the app's current input mode
#[derive(Debug, PartialEq)]
enum AppMode {
    Normal,
    Add,
    Choose(ChooseStep),
    Exit,
}

// the three prompts of the choose action, in order
#[derive(Debug, PartialEq)]
enum ChooseStep {
    Singer,
    Artist,
    Song { artist: String },
}

#[derive(Debug, PartialEq)]
enum Notice {
    Info(String),
    Warning(String),
}

/// App is the session controller: it owns the song catalog and the request queue
#[derive(Debug)]
pub struct App {
    catalog: SongCatalog,
    queue: RequestQueue,
    mode: AppMode,
    notice: Option<Notice>,
    add_popup: Popup,
    singer_box: TextBox,
    selector: Selector,
}

impl App {
    pub fn new() -> Self {
        Self {
            catalog: SongCatalog::new(),
            queue: RequestQueue::new(),
            mode: AppMode::Normal,
            notice: None,
            add_popup: Popup::new(),
            singer_box: TextBox::new("Singer's name"),
            selector: Selector::new("Artists", Vec::new()),
        }
    }

    /// Puts songs on file before the session starts
    pub fn with_songs(songs: impl IntoIterator<Item = Song>) -> Self {
        let mut app = Self::new();
        for song in songs {
            debug!(%song, "preloading song");
            app.catalog.add_song(song);
        }
        app
    }

    /// runs the application's main loop until the operator quits
    pub async fn run(&mut self, terminal: &mut tui::Tui) -> Result<(), AppError> {
        info!(songs = self.catalog.song_count(), "karaoke session started");
        let mut events = EventStream::new();
        while self.mode != AppMode::Exit {
            terminal.draw(|frame| self.render_frame(frame))?;
            match events.next().await {
                Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event)
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => return Err(AppError::Terminal(error)),
                None => self.exit(),
            }
        }
        info!(pending = self.queue.size(), "karaoke session over");
        Ok(())
    }

    pub fn pending_requests(&self) -> usize {
        self.queue.size()
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.exit();
            return;
        }
        if key_event.code == KeyCode::Esc {
            self.cancel();
            return;
        }

        match self.mode {
            AppMode::Normal => match key_event.code {
                KeyCode::Char('q') => self.exit(),
                KeyCode::Char('a') => self.enable_add_song(),
                KeyCode::Char('p') => self.play_next(),
                KeyCode::Char('c') => self.enable_choose(),
                _ => {}
            },
            AppMode::Add => match self.add_popup.handle_key(key_event.code) {
                PopupEvent::Submitted(song) => self.add_song(song),
                PopupEvent::Rejected(error) => self.reject_input(error),
                PopupEvent::None => {}
            },
            AppMode::Choose(ChooseStep::Singer) => {
                if key_event.code == KeyCode::Enter {
                    match self.singer_box.value().map(|_| ()) {
                        Ok(()) => self.prompt_artist(),
                        Err(error) => self.reject_input(error),
                    }
                } else {
                    self.singer_box.handle_key(key_event.code);
                }
            }
            AppMode::Choose(ChooseStep::Artist) => match self.selector.handle_key(key_event.code)
            {
                Some(Ok(index)) => self.prompt_song_for_artist(index),
                Some(Err(error)) => self.reject_input(error),
                None => {}
            },
            AppMode::Choose(ChooseStep::Song { .. }) => {
                match self.selector.handle_key(key_event.code) {
                    Some(Ok(index)) => self.request_song(index),
                    Some(Err(error)) => self.reject_input(error),
                    None => {}
                }
            }
            AppMode::Exit => {}
        }
    }

    fn exit(&mut self) {
        self.mode = AppMode::Exit;
    }

    fn cancel(&mut self) {
        self.add_popup.close();
        self.singer_box.set_input_mode(InputMode::Normal);
        self.mode = AppMode::Normal;
    }

    fn enable_add_song(&mut self) {
        self.add_popup.open();
        self.notice = None;
        self.mode = AppMode::Add;
    }

    fn add_song(&mut self, song: Song) {
        info!(%song, media = %song.media_reference, "song added");
        self.notice = Some(Notice::Info(format!("Song added: {song}")));
        self.catalog.add_song(song);
        self.add_popup.close();
        self.mode = AppMode::Normal;
    }

    fn play_next(&mut self) {
        self.notice = Some(match self.queue.dequeue() {
            Some(request) => {
                let song = &request.song;
                info!(singer = %request.singer_name, %song, "playing next request");
                Notice::Info(format!(
                    "Ready {}? Open {} to hear {} by {}",
                    request.singer_name, song.media_reference, song.title, song.artist
                ))
            }
            None => {
                debug!("play requested with an empty queue");
                Notice::Warning(
                    "Sorry there are no songs in the queue. Use choose from the menu to add more!"
                        .to_owned(),
                )
            }
        });
    }

    fn enable_choose(&mut self) {
        if self.catalog.is_empty() {
            self.notice = Some(Notice::Warning(
                "There are no songs to choose from yet. Use add to put some on file!".to_owned(),
            ));
            return;
        }
        self.notice = None;
        self.singer_box.clear_input();
        self.singer_box.set_input_mode(InputMode::Editing);
        self.mode = AppMode::Choose(ChooseStep::Singer);
    }

    fn prompt_artist(&mut self) {
        let artists = self
            .catalog
            .artists()
            .into_iter()
            .map(str::to_owned)
            .collect();
        self.selector = Selector::new("Artists", artists);
        self.singer_box.set_input_mode(InputMode::Normal);
        self.mode = AppMode::Choose(ChooseStep::Artist);
    }

    fn prompt_song_for_artist(&mut self, index: usize) {
        let Some(artist) = self.catalog.artists().get(index).map(|a| a.to_string()) else {
            return;
        };
        let titles = self
            .catalog
            .songs_for_artist(&artist)
            .iter()
            .map(|song| song.title.clone())
            .collect();
        self.selector = Selector::new(&format!("Available songs for {artist}"), titles);
        self.mode = AppMode::Choose(ChooseStep::Song { artist });
    }

    fn request_song(&mut self, index: usize) {
        let AppMode::Choose(ChooseStep::Song { artist }) = &self.mode else {
            return;
        };
        let Some(song) = self.catalog.songs_for_artist(artist).get(index).cloned() else {
            return;
        };
        let Ok(singer_name) = self.singer_box.value() else {
            return;
        };
        let request = SongRequest::new(singer_name, song);
        let queued_message = format!("{} queued for {}", request.song, request.singer_name);

        self.notice = Some(match self.queue.enqueue(request) {
            EnqueueOutcome::Queued => {
                info!(queued = self.queue.size(), "request queued");
                Notice::Info(queued_message)
            }
            EnqueueOutcome::Duplicate(request) => {
                warn!(singer = %request.singer_name, song = %request.song, "duplicate request rejected");
                Notice::Warning(format!(
                    "Whoops {} already requested {}!",
                    request.singer_name, request.song
                ))
            }
        });
        self.mode = AppMode::Normal;
    }

    fn reject_input(&mut self, error: InputError) {
        debug!(%error, "input rejected");
        self.notice = Some(Notice::Warning(error.to_string()));
    }

    fn render_frame(&self, frame: &mut Frame) {
        let layout = get_layout(frame);

        let title = Title::from(" Karaoke Machine ".bold());
        let summary = Text::from(format!(
            " There are {} songs available and {} in the queue.",
            self.catalog.song_count(),
            self.queue.size()
        ));
        let header_block = Block::default()
            .title(title.alignment(Alignment::Center))
            .borders(Borders::ALL)
            .border_set(border::THICK);
        frame.render_widget(
            Paragraph::new(summary.bold()).left_aligned().block(header_block),
            layout[0],
        );

        let instructions = Title::from(Line::from(vec![
            " Add Song ".into(),
            "<A>".yellow().bold(),
            " Play Next ".into(),
            "<P>".yellow().bold(),
            " Choose Song ".into(),
            "<C>".yellow().bold(),
            " Quit ".into(),
            "<Q> ".yellow().bold(),
        ]));
        let queue_block = Block::default()
            .title(" Up Next ")
            .title(
                instructions
                    .alignment(Alignment::Center)
                    .position(Position::Bottom),
            )
            .borders(Borders::ALL)
            .border_set(border::THICK);
        let rows: Vec<ListItem> = self
            .queue
            .iter()
            .enumerate()
            .map(|(position, request)| request_to_item(position, request))
            .collect();
        frame.render_widget(List::new(rows).block(queue_block), layout[1]);

        let notice = match &self.notice {
            Some(Notice::Info(message)) => Paragraph::new(format!(" {message}")).green(),
            Some(Notice::Warning(message)) => Paragraph::new(format!(" {message}")).yellow(),
            None => Paragraph::default(),
        };
        frame.render_widget(
            notice.block(Block::default().borders(Borders::ALL)),
            layout[2],
        );

        match &self.mode {
            AppMode::Add => {
                let popup_area = centered_rect(frame.size(), 60, 50);
                frame.render_widget(Clear, popup_area);
                render_add_popup(frame, &self.add_popup, popup_area);
            }
            AppMode::Choose(step) => {
                let popup_area = centered_rect(frame.size(), 60, 60);
                frame.render_widget(Clear, popup_area);
                let block = Block::default()
                    .borders(Borders::ALL)
                    .title(Title::from(" Choose a Song ").alignment(Alignment::Center))
                    .title(
                        popup_instructions("Next")
                            .alignment(Alignment::Center)
                            .position(Position::Bottom),
                    );
                let inner = block.inner(popup_area);
                frame.render_widget(block, popup_area);
                match step {
                    ChooseStep::Singer => {
                        let area = Layout::default()
                            .direction(Direction::Vertical)
                            .constraints([Constraint::Length(3), Constraint::Min(0)])
                            .split(inner)[0];
                        frame.render_widget(self.singer_box.get_widget(), area);
                    }
                    ChooseStep::Artist | ChooseStep::Song { .. } => {
                        self.selector.render(frame, inner)
                    }
                }
            }
            AppMode::Normal | AppMode::Exit => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn request_to_item(position: usize, request: &SongRequest) -> ListItem {
    ListItem::new(Line::from(vec![
        format!(" {}) ", position + 1).into(),
        Span::raw(request.singer_name.clone()).bold(),
        format!(" - {}", request.song).into(),
    ]))
}

fn popup_instructions(submit_label: &str) -> Title {
    Title::from(Line::from(vec![
        " Cancel ".into(),
        "<Esc>".yellow().bold(),
        format!(" {submit_label} ").into(),
        "<Enter> ".yellow().bold(),
    ]))
}

fn get_layout(frame: &Frame) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.size())
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_add_popup(frame: &mut Frame, popup: &Popup, area: Rect) {
    let instructions = Title::from(Line::from(vec![
        " Cancel ".into(),
        "<Esc>".yellow().bold(),
        " Next Field ".into(),
        "<Tab>".yellow().bold(),
        " Submit ".into(),
        "<Enter> ".yellow().bold(),
    ]));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Title::from(" New Song ").alignment(Alignment::Center))
        .title(
            instructions
                .alignment(Alignment::Center)
                .position(Position::Bottom),
        );

    let vert_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(block.inner(area));

    frame.render_widget(block, area);
    frame.render_widget(popup.artist_box.get_widget(), vert_layout[0]);
    frame.render_widget(popup.title_box.get_widget(), vert_layout[1]);
    frame.render_widget(popup.media_box.get_widget(), vert_layout[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, key_code: KeyCode) {
        app.handle_key_event(key_code.into());
    }

    fn type_line(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    fn choose(app: &mut App, singer: &str, artist: &str, song: &str) {
        press(app, KeyCode::Char('c'));
        type_line(app, singer);
        type_line(app, artist);
        type_line(app, song);
    }

    fn notice(app: &App) -> &str {
        match &app.notice {
            Some(Notice::Info(message)) | Some(Notice::Warning(message)) => message,
            None => "",
        }
    }

    fn queen_app() -> App {
        App::with_songs([
            Song::new("Queen", "Bohemian Rhapsody", "url1"),
            Song::new("ABBA", "Waterloo", "url2"),
            Song::new("Queen", "Radio Ga Ga", "url3"),
        ])
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render_frame(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn handle_quit_key() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, AppMode::Exit);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('a'));
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(app.mode, AppMode::Exit);
    }

    #[test]
    fn add_song_through_form() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, AppMode::Add);
        type_line(&mut app, "Queen");
        type_line(&mut app, "Bohemian Rhapsody");
        type_line(&mut app, "url1");

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.catalog.song_count(), 1);
        assert_eq!(app.catalog.artists(), vec!["Queen"]);
        assert_eq!(notice(&app), "Song added: Bohemian Rhapsody by Queen");
    }

    #[test]
    fn escape_cancels_add() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('a'));
        type_line(&mut app, "Queen");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.catalog.song_count(), 0);
    }

    #[test]
    fn choose_then_play() {
        let mut app = queen_app();
        choose(&mut app, "Alice", "1", "2");

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.queue.size(), 1);
        assert_eq!(notice(&app), "Radio Ga Ga by Queen queued for Alice");

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.queue.size(), 0);
        assert_eq!(
            notice(&app),
            "Ready Alice? Open url3 to hear Radio Ga Ga by Queen"
        );
    }

    #[test]
    fn duplicate_choice_is_rejected() {
        let mut app = queen_app();
        choose(&mut app, "Alice", "1", "1");
        choose(&mut app, "Alice", "1", "1");

        assert_eq!(app.queue.size(), 1);
        assert_eq!(
            notice(&app),
            "Whoops Alice already requested Bohemian Rhapsody by Queen!"
        );
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn typed_values_are_kept_as_typed() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('a'));
        type_line(&mut app, "queen ");
        type_line(&mut app, "Radio Ga Ga");
        type_line(&mut app, "url3");
        assert_eq!(app.catalog.artists(), vec!["queen "]);

        choose(&mut app, "Alice", "1", "1");
        choose(&mut app, "Alice ", "1", "1");
        assert_eq!(app.queue.size(), 2);
        let singers: Vec<&str> = app.queue.iter().map(|r| r.singer_name.as_str()).collect();
        assert_eq!(singers, vec!["Alice", "Alice "]);
    }

    #[test]
    fn choose_with_arrow_keys() {
        let mut app = queen_app();
        press(&mut app, KeyCode::Char('c'));
        type_line(&mut app, "Bob");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.mode,
            AppMode::Choose(ChooseStep::Song {
                artist: "ABBA".to_owned()
            })
        );
        press(&mut app, KeyCode::Enter);

        let request = app.queue.dequeue().unwrap();
        assert_eq!(request.singer_name, "Bob");
        assert_eq!(request.song, Song::new("ABBA", "Waterloo", "url2"));
    }

    #[test]
    fn invalid_choice_keeps_prompting() {
        let mut app = queen_app();
        press(&mut app, KeyCode::Char('c'));
        type_line(&mut app, "Alice");
        type_line(&mut app, "7");

        assert_eq!(app.mode, AppMode::Choose(ChooseStep::Artist));
        assert_eq!(notice(&app), "Choose a number from 1 to 2, not 7");
        assert_eq!(app.queue.size(), 0);
    }

    #[test]
    fn blank_singer_is_refused() {
        let mut app = queen_app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Choose(ChooseStep::Singer));
        assert_eq!(notice(&app), "Please enter a value");
    }

    #[test]
    fn choose_needs_songs_on_file() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(notice(&app).starts_with("There are no songs to choose from yet"));
    }

    #[test]
    fn play_with_empty_queue() {
        let mut app = queen_app();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.queue.size(), 0);
        assert_eq!(
            notice(&app),
            "Sorry there are no songs in the queue. Use choose from the menu to add more!"
        );
    }

    #[test]
    fn render_summary_and_queue() {
        let mut app = queen_app();
        choose(&mut app, "Alice", "1", "1");
        choose(&mut app, "Bob", "2", "1");

        let screen = screen(&app);
        assert!(screen.contains("There are 3 songs available and 2 in the queue."));
        assert!(screen.contains("1) Alice - Bohemian Rhapsody by Queen"));
        assert!(screen.contains("2) Bob - Waterloo by ABBA"));
    }

    #[test]
    fn render_artist_prompt() {
        let mut app = queen_app();
        press(&mut app, KeyCode::Char('c'));
        type_line(&mut app, "Alice");

        let screen = screen(&app);
        assert!(screen.contains("1)  Queen"));
        assert!(screen.contains("2)  ABBA"));
        assert!(screen.contains("Your choice"));
    }
}
