use crate::export;
use crate::render;
use crate::store::{self, Config};
use crate::suggest::{self, BuiltinTopics, SuggestError, SUGGEST_TIMEOUT};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};
use wordsearch_core::{
    Generator, HintOutcome, Position, SelectionOutcome, Session, MAX_GRID_SIZE, MIN_GRID_SIZE,
    MIN_WORD_COUNT,
};

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal solving
    Playing,
    /// Every word has been found
    Solved,
}

/// Menu state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    None,
    /// Pick a grid size and regenerate with the current words
    NewPuzzle,
    /// Pick a topic to fetch a fresh word list for
    Topic,
    Theme,
}

/// A word suggestion request running on its worker thread
struct PendingFetch {
    rx: Receiver<Result<Vec<String>, SuggestError>>,
    deadline: Instant,
    topic: String,
}

/// The main application state
pub struct App {
    /// Current solving session
    pub session: Session,
    /// Color theme
    pub theme: Theme,
    theme_name: String,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Open menu, if any
    pub menu: MenuState,
    /// Selected menu item
    pub menu_selection: usize,
    /// Selected word in the word-bank panel (hint target)
    pub word_cursor: usize,
    /// Message to display
    pub message: Option<String>,
    /// Whether the current message reports a failure
    pub message_is_error: bool,
    /// Message timer
    message_timer: u32,
    /// Grid size the next generation will use
    pub pending_size: usize,
    /// Words requested from the topic source
    suggest_count: usize,
    /// In-flight word suggestion, polled from tick()
    pending_fetch: Option<PendingFetch>,
    /// Whether the current puzzle has been saved since generation
    pub unsaved_changes: bool,
    /// Terminal column of cell (0,0), set by the renderer each frame so
    /// mouse coordinates can be mapped back to cells
    pub grid_left: u16,
    /// Terminal row of cell (0,0), set by the renderer each frame
    pub grid_top: u16,
    /// Terminal column of the word panel, set by the renderer each frame
    pub panel_left: u16,
    /// Terminal row of the first word-bank entry, set by the renderer
    pub panel_top: u16,
}

impl App {
    /// Create an app around an initial session
    pub fn new(session: Session, theme_name: String, suggest_count: usize) -> Self {
        let pending_size = session.grid().size();
        Self {
            theme: Theme::by_name(&theme_name),
            theme_name,
            screen_state: ScreenState::Playing,
            menu: MenuState::None,
            menu_selection: 0,
            word_cursor: 0,
            message: None,
            message_is_error: false,
            message_timer: 0,
            pending_size,
            suggest_count,
            pending_fetch: None,
            unsaved_changes: false,
            grid_left: 0,
            grid_top: 0,
            panel_left: 0,
            panel_top: 0,
            session,
        }
    }

    /// Get the tick rate for the event loop
    pub fn get_tick_rate(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Update timers and poll the suggestion worker (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
        self.poll_fetch();
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_is_error = false;
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Show a temporary failure message
    pub fn show_error(&mut self, msg: &str) {
        self.show_message(msg);
        self.message_is_error = true;
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Solved => self.handle_solved_key(key),
            ScreenState::Playing => match self.menu {
                MenuState::None => self.handle_game_key(key),
                MenuState::NewPuzzle | MenuState::Topic | MenuState::Theme => {
                    self.handle_menu_key(key)
                }
            },
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            // Word-bank navigation (hint target)
            KeyCode::Up | KeyCode::Char('k') => {
                if self.word_cursor > 0 {
                    self.word_cursor -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.word_cursor + 1 < self.session.words().len() {
                    self.word_cursor += 1;
                }
            }

            // Hint for the selected word
            KeyCode::Char('h') | KeyCode::Enter => self.hint_selected_word(),

            // Clear hints
            KeyCode::Char('c') | KeyCode::Esc => self.session.clear_hints(),

            // New puzzle (same words, chosen size)
            KeyCode::Char('n') => {
                self.menu = MenuState::NewPuzzle;
                self.menu_selection = self.pending_size - MIN_GRID_SIZE;
            }

            // Fresh words from a topic
            KeyCode::Char('w') => {
                self.menu = MenuState::Topic;
                self.menu_selection = 0;
            }

            // Theme menu
            KeyCode::Char('t') => {
                self.menu = MenuState::Theme;
                self.menu_selection = 0;
            }

            // Save
            KeyCode::Char('S') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.save_puzzle();
            }

            // Load
            KeyCode::Char('L') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.load_puzzle();
            }

            // Export printable sheets
            KeyCode::Char('e') => self.export_sheets(),

            _ => {}
        }

        AppAction::Continue
    }

    fn handle_solved_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('n') => {
                self.screen_state = ScreenState::Playing;
                self.menu = MenuState::NewPuzzle;
                self.menu_selection = self.pending_size - MIN_GRID_SIZE;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                // Quick reshuffle with the same words and size
                let words = self.session.words().to_vec();
                self.new_puzzle(words, self.pending_size);
            }
            KeyCode::Esc => {
                // Go back to the (finished) grid view
                self.screen_state = ScreenState::Playing;
            }
            KeyCode::Char('e') => self.export_sheets(),
            KeyCode::Char('S') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.save_puzzle();
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.menu = MenuState::None;
            }

            KeyCode::Up | KeyCode::Char('k') => {
                if self.menu_selection > 0 {
                    self.menu_selection -= 1;
                }
            }

            KeyCode::Down | KeyCode::Char('j') => {
                let max = match self.menu {
                    MenuState::NewPuzzle => MAX_GRID_SIZE - MIN_GRID_SIZE,
                    MenuState::Topic => BuiltinTopics::names().len() - 1,
                    MenuState::Theme => 2,
                    MenuState::None => 0,
                };
                if self.menu_selection < max {
                    self.menu_selection += 1;
                }
            }

            KeyCode::Enter | KeyCode::Char(' ') => match self.menu {
                MenuState::NewPuzzle => {
                    self.pending_size = MIN_GRID_SIZE + self.menu_selection;
                    self.menu = MenuState::None;
                    let words = self.session.words().to_vec();
                    let size = self.pending_size;
                    self.new_puzzle(words, size);
                }
                MenuState::Topic => {
                    let topic = BuiltinTopics::names()[self.menu_selection].to_string();
                    self.menu = MenuState::None;
                    self.start_fetch(topic);
                }
                MenuState::Theme => {
                    let name = match self.menu_selection {
                        0 => "dark",
                        1 => "light",
                        _ => "high-contrast",
                    };
                    self.set_theme(name);
                    self.menu = MenuState::None;
                }
                MenuState::None => {}
            },

            _ => {}
        }

        AppAction::Continue
    }

    /// Handle a mouse event: press starts a selection (and counts as
    /// touching the grid, so open hints are cleared), drag grows it, and
    /// release tries to match it
    pub fn handle_mouse(&mut self, event: MouseEvent) -> AppAction {
        if self.screen_state != ScreenState::Playing || self.menu != MenuState::None {
            return AppAction::Continue;
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(cell) = self.cell_at(event.column, event.row) {
                    // Touching the grid dismisses any open hint
                    self.session.clear_hints();
                    self.session.begin_selection(cell);
                } else if let Some(index) = self.word_at(event.column, event.row) {
                    self.word_cursor = index;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(cell) = self.cell_at(event.column, event.row) {
                    self.session.extend_selection(cell);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => match self.session.end_selection() {
                SelectionOutcome::Found { word, solved } => {
                    let found = self.session.found_count();
                    let total = self.session.words().len();
                    self.show_message(&format!("Found {}! ({}/{})", word, found, total));
                    if solved {
                        self.screen_state = ScreenState::Solved;
                    }
                }
                SelectionOutcome::NoMatch | SelectionOutcome::NotDragging => {}
            },
            _ => {}
        }

        AppAction::Continue
    }

    /// Map terminal coordinates to a grid cell, using the layout the
    /// renderer recorded on the last frame
    fn cell_at(&self, column: u16, row: u16) -> Option<Position> {
        if column < self.grid_left || row < self.grid_top {
            return None;
        }
        let col = ((column - self.grid_left) / render::CELL_WIDTH) as usize;
        let grid_row = ((row - self.grid_top) / render::CELL_HEIGHT) as usize;
        let size = self.session.grid().size();
        if col < size && grid_row < size {
            Some(Position::new(grid_row, col))
        } else {
            None
        }
    }

    /// Map terminal coordinates to a word-bank entry
    fn word_at(&self, column: u16, row: u16) -> Option<usize> {
        if column < self.panel_left
            || column >= self.panel_left + render::WORD_PANEL_WIDTH
            || row < self.panel_top
        {
            return None;
        }
        let index = (row - self.panel_top) as usize;
        if index < self.session.words().len() {
            Some(index)
        } else {
            None
        }
    }

    fn hint_selected_word(&mut self) {
        let Some(word) = self.session.words().get(self.word_cursor).cloned() else {
            return;
        };
        match self.session.request_hint(&word) {
            HintOutcome::Revealed(cell) => {
                self.show_message(&format!(
                    "Hint: {} starts at row {}, col {}",
                    word,
                    cell.row + 1,
                    cell.col + 1
                ));
            }
            HintOutcome::AlreadyFound => {
                self.show_message(&format!("{} is already found", word));
            }
            HintOutcome::UnknownWord => {
                self.show_message(&format!("{} is not in this puzzle", word));
            }
        }
    }

    /// Replace the session with a freshly generated puzzle; on failure the
    /// current session stays as it is
    fn new_puzzle(&mut self, words: Vec<String>, size: usize) {
        let mut generator = Generator::new();
        match generator.generate_with_retries(size, &words) {
            Ok(puzzle) => {
                self.session = Session::new(puzzle);
                self.word_cursor = 0;
                self.screen_state = ScreenState::Playing;
                self.unsaved_changes = true;
                self.show_message(&format!("New puzzle - find {} words", words.len()));
            }
            Err(err) => {
                self.show_error(&format!(
                    "Generation failed ({}); try fewer or shorter words, or a larger grid",
                    err
                ));
            }
        }
    }

    fn start_fetch(&mut self, topic: String) {
        let rx = suggest::fetch_words(BuiltinTopics, topic.clone(), self.suggest_count);
        self.pending_fetch = Some(PendingFetch {
            rx,
            deadline: Instant::now() + SUGGEST_TIMEOUT,
            topic: topic.clone(),
        });
        self.show_message(&format!("Fetching words for {}...", topic));
    }

    /// Check on the suggestion worker without ever blocking the event loop
    fn poll_fetch(&mut self) {
        let Some(fetch) = &self.pending_fetch else {
            return;
        };

        match fetch.rx.try_recv() {
            Ok(Ok(words)) => {
                let topic = self.pending_fetch.take().map(|f| f.topic).unwrap_or_default();
                if words.len() < MIN_WORD_COUNT {
                    self.show_error(&format!(
                        "Only {} usable words for {}; need at least {}",
                        words.len(),
                        topic,
                        MIN_WORD_COUNT
                    ));
                } else {
                    let size = self.pending_size;
                    self.new_puzzle(words, size);
                }
            }
            Ok(Err(err)) => {
                self.pending_fetch = None;
                self.show_error(&format!("Word suggestion failed: {}", err));
            }
            Err(TryRecvError::Empty) => {
                if Instant::now() >= fetch.deadline {
                    self.pending_fetch = None;
                    self.show_error(&format!("{}", SuggestError::TimedOut));
                }
            }
            Err(TryRecvError::Disconnected) => {
                self.pending_fetch = None;
                self.show_error(&format!("{}", SuggestError::WorkerGone));
            }
        }
    }

    /// Save the current puzzle to the quick-save slot
    fn save_puzzle(&mut self) {
        let path = store::default_save_path();
        match store::save_puzzle(self.session.puzzle(), &path) {
            Ok(()) => {
                self.unsaved_changes = false;
                self.show_message(&format!("Puzzle saved to {}", path.display()));
            }
            Err(err) => self.show_error(&format!("{}", err)),
        }
    }

    /// Load the quick-save slot; the running session survives a bad file
    fn load_puzzle(&mut self) {
        let path = store::default_save_path();
        match store::load_puzzle(&path) {
            Ok(puzzle) => {
                self.pending_size = puzzle.grid_size;
                self.session = Session::new(puzzle);
                self.word_cursor = 0;
                self.screen_state = ScreenState::Playing;
                self.unsaved_changes = false;
                self.show_message("Puzzle loaded");
            }
            Err(err) => self.show_error(&format!("{}", err)),
        }
    }

    fn export_sheets(&mut self) {
        let dir = store::data_dir().join("export");
        match export::export_to(&dir, self.session.puzzle()) {
            Ok((sheet, _key)) => {
                self.show_message(&format!("Exported sheets to {}", sheet.display()));
            }
            Err(err) => self.show_error(&format!("Export failed: {}", err)),
        }
    }

    fn set_theme(&mut self, name: &str) {
        self.theme = Theme::by_name(name);
        self.theme_name = name.to_string();
        store::save_config(&Config {
            theme: self.theme_name.clone(),
        });
    }

    /// Theme name for the info panel
    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    /// Whether a suggestion request is still in flight
    pub fn is_fetching(&self) -> bool {
        self.pending_fetch.is_some()
    }
}
