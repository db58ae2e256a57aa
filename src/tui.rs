//! TUI (Terminal User Interface) front-end for Hangman
//!
//! Full-screen panel layout drawn with Ratatui:
//! - Word: the masked word
//! - Attempts: remaining attempts in block digits
//! - Hangman: the current gallows frame
//! - Banner: the last guess in block letters, or WIN / LOSE at the end
//! - Input: the guess being typed
//! - Used letters/words
//!
//! # State Machine
//! `EnteringGuess` until the engine reports the end of the game, then
//! `GameOver`, which waits for Esc or Enter before handing control back.

use crate::art::{AsciiFont, FRAME_HEIGHT, GLYPH_HEIGHT, Gallows};
use crate::error::{GuessError, PersistError};
use crate::game_state::{GameState, Status};
use crate::session::{GameInterface, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::path::Path;

const MAX_INPUT_LEN: usize = 40;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const ATTEMPTS_WIDTH: u16 = 16;
const REJECTION_MESSAGE: &str = "Empty or already proposed!";

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const FAILURE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const GUESS_STYLE: Style = Style::new().fg(Color::LightRed);
const GALLOWS_STYLE: Style = Style::new().fg(Color::Blue);
const COUNTER_STYLE: Style = Style::new().fg(Color::Gray);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    /// Game has ended - waiting for the player to leave
    GameOver,
}

/// What the banner panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Banner {
    Empty,
    LastGuess(char),
    Win,
    Lose,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    game: Option<&'a GameState>,
    current_input: &'a str,
    state: TuiState,
    banner: Banner,
    font: &'a AsciiFont,
    gallows: &'a Gallows,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    font: AsciiFont,
    gallows: Gallows,
    game: Option<GameState>,
    current_input: String,
    state: TuiState,
    banner: Banner,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new(font: AsciiFont) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            font,
            gallows: Gallows::embedded(),
            game: None,
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            banner: Banner::Empty,
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            game: self.game.as_ref(),
            current_input: &self.current_input,
            state: self.state,
            banner: self.banner,
            font: &self.font,
            gallows: &self.gallows,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(18),   // Panels
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_panels(f, chunks[1], ctx);
        Self::render_status(f, chunks[2], ctx.status, ctx.error_message);
        Self::render_instructions(f, chunks[3], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_panels(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(GLYPH_HEIGHT as u16 + 2), // Word + attempts
                Constraint::Length(3),                       // Input
                Constraint::Min(4),                          // Used letters/words
            ])
            .split(columns[0]);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(ATTEMPTS_WIDTH)])
            .split(left[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FRAME_HEIGHT as u16 + 2), // Gallows
                Constraint::Min(GLYPH_HEIGHT as u16 + 2),    // Banner
            ])
            .split(columns[1]);

        Self::render_word(f, top[0], ctx);
        Self::render_attempts(f, top[1], ctx);
        Self::render_input(f, left[1], ctx);
        Self::render_used(f, left[2], ctx);
        Self::render_gallows(f, right[0], ctx);
        Self::render_banner(f, right[1], ctx);
    }

    fn boxed(title: &str, color: Color) -> Block<'_> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
    }

    fn render_word(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let word: Vec<char> = match ctx.game {
            // The whole word is shown once the game is lost.
            Some(game) if game.status() == Status::Lost => game.target().chars().collect(),
            Some(game) => game.revealed().to_vec(),
            None => Vec::new(),
        };
        let text: String = word.iter().flat_map(|&c| [c, ' ']).collect();
        let paragraph = Paragraph::new(Line::from(Span::styled(text, HEADER_STYLE)))
            .wrap(Wrap { trim: false })
            .block(Self::boxed("Word...", Color::Blue));
        f.render_widget(paragraph, area);
    }

    fn render_attempts(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let attempts = ctx.game.map(GameState::attempts_left).unwrap_or_default();
        let lines: Vec<Line> = ctx
            .font
            .render(attempts.to_string().chars())
            .into_iter()
            .map(|row| Line::from(Span::styled(row, COUNTER_STYLE)))
            .collect();
        let paragraph = Paragraph::new(lines).block(Self::boxed("Attempts", Color::Blue));
        f.render_widget(paragraph, area);
    }

    fn render_input(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut spans = vec![Span::raw(ctx.current_input.to_string())];
        if ctx.state == TuiState::EnteringGuess {
            spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
        }
        let paragraph = Paragraph::new(Line::from(spans)).block(Self::boxed("Letter", Color::Green));
        f.render_widget(paragraph, area);
    }

    fn render_used(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();
        if let Some(game) = ctx.game {
            let letters: String = game
                .guessed_letters()
                .iter()
                .flat_map(|&c| [c, ' '])
                .collect();
            lines.push(Line::from(letters));
            for word in game.guessed_words() {
                lines.push(Line::from(word.clone()));
            }
        }
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Self::boxed("Used letter/words", Color::LightMagenta));
        f.render_widget(paragraph, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let lines: Vec<Line> = ctx
            .game
            .and_then(|game| ctx.gallows.frame(game.gallows_stage()))
            .map(|frame| {
                frame
                    .iter()
                    .map(|row| Line::from(Span::styled(row.clone(), GALLOWS_STYLE)))
                    .collect()
            })
            .unwrap_or_default();
        let paragraph = Paragraph::new(lines).block(Self::boxed("Hangman", Color::LightYellow));
        f.render_widget(paragraph, area);
    }

    fn render_banner(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let (text, style) = match ctx.banner {
            Banner::Empty => (String::new(), GUESS_STYLE),
            Banner::LastGuess(c) => (c.to_string(), GUESS_STYLE),
            Banner::Win => ("WIN".to_string(), SUCCESS_STYLE),
            Banner::Lose => ("LOSE".to_string(), FAILURE_STYLE),
        };
        let lines: Vec<Line> = if text.is_empty() {
            Vec::new()
        } else {
            ctx.font
                .render(text.chars())
                .into_iter()
                .map(|row| Line::from(Span::styled(row, style)))
                .collect()
        };
        let paragraph = Paragraph::new(lines).block(Self::boxed("", Color::White));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str, error_message: &str) {
        let line = if error_message.is_empty() {
            Line::from(Span::styled(status.to_string(), MESSAGE_STYLE))
        } else {
            Line::from(Span::styled(error_message.to_string(), ERROR_STYLE))
        };
        let paragraph = Paragraph::new(line).block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => {
                "Type a letter or a word, ENTER/SPACE to submit, DEL to clear, STOP to save, ESC to quit"
            }
            TuiState::GameOver => "Press ENTER or ESC to leave",
        };
        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Instructions").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Handle one input event, if any arrives within the poll timeout.
    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }
        // Filter out garbage characters from terminal escape sequences (alt-tab)
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }

        debug_log!(
            "handle_input() - Key event received: code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );
        Ok(match self.state {
            TuiState::EnteringGuess => self.handle_guess_input(key),
            TuiState::GameOver => Self::handle_game_over_input(key),
        })
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                return Some(UserAction::Exit);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting guess: '{}'", guess);
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Delete => self.current_input.clear(),
            KeyCode::Char(c) if !Self::has_modifier_keys(&key) => {
                if self.current_input.chars().count() < MAX_INPUT_LEN {
                    self.error_message.clear();
                    self.current_input.push(c);
                }
            }
            _ => {
                debug_log!("handle_guess_input() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UserAction::Exit),
            _ => None,
        }
    }

    /// Redraw and process input until an action is produced.
    fn wait_for_action(&mut self) -> UserAction {
        loop {
            if self.draw().is_err() {
                info_log!("wait_for_action() - Draw failed, returning Exit");
                return UserAction::Exit;
            }
            match self.handle_input() {
                Ok(Some(action)) => return action,
                Ok(None) => {}
                Err(_e) => {
                    info_log!("wait_for_action() - Error handling input, returning Exit");
                    return UserAction::Exit;
                }
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_start(&mut self, state: &GameState) {
        self.game = Some(state.clone());
        self.status = format!("Good Luck, you have {} attempts.", state.attempts_left());
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        Some(self.wait_for_action())
    }

    fn display_rejection(&mut self, error: &GuessError) {
        debug_log!("display_rejection() - {}", error);
        self.error_message = REJECTION_MESSAGE.to_string();
        self.draw_or_log();
    }

    fn display_guess_result(&mut self, state: &GameState, guess: &str) {
        self.game = Some(state.clone());
        self.error_message.clear();
        self.banner = guess
            .chars()
            .next()
            .map_or(Banner::Empty, |c| Banner::LastGuess(c.to_ascii_uppercase()));
        self.status = if state.last_guess_failed() {
            format!(
                "Not present in the word, {} attempts remaining",
                state.attempts_left()
            )
        } else {
            format!("'{guess}' is a good guess!")
        };
        self.draw_or_log();
    }

    fn display_saved(&mut self, path: &Path) {
        self.status = format!("Game saved in {}", path.display());
        self.draw_or_log();
    }

    fn display_save_failed(&mut self, error: &PersistError) {
        self.error_message = format!("Game save failed : {error}");
        self.draw_or_log();
    }

    fn display_game_over(&mut self, state: &GameState) {
        self.game = Some(state.clone());
        self.state = TuiState::GameOver;
        if state.status() == Status::Won {
            self.banner = Banner::Win;
            self.status = "Congrats !".to_string();
        } else {
            self.banner = Banner::Lose;
            self.status = format!("The word was {}. You'll do better next time!!!", state.target());
        }
        // Keep the final screen up until the player leaves.
        while self.wait_for_action() != UserAction::Exit {}
    }

    fn display_exit_message(&mut self) {
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
