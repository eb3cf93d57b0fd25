//! Interactive terminal prompts.
//!
//! The session only talks to the [`Prompt`] trait, so it can be driven by a
//! script in tests. [`TerminalPrompt`] is the real implementation on top of
//! crossterm.

use std::io::{self, Write};
use std::ops::Range;

use crossterm::cursor::{Hide, MoveTo, MoveToColumn, MoveUp, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{execute, queue};

use crate::error::{Error, Result};

/// One entry of a selection menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Text shown to the user.
    pub message: String,
    /// Identifier handed back when this entry is chosen.
    pub name: String,
}

impl Choice {
    pub fn new(message: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: name.into(),
        }
    }
}

/// Result of a selection menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The `name` of the chosen entry.
    Chosen(String),
    Cancelled,
}

/// Answer at the "start over or quit" gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Continue,
    Quit,
}

pub trait Prompt {
    /// Let the user pick one of `choices`. Blocks until they do or cancel.
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<Selection>;

    /// Show `message` and block until the user either continues or quits.
    fn wait_for_continue(&mut self, message: &str) -> Result<Gate>;

    /// Clear the screen before the next round.
    fn clear(&mut self) -> Result<()>;
}

/// How many entries of a menu are shown at once.
const MENU_ROWS: usize = 10;

/// Prompts on the process's terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<Selection> {
        if choices.is_empty() {
            return Ok(Selection::Cancelled);
        }

        let mut out = io::stdout();
        let _raw = RawMode::enable()?;
        let mut menu = Menu::new(choices.len(), MENU_ROWS);

        let mut drawn = draw_menu(&mut out, message, choices, &menu, 0).map_err(Error::Terminal)?;
        let selection = loop {
            match menu.handle(read_key()?) {
                MenuAction::Choose(i) => break Selection::Chosen(choices[i].name.clone()),
                MenuAction::Cancel => break Selection::Cancelled,
                MenuAction::Redraw => {
                    drawn = draw_menu(&mut out, message, choices, &menu, drawn)
                        .map_err(Error::Terminal)?;
                }
                MenuAction::Ignore => {}
            }
        };

        let answer = match &selection {
            Selection::Chosen(_) => choices[menu.selected].message.as_str(),
            Selection::Cancelled => "cancelled",
        };
        collapse_menu(&mut out, message, answer, drawn).map_err(Error::Terminal)?;

        Ok(selection)
    }

    fn wait_for_continue(&mut self, message: &str) -> Result<Gate> {
        let mut out = io::stdout();
        execute!(out, Print("\n"), Print(message)).map_err(Error::Terminal)?;

        let gate = {
            let _raw = RawMode::enable()?;
            loop {
                if let Some(gate) = gate_for(read_key()?) {
                    break gate;
                }
            }
        };

        execute!(out, Print("\n")).map_err(Error::Terminal)?;
        Ok(gate)
    }

    fn clear(&mut self) -> Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0)).map_err(Error::Terminal)
    }
}

/// Raw mode and a hidden cursor for as long as this lives.
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        enable_raw_mode().map_err(Error::Terminal)?;
        execute!(io::stdout(), Hide).map_err(Error::Terminal)?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show);
        let _ = disable_raw_mode();
    }
}

fn read_key() -> Result<KeyEvent> {
    loop {
        // Windows reports releases as well as presses.
        if let Event::Key(key) = event::read().map_err(Error::Terminal)? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

fn is_cancel(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn gate_for(key: KeyEvent) -> Option<Gate> {
    if is_cancel(&key) {
        Some(Gate::Quit)
    } else if key.code == KeyCode::Enter {
        Some(Gate::Continue)
    } else {
        None
    }
}

/// Draws the menu over the `previous` lines drawn by the last call, returning
/// how many lines this call drew.
fn draw_menu(
    out: &mut impl Write,
    message: &str,
    choices: &[Choice],
    menu: &Menu,
    previous: usize,
) -> io::Result<usize> {
    rewind(out, previous)?;
    queue!(out, Print(format!("? {}\r\n", message)))?;

    let visible = menu.visible();
    let more_above = visible.start > 0;
    let more_below = visible.end < choices.len();
    for i in visible {
        let marker = match i {
            _ if i == menu.selected => "❯",
            _ if i == menu.offset && more_above => "↑",
            _ if i + 1 == menu.offset + menu.rows && more_below => "↓",
            _ => " ",
        };
        let line = format!("{} {}", marker, choices[i].message);
        if i == menu.selected {
            queue!(out, PrintStyledContent(line.cyan()), Print("\r\n"))?;
        } else {
            queue!(out, Print(line), Print("\r\n"))?;
        }
    }
    out.flush()?;

    Ok(1 + menu.visible().len())
}

/// Replace the menu with a single line holding the answer.
fn collapse_menu(out: &mut impl Write, message: &str, answer: &str, previous: usize) -> io::Result<()> {
    rewind(out, previous)?;
    queue!(
        out,
        Print(format!("? {} › ", message)),
        PrintStyledContent(answer.cyan()),
        Print("\r\n")
    )?;
    out.flush()
}

fn rewind(out: &mut impl Write, lines: usize) -> io::Result<()> {
    if lines > 0 {
        queue!(out, MoveUp(lines as u16), MoveToColumn(0))?;
    }
    queue!(out, Clear(ClearType::FromCursorDown))
}

#[derive(Debug, PartialEq, Eq)]
enum MenuAction {
    Redraw,
    Choose(usize),
    Cancel,
    Ignore,
}

/// Cursor and scroll state of a selection menu.
#[derive(Debug)]
struct Menu {
    len: usize,
    rows: usize,
    selected: usize,
    offset: usize,
}

impl Menu {
    fn new(len: usize, rows: usize) -> Self {
        Self {
            len,
            rows: rows.max(1),
            selected: 0,
            offset: 0,
        }
    }

    fn visible(&self) -> Range<usize> {
        self.offset..(self.offset + self.rows).min(self.len)
    }

    fn handle(&mut self, key: KeyEvent) -> MenuAction {
        if is_cancel(&key) {
            return MenuAction::Cancel;
        }

        let target = match key.code {
            KeyCode::Enter => return MenuAction::Choose(self.selected),
            KeyCode::Up | KeyCode::Char('k') => self.selected.checked_sub(1).unwrap_or(self.len - 1),
            KeyCode::Down | KeyCode::Char('j') => (self.selected + 1) % self.len,
            KeyCode::Home => 0,
            KeyCode::End => self.len - 1,
            KeyCode::PageUp => self.selected.saturating_sub(self.rows),
            KeyCode::PageDown => (self.selected + self.rows).min(self.len - 1),
            _ => return MenuAction::Ignore,
        };

        self.select(target);
        MenuAction::Redraw
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.rows {
            self.offset = index + 1 - self.rows;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_wrap_around() {
        let mut menu = Menu::new(3, 10);

        assert_eq!(menu.handle(key(KeyCode::Up)), MenuAction::Redraw);
        assert_eq!(menu.selected, 2);
        menu.handle(key(KeyCode::Down));
        assert_eq!(menu.selected, 0);
        menu.handle(key(KeyCode::Char('j')));
        assert_eq!(menu.handle(key(KeyCode::Enter)), MenuAction::Choose(1));
    }

    #[test]
    fn escape_and_ctrl_c_cancel() {
        let mut menu = Menu::new(3, 10);

        assert_eq!(menu.handle(key(KeyCode::Esc)), MenuAction::Cancel);
        assert_eq!(
            menu.handle(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            MenuAction::Cancel
        );
        assert_eq!(menu.handle(key(KeyCode::Char('c'))), MenuAction::Ignore);
    }

    #[test]
    fn viewport_follows_selection() {
        let mut menu = Menu::new(25, 10);
        assert_eq!(menu.visible(), 0..10);

        for _ in 0..12 {
            menu.handle(key(KeyCode::Down));
        }
        assert_eq!(menu.selected, 12);
        assert_eq!(menu.visible(), 3..13);

        menu.handle(key(KeyCode::End));
        assert_eq!(menu.visible(), 15..25);

        menu.handle(key(KeyCode::Home));
        assert_eq!(menu.visible(), 0..10);

        menu.handle(key(KeyCode::PageDown));
        assert_eq!(menu.selected, 10);
        assert_eq!(menu.visible(), 1..11);
    }

    #[test]
    fn short_menu_shows_everything() {
        let menu = Menu::new(2, 10);
        assert_eq!(menu.visible(), 0..2);
    }

    #[test]
    fn gate_keys() {
        assert_eq!(gate_for(key(KeyCode::Enter)), Some(Gate::Continue));
        assert_eq!(gate_for(key(KeyCode::Esc)), Some(Gate::Quit));
        assert_eq!(gate_for(key(KeyCode::Char(' '))), None);
    }

    #[test]
    fn draws_visible_rows_only() {
        let choices: Vec<_> = (0..15)
            .map(|i| Choice::new(format!("world {}", i), i.to_string()))
            .collect();
        let menu = Menu::new(choices.len(), 10);

        let mut out = Vec::new();
        let lines = draw_menu(&mut out, "Pick", &choices, &menu, 0).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(lines, 11);
        assert!(text.contains("? Pick"));
        assert!(text.contains("world 9"));
        assert!(!text.contains("world 10"));
    }
}
