use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Instant;

use super::state::{App, Screen};

mod dialog;
mod plan;

impl App {
    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event) {
        // Only key presses; releases and repeats would double the input
        if let Event::Key(key_event) = event
            && key_event.kind == KeyEventKind::Press
        {
            self.handle_key_event(key_event);
        }
    }

    /// Read and handle one event if one arrives within the tick window
    pub fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.poll_timeout(Instant::now()))? {
            self.handle_event(event::read()?);
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        self.handle_key_at(key, Instant::now());
    }

    /// Handle a key press as if it happened at `now`
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) {
        // Ctrl+C: Exit from anywhere
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.shutdown();
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Picker => self.handle_picker_key(key),
            Screen::Dialog => dialog::handle_dialog_key(self, key, now),
            Screen::Plan => plan::handle_plan_key(self, key, now),
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }
        if let Some(tool) = self.picker.handle_key(key) {
            self.open_dialog(tool);
        }
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
