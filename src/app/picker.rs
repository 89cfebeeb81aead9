//! Tool picker with fuzzy search

use std::fmt;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Style;
use tui_textarea::{Input, TextArea};

use crate::lesson::Tool;

pub struct ToolPicker {
    search: TextArea<'static>,
    matcher: SkimMatcherV2,
    matches: Vec<Tool>,
    selected: usize,
}

impl fmt::Debug for ToolPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolPicker")
            .field("query", &self.query())
            .field("matches", &self.matches)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl Default for ToolPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolPicker {
    pub fn new() -> Self {
        let mut search = TextArea::default();
        search.set_cursor_line_style(Style::default());
        search.set_placeholder_text("Search tools");

        Self {
            search,
            matcher: SkimMatcherV2::default(),
            matches: Tool::ALL.to_vec(),
            selected: 0,
        }
    }

    pub fn query(&self) -> &str {
        self.search.lines().first().map(String::as_str).unwrap_or("")
    }

    pub fn search_textarea_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.search
    }

    pub fn matches(&self) -> &[Tool] {
        &self.matches
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_tool(&self) -> Option<Tool> {
        self.matches.get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        if !self.matches.is_empty() {
            self.selected = (self.selected + 1) % self.matches.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.matches.is_empty() {
            self.selected = (self.selected + self.matches.len() - 1) % self.matches.len();
        }
    }

    /// Re-rank tools against the search text
    ///
    /// Every whitespace-separated term has to match; tools are ordered by
    /// total score, ties keeping their menu order.
    fn refilter(&mut self) {
        let terms: Vec<&str> = self.query().split_whitespace().collect();

        self.matches = if terms.is_empty() {
            Tool::ALL.to_vec()
        } else {
            let mut scored: Vec<(Tool, i64)> = Tool::ALL
                .iter()
                .filter_map(|tool| {
                    let mut total = 0;
                    for term in &terms {
                        total += self.matcher.fuzzy_match(tool.label(), term)?;
                    }
                    Some((*tool, total))
                })
                .collect();
            scored.sort_by(|a, b| b.1.cmp(&a.1));
            scored.into_iter().map(|(tool, _)| tool).collect()
        };
        self.selected = 0;
    }

    /// Handle a key; returns the tool to open on Enter
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Tool> {
        match key.code {
            KeyCode::Enter => return self.selected_tool(),
            KeyCode::Down => self.select_next(),
            KeyCode::Up => self.select_previous(),
            _ => {
                if self.search.input(Input::from(key)) {
                    self.refilter();
                }
            }
        }
        None
    }
}
