//! Input dialog view state
//!
//! Text widgets and chip cursors live here; the lesson data itself
//! (topic, grade, lists, selections) is owned by the coordinator.

use ratatui::style::Style;
use tui_textarea::TextArea;

use crate::lesson::Tool;
use crate::suggestions::{Category, SuggestionCoordinator};

/// Focusable parts of the dialog, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFocus {
    Topic,
    Grade,
    Outcomes,
    Tags,
    Notes,
    Document,
}

impl DialogFocus {
    const ORDER: [DialogFocus; 6] = [
        DialogFocus::Topic,
        DialogFocus::Grade,
        DialogFocus::Outcomes,
        DialogFocus::Tags,
        DialogFocus::Notes,
        DialogFocus::Document,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// The chip list this focus points at, if any
    pub fn category(self) -> Option<Category> {
        match self {
            DialogFocus::Outcomes => Some(Category::LearningOutcomes),
            DialogFocus::Tags => Some(Category::DisambiguationTags),
            _ => None,
        }
    }
}

/// Text entry for a manually added item
pub struct AddInput {
    pub category: Category,
    pub textarea: TextArea<'static>,
}

impl AddInput {
    pub fn text(&self) -> &str {
        self.textarea.lines().first().map(String::as_str).unwrap_or("")
    }
}

pub struct DialogView {
    tool: Tool,
    pub coordinator: SuggestionCoordinator,
    pub topic: TextArea<'static>,
    pub notes: TextArea<'static>,
    pub document: TextArea<'static>,
    pub focus: DialogFocus,
    outcomes_cursor: usize,
    tags_cursor: usize,
    pub adding: Option<AddInput>,
}

fn text_input(placeholder: &str) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_text(placeholder);
    textarea
}

/// Full text of a textarea, lines joined with newlines
pub fn textarea_text(textarea: &TextArea) -> String {
    textarea.lines().join("\n")
}

impl DialogView {
    pub fn new(tool: Tool, coordinator: SuggestionCoordinator) -> Self {
        Self {
            tool,
            coordinator,
            topic: text_input("e.g. Photosynthesis"),
            notes: text_input("Anything else the plan should consider"),
            document: text_input("Path to a reference document (optional)"),
            focus: DialogFocus::Topic,
            outcomes_cursor: 0,
            tags_cursor: 0,
            adding: None,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn cursor(&self, category: Category) -> usize {
        match category {
            Category::LearningOutcomes => self.outcomes_cursor,
            Category::DisambiguationTags => self.tags_cursor,
        }
    }

    fn cursor_mut(&mut self, category: Category) -> &mut usize {
        match category {
            Category::LearningOutcomes => &mut self.outcomes_cursor,
            Category::DisambiguationTags => &mut self.tags_cursor,
        }
    }

    /// Keep both cursors inside their lists after the lists change
    pub fn clamp_cursors(&mut self) {
        for category in Category::ALL {
            let len = self.coordinator.state(category).list.len();
            let cursor = self.cursor_mut(category);
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
    }

    pub fn move_cursor(&mut self, category: Category, delta: isize) {
        let len = self.coordinator.state(category).list.len();
        if len == 0 {
            return;
        }
        let cursor = self.cursor_mut(category);
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    pub fn move_cursor_to_end(&mut self, category: Category) {
        let len = self.coordinator.state(category).list.len();
        *self.cursor_mut(category) = len.saturating_sub(1);
    }

    /// Name of the item under the cursor
    pub fn name_at_cursor(&self, category: Category) -> Option<String> {
        self.coordinator
            .state(category)
            .list
            .items()
            .get(self.cursor(category))
            .map(|item| item.name.clone())
    }

    pub fn toggle_at_cursor(&mut self, category: Category) {
        if let Some(name) = self.name_at_cursor(category) {
            self.coordinator.toggle(category, &name);
        }
    }

    pub fn remove_at_cursor(&mut self, category: Category) {
        if let Some(name) = self.name_at_cursor(category) {
            self.coordinator.remove(category, &name);
            self.clamp_cursors();
        }
    }

    pub fn clear_all(&mut self, category: Category) {
        self.coordinator.clear_all(category);
        *self.cursor_mut(category) = 0;
    }

    pub fn start_adding(&mut self, category: Category) {
        let placeholder = match category {
            Category::LearningOutcomes => "New learning outcome",
            Category::DisambiguationTags => "New tag",
        };
        self.adding = Some(AddInput {
            category,
            textarea: text_input(placeholder),
        });
    }

    /// Add the typed item and leave add mode. Blank input adds nothing.
    pub fn commit_add(&mut self) {
        let Some(input) = self.adding.take() else {
            return;
        };
        if self
            .coordinator
            .add_manual(input.category, input.text())
            .is_some()
        {
            self.move_cursor_to_end(input.category);
        }
    }

    pub fn cancel_add(&mut self) {
        self.adding = None;
    }

    pub fn topic_text(&self) -> String {
        textarea_text(&self.topic)
    }
}
