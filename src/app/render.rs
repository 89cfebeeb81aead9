use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tui_textarea::TextArea;

use crate::notification::render_notification;
use crate::suggestions::{Category, FetchStatus, GenerationStatus};
use crate::widgets::chips::{layout_chips, scroll_offset};
use crate::widgets::popup::{centered_popup, clear_area, dialog_area, inset_rect};

use super::dialog::{DialogFocus, DialogView};
use super::state::{App, Screen};

const PICKER_WIDTH: u16 = 50;
const DIALOG_WIDTH_PERCENT: u16 = 80;
const DIALOG_MIN_WIDTH: u16 = 50;

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn hint(text: &str) -> Paragraph<'_> {
    Paragraph::new(Line::styled(text, Style::default().fg(Color::DarkGray)))
}

fn set_input_block(textarea: &mut TextArea<'static>, title: &str, focused: bool) {
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .border_style(border_style(focused)),
    );
    // Hide the cursor unless the field has focus
    let cursor = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    textarea.set_cursor_style(cursor);
}

impl App {
    /// Render the current screen
    pub fn render(&mut self, frame: &mut Frame) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());

        match self.screen {
            Screen::Picker => self.render_picker(frame, body),
            Screen::Dialog => self.render_dialog(frame, body),
            Screen::Plan => self.render_plan(frame, body),
        }

        render_notification(frame, footer, &self.notification);
    }

    fn render_picker(&mut self, frame: &mut Frame, area: Rect) {
        let height = self.picker.matches().len() as u16 + 7;
        let popup = centered_popup(area, PICKER_WIDTH, height);
        clear_area(frame, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Lesson Planner ")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let [search_area, list_area, hint_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        set_input_block(self.picker.search_textarea_mut(), "Search", true);
        frame.render_widget(&*self.picker.search_textarea_mut(), search_area);

        if self.picker.matches().is_empty() {
            frame.render_widget(hint("No matching tools"), list_area);
        } else {
            let items: Vec<ListItem> = self
                .picker
                .matches()
                .iter()
                .map(|tool| ListItem::new(tool.label()))
                .collect();
            let list = List::new(items)
                .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
                .highlight_symbol("> ");
            let mut state = ListState::default().with_selected(Some(self.picker.selected_index()));
            frame.render_stateful_widget(list, list_area, &mut state);
        }

        frame.render_widget(hint("↑↓ select • Enter open • Esc quit"), hint_area);
    }

    fn render_dialog(&mut self, frame: &mut Frame, area: Rect) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };

        let popup = dialog_area(area, DIALOG_WIDTH_PERCENT, DIALOG_MIN_WIDTH);
        clear_area(frame, popup);
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", dialog.tool().dialog_title()))
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::Cyan));
        if dialog.coordinator.is_busy() {
            block = block.title_bottom(
                Line::styled(" Waiting for service... ", Style::default().fg(Color::Yellow))
                    .right_aligned(),
            );
        }
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let [
            topic_area,
            grade_area,
            outcomes_area,
            tags_area,
            notes_area,
            document_area,
            status_area,
            hint_area,
        ] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Min(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let focus = dialog.focus;
        set_input_block(&mut dialog.topic, "Topic *", focus == DialogFocus::Topic);
        frame.render_widget(&dialog.topic, topic_area);

        render_grade(frame, grade_area, dialog);
        render_chip_list(frame, outcomes_area, dialog, Category::LearningOutcomes);
        render_chip_list(frame, tags_area, dialog, Category::DisambiguationTags);

        set_input_block(&mut dialog.notes, "Notes", focus == DialogFocus::Notes);
        frame.render_widget(&dialog.notes, notes_area);
        set_input_block(
            &mut dialog.document,
            "Upload Document",
            focus == DialogFocus::Document,
        );
        frame.render_widget(&dialog.document, document_area);

        render_generation_status(frame, status_area, dialog.coordinator.generation());
        frame.render_widget(hint(dialog_hint(focus)), hint_area);

        if let Some(input) = dialog.adding.as_mut() {
            let popup = centered_popup(popup, 50, 3);
            clear_area(frame, popup);
            let title = match input.category {
                Category::LearningOutcomes => "Add learning outcome",
                Category::DisambiguationTags => "Add tag",
            };
            set_input_block(&mut input.textarea, title, true);
            frame.render_widget(&input.textarea, popup);
        }
    }

    fn render_plan(&mut self, frame: &mut Frame, area: Rect) {
        let Some(plan) = self.plan.as_mut() else {
            return;
        };

        let context = plan.context_line();
        let [context_area, editor_area, hint_area] = Layout::vertical([
            Constraint::Length(context.is_some() as u16),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);
        if let Some(context) = context {
            frame.render_widget(hint(&context), context_area);
        }

        let title = if plan.topic().is_empty() {
            format!(" Document Editor: {} ", plan.tool().label())
        } else {
            format!(" Document Editor: {} ", plan.topic())
        };
        plan.editor.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(&plan.editor, editor_area);
        frame.render_widget(
            hint("Ctrl+Y copy • Ctrl+S save • Esc back to dialog"),
            hint_area,
        );
    }
}

fn render_grade(frame: &mut Frame, area: Rect, dialog: &DialogView) {
    let focused = dialog.focus == DialogFocus::Grade;
    let label = match dialog.coordinator.grade() {
        Some(grade) => Span::raw(grade.label()),
        None => Span::styled("Select a grade", Style::default().fg(Color::DarkGray)),
    };
    let line = Line::from(vec![Span::raw("◀ "), label, Span::raw(" ▶")]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Grade Level * ")
        .border_style(border_style(focused));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_chip_list(frame: &mut Frame, area: Rect, dialog: &DialogView, category: Category) {
    let state = dialog.coordinator.state(category);
    let focused = dialog.focus.category() == Some(category);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", category.heading()))
        .border_style(border_style(focused));
    match state.status() {
        FetchStatus::Loading => {
            block = block.title_bottom(Line::styled(
                format!(" Loading {}... ", category.label()),
                Style::default().fg(Color::Yellow),
            ));
        }
        FetchStatus::Failed(message) => {
            block = block.title_bottom(Line::styled(
                format!(" {} ", message),
                Style::default().fg(Color::Red),
            ));
        }
        FetchStatus::Idle | FetchStatus::Ready => {}
    }

    let inner = inset_rect(area, 1, 1);
    let content = if state.list.is_empty() {
        let text = match state.status() {
            FetchStatus::Loading => "",
            _ if dialog.coordinator.fetch_params().is_none() => {
                "Enter a topic and grade to see suggestions"
            }
            _ => "No suggestions. Press a to add one.",
        };
        hint(text).block(block)
    } else {
        let cursor = focused.then(|| dialog.cursor(category));
        let layout = layout_chips(state.list.items(), cursor, inner.width);
        let offset = scroll_offset(layout.cursor_line, inner.height);
        Paragraph::new(layout.lines).block(block).scroll((offset, 0))
    };
    frame.render_widget(content, area);
}

fn render_generation_status(frame: &mut Frame, area: Rect, status: &GenerationStatus) {
    let line = match status {
        GenerationStatus::Generating => Line::styled(
            "Generating lesson plan...",
            Style::default().fg(Color::Yellow),
        ),
        GenerationStatus::Failed(message) => {
            Line::styled(message.as_str(), Style::default().fg(Color::Red))
        }
        GenerationStatus::Idle | GenerationStatus::PlanReady(_) => return,
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn dialog_hint(focus: DialogFocus) -> &'static str {
    match focus {
        DialogFocus::Outcomes | DialogFocus::Tags => {
            "Space toggle • a add • d remove • c clear • r retry • Ctrl+G generate • Esc back"
        }
        DialogFocus::Grade => "←→ change grade • Tab next • Ctrl+G generate • Esc back",
        _ => "Tab next field • Ctrl+G generate • Esc back",
    }
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
