use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tui_textarea::Input;

use crate::app::dialog::{DialogFocus, DialogView, textarea_text};
use crate::app::state::App;
use crate::error::PlannerError;
use crate::lesson::GradeLevel;
use crate::suggestions::Category;

/// What the dialog asks the app to do after a key
enum DialogAction {
    None,
    Close,
    Submit,
}

pub fn handle_dialog_key(app: &mut App, key: KeyEvent, now: Instant) {
    let Some(dialog) = app.dialog.as_mut() else {
        return;
    };

    match handle_key(dialog, key, now) {
        DialogAction::None => {}
        DialogAction::Close => app.close_dialog(),
        DialogAction::Submit => submit(app, now),
    }
}

fn handle_key(dialog: &mut DialogView, key: KeyEvent, now: Instant) -> DialogAction {
    // The add popup takes every key while open
    if dialog.adding.is_some() {
        handle_add_key(dialog, key);
        return DialogAction::None;
    }

    match key.code {
        KeyCode::Esc => return DialogAction::Close,
        KeyCode::Tab => {
            dialog.focus = dialog.focus.next();
            return DialogAction::None;
        }
        KeyCode::BackTab => {
            dialog.focus = dialog.focus.previous();
            return DialogAction::None;
        }
        KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return DialogAction::Submit;
        }
        _ => {}
    }

    match dialog.focus {
        DialogFocus::Topic => {
            if key.code != KeyCode::Enter && dialog.topic.input(Input::from(key)) {
                let topic = dialog.topic_text();
                dialog.coordinator.set_topic(&topic, now);
            }
        }
        DialogFocus::Grade => handle_grade_key(dialog, key, now),
        DialogFocus::Outcomes => handle_chip_key(dialog, Category::LearningOutcomes, key),
        DialogFocus::Tags => handle_chip_key(dialog, Category::DisambiguationTags, key),
        DialogFocus::Notes => {
            if dialog.notes.input(Input::from(key)) {
                let notes = textarea_text(&dialog.notes);
                dialog.coordinator.set_notes(&notes);
            }
        }
        DialogFocus::Document => {
            if key.code != KeyCode::Enter && dialog.document.input(Input::from(key)) {
                let path = textarea_text(&dialog.document);
                if path.trim().is_empty() {
                    dialog.coordinator.detach_document();
                } else {
                    dialog.coordinator.attach_document(&path);
                }
            }
        }
    }
    DialogAction::None
}

fn handle_grade_key(dialog: &mut DialogView, key: KeyEvent, now: Instant) {
    let current = dialog.coordinator.grade();
    let grade = match key.code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => GradeLevel::cycle_next(current),
        KeyCode::Left | KeyCode::Char('h') => GradeLevel::cycle_previous(current),
        KeyCode::Backspace | KeyCode::Delete => None,
        _ => return,
    };
    dialog.coordinator.set_grade(grade, now);
}

fn handle_chip_key(dialog: &mut DialogView, category: Category, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Up | KeyCode::Char('k') => dialog.move_cursor(category, -1),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('j') => dialog.move_cursor(category, 1),
        KeyCode::Home => dialog.move_cursor(category, isize::MIN),
        KeyCode::End => dialog.move_cursor_to_end(category),
        KeyCode::Char(' ') | KeyCode::Enter => dialog.toggle_at_cursor(category),
        KeyCode::Char('a') => dialog.start_adding(category),
        KeyCode::Char('d') | KeyCode::Delete => dialog.remove_at_cursor(category),
        KeyCode::Char('c') => dialog.clear_all(category),
        KeyCode::Char('r') => {
            dialog.coordinator.refresh();
        }
        _ => {}
    }
}

fn handle_add_key(dialog: &mut DialogView, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => dialog.cancel_add(),
        KeyCode::Enter => dialog.commit_add(),
        _ => {
            if let Some(input) = dialog.adding.as_mut() {
                input.textarea.input(Input::from(key));
            }
        }
    }
}

fn submit(app: &mut App, now: Instant) {
    let Some(dialog) = app.dialog.as_mut() else {
        return;
    };

    match dialog.coordinator.submit() {
        Ok(request_id) => {
            log::debug!("Submitted lesson plan request {}", request_id);
            app.notification.show("Generating lesson plan...", now);
        }
        Err(PlannerError::Validation(message)) => app.notification.show_error(message, now),
        Err(e) => app.notification.show_error(e.to_string(), now),
    }
}
