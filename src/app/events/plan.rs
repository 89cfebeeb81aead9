use chrono::Local;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tui_textarea::Input;

use crate::app::plan::save_plan;
use crate::app::state::{App, Screen};
use crate::clipboard;

pub fn handle_plan_key(app: &mut App, key: KeyEvent, now: Instant) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            app.plan = None;
            app.screen = Screen::Dialog;
        }
        KeyCode::Char('y') if ctrl => copy_plan(app, now),
        KeyCode::Char('s') if ctrl => save(app, now),
        _ => {
            if let Some(plan) = app.plan.as_mut() {
                plan.editor.input(Input::from(key));
            }
        }
    }
}

fn copy_plan(app: &mut App, now: Instant) {
    let Some(plan) = app.plan.as_ref() else {
        return;
    };

    match clipboard::copy_to_clipboard(&plan.text(), app.config.clipboard.backend) {
        Ok(target) => app.notification.show(target.confirmation(), now),
        Err(e) => {
            log::warn!("Copy failed: {}", e);
            app.notification.show_error(format!("Copy failed: {}", e), now);
        }
    }
}

fn save(app: &mut App, now: Instant) {
    let Some(plan) = app.plan.as_ref() else {
        return;
    };

    match save_plan(&app.save_dir, &plan.text(), Local::now()) {
        Ok(path) => {
            log::debug!("Saved plan to {}", path.display());
            app.notification
                .show(format!("Saved {}", path.display()), now);
        }
        Err(e) => {
            log::warn!("Saving plan failed: {}", e);
            app.notification
                .show_error(format!("Save failed: {}", e), now);
        }
    }
}
