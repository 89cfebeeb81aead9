use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::api::LessonPlanClient;
use crate::config::Config;
use crate::lesson::Tool;
use crate::notification::NotificationState;
use crate::suggestions::SuggestionCoordinator;
use crate::worker;

use super::dialog::DialogView;
use super::picker::ToolPicker;
use super::plan::PlanView;

/// Longest the event loop waits for input before polling the worker
pub const TICK_RATE: Duration = Duration::from_millis(50);

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Picker,
    Dialog,
    Plan,
}

/// Application state
pub struct App {
    pub screen: Screen,
    pub picker: ToolPicker,
    pub dialog: Option<DialogView>,
    pub plan: Option<PlanView>,
    pub notification: NotificationState,
    pub config: Config,
    /// Directory saved plans are written to
    pub save_dir: PathBuf,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, config_warning: Option<String>) -> Self {
        let mut notification = NotificationState::new();
        if let Some(warning) = config_warning {
            notification.show_error(warning, Instant::now());
        }

        let save_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            screen: Screen::Picker,
            picker: ToolPicker::new(),
            dialog: None,
            plan: None,
            notification,
            config,
            save_dir,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Open the input dialog for `tool` with its own request worker
    pub fn open_dialog(&mut self, tool: Tool) {
        if let Some(mut previous) = self.dialog.take() {
            previous.coordinator.close();
        }

        let mut coordinator =
            SuggestionCoordinator::new(&self.config.suggestions, self.config.dialog.default_grade);
        match worker::spawn(LessonPlanClient::new(&self.config.service)) {
            Ok((request_tx, response_rx)) => coordinator.set_channels(request_tx, response_rx),
            Err(e) => {
                log::warn!("Failed to start request worker: {}", e);
                self.notification
                    .show_error("Suggestions unavailable: could not start worker", Instant::now());
            }
        }

        log::debug!("Opened {} dialog", tool.label());
        self.dialog = Some(DialogView::new(tool, coordinator));
        self.screen = Screen::Dialog;
    }

    /// Close the dialog, cancelling its timer and requests
    pub fn close_dialog(&mut self) {
        if let Some(mut dialog) = self.dialog.take() {
            dialog.coordinator.close();
        }
        self.plan = None;
        self.screen = Screen::Picker;
    }

    /// Advance timers and apply worker responses
    ///
    /// Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.notification.expire(now);

        let Some(dialog) = self.dialog.as_mut() else {
            return changed;
        };
        changed |= dialog.coordinator.tick(now);
        changed |= dialog.coordinator.poll_responses();
        dialog.clamp_cursors();

        if let Some(plan) = dialog.coordinator.take_plan() {
            let topic = dialog.coordinator.topic().trim().to_string();
            let mut view = PlanView::new(&plan, dialog.tool(), &topic);
            if let Some(request) = dialog.coordinator.last_generation_request() {
                view = view.with_request(request);
            }
            self.plan = Some(view);
            self.screen = Screen::Plan;
            self.notification.clear();
            changed = true;
        }
        changed
    }

    /// How long to wait for input before the next tick
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.dialog
            .as_ref()
            .and_then(|dialog| dialog.coordinator.poll_timeout(now))
            .map_or(TICK_RATE, |remaining| remaining.min(TICK_RATE))
    }

    /// Release the dialog's worker before exit
    pub fn shutdown(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.coordinator.close();
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
