use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};

use super::state::{NotificationLevel, NotificationState};

/// Render the current message, if any, into a one-line footer area
pub fn render_notification(frame: &mut Frame, area: Rect, state: &NotificationState) {
    let Some(notification) = state.current() else {
        return;
    };

    let style = match notification.level {
        NotificationLevel::Info => Style::default().fg(Color::Green),
        NotificationLevel::Error => Style::default().fg(Color::Red),
    };

    frame.render_widget(
        Paragraph::new(Line::styled(notification.message.clone(), style)),
        area,
    );
}
