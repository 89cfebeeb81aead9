//! Transient status notifications
//!
//! Any screen can show a short message in the footer. Messages expire on
//! their own; errors stay up longer than confirmations.

mod render;
mod state;

pub use render::render_notification;
pub use state::{Notification, NotificationLevel, NotificationState};
