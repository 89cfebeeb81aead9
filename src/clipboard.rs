//! Clipboard support for the plan view
//!
//! The system clipboard is used when available. Over SSH or in a headless
//! session the text is sent to the terminal as an OSC 52 sequence instead.

mod backend;
mod osc52;
mod system;

pub use backend::{ClipboardError, ClipboardResult, ClipboardTarget, copy_to_clipboard};
pub use osc52::encode_osc52;
