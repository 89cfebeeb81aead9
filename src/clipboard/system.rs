//! System clipboard backend via arboard

use arboard::Clipboard;

use super::backend::ClipboardError;

pub fn copy(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(|_| ClipboardError::SystemUnavailable)?;

    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::WriteError(e.to_string()))
}
