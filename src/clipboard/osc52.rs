use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::io::{self, Write};

use super::backend::ClipboardError;

pub fn copy(text: &str) -> Result<(), ClipboardError> {
    write_sequence(&mut io::stdout(), text)
}

/// Write the OSC 52 sequence for `text` and flush
pub fn write_sequence<W: Write>(out: &mut W, text: &str) -> Result<(), ClipboardError> {
    out.write_all(encode_osc52(text).as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| ClipboardError::WriteError(e.to_string()))
}

pub fn encode_osc52(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
