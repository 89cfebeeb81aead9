//! Wrapped chip list for suggestion items
//!
//! Chips flow left to right and wrap at the available width. Widths are
//! measured in terminal cells so wide characters do not overflow a line.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::suggestions::SuggestionItem;

const CHIP_GAP: &str = " ";

/// Lines to render plus the line holding the cursor chip
#[derive(Debug, Default)]
pub struct ChipLayout {
    pub lines: Vec<Line<'static>>,
    pub cursor_line: Option<usize>,
}

pub fn chip_label(item: &SuggestionItem) -> String {
    if item.selected {
        format!(" ✓ {} ", item.name)
    } else {
        format!(" {} ", item.name)
    }
}

fn chip_style(item: &SuggestionItem, is_cursor: bool) -> Style {
    let style = if item.selected {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    };

    if is_cursor {
        style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        style
    }
}

/// Lay out `items` as chips wrapped to `width` cells
pub fn layout_chips(items: &[SuggestionItem], cursor: Option<usize>, width: u16) -> ChipLayout {
    let width = width.max(1) as usize;
    let mut layout = ChipLayout::default();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut line_width = 0;

    for (index, item) in items.iter().enumerate() {
        let label = chip_label(item);
        let chip_width = label.width();

        let needed = if spans.is_empty() {
            chip_width
        } else {
            chip_width + CHIP_GAP.len()
        };
        if !spans.is_empty() && line_width + needed > width {
            layout.lines.push(Line::from(std::mem::take(&mut spans)));
            line_width = 0;
        }

        if !spans.is_empty() {
            spans.push(Span::raw(CHIP_GAP));
            line_width += CHIP_GAP.len();
        }

        let is_cursor = cursor == Some(index);
        if is_cursor {
            layout.cursor_line = Some(layout.lines.len());
        }
        spans.push(Span::styled(label, chip_style(item, is_cursor)));
        line_width += chip_width;
    }

    if !spans.is_empty() {
        layout.lines.push(Line::from(spans));
    }
    layout
}

/// First line to show so the cursor line stays within `height` rows
pub fn scroll_offset(cursor_line: Option<usize>, height: u16) -> u16 {
    match cursor_line {
        Some(line) if height > 0 => line.saturating_sub(height as usize - 1) as u16,
        _ => 0,
    }
}
