use ratatui::{Frame, layout::Rect, widgets::Clear};

/// Rect of at most `width` x `height`, centered in `area`
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    Rect {
        x: area.x + (area.width - popup_width) / 2,
        y: area.y + (area.height - popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

/// Centered rect taking `percent` of the width, clamped to `min_width`
pub fn dialog_area(area: Rect, percent: u16, min_width: u16) -> Rect {
    let width = (area.width as u32 * percent.min(100) as u32 / 100) as u16;
    centered_popup(area, width.max(min_width), area.height.saturating_sub(2))
}

pub fn inset_rect(area: Rect, horizontal_margin: u16, vertical_margin: u16) -> Rect {
    Rect {
        x: area.x + horizontal_margin,
        y: area.y + vertical_margin,
        width: area.width.saturating_sub(horizontal_margin * 2),
        height: area.height.saturating_sub(vertical_margin * 2),
    }
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod popup_tests;
