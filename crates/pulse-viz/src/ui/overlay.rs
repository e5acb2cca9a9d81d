//! Status text in the corner and the idle start prompt.

use nannou::prelude::*;

const PADDING: f32 = 20.0;
const LINE_HEIGHT: f32 = 20.0;
const FONT_SIZE: u32 = 14;
const TEXT_WIDTH: f32 = 320.0;

pub fn status_lines(mode_name: &str, scheme_name: &str) -> [String; 3] {
    [
        format!("MODE: {} (1-6)", mode_name),
        format!("COLOR: {} (C)", scheme_name),
        "[SPACE] Next Mode".to_string(),
    ]
}

pub fn idle_lines(start_error: Option<&str>) -> Vec<String> {
    let mut lines = vec!["Click or press Enter to start".to_string()];
    if let Some(err) = start_error {
        lines.push(format!("Audio failed: {}", err));
        lines.push("Click to retry".to_string());
    }
    lines
}

/// Top-left status block
pub fn draw_status(draw: &Draw, bounds: Rect, mode_name: &str, scheme_name: &str) {
    let left = bounds.left() + PADDING + TEXT_WIDTH / 2.0;
    let top = bounds.top() - PADDING - LINE_HEIGHT / 2.0;

    for (i, line) in status_lines(mode_name, scheme_name).iter().enumerate() {
        draw.text(line)
            .xy(pt2(left, top - i as f32 * LINE_HEIGHT))
            .wh(pt2(TEXT_WIDTH, LINE_HEIGHT))
            .left_justify()
            .color(rgba(1.0, 1.0, 1.0, 0.8))
            .font_size(FONT_SIZE);
    }
}

/// Centered prompt shown until the engine runs
pub fn draw_idle(draw: &Draw, bounds: Rect, start_error: Option<&str>) {
    let lines = idle_lines(start_error);
    let start_y = bounds.y() + (lines.len() as f32 - 1.0) * LINE_HEIGHT * 0.75;

    for (i, line) in lines.iter().enumerate() {
        let color = if i == 0 {
            rgba(1.0, 1.0, 1.0, 1.0)
        } else {
            rgba(1.0, 0.4, 0.4, 0.9)
        };
        draw.text(line)
            .xy(pt2(bounds.x(), start_y - i as f32 * LINE_HEIGHT * 1.5))
            .wh(pt2(bounds.w(), LINE_HEIGHT * 1.5))
            .center_justify()
            .color(color)
            .font_size(FONT_SIZE + 6);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        let lines = status_lines("Galaxy", "Vapor");
        assert_eq!(lines[0], "MODE: Galaxy (1-6)");
        assert_eq!(lines[1], "COLOR: Vapor (C)");
        assert_eq!(lines[2], "[SPACE] Next Mode");
    }

    #[test]
    fn test_idle_prompt_reports_error() {
        assert_eq!(idle_lines(None).len(), 1);
        let lines = idle_lines(Some("No audio devices found"));
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("No audio devices found"));
    }
}
