//! Row colors per task status, shared by the CLI table and the TUI.

use crate::models::TaskStatus;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

pub const LIGHT_YELLOW: Rgb = Rgb(0xFF, 0xFF, 0x99);
pub const LIGHT_BLUE: Rgb = Rgb(0xAD, 0xD8, 0xE6);
pub const LIGHT_GREEN: Rgb = Rgb(0x90, 0xEE, 0x90);
pub const LIGHT_RED: Rgb = Rgb(0xF0, 0x80, 0x80);

/// Foreground used on top of every status background.
pub const ROW_TEXT: Rgb = Rgb(0x00, 0x00, 0x00);

/// Background color of a row holding a task with `status`.
pub fn status_color(status: TaskStatus) -> Rgb {
    match status {
        TaskStatus::Pending => LIGHT_YELLOW,
        TaskStatus::InProgress => LIGHT_BLUE,
        TaskStatus::Completed => LIGHT_GREEN,
        TaskStatus::Overdue => LIGHT_RED,
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(c: Rgb) -> Self {
        ratatui::style::Color::Rgb(c.0, c.1, c.2)
    }
}

impl From<Rgb> for comfy_table::Color {
    fn from(c: Rgb) -> Self {
        comfy_table::Color::Rgb { r: c.0, g: c.1, b: c.2 }
    }
}
