//! Reusable TUI widgets.

pub mod form;
pub mod notification;
pub mod status_bar;

pub use form::{FieldKind, Form, FormField, draw_form};
pub use notification::{Notification, Severity, centered, draw_notification};
pub use status_bar::{ANONYMOUS, StatusBarContext, draw_status_bar};

#[cfg(test)]
pub(crate) fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let mut s = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
        }
        s.push('\n');
    }
    s
}
