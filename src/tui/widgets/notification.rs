//! Blocking notification modal.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warn,
    Error,
}

/// A message shown over the current screen until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn new(severity: Severity, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            description,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, Some(description.into()))
    }

    pub fn warn(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Severity::Warn, title, Some(description.into()))
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, Some(description.into()))
    }
}

fn severity_color(severity: Severity, palette: &Palette) -> ratatui::style::Color {
    match severity {
        Severity::Success => palette.success,
        Severity::Warn => palette.warn,
        Severity::Error => palette.error,
    }
}

/// Returns a rectangle of the given size centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Renders the notification as a centered modal.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_notification(
    notification: &Notification,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
) {
    let color = severity_color(notification.severity, palette);
    let popup = centered(area, area.width.min(60), area.height.min(9));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {} ", notification.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(palette.background));

    let mut lines = vec![Line::from("")];
    if let Some(description) = &notification.description {
        lines.push(Line::from(Span::styled(
            description.as_str(),
            Style::default().fg(palette.text),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Entrée/Échap : fermer",
        Style::default().fg(palette.muted),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, popup);
}
