//! Status bar widget: one line with the active profile and session state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::theme::{Palette, Theme};

/// Shown instead of a name when no profile is stored.
pub const ANONYMOUS: &str = "Anonyme";

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Name of the stored profile, if any.
    pub profile_name: Option<String>,
    /// Whether the stored profile can sign a report.
    pub profile_complete: bool,
    /// Whether a submission is in flight.
    pub pending: bool,
    pub theme: Theme,
}

impl StatusBarContext {
    /// The profile name, or [`ANONYMOUS`].
    pub fn display_name(&self) -> &str {
        match self.profile_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => ANONYMOUS,
        }
    }
}

/// Renders a one-line status bar.
///
/// Format: `Jack Reacher  profil incomplet  Envoi en cours…  thème Sombre`
/// with the middle parts only when they apply.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, palette: &Palette, frame: &mut Frame, area: Rect) {
    let accent = Style::default().fg(palette.accent);
    let muted = Style::default().fg(palette.muted);

    let mut spans = vec![Span::styled(ctx.display_name().to_string(), accent)];
    if ctx.profile_name.is_some() && !ctx.profile_complete {
        spans.push(Span::styled("  profil incomplet", Style::default().fg(palette.warn)));
    }
    if ctx.pending {
        spans.push(Span::styled("  Envoi en cours…", Style::default().fg(palette.focus)));
    }
    spans.push(Span::styled(format!("  thème {}", ctx.theme.label()), muted));
    spans.push(Span::styled("  F1 aide  F2 profil  F3 thème", muted));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
