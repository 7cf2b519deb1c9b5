//! Home screen: welcome text and the available report cards.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::theme::Palette;
use crate::tui::widgets::Notification;

/// A report the home screen offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportCard {
    pub title: &'static str,
    pub description: &'static str,
    /// Reports not built into this tool live on the legacy site.
    pub url: Option<&'static str>,
}

pub static CARDS: &[ReportCard] = &[
    ReportCard {
        title: "Rapport d'arrestation",
        description: "Procédure post-arrestation et remplissage automatique du booking process. \
                      Insérez les détails de votre suspect et recevez un résultat exact en BBCode \
                      à déposer sur l'intranet.",
        url: None,
    },
    ReportCard {
        title: "Rapport d'intervention",
        description: "Remplissez votre fiche d'intervention automatiquement et avec vos détails \
                      pré-remplis, vous n'aurez qu'à déposer votre rapport sur l'intranet par la suite.",
        url: Some("https://bbcode-v1.josefleventon.dev/bbcode/intervention"),
    },
    ReportCard {
        title: "Rapport d'utilisation de la force létale",
        description: "Déclarez facilement une utilisation de la force létale au Force Investigation \
                      Bureau en remplissant un rapport d'usage de la force létale.",
        url: Some("https://bbcode-v1.josefleventon.dev/bbcode/force-letale"),
    },
];

const WELCOME: &str = "Bienvenue sur le générateur de BBCode, l'outil de choix des officiers du \
                       Blount County Metropolitan Police Department pour remplir leurs rapports \
                       d'arrestation, d'intervention et bien plus!";

/// State for the home screen.
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    selected: usize,
}

impl HomeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the highlighted card.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                if self.selected + 1 < CARDS.len() {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('p') => Action::Navigate(Screen::Profile),
            KeyCode::Char('t') => Action::ToggleTheme,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }

    fn open_selected(&self) -> Action {
        match CARDS.get(self.selected) {
            Some(ReportCard { url: None, .. }) => Action::Navigate(Screen::ArrestForm),
            Some(ReportCard {
                title,
                url: Some(url),
                ..
            }) => Action::Notify(Notification::warn(
                *title,
                format!("Ce rapport est disponible sur l'ancienne version : {url}"),
            )),
            None => Action::None,
        }
    }
}

/// Renders the home screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_home(state: &HomeState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Générateur de BBCode ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(2), Constraint::Length(3)];
    constraints.extend(CARDS.iter().map(|_| Constraint::Length(6)));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));
    let rows = Layout::vertical(constraints).split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        "Bienvenue!",
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, rows[0]);

    let welcome = Paragraph::new(WELCOME)
        .style(Style::default().fg(palette.muted))
        .wrap(Wrap { trim: true });
    frame.render_widget(welcome, rows[1]);

    for (i, card) in CARDS.iter().enumerate() {
        let border = if i == state.selected() {
            palette.focus
        } else {
            palette.muted
        };
        let mut lines = vec![Line::from(Span::styled(
            card.description,
            Style::default().fg(palette.text),
        ))];
        if let Some(url) = card.url {
            lines.push(Line::from(Span::styled(
                url,
                Style::default().fg(palette.accent),
            )));
        }
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(format!(" {} ", card.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(paragraph, rows[2 + i]);
    }

    let footer = Paragraph::new(Line::from(
        "↑/↓: choisir  Entrée: ouvrir  p: profil  t: thème  q: quitter",
    ))
    .style(Style::default().fg(palette.muted));
    frame.render_widget(footer, rows[rows.len() - 1]);
}
