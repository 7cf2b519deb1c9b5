//! Help screen: scrollable keybinding reference.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::theme::Palette;

static GLOBAL_KEYS: &[(&str, &str)] = &[
    ("F1", "aide"),
    ("F2", "modifier mon profil"),
    ("F3", "basculer le thème clair / sombre"),
    ("Ctrl+C", "quitter"),
];

static HOME_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "choisir un rapport"),
    ("Entrée", "ouvrir le rapport"),
    ("p", "modifier mon profil"),
    ("t", "changer de thème"),
    ("q / Échap", "quitter"),
];

static ARREST_FORM_KEYS: &[(&str, &str)] = &[
    ("Tab / Maj+Tab", "champ suivant / précédent"),
    ("←/→", "changer de choix"),
    ("Espace", "cocher un permis ou une licence"),
    ("Entrée", "générer le rapport (nouvelle ligne dans la description)"),
    ("Ctrl+S", "générer le rapport"),
    ("Ctrl+E", "exporter le rapport généré"),
    ("Ctrl+R", "vider le formulaire"),
    ("PgPrec / PgSuiv", "faire défiler le résultat"),
    ("Échap", "retour à l'accueil"),
];

static PROFILE_KEYS: &[(&str, &str)] = &[
    ("Tab / Maj+Tab", "champ suivant / précédent"),
    ("←/→", "changer de grade ou de district"),
    ("Entrée / Ctrl+S", "sauvegarder"),
    ("Ctrl+D", "supprimer le profil"),
    ("Échap", "annuler"),
];

static HELP_KEYS: &[(&str, &str)] = &[("↑/↓", "défiler"), ("q / Échap", "retour")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Creates a new [`HelpState`] with scroll position at the top and origin [`Screen::Home`].
    pub fn new() -> Self {
        Self {
            scroll: 0,
            origin: Screen::Home,
        }
    }

    /// Returns the current scroll offset.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Returns the origin screen that opened help.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Sets the origin screen to return to when help is dismissed.
    pub fn set_origin(&mut self, screen: Screen) {
        self.origin = screen;
    }

    /// Resets the scroll position to the top.
    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(self.origin),
            _ => Action::None,
        }
    }
}

fn screen_name(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => "Accueil",
        Screen::ArrestForm => "Rapport d'arrestation",
        Screen::Profile => "Profil",
        Screen::Help => "Aide",
    }
}

fn build_section(
    title: &'static str,
    keys: &[(&'static str, &'static str)],
    palette: &Palette,
) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(palette.warn);
    let dim_style = Style::default().fg(palette.muted);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<20}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn help_content(origin: Screen, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = match origin {
        Screen::Home => build_section("Accueil", HOME_KEYS, palette),
        Screen::ArrestForm => build_section("Rapport d'arrestation", ARREST_FORM_KEYS, palette),
        Screen::Profile => build_section("Profil", PROFILE_KEYS, palette),
        Screen::Help => build_section("Aide", HELP_KEYS, palette),
    };
    lines.extend(build_section("Partout", GLOBAL_KEYS, palette));
    lines
}

/// Renders the help screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_help(state: &HelpState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let title = format!(" Aide – {} ", screen_name(state.origin()));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content_lines = help_content(state.origin(), palette);
    let total = u16::try_from(content_lines.len()).unwrap_or(u16::MAX);
    let height = content_area.height;
    let capped_scroll = state.scroll().min(total.saturating_sub(height));

    let paragraph = Paragraph::new(content_lines).scroll((capped_scroll, 0));
    frame.render_widget(paragraph, content_area);

    let footer =
        Paragraph::new("↑/↓: défiler  q/Échap: retour").style(Style::default().fg(palette.muted));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;
    use crate::tui::theme::Theme;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    mod construction {
        use super::*;

        #[test]
        fn new_starts_at_top_from_home() {
            let state = HelpState::new();
            assert_eq!(state.scroll(), 0);
            assert_eq!(state.origin(), Screen::Home);
        }

        #[test]
        fn set_origin_stores_screen() {
            let mut state = HelpState::default();
            state.set_origin(Screen::ArrestForm);
            assert_eq!(state.origin(), Screen::ArrestForm);
        }
    }

    mod handle_key {
        use super::*;

        #[test]
        fn up_decrements_scroll() {
            let mut state = HelpState::new();
            state.scroll = 5;
            assert_eq!(state.handle_key(press(KeyCode::Up)), Action::None);
            assert_eq!(state.scroll(), 4);
        }

        #[test]
        fn up_at_zero_saturates() {
            let mut state = HelpState::new();
            state.handle_key(press(KeyCode::Up));
            assert_eq!(state.scroll(), 0);
        }

        #[test]
        fn down_increments_scroll() {
            let mut state = HelpState::new();
            state.handle_key(press(KeyCode::Down));
            assert_eq!(state.scroll(), 1);
        }

        #[test]
        fn q_and_esc_navigate_to_origin() {
            let mut state = HelpState::new();
            state.set_origin(Screen::ArrestForm);
            assert_eq!(
                state.handle_key(press(KeyCode::Char('q'))),
                Action::Navigate(Screen::ArrestForm)
            );
            assert_eq!(
                state.handle_key(press(KeyCode::Esc)),
                Action::Navigate(Screen::ArrestForm)
            );
        }

        #[test]
        fn unknown_key_returns_none() {
            let mut state = HelpState::new();
            assert_eq!(state.handle_key(press(KeyCode::Char('x'))), Action::None);
            assert_eq!(state.scroll(), 0);
        }

        #[test]
        fn reset_sets_scroll_to_zero() {
            let mut state = HelpState::new();
            state.handle_key(press(KeyCode::Down));
            state.handle_key(press(KeyCode::Down));
            state.reset();
            assert_eq!(state.scroll(), 0);
        }
    }

    mod help_content_fn {
        use super::*;

        fn content_text(screen: Screen) -> String {
            help_content(screen, &Theme::Dark.palette())
                .into_iter()
                .flat_map(|l| l.spans.into_iter())
                .map(|s| s.content.into_owned())
                .collect()
        }

        #[test]
        fn every_screen_lists_global_keys() {
            for screen in [Screen::Home, Screen::ArrestForm, Screen::Profile, Screen::Help] {
                let text = content_text(screen);
                assert!(text.contains("Partout"), "{screen:?} should list global keys");
                assert!(text.contains("F2"));
            }
        }

        #[test]
        fn arrest_form_content_excludes_profile_section() {
            let text = content_text(Screen::ArrestForm);
            assert!(text.contains("Ctrl+E"));
            assert!(!text.contains("supprimer le profil"));
        }

        #[test]
        fn screen_names_are_french() {
            assert_eq!(screen_name(Screen::Home), "Accueil");
            assert_eq!(screen_name(Screen::ArrestForm), "Rapport d'arrestation");
            assert_eq!(screen_name(Screen::Profile), "Profil");
            assert_eq!(screen_name(Screen::Help), "Aide");
        }
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;
        use crate::tui::widgets::buffer_to_string;

        fn render_help(state: &HelpState) -> String {
            let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
            terminal
                .draw(|frame| draw_help(state, &Theme::Light.palette(), frame, frame.area()))
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn title_includes_origin_screen_name() {
            let mut state = HelpState::new();
            state.set_origin(Screen::Profile);
            let output = render_help(&state);
            assert!(output.contains("Aide"));
            assert!(output.contains("Profil"));
        }

        #[test]
        fn shows_origin_keys() {
            let mut state = HelpState::new();
            state.set_origin(Screen::ArrestForm);
            let output = render_help(&state);
            assert!(output.contains("exporter le rapport"));
        }

        #[test]
        fn footer_mentions_back_keys() {
            let output = render_help(&HelpState::new());
            assert!(output.contains("q/Échap: retour"));
        }
    }
}
