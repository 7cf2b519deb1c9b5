//! Profile modal: edits the officer profile that signs every report.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::{District, OfficerProfile, Rank};
use crate::storage::StoredProfile;
use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::theme::Palette;
use crate::tui::widgets::form::{Form, FormField, draw_form};
use crate::tui::widgets::{Notification, centered};

const NAME: usize = 0;
const RANK: usize = 1;
const DISTRICT: usize = 2;

/// Title of the notification shown when a profile cannot be saved.
pub const MISSING_TITLE: &str = "Informations manquantes";
const MISSING_DESCRIPTION: &str = "Il semblerait que certaines informations manquent à votre \
    profil. Veuillez réessayer de modifier votre profil pour appliquer les modifications.";

/// State for the profile modal.
#[derive(Debug, Clone)]
pub struct ProfileEditState {
    form: Form,
    origin: Screen,
}

impl Default for ProfileEditState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileEditState {
    /// Creates an empty modal that returns to [`Screen::Home`].
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                FormField::new("Nom", true),
                FormField::choice("Grade", Rank::all().iter().map(Rank::label).collect(), true),
                FormField::choice(
                    "District",
                    District::all().iter().map(District::label).collect(),
                    true,
                ),
            ]),
            origin: Screen::Home,
        }
    }

    /// Fills the form from the stored profile, or clears it when there is none.
    pub fn load(&mut self, stored: Option<&StoredProfile>) {
        self.form.reset();
        if let Some(stored) = stored {
            self.form.set_value(NAME, stored.name.clone());
            if let Some(rank) = stored.rank {
                self.form.set_value(RANK, rank.label());
            }
            if let Some(district) = stored.district {
                self.form.set_value(DISTRICT, district.label());
            }
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Returns the screen drawn under the modal.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Sets the screen to return to when the modal closes.
    pub fn set_origin(&mut self, screen: Screen) {
        self.origin = screen;
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('d') => Action::DeleteProfile,
                KeyCode::Char('s') => self.save(),
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Esc => return Action::Navigate(self.origin),
            KeyCode::Enter => return self.save(),
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Left => self.form.cycle_choice(false),
            KeyCode::Right => self.form.cycle_choice(true),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Char(ch) => self.form.insert_char(ch),
            _ => {}
        }
        Action::None
    }

    /// Returns a save action when every field is set, an error otherwise.
    fn save(&mut self) -> Action {
        self.form.clear_errors();
        let name = self.form.value(NAME).trim().to_string();
        let rank = Rank::from_label(self.form.value(RANK));
        let district = District::from_label(self.form.value(DISTRICT));

        if name.is_empty() {
            self.form.set_error(NAME, "Champ requis".into());
        }
        if rank.is_none() {
            self.form.set_error(RANK, "Champ requis".into());
        }
        if district.is_none() {
            self.form.set_error(DISTRICT, "Champ requis".into());
        }

        match (rank, district) {
            (Some(rank), Some(district)) if !name.is_empty() => {
                Action::SaveProfile(OfficerProfile::new(name, rank, district))
            }
            _ => Action::Notify(Notification::error(MISSING_TITLE, MISSING_DESCRIPTION)),
        }
    }
}

/// Renders the profile modal centered over `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_profile_edit(state: &ProfileEditState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let modal = centered(area, 60, 14);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .title(" Modifier mon profil ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.background));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let [form_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    draw_form(&state.form, true, palette, frame, form_area);

    let footer = Paragraph::new(Line::from(
        "Entrée: Sauvegarder  Ctrl+D: Supprimer  Échap: Annuler",
    ))
    .style(Style::default().fg(palette.muted));
    frame.render_widget(footer, footer_area);
}
