//! Arrest report screen: collects the booking details, submits them and
//! shows the generated BBCode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tui_textarea::TextArea;

use crate::model::{
    Arrest, Arrestee, Confidentiality, District, DriversLicense, GunLicense, LicenseClass,
    OfficerProfile, Rank, ReportRequest, Sex, collect_licenses, normalize_birthdate,
    parse_measure,
};
use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::theme::Palette;
use crate::tui::widgets::form::{Form, FormField, draw_form};
use crate::tui::widgets::Notification;

/// Officer form: name.
const OFFICER_NAME: usize = 0;
/// Officer form: rank choice.
const OFFICER_RANK: usize = 1;
/// Officer form: district choice.
const OFFICER_DISTRICT: usize = 2;

const LAST_NAME: usize = 0;
const FIRST_NAME: usize = 1;
const SEX: usize = 2;
const NATIONALITY: usize = 3;
const ADDRESS: usize = 4;
const PHONE: usize = 5;
const BIRTHDATE: usize = 6;
const BIRTHPLACE: usize = 7;
const HEIGHT: usize = 8;
const WEIGHT: usize = 9;
const PROFESSION: usize = 10;
const VEHICLE: usize = 11;
/// First of the three driver's license toggles (A, B, C).
const DRIVERS_A: usize = 12;
/// First of the five gun license toggles (A to E).
const GUN_A: usize = 15;
const REASON: usize = 20;
const COMMENT: usize = 21;
const CONFIDENTIALITY: usize = 22;

const REQUIRED: &str = "Champ requis";

/// Reference documents linked from the form header.
static REFERENCES: &[(&str, &str)] = &[
    (
        "Code pénal",
        "https://gtacityrp.fr/index.php?threads/rp-code-pénal-de-létat-du-tennessee.16997/",
    ),
    (
        "Code de la route",
        "https://gtacityrp.fr/index.php?threads/rp-code-de-la-route-de-létat-du-tennessee.22805/",
    ),
    (
        "Procédure pénale",
        "https://gtacityrp.fr/index.php?threads/rp-code-de-procédure-pénale-de-lÉtat-du-tennessee.19476/",
    ),
    ("Contacter un avocat", "https://discord.gg/DWwhUJ3Rnp"),
];

/// Progress of the latest submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

/// Which part of the screen receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Officer,
    Details,
    Description,
}

fn officer_form() -> Form {
    Form::new(vec![
        FormField::new("Nom de l'officier", true),
        FormField::choice(
            "Grade",
            Rank::all().iter().map(Rank::label).collect(),
            true,
        ),
        FormField::choice(
            "District",
            District::all().iter().map(District::label).collect(),
            true,
        ),
    ])
}

fn details_form() -> Form {
    let mut fields = vec![
        FormField::new("Nom", true),
        FormField::new("Prénom", true),
        FormField::choice("Sexe", Sex::all().iter().map(Sex::label).collect(), true),
        FormField::new("Nationalité", true),
        FormField::new("Adresse", false),
        FormField::new("No. de téléphone", false),
        FormField::new("Date de naissance (JJ/MM/AAAA ou AAAA-MM-JJ)", true),
        FormField::new("Lieu de naissance", true),
        FormField::new("Taille (cm)", true),
        FormField::new("Poids (kg)", true),
        FormField::new("Profession", false),
        FormField::new("Véhicule (modèle, couleur, plaque)", false),
    ];
    fields.extend(
        DriversLicense::all()
            .iter()
            .map(|l| FormField::toggle(format!("Permis {}", l.letter()))),
    );
    fields.extend(
        GunLicense::all()
            .iter()
            .map(|l| FormField::toggle(format!("Licence {}", l.letter()))),
    );
    fields.extend([
        FormField::new("Motif de l'arrestation", true),
        FormField::new("Remarque", false),
        FormField::choice(
            "Niveau de confidentialité du rapport",
            Confidentiality::all()
                .iter()
                .map(Confidentiality::label)
                .collect(),
            true,
        ),
    ]);

    let mut form = Form::new(fields);
    form.set_value(SEX, Sex::default().label());
    form.set_value(CONFIDENTIALITY, Confidentiality::default().label());
    form
}

fn description_area() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(
        "Donnez une description détaillée de l'infraction commise par le suspect",
    );
    textarea
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// State for the arrest report screen.
pub struct ArrestFormState {
    /// Present only when no complete profile can sign the report.
    officer: Option<Form>,
    profile: Option<OfficerProfile>,
    details: Form,
    description: TextArea<'static>,
    description_error: Option<String>,
    section: Section,
    submission: Submission,
    result_scroll: u16,
}

impl ArrestFormState {
    /// Creates an empty form. With a complete `profile`, the officer
    /// fields are hidden and the profile signs the report.
    pub fn new(profile: Option<OfficerProfile>) -> Self {
        let officer = profile.is_none().then(officer_form);
        let section = if officer.is_some() {
            Section::Officer
        } else {
            Section::Details
        };
        Self {
            officer,
            profile,
            details: details_form(),
            description: description_area(),
            description_error: None,
            section,
            submission: Submission::Idle,
            result_scroll: 0,
        }
    }

    /// Swaps the signing profile, keeping every typed value.
    pub fn set_profile(&mut self, profile: Option<OfficerProfile>) {
        match (profile.is_some(), self.officer.is_some()) {
            (true, true) => {
                self.officer = None;
                if self.section == Section::Officer {
                    self.section = Section::Details;
                }
            }
            (false, false) => self.officer = Some(officer_form()),
            _ => {}
        }
        self.profile = profile;
    }

    /// Returns `true` when the inline officer fields are shown.
    pub fn needs_officer(&self) -> bool {
        self.officer.is_some()
    }

    pub fn officer_form(&self) -> Option<&Form> {
        self.officer.as_ref()
    }

    pub fn details(&self) -> &Form {
        &self.details
    }

    /// The description typed so far, lines joined with `\n`.
    pub fn description(&self) -> String {
        self.description.lines().join("\n")
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_pending(&self) -> bool {
        self.submission == Submission::Pending
    }

    /// Records the outcome of the in-flight submission.
    ///
    /// Returns `false` and changes nothing when no submission is pending.
    pub fn finish(&mut self, outcome: Result<String, String>) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.submission = match outcome {
            Ok(document) => Submission::Succeeded(document),
            Err(message) => Submission::Failed(message),
        };
        self.result_scroll = 0;
        true
    }

    /// Marks a submission as in flight until [`finish`](Self::finish).
    pub fn mark_pending(&mut self) {
        self.submission = Submission::Pending;
        self.result_scroll = 0;
    }

    /// Drops the generated document when the user leaves the screen.
    ///
    /// Typed values survive, and a pending submission still lands here.
    pub fn leave(&mut self) {
        if !self.is_pending() {
            self.submission = Submission::Idle;
            self.result_scroll = 0;
        }
    }

    /// Clears every field and the last result. The profile is kept, and so
    /// is a pending submission: its result still lands in the cleared form.
    pub fn reset(&mut self) {
        let pending = self.is_pending();
        *self = Self::new(self.profile.take());
        if pending {
            self.submission = Submission::Pending;
        }
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => return self.submit(),
                KeyCode::Char('e') => return self.export(),
                KeyCode::Char('r') => {
                    self.reset();
                    return Action::None;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => return Action::Navigate(Screen::Home),
            KeyCode::Tab => {
                self.focus_next();
                return Action::None;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return Action::None;
            }
            KeyCode::PageDown => {
                self.result_scroll = self.result_scroll.saturating_add(5);
                return Action::None;
            }
            KeyCode::PageUp => {
                self.result_scroll = self.result_scroll.saturating_sub(5);
                return Action::None;
            }
            _ => {}
        }

        if self.section == Section::Description {
            self.description.input(key);
            return Action::None;
        }

        let Some(form) = self.active_form() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Enter => return self.submit(),
            KeyCode::Left => form.cycle_choice(false),
            KeyCode::Right => form.cycle_choice(true),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.insert_char(ch);
            }
            _ => {}
        }
        Action::None
    }

    fn active_form(&mut self) -> Option<&mut Form> {
        match self.section {
            Section::Officer => self.officer.as_mut(),
            Section::Details => Some(&mut self.details),
            Section::Description => None,
        }
    }

    fn focus_next(&mut self) {
        match self.section {
            Section::Officer => match &mut self.officer {
                Some(form) if !form.is_last_focused() => form.focus_next(),
                _ => {
                    self.details.set_focus(0);
                    self.section = Section::Details;
                }
            },
            Section::Details if !self.details.is_last_focused() => self.details.focus_next(),
            Section::Details => self.section = Section::Description,
            Section::Description => {
                if let Some(form) = &mut self.officer {
                    form.set_focus(0);
                    self.section = Section::Officer;
                } else {
                    self.details.set_focus(0);
                    self.section = Section::Details;
                }
            }
        }
    }

    fn focus_prev(&mut self) {
        match self.section {
            Section::Officer => match &mut self.officer {
                Some(form) if form.focus() > 0 => form.focus_prev(),
                _ => self.section = Section::Description,
            },
            Section::Details if self.details.focus() > 0 => self.details.focus_prev(),
            Section::Details => match &mut self.officer {
                Some(form) => {
                    form.focus_last();
                    self.section = Section::Officer;
                }
                None => self.section = Section::Description,
            },
            Section::Description => {
                self.details.focus_last();
                self.section = Section::Details;
            }
        }
    }

    /// Validates the form and asks the app to send it.
    ///
    /// Ignored while a previous submission is pending.
    fn submit(&mut self) -> Action {
        if self.is_pending() {
            return Action::None;
        }
        match self.collect() {
            Some(request) => {
                self.mark_pending();
                Action::Submit(request)
            }
            None => Action::Notify(Notification::error(
                "Informations manquantes",
                "Certains champs obligatoires sont vides ou invalides. \
                 Corrigez les champs signalés puis réessayez.",
            )),
        }
    }

    fn export(&self) -> Action {
        match &self.submission {
            Submission::Succeeded(document) => Action::ExportReport {
                document: document.clone(),
                last_name: self.details.value(LAST_NAME).trim().to_string(),
            },
            _ => Action::None,
        }
    }

    /// Builds a request from the typed values, marking every invalid field.
    fn collect(&mut self) -> Option<ReportRequest> {
        self.details.clear_errors();
        self.description_error = None;

        let officer = self.collect_officer();

        let form = &mut self.details;
        for index in [
            LAST_NAME,
            FIRST_NAME,
            NATIONALITY,
            BIRTHPLACE,
            REASON,
        ] {
            if form.value(index).trim().is_empty() {
                form.set_error(index, REQUIRED.into());
            }
        }

        let birthdate = match normalize_birthdate(form.value(BIRTHDATE)) {
            Ok(date) => Some(date),
            Err(_) if form.value(BIRTHDATE).trim().is_empty() => {
                form.set_error(BIRTHDATE, REQUIRED.into());
                None
            }
            Err(e) => {
                form.set_error(BIRTHDATE, e.to_string());
                None
            }
        };
        let height = measure(form, HEIGHT, "height");
        let weight = measure(form, WEIGHT, "weight");

        let description = self.description();
        if description.trim().is_empty() {
            self.description_error = Some(REQUIRED.into());
        }

        let form = &self.details;
        if form.has_errors() || self.description_error.is_some() {
            return None;
        }
        let (officer, birthdate, height, weight) = (officer?, birthdate?, height?, weight?);

        let drivers: Vec<bool> = (0..DriversLicense::all().len())
            .map(|i| form.is_checked(DRIVERS_A + i))
            .collect();
        let guns: Vec<bool> = (0..GunLicense::all().len())
            .map(|i| form.is_checked(GUN_A + i))
            .collect();

        Some(ReportRequest {
            officer,
            arrestee: Arrestee {
                last_name: form.value(LAST_NAME).trim().to_string(),
                first_name: form.value(FIRST_NAME).trim().to_string(),
                sex: Sex::from_label(form.value(SEX)).unwrap_or_default(),
                nationality: form.value(NATIONALITY).trim().to_string(),
                vehicle: optional(form.value(VEHICLE)),
                gun_licenses: collect_licenses(&guns),
                phone: optional(form.value(PHONE)),
                birthdate,
                birthplace: form.value(BIRTHPLACE).trim().to_string(),
                height,
                weight,
                address: optional(form.value(ADDRESS)),
                drivers_licenses: collect_licenses(&drivers),
                profession: optional(form.value(PROFESSION)),
            },
            arrest: Arrest {
                reason: form.value(REASON).trim().to_string(),
                comment: optional(form.value(COMMENT)),
                confidentiality: Confidentiality::from_label(form.value(CONFIDENTIALITY))
                    .unwrap_or_default(),
                description,
            },
        })
    }

    /// The stored profile, or the inline officer fields when they are complete.
    fn collect_officer(&mut self) -> Option<OfficerProfile> {
        let Some(form) = &mut self.officer else {
            return self.profile.clone();
        };
        form.clear_errors();

        let name = form.value(OFFICER_NAME).trim().to_string();
        let rank = Rank::from_label(form.value(OFFICER_RANK));
        let district = District::from_label(form.value(OFFICER_DISTRICT));
        if name.is_empty() {
            form.set_error(OFFICER_NAME, REQUIRED.into());
        }
        if rank.is_none() {
            form.set_error(OFFICER_RANK, REQUIRED.into());
        }
        if district.is_none() {
            form.set_error(OFFICER_DISTRICT, REQUIRED.into());
        }
        Some(OfficerProfile::new(name, rank?, district?)).filter(|p| !p.name.is_empty())
    }
}

/// Parses a measure field, marking it on failure.
fn measure(form: &mut Form, index: usize, field: &'static str) -> Option<u16> {
    let raw = form.value(index).trim().to_string();
    if raw.is_empty() {
        form.set_error(index, REQUIRED.into());
        return None;
    }
    match parse_measure(field, &raw) {
        Ok(value) => Some(value),
        Err(_) => {
            form.set_error(index, "Nombre entier attendu".into());
            None
        }
    }
}

/// Renders the arrest report screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_arrest_form(
    state: &ArrestFormState,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
) {
    let block = Block::default()
        .title(" Rapport d'arrestation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_header(state, palette, frame, header_area);

    let [form_area, result_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .areas(body_area);

    let officer_height = if state.needs_officer() { 9 } else { 0 };
    let [officer_area, details_area, description_area] = Layout::vertical([
        Constraint::Length(officer_height),
        Constraint::Min(6),
        Constraint::Length(8),
    ])
    .areas(form_area);

    if let Some(form) = state.officer_form() {
        draw_form(form, state.section == Section::Officer, palette, frame, officer_area);
    }
    draw_form(
        state.details(),
        state.section == Section::Details,
        palette,
        frame,
        details_area,
    );
    draw_description(state, palette, frame, description_area);
    draw_result(state, palette, frame, result_area);

    let footer = Paragraph::new(Line::from(
        "Tab: champ suivant  ←/→: choix  Espace: cocher  Entrée/Ctrl+S: générer  \
         Ctrl+E: exporter  Ctrl+R: vider  Échap: retour",
    ))
    .style(Style::default().fg(palette.muted));
    frame.render_widget(footer, footer_area);
}

#[mutants::skip]
fn draw_header(state: &ArrestFormState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let (mark, text, color) = if state.needs_officer() {
        (
            "✗",
            "Vous n'avez pas de profil. Créez-en un (F2) pour ne plus remplir l'officier.",
            palette.error,
        )
    } else {
        ("✓", "Votre profil est complet.", palette.success)
    };
    let references: Vec<Span> = REFERENCES
        .iter()
        .flat_map(|(name, _)| {
            [
                Span::styled(*name, Style::default().fg(palette.accent)),
                Span::raw("  "),
            ]
        })
        .collect();
    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{mark} "), Style::default().fg(color)),
            Span::styled(text, Style::default().fg(palette.text)),
        ]),
        Line::from(references),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

#[mutants::skip]
fn draw_description(state: &ArrestFormState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let border = if state.description_error.is_some() {
        palette.error
    } else if state.section == Section::Description {
        palette.focus
    } else {
        palette.muted
    };
    let title = match &state.description_error {
        Some(err) => format!("Description détaillée de l'infraction * ({err})"),
        None => "Description détaillée de l'infraction *".to_string(),
    };
    let mut textarea = state.description.clone();
    textarea.set_block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    if state.section != Section::Description {
        textarea.set_cursor_style(Style::default());
    }
    frame.render_widget(&textarea, area);
}

fn idle_text() -> String {
    let mut text = String::from("Remplissez le formulaire puis générez le rapport.\n\nRéférences :");
    for (name, url) in REFERENCES {
        text.push_str(&format!("\n{name} : {url}"));
    }
    text
}

#[mutants::skip]
fn draw_result(state: &ArrestFormState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let (title, body, color) = match &state.submission {
        Submission::Idle => (" Résultat ", idle_text(), palette.muted),
        Submission::Pending => (" Résultat ", "Génération en cours…".to_string(), palette.focus),
        Submission::Succeeded(document) => (" Résultat (Ctrl+E) ", document.clone(), palette.success),
        Submission::Failed(message) => (" Échec ", message.clone(), palette.error),
    };
    let paragraph = Paragraph::new(body)
        .style(Style::default().fg(palette.text))
        .wrap(Wrap { trim: false })
        .scroll((state.result_scroll, 0))
        .block(
            Block::default()
                .title(Span::styled(
                    title,
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(paragraph, area);
}
