use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;

use crate::client::{ReportClient, SubmitError};
use crate::model::ReportRequest;
use crate::report;
use crate::storage::{ProfileStore, StorageError, StoredProfile, default_export_path, export_report};

use super::action::Action;
use super::error::AppError;
use super::screens::{
    ArrestFormState, HelpState, HomeState, ProfileEditState, draw_arrest_form, draw_help,
    draw_home, draw_profile_edit,
};
use super::theme::{Palette, Theme};
use super::widgets::{Notification, StatusBarContext, draw_notification, draw_status_bar};

/// How long the event loop waits for input before checking submissions.
const TICK: Duration = Duration::from_millis(100);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Welcome text and report cards.
    Home,
    /// Arrest report form and its result.
    ArrestForm,
    /// Profile modal, drawn over the screen that opened it.
    Profile,
    /// Show keybinding help.
    Help,
}

type Outcome = Result<String, SubmitError>;

/// Runs report submissions on the async runtime and hands results back to
/// the synchronous event loop.
struct Submitter {
    client: Arc<dyn ReportClient>,
    runtime: Handle,
    tx: Sender<Outcome>,
    rx: Receiver<Outcome>,
}

impl Submitter {
    fn new(client: Arc<dyn ReportClient>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            runtime,
            tx,
            rx,
        }
    }

    fn spawn(&self, request: ReportRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = client.generate(&request).await;
            // The receiver is gone once the app has quit.
            let _ = tx.send(outcome);
        });
    }

    fn try_recv(&self) -> Option<Outcome> {
        self.rx.try_recv().ok()
    }
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    store: ProfileStore,
    profile: Option<StoredProfile>,
    theme: Theme,
    notification: Option<Notification>,
    home: HomeState,
    arrest_form: ArrestFormState,
    profile_edit: ProfileEditState,
    help: HelpState,
    submitter: Submitter,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` on the [`Screen::Home`] screen, loading the stored
    /// profile. Submissions are spawned on `runtime`.
    pub fn new(
        store: ProfileStore,
        client: Arc<dyn ReportClient>,
        runtime: Handle,
    ) -> Result<Self, AppError> {
        let profile = store.get()?;
        let complete = profile.as_ref().and_then(StoredProfile::complete);
        let mut profile_edit = ProfileEditState::new();
        profile_edit.load(profile.as_ref());

        Ok(Self {
            screen: Screen::Home,
            store,
            profile,
            theme: Theme::default(),
            notification: None,
            home: HomeState::new(),
            arrest_form: ArrestFormState::new(complete),
            profile_edit,
            help: HelpState::new(),
            submitter: Submitter::new(client, runtime),
            should_quit: false,
        })
    }

    /// Main event loop: draw → poll input → dispatch → collect submissions.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(TICK)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
            self.drain_submissions();
        }
        Ok(())
    }

    /// Applies every submission result that has arrived since the last call.
    pub fn drain_submissions(&mut self) {
        while let Some(outcome) = self.submitter.try_recv() {
            self.finish_submission(outcome);
        }
    }

    fn finish_submission(&mut self, outcome: Outcome) {
        match outcome {
            Ok(document) => {
                tracing::info!(bytes = document.len(), "report generated");
                if !self.arrest_form.finish(Ok(document)) {
                    tracing::warn!("dropped report with no pending submission");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "report generation failed");
                let message = e.to_string();
                if self.arrest_form.finish(Err(message.clone())) {
                    self.notification =
                        Some(Notification::error("Échec de la génération", message));
                }
            }
        }
    }

    /// Handles a key event: notification first, then global keys, then the
    /// current screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.notification.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.notification = None;
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let action = match key.code {
            KeyCode::F(1) if self.screen != Screen::Help => Action::Navigate(Screen::Help),
            KeyCode::F(2) if matches!(self.screen, Screen::Home | Screen::ArrestForm) => {
                Action::Navigate(Screen::Profile)
            }
            KeyCode::F(3) => Action::ToggleTheme,
            _ => match self.screen {
                Screen::Home => self.home.handle_key(key),
                Screen::ArrestForm => self.arrest_form.handle_key(key),
                Screen::Profile => self.profile_edit.handle_key(key),
                Screen::Help => self.help.handle_key(key),
            },
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen),
            Action::SaveProfile(profile) => {
                match self.store.set(
                    Some(&profile.name),
                    Some(profile.rank),
                    Some(profile.district),
                ) {
                    Ok(saved) => {
                        tracing::info!(name = %saved.name, "profile saved");
                        self.profile = Some(saved);
                        self.arrest_form.set_profile(Some(profile));
                        self.screen = self.profile_edit.origin();
                        self.notification = Some(Notification::success(
                            "Profil sauvegardé",
                            "Votre profil est complet.",
                        ));
                    }
                    Err(e) => self.storage_failed("Sauvegarde impossible", &e),
                }
            }
            Action::DeleteProfile => match self.store.delete() {
                Ok(()) => {
                    tracing::info!("profile deleted");
                    self.profile = None;
                    self.arrest_form.set_profile(None);
                    self.profile_edit.load(None);
                    self.screen = self.profile_edit.origin();
                    self.notification = Some(Notification::success(
                        "Profil supprimé",
                        "Vous n'avez pas de profil.",
                    ));
                }
                Err(e) => self.storage_failed("Suppression impossible", &e),
            },
            Action::Submit(request) => {
                tracing::info!(
                    last_name = %request.arrestee.last_name,
                    "submitting report"
                );
                self.arrest_form.mark_pending();
                self.submitter.spawn(request);
            }
            Action::ExportReport {
                document,
                last_name,
            } => {
                let exported = default_export_path(&last_name, report::today())
                    .and_then(|path| export_report(&document, &path).map(|()| path));
                match exported {
                    Ok(path) => {
                        tracing::info!(path = %path.display(), "report exported");
                        self.notification = Some(Notification::success(
                            "Rapport exporté",
                            path.display().to_string(),
                        ));
                    }
                    Err(e) => self.storage_failed("Export impossible", &e),
                }
            }
            Action::Notify(notification) => self.notification = Some(notification),
            Action::ToggleTheme => self.theme = self.theme.toggle(),
            Action::Quit => self.should_quit = true,
        }
    }

    fn navigate(&mut self, screen: Screen) {
        match screen {
            // Returning from help keeps whatever was typed in the modal.
            Screen::Profile if self.screen != Screen::Help => {
                self.profile_edit.set_origin(self.screen);
                self.profile_edit.load(self.profile.as_ref());
            }
            Screen::Help => {
                self.help.set_origin(self.screen);
                self.help.reset();
            }
            Screen::Home if self.screen == Screen::ArrestForm => self.arrest_form.leave(),
            _ => {}
        }
        self.screen = screen;
    }

    fn storage_failed(&mut self, title: &str, error: &StorageError) {
        tracing::error!(%error, "{title}");
        self.notification = Some(Notification::error(title, error.to_string()));
    }

    fn status_context(&self) -> StatusBarContext {
        StatusBarContext {
            profile_name: self
                .profile
                .as_ref()
                .map(|p| p.name.clone())
                .filter(|name| !name.is_empty()),
            profile_complete: self
                .profile
                .as_ref()
                .and_then(StoredProfile::complete)
                .is_some(),
            pending: self.arrest_form.is_pending(),
            theme: self.theme,
        }
    }

    /// Renders the current screen, the status bar and any notification.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let palette = self.theme.palette();
        frame.render_widget(
            Block::default().style(Style::default().fg(palette.text).bg(palette.background)),
            area,
        );

        let [main, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        if self.screen == Screen::Profile {
            self.draw_screen(self.profile_edit.origin(), &palette, frame, main);
            draw_profile_edit(&self.profile_edit, &palette, frame, main);
        } else {
            self.draw_screen(self.screen, &palette, frame, main);
        }
        draw_status_bar(&self.status_context(), &palette, frame, status);

        if let Some(notification) = &self.notification {
            draw_notification(notification, &palette, frame, area);
        }
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw_screen(&self, screen: Screen, palette: &Palette, frame: &mut Frame, area: Rect) {
        match screen {
            Screen::ArrestForm => draw_arrest_form(&self.arrest_form, palette, frame, area),
            Screen::Help => draw_help(&self.help, palette, frame, area),
            Screen::Home | Screen::Profile => draw_home(&self.home, palette, frame, area),
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the stored profile, complete or not.
    pub fn profile(&self) -> Option<&StoredProfile> {
        self.profile.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns the notification currently shown, if any.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn arrest_form(&self) -> &ArrestFormState {
        &self.arrest_form
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use crossterm::event::KeyEventState;
    use futures::future::BoxFuture;
    use ratatui::backend::TestBackend;
    use tokio::runtime::Runtime;

    use super::*;
    use crate::model::{District, OfficerProfile, Rank};
    use crate::tui::screens::Submission;
    use crate::tui::widgets::{Severity, buffer_to_string};

    /// Answers every request with a fixed outcome.
    struct FakeClient {
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeClient {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                fail: false,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl ReportClient for FakeClient {
        fn generate<'a>(
            &'a self,
            request: &'a ReportRequest,
        ) -> BoxFuture<'a, Result<String, SubmitError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if self.fail {
                    Err(SubmitError::Status {
                        status: 500,
                        message: "boom".into(),
                    })
                } else {
                    Ok(format!("rapport pour {}", request.arrestee.last_name))
                }
            })
        }
    }

    struct Harness {
        _dir: tempfile::TempDir,
        _runtime: Runtime,
        app: App,
    }

    fn harness_with(client: Arc<dyn ReportClient>, stored: Option<OfficerProfile>) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::with_dir(dir.path()).unwrap();
        if let Some(p) = stored {
            store
                .set(Some(&p.name), Some(p.rank), Some(p.district))
                .unwrap();
        }
        let runtime = Runtime::new().unwrap();
        let app = App::new(store, client, runtime.handle().clone()).unwrap();
        Harness {
            _dir: dir,
            _runtime: runtime,
            app,
        }
    }

    fn harness() -> Harness {
        harness_with(FakeClient::ok(), None)
    }

    fn officer() -> OfficerProfile {
        OfficerProfile::new("Jack Reacher", Rank::Sergeant, District::Townsend)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            kind: KeyEventKind::Release,
            ..press(code)
        }
    }

    fn wait_for_result(app: &mut App) {
        for _ in 0..200 {
            app.drain_submissions();
            if matches!(
                app.arrest_form().submission(),
                Submission::Succeeded(_) | Submission::Failed(_)
            ) {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("submission never finished");
    }

    fn request() -> ReportRequest {
        crate::model::fixtures::sample_request()
    }

    mod construction {
        use super::*;

        #[test]
        fn starts_on_home_without_profile() {
            let h = harness();
            assert_eq!(h.app.screen(), Screen::Home);
            assert!(h.app.profile().is_none());
            assert!(h.app.arrest_form().needs_officer());
            assert_eq!(h.app.theme(), Theme::Dark);
        }

        #[test]
        fn loads_complete_profile() {
            let h = harness_with(FakeClient::ok(), Some(officer()));
            assert_eq!(h.app.profile().unwrap().name, "Jack Reacher");
            assert!(!h.app.arrest_form().needs_officer());
        }
    }

    mod global_keys {
        use super::*;

        #[test]
        fn release_events_are_ignored() {
            let mut h = harness();
            h.app.handle_key(release(KeyCode::Char('q')));
            assert!(!h.app.should_quit());
        }

        #[test]
        fn ctrl_c_quits_from_any_screen() {
            let mut h = harness();
            h.app.handle_key(press(KeyCode::Enter));
            assert_eq!(h.app.screen(), Screen::ArrestForm);
            h.app.handle_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
            assert!(h.app.should_quit());
        }

        #[test]
        fn q_on_home_quits() {
            let mut h = harness();
            h.app.handle_key(press(KeyCode::Char('q')));
            assert!(h.app.should_quit());
        }

        #[test]
        fn f1_opens_help_and_returns_to_origin() {
            let mut h = harness();
            h.app.handle_key(press(KeyCode::Enter));
            h.app.handle_key(press(KeyCode::F(1)));
            assert_eq!(h.app.screen(), Screen::Help);
            h.app.handle_key(press(KeyCode::Esc));
            assert_eq!(h.app.screen(), Screen::ArrestForm);
        }

        #[test]
        fn f3_toggles_theme() {
            let mut h = harness();
            h.app.handle_key(press(KeyCode::F(3)));
            assert_eq!(h.app.theme(), Theme::Light);
            h.app.handle_key(press(KeyCode::F(3)));
            assert_eq!(h.app.theme(), Theme::Dark);
        }

        #[test]
        fn f2_opens_profile_over_current_screen() {
            let mut h = harness();
            h.app.handle_key(press(KeyCode::Enter));
            h.app.handle_key(press(KeyCode::F(2)));
            assert_eq!(h.app.screen(), Screen::Profile);
            h.app.handle_key(press(KeyCode::Esc));
            assert_eq!(h.app.screen(), Screen::ArrestForm);
        }

        #[test]
        fn f2_ignored_on_help() {
            let mut h = harness();
            h.app.handle_key(press(KeyCode::F(1)));
            h.app.handle_key(press(KeyCode::F(2)));
            assert_eq!(h.app.screen(), Screen::Help);
        }
    }

    mod notifications {
        use super::*;

        #[test]
        fn notification_captures_keys_until_dismissed() {
            let mut h = harness();
            h.app.apply(Action::Notify(Notification::warn("Titre", "texte")));
            h.app.handle_key(press(KeyCode::Char('q')));
            assert!(!h.app.should_quit());
            assert!(h.app.notification().is_some());

            h.app.handle_key(press(KeyCode::Esc));
            assert!(h.app.notification().is_none());
            assert_eq!(h.app.screen(), Screen::Home);
        }

        #[test]
        fn legacy_card_shows_warning() {
            let mut h = harness();
            h.app.handle_key(press(KeyCode::Down));
            h.app.handle_key(press(KeyCode::Enter));
            assert_eq!(h.app.screen(), Screen::Home);
            assert_eq!(h.app.notification().unwrap().severity, Severity::Warn);
        }
    }

    mod profile {
        use super::*;

        #[test]
        fn save_persists_and_updates_form() {
            let mut h = harness();
            h.app.handle_key(press(KeyCode::Enter));
            h.app.handle_key(press(KeyCode::F(2)));
            h.app.apply(Action::SaveProfile(officer()));

            assert_eq!(h.app.screen(), Screen::ArrestForm);
            assert!(!h.app.arrest_form().needs_officer());
            assert_eq!(h.app.profile().unwrap().complete(), Some(officer()));
            assert_eq!(h.app.store.complete().unwrap(), Some(officer()));
            assert_eq!(h.app.notification().unwrap().severity, Severity::Success);
        }

        #[test]
        fn incomplete_modal_does_not_save() {
            let mut h = harness();
            h.app.handle_key(press(KeyCode::F(2)));
            h.app.handle_key(press(KeyCode::Enter));
            assert_eq!(h.app.screen(), Screen::Profile);
            assert_eq!(
                h.app.notification().unwrap().title,
                "Informations manquantes"
            );
            assert!(!h.app.store.exists().unwrap());
        }

        #[test]
        fn delete_clears_profile() {
            let mut h = harness_with(FakeClient::ok(), Some(officer()));
            h.app.handle_key(press(KeyCode::F(2)));
            h.app.handle_key(key(KeyCode::Char('d'), KeyModifiers::CONTROL));

            assert_eq!(h.app.screen(), Screen::Home);
            assert!(h.app.profile().is_none());
            assert!(h.app.arrest_form().needs_officer());
            assert!(!h.app.store.exists().unwrap());
        }

        #[test]
        fn status_context_reflects_profile() {
            let h = harness_with(FakeClient::ok(), Some(officer()));
            let ctx = h.app.status_context();
            assert_eq!(ctx.profile_name.as_deref(), Some("Jack Reacher"));
            assert!(ctx.profile_complete);
            assert!(!ctx.pending);
        }

        #[test]
        fn status_context_without_profile() {
            let h = harness();
            let ctx = h.app.status_context();
            assert_eq!(ctx.profile_name, None);
            assert!(!ctx.profile_complete);
        }
    }

    mod submission {
        use super::*;

        #[test]
        fn successful_submission_stores_document() {
            let client = FakeClient::ok();
            let mut h = harness_with(client.clone(), Some(officer()));
            h.app.apply(Action::Submit(request()));
            wait_for_result(&mut h.app);

            assert_eq!(
                h.app.arrest_form().submission(),
                &Submission::Succeeded("rapport pour Doe".into())
            );
            assert_eq!(client.calls.load(Ordering::SeqCst), 1);
            assert!(h.app.notification().is_none());
        }

        #[test]
        fn leaving_form_drops_document() {
            let mut h = harness_with(FakeClient::ok(), Some(officer()));
            h.app.handle_key(press(KeyCode::Enter));
            h.app.arrest_form.mark_pending();
            h.app.finish_submission(Ok("doc".into()));
            h.app.handle_key(press(KeyCode::Esc));
            assert_eq!(h.app.screen(), Screen::Home);
            assert_eq!(h.app.arrest_form().submission(), &Submission::Idle);
        }

        #[test]
        fn failed_submission_notifies() {
            let mut h = harness_with(FakeClient::failing(), Some(officer()));
            h.app.apply(Action::Submit(request()));
            wait_for_result(&mut h.app);

            match h.app.arrest_form().submission() {
                Submission::Failed(message) => assert!(message.contains("500")),
                other => panic!("expected Failed, got {other:?}"),
            }
            let notification = h.app.notification().unwrap();
            assert_eq!(notification.severity, Severity::Error);
            assert_eq!(notification.title, "Échec de la génération");
        }

        #[test]
        fn finished_submission_is_no_longer_pending() {
            let mut h = harness_with(FakeClient::ok(), Some(officer()));
            h.app.arrest_form.mark_pending();
            assert!(h.app.status_context().pending);
            h.app.finish_submission(Ok("doc".into()));
            assert!(!h.app.status_context().pending);
            assert_eq!(
                h.app.arrest_form().submission(),
                &Submission::Succeeded("doc".into())
            );
        }

        #[test]
        fn stale_failure_is_dropped_silently() {
            let mut h = harness_with(FakeClient::ok(), Some(officer()));
            h.app.finish_submission(Err(SubmitError::Status {
                status: 500,
                message: "boom".into(),
            }));
            assert!(h.app.notification().is_none());
            assert_eq!(h.app.arrest_form().submission(), &Submission::Idle);
        }
    }

    mod export {
        use super::*;

        #[test]
        fn export_failure_notifies_error() {
            let mut h = harness();
            h.app
                .storage_failed("Export impossible", &StorageError::NoHomeDir);
            let notification = h.app.notification().unwrap();
            assert_eq!(notification.severity, Severity::Error);
            assert_eq!(notification.title, "Export impossible");
        }
    }

    mod rendering {
        use super::*;

        fn render(app: &App) -> String {
            let mut terminal = Terminal::new(TestBackend::new(120, 45)).unwrap();
            terminal.draw(|frame| app.draw(frame)).unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn home_with_status_bar() {
            let h = harness();
            let output = render(&h.app);
            assert!(output.contains("Rapport d'arrestation"));
            assert!(output.contains("Anonyme"));
        }

        #[test]
        fn profile_modal_over_arrest_form() {
            let mut h = harness();
            h.app.handle_key(press(KeyCode::Enter));
            h.app.handle_key(press(KeyCode::F(2)));
            let output = render(&h.app);
            assert!(output.contains("Modifier mon profil"));
        }

        #[test]
        fn notification_drawn_on_top() {
            let mut h = harness();
            h.app.apply(Action::Notify(Notification::error("Erreur réseau", "détail")));
            let output = render(&h.app);
            assert!(output.contains("Erreur réseau"));
        }
    }
}
