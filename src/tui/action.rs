//! Actions returned by screen event handlers.

use crate::model::{OfficerProfile, ReportRequest};

use super::app::Screen;
use super::widgets::Notification;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to update global state and navigate between
/// screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Persist the officer profile.
    SaveProfile(OfficerProfile),
    /// Remove the stored officer profile.
    DeleteProfile,
    /// Send a validated request to the rendering server.
    Submit(ReportRequest),
    /// Write a generated report to the user's home directory.
    ExportReport { document: String, last_name: String },
    /// Show a blocking notification.
    Notify(Notification),
    /// Switch between light and dark theme.
    ToggleTheme,
    /// Quit the application.
    Quit,
}
