//! TUI screen implementations.

pub mod arrest_form;
pub mod help;
pub mod home;
pub mod profile_edit;

pub use arrest_form::{ArrestFormState, Submission, draw_arrest_form};
pub use help::{HelpState, draw_help};
pub use home::{CARDS, HomeState, ReportCard, draw_home};
pub use profile_edit::{ProfileEditState, draw_profile_edit};
