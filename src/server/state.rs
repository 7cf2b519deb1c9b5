use chrono::NaiveDate;

use crate::model::ReportRequest;
use crate::report::{render_report, render_report_now};

/// Shared state for the report handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    fixed_date: Option<NaiveDate>,
}

impl AppState {
    /// State that dates every report with the current UTC day.
    pub fn new() -> Self {
        Self::default()
    }

    /// State that dates every report with `date`.
    pub fn with_fixed_date(date: NaiveDate) -> Self {
        Self {
            fixed_date: Some(date),
        }
    }

    /// Renders a validated request with this state's report date.
    pub fn render(&self, request: &ReportRequest) -> String {
        match self.fixed_date {
            Some(date) => render_report(request, date),
            None => render_report_now(request),
        }
    }
}
