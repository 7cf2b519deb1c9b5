//! BBCode report rendering.
//!
//! Pure text generation: a fixed forum template filled from a
//! [`ReportRequest`](crate::model::ReportRequest). No I/O and no validation;
//! callers validate the request first.

mod template;

pub use template::{
    NO_ADDRESS, NO_COMMENT, NO_PHONE, NO_PROFESSION, NO_VEHICLE, format_report_date,
    license_line, render_report, render_report_now, today,
};
