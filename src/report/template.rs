use std::borrow::Cow;

use chrono::{NaiveDate, Utc};

use crate::model::{LicenseClass, ReportRequest};

/// The BBCode arrest report skeleton with `{{name}}` placeholders.
const ARREST_TEMPLATE: &str = include_str!("arrestation.bbcode");

pub const NO_VEHICLE: &str = "N'en possède pas et/ou n'en faisait pas l'usage";
pub const NO_PHONE: &str = "N'en possède pas";
pub const NO_ADDRESS: &str = "L'individu a une adresse non-définie";
pub const NO_PROFESSION: &str = "Non-définie";
pub const NO_COMMENT: &str = "Aucune";

/// Formats a date the way reports print it: `DD/MM/YYYY`.
pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Today's date in UTC, the fixed zone reports are dated in.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Lists every class of a license kind in order, striking the ones not held.
///
/// `[A, C]` over A–E gives `A - [strike]B[/strike] - C - [strike]D[/strike] - [strike]E[/strike]`.
pub fn license_line<L: LicenseClass>(held: &[L]) -> String {
    L::all()
        .iter()
        .map(|class| {
            if held.contains(class) {
                class.letter().to_string()
            } else {
                format!("[strike]{}[/strike]", class.letter())
            }
        })
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Renders the arrest report for `request`, dated `date`.
///
/// Both the report date and the arrest date print `date`. Absent or empty
/// optional fields print their fallback sentence. Nothing is escaped.
pub fn render_report(request: &ReportRequest, date: NaiveDate) -> String {
    let date = format_report_date(date);
    substitute(ARREST_TEMPLATE, |key| placeholder(request, &date, key))
}

/// Renders the arrest report dated today.
pub fn render_report_now(request: &ReportRequest) -> String {
    render_report(request, today())
}

// Resolves one template placeholder.
fn placeholder<'a>(request: &'a ReportRequest, date: &'a str, key: &str) -> Option<Cow<'a, str>> {
    let officer = &request.officer;
    let arrestee = &request.arrestee;
    let arrest = &request.arrest;

    let value = match key {
        "report_date" => Cow::Borrowed(date),
        "officer_title" => Cow::Borrowed(officer.rank.title()),
        "officer_name" => Cow::Borrowed(officer.name.as_str()),
        "officer_district" => Cow::Borrowed(officer.district.label()),
        "last_name" => Cow::Borrowed(arrestee.last_name.as_str()),
        "first_name" => Cow::Borrowed(arrestee.first_name.as_str()),
        "sex" => Cow::Borrowed(arrestee.sex.label()),
        "nationality" => Cow::Borrowed(arrestee.nationality.as_str()),
        "vehicle" => Cow::Borrowed(or_fallback(&arrestee.vehicle, NO_VEHICLE)),
        "gun_licenses" => Cow::Owned(license_line(&arrestee.gun_licenses)),
        "phone" => Cow::Borrowed(or_fallback(&arrestee.phone, NO_PHONE)),
        "birthdate" => Cow::Borrowed(arrestee.birthdate.as_str()),
        "birthplace" => Cow::Borrowed(arrestee.birthplace.as_str()),
        "height" => Cow::Owned(arrestee.height.to_string()),
        "weight" => Cow::Owned(arrestee.weight.to_string()),
        "address" => Cow::Borrowed(or_fallback(&arrestee.address, NO_ADDRESS)),
        "drivers_licenses" => Cow::Owned(license_line(&arrestee.drivers_licenses)),
        "profession" => Cow::Borrowed(or_fallback(&arrestee.profession, NO_PROFESSION)),
        "reason" => Cow::Borrowed(arrest.reason.as_str()),
        "confidentiality" => Cow::Borrowed(arrest.confidentiality.label()),
        "comment" => Cow::Borrowed(or_fallback(&arrest.comment, NO_COMMENT)),
        "description" => Cow::Borrowed(arrest.description.as_str()),
        _ => return None,
    };
    Some(value)
}

// An empty optional counts as absent.
fn or_fallback<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

/// Replaces each `{{key}}` in `template` with `lookup(key)` in one pass.
///
/// Substituted text is never rescanned, so values containing `{{...}}` are
/// emitted literally. Unknown keys and unterminated openers are kept as-is.
fn substitute<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<Cow<'a, str>>,
{
    let mut output = String::with_capacity(template.len() + 1024);
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            output.push_str(&rest[open..]);
            return output;
        };
        let key = &after_open[..close];
        match lookup(key) {
            Some(value) => output.push_str(&value),
            None => output.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after_open[close + 2..];
    }

    output.push_str(rest);
    output
}
