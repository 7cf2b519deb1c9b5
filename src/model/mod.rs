mod arrest;
mod arrestee;
mod license;
mod officer;
mod request;
mod validation;

pub use arrest::{Arrest, Confidentiality};
pub use arrestee::{Arrestee, Sex};
pub use license::{DriversLicense, GunLicense, LicenseClass, collect_licenses};
pub use officer::{District, OfficerProfile, Rank};
pub use request::{ReportRequest, ReportResponse};
#[cfg(test)]
pub(crate) use request::fixtures;
pub use validation::{ValidationError, normalize_birthdate, parse_measure, validate_required};
