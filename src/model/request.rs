use serde::{Deserialize, Serialize};

use super::arrest::Arrest;
use super::arrestee::Arrestee;
use super::officer::OfficerProfile;
use super::validation::{ValidationError, validate_required};

/// Body of a report generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub officer: OfficerProfile,
    pub arrestee: Arrestee,
    pub arrest: Arrest,
}

impl ReportRequest {
    /// Checks that every field without a rendering fallback is filled in.
    ///
    /// Returns the first missing field. Enumerations and numbers are already
    /// enforced by deserialization.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("officer.name", self.officer.name.as_str()),
            ("arrestee.last_name", self.arrestee.last_name.as_str()),
            ("arrestee.first_name", self.arrestee.first_name.as_str()),
            ("arrestee.nationality", self.arrestee.nationality.as_str()),
            ("arrestee.birthdate", self.arrestee.birthdate.as_str()),
            ("arrestee.birthplace", self.arrestee.birthplace.as_str()),
            ("arrest.reason", self.arrest.reason.as_str()),
            ("arrest.description", self.arrest.description.as_str()),
        ];
        required
            .into_iter()
            .try_for_each(|(field, value)| validate_required(field, value))
    }
}

/// Body of a successful report generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub result: String,
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_request;
    use super::*;

    #[test]
    fn complete_request_is_valid() {
        assert_eq!(sample_request().validate(), Ok(()));
    }

    #[test]
    fn blank_reason_rejected() {
        let mut request = sample_request();
        request.arrest.reason = "   ".into();
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingField("arrest.reason"))
        );
    }

    #[test]
    fn first_missing_field_reported() {
        let mut request = sample_request();
        request.arrestee.first_name.clear();
        request.arrest.description.clear();
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingField("arrestee.first_name"))
        );
    }

    #[test]
    fn empty_officer_name_rejected() {
        let mut request = sample_request();
        request.officer.name.clear();
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingField("officer.name"))
        );
    }

    #[test]
    fn optional_fields_not_required() {
        let mut request = sample_request();
        request.arrest.comment = Some(String::new());
        request.arrestee.phone = Some(String::new());
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn wire_format_round_trip() {
        let request = sample_request();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["officer"]["rank"], "Sergent");
        assert_eq!(json["arrestee"]["gun_licenses"], serde_json::json!(["A", "C"]));
        let parsed: ReportRequest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, request);
    }
}
