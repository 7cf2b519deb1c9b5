use std::fmt;

use serde::{Deserialize, Serialize};

use super::license::{DriversLicense, GunLicense};

/// Sex as recorded on the booking sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Sex {
    #[default]
    Homme,
    Femme,
}

static ALL_SEXES: &[Sex] = &[Sex::Homme, Sex::Femme];

impl Sex {
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Homme => "Homme",
            Sex::Femme => "Femme",
        }
    }

    pub fn all() -> &'static [Sex] {
        ALL_SEXES
    }

    /// Looks up a value by its [`label`](Self::label).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.label() == label)
    }
}

#[mutants::skip]
impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The person being booked.
///
/// Optional fields that are absent or empty are rendered with a fixed
/// fallback sentence; every other field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrestee {
    pub last_name: String,
    pub first_name: String,
    pub sex: Sex,
    pub nationality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    pub gun_licenses: Vec<GunLicense>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Display form `DD/MM/YYYY`.
    pub birthdate: String,
    pub birthplace: String,
    /// Centimetres.
    pub height: u16,
    /// Kilograms.
    pub weight: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub drivers_licenses: Vec<DriversLicense>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
}
