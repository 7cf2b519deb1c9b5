use std::fmt;

use serde::{Deserialize, Serialize};

/// Who may read the filed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Confidentiality {
    Public,
    #[default]
    Interne,
    Confidentiel,
}

static ALL_LEVELS: &[Confidentiality] = &[
    Confidentiality::Public,
    Confidentiality::Interne,
    Confidentiality::Confidentiel,
];

impl Confidentiality {
    pub fn label(&self) -> &'static str {
        match self {
            Confidentiality::Public => "Public",
            Confidentiality::Interne => "Interne",
            Confidentiality::Confidentiel => "Confidentiel",
        }
    }

    pub fn all() -> &'static [Confidentiality] {
        ALL_LEVELS
    }

    /// Looks up a value by its [`label`](Self::label).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.label() == label)
    }
}

#[mutants::skip]
impl fmt::Display for Confidentiality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Circumstances of the arrest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrest {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub confidentiality: Confidentiality,
    /// Free text, inserted into the report as-is.
    pub description: String,
}
