use std::fmt;

use serde::{Deserialize, Serialize};

/// Police rank, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Rank {
    #[default]
    #[serde(rename = "Cadet")]
    Cadet,
    #[serde(rename = "Officier de premier échelon")]
    OfficerFirstGrade,
    #[serde(rename = "Officier de second échelon")]
    OfficerSecondGrade,
    #[serde(rename = "Officier de troisième échelon")]
    OfficerThirdGrade,
    #[serde(rename = "Officier Senior")]
    SeniorOfficer,
    #[serde(rename = "Sergent")]
    Sergeant,
    #[serde(rename = "Sergent-Chef")]
    StaffSergeant,
    #[serde(rename = "Lieutenant")]
    Lieutenant,
    #[serde(rename = "Capitaine")]
    Captain,
    #[serde(rename = "Deputy Chief")]
    DeputyChief,
    #[serde(rename = "Chief")]
    Chief,
    #[serde(rename = "Assistant-Sheriff")]
    AssistantSheriff,
    #[serde(rename = "Undersheriff")]
    Undersheriff,
    #[serde(rename = "Sheriff")]
    Sheriff,
}

static ALL_RANKS: &[Rank] = &[
    Rank::Cadet,
    Rank::OfficerFirstGrade,
    Rank::OfficerSecondGrade,
    Rank::OfficerThirdGrade,
    Rank::SeniorOfficer,
    Rank::Sergeant,
    Rank::StaffSergeant,
    Rank::Lieutenant,
    Rank::Captain,
    Rank::DeputyChief,
    Rank::Chief,
    Rank::AssistantSheriff,
    Rank::Undersheriff,
    Rank::Sheriff,
];

impl Rank {
    /// Returns the label used in forms, storage and the wire format.
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Cadet => "Cadet",
            Rank::OfficerFirstGrade => "Officier de premier échelon",
            Rank::OfficerSecondGrade => "Officier de second échelon",
            Rank::OfficerThirdGrade => "Officier de troisième échelon",
            Rank::SeniorOfficer => "Officier Senior",
            Rank::Sergeant => "Sergent",
            Rank::StaffSergeant => "Sergent-Chef",
            Rank::Lieutenant => "Lieutenant",
            Rank::Captain => "Capitaine",
            Rank::DeputyChief => "Deputy Chief",
            Rank::Chief => "Chief",
            Rank::AssistantSheriff => "Assistant-Sheriff",
            Rank::Undersheriff => "Undersheriff",
            Rank::Sheriff => "Sheriff",
        }
    }

    /// Returns all ranks in seniority order (Cadet first).
    pub fn all() -> &'static [Rank] {
        ALL_RANKS
    }

    /// Looks up a value by its [`label`](Self::label).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.label() == label)
    }

    /// How the report refers to an officer of this rank.
    ///
    /// Cadets sign as `le Cadet`; every sworn rank signs as `l'Officier`.
    pub fn title(&self) -> &'static str {
        match self {
            Rank::Cadet => "le Cadet",
            _ => "l'Officier",
        }
    }
}

#[mutants::skip]
impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Patrol district an officer is affiliated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum District {
    #[default]
    Truenorth,
    Townsend,
}

static ALL_DISTRICTS: &[District] = &[District::Truenorth, District::Townsend];

impl District {
    /// Returns the district name as written in reports.
    pub fn label(&self) -> &'static str {
        match self {
            District::Truenorth => "Truenorth",
            District::Townsend => "Townsend",
        }
    }

    /// Returns both districts.
    pub fn all() -> &'static [District] {
        ALL_DISTRICTS
    }

    /// Looks up a value by its [`label`](Self::label).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.label() == label)
    }
}

#[mutants::skip]
impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The officer who wrote the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerProfile {
    pub name: String,
    pub rank: Rank,
    pub district: District,
}

impl OfficerProfile {
    pub fn new(name: impl Into<String>, rank: Rank, district: District) -> Self {
        Self {
            name: name.into(),
            rank,
            district,
        }
    }
}
