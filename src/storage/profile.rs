use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::StorageError;
use crate::model::{District, OfficerProfile, Rank};

/// File name of the stored profile inside the data directory.
pub const PROFILE_FILE: &str = "bbcode-profile.json";

/// The persisted officer profile.
///
/// Fields that were never set are stored as empty strings, so a partial
/// profile can exist. Only a [`complete`](Self::complete) profile can sign a
/// report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoredProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default, with = "blank")]
    pub rank: Option<Rank>,
    #[serde(default, with = "blank")]
    pub district: Option<District>,
}

impl StoredProfile {
    /// Returns the full officer profile if name, rank and district are all set.
    pub fn complete(&self) -> Option<OfficerProfile> {
        match (self.name.is_empty(), self.rank, self.district) {
            (false, Some(rank), Some(district)) => {
                Some(OfficerProfile::new(self.name.clone(), rank, district))
            }
            _ => None,
        }
    }
}

/// Serde adapter storing `None` as `""`.
mod blank {
    use serde::de::value::{Error as ValueError, StringDeserializer};
    use serde::de::{DeserializeOwned, Error as _, IntoDeserializer};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(s) => {
                let inner: StringDeserializer<ValueError> = s.into_deserializer();
                T::deserialize(inner).map(Some).map_err(D::Error::custom)
            }
        }
    }
}

/// Returns the default data directory (`~/.local/share/arrestation` on Linux).
pub fn default_data_dir() -> Result<PathBuf, StorageError> {
    let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
    Ok(data_dir.join("arrestation"))
}

/// Reads and writes the single officer profile record.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Creates a store in the XDG data directory.
    ///
    /// The directory (`~/.local/share/arrestation/`) is created if it does
    /// not already exist.
    pub fn new() -> Result<Self, StorageError> {
        Self::with_dir(default_data_dir()?)
    }

    /// Creates a store rooted at the given directory, creating it if needed.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            path: dir.join(PROFILE_FILE),
        })
    }

    /// Returns the path of the profile file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored profile, or `None` if nothing has been saved.
    pub fn get(&self) -> Result<Option<StoredProfile>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Merges the given fields into the stored profile and saves it.
    ///
    /// `None` and empty names leave the stored value untouched. If no profile
    /// exists yet, one is created with empty fields first. Returns the
    /// profile as saved.
    pub fn set(
        &self,
        name: Option<&str>,
        rank: Option<Rank>,
        district: Option<District>,
    ) -> Result<StoredProfile, StorageError> {
        let mut profile = self.get()?.unwrap_or_default();

        if let Some(name) = name.filter(|n| !n.is_empty()) {
            profile.name = name.to_string();
        }
        if rank.is_some() {
            profile.rank = rank;
        }
        if district.is_some() {
            profile.district = district;
        }

        fs::write(&self.path, serde_json::to_string(&profile)?)?;
        Ok(profile)
    }

    /// Returns `true` if a profile record has been saved.
    pub fn exists(&self) -> Result<bool, StorageError> {
        Ok(self.path.try_exists()?)
    }

    /// Removes the stored profile. Removing a missing profile is not an error.
    pub fn delete(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the stored profile if it is complete enough to sign a report.
    pub fn complete(&self) -> Result<Option<OfficerProfile>, StorageError> {
        Ok(self.get()?.and_then(|p| p.complete()))
    }
}
