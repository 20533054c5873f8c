//! Named collections of dataset profiles.
//!
//! The built-in catalog covers the exports this workspace was written for.
//! Additional exports sharing the same wide layout can be described in TOML:
//!
//! ```toml
//! [[profile]]
//! name = "unemployment"
//! dimensions = ["freq", "unit", "sex", "age", "geo"]
//! renames = [{ from = "geo", to = "country" }]
//! year_rule = "first-four-digits"
//! value_rule = "first-number"
//! value_column = "rate"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::profile::DatasetProfile;

/// An ordered set of uniquely named, validated profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileCatalog {
    #[serde(rename = "profile", default)]
    profiles: Vec<DatasetProfile>,
}

impl ProfileCatalog {
    /// Builds a catalog, validating every profile and rejecting duplicate names.
    pub fn new(profiles: Vec<DatasetProfile>) -> Result<Self> {
        let catalog = Self { profiles };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Catalog of the built-in profiles.
    pub fn builtin() -> Self {
        Self {
            profiles: DatasetProfile::builtin(),
        }
    }

    /// Parses a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads a TOML catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Adds `other`'s profiles; a profile with an existing name replaces it.
    #[must_use]
    pub fn merged_with(mut self, other: Self) -> Self {
        for profile in other.profiles {
            match self.profiles.iter_mut().find(|p| p.name == profile.name) {
                Some(existing) => *existing = profile,
                None => self.profiles.push(profile),
            }
        }
        self
    }

    /// Looks a profile up by name.
    pub fn get(&self, name: &str) -> Result<&DatasetProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.name == name)
            .ok_or_else(|| ModelError::UnknownProfile {
                name: name.to_string(),
                available: self.names(),
            })
    }

    pub fn names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name.clone()).collect()
    }

    pub fn profiles(&self) -> &[DatasetProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    fn validate(&self) -> Result<()> {
        for (idx, profile) in self.profiles.iter().enumerate() {
            profile.validate()?;
            if self.profiles[..idx].iter().any(|p| p.name == profile.name) {
                return Err(ModelError::DuplicateProfile {
                    name: profile.name.clone(),
                });
            }
        }
        Ok(())
    }
}
