//! Long-form observation rows.

use serde::{Deserialize, Serialize};

/// One cleaned observation: dimension values, year and a finite value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Output dimensions in profile order, as `(column, value)` pairs.
    ///
    /// A typed age is carried in [`Observation::age`] instead.
    pub dimensions: Vec<(String, String)>,
    /// Cleaned integer age, when the profile keeps a numeric age column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    pub year: i64,
    pub value: f64,
}

impl Observation {
    /// Value of a string dimension.
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn country(&self) -> Option<&str> {
        self.dimension(crate::profile::COUNTRY_COLUMN)
    }
}
