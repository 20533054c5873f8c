//! Dataset profiles.
//!
//! A [`DatasetProfile`] is everything the generic split/reshape/clean pipeline
//! needs to know about one Eurostat export: the dimension names packed into the
//! composite key column, how year labels and values are cleaned, and which
//! columns survive into the output. The two exports handled here use different
//! cleaning strategies on purpose, so each strategy is a distinct rule variant
//! rather than a shared best guess.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Output column holding the cleaned year.
pub const YEAR_COLUMN: &str = "year";

/// Column holding the raw cell between unpivoting and cleaning.
pub const RAW_VALUE_COLUMN: &str = "value";

/// Dimension holding the geo code after renaming.
pub const COUNTRY_COLUMN: &str = "country";

/// Dimension holding the age band code.
pub const AGE_COLUMN: &str = "age";

/// Suffix Eurostat appends to the composite key header.
pub const TIME_PERIOD_SUFFIX: &str = "\\TIME_PERIOD";

/// Cleaned age of the youngest band (`Y_LT1`).
pub const INFANT_AGE: i64 = 1;

/// How a year label is turned into an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YearRule {
    /// Remove every space, then parse the remainder as an integer.
    StripSpaces,
    /// Parse the first run of four consecutive digits.
    FirstFourDigits,
}

/// How a raw cell is turned into a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueRule {
    /// Delete everything except digits and `.`, then parse.
    StripNonNumeric,
    /// Parse the first `\d+(\.\d+)?` match.
    FirstNumber,
}

/// How the `age` dimension is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeRule {
    /// Leave the raw categorical code untouched.
    #[default]
    Keep,
    /// Delete non-digits and parse an integer; rows that fail are dropped.
    Digits,
}

/// Renames a dimension after the split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

impl Rename {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Per-dataset configuration of the reshaping pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Profile identifier (kebab-case by convention).
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Ordered dimension names packed into the composite key column.
    pub dimensions: Vec<String>,
    /// Dimension renames applied right after the split.
    #[serde(default)]
    pub renames: Vec<Rename>,
    pub year_rule: YearRule,
    pub value_rule: ValueRule,
    #[serde(default)]
    pub age_rule: AgeRule,
    /// Name of the output value column.
    pub value_column: String,
    /// Columns (post-rename names) removed after cleaning.
    #[serde(default)]
    pub prune: Vec<String>,
    /// Keep only rows whose cleaned age equals this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_filter: Option<i64>,
}

impl DatasetProfile {
    /// Life expectancy by age and sex (`demo_mlexpec`).
    pub fn life_expectancy() -> Self {
        Self {
            name: "life-expectancy".to_string(),
            description: "Life expectancy by age and sex".to_string(),
            dimensions: names(&["freq", "unit", "sex", "age", "country"]),
            renames: Vec::new(),
            year_rule: YearRule::StripSpaces,
            value_rule: ValueRule::StripNonNumeric,
            age_rule: AgeRule::Digits,
            value_column: "life_exp".to_string(),
            prune: names(&["freq", "unit"]),
            age_filter: None,
        }
    }

    /// Life expectancy restricted to the under-one age band.
    ///
    /// The age column is constant after filtering and is pruned with
    /// `freq`/`unit`.
    pub fn infant_life_expectancy() -> Self {
        Self {
            name: "infant-life-expectancy".to_string(),
            description: "Life expectancy at age less than one year".to_string(),
            prune: names(&["freq", "unit", AGE_COLUMN]),
            age_filter: Some(INFANT_AGE),
            ..Self::life_expectancy()
        }
    }

    /// In-work at-risk-of-poverty rate by age and sex (`ilc_iw01`).
    pub fn poverty_rate() -> Self {
        Self {
            name: "poverty-rate".to_string(),
            description: "In-work at-risk-of-poverty rate by age and sex".to_string(),
            dimensions: names(&["freq", "wstatus", "sex", "age", "unit", "geo"]),
            renames: vec![Rename::new("geo", COUNTRY_COLUMN)],
            year_rule: YearRule::FirstFourDigits,
            value_rule: ValueRule::FirstNumber,
            age_rule: AgeRule::Keep,
            value_column: "poverty_rate".to_string(),
            prune: Vec::new(),
            age_filter: None,
        }
    }

    /// All built-in profiles, in display order.
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::life_expectancy(),
            Self::infant_life_expectancy(),
            Self::poverty_rate(),
        ]
    }

    /// Name a declared dimension carries after renames.
    pub fn renamed<'a>(&'a self, dimension: &'a str) -> &'a str {
        self.renames
            .iter()
            .find(|rename| rename.from == dimension)
            .map_or(dimension, |rename| rename.to.as_str())
    }

    /// Dimension names after renames, before pruning.
    pub fn split_columns(&self) -> Vec<String> {
        self.dimensions
            .iter()
            .map(|dim| self.renamed(dim).to_string())
            .collect()
    }

    /// Dimension columns present in the final output, in order.
    pub fn output_dimensions(&self) -> Vec<String> {
        self.split_columns()
            .into_iter()
            .filter(|name| !self.prune.contains(name))
            .collect()
    }

    /// Full output schema: dimensions, then year, then value.
    pub fn output_columns(&self) -> Vec<String> {
        let mut columns = self.output_dimensions();
        columns.push(YEAR_COLUMN.to_string());
        columns.push(self.value_column.clone());
        columns
    }

    /// True if the cleaned frame carries a typed age column.
    pub fn has_numeric_age(&self) -> bool {
        self.age_rule == AgeRule::Digits
    }

    /// Checks the profile is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.dimensions.is_empty() {
            return Err(ModelError::EmptyDimensions {
                profile: self.name.clone(),
            });
        }

        let mut seen = BTreeSet::new();
        for dim in &self.dimensions {
            if !seen.insert(dim.as_str()) {
                return Err(ModelError::DuplicateDimension {
                    profile: self.name.clone(),
                    name: dim.clone(),
                });
            }
        }

        for rename in &self.renames {
            if !self.dimensions.contains(&rename.from) {
                return Err(ModelError::UnknownRename {
                    profile: self.name.clone(),
                    name: rename.from.clone(),
                });
            }
        }

        let split = self.split_columns();
        let mut renamed_seen = BTreeSet::new();
        for name in &split {
            if !renamed_seen.insert(name.as_str()) {
                return Err(ModelError::DuplicateDimension {
                    profile: self.name.clone(),
                    name: name.clone(),
                });
            }
        }

        for name in &self.prune {
            if !split.contains(name) {
                return Err(ModelError::UnknownPrune {
                    profile: self.name.clone(),
                    name: name.clone(),
                });
            }
        }

        if self.value_column == YEAR_COLUMN || split.contains(&self.value_column) {
            return Err(ModelError::ValueColumnCollision {
                profile: self.name.clone(),
                name: self.value_column.clone(),
            });
        }
        for reserved in [YEAR_COLUMN, RAW_VALUE_COLUMN] {
            if split.iter().any(|name| name == reserved) {
                return Err(ModelError::ValueColumnCollision {
                    profile: self.name.clone(),
                    name: reserved.to_string(),
                });
            }
        }

        let has_age = split.iter().any(|name| name == AGE_COLUMN);
        if (self.age_rule == AgeRule::Digits || self.age_filter.is_some()) && !has_age {
            return Err(ModelError::MissingAgeDimension {
                profile: self.name.clone(),
            });
        }
        if self.age_filter.is_some() && self.age_rule != AgeRule::Digits {
            return Err(ModelError::AgeFilterWithoutDigits {
                profile: self.name.clone(),
            });
        }

        Ok(())
    }
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
