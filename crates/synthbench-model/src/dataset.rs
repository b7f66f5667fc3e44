use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const DATASET_NAME_MAX_LEN: usize = 64;

pub fn parse_dataset_name(input: &str) -> Result<DatasetName, ValidationError> {
    DatasetName::parse(input)
}

/// A benchmark problem identifier such as `gcd` or `replace-space-with-newline`.
///
/// Catalog membership is not part of validation: a well-formed name that no
/// catalog table lists still parses, and fails later at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct DatasetName(String);

impl DatasetName {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("dataset name must not be empty".to_string()));
        }
        if s.len() > DATASET_NAME_MAX_LEN {
            return Err(ValidationError(format!(
                "dataset name exceeds max length {DATASET_NAME_MAX_LEN}"
            )));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ValidationError(
                "dataset name must match [a-z0-9-]+ in kebab-case".to_string(),
            ));
        }
        if s.starts_with('-') || s.ends_with('-') || s.contains("--") {
            return Err(ValidationError(
                "dataset name must not start/end with '-' or contain '--'".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    // Catalog tables are trusted input; entries skip the parse path.
    pub(crate) fn from_catalog(name: &str) -> Self {
        Self(name.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for DatasetName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
