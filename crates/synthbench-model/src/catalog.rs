// SPDX-License-Identifier: Apache-2.0

use crate::DatasetName;
use std::fmt::{Display, Formatter};

/// First-suite problems, hosted under the `PSB1` storage prefix.
pub const PSB1_PROBLEMS: &[&str] = &[
    "collatz-numbers",
    "compare-string-lengths",
    "count-odds",
    "digits",
    "double-letters",
    "even-squares",
    "for-loop-index",
    "grade",
    "last-index-of-zero",
    "median",
    "mirror-image",
    "negative-to-zero",
    // number-io ships no curated edge cases upstream; its edge file is empty.
    "number-io",
    "pig-latin",
    "replace-space-with-newline",
    "scrabble-score",
    "small-or-large",
    "smallest",
    "string-differences",
    "string-lengths-backwards",
    "sum-of-squares",
    "super-anagrams",
    "syllables",
    "vector-average",
    "vectors-summed",
    "wallis-pi",
    "word-stats",
    "x-word-lines",
];

/// Second-suite problems, hosted under the `PSB2` storage prefix.
pub const PSB2_PROBLEMS: &[&str] = &[
    "basement",
    "bouncing-balls",
    "bowling",
    "camel-case",
    "checksum",
    "coin-sums",
    "cut-vector",
    "dice-game",
    "find-pair",
    "fizz-buzz",
    "fuel-cost",
    "gcd",
    "indices-of-substring",
    "leaders",
    "luhn",
    "mastermind",
    "middle-character",
    "paired-digits",
    "shopping-list",
    "snow-day",
    "solve-boolean",
    "spin-words",
    "square-digits",
    "substitution-cipher",
    "twitter",
    "vector-distance",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CatalogGroup {
    Psb1,
    Psb2,
}

impl CatalogGroup {
    /// Remote storage path prefix for this group.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Psb1 => "PSB1",
            Self::Psb2 => "PSB2",
        }
    }
}

impl Display for CatalogGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve the storage group for a dataset.
///
/// Names in neither table resolve to [`CatalogGroup::Psb2`]; the catalog
/// performs no validation, so an unknown name passes through and fails at
/// download time with a not-found error.
#[must_use]
pub fn catalog_group(dataset: &DatasetName) -> CatalogGroup {
    if PSB1_PROBLEMS.contains(&dataset.as_str()) {
        CatalogGroup::Psb1
    } else {
        CatalogGroup::Psb2
    }
}

#[must_use]
pub fn is_known_problem(dataset: &DatasetName) -> bool {
    PSB1_PROBLEMS.contains(&dataset.as_str()) || PSB2_PROBLEMS.contains(&dataset.as_str())
}

/// Union of both problem tables, sorted by name.
#[must_use]
pub fn all_problems() -> Vec<DatasetName> {
    let mut names: Vec<DatasetName> = PSB1_PROBLEMS
        .iter()
        .chain(PSB2_PROBLEMS.iter())
        .map(|name| DatasetName::from_catalog(name))
        .collect();
    names.sort();
    names
}
