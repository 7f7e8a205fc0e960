use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Dimensions to expand the sizes in the report against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Dimension {
    Sdk,
    Abi,
    Language,
    ScreenDensity,
    All,
}

/// Concrete dimensions that `ALL` stands for.
///
/// Declared on its own rather than derived from [`Dimension::VALUES`]: a new
/// variant only joins the wildcard once it is added here.
pub const SUPPORTED_DIMENSIONS: [Dimension; 4] = [
    Dimension::Sdk,
    Dimension::Abi,
    Dimension::Language,
    Dimension::ScreenDensity,
];

impl Dimension {
    pub const VALUES: [Dimension; 5] = [
        Dimension::Sdk,
        Dimension::Abi,
        Dimension::Language,
        Dimension::ScreenDensity,
        Dimension::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Sdk => "SDK",
            Dimension::Abi => "ABI",
            Dimension::Language => "LANGUAGE",
            Dimension::ScreenDensity => "SCREEN_DENSITY",
            Dimension::All => "ALL",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown dimension '{0}'")]
pub struct UnknownDimension(pub String);

impl FromStr for Dimension {
    type Err = UnknownDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::VALUES
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownDimension(s.to_string()))
    }
}

impl From<Dimension> for &'static str {
    fn from(dimension: Dimension) -> Self {
        dimension.as_str()
    }
}

impl TryFrom<String> for Dimension {
    type Error = UnknownDimension;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

pub fn supported_dimensions() -> BTreeSet<Dimension> {
    SUPPORTED_DIMENSIONS.into_iter().collect()
}

/// Resolves the wildcard: a request containing `ALL` becomes exactly
/// [`SUPPORTED_DIMENSIONS`], anything else is returned as-is.
pub fn expand(requested: &BTreeSet<Dimension>) -> BTreeSet<Dimension> {
    if !requested.contains(&Dimension::All) {
        return requested.clone();
    }

    let discarded: Vec<&str> = requested
        .iter()
        .filter(|d| **d != Dimension::All)
        .map(Dimension::as_str)
        .collect();
    if !discarded.is_empty() {
        tracing::warn!(
            "ALL already covers every supported dimension, ignoring {}",
            discarded.join(", ")
        );
    }

    supported_dimensions()
}
