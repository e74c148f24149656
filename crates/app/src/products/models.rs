//! Product Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use clap::ValueEnum;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product Identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// How the last-modified marker is rendered when an item is stamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MarkerFormat {
    /// Unix timestamp in whole seconds, stored as a number.
    #[default]
    EpochSeconds,

    /// RFC 3339 UTC string with whole-second precision.
    Rfc3339,
}

/// Last-modified marker, exactly as it was stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateMarker {
    /// Seconds since the Unix epoch.
    EpochSeconds(i64),

    /// RFC 3339 timestamp string.
    Rfc3339(String),
}

impl DateMarker {
    /// Stamp a marker for `at` in the given format.
    #[must_use]
    pub fn stamp(format: MarkerFormat, at: Timestamp) -> Self {
        let seconds = at.as_second();

        match format {
            MarkerFormat::EpochSeconds => Self::EpochSeconds(seconds),
            MarkerFormat::Rfc3339 => Self::Rfc3339(
                Timestamp::from_second(seconds).map_or_else(|_ignored| at.to_string(), |t| t.to_string()),
            ),
        }
    }
}

impl Display for DateMarker {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EpochSeconds(seconds) => Display::fmt(seconds, f),
            Self::Rfc3339(value) => Display::fmt(value, f),
        }
    }
}

/// Product Model
///
/// The inbound wire representation. Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub name: String,
    pub description: String,
}

impl Product {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Stored Product Item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ProductId,
    pub date_modified: DateMarker,
    pub name: String,
    pub description: String,
}

impl Item {
    /// Build a stored item from a decoded product and its generated metadata.
    #[must_use]
    pub fn new(id: ProductId, date_modified: DateMarker, product: Product) -> Self {
        Self {
            id,
            date_modified,
            name: product.name,
            description: product.description,
        }
    }

    /// The product fields carried by this item.
    #[must_use]
    pub fn product(&self) -> Product {
        Product::new(self.name.clone(), self.description.clone())
    }
}

/// Storage Key
///
/// `date_modified` is only present when the store addresses items by the
/// composite `(id, dateModified)` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub id: ProductId,
    pub date_modified: Option<DateMarker>,
}

impl ItemKey {
    #[must_use]
    pub fn simple(id: ProductId) -> Self {
        Self {
            id,
            date_modified: None,
        }
    }

    #[must_use]
    pub fn composite(id: ProductId, date_modified: DateMarker) -> Self {
        Self {
            id,
            date_modified: Some(date_modified),
        }
    }
}
