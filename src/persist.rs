//! Persistence payloads for saved graphs.
//!
//! A saved graph is stored as the literal equation text, the color token and
//! a PNG snapshot of the chart. On the wire the snapshot travels as a
//! `data:image/png;base64,...` URL under the `graphImage` key. Loading yields
//! summaries that are listed by equation and never re-parsed.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::Result;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A graph ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGraph {
    /// Equation text exactly as entered.
    pub equation: String,
    /// Color token exactly as entered.
    pub color: String,
    /// PNG bytes of the chart.
    #[serde(rename = "graphImage", with = "data_url")]
    pub image_png: Vec<u8>,
}

impl SavedGraph {
    /// Bundle a snapshot with the request that produced it.
    #[must_use]
    pub fn new(equation: impl Into<String>, color: impl Into<String>, image_png: Vec<u8>) -> Self {
        Self { equation: equation.into(), color: color.into(), image_png }
    }

    /// The snapshot as a PNG data URL.
    #[must_use]
    pub fn image_data_url(&self) -> String {
        data_url::encode(&self.image_png)
    }

    /// Serialize as the `{ equation, color, graphImage }` payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a `{ equation, color, graphImage }` payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] on malformed JSON or an image
    /// that is not a base64 PNG data URL.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One entry of the saved-graph listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGraphSummary {
    /// Storage identifier.
    pub id: u64,
    /// Equation text as it was saved.
    pub equation: String,
}

impl SavedGraphSummary {
    /// Text shown for this entry in a selection list.
    #[must_use]
    pub fn display_label(&self) -> String {
        format!("Equation: {}", self.equation)
    }
}

/// The saved graphs of one user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedGraphListing {
    /// Owner of the graphs.
    #[serde(default)]
    pub username: String,
    /// Saved graphs, in storage order.
    #[serde(default)]
    pub graphs: Vec<SavedGraphSummary>,
}

impl SavedGraphListing {
    /// Parse a `{ username, graphs: [{ id, equation, .. }] }` listing.
    /// Fields other than `id` and `equation` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Selection labels in listing order, keyed by id.
    #[must_use]
    pub fn options(&self) -> Vec<(u64, String)> {
        self.graphs.iter().map(|g| (g.id, g.display_label())).collect()
    }
}

mod data_url {
    use super::{Engine, DATA_URL_PREFIX, STANDARD};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub(super) fn encode(bytes: &[u8]) -> String {
        format!("{DATA_URL_PREFIX}{}", STANDARD.encode(bytes))
    }

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode(bytes))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let url = String::deserialize(deserializer)?;
        let payload = url
            .strip_prefix(DATA_URL_PREFIX)
            .ok_or_else(|| de::Error::custom("expected a base64 PNG data URL"))?;
        STANDARD.decode(payload).map_err(de::Error::custom)
    }
}
