//! The fixed set of datasets that make up the knowledge base.

use serde::{Deserialize, Serialize};

/// A logical dataset. Each maps to one `json_<key>.json` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dataset {
    /// NLG fast ferry ("jet")
    #[serde(rename = "jet")]
    FastFerry,
    /// NLG ship Santa Lucia
    #[serde(rename = "nave")]
    Ship,
    /// Navitremiti, from the Gargano ports
    #[serde(rename = "gargano")]
    MainlandFerry,
    /// Zenit (GS Travel)
    #[serde(rename = "zenit")]
    AltFerry,
    /// Alidaunia helicopter from Foggia
    #[serde(rename = "elicottero")]
    Helicopter,
    /// NLG route from Vieste; only used in the unfiltered fallback
    #[serde(rename = "vieste")]
    ViesteFerry,
    #[serde(rename = "cale")]
    Coves,
    #[serde(rename = "pagine")]
    Venues,
}

impl Dataset {
    /// Every dataset, in the order the full fallback lists them.
    pub const ALL: [Dataset; 8] = [
        Dataset::FastFerry,
        Dataset::Ship,
        Dataset::MainlandFerry,
        Dataset::AltFerry,
        Dataset::Helicopter,
        Dataset::ViesteFerry,
        Dataset::Coves,
        Dataset::Venues,
    ];

    /// The transport datasets aggregated for ferry questions.
    pub const TRANSPORT: [Dataset; 5] = [
        Dataset::FastFerry,
        Dataset::Ship,
        Dataset::MainlandFerry,
        Dataset::AltFerry,
        Dataset::Helicopter,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Dataset::FastFerry => "jet",
            Dataset::Ship => "nave",
            Dataset::MainlandFerry => "gargano",
            Dataset::AltFerry => "zenit",
            Dataset::Helicopter => "elicottero",
            Dataset::ViesteFerry => "vieste",
            Dataset::Coves => "cale",
            Dataset::Venues => "pagine",
        }
    }

    /// File name inside the data directory.
    pub fn file_name(self) -> String {
        format!("json_{}.json", self.key())
    }

    /// Optional datasets are expected to be missing in some deployments.
    pub fn is_optional(self) -> bool {
        matches!(self, Dataset::ViesteFerry)
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_key() {
        assert_eq!(Dataset::FastFerry.file_name(), "json_jet.json");
        assert_eq!(Dataset::Venues.file_name(), "json_pagine.json");
    }

    #[test]
    fn transport_excludes_vieste() {
        assert!(!Dataset::TRANSPORT.contains(&Dataset::ViesteFerry));
        assert!(Dataset::ViesteFerry.is_optional());
        assert!(!Dataset::Coves.is_optional());
    }
}
