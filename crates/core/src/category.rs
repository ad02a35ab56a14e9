//! The closed set of knowledge categories a user message can belong to.
//!
//! Classification never produces anything outside this enumeration; "no
//! category" is modelled as `Option::<Category>::None` by callers.

use serde::{Deserialize, Serialize};

/// What kind of information a user is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "ristoranti")]
    Restaurants,
    #[serde(rename = "hotel")]
    Lodging,
    #[serde(rename = "escursioni")]
    Excursions,
    #[serde(rename = "cale")]
    Coves,
    #[serde(rename = "traghetti")]
    Ferries,
    #[serde(rename = "taxi")]
    Taxi,
    #[serde(rename = "collegamenti")]
    InterIsland,
    #[serde(rename = "negozi")]
    Shops,
    #[serde(rename = "servizi")]
    Services,
}

impl Category {
    /// Every category, in classification priority order.
    pub const ALL: [Category; 9] = [
        Category::Restaurants,
        Category::Lodging,
        Category::Excursions,
        Category::Coves,
        Category::Ferries,
        Category::Taxi,
        Category::InterIsland,
        Category::Shops,
        Category::Services,
    ];

    /// The domain-language key used in prompts, label tables and model answers.
    pub fn key(self) -> &'static str {
        match self {
            Category::Restaurants => "ristoranti",
            Category::Lodging => "hotel",
            Category::Excursions => "escursioni",
            Category::Coves => "cale",
            Category::Ferries => "traghetti",
            Category::Taxi => "taxi",
            Category::InterIsland => "collegamenti",
            Category::Shops => "negozi",
            Category::Services => "servizi",
        }
    }

    /// English alias, accepted by [`Category::parse`].
    pub fn alias(self) -> &'static str {
        match self {
            Category::Restaurants => "restaurants",
            Category::Lodging => "lodging",
            Category::Excursions => "excursions",
            Category::Coves => "coves",
            Category::Ferries => "ferries",
            Category::Taxi => "taxi",
            Category::InterIsland => "inter-island",
            Category::Shops => "shops",
            Category::Services => "services",
        }
    }

    /// Parse a key or alias. Case, surrounding whitespace, quotes and
    /// trailing punctuation are ignored. Unknown input yields `None`.
    pub fn parse(raw: &str) -> Option<Category> {
        let cleaned = raw
            .trim()
            .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '.' | ',' | ':' | ';' | '*'))
            .trim()
            .to_lowercase();

        Category::ALL
            .into_iter()
            .find(|c| c.key() == cleaned || c.alias() == cleaned)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
