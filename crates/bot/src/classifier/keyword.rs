//! Deterministic keyword classifier.

use super::{Classifier, mentions_cove};
use async_trait::async_trait;
use tremitibot_core::Category;

/// Ordered rules: the first category with any keyword contained in the
/// lower-cased message wins. Matching is substring containment.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::Restaurants,
        &[
            "mangiare", "ristorante", "ristoranti", "pizzeria", "bar", "cena", "pranzo",
            "gelateria", "gelato", "dolci", "locale",
        ],
    ),
    (
        Category::Lodging,
        &[
            "dormire", "hotel", "albergo", "b&b", "alloggio", "appartamento", "casa vacanze",
            "residence", "campeggio",
        ],
    ),
    (
        Category::Excursions,
        &[
            "escursione", "tour", "gita", "barca", "diving", "sub", "noleggio", "gommone", "sup",
            "canoa",
        ],
    ),
    (Category::Coves, &["spiaggia", "mare", "bagno", "lido", "baia"]),
    (
        Category::Ferries,
        &[
            "traghetto", "traghetti", "orari", "partenza", "arrivo", "prenotazione", "biglietto",
            "jet", "nave", "zenit", "elicottero",
        ],
    ),
    (Category::Taxi, &["taxi", "navetta", "trasporto", "porto"]),
    (
        Category::InterIsland,
        &["collegamento", "interno", "san domino", "san nicola", "tra isole"],
    ),
    (
        Category::Shops,
        &["negozio", "negozi", "shopping", "alimentari", "tabacchi", "made in tremiti"],
    ),
    (
        Category::Services,
        &[
            "servizio", "servizi", "meteo", "notizie", "spa", "biblioteca", "conad",
            "supermercato",
        ],
    ),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// The synchronous rule evaluation.
    pub fn classify_text(&self, text: &str) -> Option<Category> {
        let lower = text.to_lowercase();

        if mentions_cove(&lower) {
            return Some(Category::Coves);
        }

        if let Some((category, _)) = RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        {
            return Some(*category);
        }

        // "come si arriva alle Tremiti?"
        if lower.contains("come") && (lower.contains("tremiti") || lower.contains("isole")) {
            return Some(Category::Ferries);
        }

        None
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn classify(&self, text: &str) -> Option<Category> {
        self.classify_text(text)
    }
}
