//! Context selection: the minimal slice of the store relevant to a category.
//!
//! The label table here is the single mapping from category keys to venue
//! tag labels. Classifiers only ever produce [`Category`] values; this module
//! turns them into data.

use crate::dataset::Dataset;
use crate::store::KnowledgeStore;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};
use tremitibot_core::Category;

/// Category key → venue tag labels. Also covers keys no classifier
/// produces (`trasporti`, `lidi`, `sport`) for direct `select_key` use.
const LABELS: &[(&str, &[&str])] = &[
    ("ristoranti", &["Ristoranti/pizzerie", "Bar", "Locali", "Gelaterie & Dolci"]),
    (
        "hotel",
        &["Hotel", "Albergo", "B&B", "Appartamenti & B&B", "Campeggi", "Residence"],
    ),
    (
        "escursioni",
        &["Escursioni", "Diving", "Noleggio Barche & Gommoni", "Noleggio SUP & canoe"],
    ),
    ("negozi", &["Negozi", "Made in Tremiti", "Alimentari", "Tabacchi"]),
    ("servizi", &["Servizi", "Taxi", "Notizie", "Meteo", "SPA"]),
    ("trasporti", &["Trasporti"]),
    ("lidi", &["Lidi"]),
    ("sport", &["Sport"]),
];

/// The tag labels accepted for a key. A key absent from the table is its own
/// sole label.
pub fn labels_for(key: &str) -> Vec<&str> {
    LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, labels)| labels.to_vec())
        .unwrap_or_else(|| vec![key])
}

/// Derives context slices from a shared store. Never mutates it.
#[derive(Debug, Clone)]
pub struct ContextSelector {
    store: Arc<KnowledgeStore>,
}

impl ContextSelector {
    pub fn new(store: Arc<KnowledgeStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Select the slice for a classified message. `None` means no slice.
    pub fn select(&self, category: Option<Category>) -> Option<Value> {
        let category = category?;
        match category {
            Category::Coves => self.store.get(Dataset::Coves).cloned(),
            Category::Ferries => Some(self.transport_composite()),
            Category::Taxi | Category::InterIsland => None,
            other => self.filter_venues(other.key()),
        }
    }

    /// Select by raw key. Recognized category keys behave like [`select`](Self::select);
    /// anything else filters venues on the key's labels.
    pub fn select_key(&self, key: &str) -> Option<Value> {
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        match Category::parse(&key) {
            Some(category) => self.select(Some(category)),
            None => self.filter_venues(&key),
        }
    }

    fn dataset_or_null(&self, dataset: Dataset) -> Value {
        self.store.get(dataset).cloned().unwrap_or(Value::Null)
    }

    /// Every transport dataset under its logical key.
    fn transport_composite(&self) -> Value {
        let composite: Map<String, Value> = Dataset::TRANSPORT
            .into_iter()
            .map(|d| (d.key().to_string(), self.dataset_or_null(d)))
            .collect();
        Value::Object(composite)
    }

    /// Venues carrying at least one tag whose label is in the key's label set.
    fn filter_venues(&self, key: &str) -> Option<Value> {
        let venues = match self.store.get(Dataset::Venues) {
            Some(v) => v,
            None => {
                debug!(key, "No venues dataset loaded");
                return None;
            }
        };

        let Some(items) = venues.as_array() else {
            warn!(key, kind = json_kind(venues), "Venues dataset is not an array");
            return None;
        };

        let wanted: Vec<String> = labels_for(key).iter().map(|l| l.to_lowercase()).collect();
        let matched: Vec<Value> = items
            .iter()
            .filter(|venue| venue_matches(venue, &wanted))
            .cloned()
            .collect();

        debug!(key, matched = matched.len(), total = items.len(), "Venues filtered");
        // an empty match is still a slice: the prompt embeds `[]`
        Some(Value::Array(matched))
    }
}

fn venue_matches(venue: &Value, wanted: &[String]) -> bool {
    venue
        .get("category")
        .and_then(Value::as_array)
        .is_some_and(|tags| {
            tags.iter()
                .filter_map(tag_label)
                .any(|label| wanted.contains(&label.to_lowercase()))
        })
}

/// Resolve a tag's label: `tag.category.category`, or `tag.category` when it
/// is a plain string.
fn tag_label(tag: &Value) -> Option<&str> {
    match tag.get("category")? {
        Value::String(s) => Some(s.as_str()),
        Value::Object(inner) => inner.get("category").and_then(Value::as_str),
        _ => None,
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn venue(id: u32, labels: &[&str]) -> Value {
        let tags: Vec<Value> = labels
            .iter()
            .map(|l| json!({"id": 100 + id, "category": {"category": l}}))
            .collect();
        json!({"id": id, "title": format!("venue {id}"), "category": tags})
    }

    fn sample_store() -> Arc<KnowledgeStore> {
        Arc::new(KnowledgeStore::from_documents([
            (Dataset::FastFerry, json!({"compagnia": "NLG", "corse": []})),
            (Dataset::Ship, json!({"compagnia": "NLG"})),
            (Dataset::AltFerry, json!({"compagnia": "GS Travel"})),
            (Dataset::Helicopter, json!({"compagnia": "Alidaunia"})),
            (Dataset::ViesteFerry, json!({"compagnia": "NLG"})),
            (Dataset::Coves, json!([{"name": "Cala delle Arene"}, {"name": "Cala Matano"}])),
            (
                Dataset::Venues,
                json!([
                    venue(1, &["Ristoranti/pizzerie"]),
                    venue(2, &["hotel"]),
                    venue(3, &["Bar", "Locali"]),
                    venue(4, &["Diving"]),
                    venue(5, &["Lidi"]),
                    {"id": 6, "title": "senza tag"},
                    {"id": 7, "category": [{"category": "Sport"}]},
                ]),
            ),
        ]))
    }

    fn ids(v: &Value) -> Vec<u64> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|x| x["id"].as_u64().unwrap())
            .collect()
    }

    #[test]
    fn none_selects_nothing() {
        let selector = ContextSelector::new(sample_store());
        assert!(selector.select(None).is_none());
    }

    #[test]
    fn coves_returns_whole_dataset() {
        let store = sample_store();
        let selector = ContextSelector::new(store.clone());
        let slice = selector.select(Some(Category::Coves)).unwrap();
        assert_eq!(&slice, store.get(Dataset::Coves).unwrap());
    }

    #[test]
    fn ferries_returns_five_key_composite() {
        let selector = ContextSelector::new(sample_store());
        let slice = selector.select(Some(Category::Ferries)).unwrap();
        let obj = slice.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["elicottero", "gargano", "jet", "nave", "zenit"]);
        assert!(obj["gargano"].is_null());
        assert!(!obj.contains_key("vieste"));
    }

    #[test]
    fn taxi_and_inter_island_need_no_data() {
        let selector = ContextSelector::new(sample_store());
        assert!(selector.select(Some(Category::Taxi)).is_none());
        assert!(selector.select(Some(Category::InterIsland)).is_none());
    }

    #[test]
    fn venue_filter_is_case_insensitive() {
        let selector = ContextSelector::new(sample_store());
        assert_eq!(ids(&selector.select(Some(Category::Restaurants)).unwrap()), vec![1, 3]);
        assert_eq!(ids(&selector.select(Some(Category::Lodging)).unwrap()), vec![2]);
    }

    #[test]
    fn venue_filter_is_idempotent() {
        let selector = ContextSelector::new(sample_store());
        let once = selector.select(Some(Category::Excursions)).unwrap();
        let again = selector.select(Some(Category::Excursions)).unwrap();
        assert_eq!(once, again);
        assert_eq!(ids(&once), vec![4]);
    }

    #[test]
    fn unknown_key_is_its_own_label() {
        let selector = ContextSelector::new(sample_store());
        assert_eq!(ids(&selector.select_key("lidi").unwrap()), vec![5]);
        assert_eq!(labels_for("parcheggi"), vec!["parcheggi"]);
        assert_eq!(selector.select_key("parcheggi"), Some(json!([])));
    }

    #[test]
    fn string_tag_labels_resolve() {
        let selector = ContextSelector::new(sample_store());
        assert_eq!(ids(&selector.select_key("sport").unwrap()), vec![7]);
    }

    #[test]
    fn empty_filter_yields_empty_slice() {
        let selector = ContextSelector::new(sample_store());
        assert_eq!(selector.select(Some(Category::Shops)), Some(json!([])));
    }

    #[test]
    fn malformed_venues_yield_no_slice() {
        let store = Arc::new(KnowledgeStore::from_documents([(
            Dataset::Venues,
            json!({"not": "a list"}),
        )]));
        let selector = ContextSelector::new(store);
        assert!(selector.select(Some(Category::Restaurants)).is_none());
    }

    #[test]
    fn select_never_mutates_store() {
        let store = sample_store();
        let before = store.get(Dataset::Venues).cloned();
        let selector = ContextSelector::new(store.clone());
        let _ = selector.select(Some(Category::Restaurants));
        assert_eq!(store.get(Dataset::Venues).cloned(), before);
    }
}
