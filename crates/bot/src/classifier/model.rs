//! Zero-shot classification through the generation service.

use super::{Classifier, mentions_cove};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use tremitibot_core::message::Turn;
use tremitibot_core::provider::{ModelParameters, ProviderRequest};
use tremitibot_core::{Category, Provider};

/// Instructions for the classification call.
pub const CLASSIFICATION_PROMPT: &str = r#"Sei un classificatore di domande per un assistente delle Isole Tremiti.

Analizza la domanda dell'utente e restituisci UNA SOLA categoria tra quelle disponibili.

Categorie disponibili:
- ristoranti: domande su mangiare, ristoranti, pizzerie, bar, cena, pranzo, gelaterie, gelato, dolci, locali
- hotel: domande su dormire, hotel, albergo, b&b, alloggio, appartamento, casa vacanze, residence, campeggio
- escursioni: domande su escursioni, tour, gite, barca, diving, sub, noleggio, gommone, sup, canoa
- cale: domande su spiagge, mare, bagno, lido, baia (PRIORITÀ ASSOLUTA se contiene "cala" o "cale")
- traghetti: domande su traghetti, orari, partenza, arrivo, prenotazione, biglietto, jet, nave, zenit, elicottero
- taxi: domande su taxi, navetta, trasporto, porto
- collegamenti: domande su collegamenti interni, san domino, san nicola, tra isole
- negozi: domande su negozi, shopping, alimentari, tabacchi, made in tremiti
- servizi: domande su servizi, meteo, notizie, spa, biblioteca, conad, supermercato

Regole:
1. Se la domanda contiene "cala" o "cale", restituisci SEMPRE "cale"
2. Se la domanda contiene "come" e ("tremiti" o "isole"), restituisci "traghetti"
3. Restituisci solo il nome della categoria, senza virgolette o altri caratteri
4. Se non trovi corrispondenze, restituisci "null"

Esempi:
- "Dove posso mangiare?" → ristoranti
- "Hotel a San Domino" → hotel
- "Orari traghetti per domani" → traghetti
- "Cala delle Arene" → cale
- "Taxi dal porto" → taxi
- "Come arrivare alle Tremiti" → traghetti

Rispondi solo con il nome della categoria."#;

/// Classifies with one short, low-temperature call.
///
/// The cove rule is applied locally and skips the call. Call failures and
/// unrecognized answers yield `None`.
pub struct ModelClassifier {
    provider: Arc<dyn Provider>,
    params: ModelParameters,
}

impl ModelClassifier {
    pub fn new(provider: Arc<dyn Provider>, params: ModelParameters) -> Self {
        Self { provider, params }
    }

    /// Parse the first non-empty line of the answer.
    pub fn parse_answer(answer: &str) -> Option<Category> {
        answer
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .and_then(Category::parse)
    }
}

#[async_trait]
impl Classifier for ModelClassifier {
    fn name(&self) -> &str {
        "model"
    }

    async fn classify(&self, text: &str) -> Option<Category> {
        if mentions_cove(&text.to_lowercase()) {
            return Some(Category::Coves);
        }

        let request = ProviderRequest {
            system: CLASSIFICATION_PROMPT.to_string(),
            turns: vec![Turn::user(text)],
            params: self.params.clone(),
        };

        match self.provider.complete(request).await {
            Ok(response) => {
                let category = Self::parse_answer(&response.text);
                debug!(answer = %response.text.trim(), category = ?category, "Model classification");
                category
            }
            Err(e) => {
                warn!(provider = %self.provider.name(), error = %e, "Classification call failed, continuing without category");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FailingProvider, ScriptedProvider};

    fn params() -> ModelParameters {
        ModelParameters {
            model: "claude-3-haiku-20240307".into(),
            max_tokens: 50,
            temperature: 0.1,
            top_p: 0.9,
        }
    }

    #[test]
    fn parse_answer_variants() {
        assert_eq!(ModelClassifier::parse_answer("traghetti"), Some(Category::Ferries));
        assert_eq!(ModelClassifier::parse_answer("  Hotel\n"), Some(Category::Lodging));
        assert_eq!(ModelClassifier::parse_answer("\n\ncale\nperché..."), Some(Category::Coves));
        assert_eq!(ModelClassifier::parse_answer("null"), None);
        assert_eq!(ModelClassifier::parse_answer("none"), None);
        assert_eq!(ModelClassifier::parse_answer(""), None);
        assert_eq!(ModelClassifier::parse_answer("parcheggi"), None);
    }

    #[tokio::test]
    async fn one_call_with_classification_prompt() {
        let provider = Arc::new(ScriptedProvider::texts(&["taxi"]));
        let classifier = ModelClassifier::new(provider.clone(), params());

        assert_eq!(classifier.classify("Come mi muovo dal porto?").await, Some(Category::Taxi));
        assert_eq!(provider.call_count(), 1);

        let request = provider.last_request().unwrap();
        assert_eq!(request.system, CLASSIFICATION_PROMPT);
        assert_eq!(request.params.max_tokens, 50);
        assert_eq!(request.turns.len(), 1);
    }

    #[tokio::test]
    async fn cove_rule_skips_the_call() {
        let provider = Arc::new(ScriptedProvider::texts(&[]));
        let classifier = ModelClassifier::new(provider.clone(), params());

        assert_eq!(classifier.classify("Cala delle Arene").await, Some(Category::Coves));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn failure_degrades_to_none() {
        let classifier = ModelClassifier::new(Arc::new(FailingProvider::network()), params());
        assert_eq!(classifier.classify("Orari traghetti").await, None);
    }

    #[tokio::test]
    async fn unknown_answer_is_none() {
        let provider = Arc::new(ScriptedProvider::texts(&["meteo"]));
        let classifier = ModelClassifier::new(provider, params());
        assert_eq!(classifier.classify("Che tempo fa?").await, None);
    }
}
