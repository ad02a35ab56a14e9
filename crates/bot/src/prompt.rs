//! Instruction block assembly.
//!
//! The block is a pure function of `(category, store, today)`:
//!
//! 1. Role framing and relative-date guidance anchored to `today`
//! 2. Place-name normalization
//! 3. Ferry timetable policy and booking links
//! 4. Fixed taxi and inter-island answers
//! 5. Cove and beach policy
//! 6. The "not enough information" answer
//! 7. The selected data slice, or every dataset when there is none
//!
//! A fixed notes section closes the block.

use crate::dates::{RelativeDates, format_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tremitibot_core::Category;
use tremitibot_core::message::Turn;
use tremitibot_knowledge::{ContextSelector, Dataset, KnowledgeStore};

/// What the generation call receives for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptBundle {
    pub system_instructions: String,
    pub turns: Vec<Turn>,
}

pub const TAXI_TEMPLATE: &str = "\
> Il servizio taxi è garantito da 2 navette private che si trovano sul porto al vostro arrivo.
> I contatti sono i seguenti:
> - [Tommaso](https://tremitinow.it/cGFnZS8xMDk=)
> - [Fabio](https://tremitinow.it/cGFnZS8xMDg=)";

pub const INTER_ISLAND_TEMPLATE: &str = "\
> Per raggiungere l'altra isola (San Nicola da San Domino o viceversa), puoi utilizzare i traghetti interni che collegano le due isole principali delle Tremiti.
> Ti consiglio di consultare l'app al seguente link per visualizzare gli orari aggiornati, inclusi quelli notturni:
> <a href='https://tremitinow.it/cGFnZS82'>Clicca qui per più info</a>";

pub const INSUFFICIENT_INFO_TEMPLATE: &str = "Non ho abbastanza informazioni per rispondere con precisione alla tua domanda. Ti consiglio di chiedere info a <a href='https://tremitinow.it/cGFnZS82Mw=='>Fuffy</a>.";

pub const NO_RIDES_TEMPLATE: &str =
    "In data [DATA], non ci sono corse disponibili da [ORIGINE] a [DESTINAZIONE].";

const ROLE: &str = "Sei un assistente che aiuta le persone a trovare informazioni sui traghetti per le Isole Tremiti e altri servizi utili, come taxi, cale, collegamenti interni, attività da fare o spiagge.";

const NORMALIZATION: &str = "\
### 🚢 1. Normalizzazione e interpretazione

- Sostituisci automaticamente \"San Domino\", \"San Nicola\" o \"Tremiti\" con \"Isole Tremiti\".
- Tratta \"Isole Tremiti\" come destinazione unica per tutte le compagnie.
- Se l'utente indica solo **una località** (es. \"per Tremiti\"), assumi che l'altra sia la **terraferma**.
- Se l'utente indica **Termoli**, **Vieste**, **Rodi**, **Peschici** o **Foggia**, usali come punto di partenza o arrivo a seconda del contesto linguistico.
- Se non è chiaro da dove parte o dove va, chiedi gentilmente di chiarire la direzione della tratta.";

const BOOKING_LINKS: &str = "\
📎 Link prenotazione (da usare in base alla compagnia):
- JET / NAVE NLG: <a href=\"https://tremitinow.it/cGFnZS8xMA==\">Clicca qui per prenotare o saperne di più</a>
- Navitremiti (Gargano): <a href=\"https://tremitinow.it/cGFnZS8zOA==\">Clicca qui per prenotare o saperne di più</a>
- Zenit (GS Travel): <a href=\"https://tremitinow.it/cGFnZS85\">Clicca qui per prenotare o saperne di più</a>
- Elicottero (Foggia): <a href=\"https://tremitinow.it/cGFnZS81\">Clicca qui per prenotare o saperne di più</a>";

const COVES_POLICY: &str = "\
### 🏖 5. Cale e spiagge

Se l'utente chiede informazioni su cale, lidi o spiagge:

1. Usa i dati JSON forniti.
2. Mostra massimo 10 risultati, dando priorità a:
   - Cale di **San Domino**
   - Cale che hanno almeno **una foto**
3. Per ogni cala, includi una breve descrizione (se disponibile) e **una sola immagine** nel tag <img> presa da \"bay_info.bays_photos.media\".";

const CLOSING_NOTES: &str = "\
> Esiste anche una mappa dell'arcipelago interattiva. Basta andare nel menu principale dell'app e cliccare su \"Mappa\": la mappa comprende anche i percorsi e sentieri da fare a piedi e i tragitti per raggiungere le cale e le spiagge.
> Se ti chiedono percorsi per visitare le isole (San Domino e San Nicola), rispondi che esiste la mappa sull'app che comprende anche i percorsi e sentieri da fare a piedi e i tragitti per raggiungere le cale e le spiagge.
> Se ti chiedono dove si trovano alcune cale, fai riferimento al JSON delle cale e rispondi con la cala che più assomiglia alla richiesta: suggerisci anche il \"clicca qui\" per andare alla pagina di dettaglio della cala.
> Se ti chiedono gli orari della Conad o del supermercato vai alla pagina \"conad\".
> Se ti chiedono info sulle spiagge? Cala delle arene o cala matano (aggiungi i link alle cale).
> Se ti chiedono dov'è la biblioteca, rispondi che sta a San Domino prima della discesa in Via Federico II.
> Se ti chiedono qualcosa come Appartamenti in affitto oppure Casa vacanze fai riferimento al JSON_PAGINE cercando dove dormire.";

const SEPARATOR: &str = "\n\n---\n\n";

/// Heading used for a dataset in the unfiltered fallback.
fn fallback_heading(dataset: Dataset) -> &'static str {
    match dataset {
        Dataset::FastFerry => "JET (compagnia NLG)",
        Dataset::Ship => "NAVE Santa Lucia (compagnia NLG)",
        Dataset::MainlandFerry => "Navitremiti (proviene dai porti del Gargano)",
        Dataset::AltFerry => "Zenit (compagnia GS Travel)",
        Dataset::Helicopter => "Elicottero (compagnia Alidaunia)",
        Dataset::ViesteFerry => "Traghetto da Vieste alle Tremiti (compagnia NLG)",
        Dataset::Coves => "Cale e spiagge",
        Dataset::Venues => "Attività da fare (es: Ristoranti, Noleggio gommoni, Escursioni)",
    }
}

/// Builds instruction blocks over a shared knowledge store.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    selector: ContextSelector,
}

impl PromptAssembler {
    pub fn new(store: Arc<KnowledgeStore>) -> Self {
        Self {
            selector: ContextSelector::new(store),
        }
    }

    pub fn selector(&self) -> &ContextSelector {
        &self.selector
    }

    /// Compose the full instruction block for `category` as of `today`.
    pub fn build_instructions(&self, category: Option<Category>, today: NaiveDate) -> String {
        let mut out = String::with_capacity(16 * 1024);

        out.push_str(ROLE);
        out.push_str("\n\n");
        out.push_str(&date_guidance(today));
        out.push_str(SEPARATOR);
        out.push_str(NORMALIZATION);
        out.push_str(SEPARATOR);
        out.push_str(&ferry_policy());
        out.push_str(SEPARATOR);
        out.push_str(&format!(
            "### 🚖 3. Taxi\n\nSe l'utente chiede informazioni sui taxi:\n\n{TAXI_TEMPLATE}\n\n- Rispondi in **Markdown** con elenco puntato.\n- Usa **solo il nome cliccabile**, senza duplicare il nome in chiaro."
        ));
        out.push_str(SEPARATOR);
        out.push_str(&format!(
            "### 🚤 4. Collegamenti interni tra San Domino e San Nicola\n\nSe l'utente chiede dei collegamenti tra le isole:\n\n{INTER_ISLAND_TEMPLATE}"
        ));
        out.push_str(SEPARATOR);
        out.push_str(COVES_POLICY);
        out.push_str(SEPARATOR);
        out.push_str(&format!(
            "### ❓ 6. Mancanza di dati\n\nSe non riesci a rispondere a una richiesta, scrivi qualcosa come:\n\n{INSUFFICIENT_INFO_TEMPLATE}"
        ));
        out.push_str(SEPARATOR);
        out.push_str("### 📦 Dati JSON disponibili\n\nEcco i dati che puoi usare:\n\n");

        match category.and_then(|c| self.selector.select(Some(c)).map(|slice| (c, slice))) {
            Some((category, slice)) => {
                out.push_str(&format!("- Dati rilevanti per \"{}\":\n  {}", category.key(), slice));
            }
            None => self.write_full_store(&mut out),
        }

        out.push_str("\n\n");
        out.push_str(CLOSING_NOTES);
        out
    }

    /// Every dataset under its heading; absent ones as `null`.
    fn write_full_store(&self, out: &mut String) {
        let store = self.selector.store();
        let sections: Vec<String> = Dataset::ALL
            .into_iter()
            .map(|dataset| {
                let body = store
                    .get(dataset)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "null".to_string());
                format!("- {}:\n  {}", fallback_heading(dataset), body)
            })
            .collect();
        out.push_str(&sections.join("\n\n"));
    }
}

fn date_guidance(today: NaiveDate) -> String {
    let dates = RelativeDates::from_today(today);
    format!(
        "IMPORTANTE: Quando l'utente usa parole come \"oggi\", \"domani\", \"dopodomani\", \"lunedì\", \"martedì\", ecc., calcola la data corretta in modo dinamico basandoti sulla data attuale di OGGI. Vai subito al punto con le informazioni richieste senza spiegare i calcoli. NON dire mai frasi come \"Per fornirti informazioni precise\", \"ho bisogno di calcolare\", \"Ecco gli orari disponibili per [data]\".\n\
IMPORTANTE: La data attuale è {}.\n\
- oggi = {}\n\
- domani = {}\n\
- dopodomani = {}",
        format_date(dates.today),
        format_date(dates.today),
        format_date(dates.tomorrow),
        format_date(dates.day_after_tomorrow),
    )
}

fn ferry_policy() -> String {
    format!(
        "### 📆 2. Orari traghetti\n\n\
Se l'utente chiede orari per una certa data, DEVI:\n\n\
1. **Calcola la data corretta** se l'utente dice \"domani\", \"dopodomani\", \"lunedì\", ecc.\n\
2. Cercare **tutte** le tratte disponibili per quella data e direzione:\n   \
- JET NLG\n   \
- NAVE NLG\n   \
- Navitremiti (Gargano)\n   \
- Zenit (GS Travel)\n   \
- Elicottero (Foggia)\n\
3. Mostrare tutte le opzioni disponibili in una **singola risposta** in formato Markdown con elenco puntato.\n\
4. Se una tratta è **fuori stagione** o non disponibile, dillo chiaramente.\n\
5. Se **nessuna corsa** è disponibile, scrivi:\n   \
> \"{NO_RIDES_TEMPLATE}\"\n\
6. Non limitarti alla prima compagnia trovata: esamina tutti i JSON disponibili.\n\
7. Se l'utente ti chiede info sul collegamento tra Termoli e Tremiti o viceversa con partenza entro il 2 giugno 2025, sappi che ci sono corse aggiuntive extra non catalogate nel DB.\n\
Devi suggerire all'utente di controllare manualmente la pagina interna all'app di NLG cliccando qui: \"https://tremitinow.it/cGFnZS8xMA==\"\n\n\
{BOOKING_LINKS}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()
    }

    fn store() -> Arc<KnowledgeStore> {
        Arc::new(KnowledgeStore::from_documents([
            (Dataset::FastFerry, json!({"marker": "JET_DATA"})),
            (Dataset::Ship, json!({"marker": "NAVE_DATA"})),
            (Dataset::MainlandFerry, json!({"marker": "GARGANO_DATA"})),
            (Dataset::AltFerry, json!({"marker": "ZENIT_DATA"})),
            (Dataset::Helicopter, json!({"marker": "ELI_DATA"})),
            (Dataset::Coves, json!([{"marker": "CALE_DATA"}])),
            (
                Dataset::Venues,
                json!([{"marker": "PAGINE_DATA", "category": [{"category": {"category": "Bar"}}]}]),
            ),
        ]))
    }

    fn build(category: Option<Category>) -> String {
        PromptAssembler::new(store()).build_instructions(category, today())
    }

    #[test]
    fn fixed_templates_present_for_every_category() {
        let mut cases: Vec<Option<Category>> = Category::ALL.into_iter().map(Some).collect();
        cases.push(None);

        for category in cases {
            let text = build(category);
            assert!(text.contains(TAXI_TEMPLATE), "{category:?}");
            assert!(text.contains(INTER_ISLAND_TEMPLATE), "{category:?}");
            assert!(text.contains(INSUFFICIENT_INFO_TEMPLATE), "{category:?}");
            assert!(text.contains(NO_RIDES_TEMPLATE), "{category:?}");
            assert!(text.ends_with(CLOSING_NOTES), "{category:?}");
        }
    }

    #[test]
    fn dates_are_anchored_to_today() {
        let text = build(None);
        assert!(text.contains("La data attuale è 10/07/2025."));
        assert!(text.contains("- domani = 11/07/2025"));
        assert!(text.contains("- dopodomani = 12/07/2025"));
    }

    #[test]
    fn coves_embed_only_coves() {
        let text = build(Some(Category::Coves));
        assert!(text.contains("- Dati rilevanti per \"cale\":"));
        assert!(text.contains("CALE_DATA"));
        assert!(!text.contains("PAGINE_DATA"));
        assert!(!text.contains("JET_DATA"));
    }

    #[test]
    fn ferries_embed_transport_composite() {
        let text = build(Some(Category::Ferries));
        assert!(text.contains("- Dati rilevanti per \"traghetti\":"));
        for marker in ["JET_DATA", "NAVE_DATA", "GARGANO_DATA", "ZENIT_DATA", "ELI_DATA"] {
            assert!(text.contains(marker), "{marker}");
        }
        assert!(!text.contains("CALE_DATA"));
        assert!(!text.contains("PAGINE_DATA"));
    }

    #[test]
    fn no_category_embeds_everything() {
        let text = build(None);
        assert!(!text.contains("Dati rilevanti per"));
        for marker in ["JET_DATA", "NAVE_DATA", "CALE_DATA", "PAGINE_DATA"] {
            assert!(text.contains(marker), "{marker}");
        }
        assert!(text.contains("- Traghetto da Vieste alle Tremiti (compagnia NLG):\n  null"));
    }

    #[test]
    fn taxi_falls_back_to_full_store() {
        let text = build(Some(Category::Taxi));
        assert!(!text.contains("Dati rilevanti per"));
        assert!(text.contains("- JET (compagnia NLG):"));
    }

    #[test]
    fn empty_venue_filter_embeds_empty_list() {
        let text = build(Some(Category::Shops));
        assert!(text.contains("- Dati rilevanti per \"negozi\":\n  []"));
        assert!(!text.contains("PAGINE_DATA"));
        assert!(!text.contains("JET_DATA"));
    }

    #[test]
    fn venue_category_embeds_filtered_venues() {
        let text = build(Some(Category::Restaurants));
        assert!(text.contains("- Dati rilevanti per \"ristoranti\":"));
        assert!(text.contains("PAGINE_DATA"));
        assert!(!text.contains("CALE_DATA"));
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(build(Some(Category::Ferries)), build(Some(Category::Ferries)));
    }

    #[test]
    fn fallback_order_is_fixed() {
        let text = build(None);
        let positions: Vec<usize> = Dataset::ALL
            .into_iter()
            .map(|d| text.find(&format!("- {}:", fallback_heading(d))).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }
}
