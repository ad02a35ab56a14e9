//! Deep-link annotation.
//!
//! Every JSON object carrying an `id` gets a `link` field pointing at the
//! app page for that id: `<base_url>/<base64("<prefix>/<id>")>`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://tremitinow.it";
pub const DEFAULT_PREFIX: &str = "page";

#[derive(Debug, Clone)]
pub struct LinkAnnotator {
    base_url: String,
    prefix: String,
}

impl Default for LinkAnnotator {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_PREFIX)
    }
}

impl LinkAnnotator {
    pub fn new(base_url: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            prefix: prefix.into(),
        }
    }

    /// The link for a single id.
    pub fn link_for(&self, id: &Value) -> String {
        let id = match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let encoded = STANDARD.encode(format!("{}/{}", self.prefix, id));
        format!("{}/{}", self.base_url, encoded)
    }

    /// Add links in place. Returns the number of objects annotated.
    pub fn annotate_in_place(&self, value: &mut Value) -> usize {
        match value {
            Value::Array(items) => items.iter_mut().map(|v| self.annotate_in_place(v)).sum(),
            Value::Object(map) => {
                let mut count = 0;
                if let Some(id) = map.get("id") {
                    let link = self.link_for(id);
                    map.insert("link".into(), Value::String(link));
                    count += 1;
                }
                for (key, child) in map.iter_mut() {
                    if key != "link" {
                        count += self.annotate_in_place(child);
                    }
                }
                count
            }
            _ => 0,
        }
    }
}
