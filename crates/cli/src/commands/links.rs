//! `tremitibot links`: add a deep-link field to a JSON dataset file.

use std::path::{Path, PathBuf};
use tremitibot_config::AppConfig;
use tremitibot_knowledge::LinkAnnotator;

pub fn run(
    input: &Path,
    output: Option<PathBuf>,
    prefix: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let prefix = prefix.unwrap_or_else(|| config.knowledge.link_prefix.clone());
    let output = output.unwrap_or_else(|| default_output(input));

    let content = std::fs::read_to_string(input)
        .map_err(|e| format!("Failed to read {}: {e}", input.display()))?;
    let mut document: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid JSON in {}: {e}", input.display()))?;

    let annotator = LinkAnnotator::new(config.knowledge.link_base_url.as_str(), prefix.as_str());
    let count = annotator.annotate_in_place(&mut document);

    std::fs::write(&output, serde_json::to_string_pretty(&document)?)?;
    tracing::info!(input = %input.display(), output = %output.display(), prefix = %prefix, count, "Links added");
    println!("✅ {count} link(s) written to {}", output.display());

    Ok(())
}

/// `venues.json` → `venues_processed.json`, next to the input.
///
/// Built from the file stem, so an input without a `.json` extension never
/// resolves to the input path itself.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".into());
    input.with_file_name(format!("{stem}_processed.json"))
}
