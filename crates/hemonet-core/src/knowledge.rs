//! Knowledge snapshot rendering and grounding-instruction construction.
//!
//! Pure functions: the fetched collections are serialized verbatim into one
//! grounding text, which is embedded exactly once into the assistant's fixed
//! system instructions at initialization. Nothing here is refreshed per
//! request.

use hemonet_types::knowledge::KnowledgeSnapshot;
use serde_json::Value;

/// Placeholder emitted for a record that cannot be serialized.
///
/// Partial grounding is preferable to no service, so a malformed record
/// never aborts startup.
const UNRENDERABLE_RECORD: &str = "{ \"unrenderable\": true }";

/// Rendering for a store with no collections at all.
const EMPTY_SNAPSHOT: &str = "(no records loaded)";

/// Render every fetched collection into one grounding text.
///
/// Deterministic and pure: collections appear in the order given, each as a
/// `## name` header followed by its records pretty-printed as a JSON array.
/// Arbitrary record shapes are rendered verbatim, without validation. An
/// empty collection renders as `[]`; a store with zero collections renders
/// as a fixed placeholder line.
pub fn render_collections(collections: &[(String, Vec<Value>)]) -> String {
    if collections.is_empty() {
        return EMPTY_SNAPSHOT.to_string();
    }

    let mut out = String::new();
    for (name, records) in collections {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str("## ");
        out.push_str(name);
        out.push('\n');
        out.push_str(&render_records(records));
    }
    out
}

/// Pretty-print one collection's records as a JSON array.
fn render_records(records: &[Value]) -> String {
    match serde_json::to_string_pretty(records) {
        Ok(json) => json,
        Err(_) => {
            // Fall back to per-record rendering so one bad record does not
            // take the whole collection with it.
            let rendered: Vec<String> = records
                .iter()
                .map(|r| {
                    serde_json::to_string_pretty(r)
                        .unwrap_or_else(|_| UNRENDERABLE_RECORD.to_string())
                })
                .collect();
            format!("[\n{}\n]", rendered.join(",\n"))
        }
    }
}

/// Build the fixed system instructions embedding the snapshot.
///
/// The wording follows the deployed health-network assistant: reliable
/// answers, verification reminder, plain-text presentation, record details
/// drawn only from the embedded database text.
pub fn grounding_instructions(snapshot: &KnowledgeSnapshot) -> String {
    format!(
        "You are a hospital assistant bot designed to provide hospital and \
         donor-related information.\n\
         \n\
         - Always provide accurate and reliable data, but remind users to \
         verify with the hospital.\n\
         - Present hospital and donor details in plain text format.\n\
         - Answer only from the record database below; if the records do not \
         cover a question, say so instead of guessing.\n\
         \n\
         Record database (loaded {loaded_at}):\n\
         \n\
         {records}",
        loaded_at = snapshot.loaded_at.to_rfc3339(),
        records = snapshot.rendered_text,
    )
}
