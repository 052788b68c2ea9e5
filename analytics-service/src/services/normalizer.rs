//! Normalization of the model's raw text output into a JSON payload.
//!
//! Models frequently wrap JSON in markdown code fences; those markers are
//! stripped before parsing. Parse failure is unrecoverable for the request.

use serde_json::Value;

/// Strip optional code-fence wrapping and parse the remaining text as JSON.
///
/// Fence markers are removed globally, not only at the boundaries, which
/// can corrupt widget content that itself contains a literal fence
/// sequence. Known fragility, kept for parity with the consuming front end.
pub fn extract_widget_payload(raw: &str) -> Result<Value, serde_json::Error> {
    let trimmed = raw.trim();

    let cleaned = if trimmed.starts_with("```json") {
        strip_markers(trimmed, &["```json\n", "```json", "```\n", "```"])
    } else if trimmed.starts_with("```") {
        strip_markers(trimmed, &["```\n", "```"])
    } else {
        trimmed.to_string()
    };

    serde_json::from_str(cleaned.trim())
}

fn strip_markers(text: &str, markers: &[&str]) -> String {
    let mut out = text.to_string();
    for marker in markers {
        out = out.replace(marker, "");
    }
    out
}
