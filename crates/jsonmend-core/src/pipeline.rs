//! The repair pipeline: a fixed sequence of pure text transforms, each
//! guarded by the same parseability predicate. First stage whose output the
//! strict parser accepts wins; if every stage fails, the terminal error
//! carries the parser's last diagnostic plus the flattened best-effort text.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::boundary::trim_to_boundary;
use crate::error::RepairError;
use crate::escape::escape_in_strings;
use crate::sanitize::{replace_slash_quote, sanitize_characters};
use crate::structural::repair_structure;

/// Shared predicate: does the strict parser accept this text as-is?
pub fn is_parseable(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

/// Outcome of [`try_repair`]: failure is a flag, never a panic or an error.
/// On failure `repaired` still holds the flattened best-effort text when one
/// was produced — check `success` before trusting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    pub success: bool,
    pub repaired: Option<String>,
    pub diagnostic: Option<String>,
}

fn strip_code_fences(text: &str) -> String {
    let mut t = text.trim();
    if let Some(rest) = t.strip_prefix("```") {
        let rest = rest.trim_start();
        let rest = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
        t = rest.trim_start();
    }
    if let Some(rest) = t.strip_suffix("```") {
        t = rest.trim_end();
    }
    t.to_string()
}

// Last resort, applied to the *original* input rather than intermediate
// text: every line-break variant becomes one space.
fn flatten_line_breaks(raw: &str) -> String {
    let flat = raw.replace("\r\n", " ").replace(['\n', '\r'], " ");
    replace_slash_quote(&flat)
}

fn won(stage: &str, text: String) -> Result<String, RepairError> {
    debug!(stage, "repair stage produced parseable text");
    Ok(text)
}

// Structural syntax repair delegates to the jsonrepair library; the
// internal battery backs it up when the library errors or emits text the
// strict parser still rejects.
fn repair_syntax(text: &str) -> String {
    if let Ok(fixed) = jsonrepair::repair_to_string(text, &jsonrepair::Options::default()) {
        if is_parseable(&fixed) {
            return fixed;
        }
    }
    repair_structure(text)
}

/// Repair `raw` into parseable JSON text.
///
/// Idempotent: already-valid input comes back byte-identical. Fails with
/// `InvalidInput` on empty/whitespace payloads, `NoBoundaryFound` when the
/// input contains no `{` or `[` at all, and `ParseFailure` once every stage
/// has been exhausted.
pub fn repair_to_text(raw: &str) -> Result<String, RepairError> {
    if raw.trim().is_empty() {
        return Err(RepairError::InvalidInput);
    }
    if is_parseable(raw) {
        return Ok(raw.to_string());
    }

    let mut current = strip_code_fences(raw);
    if is_parseable(&current) {
        return won("code_fence", current);
    }

    current = trim_to_boundary(&current)?.to_string();
    if is_parseable(&current) {
        return won("boundary", current);
    }

    // Escaper before sanitizer: the sanitizer deletes raw newlines, so a
    // recoverable in-string newline must be escaped first.
    current = escape_in_strings(&current);
    if is_parseable(&current) {
        return won("escape", current);
    }

    current = sanitize_characters(&current);
    if is_parseable(&current) {
        return won("sanitize", current);
    }

    current = repair_syntax(&current);
    if is_parseable(&current) {
        return won("structural", current);
    }

    let flattened = flatten_line_breaks(raw);
    if is_parseable(&flattened) {
        return won("flatten", flattened);
    }

    let retried = repair_syntax(&flattened);
    if is_parseable(&retried) {
        return won("flatten_structural", retried);
    }

    // One last parse purely for its error message.
    let message = match serde_json::from_str::<serde_json::Value>(&flattened) {
        Ok(_) => "parser accepted text it previously rejected".to_string(),
        Err(e) => e.to_string(),
    };
    Err(RepairError::ParseFailure { message, flattened })
}

/// Repair and deserialize in one step. `None` on repair failure or when the
/// repaired value has the wrong shape (expected an array, got an object...).
pub fn repair_to_value<T: DeserializeOwned>(raw: &str) -> Option<T> {
    match repair_to_text(raw) {
        Ok(text) => serde_json::from_str(&text).ok(),
        Err(e) => {
            debug!(error = %e, "repair failed");
            None
        }
    }
}

/// Never-failing variant of [`repair_to_text`].
pub fn try_repair(raw: &str) -> RepairOutcome {
    match repair_to_text(raw) {
        Ok(text) => RepairOutcome {
            success: true,
            repaired: Some(text),
            diagnostic: None,
        },
        Err(RepairError::ParseFailure { message, flattened }) => RepairOutcome {
            success: false,
            repaired: Some(flattened),
            diagnostic: Some(message),
        },
        Err(e) => RepairOutcome {
            success: false,
            repaired: None,
            diagnostic: Some(e.to_string()),
        },
    }
}
