//! Field Codecs
//!
//! Textual round-trip for each persisted session field. Decoding is
//! total: a malformed payload recovers to that field's empty/zero
//! default with a warning, never an error.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use tracing::warn;

// =============================================================================
// ENCODE
// =============================================================================

/// Encode the saved-answers map as a JSON object.
pub fn encode_map(map: &BTreeMap<String, String>) -> String {
    serde_json::to_string(map).unwrap_or_else(|err| {
        warn!(%err, "failed to encode answers map");
        String::from("{}")
    })
}

/// Encode the hints-shown set as a JSON array.
pub fn encode_set(set: &BTreeSet<String>) -> String {
    serde_json::to_string(set).unwrap_or_else(|err| {
        warn!(%err, "failed to encode hints-shown set");
        String::from("[]")
    })
}

/// Encode the player-names list as a JSON array.
pub fn encode_list(list: &[String]) -> String {
    serde_json::to_string(list).unwrap_or_else(|err| {
        warn!(%err, "failed to encode player names");
        String::from("[]")
    })
}

/// Encode a timestamp as RFC 3339.
pub fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

// =============================================================================
// DECODE
// =============================================================================

/// Decode a clue index. Absent or malformed decodes to 0.
pub fn decode_index(raw: Option<String>) -> usize {
    let Some(raw) = raw else { return 0 };
    match raw.parse() {
        Ok(index) => index,
        Err(err) => {
            warn!(%raw, %err, "malformed progress index, falling back to 0");
            0
        }
    }
}

/// Decode the hints-used count. Absent or malformed decodes to 0.
pub fn decode_count(raw: Option<String>) -> u32 {
    let Some(raw) = raw else { return 0 };
    match raw.parse() {
        Ok(count) => count,
        Err(err) => {
            warn!(%raw, %err, "malformed hint count, falling back to 0");
            0
        }
    }
}

/// Decode the saved-answers map. Absent or malformed decodes to empty.
pub fn decode_map(raw: Option<String>) -> BTreeMap<String, String> {
    let Some(raw) = raw else {
        return BTreeMap::new();
    };
    match serde_json::from_str(&raw) {
        Ok(map) => map,
        Err(err) => {
            warn!(%err, "malformed saved-answers payload, falling back to empty");
            BTreeMap::new()
        }
    }
}

/// Decode the hints-shown set. Absent or malformed decodes to empty.
pub fn decode_set(raw: Option<String>) -> BTreeSet<String> {
    let Some(raw) = raw else {
        return BTreeSet::new();
    };
    match serde_json::from_str(&raw) {
        Ok(set) => set,
        Err(err) => {
            warn!(%err, "malformed hints-shown payload, falling back to empty");
            BTreeSet::new()
        }
    }
}

/// Decode the player-names list. Absent or malformed decodes to empty.
pub fn decode_list(raw: Option<String>) -> Vec<String> {
    let Some(raw) = raw else { return Vec::new() };
    match serde_json::from_str(&raw) {
        Ok(list) => list,
        Err(err) => {
            warn!(%err, "malformed player-names payload, falling back to empty");
            Vec::new()
        }
    }
}

/// Decode an RFC 3339 timestamp. Absent or malformed decodes to `None`.
pub fn decode_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(err) => {
            warn!(%raw, %err, "malformed timestamp, treating as unset");
            None
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
