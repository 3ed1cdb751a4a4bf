//! Set validation for raw oracle records

use serde_json::Value;

/// Identifier prefixes used by dex entries for non-set keys (`format`,
/// `ability1`, `type1`, `name`, `hidden ability`). Records keyed by them are
/// not real sets and would pollute the set-pair index.
pub const RESERVED_SET_PREFIXES: [&str; 5] = ["type", "ability", "format", "name", "hidden"];

/// Check that a raw record describes a real attacker/defender set pair.
///
/// Never fails: anything malformed is simply not valid.
pub fn is_valid_record(record: &Value) -> bool {
    let has_named_set = |side: &str| {
        record
            .get(side)
            .and_then(Value::as_object)
            .is_some_and(|set| set.get("name").is_some_and(Value::is_string))
    };

    if !has_named_set("attacker") || !has_named_set("defender") {
        return false;
    }

    if record.get("moves").is_none() {
        return false;
    }

    let Some(set_names) = record.get("setNames").and_then(Value::as_object) else {
        return false;
    };

    ["a", "b"].iter().all(|key| {
        set_names
            .get(*key)
            .and_then(Value::as_str)
            .is_some_and(|id| !is_reserved(id))
    })
}

fn is_reserved(set_id: &str) -> bool {
    RESERVED_SET_PREFIXES
        .iter()
        .any(|prefix| set_id.starts_with(prefix))
}
