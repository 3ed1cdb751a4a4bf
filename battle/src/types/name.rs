//! Entity name normalization

/// Normalize an entity name for comparison and cache keys.
///
/// Lowercases and strips spaces and hyphens, so `"Iron Valiant"`,
/// `"iron-valiant"` and `"ironvaliant"` all compare equal.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != ' ' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two names after normalization
pub fn same_entity(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}
