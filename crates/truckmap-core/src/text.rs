// crates/truckmap-core/src/text.rs

/// Convert a string into a folded key suitable for keyword comparison.
///
/// Transliterates Unicode to ASCII with `deunicode` and lowercases, so
/// `"Crêpes Truck"` and `"crepes truck"` compare equal.
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Accent- and case-insensitive substring match.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold_key(haystack).contains(&fold_key(needle))
}
