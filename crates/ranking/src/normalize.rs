//! Identity normalization.
//!
//! Catalog variants of one paper share a canonical key: the id with its
//! trailing `-v<digits>` suffix removed (`graph-rag-v2` -> `graph-rag`).

const VARIANT_MARKER: &str = "-v";

/// Strip trailing variant suffixes from `id`
///
/// Suffixes are stripped until none is left, so `x-v2-v3` becomes `x` and
/// the function is idempotent. A single strip would leave `x-v2`, which
/// normalizes again to a different key. Only ASCII digits count. Total:
/// every input yields a (possibly empty) slice of itself.
pub fn normalize(id: &str) -> &str {
    let mut key = id;
    while let Some(stripped) = strip_variant_suffix(key) {
        key = stripped;
    }
    key
}

fn strip_variant_suffix(id: &str) -> Option<&str> {
    let marker = id.rfind(VARIANT_MARKER)?;
    let digits = &id[marker + VARIANT_MARKER.len()..];

    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(&id[..marker])
    } else {
        None
    }
}
