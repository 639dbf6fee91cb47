//! Canonical node-label normalization
//!
//! User-supplied labels arrive with arbitrary accenting, casing and
//! padding ("Boa Viagem", " boa viagem ", "BOA VIAGÉM"). Every layer,
//! loading and query-time lookup alike, funnels labels through
//! [`normalize`] so they land on one canonical key.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a raw label: trim, uppercase, NFD-decompose and drop
/// combining marks. Total over all strings and idempotent:
/// `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: impl AsRef<str>) -> String {
    raw.as_ref()
        .trim()
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
