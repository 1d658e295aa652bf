//! Legacy Ro52 suggestion ordering.
//!
//! The portal historically floated Ro52/SSA spellings to the top of
//! autoantibody suggestions. This is a named one-off, not a synonym system:
//! it only reorders and never adds or removes values. Treat it as
//! non-authoritative; callers opt in through configuration.

/// Lowercase fragments that mark a Ro52/SSA spelling.
pub const RO52_SYNONYMS: [&str; 5] = ["ro52", "anti-ro52", "ro/ssa", "ro (ssa)", "ssa"];

pub fn is_ro52_synonym(value: &str) -> bool {
    let lower = value.to_lowercase();
    RO52_SYNONYMS.iter().any(|s| lower.contains(s))
}

/// Stable partition: Ro52/SSA spellings first, everything else after,
/// each group in its original order.
pub fn prioritize_ro52_synonyms(values: Vec<String>) -> Vec<String> {
    let (mut matched, rest): (Vec<String>, Vec<String>) =
        values.into_iter().partition(|v| is_ro52_synonym(v));
    matched.extend(rest);
    matched
}
