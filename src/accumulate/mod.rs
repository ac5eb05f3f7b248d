//! Result accumulation
//!
//! Folds successive per-page value lists into the cumulative list a session
//! exposes. The merge function is pluggable; [`concat`] is the default and
//! [`dedup_concat`] is the usual substitute for APIs that can repeat items
//! across page boundaries.

/// Merge function folding an incoming page into the existing cumulative list.
pub type Concater<V> = dyn Fn(Vec<V>, Vec<V>) -> Vec<V> + Send + Sync;

/// Default merge: plain list concatenation.
pub fn concat<V>(mut existing: Vec<V>, incoming: Vec<V>) -> Vec<V> {
    existing.extend(incoming);
    existing
}

/// Dedup-aware merge: appends only values not already present.
///
/// Quadratic in list length; intended for the modest list sizes a paginated
/// view accumulates, not bulk ingestion.
pub fn dedup_concat<V: PartialEq>(mut existing: Vec<V>, incoming: Vec<V>) -> Vec<V> {
    for value in incoming {
        if !existing.contains(&value) {
            existing.push(value);
        }
    }
    existing
}
