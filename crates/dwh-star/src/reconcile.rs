//! Cross-source attribute reconciliation.

use dwh_model::KnownValue;

/// Primary value wins unless it is unknown; then the supplementary value
/// is used. Applies to every attribute both sources carry.
pub fn prefer_known<T: KnownValue>(primary: T, supplementary: Option<T>) -> T {
    match supplementary {
        Some(fallback) if primary.is_unknown() => fallback,
        _ => primary,
    }
}
