//! Opaque identifiers and creation timestamps for new rows.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// New opaque entity identifier. Carries no ordering semantics.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Render an instant as RFC 3339 UTC with fixed microsecond precision.
/// Fixed width keeps lexicographic order equal to chronological order,
/// which the ordered listing queries rely on.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Creation timestamp for a row persisted now.
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_nonempty_and_unique() {
        let a = new_id();
        let b = new_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn timestamps_parse_back_as_rfc3339() {
        let ts = now_timestamp();
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn timestamp_order_matches_instant_order() {
        let earlier = Utc::now();
        let later = earlier + chrono::Duration::microseconds(1);
        assert!(format_timestamp(earlier) < format_timestamp(later));
    }
}
