//! Claim number assignment
//!
//! Claim numbers look like `CLM2024120005`: the prefix, a 4-digit year, a
//! zero-padded month, and a zero-padded sequence that counts claims created
//! within the same calendar month. The formatting here is deterministic;
//! uniqueness is owned by the storage layer's unique index, which the
//! lifecycle service reacts to with a single regeneration retry.

use chrono::{DateTime, Datelike, Utc};

use core_kernel::{Clock, PortError};

use crate::ports::ClaimsPort;

/// Prefix shared by every claim number
pub const CLAIM_NUMBER_PREFIX: &str = "CLM";

/// Formats a claim number for the given instant and in-month sequence
///
/// The sequence pads to four digits and simply widens beyond 9999.
pub fn format_claim_number(at: DateTime<Utc>, sequence: u64) -> String {
    format!(
        "{}{}{:02}{:04}",
        CLAIM_NUMBER_PREFIX,
        at.year(),
        at.month(),
        sequence
    )
}

/// Derives the next claim number from a consistent count of this month's
/// claims
///
/// Two concurrent creations can still race to the same sequence; the
/// storage adapter's unique index is the backstop, surfaced as
/// [`PortError::Conflict`].
pub async fn next_claim_number(
    claims: &dyn ClaimsPort,
    clock: &dyn Clock,
) -> Result<String, PortError> {
    let now = clock.now();
    let count = claims.count_claims_in_month(now.year(), now.month()).await?;
    Ok(format_claim_number(now, count + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_pads_month_and_sequence() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        assert_eq!(format_claim_number(at, 5), "CLM2024030005");
    }

    #[test]
    fn test_format_december() {
        let at = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(format_claim_number(at, 1), "CLM2024120001");
    }

    #[test]
    fn test_sequence_widens_past_four_digits() {
        let at = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(format_claim_number(at, 12345), "CLM20241212345");
    }

    #[test]
    fn test_sequences_in_month_are_lexicographically_ordered() {
        let at = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        let earlier = format_claim_number(at, 41);
        let later = format_claim_number(at, 42);
        assert!(later > earlier);
    }
}
