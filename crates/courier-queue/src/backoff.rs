// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exponential backoff delay computation.

use std::time::Duration;

/// Compute the backoff delay before reinserting a message whose send attempt
/// number `retry_count` (1-based) just failed.
///
/// `delay = base * 2^(retry_count - 1)`, capped at `cap`. The cap keeps the
/// delay bounded for high retry limits.
pub fn backoff_delay(retry_count: u32, base: Duration, cap: Duration) -> Duration {
    debug_assert!(retry_count >= 1, "retry_count is 1-based");
    // Shift exponents past 31 would overflow; the cap dominates long before.
    let exponent = retry_count.saturating_sub(1).min(31);
    base.saturating_mul(1u32 << exponent).min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE: Duration = Duration::from_millis(1000);
    const CAP: Duration = Duration::from_secs(30);

    #[test]
    fn doubles_per_attempt() {
        assert_eq!(backoff_delay(1, BASE, CAP), Duration::from_millis(1000));
        assert_eq!(backoff_delay(2, BASE, CAP), Duration::from_millis(2000));
        assert_eq!(backoff_delay(3, BASE, CAP), Duration::from_millis(4000));
    }

    #[test]
    fn cap_bounds_growth() {
        assert_eq!(backoff_delay(6, BASE, CAP), CAP);
        assert_eq!(backoff_delay(40, BASE, CAP), CAP);
    }

    proptest! {
        #[test]
        fn delay_never_exceeds_cap(retry_count in 1u32..1000) {
            let delay = backoff_delay(retry_count, BASE, CAP);
            prop_assert!(delay <= CAP);
        }

        #[test]
        fn delay_is_monotonic(retry_count in 1u32..100) {
            let a = backoff_delay(retry_count, BASE, CAP);
            let b = backoff_delay(retry_count + 1, BASE, CAP);
            prop_assert!(a <= b);
        }
    }
}
