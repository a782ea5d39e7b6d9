//! Temperature unit conversion.
//!
//! Raw observations are recorded in tenths of a degree Celsius; everything
//! user-facing is degrees Fahrenheit rounded to two decimals.

/// Converts tenths of °C to °F, rounded to 2 decimal places.
///
/// `f = (raw/10 * 9/5) + 32`
///
/// Rounding is half-away-from-zero (`f64::round` semantics): a value ending
/// in exactly .005 moves away from zero, so 0.125 °F → 0.13, not the
/// 0.12 that round-half-to-even would give. Total for finite input; no
/// failure modes.
pub fn celsius_tenths_to_fahrenheit(raw: f64) -> f64 {
    round2((raw / 10.0) * 9.0 / 5.0 + 32.0)
}

/// Elementwise conversion for a slice of raw values.
pub fn convert_all(raw: &[f64]) -> Vec<f64> {
    raw.iter().copied().map(celsius_tenths_to_fahrenheit).collect()
}

/// Rounds to 2 decimal places, half-away-from-zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freezing_point() {
        assert_eq!(celsius_tenths_to_fahrenheit(0.0), 32.0);
    }

    #[test]
    fn test_ten_celsius() {
        // 100 tenths = 10 °C = 50 °F
        assert_eq!(celsius_tenths_to_fahrenheit(100.0), 50.0);
    }

    #[test]
    fn test_alameda_march_mean() {
        // Mean of the 200/220 tenths pair from the end-to-end scenario:
        // 21 °C → 69.8 °F.
        assert_eq!(celsius_tenths_to_fahrenheit(210.0), 69.8);
    }

    #[test]
    fn test_negative_temperatures() {
        // -200 tenths = -20 °C = -4 °F
        assert_eq!(celsius_tenths_to_fahrenheit(-200.0), -4.0);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        // 12.5 hundredths sits exactly on the boundary; f64::round moves
        // it away from zero. Round-half-to-even would give 0.12 / -0.12.
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        for raw in [0.0, 100.0, 210.0, -37.0, 999.0] {
            let once = celsius_tenths_to_fahrenheit(raw);
            assert_eq!(round2(once), once, "re-rounding changed {raw}");
        }
    }

    #[test]
    fn test_conversion_is_monotonic() {
        let raws = [-400.0, -200.0, -1.0, 0.0, 1.0, 55.0, 210.0, 450.0];
        let converted = convert_all(&raws);
        for pair in converted.windows(2) {
            assert!(pair[0] <= pair[1], "not monotonic: {pair:?}");
        }
    }
}
