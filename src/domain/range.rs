//! Low/high band around a point estimate.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
    pub low_pct: f64,
    pub high_pct: f64,
}

/// How the band width is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeMode {
    /// Same percentage on both sides.
    Fixed(f64),
    /// Asymmetric band picked from the condition index bucket.
    /// `neutral_pct` is used on both sides for the middle bucket.
    IndexModulated { index: f64, neutral_pct: f64 },
}

pub fn price_range(value: f64, mode: RangeMode) -> PriceRange {
    let (low_pct, high_pct) = match mode {
        RangeMode::Fixed(pct) => (pct, pct),
        RangeMode::IndexModulated { index, neutral_pct } => {
            modulated_percentages(index, neutral_pct)
        }
    };

    PriceRange {
        low: value * (1.0 - low_pct),
        high: value * (1.0 + high_pct),
        low_pct,
        high_pct,
    }
}

/// Well-kept properties get more upside and less downside, and vice versa.
pub fn modulated_percentages(index: f64, neutral_pct: f64) -> (f64, f64) {
    if index >= 8.0 {
        (0.05, 0.08)
    } else if index >= 6.0 {
        (neutral_pct, neutral_pct)
    } else if index >= 4.0 {
        (0.08, 0.05)
    } else {
        (0.10, 0.04)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Non-negative percentages always bracket the point value.
        #[test]
        fn band_brackets_the_value(
            value in 0.0f64..5_000_000.0,
            pct in 0.0f64..1.0,
            index in 0.0f64..10.0,
        ) {
            for mode in [RangeMode::Fixed(pct), RangeMode::IndexModulated { index, neutral_pct: pct }] {
                let range = price_range(value, mode);
                prop_assert!(range.low <= value + 1e-9);
                prop_assert!(value <= range.high + 1e-9);
            }
        }
    }
}
