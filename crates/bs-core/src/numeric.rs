/// Floating point type used for dps and rates.
pub type Real = f64;

/// Clamp a signed count coming from the simulation engine to a displayable value.
pub fn clamp_count(v: i64) -> u64 {
    v.max(0) as u64
}

/// Round to two decimals, ties toward positive infinity, folding negative
/// zero into zero. `-12.345` becomes `-12.34`, `12.345` becomes `12.35`.
///
/// The scaled value is first settled to a millionth of a cent so that inputs
/// such as `1032.455 - 1000.0` (stored as `32.45499999...`) round like the
/// decimal they were written as.
pub fn round_to_cents(v: Real) -> Real {
    let scaled = v * 100.0;
    let settled = (scaled * 1e6).round() / 1e6;
    let rounded = (settled + 0.5).floor() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Divide, returning `None` when the result would not be a finite number.
pub fn checked_ratio(num: Real, den: Real) -> Option<Real> {
    if den <= 0.0 || !den.is_finite() {
        return None;
    }
    let q = num / den;
    q.is_finite().then_some(q)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cents_stay_within_half_a_cent(v in -1.0e7f64..1.0e7) {
            let r = round_to_cents(v);
            prop_assert!(r.is_finite());
            prop_assert!((r - v).abs() <= 0.005 + 1e-6);
        }

        #[test]
        fn ratio_is_finite_when_present(num in -1.0e12f64..1.0e12, den in -10.0f64..10.0) {
            if let Some(q) = checked_ratio(num, den) {
                prop_assert!(den > 0.0);
                prop_assert!(q.is_finite());
            }
        }
    }
}
