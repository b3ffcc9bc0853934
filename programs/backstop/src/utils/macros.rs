#[macro_export]
/// This macro logs the rejection and returns early
/// useful for debugging.
macro_rules! fail {
    ($e:expr) => {
        tracing::warn!("Error {:?}", $e);
        return Err($e.into());
    };
}

#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($actual:expr, $expected:expr, $epsilon:expr) => {
        let eps = $epsilon as i128;
        let act = $actual as i128;
        let exp = $expected as i128;
        let diff = (act - exp).abs();
        if diff > eps {
            panic!(
                "Actual {} Expected {} diff {} Epsilon {}",
                $actual, $expected, diff, eps
            );
        }
    };

    ($actual:expr, $expected:expr, $epsilon:expr, $type:ty) => {
        let eps = $epsilon as $type;
        let act = $actual as $type;
        let exp = $expected as $type;
        let diff = if act > exp { act - exp } else { exp - act };
        if diff > eps {
            panic!(
                "Actual {} Expected {} diff {} Epsilon {}",
                $actual, $expected, diff, eps
            );
        }
    };
}

/// Fuzzy equality for `Decimal` values, epsilon in raw (1e-18) units
#[macro_export]
macro_rules! assert_fuzzy_eq_decimal {
    ($actual:expr, $expected:expr, $epsilon:expr) => {
        let act: $crate::Decimal = $actual;
        let exp: $crate::Decimal = $expected;
        let eps = $crate::Decimal::from_scaled_val($epsilon as u128);
        let diff = if act > exp { act.saturating_sub(exp) } else { exp.saturating_sub(act) };
        if diff > eps {
            panic!(
                "Actual {} Expected {} diff {} Epsilon {}",
                act, exp, diff, eps
            );
        }
    };
}
