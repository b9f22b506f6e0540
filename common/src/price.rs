//! [`Price`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Non-negative amount of money with cent precision.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Price(Decimal);

impl Price {
    /// Maximum representable [`Price`] value.
    pub const MAX: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

    /// Creates a new [`Price`] by checking the provided value is not negative,
    /// fits into [`Price::MAX`] and carries at most 2 fraction digits.
    #[must_use]
    pub fn new(mut val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val >= Self::MAX || val.scale() > 2 {
            None
        } else {
            val.rescale(2);
            #[expect(
                clippy::allow_attributes,
                reason = "TODO: Remove once clippy is fixed"
            )]
            #[allow(unsafe_code, reason = "invariants checked already")]
            Some(unsafe { Self::new_unchecked(val) })
        }
    }

    /// Creates a new [`Price`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must not be negative and must carry at most 2
    /// fraction digits.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid price value")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Non-negative amount of money in `{major}.{minor}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer of at most 2 digits.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Price = super::Price;

    impl Price {
        fn to_output<S: ScalarValue>(p: &Price) -> Value<S> {
            Value::scalar(p.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Price` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Price` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Price;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert!(Price::from_str("123.45").is_ok());
        assert!(Price::from_str("123.4").is_ok());
        assert!(Price::from_str("123").is_ok());
        assert!(Price::from_str("0").is_ok());
        assert!(Price::from_str("0.00").is_ok());

        assert!(Price::from_str("-1").is_err());
        assert!(Price::from_str("-0.01").is_err());
        assert!(Price::from_str("123.456").is_err());
        assert!(Price::from_str("100000000").is_err());
        assert!(Price::from_str("99999999.99").is_ok());
        assert!(Price::from_str("12,3").is_err());
        assert!(Price::from_str("").is_err());
    }

    #[test]
    fn normalizes_to_cents() {
        assert_eq!(Price::new(decimal("123")).unwrap().to_string(), "123.00");
        assert_eq!(Price::new(decimal("123.4")).unwrap().to_string(), "123.40");
        assert_eq!(Price::new(decimal("0")).unwrap().to_string(), "0.00");
    }

    #[test]
    fn compares_numerically() {
        assert_eq!(
            Price::new(decimal("150")).unwrap(),
            Price::new(decimal("150.00")).unwrap(),
        );
        assert!(
            Price::new(decimal("99.99")).unwrap()
                < Price::new(decimal("100")).unwrap(),
        );

        let min = [
            Price::new(decimal("200")).unwrap(),
            Price::new(decimal("100")).unwrap(),
            Price::new(decimal("300")).unwrap(),
        ]
        .into_iter()
        .min();
        assert_eq!(min, Some(Price::new(decimal("100")).unwrap()));
    }
}
