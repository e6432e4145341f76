//! Conversion between scaled wire amounts and exact decimals.
//!
//! The wire carries an amount as an integer magnitude; the asset's accuracy
//! (number of fractional digits) says where the decimal point goes. The
//! domain value is `magnitude / 10^accuracy` held in a [`Decimal`], so the
//! conversion never touches binary floating point.
//!
//! ```
//! use bcapi::amount::{from_decimal, to_decimal};
//!
//! let amount = to_decimal("1500000", 6).unwrap();
//! assert_eq!(amount.to_string(), "1.500000");
//! assert_eq!(from_decimal(amount, 6).unwrap(), "1500000");
//! ```

use rust_decimal::Decimal;

/// Largest accuracy a [`Decimal`] can represent.
pub const MAX_ACCURACY: u32 = 28;

/// Errors raised while converting between wire magnitudes and decimals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountConversionError {
    /// The magnitude is not a well-formed non-negative integer.
    #[error("'{raw}' is not a non-negative integer")]
    Malformed {
        /// The offending wire value.
        raw: String,
    },

    /// The accuracy exceeds [`MAX_ACCURACY`].
    #[error("Accuracy {accuracy} is out of range, the maximum is {max}", max = MAX_ACCURACY)]
    AccuracyOutOfRange {
        /// The requested accuracy.
        accuracy: u32,
    },

    /// The scaled value does not fit the decimal or magnitude representation.
    #[error("'{value}' at accuracy {accuracy} overflows the supported range")]
    Overflow {
        /// The value being converted.
        value: String,
        /// The requested accuracy.
        accuracy: u32,
    },

    /// A negative decimal has no wire magnitude.
    #[error("Amount {amount} is negative")]
    Negative {
        /// The offending amount.
        amount: Decimal,
    },

    /// The decimal has more fractional digits than the accuracy allows.
    #[error("Amount {amount} can't be represented with accuracy {accuracy} without rounding")]
    PrecisionLoss {
        /// The offending amount.
        amount: Decimal,
        /// The requested accuracy.
        accuracy: u32,
    },
}

/// Converts a string magnitude into a decimal amount.
///
/// The magnitude must consist of ASCII digits only: no sign, no whitespace,
/// no fractional part and no exponent.
///
/// # Errors
///
/// Returns [`AmountConversionError::Malformed`] for anything but digits,
/// [`AmountConversionError::AccuracyOutOfRange`] when `accuracy` exceeds
/// [`MAX_ACCURACY`], and [`AmountConversionError::Overflow`] when the
/// magnitude does not fit a [`Decimal`] mantissa.
pub fn to_decimal(raw: &str, accuracy: u32) -> Result<Decimal, AmountConversionError> {
    check_accuracy(accuracy)?;

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountConversionError::Malformed {
            raw: raw.to_owned(),
        });
    }

    // Only digits remain, so parsing can fail on overflow alone.
    raw.parse::<u128>()
        .ok()
        .and_then(|magnitude| scale(magnitude, accuracy))
        .ok_or_else(|| AmountConversionError::Overflow {
            value: raw.to_owned(),
            accuracy,
        })
}

/// Converts an integer magnitude into a decimal amount.
///
/// # Errors
///
/// Returns [`AmountConversionError::AccuracyOutOfRange`] when `accuracy`
/// exceeds [`MAX_ACCURACY`].
pub fn integer_to_decimal(raw: u64, accuracy: u32) -> Result<Decimal, AmountConversionError> {
    check_accuracy(accuracy)?;

    scale(u128::from(raw), accuracy).ok_or_else(|| AmountConversionError::Overflow {
        value: raw.to_string(),
        accuracy,
    })
}

/// Converts a decimal amount back into its wire magnitude.
///
/// The result is the canonical decimal representation of the magnitude, so
/// `from_decimal(to_decimal(m, a)?, a)` returns `m` for every canonical `m`.
///
/// # Errors
///
/// Returns [`AmountConversionError::Negative`] for negative amounts,
/// [`AmountConversionError::PrecisionLoss`] when `amount` has more
/// significant fractional digits than `accuracy`,
/// [`AmountConversionError::AccuracyOutOfRange`] when `accuracy` exceeds
/// [`MAX_ACCURACY`], and [`AmountConversionError::Overflow`] when the
/// magnitude exceeds 128 bits.
pub fn from_decimal(amount: Decimal, accuracy: u32) -> Result<String, AmountConversionError> {
    check_accuracy(accuracy)?;

    if amount < Decimal::ZERO {
        return Err(AmountConversionError::Negative { amount });
    }

    let normalized = amount.normalize();
    let shift = accuracy
        .checked_sub(normalized.scale())
        .ok_or(AmountConversionError::PrecisionLoss { amount, accuracy })?;

    10u128
        .checked_pow(shift)
        .and_then(|factor| normalized.mantissa().unsigned_abs().checked_mul(factor))
        .map(|magnitude| magnitude.to_string())
        .ok_or_else(|| AmountConversionError::Overflow {
            value: amount.to_string(),
            accuracy,
        })
}

fn check_accuracy(accuracy: u32) -> Result<(), AmountConversionError> {
    if accuracy > MAX_ACCURACY {
        return Err(AmountConversionError::AccuracyOutOfRange { accuracy });
    }
    Ok(())
}

fn scale(magnitude: u128, accuracy: u32) -> Option<Decimal> {
    let magnitude = i128::try_from(magnitude).ok()?;
    Decimal::try_from_i128_with_scale(magnitude, accuracy).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    /// Largest mantissa a `Decimal` can hold (2^96 - 1).
    const MAX_MANTISSA: &str = "79228162514264337593543950335";

    #[test]
    fn test_to_decimal_places_decimal_point() {
        assert_eq!(
            to_decimal("123456", 2).unwrap(),
            Decimal::from_str("1234.56").unwrap()
        );
        assert_eq!(
            to_decimal("5", 8).unwrap(),
            Decimal::from_str("0.00000005").unwrap()
        );
        assert_eq!(to_decimal("42", 0).unwrap(), Decimal::from(42));
        assert_eq!(to_decimal("0", 18).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_round_trip_is_exact() {
        let cases = [
            ("0", 0),
            ("0", 28),
            ("1", 0),
            ("1", 28),
            ("100", 2),
            ("1500000000000000000", 18),
            ("123456789012345678901234567", 9),
            (MAX_MANTISSA, 0),
            (MAX_MANTISSA, 28),
        ];

        for (magnitude, accuracy) in cases {
            let amount = to_decimal(magnitude, accuracy).unwrap();
            assert_eq!(
                from_decimal(amount, accuracy).unwrap(),
                magnitude,
                "round trip of {magnitude} at accuracy {accuracy}"
            );
        }
    }

    #[test]
    fn test_integer_magnitude_round_trip() {
        let amount = integer_to_decimal(u64::MAX, 18).unwrap();
        assert_eq!(from_decimal(amount, 18).unwrap(), u64::MAX.to_string());
    }

    #[test]
    fn test_to_decimal_rejects_malformed_magnitudes() {
        for raw in ["", "abc", "12a", "-1", "+1", " 1", "1 ", "1.5", "1e3", "0x10"] {
            assert_eq!(
                to_decimal(raw, 2),
                Err(AmountConversionError::Malformed {
                    raw: raw.to_owned()
                }),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_to_decimal_rejects_accuracy_overflow() {
        assert_eq!(
            to_decimal("1", MAX_ACCURACY + 1),
            Err(AmountConversionError::AccuracyOutOfRange { accuracy: 29 })
        );
        assert!(integer_to_decimal(1, 64).is_err());
    }

    #[test]
    fn test_to_decimal_rejects_magnitude_overflow() {
        let too_big = "79228162514264337593543950336";
        assert!(matches!(
            to_decimal(too_big, 0),
            Err(AmountConversionError::Overflow { .. })
        ));

        let beyond_u128 = "1".repeat(50);
        assert!(matches!(
            to_decimal(&beyond_u128, 0),
            Err(AmountConversionError::Overflow { .. })
        ));
    }

    #[test]
    fn test_from_decimal_pads_to_accuracy() {
        let amount = Decimal::from_str("1.5").unwrap();
        assert_eq!(from_decimal(amount, 6).unwrap(), "1500000");
    }

    #[test]
    fn test_from_decimal_rejects_precision_loss() {
        let amount = Decimal::from_str("1.234").unwrap();
        assert_eq!(
            from_decimal(amount, 2),
            Err(AmountConversionError::PrecisionLoss {
                amount,
                accuracy: 2
            })
        );
    }

    #[test]
    fn test_from_decimal_ignores_trailing_zeros() {
        let amount = Decimal::from_str("1.2300").unwrap();
        assert_eq!(from_decimal(amount, 2).unwrap(), "123");
    }

    #[test]
    fn test_from_decimal_rejects_negative() {
        let amount = Decimal::from_str("-0.01").unwrap();
        assert_eq!(
            from_decimal(amount, 2),
            Err(AmountConversionError::Negative { amount })
        );
    }
}
