#![forbid(unsafe_code)]

//! Exact rational numbers for track arithmetic.
//!
//! Track sizes are accumulated as exact [`Fraction`]s so that flooring the
//! running sum never drifts, no matter how many tracks share the axis. The
//! arithmetic comes from [`num_rational::Ratio`]; callers use the checked
//! operations from [`num_traits`] so an unrepresentable result is reported
//! instead of wrapping or panicking.
//!
//! This module adds the decimal notation used by scalars: [`parse_decimal`]
//! reads `"1.25"` exactly and [`Decimal`] writes a terminating fraction back
//! as `1.25`.

use std::fmt;

use num_rational::Ratio;

/// An exact rational number, always kept in lowest terms.
pub type Fraction = Ratio<i128>;

/// Most fractional digits [`Decimal`] will write before falling back to `n/d`.
const MAX_PLACES: u32 = 36;

/// Parse an optionally signed decimal (`"3"`, `"-1.25"`, `".5"`, `"2."`) into
/// its exact value.
///
/// # Errors
///
/// Returns [`ParseFractionError`] for anything else, or when the digits do
/// not fit in `i128`.
pub fn parse_decimal(text: &str) -> Result<Fraction, ParseFractionError> {
    let error = || ParseFractionError {
        input: text.to_string(),
    };
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(error());
    }

    let mut numer: i128 = 0;
    let mut denom: i128 = 1;
    for (digits, scales_denom) in [(whole, false), (frac, true)] {
        for byte in digits.bytes() {
            if !byte.is_ascii_digit() {
                return Err(error());
            }
            numer = numer
                .checked_mul(10)
                .and_then(|n| n.checked_add(i128::from(byte - b'0')))
                .ok_or_else(error)?;
            if scales_denom {
                denom = denom.checked_mul(10).ok_or_else(error)?;
            }
        }
    }
    if negative {
        numer = -numer;
    }
    Ok(Fraction::new(numer, denom))
}

/// Writes a [`Fraction`] in decimal notation.
///
/// Integers print bare (`3`), terminating fractions as decimals (`2.5`) and
/// everything else as `n/d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal(pub Fraction);

impl Decimal {
    /// Smallest power of ten that is a multiple of the denominator, as
    /// `(places, 10^places)`.
    fn places(&self) -> Option<(u32, i128)> {
        let denom = *self.0.denom();
        let mut scale: i128 = 1;
        for places in 0..=MAX_PLACES {
            if scale % denom == 0 {
                return Some((places, scale));
            }
            scale = scale.checked_mul(10)?;
        }
        None
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = &self.0;
        if value.is_integer() {
            return write!(f, "{}", value.numer());
        }
        let scaled = self
            .places()
            .and_then(|(places, scale)| {
                let scaled = value.numer().checked_mul(scale / value.denom())?;
                Some((places, scale, scaled))
            });
        let Some((places, scale, scaled)) = scaled else {
            return write!(f, "{value}");
        };
        let sign = if scaled < 0 { "-" } else { "" };
        let digits = scaled.unsigned_abs();
        let unit = scale.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:0width$}",
            digits / unit,
            digits % unit,
            width = places as usize
        )
    }
}

/// Error returned when parsing a decimal fraction fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFractionError {
    input: String,
}

impl ParseFractionError {
    /// The text that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseFractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid decimal number {:?}", self.input)
    }
}

impl std::error::Error for ParseFractionError {}
