#![forbid(unsafe_code)]

//! Track size specifications.
//!
//! A [`Scalar`] is what a row or column asks for: a fixed number of cells, a
//! percentage of some reference dimension, or a flex weight that claims a
//! share of whatever space is left. Scalars are written in a compact
//! notation:
//!
//! | Text    | Meaning                                   |
//! |---------|-------------------------------------------|
//! | `3`     | 3 cells                                   |
//! | `1.5fr` | flex weight 1.5                           |
//! | `50%`   | 50% of the container along the track axis |
//! | `25w`   | 25% of the container width                |
//! | `25h`   | 25% of the container height               |
//! | `10vw`  | 10% of the viewport width                 |
//! | `10vh`  | 10% of the viewport height                |

use std::fmt;
use std::str::FromStr;

use num_traits::{CheckedDiv, CheckedMul};
use trellis_core::geometry::{Axis, Size};

use crate::fraction::{Decimal, Fraction, parse_decimal};

/// The dimension a percentage refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relative {
    /// Container width.
    Width,
    /// Container height.
    Height,
    /// Viewport width.
    ViewportWidth,
    /// Viewport height.
    ViewportHeight,
}

impl Relative {
    /// The container dimension along `axis` (what a bare `%` means).
    #[inline]
    pub const fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Relative::Width,
            Axis::Vertical => Relative::Height,
        }
    }

    /// Look up the referenced dimension.
    #[inline]
    pub const fn dimension(self, ctx: &ResolutionContext) -> u16 {
        match self {
            Relative::Width => ctx.container.width,
            Relative::Height => ctx.container.height,
            Relative::ViewportWidth => ctx.viewport.width,
            Relative::ViewportHeight => ctx.viewport.height,
        }
    }

    /// Unit suffix in scalar notation.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Relative::Width => "w",
            Relative::Height => "h",
            Relative::ViewportWidth => "vw",
            Relative::ViewportHeight => "vh",
        }
    }
}

/// Sizes needed to resolve relative scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolutionContext {
    /// Size of the container being laid out.
    pub container: Size,
    /// Size of the whole viewport (terminal).
    pub viewport: Size,
}

impl ResolutionContext {
    /// Create a context from container and viewport sizes.
    #[inline]
    pub const fn new(container: Size, viewport: Size) -> Self {
        Self {
            container,
            viewport,
        }
    }

    /// A context where the container fills the viewport.
    #[inline]
    pub const fn uniform(size: Size) -> Self {
        Self::new(size, size)
    }
}

/// Requested size of one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// An absolute number of cells.
    Cells(Fraction),
    /// Percentage points of a reference dimension (`50` means half).
    Percent(Fraction, Relative),
    /// Proportional share of the space left after concrete tracks and gutters.
    Flex(Fraction),
}

impl Scalar {
    /// A whole number of cells.
    #[inline]
    pub fn cells(n: u32) -> Self {
        Scalar::Cells(Fraction::from_integer(i128::from(n)))
    }

    /// A whole percentage of `of`.
    #[inline]
    pub fn percent(p: u32, of: Relative) -> Self {
        Scalar::Percent(Fraction::from_integer(i128::from(p)), of)
    }

    /// A whole flex weight.
    #[inline]
    pub fn flex(weight: u32) -> Self {
        Scalar::Flex(Fraction::from_integer(i128::from(weight)))
    }

    /// Whether this scalar takes a share of leftover space.
    #[inline]
    pub const fn is_flex(&self) -> bool {
        matches!(self, Scalar::Flex(_))
    }

    /// The flex weight, if this is a flex scalar.
    #[inline]
    pub const fn flex_weight(&self) -> Option<Fraction> {
        match self {
            Scalar::Flex(weight) => Some(*weight),
            Scalar::Cells(_) | Scalar::Percent(..) => None,
        }
    }

    /// The numeric value regardless of unit.
    #[inline]
    pub const fn value(&self) -> Fraction {
        match self {
            Scalar::Cells(v) | Scalar::Percent(v, _) | Scalar::Flex(v) => *v,
        }
    }

    /// Resolve a concrete scalar to an exact number of cells.
    ///
    /// Returns `None` for [`Scalar::Flex`], whose size depends on the
    /// leftover pool, and when the exact result is not representable.
    pub fn resolve_concrete(&self, ctx: &ResolutionContext) -> Option<Fraction> {
        match self {
            Scalar::Cells(cells) => Some(*cells),
            Scalar::Percent(percent, of) => percent
                .checked_mul(&Fraction::from_integer(i128::from(of.dimension(ctx))))?
                .checked_div(&Fraction::from_integer(100)),
            Scalar::Flex(_) => None,
        }
    }

    /// Parse scalar notation, resolving a bare `%` against `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseScalarError`] for empty text, a malformed number, a
    /// negative value, or an unknown unit.
    pub fn parse(text: &str, axis: Axis) -> Result<Self, ParseScalarError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseScalarError::Empty);
        }

        let split = text
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
            .unwrap_or(text.len());
        let (number, unit) = text.split_at(split);

        let value = parse_decimal(number)
            .map_err(|_| ParseScalarError::InvalidNumber(number.to_string()))?;
        if value < Fraction::from_integer(0) {
            return Err(ParseScalarError::Negative(text.to_string()));
        }

        let scalar = match unit {
            "" => Scalar::Cells(value),
            "fr" => Scalar::Flex(value),
            "%" => Scalar::Percent(value, Relative::for_axis(axis)),
            "w" => Scalar::Percent(value, Relative::Width),
            "h" => Scalar::Percent(value, Relative::Height),
            "vw" => Scalar::Percent(value, Relative::ViewportWidth),
            "vh" => Scalar::Percent(value, Relative::ViewportHeight),
            other => return Err(ParseScalarError::UnknownUnit(other.to_string())),
        };
        Ok(scalar)
    }

    /// Parse a whitespace-separated list such as `"10 1fr 2fr 25%"`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseScalarError`] encountered.
    pub fn parse_list(text: &str, axis: Axis) -> Result<Vec<Self>, ParseScalarError> {
        text.split_whitespace()
            .map(|token| Self::parse(token, axis))
            .collect()
    }
}

impl FromStr for Scalar {
    type Err = ParseScalarError;

    /// Parse with a bare `%` referring to the container width.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text, Axis::Horizontal)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Cells(v) => write!(f, "{}", Decimal(*v)),
            Scalar::Percent(v, of) => write!(f, "{}{}", Decimal(*v), of.suffix()),
            Scalar::Flex(v) => write!(f, "{}fr", Decimal(*v)),
        }
    }
}

/// Error returned by [`Scalar::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseScalarError {
    /// Nothing but whitespace.
    Empty,
    /// The numeric part is not a decimal number.
    InvalidNumber(String),
    /// The value is below zero.
    Negative(String),
    /// The suffix is not a known unit.
    UnknownUnit(String),
}

impl fmt::Display for ParseScalarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty scalar"),
            Self::InvalidNumber(number) => write!(f, "invalid number {number:?} in scalar"),
            Self::Negative(text) => write!(f, "scalar {text:?} must not be negative"),
            Self::UnknownUnit(unit) => write!(
                f,
                "unknown unit {unit:?} (expected none, fr, %, w, h, vw or vh)"
            ),
        }
    }
}

impl std::error::Error for ParseScalarError {}
