#![forbid(unsafe_code)]

//! Track size resolution.
//!
//! [`resolve`] divides one axis among a list of [`Scalar`]s, leaving a fixed
//! gutter between neighbours, and returns an integer `(offset, length)` per
//! track.
//!
//! # Algorithm
//!
//! 1. **Classify**: concrete scalars (cells, percentages) resolve to exact
//!    fractions; flex scalars are deferred with their weight.
//! 2. **Distribute**: the space left after gutters and concrete tracks,
//!    clamped at zero, is split between flex tracks in proportion to their
//!    weights. With no flex weight nothing is redistributed.
//! 3. **Accumulate**: the exact sizes are summed in order (gutter after each
//!    track), each running sum is floored, and lengths are the differences of
//!    consecutive floors.
//!
//! Flooring the running sum instead of each length keeps the layout tiled:
//! `offset[i + 1] == offset[i] + length[i] + gutter` always holds, and when
//! flex tracks are present the last track ends exactly at `total`.
//!
//! # Overflow policy
//!
//! Concrete tracks that ask for more than `total` keep their full size; only
//! the flex pool is clamped (to zero). Clipping is the caller's business.

use std::fmt;

use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Signed, Zero};
use trellis_core::{debug, debug_span, trace};

use crate::fraction::Fraction;
use crate::scalar::{ResolutionContext, Scalar};

/// Resolved position of one track along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrackSpan {
    /// Start of the track, relative to the start of the axis.
    pub offset: u32,
    /// Length of the track in cells.
    pub length: u32,
}

impl TrackSpan {
    /// Create a span.
    #[inline]
    pub const fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }

    /// End of the track (exclusive).
    #[inline]
    pub const fn end(&self) -> u32 {
        self.offset.saturating_add(self.length)
    }
}

impl From<(u32, u32)> for TrackSpan {
    fn from((offset, length): (u32, u32)) -> Self {
        Self::new(offset, length)
    }
}

/// Broad classification of a [`ResolveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveErrorKind {
    /// The caller broke the input contract.
    InvalidArgument,
    /// An exact intermediate or a final offset does not fit.
    Overflow,
}

/// Error returned by [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// `total` was below zero.
    NegativeTotal {
        /// The rejected value.
        total: i32,
    },
    /// `gutter` was below zero.
    NegativeGutter {
        /// The rejected value.
        gutter: i32,
    },
    /// A track carries a negative size, percentage or weight.
    MalformedTrack {
        /// Position of the track in the input.
        index: usize,
        /// The rejected scalar.
        scalar: Scalar,
    },
    /// Exact arithmetic overflowed.
    Overflow {
        /// Phase that overflowed.
        stage: &'static str,
    },
}

impl ResolveError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ResolveErrorKind {
        match self {
            Self::NegativeTotal { .. } | Self::NegativeGutter { .. } | Self::MalformedTrack { .. } => {
                ResolveErrorKind::InvalidArgument
            }
            Self::Overflow { .. } => ResolveErrorKind::Overflow,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeTotal { total } => {
                write!(f, "invalid argument: total must be >= 0 (got {total})")
            }
            Self::NegativeGutter { gutter } => {
                write!(f, "invalid argument: gutter must be >= 0 (got {gutter})")
            }
            Self::MalformedTrack { index, scalar } => write!(
                f,
                "invalid argument: track {index} ({scalar}) must not be negative"
            ),
            Self::Overflow { stage } => {
                write!(f, "track arithmetic overflowed while {stage}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// A track after classification.
#[derive(Debug, Clone, Copy)]
enum Classified {
    Concrete(Fraction),
    Flex(Fraction),
}

/// Resolve `tracks` into `(offset, length)` spans along an axis of `total`
/// cells, with `gutter` cells between neighbouring tracks.
///
/// An empty track list resolves to an empty result.
///
/// # Errors
///
/// - [`ResolveError::NegativeTotal`], [`ResolveError::NegativeGutter`] and
///   [`ResolveError::MalformedTrack`] (all [`ResolveErrorKind::InvalidArgument`])
///   when the input breaks the contract. Nothing is computed in that case.
/// - [`ResolveError::Overflow`] when exact arithmetic or a final offset
///   exceeds the representable range.
///
/// # Example
///
/// ```
/// use trellis_core::geometry::Size;
/// use trellis_layout::{resolve, ResolutionContext, Scalar, TrackSpan};
///
/// let tracks = [Scalar::cells(3), Scalar::flex(1), Scalar::cells(1)];
/// let ctx = ResolutionContext::uniform(Size::new(40, 20));
/// let spans = resolve(&tracks, 20, 1, &ctx).unwrap();
/// assert_eq!(
///     spans,
///     vec![TrackSpan::new(0, 3), TrackSpan::new(4, 14), TrackSpan::new(19, 1)]
/// );
/// ```
pub fn resolve(
    tracks: &[Scalar],
    total: i32,
    gutter: i32,
    ctx: &ResolutionContext,
) -> Result<Vec<TrackSpan>, ResolveError> {
    let span = debug_span!("resolve_tracks", tracks = tracks.len(), total, gutter);
    let _guard = span.enter();

    validate(tracks, total, gutter)?;
    if tracks.is_empty() {
        return Ok(Vec::new());
    }

    let classified = classify(tracks, ctx)?;
    let sizes = distribute(&classified, total, gutter)?;
    accumulate(&sizes, gutter)
}

fn validate(tracks: &[Scalar], total: i32, gutter: i32) -> Result<(), ResolveError> {
    if total < 0 {
        return Err(ResolveError::NegativeTotal { total });
    }
    if gutter < 0 {
        return Err(ResolveError::NegativeGutter { gutter });
    }
    if let Some((index, scalar)) = tracks
        .iter()
        .enumerate()
        .find(|(_, scalar)| scalar.value().is_negative())
    {
        return Err(ResolveError::MalformedTrack {
            index,
            scalar: *scalar,
        });
    }
    Ok(())
}

fn classify(tracks: &[Scalar], ctx: &ResolutionContext) -> Result<Vec<Classified>, ResolveError> {
    tracks
        .iter()
        .map(|scalar| match scalar.flex_weight() {
            Some(weight) => Ok(Classified::Flex(weight)),
            None => scalar
                .resolve_concrete(ctx)
                .map(Classified::Concrete)
                .ok_or(ResolveError::Overflow {
                    stage: "resolving concrete tracks",
                }),
        })
        .collect()
}

fn distribute(
    classified: &[Classified],
    total: i32,
    gutter: i32,
) -> Result<Vec<Fraction>, ResolveError> {
    const STAGE: ResolveError = ResolveError::Overflow {
        stage: "distributing flex space",
    };

    let mut total_weight = Fraction::zero();
    let mut consumed = Fraction::zero();
    for track in classified {
        match track {
            Classified::Flex(weight) => {
                total_weight = total_weight.checked_add(weight).ok_or(STAGE)?;
            }
            Classified::Concrete(size) => {
                consumed = consumed.checked_add(size).ok_or(STAGE)?;
            }
        }
    }

    if !total_weight.is_positive() {
        // Nothing to redistribute; zero-weight flex tracks collapse.
        return Ok(classified
            .iter()
            .map(|track| match track {
                Classified::Concrete(size) => *size,
                Classified::Flex(_) => Fraction::zero(),
            })
            .collect());
    }

    let gutter_count = i128::try_from(classified.len() - 1).map_err(|_| STAGE)?;
    let total_gutter = Fraction::from_integer(i128::from(gutter))
        .checked_mul(&Fraction::from_integer(gutter_count))
        .ok_or(STAGE)?;
    let available = Fraction::from_integer(i128::from(total))
        .checked_sub(&total_gutter)
        .and_then(|space| space.checked_sub(&consumed))
        .ok_or(STAGE)?;
    if available.is_negative() {
        debug!(
            consumed = %consumed,
            total,
            "concrete tracks exceed available space; flex tracks collapse"
        );
    }
    let remaining = available.max(Fraction::zero());
    let unit = remaining.checked_div(&total_weight).ok_or(STAGE)?;
    trace!(total_weight = %total_weight, remaining = %remaining, "flex pool");

    classified
        .iter()
        .map(|track| match track {
            Classified::Concrete(size) => Ok(*size),
            Classified::Flex(weight) => weight.checked_mul(&unit).ok_or(STAGE),
        })
        .collect()
}

fn accumulate(sizes: &[Fraction], gutter: i32) -> Result<Vec<TrackSpan>, ResolveError> {
    const STAGE: ResolveError = ResolveError::Overflow {
        stage: "accumulating offsets",
    };

    let gutter = Fraction::from_integer(i128::from(gutter));
    let mut spans = Vec::with_capacity(sizes.len());
    let mut cursor = Fraction::zero();
    for (i, size) in sizes.iter().enumerate() {
        if i > 0 {
            cursor = cursor.checked_add(&gutter).ok_or(STAGE)?;
        }
        let start = cursor.floor().to_integer();
        cursor = cursor.checked_add(size).ok_or(STAGE)?;
        let end = cursor.floor().to_integer();

        let offset = u32::try_from(start).map_err(|_| STAGE)?;
        let length = u32::try_from(end - start).map_err(|_| STAGE)?;
        spans.push(TrackSpan::new(offset, length));
    }
    Ok(spans)
}
