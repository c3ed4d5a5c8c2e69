#![forbid(unsafe_code)]

//! Track-size resolution and grid layout.
//!
//! - [`Scalar`] - a track size: cells, a percentage of a reference
//!   dimension, or a flex weight
//! - [`resolve`] - divides one axis among a list of scalars with gutters
//! - [`Grid`] - 2D layout resolving rows and columns independently
//! - [`Fraction`] - exact rational ([`num_rational::Ratio<i128>`]) used for
//!   every intermediate
//!
//! Every intermediate is exact; rounding happens once, when cumulative
//! offsets are floored, so resolved tracks always tile the axis.
//!
//! ```
//! use trellis_core::geometry::{Axis, Size};
//! use trellis_layout::{ResolutionContext, Scalar, resolve};
//!
//! let tracks = Scalar::parse_list("10 1fr 2fr", Axis::Horizontal).unwrap();
//! let ctx = ResolutionContext::uniform(Size::new(100, 30));
//! let spans = resolve(&tracks, 100, 0, &ctx).unwrap();
//! assert_eq!(spans[1].offset, 10);
//! assert_eq!(spans[1].length, 30);
//! assert_eq!(spans[2].end(), 100);
//! ```

pub mod fraction;
pub mod grid;
pub mod resolve;
pub mod scalar;

pub use fraction::{Decimal, Fraction, ParseFractionError, parse_decimal};
pub use grid::{Grid, GridArea, GridLayout};
pub use resolve::{ResolveError, ResolveErrorKind, TrackSpan, resolve};
pub use scalar::{ParseScalarError, Relative, ResolutionContext, Scalar};
pub use trellis_core::geometry::{Axis, Rect, Size};
