#![forbid(unsafe_code)]

//! Trellis public facade crate.
//!
//! Re-exports the geometry, layout and palette crates behind one stable
//! surface, plus a prelude for day-to-day use.
//!
//! ```
//! use trellis::prelude::*;
//!
//! fn sidebar_width(tracks: &str, area: Rect) -> trellis::Result<u16> {
//!     let columns = Scalar::parse_list(tracks, Axis::Horizontal)?;
//!     let layout = Grid::new()
//!         .rows([Scalar::flex(1)])
//!         .columns(columns)
//!         .col_gap(1)
//!         .split(area, area.size())?;
//!     Ok(layout.col_width(0))
//! }
//!
//! assert_eq!(sidebar_width("25% 1fr", Rect::new(0, 0, 80, 24)).unwrap(), 20);
//! assert!(sidebar_width("25q 1fr", Rect::new(0, 0, 80, 24)).is_err());
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use trellis_core::geometry::{Axis, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use trellis_layout::{
    Fraction, Grid, GridArea, GridLayout, ParseFractionError, ParseScalarError, Relative,
    ResolutionContext, ResolveError, ResolveErrorKind, Scalar, TrackSpan, resolve,
};

// --- Palette re-exports ----------------------------------------------------

#[cfg(feature = "palette")]
pub use trellis_palette::{
    CommandPalette, CommandSource, Hit, Match, MatchKind, Matcher, PaletteAction, PaletteConfig,
    PaletteKey, RequestId, StaticSource,
};

// --- Logging ---------------------------------------------------------------

#[cfg(feature = "tracing-subscriber")]
pub use trellis_core::logging::init_from_env as init_logging;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Trellis users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Track notation could not be parsed.
    Parse(ParseScalarError),
    /// Tracks could not be resolved.
    Resolve(ResolveError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Resolve(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Resolve(err) => Some(err),
        }
    }
}

impl From<ParseScalarError> for Error {
    fn from(err: ParseScalarError) -> Self {
        Self::Parse(err)
    }
}

impl From<ResolveError> for Error {
    fn from(err: ResolveError) -> Self {
        Self::Resolve(err)
    }
}

/// Standard result type for Trellis APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Axis, Error, Grid, GridArea, Rect, ResolutionContext, Result, Scalar, Size, TrackSpan,
        resolve,
    };

    #[cfg(feature = "palette")]
    pub use crate::{CommandPalette, PaletteAction, PaletteKey, StaticSource};

    pub use crate::{core, layout};
    #[cfg(feature = "palette")]
    pub use crate::palette;
}

pub use trellis_core as core;
pub use trellis_layout as layout;
#[cfg(feature = "palette")]
pub use trellis_palette as palette;
