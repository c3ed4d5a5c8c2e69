#![forbid(unsafe_code)]

//! 2D grid built from two independent track lists.
//!
//! Columns are resolved against the area width and rows against the area
//! height, each with its own gutter. Cells can be addressed directly, as a
//! span that swallows the gutters between its tracks, or through a named area.
//!
//! # Example
//!
//! ```
//! use trellis_core::geometry::{Rect, Size};
//! use trellis_layout::grid::{Grid, GridArea};
//! use trellis_layout::Scalar;
//!
//! let grid = Grid::new()
//!     .rows([Scalar::cells(3), Scalar::flex(1), Scalar::cells(1)])
//!     .columns([Scalar::cells(20), Scalar::flex(1)])
//!     .col_gap(1)
//!     .area("sidebar", GridArea::span(1, 0, 2, 1));
//!
//! let area = Rect::new(0, 0, 80, 24);
//! let layout = grid.split(area, area.size()).unwrap();
//!
//! assert_eq!(layout.cell(1, 1), Some(Rect::new(21, 3, 59, 20)));
//! assert_eq!(layout.area("sidebar"), Some(Rect::new(0, 3, 20, 21)));
//! ```

use std::collections::HashMap;

use trellis_core::debug_span;
use trellis_core::geometry::{Rect, Size};

use crate::resolve::{ResolveError, TrackSpan, resolve};
use crate::scalar::{ResolutionContext, Scalar};

/// A 2D grid layout container.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Scalar>,
    columns: Vec<Scalar>,
    row_gap: u16,
    col_gap: u16,
    named_areas: HashMap<String, GridArea>,
}

/// A rectangular block of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridArea {
    /// Starting row (0-indexed).
    pub row: usize,
    /// Starting column (0-indexed).
    pub col: usize,
    /// Number of rows covered, at least 1.
    pub rowspan: usize,
    /// Number of columns covered, at least 1.
    pub colspan: usize,
}

impl GridArea {
    /// A single cell.
    #[inline]
    #[must_use]
    pub fn cell(row: usize, col: usize) -> Self {
        Self::span(row, col, 1, 1)
    }

    /// A block of cells. Zero spans are raised to 1.
    #[inline]
    #[must_use]
    pub fn span(row: usize, col: usize, rowspan: usize, colspan: usize) -> Self {
        Self {
            row,
            col,
            rowspan: rowspan.max(1),
            colspan: colspan.max(1),
        }
    }
}

impl Grid {
    /// Create an empty grid.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row tracks (top to bottom).
    #[must_use]
    pub fn rows(mut self, rows: impl IntoIterator<Item = Scalar>) -> Self {
        self.rows = rows.into_iter().collect();
        self
    }

    /// Set the column tracks (left to right).
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = Scalar>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Set the gutter between rows.
    #[must_use]
    pub fn row_gap(mut self, gap: u16) -> Self {
        self.row_gap = gap;
        self
    }

    /// Set the gutter between columns.
    #[must_use]
    pub fn col_gap(mut self, gap: u16) -> Self {
        self.col_gap = gap;
        self
    }

    /// Set the same gutter on both axes.
    #[must_use]
    pub fn gap(self, gap: u16) -> Self {
        self.row_gap(gap).col_gap(gap)
    }

    /// Name a block of cells so it can be looked up after splitting.
    #[must_use]
    pub fn area(mut self, name: impl Into<String>, area: GridArea) -> Self {
        self.named_areas.insert(name.into(), area);
        self
    }

    /// Number of row tracks.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of column tracks.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    /// Resolve both axes inside `area`.
    ///
    /// Percentages of the container refer to `area`; viewport percentages
    /// refer to `viewport`.
    ///
    /// # Errors
    ///
    /// Propagates the [`ResolveError`] of either axis.
    pub fn split(&self, area: Rect, viewport: Size) -> Result<GridLayout, ResolveError> {
        let span = debug_span!(
            "grid_split",
            rows = self.rows.len(),
            cols = self.columns.len(),
            width = area.width,
            height = area.height
        );
        let _guard = span.enter();

        let ctx = ResolutionContext::new(area.size(), viewport);
        let columns = resolve(
            &self.columns,
            i32::from(area.width),
            i32::from(self.col_gap),
            &ctx,
        )?;
        let rows = resolve(
            &self.rows,
            i32::from(area.height),
            i32::from(self.row_gap),
            &ctx,
        )?;

        Ok(GridLayout {
            origin_x: area.x,
            origin_y: area.y,
            rows,
            columns,
            named_areas: self.named_areas.clone(),
        })
    }
}

/// A resolved grid.
#[derive(Debug, Clone)]
pub struct GridLayout {
    origin_x: u16,
    origin_y: u16,
    rows: Vec<TrackSpan>,
    columns: Vec<TrackSpan>,
    named_areas: HashMap<String, GridArea>,
}

#[inline]
fn clamp_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

impl GridLayout {
    /// Resolved row spans, relative to the top of the area.
    #[inline]
    pub fn rows(&self) -> &[TrackSpan] {
        &self.rows
    }

    /// Resolved column spans, relative to the left of the area.
    #[inline]
    pub fn columns(&self) -> &[TrackSpan] {
        &self.columns
    }

    /// Rectangle of a single cell, or `None` when out of bounds.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Option<Rect> {
        self.span(row, col, 1, 1)
    }

    /// Rectangle covering `rowspan x colspan` cells starting at `(row, col)`,
    /// gutters between them included.
    ///
    /// Spans running past the last track are clamped to it. Returns `None`
    /// when the starting cell is out of bounds. Coordinates saturate at
    /// `u16::MAX` for tracks that overflow the area.
    pub fn span(&self, row: usize, col: usize, rowspan: usize, colspan: usize) -> Option<Rect> {
        let first_row = self.rows.get(row)?;
        let first_col = self.columns.get(col)?;

        let end_row = row.saturating_add(rowspan.max(1)).min(self.rows.len());
        let end_col = col.saturating_add(colspan.max(1)).min(self.columns.len());
        let last_row = &self.rows[end_row - 1];
        let last_col = &self.columns[end_col - 1];

        Some(Rect::new(
            self.origin_x.saturating_add(clamp_u16(first_col.offset)),
            self.origin_y.saturating_add(clamp_u16(first_row.offset)),
            clamp_u16(last_col.end().saturating_sub(first_col.offset)),
            clamp_u16(last_row.end().saturating_sub(first_row.offset)),
        ))
    }

    /// Rectangle of a named area, or `None` if the name is unknown or the
    /// area starts outside the grid.
    pub fn area(&self, name: &str) -> Option<Rect> {
        let area = self.named_areas.get(name)?;
        self.span(area.row, area.col, area.rowspan, area.colspan)
    }

    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    /// Height of a row, 0 when out of bounds.
    #[inline]
    pub fn row_height(&self, row: usize) -> u16 {
        self.rows.get(row).map_or(0, |span| clamp_u16(span.length))
    }

    /// Width of a column, 0 when out of bounds.
    #[inline]
    pub fn col_width(&self, col: usize) -> u16 {
        self.columns.get(col).map_or(0, |span| clamp_u16(span.length))
    }

    /// Iterate over all cells in row-major order as `(row, col, rect)`.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Rect)> + '_ {
        (0..self.num_rows()).flat_map(move |row| {
            (0..self.num_cols())
                .filter_map(move |col| self.cell(row, col).map(|rect| (row, col, rect)))
        })
    }
}
