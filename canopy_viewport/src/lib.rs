// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Viewport: breakpoint classification over a measured viewport width.
//!
//! This crate models the viewport side of adaptive chrome as a small state
//! machine the host drives:
//!
//! - A **breakpoint table** ([`BreakpointTable`]) is a fixed, strictly
//!   ascending mapping from breakpoint name ([`Breakpoint`]) to minimum
//!   pixel width.
//! - A **viewport** ([`Viewport`]) starts [`Viewport::Unmeasured`] and moves
//!   to a measured width when the host reports one. Until then every
//!   classification is deliberately inconclusive, so chrome that must not
//!   guess (for example, server-rendered markup awaiting hydration) can
//!   defer its first resolution.
//! - A **media query** ([`MediaQuery`]) binds one breakpoint and answers
//!   "does the viewport match" reactively: the host feeds resize widths via
//!   [`Viewport::set_width`] and re-evaluates only when the returned
//!   [`ViewportChange`] reports a flip.
//!
//! The crate performs no measurement itself. The host owns the resize
//! listener (or terminal size callback, or test fixture) and pushes widths
//! in; classification is a pure comparison.
//!
//! ## Minimal example
//!
//! ```rust
//! use canopy_viewport::{Breakpoint, MediaQuery, Viewport};
//!
//! let query = MediaQuery::new(Breakpoint::Sm);
//! let mut viewport = Viewport::new();
//!
//! // Before the first measurement nothing matches conclusively.
//! assert_eq!(query.matches(&viewport), None);
//!
//! // A desktop-width measurement lands.
//! let change = viewport.set_width(1280.0, query.table());
//! assert!(change.first_measurement);
//! assert_eq!(query.matches(&viewport), Some(true));
//!
//! // Shrinking below the `sm` threshold flips the classification.
//! let change = viewport.set_width(600.0, query.table());
//! assert!(change.flipped(Breakpoint::Sm));
//! assert_eq!(query.matches(&viewport), Some(false));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use core::fmt;

/// Named minimum-width breakpoint.
///
/// The names follow the screen scale of the console the framework was built
/// for (`sm` through `2xl`); the pixel thresholds live in a
/// [`BreakpointTable`] so hosts with a different scale can substitute their
/// own widths without changing call sites.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    /// Smallest non-mobile breakpoint. The default for adaptive chrome.
    Sm,
    /// Medium screens.
    Md,
    /// Large screens.
    Lg,
    /// Extra-large screens.
    Xl,
    /// Double-extra-large screens.
    Xxl,
}

impl Breakpoint {
    /// Number of breakpoints in a table.
    pub const COUNT: usize = 5;

    /// All breakpoints in ascending threshold order.
    pub const ALL: [Self; Self::COUNT] = [Self::Sm, Self::Md, Self::Lg, Self::Xl, Self::Xxl];

    const fn idx(self) -> usize {
        match self {
            Self::Sm => 0,
            Self::Md => 1,
            Self::Lg => 2,
            Self::Xl => 3,
            Self::Xxl => 4,
        }
    }
}

/// Error creating a [`BreakpointTable`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TableError {
    /// A threshold was not finite or not positive.
    InvalidWidth {
        /// The offending breakpoint.
        breakpoint: Breakpoint,
        /// The rejected width.
        width: f64,
    },
    /// Thresholds were not strictly ascending.
    NotAscending {
        /// The first breakpoint whose threshold does not exceed its predecessor's.
        breakpoint: Breakpoint,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidth { breakpoint, width } => {
                write!(f, "invalid width {width} for breakpoint {breakpoint:?}")
            }
            Self::NotAscending { breakpoint } => {
                write!(f, "threshold for {breakpoint:?} does not exceed its predecessor")
            }
        }
    }
}

impl core::error::Error for TableError {}

/// A total, strictly ascending mapping from [`Breakpoint`] to minimum pixel
/// width.
///
/// Exactly one breakpoint is consulted per chrome instance; the table exists
/// so that all instances in a host agree on the scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BreakpointTable {
    thresholds: [f64; Breakpoint::COUNT],
}

impl BreakpointTable {
    /// The default scale: `sm=640`, `md=768`, `lg=1024`, `xl=1280`,
    /// `2xl=1536` logical pixels.
    pub const DEFAULT: Self = Self {
        thresholds: [640.0, 768.0, 1024.0, 1280.0, 1536.0],
    };

    /// Create a table from explicit thresholds, one per [`Breakpoint::ALL`]
    /// entry.
    ///
    /// Thresholds must be finite, positive, and strictly ascending.
    pub fn new(thresholds: [f64; Breakpoint::COUNT]) -> Result<Self, TableError> {
        for (i, bp) in Breakpoint::ALL.into_iter().enumerate() {
            let width = thresholds[i];
            if !width.is_finite() || width <= 0.0 {
                return Err(TableError::InvalidWidth {
                    breakpoint: bp,
                    width,
                });
            }
            if i > 0 && width <= thresholds[i - 1] {
                return Err(TableError::NotAscending { breakpoint: bp });
            }
        }
        Ok(Self { thresholds })
    }

    /// Minimum viewport width at which `breakpoint` matches.
    #[must_use]
    pub const fn min_width(&self, breakpoint: Breakpoint) -> f64 {
        self.thresholds[breakpoint.idx()]
    }

    /// Evaluate a breakpoint against a concrete width.
    #[must_use]
    pub fn evaluate(&self, breakpoint: Breakpoint, width: f64) -> bool {
        width >= self.min_width(breakpoint)
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The live viewport, as far as the host has reported it.
///
/// A viewport starts unmeasured. On a server-rendered page the first client
/// measurement arrives one tick after hydration; everything that would pick
/// a presentation family from the width must wait for it rather than guess.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum Viewport {
    /// No measurement has been reported yet.
    #[default]
    Unmeasured,
    /// The host has reported a width (logical pixels).
    Measured {
        /// Most recently reported viewport width.
        width: f64,
    },
}

/// Result of feeding a measurement into [`Viewport::set_width`].
///
/// Hosts use this to re-render only the chrome whose breakpoint actually
/// crossed its threshold, instead of on every resize pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ViewportChange {
    /// True if this was the first measurement ever reported.
    pub first_measurement: bool,
    flipped: [bool; Breakpoint::COUNT],
}

impl ViewportChange {
    /// Whether the given breakpoint's match flipped with this measurement.
    ///
    /// The first measurement reports every breakpoint as flipped, since each
    /// one moves from inconclusive to a concrete answer.
    #[must_use]
    pub const fn flipped(&self, breakpoint: Breakpoint) -> bool {
        self.flipped[breakpoint.idx()]
    }

    /// Whether any breakpoint flipped.
    #[must_use]
    pub fn any_flipped(&self) -> bool {
        self.flipped.iter().any(|f| *f)
    }
}

impl Viewport {
    /// Create an unmeasured viewport.
    #[must_use]
    pub const fn new() -> Self {
        Self::Unmeasured
    }

    /// The most recent measured width, if any.
    #[must_use]
    pub const fn width(&self) -> Option<f64> {
        match self {
            Self::Unmeasured => None,
            Self::Measured { width } => Some(*width),
        }
    }

    /// Whether the viewport satisfies `breakpoint` under `table`.
    ///
    /// Returns `None` while unmeasured: callers that must not guess defer,
    /// callers that may guess choose their own conservative default.
    #[must_use]
    pub fn matches(&self, table: &BreakpointTable, breakpoint: Breakpoint) -> Option<bool> {
        self.width().map(|w| table.evaluate(breakpoint, w))
    }

    /// Report a new measurement and learn which breakpoints flipped.
    ///
    /// Reporting the same width twice flips nothing.
    pub fn set_width(&mut self, width: f64, table: &BreakpointTable) -> ViewportChange {
        let previous = self.width();
        *self = Self::Measured { width };

        let mut flipped = [false; Breakpoint::COUNT];
        for bp in Breakpoint::ALL {
            let now = table.evaluate(bp, width);
            flipped[bp.idx()] = match previous {
                None => true,
                Some(prev) => table.evaluate(bp, prev) != now,
            };
        }
        ViewportChange {
            first_measurement: previous.is_none(),
            flipped,
        }
    }
}

/// A single breakpoint bound to a table: the per-chrome-instance
/// subscription object.
///
/// One `MediaQuery` is created per adaptive chrome instance and lives as
/// long as it does; the host re-checks [`MediaQuery::matches`] whenever the
/// viewport reports a flip for the bound breakpoint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MediaQuery {
    breakpoint: Breakpoint,
    table: BreakpointTable,
}

impl MediaQuery {
    /// Bind a breakpoint against the default table.
    #[must_use]
    pub fn new(breakpoint: Breakpoint) -> Self {
        Self::with_table(breakpoint, BreakpointTable::DEFAULT)
    }

    /// Bind a breakpoint against a custom table.
    #[must_use]
    pub const fn with_table(breakpoint: Breakpoint, table: BreakpointTable) -> Self {
        Self { breakpoint, table }
    }

    /// The bound breakpoint.
    #[must_use]
    pub const fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// The bound table.
    #[must_use]
    pub const fn table(&self) -> &BreakpointTable {
        &self.table
    }

    /// Whether the viewport currently satisfies the bound breakpoint.
    ///
    /// `None` while the viewport is unmeasured.
    #[must_use]
    pub fn matches(&self, viewport: &Viewport) -> Option<bool> {
        viewport.matches(&self.table, self.breakpoint)
    }

    /// Evaluate the bound breakpoint against an explicit width.
    #[must_use]
    pub fn evaluate(&self, width: f64) -> bool {
        self.table.evaluate(self.breakpoint, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmeasured_viewport_is_inconclusive() {
        let viewport = Viewport::new();
        let query = MediaQuery::new(Breakpoint::Sm);
        assert_eq!(query.matches(&viewport), None);
        assert_eq!(viewport.width(), None);
    }

    #[test]
    fn matches_iff_width_at_or_above_threshold() {
        let table = BreakpointTable::DEFAULT;
        let mut viewport = Viewport::new();

        for bp in Breakpoint::ALL {
            let threshold = table.min_width(bp);

            viewport.set_width(threshold, &table);
            assert_eq!(viewport.matches(&table, bp), Some(true));

            viewport.set_width(threshold - 1.0, &table);
            assert_eq!(viewport.matches(&table, bp), Some(false));

            viewport.set_width(threshold + 1.0, &table);
            assert_eq!(viewport.matches(&table, bp), Some(true));
        }
    }

    #[test]
    fn first_measurement_flips_everything() {
        let table = BreakpointTable::DEFAULT;
        let mut viewport = Viewport::new();

        let change = viewport.set_width(800.0, &table);
        assert!(change.first_measurement);
        for bp in Breakpoint::ALL {
            assert!(change.flipped(bp), "first measurement should flip {bp:?}");
        }
    }

    #[test]
    fn resize_reports_only_crossed_thresholds() {
        let table = BreakpointTable::DEFAULT;
        let mut viewport = Viewport::new();
        viewport.set_width(1280.0, &table);

        // 1280 -> 600 crosses sm (640), md (768), lg (1024) and xl (1280),
        // but not 2xl (1536) which was already unmatched.
        let change = viewport.set_width(600.0, &table);
        assert!(!change.first_measurement);
        assert!(change.flipped(Breakpoint::Sm));
        assert!(change.flipped(Breakpoint::Md));
        assert!(change.flipped(Breakpoint::Lg));
        assert!(change.flipped(Breakpoint::Xl));
        assert!(!change.flipped(Breakpoint::Xxl));
    }

    #[test]
    fn identical_width_flips_nothing() {
        let table = BreakpointTable::DEFAULT;
        let mut viewport = Viewport::new();
        viewport.set_width(700.0, &table);

        let change = viewport.set_width(700.0, &table);
        assert!(!change.any_flipped());
    }

    #[test]
    fn custom_table_must_be_strictly_ascending() {
        assert!(BreakpointTable::new([100.0, 200.0, 300.0, 400.0, 500.0]).is_ok());

        assert_eq!(
            BreakpointTable::new([100.0, 100.0, 300.0, 400.0, 500.0]),
            Err(TableError::NotAscending {
                breakpoint: Breakpoint::Md
            })
        );
        // NaN compares unequal to itself, so match structurally.
        assert!(matches!(
            BreakpointTable::new([100.0, 200.0, 300.0, 400.0, f64::NAN]),
            Err(TableError::InvalidWidth {
                breakpoint: Breakpoint::Xxl,
                ..
            })
        ));
        assert_eq!(
            BreakpointTable::new([0.0, 200.0, 300.0, 400.0, 500.0]),
            Err(TableError::InvalidWidth {
                breakpoint: Breakpoint::Sm,
                width: 0.0
            })
        );
    }

    #[test]
    fn media_query_uses_its_bound_breakpoint() {
        let table = BreakpointTable::DEFAULT;
        let mut viewport = Viewport::new();
        viewport.set_width(900.0, &table);

        assert_eq!(MediaQuery::new(Breakpoint::Sm).matches(&viewport), Some(true));
        assert_eq!(MediaQuery::new(Breakpoint::Md).matches(&viewport), Some(true));
        assert_eq!(MediaQuery::new(Breakpoint::Lg).matches(&viewport), Some(false));
    }
}
