// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Chrome: adaptive dialog/drawer presentation state.
//!
//! Interactive dialogs in the console render through one of two structurally
//! different component families depending on viewport width: a centered
//! overlay ([`Family::Overlay`]) on wide screens, an edge-anchored panel
//! ([`Family::Panel`]) on narrow ones. This crate models that choice — and
//! everything needed to expose it as one unified API — without rendering
//! anything itself:
//!
//! - [`open::OpenCell`] is the tri-mode open/closed cell: fully controlled
//!   by a caller, or self-managed, switchable mid-lifecycle.
//! - [`Chrome`] owns the `Unmeasured → Active(Family)` state machine. A
//!   chrome never picks a family before the first viewport measurement, so
//!   server-rendered markup cannot flash the wrong family.
//! - [`ChromeScope`] records the active family once per resolution so that
//!   nested sub-parts (trigger, header, footer, title, …) all agree, even
//!   when evaluated at different times — no sub-part re-derives the
//!   viewport decision.
//! - [`props`] merges one logical prop object — a common part plus
//!   per-family overrides — into the chosen family's concrete props, with
//!   class lists concatenated (never overwritten) across layers.
//!
//! ## Minimal example
//!
//! ```rust
//! use canopy_chrome::{Chrome, ChromeTransition, Family, Part};
//! use canopy_chrome::open::OpenCell;
//! use canopy_chrome::props::ChromeProps;
//! use canopy_viewport::{Breakpoint, MediaQuery, Viewport};
//!
//! let mut chrome = Chrome::new(
//!     MediaQuery::new(Breakpoint::Sm),
//!     OpenCell::uncontrolled(false),
//!     ChromeProps::default(),
//! );
//! let mut viewport = Viewport::new();
//!
//! // Nothing resolves before the first measurement.
//! assert!(chrome.resolve().is_none());
//!
//! // A 1280px measurement lands: the overlay family is selected.
//! viewport.set_width(1280.0, chrome.query().table());
//! assert_eq!(
//!     chrome.sync(&viewport),
//!     ChromeTransition::FirstResolved(Family::Overlay),
//! );
//!
//! // Sub-parts resolve against the recorded scope, not the viewport.
//! let resolved = chrome.resolve().unwrap();
//! let title = resolved.scope().part(Part::Title);
//! assert_eq!(title.family, Family::Overlay);
//!
//! // Shrinking across the threshold swaps the family; open state survives.
//! chrome.request_open(true);
//! viewport.set_width(600.0, chrome.query().table());
//! assert_eq!(
//!     chrome.sync(&viewport),
//!     ChromeTransition::Switched { from: Family::Overlay, to: Family::Panel },
//! );
//! assert!(chrome.is_open());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod open;
pub mod props;

use canopy_viewport::{Breakpoint, MediaQuery, Viewport};

use crate::open::{OpenCell, OpenRequest};
use crate::props::{ChromeProps, ResolvedProps};

/// The breakpoint at or above which a chrome renders its overlay family.
///
/// This is the smallest breakpoint: anything narrower than a small tablet
/// gets the edge-anchored panel. Callers with unusual layouts bind a
/// different breakpoint via [`MediaQuery::new`].
pub const DEFAULT_BREAKPOINT: Breakpoint = Breakpoint::Sm;

/// The two presentation families an adaptive chrome can render through.
///
/// Derived — never stored by callers — from a breakpoint comparison against
/// the live viewport width. Overlay is the wide-screen family, panel the
/// narrow-screen one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// Centered overlay (dialog) family.
    Overlay,
    /// Edge-anchored panel (drawer) family.
    Panel,
}

impl Family {
    /// Select the family for a breakpoint match result.
    #[must_use]
    pub const fn for_match(matches: bool) -> Self {
        if matches { Self::Overlay } else { Self::Panel }
    }
}

/// Isomorphic sub-parts shared by both families.
///
/// Every part exists in both families; [`ChromeScope::part`] resolves a part
/// to the concrete family member.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    /// The element that opens the chrome.
    Trigger,
    /// The portal the chrome renders into.
    Portal,
    /// The backdrop behind the chrome.
    Scrim,
    /// The chrome's main content container.
    Content,
    /// Header region.
    Header,
    /// Footer region.
    Footer,
    /// Title element.
    Title,
    /// Description element.
    Description,
    /// The element that closes the chrome.
    Close,
}

/// Lifecycle state of an adaptive chrome.
///
/// `Unmeasured → Active(Family)`; transitions after that happen only on
/// viewport threshold crossings. There is no terminal state — the machine
/// lives as long as the chrome is mounted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChromeState {
    /// No viewport measurement has been observed; no family may be chosen.
    Unmeasured,
    /// A family is active.
    Active(Family),
}

/// Result of [`Chrome::sync`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChromeTransition {
    /// The viewport is still unmeasured; the chrome stays unresolved.
    StillUnmeasured,
    /// The first measurement arrived and this family was selected.
    FirstResolved(Family),
    /// A threshold crossing swapped the family. Open state is preserved;
    /// visually this replaces the open chrome instantly.
    Switched {
        /// Family before the crossing.
        from: Family,
        /// Family after the crossing.
        to: Family,
    },
    /// The measurement did not cross the bound threshold.
    Unchanged,
}

/// The family tag shared by all sub-parts of one chrome instance.
///
/// A scope is recorded when the chrome resolves; sub-parts resolve their
/// family member from it rather than re-deriving the viewport decision, so
/// every part of one instance agrees even if evaluated at slightly
/// different times.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChromeScope {
    family: Family,
}

impl ChromeScope {
    /// The scope's recorded family.
    #[must_use]
    pub const fn family(&self) -> Family {
        self.family
    }

    /// Resolve a sub-part to the recorded family's member.
    #[must_use]
    pub const fn part(&self, part: Part) -> ResolvedPart {
        ResolvedPart {
            family: self.family,
            part,
        }
    }
}

/// A sub-part resolved to a concrete family member.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPart {
    /// The family the part belongs to.
    pub family: Family,
    /// Which sub-part this is.
    pub part: Part,
}

impl ResolvedPart {
    /// A stable name for the concrete family member, in the shape hosts
    /// typically key component lookups by (for example `"dialog-title"` or
    /// `"drawer-trigger"`).
    #[must_use]
    pub const fn member_name(&self) -> &'static str {
        match (self.family, self.part) {
            (Family::Overlay, Part::Trigger) => "dialog-trigger",
            (Family::Overlay, Part::Portal) => "dialog-portal",
            (Family::Overlay, Part::Scrim) => "dialog-overlay",
            (Family::Overlay, Part::Content) => "dialog-content",
            (Family::Overlay, Part::Header) => "dialog-header",
            (Family::Overlay, Part::Footer) => "dialog-footer",
            (Family::Overlay, Part::Title) => "dialog-title",
            (Family::Overlay, Part::Description) => "dialog-description",
            (Family::Overlay, Part::Close) => "dialog-close",
            (Family::Panel, Part::Trigger) => "drawer-trigger",
            (Family::Panel, Part::Portal) => "drawer-portal",
            (Family::Panel, Part::Scrim) => "drawer-overlay",
            (Family::Panel, Part::Content) => "drawer-content",
            (Family::Panel, Part::Header) => "drawer-header",
            (Family::Panel, Part::Footer) => "drawer-footer",
            (Family::Panel, Part::Title) => "drawer-title",
            (Family::Panel, Part::Description) => "drawer-description",
            (Family::Panel, Part::Close) => "drawer-close",
        }
    }
}

/// One adaptive chrome instance: open cell, family state machine, and the
/// layered prop object, behind a single API.
#[derive(Clone, Debug)]
pub struct Chrome {
    query: MediaQuery,
    state: ChromeState,
    open: OpenCell,
    props: ChromeProps,
}

impl Chrome {
    /// Create a chrome bound to one breakpoint query.
    #[must_use]
    pub const fn new(query: MediaQuery, open: OpenCell, props: ChromeProps) -> Self {
        Self {
            query,
            state: ChromeState::Unmeasured,
            open,
            props,
        }
    }

    /// The bound media query.
    #[must_use]
    pub const fn query(&self) -> &MediaQuery {
        &self.query
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ChromeState {
        self.state
    }

    /// Current open value (controlled or internal).
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.read()
    }

    /// Request an open/close, delegating to the open cell's mode.
    pub fn request_open(&mut self, open: bool) -> OpenRequest {
        self.open.request(open)
    }

    /// Reconcile the externally supplied open value.
    pub fn sync_external_open(&mut self, external: Option<bool>) {
        self.open.sync_external(external);
    }

    /// Direct access to the open cell.
    #[must_use]
    pub const fn open_cell(&self) -> &OpenCell {
        &self.open
    }

    /// Re-derive the family from the viewport.
    ///
    /// Called by the host after every [`Viewport::set_width`] that flips the
    /// bound breakpoint (and once after the first measurement). The open
    /// state is never touched here: a family swap while open replaces the
    /// chrome but keeps it open.
    pub fn sync(&mut self, viewport: &Viewport) -> ChromeTransition {
        let Some(matches) = self.query.matches(viewport) else {
            return ChromeTransition::StillUnmeasured;
        };
        let next = Family::for_match(matches);
        match self.state {
            ChromeState::Unmeasured => {
                self.state = ChromeState::Active(next);
                ChromeTransition::FirstResolved(next)
            }
            ChromeState::Active(current) if current == next => ChromeTransition::Unchanged,
            ChromeState::Active(current) => {
                self.state = ChromeState::Active(next);
                ChromeTransition::Switched {
                    from: current,
                    to: next,
                }
            }
        }
    }

    /// Resolve the chrome for rendering.
    ///
    /// `None` while unmeasured: the chrome's first client render is deferred
    /// until a measurement is available. Once active, the resolution carries
    /// the merged props for the active family and the scope sub-parts
    /// resolve through.
    #[must_use]
    pub fn resolve(&self) -> Option<ResolvedChrome> {
        let ChromeState::Active(family) = self.state else {
            return None;
        };
        Some(ResolvedChrome {
            scope: ChromeScope { family },
            open: self.open.read(),
            props: self.props.resolve(family),
        })
    }
}

/// A chrome resolved to a concrete family, ready for the host to render.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedChrome {
    scope: ChromeScope,
    open: bool,
    props: ResolvedProps,
}

impl ResolvedChrome {
    /// The scope sub-parts resolve their family member from.
    #[must_use]
    pub const fn scope(&self) -> &ChromeScope {
        &self.scope
    }

    /// The active family.
    #[must_use]
    pub const fn family(&self) -> Family {
        self.scope.family
    }

    /// Open value at resolution time.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Merged props for the active family.
    #[must_use]
    pub const fn props(&self) -> &ResolvedProps {
        &self.props
    }
}
