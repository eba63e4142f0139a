// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Resource: per-subtree scope for the resource a page is editing.
//!
//! A console page mounts one [`ResourceScope`] per visible resource (an
//! app, a volume, a project). The scope carries:
//!
//! - the **resource value** itself, replaced explicitly when a re-fetch
//!   completes (a reconciliation step the data-loaded handler calls, not a
//!   hidden reactive side effect);
//! - a **slot cell** ([`SlotCell`]) — the reserved header location that
//!   will host the update button. The header declares the slot, the host's
//!   layout effect fills it exactly once per mount with a node key, and the
//!   update button — declared somewhere deep inside the bound form —
//!   projects itself into it ([`ResourceScope::project_update_button`]).
//!   This two-phase resolution decouples where the submit control is
//!   declared (inside the form) from where it appears (the header, a
//!   sibling branch of the tree).
//!
//! The scope is strictly subtree-local: construct it with the owning page,
//! tear it down with the page, never promote it to process-wide state.
//!
//! Node keys are a host-chosen `K: Copy + Eq` — a DOM element handle, an
//! index into a UI-node table, or a test integer — in the same spirit as
//! the other Canopy crates' generic identifiers.
//!
//! Button state derived from forms and invokers lives in [`buttons`].

#![no_std]

extern crate alloc;

pub mod buttons;

use core::fmt;

use canopy_viewport::{Breakpoint, MediaQuery, Viewport};

/// The breakpoint at or above which the header renders its wide form.
pub const HEADER_BREAKPOINT: Breakpoint = Breakpoint::Lg;

/// A domain entity being viewed or edited in the console.
///
/// The core never looks inside a resource beyond what headers need: a
/// display name and whether the resource is soft-deleted (deleted resources
/// render recover affordances instead of edit ones).
pub trait Resource {
    /// Display name for the header.
    fn name(&self) -> &str;

    /// Whether the resource is soft-deleted.
    fn deleted(&self) -> bool {
        false
    }
}

/// Error filling a [`SlotCell`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotError {
    /// The slot was already filled this mount; it is written at most once.
    AlreadyFilled,
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyFilled => f.write_str("slot already filled for this mount"),
        }
    }
}

impl core::error::Error for SlotError {}

/// A write-at-most-once cell holding the header's reserved node key.
///
/// Empty on first paint; the host's layout effect captures the live node
/// and fills the cell once. There is exactly one writer (that effect) and
/// one reader (the projecting button) per scope instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct SlotCell<K> {
    node: Option<K>,
}

impl<K: Copy + Eq> SlotCell<K> {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { node: None }
    }

    /// Fill the slot. Errors if it was already filled.
    pub fn fill(&mut self, node: K) -> Result<(), SlotError> {
        if self.node.is_some() {
            return Err(SlotError::AlreadyFilled);
        }
        self.node = Some(node);
        Ok(())
    }

    /// The captured node, if the layout effect has run.
    #[must_use]
    pub const fn get(&self) -> Option<K> {
        self.node
    }
}

/// Where a projected element currently lands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Projection<K> {
    /// The slot is not captured yet (first paint); render nothing and try
    /// again after the layout effect.
    Pending,
    /// Project into this node.
    Into(K),
}

/// Which element renders the resource's name.
///
/// Wide screens get a plain heading; narrow screens reuse the panel
/// family's title element so the name participates in the drawer chrome.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NameElement {
    /// A plain page heading (wide screens).
    Heading,
    /// The panel family's title sub-part (narrow screens, and the
    /// conservative choice before measurement).
    PanelTitle,
}

impl NameElement {
    /// Select the element from a wide-screen classification.
    ///
    /// `None` (unmeasured) selects [`Self::PanelTitle`]: the header is
    /// rendered server-side, so it defaults to the narrow form and switches
    /// after the first measurement.
    #[must_use]
    pub fn for_wide_screen(matches: Option<bool>) -> Self {
        match matches {
            Some(true) => Self::Heading,
            Some(false) | None => Self::PanelTitle,
        }
    }
}

/// Everything the header renders, snapshotted from the scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeaderView<'a, K> {
    /// The resource's display name.
    pub name: &'a str,
    /// Whether the resource is soft-deleted.
    pub deleted: bool,
    /// The element rendering the name.
    pub name_element: NameElement,
    /// Where the update button projects right now.
    pub update_button: Projection<K>,
}

/// Per-subtree state for the currently selected resource.
///
/// One scope per visible resource; lifetime equals the enclosing page
/// subtree.
#[derive(Clone, Debug)]
pub struct ResourceScope<R, K> {
    resource: R,
    slot: SlotCell<K>,
}

impl<R: Resource, K: Copy + Eq> ResourceScope<R, K> {
    /// Establish a scope around a loaded resource.
    pub const fn new(resource: R) -> Self {
        Self {
            resource,
            slot: SlotCell::new(),
        }
    }

    /// The current resource.
    pub const fn resource(&self) -> &R {
        &self.resource
    }

    /// Replace the resource after a re-fetch completes.
    ///
    /// This is the explicit reconciliation step: the data-loaded handler
    /// calls it synchronously, and then resets any bound form from the new
    /// value. Returns the previous value.
    pub fn replace(&mut self, resource: R) -> R {
        core::mem::replace(&mut self.resource, resource)
    }

    /// Capture the header's live node into the slot.
    ///
    /// Called once per mount by the host's layout effect, after first
    /// paint.
    pub fn fill_update_slot(&mut self, node: K) -> Result<(), SlotError> {
        self.slot.fill(node)
    }

    /// Resolve where the update button renders.
    pub const fn project_update_button(&self) -> Projection<K> {
        match self.slot.get() {
            Some(node) => Projection::Into(node),
            None => Projection::Pending,
        }
    }

    /// Snapshot the header for rendering.
    ///
    /// The name element follows the header's own breakpoint
    /// ([`HEADER_BREAKPOINT`]), independent of any chrome's breakpoint.
    pub fn header(&self, viewport: &Viewport) -> HeaderView<'_, K> {
        let wide = MediaQuery::new(HEADER_BREAKPOINT).matches(viewport);
        HeaderView {
            name: self.resource.name(),
            deleted: self.resource.deleted(),
            name_element: NameElement::for_wide_screen(wide),
            update_button: self.project_update_button(),
        }
    }
}
