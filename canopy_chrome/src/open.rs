// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controlled/uncontrolled open state.
//!
//! An [`OpenCell`] is the open/closed cell behind every chrome instance.
//! It can be driven two ways:
//!
//! - **Controlled**: the caller supplies the open value. The cell mirrors it
//!   and never wins a disagreement — an open/close request is returned to
//!   the host as [`OpenRequest::Forward`] for delivery to the controlling
//!   caller's callback, and `read()` keeps reflecting the external value
//!   until the caller actually changes it.
//! - **Uncontrolled**: the cell owns the value; requests mutate it directly.
//!
//! The mode can change mid-lifecycle: [`OpenCell::sync_external`] with
//! `Some` enters (or stays in) controlled mode, with `None` leaves it. A
//! defined→undefined transition keeps the current boolean value rather than
//! resetting it.

/// Result of [`OpenCell::request`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenRequest {
    /// The cell was uncontrolled and applied the value itself.
    Applied(bool),
    /// The cell is controlled; the host must forward the requested value to
    /// the controlling caller.
    Forward(bool),
}

/// Tri-mode open/closed state cell.
///
/// Created on chrome mount, destroyed on unmount. Mutated by trigger
/// clicks ([`OpenCell::request`]), explicit close calls, or external prop
/// changes ([`OpenCell::sync_external`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpenCell {
    internal: bool,
    external: Option<bool>,
}

impl OpenCell {
    /// Create a cell, controlled if `external` is `Some`.
    ///
    /// `default_open` seeds the internal value and is honored only here, at
    /// construction.
    #[must_use]
    pub const fn new(external: Option<bool>, default_open: bool) -> Self {
        let internal = match external {
            Some(v) => v,
            None => default_open,
        };
        Self { internal, external }
    }

    /// Create an uncontrolled cell seeded with `default_open`.
    #[must_use]
    pub const fn uncontrolled(default_open: bool) -> Self {
        Self::new(None, default_open)
    }

    /// Create a controlled cell mirroring `open`.
    #[must_use]
    pub const fn controlled(open: bool) -> Self {
        Self::new(Some(open), false)
    }

    /// Whether the cell is currently externally controlled.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        self.external.is_some()
    }

    /// Current open value.
    ///
    /// While controlled this always reflects the external value; external is
    /// the source of truth.
    #[must_use]
    pub const fn read(&self) -> bool {
        match self.external {
            Some(v) => v,
            None => self.internal,
        }
    }

    /// Request an open/close.
    ///
    /// Uncontrolled cells apply the value; controlled cells forward it — the
    /// cell never wins a disagreement with its controller.
    pub fn request(&mut self, open: bool) -> OpenRequest {
        if self.is_controlled() {
            OpenRequest::Forward(open)
        } else {
            self.internal = open;
            OpenRequest::Applied(open)
        }
    }

    /// Reconcile the externally supplied open value.
    ///
    /// `Some(v)` mirrors `v` into internal state so that a later switch to
    /// uncontrolled continues from the same value. `None` after `Some`
    /// switches the cell to uncontrolled without resetting the current
    /// boolean.
    pub fn sync_external(&mut self, external: Option<bool>) {
        if let Some(v) = external {
            self.internal = v;
        }
        self.external = external;
    }
}

impl Default for OpenCell {
    fn default() -> Self {
        Self::uncontrolled(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncontrolled_applies_requests() {
        let mut cell = OpenCell::uncontrolled(false);
        assert!(!cell.read());

        assert_eq!(cell.request(true), OpenRequest::Applied(true));
        assert!(cell.read());

        assert_eq!(cell.request(false), OpenRequest::Applied(false));
        assert!(!cell.read());
    }

    #[test]
    fn default_open_seed_only_at_construction() {
        let cell = OpenCell::uncontrolled(true);
        assert!(cell.read());

        // A controlled construction ignores the seed in favor of external.
        let cell = OpenCell::new(Some(false), true);
        assert!(!cell.read());
    }

    #[test]
    fn controlled_never_wins_a_disagreement() {
        let mut cell = OpenCell::controlled(false);

        assert_eq!(cell.request(true), OpenRequest::Forward(true));
        // Still closed: the controller has not confirmed.
        assert!(!cell.read());

        cell.sync_external(Some(true));
        assert!(cell.read());
    }

    #[test]
    fn external_is_source_of_truth_while_controlled() {
        let mut cell = OpenCell::controlled(false);
        for v in [true, false, true, true, false] {
            cell.sync_external(Some(v));
            assert_eq!(cell.read(), v);
        }
    }

    #[test]
    fn defined_to_undefined_keeps_current_value() {
        let mut cell = OpenCell::controlled(false);
        cell.sync_external(Some(true));
        assert!(cell.read());

        // Controller withdraws: the cell becomes uncontrolled but keeps the
        // last mirrored value.
        cell.sync_external(None);
        assert!(!cell.is_controlled());
        assert!(cell.read());

        // And requests now apply locally.
        assert_eq!(cell.request(false), OpenRequest::Applied(false));
        assert!(!cell.read());
    }

    #[test]
    fn undefined_to_defined_enters_controlled_mode() {
        let mut cell = OpenCell::uncontrolled(true);
        cell.sync_external(Some(false));
        assert!(cell.is_controlled());
        assert!(!cell.read());
    }
}
