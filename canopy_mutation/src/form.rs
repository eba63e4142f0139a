// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Form state: values against a pristine baseline, field errors, flags.
//!
//! A [`FormState`] carries the client-side half of a mutation binding. It
//! is generic over the value type `V` — the binding's validated input
//! shape — and tracks dirtiness by comparing current values against a
//! baseline the server is allowed to move: a successful mutation calls
//! [`FormState::reset`] with the server's canonical record, so the pristine
//! state always means "what the server last confirmed", not "what the user
//! first saw".
//!
//! Field errors accumulate per [`FieldPath`]; editing a field through
//! [`FormState::edit_field`] clears that field's error (and no other),
//! matching revalidate-on-change behavior. Only a reset clears everything.

use bitflags::bitflags;

use crate::outcome::{FieldErrors, FieldPath};

bitflags! {
    /// Submission lifecycle flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct FormFlags: u8 {
        /// A dispatch is in flight.
        const SUBMITTING = 0b0000_0001;
        /// At least one dispatch has resolved since the last reset.
        const SUBMITTED  = 0b0000_0010;
    }
}

/// Client form state bound to a mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState<V> {
    baseline: V,
    current: V,
    errors: FieldErrors,
    flags: FormFlags,
}

impl<V: Clone + PartialEq> FormState<V> {
    /// Create a pristine form seeded with `defaults`.
    pub fn new(defaults: V) -> Self {
        Self {
            baseline: defaults.clone(),
            current: defaults,
            errors: FieldErrors::new(),
            flags: FormFlags::empty(),
        }
    }

    /// Current values.
    pub const fn values(&self) -> &V {
        &self.current
    }

    /// The pristine baseline (the server's last confirmed record).
    pub const fn baseline(&self) -> &V {
        &self.baseline
    }

    /// True if the current values differ from the baseline.
    pub fn is_dirty(&self) -> bool {
        self.current != self.baseline
    }

    /// Edit values without touching any field error.
    pub fn edit(&mut self, f: impl FnOnce(&mut V)) {
        f(&mut self.current);
    }

    /// Edit values on behalf of one field, clearing that field's error.
    ///
    /// Other fields' errors are left alone.
    pub fn edit_field(&mut self, path: impl Into<FieldPath>, f: impl FnOnce(&mut V)) {
        self.errors.clear(&path.into());
        f(&mut self.current);
    }

    /// Replace the baseline and current values, clearing errors and flags.
    ///
    /// This is the only destructive transition, and it only happens on a
    /// successful mutation (or an explicit caller reset).
    pub fn reset(&mut self, values: V) {
        self.baseline = values.clone();
        self.current = values;
        self.errors = FieldErrors::new();
        self.flags = FormFlags::empty();
    }

    /// Current field errors.
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Attach a message to a field.
    pub fn set_error(&mut self, path: impl Into<FieldPath>, message: impl Into<alloc::string::String>) {
        self.errors.set(path, message);
    }

    /// Set the root-level message.
    pub fn set_root_error(&mut self, message: impl Into<alloc::string::String>) {
        self.errors.set_root(message);
    }

    /// Fold a batch of errors into the form.
    pub fn merge_errors(&mut self, errors: FieldErrors) {
        self.errors.merge(errors);
    }

    /// Lifecycle flags.
    pub const fn flags(&self) -> FormFlags {
        self.flags
    }

    /// True while a dispatch is in flight.
    pub const fn is_submitting(&self) -> bool {
        self.flags.contains(FormFlags::SUBMITTING)
    }

    pub(crate) fn begin_submit(&mut self) {
        self.flags.insert(FormFlags::SUBMITTING);
    }

    pub(crate) fn end_submit(&mut self) {
        self.flags.remove(FormFlags::SUBMITTING);
        self.flags.insert(FormFlags::SUBMITTED);
    }
}
