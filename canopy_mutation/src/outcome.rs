// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved invocation outcomes and the unwrap contract.
//!
//! An [`Outcome`] is the fully resolved result of one mutation invocation:
//! exactly one of success data, client-side validation errors, or a
//! normalized server error. [`Outcome::unwrap_for`] collapses an outcome to
//! `Result<&D, ActionError>` so happy-path callers can propagate a typed
//! error to a generic toast handler; "no data and no recognized error"
//! still produces a synthetic internal error rather than undefined
//! behavior (see [`unwrap`]).

use alloc::borrow::Cow;
use alloc::string::String;
use hashbrown::HashMap;

use crate::error::{ActionError, ErrorKind};

/// Dotted path addressing one form field (`"name"`, `"domain.subdomain"`).
pub type FieldPath = Cow<'static, str>;

/// Per-field error messages plus an optional root-level message.
///
/// Field-level entries attach to a specific input; the root message is the
/// fallback for errors that do not map to any field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors {
    fields: HashMap<FieldPath, String>,
    root: Option<String>,
}

impl FieldErrors {
    /// Create an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a message to a field, replacing any previous message for it.
    pub fn set(&mut self, path: impl Into<FieldPath>, message: impl Into<String>) {
        self.fields.insert(path.into(), message.into());
    }

    /// Set the root-level message.
    pub fn set_root(&mut self, message: impl Into<String>) {
        self.root = Some(message.into());
    }

    /// The message for a field, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.fields.get(path).map(String::as_str)
    }

    /// The root-level message, if any.
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Remove a field's message, returning it.
    pub fn clear(&mut self, path: &str) -> Option<String> {
        self.fields.remove(path)
    }

    /// True if there are no field messages and no root message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.root.is_none()
    }

    /// Number of field-level messages (the root message not included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate field-level messages in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Fold `other` into `self`, field by field; `other`'s root message
    /// wins if present.
    pub fn merge(&mut self, other: Self) {
        self.fields.extend(other.fields);
        if other.root.is_some() {
            self.root = other.root;
        }
    }
}

/// The resolved result of one mutation invocation.
///
/// Exactly one variant is populated; there is no "empty" outcome — a
/// transport that produced nothing usable is classified into
/// [`Outcome::ServerError`] before it gets here, or handled by [`unwrap`].
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<D> {
    /// The mutation succeeded; `D` is the resource's canonical
    /// representation as returned by the server.
    Success(D),
    /// Client-side schema validation failed; the server was never called.
    ValidationError(FieldErrors),
    /// The server or transport rejected the invocation.
    ServerError(ActionError),
}

impl<D> Outcome<D> {
    /// True for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success payload, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&D> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Collapse to the success payload or a typed error.
    ///
    /// `action` names the originating action for errors synthesized here
    /// (validation outcomes carry no action of their own). Unwrapping the
    /// same resolved outcome twice yields the same result both times — the
    /// operation reads, it never consumes.
    pub fn unwrap_for(&self, action: impl Into<Cow<'static, str>>) -> Result<&D, ActionError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::ValidationError(_) => Err(ActionError::new(
                action,
                ErrorKind::Validation,
                "input validation failed",
            )),
            Self::ServerError(err) => Err(err.clone()),
        }
    }
}

/// Unwrap an invocation result that may not have produced an outcome at all.
///
/// A host whose transport returned neither data nor a recognized error (a
/// `None` here) gets a synthetic [`ErrorKind::InternalError`] — never
/// undefined behavior.
pub fn unwrap<'a, D>(
    action: impl Into<Cow<'static, str>>,
    outcome: Option<&'a Outcome<D>>,
) -> Result<&'a D, ActionError> {
    match outcome {
        Some(outcome) => outcome.unwrap_for(action),
        None => Err(ActionError::missing_data(action)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn unwrap_returns_success_payload() {
        let outcome: Outcome<u32> = Outcome::Success(7);
        assert_eq!(outcome.unwrap_for("getApp"), Ok(&7));
    }

    #[test]
    fn unwrap_is_idempotent() {
        let ok: Outcome<u32> = Outcome::Success(7);
        assert_eq!(ok.unwrap_for("getApp"), ok.unwrap_for("getApp"));

        let err: Outcome<u32> = Outcome::ServerError(ActionError::new(
            "createApp",
            ErrorKind::AlreadyExists,
            "app exists",
        ));
        assert_eq!(err.unwrap_for("createApp"), err.unwrap_for("createApp"));
    }

    #[test]
    fn missing_outcome_synthesizes_internal_error() {
        let result = unwrap::<u32>("recoverApp", None);
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InternalError);
        assert_eq!(err.action, "recoverApp");
    }

    #[test]
    fn validation_outcome_unwraps_to_validation_error() {
        let mut errors = FieldErrors::new();
        errors.set("name", "required");
        let outcome: Outcome<u32> = Outcome::ValidationError(errors);

        let err = outcome.unwrap_for("createApp").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.action, "createApp");
    }

    #[test]
    fn field_errors_track_fields_and_root_independently() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());

        errors.set("name", "taken");
        errors.set("port", "out of range");
        errors.set("name", "still taken");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("still taken"));

        errors.set_root("unable to update".to_string());
        assert_eq!(errors.root(), Some("unable to update"));

        errors.clear("name");
        assert_eq!(errors.get("name"), None);
        assert!(!errors.is_empty());
    }

    #[test]
    fn merge_prefers_incoming_messages() {
        let mut base = FieldErrors::new();
        base.set("name", "old");
        base.set_root("old root");

        let mut incoming = FieldErrors::new();
        incoming.set("name", "new");
        incoming.set("port", "bad");

        base.merge(incoming);
        assert_eq!(base.get("name"), Some("new"));
        assert_eq!(base.get("port"), Some("bad"));
        // No incoming root: the old one stays.
        assert_eq!(base.root(), Some("old root"));
    }
}
