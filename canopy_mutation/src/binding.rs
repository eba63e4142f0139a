// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mutation-to-form binding and its submit lifecycle.
//!
//! A [`MutationBinding`] wires a bound action to a [`FormState`] and
//! enforces the ordering the rest of the framework relies on:
//!
//! 1. **Client validation strictly precedes dispatch.** [`MutationBinding::submit`]
//!    validates the current values against the client schema; on failure the
//!    field errors are painted and the server is never called.
//! 2. **A second submit while one is pending is refused**, so duplicate
//!    in-flight mutations cannot happen through the binding (no server-side
//!    idempotency is assumed).
//! 3. **Success side effects strictly follow resolution.** Only when the
//!    host feeds the resolved outcome into [`MutationBinding::resolve`] does
//!    the form baseline reset to the caller's projection of the server's
//!    canonical record, and only then are the action's invalidation tags
//!    reported — never speculatively.
//! 4. **Server errors are non-destructive.** The form stays populated and
//!    dirty; errors land on the fields the caller maps them to, or on the
//!    root message.
//!
//! There is no cancellation: if the owning chrome closes while a submit is
//! pending, the eventual [`MutationBinding::resolve`] still runs and still
//! reports its invalidation tags. That is a deliberate choice inherited
//! from the original console, not an oversight; hosts wanting abort-on-close
//! must cancel at the transport layer and simply never resolve.

use alloc::boxed::Box;
use core::fmt;

use crate::action::{Action, Bound, Dispatch, Tag};
use crate::error::ActionError;
use crate::form::FormState;
use crate::outcome::{FieldErrors, Outcome};

/// Client-side validation schema over a value type.
///
/// Implemented for any `Fn(&V) -> Result<(), FieldErrors>`, so a schema is
/// usually just a closure; hosts with a schema library put the adapter
/// here.
pub trait Schema<V> {
    /// Validate `values`, reporting all failures at once.
    fn validate(&self, values: &V) -> Result<(), FieldErrors>;
}

impl<V, F> Schema<V> for F
where
    F: Fn(&V) -> Result<(), FieldErrors>,
{
    fn validate(&self, values: &V) -> Result<(), FieldErrors> {
        self(values)
    }
}

/// Result of [`MutationBinding::submit`].
pub enum SubmitStep<'a, A: Action> {
    /// Client validation failed; errors are on the form, nothing was
    /// dispatched.
    Rejected,
    /// A dispatch is already in flight; nothing was dispatched.
    AlreadyPending,
    /// Validation passed: execute this and feed the outcome to
    /// [`MutationBinding::resolve`].
    Dispatch(Dispatch<'a, A>),
}

impl<A: Action> fmt::Debug for SubmitStep<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => f.write_str("Rejected"),
            Self::AlreadyPending => f.write_str("AlreadyPending"),
            Self::Dispatch(_) => f.write_str("Dispatch(..)"),
        }
    }
}

/// Result of [`MutationBinding::resolve`].
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// The mutation succeeded and the baseline was reset; the host must now
    /// broadcast these invalidation tags.
    Success {
        /// Tags declared by the action, reported strictly after resolution.
        invalidates: &'static [Tag],
    },
    /// The outcome carried validation errors; they were painted on the
    /// form's fields.
    Invalid,
    /// The server rejected the mutation; the error was painted per the
    /// caller's mapping and is returned for toasting.
    Failed(ActionError),
}

type MapServerError<V> = Box<dyn Fn(&ActionError, &V) -> FieldErrors>;

/// A typed, server-executed mutation bound to client form state.
pub struct MutationBinding<A: Action, S> {
    bound: Bound<A>,
    schema: S,
    form: FormState<A::Input>,
    map_response: Box<dyn Fn(&A::Data) -> A::Input>,
    map_server_error: Option<MapServerError<A::Input>>,
}

impl<A: Action, S> fmt::Debug for MutationBinding<A, S>
where
    A::Input: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationBinding")
            .field("action", &A::NAME)
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}

impl<A, S> MutationBinding<A, S>
where
    A: Action,
    A::Input: Clone + PartialEq,
    S: Schema<A::Input>,
{
    /// Bind `action` (with its fixed identifiers) to a fresh form.
    ///
    /// `map_response` projects the server's canonical record back into the
    /// client value shape; the dirty baseline is reset to its result on
    /// every success, so a server that normalizes or derives fields keeps
    /// the pristine state honest.
    pub fn new(
        bound: Bound<A>,
        schema: S,
        defaults: A::Input,
        map_response: impl Fn(&A::Data) -> A::Input + 'static,
    ) -> Self {
        Self {
            bound,
            schema,
            form: FormState::new(defaults),
            map_response: Box::new(map_response),
            map_server_error: None,
        }
    }

    /// Supply the caller's server-error-to-field mapping.
    ///
    /// The same [`ErrorKind`](crate::error::ErrorKind) means different
    /// things for different resources (duplicate name vs. duplicate
    /// domain), so the mapping is never hardcoded here. An empty map from
    /// the mapping, or no mapping at all, routes the error's message to the
    /// form's root.
    #[must_use]
    pub fn with_server_error_mapping(
        mut self,
        map: impl Fn(&ActionError, &A::Input) -> FieldErrors + 'static,
    ) -> Self {
        self.map_server_error = Some(Box::new(map));
        self
    }

    /// The bound form state.
    pub const fn form(&self) -> &FormState<A::Input> {
        &self.form
    }

    /// Mutable access to the form for value edits.
    pub const fn form_mut(&mut self) -> &mut FormState<A::Input> {
        &mut self.form
    }

    /// The action's bound identifiers.
    pub const fn params(&self) -> &A::Params {
        self.bound.params()
    }

    /// Validate and, if clean, dispatch.
    ///
    /// Client validation strictly precedes the dispatch; a schema failure
    /// paints field errors and refuses to dispatch. A submit while another
    /// is pending is refused outright.
    pub fn submit(&mut self) -> SubmitStep<'_, A> {
        if self.form.is_submitting() {
            return SubmitStep::AlreadyPending;
        }
        if let Err(errors) = self.schema.validate(self.form.values()) {
            self.form.merge_errors(errors);
            return SubmitStep::Rejected;
        }
        self.form.begin_submit();
        SubmitStep::Dispatch(Dispatch {
            action: A::NAME,
            params: self.bound.params(),
            input: self.form.values().clone(),
        })
    }

    /// Feed the resolved outcome back in.
    ///
    /// Success resets the baseline through `map_response` and reports the
    /// action's invalidation tags. Errors are painted without resetting
    /// values or dirtiness. This runs even if the owning chrome has since
    /// closed — in-flight mutations are not cancelled.
    pub fn resolve(&mut self, outcome: Outcome<A::Data>) -> Resolution {
        self.form.end_submit();
        match outcome {
            Outcome::Success(data) => {
                self.form.reset((self.map_response)(&data));
                Resolution::Success {
                    invalidates: A::INVALIDATES,
                }
            }
            Outcome::ValidationError(errors) => {
                self.form.merge_errors(errors);
                Resolution::Invalid
            }
            Outcome::ServerError(err) => {
                let mapped = self
                    .map_server_error
                    .as_ref()
                    .map(|map| map(&err, self.form.values()))
                    .unwrap_or_default();
                if mapped.is_empty() {
                    self.form.set_root_error(err.message.clone());
                } else {
                    self.form.merge_errors(mapped);
                }
                Resolution::Failed(err)
            }
        }
    }
}

/// Result of [`drive`].
#[derive(Clone, Debug, PartialEq)]
pub enum Driven {
    /// Client validation refused the submit; nothing was executed.
    Rejected,
    /// A dispatch was already pending; nothing was executed.
    AlreadyPending,
    /// The transport ran and the outcome was resolved.
    Resolved(Resolution),
}

/// Submit, execute, and resolve in one strictly ordered pass.
///
/// For blocking hosts and tests: `transport` receives the dispatch and
/// returns either the canonical data or a raw transport failure, which is
/// classified through the unified taxonomy before resolution.
pub fn drive<A, S, T>(binding: &mut MutationBinding<A, S>, transport: T) -> Driven
where
    A: Action,
    A::Input: Clone + PartialEq,
    S: Schema<A::Input>,
    T: FnOnce(&Dispatch<'_, A>) -> Result<A::Data, crate::error::TransportFailure>,
{
    let outcome = match binding.submit() {
        SubmitStep::Rejected => return Driven::Rejected,
        SubmitStep::AlreadyPending => return Driven::AlreadyPending,
        SubmitStep::Dispatch(dispatch) => match transport(&dispatch) {
            Ok(data) => Outcome::Success(data),
            Err(failure) => Outcome::ServerError(ActionError::classify(A::NAME, failure)),
        },
    };
    Driven::Resolved(binding.resolve(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, TransportFailure};
    use alloc::string::{String, ToString};

    #[derive(Clone, Debug, PartialEq)]
    struct AppInput {
        name: String,
        port: u16,
    }

    struct UpdateApp;
    impl Action for UpdateApp {
        type Input = AppInput;
        type Data = AppInput;
        type Params = (u64, u64);
        const NAME: &'static str = "updateApp";
        const INVALIDATES: &'static [Tag] = &[Tag("app"), Tag("apps-list")];
    }

    fn schema(input: &AppInput) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if input.name.is_empty() {
            errors.set("name", "name must have at least 1 character");
        }
        if input.port == 0 {
            errors.set("port", "port must be non-zero");
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn binding(name: &str, port: u16) -> MutationBinding<UpdateApp, fn(&AppInput) -> Result<(), FieldErrors>> {
        MutationBinding::new(
            Bound::new(UpdateApp, (1, 2)),
            schema as fn(&AppInput) -> Result<(), FieldErrors>,
            AppInput {
                name: name.to_string(),
                port,
            },
            AppInput::clone,
        )
    }

    #[test]
    fn client_validation_failure_never_dispatches() {
        let mut b = binding("", 80);

        let mut calls = 0_u32;
        let driven = drive(&mut b, |_| {
            calls += 1;
            Ok(AppInput {
                name: "x".to_string(),
                port: 80,
            })
        });

        assert_eq!(driven, Driven::Rejected);
        assert_eq!(calls, 0, "schema failure must not reach the transport");
        assert_eq!(
            b.form().errors().get("name"),
            Some("name must have at least 1 character")
        );
        assert!(!b.form().is_submitting());
    }

    #[test]
    fn success_resets_baseline_to_mapped_response() {
        let mut b = binding("api", 80);
        b.form_mut().edit_field("name", |v| v.name = "x".to_string());
        assert!(b.form().is_dirty());

        let driven = drive(&mut b, |dispatch| {
            assert_eq!(dispatch.action, "updateApp");
            assert_eq!(*dispatch.params, (1, 2));
            // Server echoes the canonical record.
            Ok(AppInput {
                name: dispatch.input.name.clone(),
                port: 80,
            })
        });

        assert_eq!(
            driven,
            Driven::Resolved(Resolution::Success {
                invalidates: UpdateApp::INVALIDATES,
            })
        );
        assert!(!b.form().is_dirty(), "dirty must be false right after success");
        assert_eq!(b.form().values().name, "x");
    }

    #[test]
    fn server_error_maps_to_caller_chosen_field() {
        let mut b = binding("api", 80).with_server_error_mapping(|err, values| {
            let mut errors = FieldErrors::new();
            if err.kind == ErrorKind::AlreadyExists {
                errors.set(
                    "name",
                    alloc::format!("App {} already exists. Try another name.", values.name),
                );
            }
            errors
        });
        b.form_mut().edit_field("name", |v| v.name = "taken".to_string());

        let driven = drive(&mut b, |_| {
            Err(TransportFailure::Rejection {
                kind: ErrorKind::AlreadyExists,
                message: "app exists".to_string(),
            })
        });

        let Driven::Resolved(Resolution::Failed(err)) = driven else {
            panic!("expected a failed resolution");
        };
        assert_eq!(err.kind, ErrorKind::AlreadyExists);
        assert_eq!(err.action, "updateApp");

        // Field mapped, form untouched: still open for correction, still dirty.
        assert_eq!(
            b.form().errors().get("name"),
            Some("App taken already exists. Try another name.")
        );
        assert!(b.form().is_dirty());
        assert_eq!(b.form().values().name, "taken");
    }

    #[test]
    fn unmapped_server_error_lands_on_the_root() {
        let mut b = binding("api", 80);
        b.form_mut().edit(|v| v.port = 8080);

        let driven = drive(&mut b, |_| {
            Err(TransportFailure::Failure {
                message: "connection reset".to_string(),
            })
        });

        let Driven::Resolved(Resolution::Failed(err)) = driven else {
            panic!("expected a failed resolution");
        };
        assert_eq!(err.kind, ErrorKind::InternalError);
        assert_eq!(b.form().errors().root(), Some("connection reset"));
        assert!(b.form().is_dirty());
    }

    #[test]
    fn second_submit_while_pending_is_refused() {
        let mut b = binding("api", 80);

        let step = b.submit();
        assert!(matches!(step, SubmitStep::Dispatch(_)));
        drop(step);

        assert!(matches!(b.submit(), SubmitStep::AlreadyPending));

        // After resolution, submitting works again.
        b.resolve(Outcome::Success(AppInput {
            name: "api".to_string(),
            port: 80,
        }));
        assert!(matches!(b.submit(), SubmitStep::Dispatch(_)));
    }

    #[test]
    fn resolve_runs_even_after_the_chrome_moved_on() {
        // No cancellation: the binding accepts a resolution whenever the
        // transport finally answers, and still reports its tags.
        let mut b = binding("api", 80);
        let step = b.submit();
        assert!(matches!(step, SubmitStep::Dispatch(_)));
        drop(step);

        let resolution = b.resolve(Outcome::Success(AppInput {
            name: "api".to_string(),
            port: 80,
        }));
        assert_eq!(
            resolution,
            Resolution::Success {
                invalidates: UpdateApp::INVALIDATES,
            }
        );
    }

    #[test]
    fn server_side_validation_paints_fields_non_destructively() {
        let mut b = binding("api", 80);
        b.form_mut().edit(|v| v.port = 8080);

        let mut errors = FieldErrors::new();
        errors.set("port", "port already allocated");
        let step = b.submit();
        assert!(matches!(step, SubmitStep::Dispatch(_)));
        drop(step);

        let resolution = b.resolve(Outcome::ValidationError(errors));
        assert_eq!(resolution, Resolution::Invalid);
        assert_eq!(b.form().errors().get("port"), Some("port already allocated"));
        assert!(b.form().is_dirty());
        assert_eq!(b.form().values().port, 8080);
    }
}
