// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Button state derived from bound forms and invokers.
//!
//! Three controls accompany every resource header:
//!
//! - [`UpdateButtonState`] — the projected submit control. Disabled unless
//!   the bound form is dirty, loading while it submits; the button itself
//!   lives inside the form but renders in the header slot.
//! - [`ActionButton`] — delete/recover/disconnect style controls that run a
//!   mutation through an [`ActionInvoker`] with a toast lifecycle: a
//!   loading toast on press, a success or error toast on resolution.
//! - [`close_target`] — resolves the "return to parent project" navigation
//!   from ambient route parameters instead of a threaded callback, so every
//!   consumer gets correct behavior for free.

use alloc::string::String;
use core::fmt;

use canopy_mutation::action::{Action, Bound, Dispatch};
use canopy_mutation::form::FormState;
use canopy_mutation::invoker::{ActionInvoker, InvokeError, Resolved};
use canopy_mutation::outcome::Outcome;

/// Alias for the toast text type.
pub type ToastText = alloc::borrow::Cow<'static, str>;

/// Derived state for the projected update (submit) button.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UpdateButtonState {
    /// True when there is nothing to submit (form pristine).
    pub disabled: bool,
    /// True while the bound form is submitting.
    pub loading: bool,
}

impl UpdateButtonState {
    /// Derive the button state from the bound form.
    pub fn from_form<V: Clone + PartialEq>(form: &FormState<V>) -> Self {
        Self {
            disabled: !form.is_dirty(),
            loading: form.is_submitting(),
        }
    }
}

/// Toast lifecycle messages for one action button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastMessages {
    /// Shown while the invocation is in flight.
    pub loading: ToastText,
    /// Shown when the invocation succeeds.
    pub success: ToastText,
    /// Title shown when the invocation fails; the error's message becomes
    /// the description.
    pub error: ToastText,
}

/// One toast emission from an action button's lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Toast {
    /// The invocation started.
    Loading(ToastText),
    /// The invocation succeeded.
    Success(ToastText),
    /// The invocation failed.
    Error {
        /// The button's configured error title.
        title: ToastText,
        /// The normalized error's message.
        description: String,
    },
}

/// A fire-and-await mutation button (delete, recover, disconnect).
///
/// Wraps an [`ActionInvoker`] with the header buttons' toast lifecycle.
/// Pressing while an invocation is pending is refused — the pending flag is
/// the caller's gate against duplicate in-flight mutations.
pub struct ActionButton<A: Action> {
    invoker: ActionInvoker<A>,
    toasts: ToastMessages,
}

impl<A: Action> fmt::Debug for ActionButton<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionButton")
            .field("invoker", &self.invoker)
            .field("toasts", &self.toasts)
            .finish()
    }
}

impl<A: Action> ActionButton<A> {
    /// Create a button around a bound action.
    pub const fn new(bound: Bound<A>, toasts: ToastMessages) -> Self {
        Self {
            invoker: ActionInvoker::new(bound),
            toasts,
        }
    }

    /// True while the invocation is in flight (renders a spinner).
    pub const fn loading(&self) -> bool {
        self.invoker.pending()
    }

    /// Press the button: begin the invocation and emit the loading toast.
    ///
    /// The dispatch goes to the host's transport; feed the outcome back via
    /// [`ActionButton::resolve`].
    pub fn press(&mut self, input: A::Input) -> Result<(Dispatch<'_, A>, Toast), InvokeError> {
        let toast = Toast::Loading(self.toasts.loading.clone());
        let dispatch = self.invoker.begin(input)?;
        Ok((dispatch, toast))
    }

    /// Resolve the invocation and emit the terminal toast.
    pub fn resolve(&mut self, outcome: Outcome<A::Data>) -> (Resolved<A::Data>, Toast) {
        let resolved = self.invoker.resolve(outcome);
        let toast = match resolved.unwrap() {
            Ok(_) => Toast::Success(self.toasts.success.clone()),
            Err(err) => Toast::Error {
                title: self.toasts.error.clone(),
                description: err.message,
            },
        };
        (resolved, toast)
    }
}

/// Ambient route parameters the close button resolves against.
///
/// Every resource page lives under a project route; implementations expose
/// the project identifier from wherever the host keeps route state.
pub trait RouteParams {
    /// The current project's identifier.
    fn project_id(&self) -> &str;
}

/// The navigation a close button performs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavTarget {
    /// Navigate to the parent project's page.
    Project(String),
}

impl NavTarget {
    /// The route path for this target.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Project(id) => alloc::format!("/projects/{id}"),
        }
    }
}

/// Resolve the close button's "return to parent" navigation from ambient
/// route parameters.
pub fn close_target(params: &impl RouteParams) -> NavTarget {
    NavTarget::Project(params.project_id().into())
}
