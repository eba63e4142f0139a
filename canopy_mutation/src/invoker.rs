// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fire-and-await invocation of mutations outside a form.
//!
//! Delete, recover, and disconnect buttons execute a mutation without any
//! form state around it. An [`ActionInvoker`] gives them the same contract
//! a binding gives forms — a pending flag, the unified error taxonomy, and
//! post-resolution invalidation tags — plus the unwrap contract: a
//! [`Resolved::unwrap`] either hands back the success payload or a typed
//! [`ActionError`](crate::error::ActionError) carrying the
//! kind/message/action triple, so happy-path callers can funnel every
//! failure into one generic toast handler.

use core::fmt;

use crate::action::{Action, Bound, Dispatch, Tag};
use crate::error::{ActionError, TransportFailure};
use crate::outcome::Outcome;

/// Error returned when an invocation cannot start.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvokeError {
    /// An invocation is already in flight; callers gate on
    /// [`ActionInvoker::pending`].
    AlreadyPending,
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPending => f.write_str("an invocation is already pending"),
        }
    }
}

impl core::error::Error for InvokeError {}

/// A resolved invocation: the outcome plus its post-resolution effects.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved<D> {
    action: &'static str,
    /// Tags to broadcast; non-empty only on success.
    pub invalidates: &'static [Tag],
    /// The resolved outcome.
    pub outcome: Outcome<D>,
}

impl<D> Resolved<D> {
    /// The success payload, or the typed error for a generic handler.
    pub fn unwrap(&self) -> Result<&D, ActionError> {
        self.outcome.unwrap_for(self.action)
    }
}

/// Invokes one bound action at a time, outside any form.
pub struct ActionInvoker<A: Action> {
    bound: Bound<A>,
    pending: bool,
}

impl<A: Action> fmt::Debug for ActionInvoker<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionInvoker")
            .field("action", &A::NAME)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<A: Action> ActionInvoker<A> {
    /// Create an invoker for a bound action.
    pub const fn new(bound: Bound<A>) -> Self {
        Self {
            bound,
            pending: false,
        }
    }

    /// True while an invocation is in flight.
    pub const fn pending(&self) -> bool {
        self.pending
    }

    /// Start an invocation.
    ///
    /// The returned dispatch goes to the host's transport; the outcome comes
    /// back through [`ActionInvoker::resolve`]. Refused while pending.
    pub fn begin(&mut self, input: A::Input) -> Result<Dispatch<'_, A>, InvokeError> {
        if self.pending {
            return Err(InvokeError::AlreadyPending);
        }
        self.pending = true;
        Ok(Dispatch {
            action: A::NAME,
            params: self.bound.params(),
            input,
        })
    }

    /// Feed the resolved outcome back in, clearing the pending flag.
    ///
    /// Invalidation tags are reported only on success, and only here —
    /// strictly after resolution. Like the form binding, this runs whenever
    /// the transport finally answers; there is no cancellation.
    pub fn resolve(&mut self, outcome: Outcome<A::Data>) -> Resolved<A::Data> {
        self.pending = false;
        Resolved {
            action: A::NAME,
            invalidates: if outcome.is_success() {
                A::INVALIDATES
            } else {
                &[]
            },
            outcome,
        }
    }

    /// Begin, execute, and resolve in one strictly ordered pass.
    ///
    /// The transport's failure channel is classified through the unified
    /// taxonomy before resolution.
    pub fn invoke<T>(&mut self, input: A::Input, transport: T) -> Result<Resolved<A::Data>, InvokeError>
    where
        T: FnOnce(&Dispatch<'_, A>) -> Result<A::Data, TransportFailure>,
    {
        let outcome = {
            let dispatch = self.begin(input)?;
            match transport(&dispatch) {
                Ok(data) => Outcome::Success(data),
                Err(failure) => Outcome::ServerError(ActionError::classify(A::NAME, failure)),
            }
        };
        Ok(self.resolve(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use alloc::string::ToString;

    #[derive(Clone, Debug, PartialEq)]
    struct Volume {
        name: alloc::string::String,
        deleted: bool,
    }

    struct DeleteVolume;
    impl Action for DeleteVolume {
        type Input = ();
        type Data = Volume;
        type Params = (u64, u64);
        const NAME: &'static str = "deleteVolume";
        const INVALIDATES: &'static [Tag] = &[Tag("volumes-list"), Tag("volume")];
    }

    fn invoker() -> ActionInvoker<DeleteVolume> {
        ActionInvoker::new(Bound::new(DeleteVolume, (1, 9)))
    }

    #[test]
    fn successful_invocation_reports_tags_after_resolution() {
        let mut inv = invoker();
        assert!(!inv.pending());

        let resolved = inv
            .invoke((), |dispatch| {
                assert_eq!(dispatch.action, "deleteVolume");
                assert_eq!(*dispatch.params, (1, 9));
                Ok(Volume {
                    name: "data".to_string(),
                    deleted: true,
                })
            })
            .unwrap();

        assert!(!inv.pending());
        assert_eq!(resolved.invalidates, DeleteVolume::INVALIDATES);
        assert_eq!(resolved.unwrap().unwrap().name, "data");
    }

    #[test]
    fn failed_invocation_reports_no_tags() {
        let mut inv = invoker();
        let resolved = inv
            .invoke((), |_| {
                Err(TransportFailure::Rejection {
                    kind: ErrorKind::NotFound,
                    message: "no such volume".to_string(),
                })
            })
            .unwrap();

        assert!(resolved.invalidates.is_empty());
        let err = resolved.unwrap().unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.action, "deleteVolume");
    }

    #[test]
    fn begin_while_pending_is_refused() {
        let mut inv = invoker();
        let dispatch = inv.begin(()).unwrap();
        drop(dispatch);

        assert_eq!(inv.begin(()).unwrap_err(), InvokeError::AlreadyPending);
        assert!(inv.pending());

        // Resolution clears the gate.
        inv.resolve(Outcome::ServerError(ActionError::new(
            "deleteVolume",
            ErrorKind::InternalError,
            "timeout",
        )));
        assert!(!inv.pending());
        assert!(inv.begin(()).is_ok());
    }

    #[test]
    fn unwrap_is_idempotent_on_a_resolved_invocation() {
        let mut inv = invoker();
        let resolved = inv
            .invoke((), |_| {
                Err(TransportFailure::Failure {
                    message: "socket closed".to_string(),
                })
            })
            .unwrap();

        assert_eq!(resolved.unwrap(), resolved.unwrap());
    }
}
