// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action descriptors: the mutation contract the core consumes.
//!
//! An [`Action`] describes one server-executed mutation: a typed input the
//! client validates, the canonical data shape the server returns, positional
//! identifiers bound before the input (project id, resource id), a name for
//! diagnostics, and the cache tags a success invalidates. The core never
//! executes an action — it emits a [`Dispatch`] and the host's transport
//! does the rest.
//!
//! Invalidation is a named-tag broadcast: the action declares which tags a
//! success stales, and bindings/invokers guarantee they are reported
//! strictly after the resolved outcome, never speculatively.

use core::fmt;

/// An opaque cache-invalidation label.
///
/// Tag names belong to the host's caching layer; the core only moves them
/// around. List views subscribe to tags; a successful mutation naming a tag
/// makes those reads stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tag(pub &'static str);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A server-executed mutation's static description.
///
/// Implementations are zero-sized descriptors in practice; per-invocation
/// state (bound identifiers) lives in [`Bound`].
pub trait Action {
    /// Client-visible input shape, validated before dispatch.
    type Input;
    /// The resource's canonical representation returned on success. May
    /// diverge from [`Self::Input`] when the server normalizes or derives
    /// fields the client only partially controls.
    type Data;
    /// Positional identifiers fixed before the input argument binds.
    type Params;

    /// The action's name, carried on every error it produces.
    const NAME: &'static str;

    /// Tags a successful invocation invalidates.
    const INVALIDATES: &'static [Tag] = &[];
}

/// An action with its positional identifiers fixed.
///
/// Mirrors pre-binding a mutation to a resource before the form attaches:
/// the identifiers are chosen once, at mount, and every dispatch carries
/// them alongside the validated input.
pub struct Bound<A: Action> {
    action: A,
    params: A::Params,
}

impl<A: Action> Clone for Bound<A>
where
    A: Clone,
    A::Params: Clone,
{
    fn clone(&self) -> Self {
        Self {
            action: self.action.clone(),
            params: self.params.clone(),
        }
    }
}

impl<A: Action> fmt::Debug for Bound<A>
where
    A: fmt::Debug,
    A::Params: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bound")
            .field("action", &self.action)
            .field("params", &self.params)
            .finish()
    }
}

impl<A: Action> Bound<A> {
    /// Fix `params` to `action`.
    pub const fn new(action: A, params: A::Params) -> Self {
        Self { action, params }
    }

    /// The action descriptor.
    pub const fn action(&self) -> &A {
        &self.action
    }

    /// The bound identifiers.
    pub const fn params(&self) -> &A::Params {
        &self.params
    }
}

/// One ready-to-execute invocation, handed from the core to the host's
/// transport.
pub struct Dispatch<'a, A: Action> {
    /// The action's name.
    pub action: &'static str,
    /// The identifiers bound before the input.
    pub params: &'a A::Params,
    /// The validated input.
    pub input: A::Input,
}

impl<A: Action> fmt::Debug for Dispatch<'_, A>
where
    A::Params: fmt::Debug,
    A::Input: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("action", &self.action)
            .field("params", self.params)
            .field("input", &self.input)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DeleteApp;
    impl Action for DeleteApp {
        type Input = ();
        type Data = ();
        type Params = (u64, u64);
        const NAME: &'static str = "deleteApp";
        const INVALIDATES: &'static [Tag] = &[Tag("apps-list"), Tag("app")];
    }

    #[test]
    fn bound_actions_carry_their_params() {
        let bound = Bound::new(DeleteApp, (3, 9));
        assert_eq!(*bound.params(), (3, 9));
        assert_eq!(DeleteApp::NAME, "deleteApp");
        assert_eq!(DeleteApp::INVALIDATES.len(), 2);
    }

    #[test]
    fn tags_display_as_their_label() {
        use alloc::string::ToString;
        assert_eq!(Tag("apps-list").to_string(), "apps-list");
    }
}
