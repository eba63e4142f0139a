// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Mutation: typed server mutations bound to client form state.
//!
//! A **mutation** is a server-executed, state-changing operation with a
//! typed input and output. This crate owns everything between "the user
//! pressed submit" and "the screen agrees with the server again", without
//! performing any I/O itself:
//!
//! - [`action`] describes a mutation: its input/output types, its name (for
//!   diagnostics and toasts), identifiers bound before the input, and the
//!   cache tags a success invalidates.
//! - [`error`] is the single point where transport failures and semantic
//!   server rejections collapse into one tagged shape ([`error::ActionError`])
//!   consumed everywhere else.
//! - [`outcome`] is the resolved result of one invocation and the unwrap
//!   contract happy-path callers chain through.
//! - [`form`] tracks values against a pristine baseline, per-field errors,
//!   and the submitting flag.
//! - [`binding`] wires a bound action to a form: client validation strictly
//!   before dispatch, success strictly before reset and invalidation,
//!   server errors painted as field or root messages without closing or
//!   resetting anything.
//! - [`invoker`] is the form-less variant for delete/recover style buttons.
//!
//! The host executes the dispatched request however it likes (HTTP, RPC, a
//! test closure) and feeds the resolved [`outcome::Outcome`] back in. The
//! [`binding::drive`] and [`invoker::ActionInvoker::invoke`] helpers run
//! that loop synchronously for blocking hosts and tests.
//!
//! ## Minimal example
//!
//! ```rust
//! # extern crate alloc;
//! # use alloc::string::ToString;
//! use canopy_mutation::action::{Action, Bound, Tag};
//! use canopy_mutation::binding::{self, Driven, MutationBinding, Resolution};
//! use canopy_mutation::outcome::FieldErrors;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct AppInput {
//!     name: alloc::string::String,
//!     port: u16,
//! }
//!
//! struct UpdateApp;
//! impl Action for UpdateApp {
//!     type Input = AppInput;
//!     type Data = AppInput; // wire shape == client shape here
//!     type Params = (u64, u64); // (project id, app id), bound before the input
//!     const NAME: &'static str = "updateApp";
//!     const INVALIDATES: &'static [Tag] = &[Tag("app"), Tag("apps-list")];
//! }
//!
//! let schema = |input: &AppInput| {
//!     let mut errors = FieldErrors::new();
//!     if input.name.is_empty() {
//!         errors.set("name", "name must not be empty");
//!     }
//!     if errors.is_empty() { Ok(()) } else { Err(errors) }
//! };
//!
//! let defaults = AppInput { name: "api".to_string(), port: 80 };
//! let mut form = MutationBinding::new(
//!     Bound::new(UpdateApp, (7, 42)),
//!     schema,
//!     defaults,
//!     |data: &AppInput| data.clone(),
//! );
//!
//! form.form_mut().edit_field("port", |v| v.port = 8080);
//! assert!(form.form().is_dirty());
//!
//! // Submit through a fake transport that echoes the input back.
//! let driven = binding::drive(&mut form, |dispatch| Ok(dispatch.input.clone()));
//! let Driven::Resolved(Resolution::Success { invalidates }) = driven else {
//!     panic!("expected success");
//! };
//! assert_eq!(invalidates, UpdateApp::INVALIDATES);
//! assert!(!form.form().is_dirty()); // baseline now matches the server
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod action;
pub mod binding;
pub mod error;
pub mod form;
pub mod invoker;
pub mod outcome;
