// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end console page: adaptive chrome + resource scope + bound form.
//!
//! This example shows how to combine:
//! - `canopy_viewport` for breakpoint classification,
//! - `canopy_chrome` for the dialog/drawer chrome that follows the viewport,
//! - `canopy_resource` for the header slot the update button projects into,
//! - `canopy_mutation` for the form bound to an update action, driven
//!   against an in-memory transport.
//!
//! Run:
//! - `cargo run -p canopy_demos --example resource_console`

use canopy_chrome::open::OpenCell;
use canopy_chrome::props::ChromeProps;
use canopy_chrome::{Chrome, ChromeTransition, Part};
use canopy_mutation::action::{Action, Bound, Tag};
use canopy_mutation::binding::{self, Driven, MutationBinding, Resolution};
use canopy_mutation::error::{ErrorKind, TransportFailure};
use canopy_mutation::outcome::FieldErrors;
use canopy_resource::buttons::UpdateButtonState;
use canopy_resource::{Resource, ResourceScope};
use canopy_viewport::{BreakpointTable, MediaQuery, Viewport};

/// The record the console edits, as the server returns it.
#[derive(Clone, Debug)]
struct App {
    name: String,
    replicas: u32,
    deleted: bool,
}

impl Resource for App {
    fn name(&self) -> &str {
        &self.name
    }

    fn deleted(&self) -> bool {
        self.deleted
    }
}

/// The editable slice of an [`App`].
#[derive(Clone, Debug, PartialEq)]
struct AppInput {
    name: String,
    replicas: u32,
}

struct UpdateApp;

impl Action for UpdateApp {
    type Input = AppInput;
    type Data = App;
    type Params = u64;
    const NAME: &'static str = "updateApp";
    const INVALIDATES: &'static [Tag] = &[Tag("apps-list"), Tag("app")];
}

fn main() {
    let table = BreakpointTable::DEFAULT;
    let mut viewport = Viewport::default();

    // The settings chrome follows the default (smallest) breakpoint; the
    // header follows its own, wider one.
    let mut chrome = Chrome::new(
        MediaQuery::new(canopy_chrome::DEFAULT_BREAKPOINT),
        OpenCell::uncontrolled(false),
        ChromeProps::default(),
    );

    // First paint: nothing is measured, so the chrome renders nothing.
    println!("before measurement: resolve = {:?}", chrome.resolve());

    // The host reports a desktop-sized viewport.
    let change = viewport.set_width(1280.0, &table);
    println!(
        "measured 1280.0 (first_measurement = {})",
        change.first_measurement
    );
    match chrome.sync(&viewport) {
        ChromeTransition::FirstResolved(family) => {
            println!("chrome resolved to {family:?}");
        }
        other => println!("unexpected transition {other:?}"),
    }

    // The page mounts a scope around the loaded resource and opens the
    // settings chrome.
    let app: App = App {
        name: "api".to_string(),
        replicas: 2,
        deleted: false,
    };
    let mut scope: ResourceScope<App, u32> = ResourceScope::new(app);
    chrome.request_open(true);

    let resolved = chrome.resolve().expect("measured chrome resolves");
    println!(
        "open = {}, content member = {:?}, class = {:?}",
        resolved.is_open(),
        resolved.scope().part(Part::Content).member_name(),
        resolved.props().class(),
    );

    // The layout effect captures the header's button slot after first
    // paint; from then on the update button projects into it.
    println!(
        "header before capture: {:?}",
        scope.header(&viewport).update_button
    );
    scope.fill_update_slot(7).expect("first fill");
    println!(
        "header after capture:  {:?}",
        scope.header(&viewport).update_button
    );

    // Bind the update action to a form seeded from the resource.
    let defaults = AppInput {
        name: scope.resource().name.clone(),
        replicas: scope.resource().replicas,
    };
    let schema = |v: &AppInput| {
        let mut errors = FieldErrors::new();
        if v.name.is_empty() {
            errors.set("name", "name must not be empty");
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    };
    let mut binding = MutationBinding::<UpdateApp, _>::new(
        Bound::new(UpdateApp, 42),
        schema,
        defaults,
        |app: &App| AppInput {
            name: app.name.clone(),
            replicas: app.replicas,
        },
    )
    .with_server_error_mapping(|err, values| {
        let mut errors = FieldErrors::new();
        if err.kind == ErrorKind::AlreadyExists {
            errors.set("name", format!("\"{}\" is already taken", values.name));
        }
        errors
    });

    let button = UpdateButtonState::from_form(binding.form());
    println!("pristine form: update button {button:?}");

    // The user edits, the button enables, and submit goes to the server.
    binding.form_mut().edit(|v| v.replicas = 4);
    let button = UpdateButtonState::from_form(binding.form());
    println!("after edit: update button {button:?}");

    let driven = binding::drive(&mut binding, |dispatch| {
        println!(
            "transport: {} params={:?} input={:?}",
            dispatch.action, dispatch.params, dispatch.input
        );
        Ok(App {
            name: dispatch.input.name.clone(),
            replicas: dispatch.input.replicas,
            deleted: false,
        })
    });
    match driven {
        Driven::Resolved(Resolution::Success { invalidates }) => {
            for tag in invalidates {
                println!("invalidate cache tag {tag}");
            }
        }
        other => println!("unexpected drive result {other:?}"),
    }
    println!("dirty after success: {}", binding.form().is_dirty());

    // A rename that collides server-side lands on the name field and keeps
    // the user's edits intact.
    binding.form_mut().edit(|v| v.name = "worker".to_string());
    let driven = binding::drive(&mut binding, |_| {
        Err(TransportFailure::Rejection {
            kind: ErrorKind::AlreadyExists,
            message: "app already exists".to_string(),
        })
    });
    if let Driven::Resolved(Resolution::Failed(err)) = driven {
        println!("server rejected: {err}");
    }
    println!(
        "name field error: {:?}, still dirty: {}",
        binding.form().errors().get("name"),
        binding.form().is_dirty()
    );

    // The window narrows; the chrome switches family but stays open, and
    // the header falls back to its narrow form.
    viewport.set_width(500.0, &table);
    match chrome.sync(&viewport) {
        ChromeTransition::Switched { from, to } => {
            println!("chrome switched {from:?} -> {to:?}");
        }
        other => println!("unexpected transition {other:?}"),
    }
    let resolved = chrome.resolve().expect("still measured");
    println!(
        "open survived the switch: {}, content member = {:?}",
        resolved.is_open(),
        resolved.scope().part(Part::Content).member_name(),
    );
    println!(
        "narrow header name element: {:?}",
        scope.header(&viewport).name_element
    );
}
