//! mp-autosubmit
//!
//! Turns the player page's volume form into a live control: every change of
//! the slider is POSTed to the form's `action` in the background and the
//! manual submit button is hidden.

pub mod config;
mod dom;
pub mod error;
mod logging;
mod payload;
mod submitter;
mod transport;

use std::rc::Rc;

use futures::task::LocalSpawn;
use wasm_bindgen::prelude::*;
use web_sys::{window, AddEventListenerOptions, Document, Window};

pub use crate::config::Config;
pub use crate::dom::VolumeForm;
pub use crate::error::{DeliveryError, SetupError};
pub use crate::payload::Payload;
pub use crate::submitter::{AutoSubmitter, BrowserSpawner};
pub use crate::transport::{build_request, check_status, FetchTransport, Transport};

/// Arm the form in `document`, sending through the browser's `fetch`
pub fn initialize(document: &Document, config: &Config) -> Result<VolumeForm, SetupError> {
    let win = window().ok_or(SetupError::NoWindow)?;
    initialize_with(document, config, FetchTransport::new(win), BrowserSpawner)
}

/// Arm the form with a caller-supplied transport and spawner.
///
/// All elements are validated before the listener is registered and the
/// submit button hidden; on error the page is left untouched.
pub fn initialize_with<T, S>(
    document: &Document,
    config: &Config,
    transport: T,
    spawner: S,
) -> Result<VolumeForm, SetupError>
where
    T: Transport + 'static,
    S: LocalSpawn + 'static,
{
    let form = VolumeForm::locate(document, config)?;
    let submitter = Rc::new(AutoSubmitter::new(transport, spawner));

    form.listen(&config.trigger_event, submitter)?;
    form.hide_submit()?;

    tracing::info!(
        form = %config.form_id,
        control = %config.control_name,
        action = %form.action(),
        "Volume auto-submit armed"
    );
    Ok(form)
}

fn arm(document: &Document, config: &Config) -> Result<(), JsValue> {
    match initialize(document, config) {
        Ok(_) => Ok(()),
        Err(err) => {
            tracing::error!(error = %err, "Volume auto-submit disabled");
            Err(err.into())
        }
    }
}

/// Run `arm` once the page has loaded: right away if it already has,
/// otherwise on the next `load` event.
pub fn arm_on_load<F>(win: &Window, arm: F) -> Result<(), JsValue>
where
    F: FnOnce(&Document) -> Result<(), JsValue> + 'static,
{
    let document = win.document().ok_or(SetupError::NoDocument)?;

    if document.ready_state() == "complete" {
        return arm(&document);
    }
    once_on_load(win, document, arm)
}

/// Register `arm` as a `{ once: true }` listener for the window's `load`.
/// An error from `arm` is thrown out of the listener.
pub fn once_on_load<F>(win: &Window, document: Document, arm: F) -> Result<(), JsValue>
where
    F: FnOnce(&Document) -> Result<(), JsValue> + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let on_load = Closure::once_into_js(move || {
        if let Err(err) = arm(&document) {
            wasm_bindgen::throw_val(err);
        }
    });
    win.add_event_listener_with_callback_and_add_event_listener_options(
        "load",
        on_load.unchecked_ref(),
        &options,
    )
}

#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let win = window().ok_or(SetupError::NoWindow)?;
    let search = win.location().search().unwrap_or_default();
    let config = Config::default().with_query_overrides(&search);
    logging::init(config.max_level());

    arm_on_load(&win, move |document| arm(document, &config))
}

/// Explicitly arm a differently-named form, e.g.
/// `initializeForm({ formId: "balance_form", controlName: "balance" })`.
#[wasm_bindgen(js_name = initializeForm)]
pub fn initialize_form(options: JsValue) -> Result<(), JsValue> {
    let win = window().ok_or(SetupError::NoWindow)?;
    let config = Config::from_js(options)?;
    let document = win.document().ok_or(SetupError::NoDocument)?;
    arm(&document, &config)
}
