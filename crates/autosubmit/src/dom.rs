//! DOM contract of the volume form
//!
//! Looks up and type-checks the form, its slider and its submit button in one
//! pass, so nothing on the page is touched unless all three are present.

use std::rc::Rc;

use futures::task::LocalSpawn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Event, File, FormData, HtmlButtonElement, HtmlFormElement, HtmlInputElement,
};

use crate::config::Config;
use crate::error::{describe_js, DeliveryError, SetupError};
use crate::payload::Payload;
use crate::submitter::AutoSubmitter;
use crate::transport::Transport;

/// Validated handles to the three elements the auto-submit needs
#[derive(Debug, Clone)]
pub struct VolumeForm {
    form: HtmlFormElement,
    slider: HtmlInputElement,
    submit: HtmlButtonElement,
}

impl VolumeForm {
    pub fn locate(doc: &Document, config: &Config) -> Result<Self, SetupError> {
        let form = doc
            .get_element_by_id(&config.form_id)
            .ok_or_else(|| SetupError::FormNotFound { id: config.form_id.clone() })?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| SetupError::NotAForm { id: config.form_id.clone() })?;

        let slider = find_slider(&form, config)?;

        let submit = form
            .query_selector(&config.submit_selector)
            .map_err(|e| SetupError::Dom(describe_js(&e)))?
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            .ok_or_else(|| SetupError::SubmitNotFound {
                selector: config.submit_selector.clone(),
            })?;

        Ok(Self { form, slider, submit })
    }

    pub const fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    pub const fn slider(&self) -> &HtmlInputElement {
        &self.slider
    }

    /// The `action` attribute as written in the markup
    pub fn action(&self) -> String {
        self.form.get_attribute("action").unwrap_or_default()
    }

    /// Current value of every named field, file inputs as their file name
    pub fn snapshot(&self) -> Result<Payload, DeliveryError> {
        let data = FormData::new_with_form(&self.form)
            .map_err(|e| DeliveryError::Snapshot(describe_js(&e)))?;
        let entries = js_sys::try_iter(&data)
            .map_err(|e| DeliveryError::Snapshot(describe_js(&e)))?
            .ok_or_else(|| DeliveryError::Snapshot("FormData is not iterable".into()))?;

        let mut payload = Payload::new();
        for entry in entries {
            let entry = entry.map_err(|e| DeliveryError::Snapshot(describe_js(&e)))?;
            let pair = js_sys::Array::from(&entry);
            let name = pair.get(0).as_string().unwrap_or_default();
            let value = pair.get(1);
            match value.as_string() {
                Some(text) => payload.push(name, text),
                // url-encoded submissions carry a file field as its file name
                None => match value.dyn_ref::<File>() {
                    Some(file) => payload.push(name, file.name()),
                    None => payload.push(name, describe_js(&value)),
                },
            }
        }
        Ok(payload)
    }

    /// Register the change listener. The closure lives as long as the page.
    pub fn listen<T, S>(
        &self,
        event: &str,
        submitter: Rc<AutoSubmitter<T, S>>,
    ) -> Result<(), SetupError>
    where
        T: Transport + 'static,
        S: LocalSpawn + 'static,
    {
        let form = self.clone();
        let on_change = Closure::<dyn FnMut(Event)>::new(move |_e: Event| {
            match form.snapshot() {
                Ok(payload) => submitter.submit(&form.action(), &payload),
                Err(err) => tracing::error!(error = %err, "Error sending volume data update"),
            }
        });
        self.slider
            .add_event_listener_with_callback(event, on_change.as_ref().unchecked_ref())
            .map_err(|e| SetupError::Dom(describe_js(&e)))?;
        on_change.forget();
        Ok(())
    }

    /// Submission is automatic now, so the button goes away
    pub fn hide_submit(&self) -> Result<(), SetupError> {
        self.submit
            .style()
            .set_property("display", "none")
            .map_err(|e| SetupError::Dom(describe_js(&e)))
    }
}

fn find_slider(form: &HtmlFormElement, config: &Config) -> Result<HtmlInputElement, SetupError> {
    let name = &config.control_name;
    let control = form
        .elements()
        .named_item(name)
        .ok_or_else(|| SetupError::ControlNotFound { name: name.clone() })?;

    let input = control.dyn_into::<HtmlInputElement>().map_err(|other| {
        let found = other.dyn_ref::<web_sys::Element>().map_or_else(
            || "a group of controls".to_string(),
            |el| format!("<{}>", el.tag_name().to_lowercase()),
        );
        SetupError::NotASlider { name: name.clone(), found }
    })?;

    let kind = input.type_();
    if !kind.eq_ignore_ascii_case(&config.control_type) {
        return Err(SetupError::NotASlider {
            name: name.clone(),
            found: format!("<input type=\"{kind}\">"),
        });
    }
    Ok(input)
}
