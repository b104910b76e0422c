//! Page-wide activation: one validator per form

use crate::validator::{FormValidator, BOUND_ATTR};
use form_guard_core::FormGuardConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

/// Every validator created for a page
#[wasm_bindgen]
pub struct FormGuard {
    validators: Vec<FormValidator>,
}

#[wasm_bindgen]
impl FormGuard {
    /// Number of forms being validated
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.validators.len()
    }

    /// `id` attributes of the instrumented forms, in activation order
    #[wasm_bindgen(js_name = formIds)]
    pub fn form_ids(&self) -> Vec<String> {
        self.validators
            .iter()
            .filter_map(|v| v.form())
            .map(|form| form.id())
            .collect()
    }
}

impl FormGuard {
    pub fn validators(&self) -> &[FormValidator] {
        &self.validators
    }
}

/// Instrument the configured forms, then every other form on the page
///
/// Each form element gets exactly one validator, however many selectors
/// match it. Forms some earlier validator is already bound to are left
/// alone, so a second activation only picks up forms added since.
pub fn attach_all(document: &Document, config: &FormGuardConfig) -> Result<FormGuard, JsValue> {
    let mut forms: Vec<Element> = Vec::new();

    for form in query_all(document, &config.selector_list())? {
        if !forms.contains(&form) {
            forms.push(form);
        }
    }

    if config.instrument_all_forms {
        for form in query_all(document, "form")? {
            let marker = &config.classes.auto_marker;
            if !form.class_list().contains(marker) {
                form.class_list().add_1(marker)?;
            }
            if !forms.contains(&form) {
                forms.push(form);
            }
        }
    }

    let (bound, unbound): (Vec<_>, Vec<_>) = forms
        .into_iter()
        .partition(|form| form.has_attribute(BOUND_ATTR));
    if !bound.is_empty() {
        console_debug!("{} form(s) already validated, skipping", bound.len());
    }

    let validators = unbound
        .into_iter()
        .map(|form| FormValidator::attach(form, config.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    console_log!("validating {} form(s)", validators.len());
    Ok(FormGuard { validators })
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}
