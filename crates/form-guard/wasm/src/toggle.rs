//! Password visibility toggle

use crate::listener::Listener;
use form_guard_core::toggle_visibility;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement};

const TOGGLE_SELECTOR: &str = ".toggle-password";
const FIELD_SELECTOR: &str = ".password-field";

/// Flip `field` between hidden and shown; returns the glyph for the toggle
#[wasm_bindgen(js_name = togglePasswordVisibility)]
pub fn toggle_password_visibility(field: &HtmlInputElement) -> String {
    let next = toggle_visibility(&field.type_());
    field.set_type(next.type_attr());
    next.icon().to_string()
}

/// Click handler wiring `.toggle-password` to `.password-field`
#[wasm_bindgen]
pub struct PasswordToggle {
    listener: Option<Listener>,
}

#[wasm_bindgen]
impl PasswordToggle {
    /// Wire the page's toggle, if it has both halves
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PasswordToggle, JsValue> {
        Self::attach(&crate::document()?)
    }

    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }
}

impl PasswordToggle {
    pub fn attach(document: &Document) -> Result<Self, JsValue> {
        let toggle = document.query_selector(TOGGLE_SELECTOR)?;
        let field = document
            .query_selector(FIELD_SELECTOR)?
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());

        let (Some(toggle), Some(field)) = (toggle, field) else {
            return Ok(Self { listener: None });
        };

        let control: Element = toggle.clone();
        let listener = Listener::attach(&toggle, "click", move |_: Event| {
            let icon = toggle_password_visibility(&field);
            control.set_text_content(Some(&icon));
        })?;

        Ok(Self {
            listener: Some(listener),
        })
    }
}
