//! form-guard WASM
//!
//! Browser bindings for form-guard: binds the validation engine to page
//! forms, renders inline and summary messages, and wires the password
//! visibility toggle.

#[macro_use]
mod log;

mod dom;
mod listener;
mod registry;
mod toggle;
mod validator;

pub use dom::DomForm;
pub use registry::{attach_all, FormGuard};
pub use toggle::{toggle_password_visibility, PasswordToggle};
pub use validator::FormValidator;

use form_guard_core::{self as core, FormGuardConfig};
use wasm_bindgen::prelude::*;
use web_sys::Document;

/// Set panic hook, then instrument the page once it is parsed
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "auto-init")]
    {
        if let Err(err) = page::install() {
            console_warn!("automatic activation failed: {:?}", err);
        }
    }
}

/// Instrument every matching form on the page
///
/// Forms already validated (for instance by the automatic activation) keep
/// their existing validator and are not counted.
///
/// # Example (JavaScript)
/// ```javascript
/// const guard = initFormGuard({ busyText: 'Saving...' });
/// console.log(guard.length, guard.formIds());
/// ```
#[wasm_bindgen(js_name = initFormGuard)]
pub fn init_form_guard(config: JsValue) -> Result<FormGuard, JsValue> {
    let config = config_from_js(config)?;
    attach_all(&document()?, &config)
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    core::is_valid_email(email)
}

/// Quick phone validation
#[wasm_bindgen(js_name = isValidPhone)]
pub fn is_valid_phone_js(phone: &str) -> bool {
    core::is_valid_phone(phone)
}

/// `undefined` and `null` mean the defaults
pub(crate) fn config_from_js(config: JsValue) -> Result<FormGuardConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(FormGuardConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))
}

pub(crate) fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

#[cfg(feature = "auto-init")]
mod page {
    use super::*;
    use std::cell::RefCell;
    use wasm_bindgen::JsCast;

    thread_local! {
        /// Validators and toggle for the loaded page, alive until unload
        static PAGE: RefCell<Option<(FormGuard, PasswordToggle)>> = const { RefCell::new(None) };
    }

    fn activate() -> Result<(), JsValue> {
        let document = document()?;
        let guard = attach_all(&document, &FormGuardConfig::default())?;
        let toggle = PasswordToggle::attach(&document)?;
        PAGE.with(|page| *page.borrow_mut() = Some((guard, toggle)));
        Ok(())
    }

    pub(super) fn install() -> Result<(), JsValue> {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            // not running in a page (e.g. a worker)
            return Ok(());
        };

        if document.ready_state() != "loading" {
            return activate();
        }

        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = activate() {
                console_warn!("automatic activation failed: {:?}", err);
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
    }
}
