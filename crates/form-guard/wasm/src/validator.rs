//! `FormValidator`: one engine bound to one form, with its listeners

use crate::dom::DomForm;
use crate::listener::Listener;
use form_guard_core::{FormGuardConfig, SubmissionGate, ValidationEngine};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

type SharedEngine = Rc<RefCell<ValidationEngine<DomForm>>>;

/// Set on every form element a validator is bound to
pub(crate) const BOUND_ATTR: &str = "data-form-guard";

/// Run `f` on the engine unless another handler already holds it
///
/// `focus()` during a submit fires `blur` synchronously; that nested
/// handler finds the engine borrowed and skips.
fn with_engine(engine: &SharedEngine, event: &str, f: impl FnOnce(&mut ValidationEngine<DomForm>)) {
    match engine.try_borrow_mut() {
        Ok(mut engine) => f(&mut engine),
        Err(_) => console_debug!("engine busy, skipping nested {} event", event),
    }
}

/// Error for a JS call made while a handler holds the engine
fn engine_busy(call: &str) -> JsValue {
    console_debug!("engine busy, {} unavailable inside a nested event", call);
    JsValue::from_str("form validation is busy handling another event")
}

/// Client-side validation for a single form
///
/// # Example (JavaScript)
/// ```javascript
/// const validator = new FormValidator('#reservationForm');
/// if (!validator.validateForm()) {
///     console.log(validator.errors());
/// }
/// ```
#[wasm_bindgen]
pub struct FormValidator {
    form: Option<Element>,
    engine: Option<SharedEngine>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl FormValidator {
    /// Bind to the first element matching `selector`
    ///
    /// A selector that matches nothing, or does not parse, gives an inert
    /// validator rather than an error.
    #[wasm_bindgen(constructor)]
    pub fn new(selector: &str) -> Result<FormValidator, JsValue> {
        Self::for_selector(selector, FormGuardConfig::default())
    }

    /// Like the constructor, with a configuration object
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(selector: &str, config: JsValue) -> Result<FormValidator, JsValue> {
        let config = crate::config_from_js(config)?;
        Self::for_selector(selector, config)
    }

    /// Whether the validator found a form and is listening to it
    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.engine.is_some()
    }

    /// Validate the first field whose name (or id) is `key`
    ///
    /// Unknown fields pass.
    #[wasm_bindgen(js_name = validateField)]
    pub fn validate_field(&self, key: &str) -> bool {
        let Some(engine) = &self.engine else {
            return true;
        };
        let mut passed = true;
        with_engine(engine, "validateField", |engine| {
            if let Some(id) = engine.field_id(key) {
                passed = engine.validate_field(id);
            }
        });
        passed
    }

    /// Run the full submit-time validation without submitting
    #[wasm_bindgen(js_name = validateForm)]
    pub fn validate_form(&self) -> bool {
        let Some(engine) = &self.engine else {
            return true;
        };
        let mut gate = SubmissionGate::Proceed;
        with_engine(engine, "validateForm", |engine| gate = engine.validate_form());
        gate.is_proceed()
    }

    /// Cross-field messages for the form's current state
    ///
    /// Fails while one of the form's own handlers is running.
    #[wasm_bindgen(js_name = runCustomValidations)]
    pub fn run_custom_validations(&self) -> Result<JsValue, JsValue> {
        let messages = match &self.engine {
            Some(engine) => engine
                .try_borrow_mut()
                .map_err(|_| engine_busy("runCustomValidations"))?
                .run_custom_validations(),
            None => Vec::new(),
        };
        Ok(serde_wasm_bindgen::to_value(&messages)?)
    }

    /// Current error map, `{ fieldName: [message] }`
    ///
    /// Fails while one of the form's own handlers is running.
    pub fn errors(&self) -> Result<JsValue, JsValue> {
        let errors = match &self.engine {
            Some(engine) => engine
                .try_borrow()
                .map_err(|_| engine_busy("errors"))?
                .errors()
                .clone(),
            None => Default::default(),
        };
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        Ok(errors.as_map().serialize(&serializer)?)
    }
}

impl FormValidator {
    fn inert() -> Self {
        Self {
            form: None,
            engine: None,
            listeners: Vec::new(),
        }
    }

    pub(crate) fn for_selector(selector: &str, config: FormGuardConfig) -> Result<Self, JsValue> {
        let document = crate::document()?;
        match document.query_selector(selector) {
            Ok(Some(form)) => Self::attach(form, config),
            Ok(None) => Ok(Self::inert()),
            Err(err) => {
                console_warn!("invalid form selector {:?}: {:?}", selector, err);
                Ok(Self::inert())
            }
        }
    }

    /// Decorate `form` and start listening to it
    ///
    /// Blur and input listeners go on the fields present now; fields added
    /// later are still validated on submit.
    pub fn attach(form: Element, config: FormGuardConfig) -> Result<Self, JsValue> {
        let view = DomForm::new(form.clone(), config.classes.clone())?;
        let fields = view.fields().to_vec();
        let engine: SharedEngine = Rc::new(RefCell::new(ValidationEngine::new(view, config)));
        form.set_attribute(BOUND_ATTR, "")?;

        let mut listeners = Vec::with_capacity(fields.len() * 2 + 1);
        for field in &fields {
            let on_blur = Rc::clone(&engine);
            let target = field.clone();
            listeners.push(Listener::attach(field, "blur", move |_: Event| {
                with_engine(&on_blur, "blur", |engine| {
                    if let Some(id) = engine.view().field_id_of(&target) {
                        engine.validate_field(id);
                    }
                });
            })?);

            let on_input = Rc::clone(&engine);
            let target = field.clone();
            listeners.push(Listener::attach(field, "input", move |_: Event| {
                with_engine(&on_input, "input", |engine| {
                    if let Some(id) = engine.view().field_id_of(&target) {
                        engine.clear_field(id);
                    }
                });
            })?);
        }

        let on_submit = Rc::clone(&engine);
        listeners.push(Listener::attach(&form, "submit", move |event: Event| {
            with_engine(&on_submit, "submit", |engine| {
                if engine.validate_form() == SubmissionGate::Cancel {
                    event.prevent_default();
                }
            });
        })?);

        Ok(Self {
            form: Some(form),
            engine: Some(engine),
            listeners,
        })
    }

    pub fn form(&self) -> Option<&Element> {
        self.form.as_ref()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn bind(html: &str) -> FormValidator {
        let body = crate::document().unwrap().body().unwrap();
        body.set_inner_html(html);
        let form = body.query_selector("form").unwrap().unwrap();
        FormValidator::attach(form, FormGuardConfig::default()).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_reads_fail_while_handler_holds_engine() {
        let validator = bind(r#"<form id="held"><input name="a" required></form>"#);
        let engine = validator.engine.clone().unwrap();
        let _held = engine.borrow_mut();

        assert!(validator.errors().is_err());
        assert!(validator.run_custom_validations().is_err());
        assert_eq!(validator.form().map(|f| f.id()).as_deref(), Some("held"));
    }

    #[wasm_bindgen_test]
    fn test_reads_succeed_once_released() {
        let validator = bind(r#"<form id="free"><input name="a" required></form>"#);
        assert!(!validator.validate_form());
        assert!(validator.errors().is_ok());
        assert!(validator.run_custom_validations().is_ok());
    }
}
