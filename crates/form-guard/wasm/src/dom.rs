//! `FormView` over live DOM elements
//!
//! Reads field snapshots from inputs, selects and text areas, and writes the
//! engine's decisions back as classes, message nodes and the summary block.
//! DOM failures are logged and otherwise ignored: a missing parent or a
//! refused insert must never stop validation.

use form_guard_core::{
    ClassNames, FieldConstraints, FieldId, FieldKind, FieldSnapshot, FieldTag, FormView,
    ValidationSummary,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, Node, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

const FIELD_SELECTOR: &str = "input, select, textarea";
const DATE_FLOOR_ATTR: &str = "data-min-date";
const ORIGINAL_TEXT_ATTR: &str = "data-original-text";

pub struct DomForm {
    form: Element,
    document: Document,
    fields: Vec<HtmlElement>,
    classes: ClassNames,
}

impl DomForm {
    /// Capture the container and its current fields
    ///
    /// The field list is read again before every full pass, so controls a
    /// page script inserts later are validated on submit.
    pub fn new(form: Element, classes: ClassNames) -> Result<Self, JsValue> {
        let document = form
            .owner_document()
            .ok_or_else(|| JsValue::from_str("form is not attached to a document"))?;
        let fields = query_fields(&form)?;

        Ok(Self {
            form,
            document,
            fields,
            classes,
        })
    }

    pub fn fields(&self) -> &[HtmlElement] {
        &self.fields
    }

    /// Current position of `element` among the form's fields
    pub fn field_id_of(&self, element: &HtmlElement) -> Option<FieldId> {
        self.fields.iter().position(|f| f == element).map(FieldId)
    }

    fn element(&self, id: FieldId) -> Option<&HtmlElement> {
        self.fields.get(id.0)
    }

    fn class_selector(class: &str) -> String {
        format!(".{}", class)
    }

    /// `label[for=id]`, then the container's label, then a preceding `<label>`
    fn resolve_label(&self, field: &HtmlElement) -> Option<Element> {
        let id = field.id();
        if !id.is_empty() {
            let selector = format!("label[for=\"{}\"]", escape_attr(&id));
            if let Ok(Some(label)) = self.form.query_selector(&selector) {
                return Some(label);
            }
        }

        let container = Self::class_selector(&self.classes.container);
        if let Ok(Some(wrapper)) = field.closest(&container) {
            if let Ok(Some(label)) = wrapper.query_selector("label") {
                return Some(label);
            }
        }

        field
            .previous_element_sibling()
            .filter(|sibling| sibling.tag_name().eq_ignore_ascii_case("label"))
    }

    fn read_field(&self, element: &HtmlElement) -> FieldSnapshot {
        let attr = |name: &str| element.get_attribute(name);

        let (tag, kind, value, checked) = if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            (
                FieldTag::Input,
                FieldKind::from_type_attr(&input.type_()),
                input.value(),
                input.checked(),
            )
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            (FieldTag::Select, FieldKind::Other, select.value(), false)
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            (FieldTag::TextArea, FieldKind::Other, area.value(), false)
        } else {
            (FieldTag::Input, FieldKind::Other, String::new(), false)
        };

        FieldSnapshot {
            name: attr("name").unwrap_or_default(),
            id: element.id(),
            tag,
            kind,
            value,
            checked,
            label: self.resolve_label(element).and_then(|l| l.text_content()),
            placeholder: attr("placeholder"),
            constraints: FieldConstraints {
                required: element.has_attribute("required"),
                min: attr("min"),
                max: attr("max"),
                pattern: attr("pattern"),
                title: attr("title"),
                min_date_today: attr(DATE_FLOOR_ATTR).as_deref() == Some("today"),
            },
        }
    }

    fn remove_inline_message(&self, field: &HtmlElement) {
        let Some(parent) = field.parent_element() else {
            return;
        };
        let selector = Self::class_selector(&self.classes.error_message);
        if let Ok(Some(existing)) = parent.query_selector(&selector) {
            existing.remove();
        }
    }

    fn build_inline_message(&self, message: &str) -> Result<Element, JsValue> {
        let node = self.document.create_element("div")?;
        node.set_class_name(&self.classes.error_message);
        let icon = self.document.create_element("i")?;
        icon.set_class_name("fas fa-exclamation-circle");
        node.append_child(&icon)?;
        node.append_child(&self.document.create_text_node(message))?;
        Ok(node)
    }

    fn summary_element(&self) -> Result<Element, JsValue> {
        let selector = Self::class_selector(&self.classes.summary);
        if let Some(existing) = self.form.query_selector(&selector)? {
            return Ok(existing);
        }
        let summary = self.document.create_element("div")?;
        summary.set_class_name(&self.classes.summary);
        self.form
            .insert_before(&summary, self.form.first_child().as_ref())?;
        Ok(summary)
    }

    fn render_summary(&self, summary: &ValidationSummary) -> Result<(), JsValue> {
        let block = self.summary_element()?;
        block.set_text_content(None);

        let heading = self.document.create_element("h4")?;
        let icon = self.document.create_element("i")?;
        icon.set_class_name("fas fa-exclamation-triangle");
        heading.append_child(&icon)?;
        heading.append_child(&self.document.create_text_node(&format!(" {}", summary.heading)))?;
        block.append_child(&heading)?;

        let list = self.document.create_element("ul")?;
        for item in &summary.items {
            let li = self.document.create_element("li")?;
            li.set_text_content(Some(item));
            list.append_child(&li)?;
        }
        block.append_child(&list)?;

        block.class_list().add_1(&self.classes.summary_visible)
    }

    fn wrap(&self, field: &HtmlElement) -> Result<(), JsValue> {
        let container = Self::class_selector(&self.classes.container);
        if field.closest(&container)?.is_some() {
            return Ok(());
        }
        let Some(parent) = field.parent_node() else {
            return Ok(());
        };
        let wrapper = self.document.create_element("div")?;
        wrapper.set_class_name(&self.classes.container);
        let anchor: &Node = field;
        parent.insert_before(&wrapper, Some(anchor))?;
        wrapper.append_child(field)?;
        Ok(())
    }

    fn busy(&self, busy_text: &str) -> Result<(), JsValue> {
        self.form.class_list().add_1(&self.classes.submitting)?;
        let Some(button) = self.form.query_selector("button[type=\"submit\"]")? else {
            return Ok(());
        };
        let Ok(button) = button.dyn_into::<HtmlButtonElement>() else {
            return Ok(());
        };
        button.set_disabled(true);
        // a repeated pass would otherwise record the busy caption
        if !button.has_attribute(ORIGINAL_TEXT_ATTR) {
            let original = button.text_content().unwrap_or_default();
            button.set_attribute(ORIGINAL_TEXT_ATTR, &original)?;
        }
        button.set_text_content(Some(busy_text));
        Ok(())
    }
}

impl FormView for DomForm {
    fn form_id(&self) -> Option<String> {
        Some(self.form.id()).filter(|id| !id.is_empty())
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn refresh(&mut self) -> bool {
        match query_fields(&self.form) {
            Ok(fields) if fields != self.fields => {
                self.fields = fields;
                true
            }
            Ok(_) => false,
            Err(err) => {
                console_warn!("could not re-read form fields: {:?}", err);
                false
            }
        }
    }

    fn field(&self, id: FieldId) -> Option<FieldSnapshot> {
        self.element(id).map(|el| self.read_field(el))
    }

    fn mark_required_label(&mut self, id: FieldId) {
        let Some(field) = self.element(id) else {
            return;
        };
        if let Some(label) = self.resolve_label(field) {
            if let Err(err) = label.class_list().add_1(&self.classes.required_label) {
                console_warn!("could not mark required label: {:?}", err);
            }
        }
    }

    fn ensure_container(&mut self, id: FieldId) {
        if let Some(field) = self.element(id) {
            if let Err(err) = self.wrap(field) {
                console_warn!("could not wrap field #{}: {:?}", id.0, err);
            }
        }
    }

    fn show_field_error(&mut self, id: FieldId, message: &str) {
        let Some(field) = self.element(id) else {
            return;
        };
        let classes = field.class_list();
        let _ = classes.add_1(&self.classes.invalid);
        let _ = classes.remove_1(&self.classes.valid);

        self.remove_inline_message(field);
        let result = self
            .build_inline_message(message)
            .and_then(|node| match field.parent_node() {
                Some(parent) => parent.append_child(&node).map(|_| ()),
                None => Ok(()),
            });
        if let Err(err) = result {
            console_warn!("could not show field error: {:?}", err);
        }
    }

    fn clear_field_error(&mut self, id: FieldId) {
        let Some(field) = self.element(id) else {
            return;
        };
        let classes = field.class_list();
        let _ = classes.remove_1(&self.classes.invalid);
        let _ = classes.add_1(&self.classes.valid);
        self.remove_inline_message(field);
    }

    fn show_summary(&mut self, summary: &ValidationSummary) {
        if let Err(err) = self.render_summary(summary) {
            console_warn!("could not render validation summary: {:?}", err);
        }
    }

    fn hide_summary(&mut self) {
        let selector = Self::class_selector(&self.classes.summary);
        if let Ok(Some(summary)) = self.form.query_selector(&selector) {
            let _ = summary.class_list().remove_1(&self.classes.summary_visible);
        }
    }

    fn focus_field(&mut self, id: FieldId) {
        let Some(field) = self.element(id) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        field.scroll_into_view_with_scroll_into_view_options(&options);
        if let Err(err) = field.focus() {
            console_warn!("could not focus field: {:?}", err);
        }
    }

    fn show_busy_state(&mut self, busy_text: &str) {
        if let Err(err) = self.busy(busy_text) {
            console_warn!("could not enter submitting state: {:?}", err);
        }
    }
}

fn query_fields(form: &Element) -> Result<Vec<HtmlElement>, JsValue> {
    let nodes = form.query_selector_all(FIELD_SELECTOR)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// Escape a value for use inside a double-quoted attribute selector
fn escape_attr(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
