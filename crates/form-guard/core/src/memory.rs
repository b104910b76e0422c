//! In-memory form
//!
//! A [`FormView`] with no page behind it. Decorations are recorded as plain
//! state so headless callers can validate a snapshot and inspect what a
//! browser would have shown.

use crate::engine::{FieldId, FormView};
use crate::errors::ValidationSummary;
use crate::field::FieldSnapshot;

/// Visual validity of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryField {
    pub snapshot: FieldSnapshot,
    pub state: FieldState,
    pub label_required: bool,
    /// Number of message containers around the field
    pub containers: usize,
    pub inline_messages: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    form_id: Option<String>,
    fields: Vec<MemoryField>,
    /// Fields added after binding, not yet seen by the engine
    pending: Vec<FieldSnapshot>,
    summary: Option<ValidationSummary>,
    summary_visible: bool,
    focused: Option<FieldId>,
    submitting: bool,
    submit_text: Option<String>,
    original_submit_text: Option<String>,
    submit_disabled: bool,
}

impl MemoryForm {
    pub fn new(form_id: Option<&str>) -> Self {
        Self {
            form_id: form_id.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, snapshot: FieldSnapshot) -> Self {
        self.fields.push(MemoryField {
            snapshot,
            ..MemoryField::default()
        });
        self
    }

    /// Add a field the way a page script would after binding
    ///
    /// The engine sees it from its next full pass onwards.
    pub fn insert_field(&mut self, snapshot: FieldSnapshot) {
        self.pending.push(snapshot);
    }

    /// Give the form a submit control with the given caption
    pub fn with_submit(mut self, text: &str) -> Self {
        self.submit_text = Some(text.to_string());
        self
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut MemoryField> {
        self.fields.iter_mut().find(|f| f.snapshot.key() == key)
    }

    /// Record a user edit of the first field named `key`
    pub fn set_value(&mut self, key: &str, value: &str) {
        if let Some(field) = self.find_mut(key) {
            field.snapshot.value = value.to_string();
        }
    }

    /// Check the option of group `name` whose value is `value`, unchecking the rest
    pub fn check(&mut self, name: &str, value: &str) {
        for field in self.fields.iter_mut().filter(|f| f.snapshot.name == name) {
            field.snapshot.checked = field.snapshot.value == value;
        }
    }

    pub fn get(&self, key: &str) -> Option<&MemoryField> {
        self.fields.iter().find(|f| f.snapshot.key() == key)
    }

    pub fn fields(&self) -> &[MemoryField] {
        &self.fields
    }

    /// Summary contents, only while visible
    pub fn visible_summary(&self) -> Option<&ValidationSummary> {
        self.summary.as_ref().filter(|_| self.summary_visible)
    }

    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_text(&self) -> Option<&str> {
        self.submit_text.as_deref()
    }

    pub fn original_submit_text(&self) -> Option<&str> {
        self.original_submit_text.as_deref()
    }

    pub fn submit_disabled(&self) -> bool {
        self.submit_disabled
    }
}

impl FormView for MemoryForm {
    fn form_id(&self) -> Option<String> {
        self.form_id.clone()
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn refresh(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        self.fields.extend(self.pending.drain(..).map(|snapshot| MemoryField {
            snapshot,
            ..MemoryField::default()
        }));
        true
    }

    fn field(&self, id: FieldId) -> Option<FieldSnapshot> {
        self.fields.get(id.0).map(|f| f.snapshot.clone())
    }

    fn mark_required_label(&mut self, id: FieldId) {
        if let Some(field) = self.fields.get_mut(id.0) {
            field.label_required = field.snapshot.label.is_some();
        }
    }

    fn ensure_container(&mut self, id: FieldId) {
        if let Some(field) = self.fields.get_mut(id.0) {
            field.containers = field.containers.max(1);
        }
    }

    fn show_field_error(&mut self, id: FieldId, message: &str) {
        if let Some(field) = self.fields.get_mut(id.0) {
            field.state = FieldState::Invalid;
            field.inline_messages.clear();
            field.inline_messages.push(message.to_string());
        }
    }

    fn clear_field_error(&mut self, id: FieldId) {
        if let Some(field) = self.fields.get_mut(id.0) {
            field.state = FieldState::Valid;
            field.inline_messages.clear();
        }
    }

    fn show_summary(&mut self, summary: &ValidationSummary) {
        self.summary = Some(summary.clone());
        self.summary_visible = true;
    }

    fn hide_summary(&mut self) {
        self.summary_visible = false;
    }

    fn focus_field(&mut self, id: FieldId) {
        self.focused = Some(id);
    }

    fn show_busy_state(&mut self, busy_text: &str) {
        self.submitting = true;
        if let Some(text) = self.submit_text.take() {
            // a second pass must not record the busy caption as the original
            if self.original_submit_text.is_none() {
                self.original_submit_text = Some(text);
            }
            self.submit_text = Some(busy_text.to_string());
            self.submit_disabled = true;
        }
    }
}
