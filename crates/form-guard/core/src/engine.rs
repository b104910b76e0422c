// File: form-guard/core/src/engine.rs
// Purpose: Validation engine state machine over an abstract form view

use crate::config::FormGuardConfig;
use crate::cross_field::RuleSet;
use crate::errors::{ErrorSet, ValidationSummary};
use crate::field::{FieldSnapshot, FormSnapshot};
use crate::rules::{check_field, ValidationContext};
use chrono::NaiveDate;

/// Position of a field in its form, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub usize);

/// Whether a submit may go ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionGate {
    Proceed,
    Cancel,
}

impl SubmissionGate {
    pub fn is_proceed(self) -> bool {
        matches!(self, SubmissionGate::Proceed)
    }
}

/// Source of "today" for date floors
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock stuck on one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Everything the engine reads from and writes to a form
///
/// The browser adapter implements this over live elements;
/// [`MemoryForm`](crate::memory::MemoryForm) implements it in memory.
pub trait FormView {
    /// `id` attribute of the form, if any
    fn form_id(&self) -> Option<String>;

    fn field_count(&self) -> usize;

    /// Re-read the field list; returns whether it changed
    ///
    /// Views whose fields cannot change after binding keep the default.
    fn refresh(&mut self) -> bool {
        false
    }

    /// Current state of one field
    fn field(&self, id: FieldId) -> Option<FieldSnapshot>;

    /// Current state of the whole form
    fn snapshot(&self) -> FormSnapshot {
        let fields = (0..self.field_count())
            .filter_map(|i| self.field(FieldId(i)))
            .collect();
        FormSnapshot {
            form_id: self.form_id(),
            fields,
        }
    }

    /// Flag the field's label as belonging to a required field
    fn mark_required_label(&mut self, id: FieldId);

    /// Make sure the field sits inside its own message container
    fn ensure_container(&mut self, id: FieldId);

    /// Mark invalid and show `message` as the field's only inline message
    fn show_field_error(&mut self, id: FieldId, message: &str);

    /// Mark valid and drop any inline message
    fn clear_field_error(&mut self, id: FieldId);

    fn show_summary(&mut self, summary: &ValidationSummary);

    fn hide_summary(&mut self);

    /// Bring the field into view and give it focus
    fn focus_field(&mut self, id: FieldId);

    /// Put the form into its submitting state
    fn show_busy_state(&mut self, busy_text: &str);
}

/// Validation state for one form
pub struct ValidationEngine<V: FormView> {
    view: V,
    config: FormGuardConfig,
    rules: RuleSet,
    clock: Box<dyn Clock>,
    errors: ErrorSet,
}

impl<V: FormView> ValidationEngine<V> {
    /// Bind to `view` and decorate its fields
    pub fn new(view: V, config: FormGuardConfig) -> Self {
        let rules = RuleSet::standard(&config.cross_field);
        let mut engine = Self {
            view,
            config,
            rules,
            clock: Box::new(SystemClock),
            errors: ErrorSet::new(),
        };
        engine.initialize();
        engine
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Required-label marking and container wrapping; safe to repeat
    fn initialize(&mut self) {
        for i in 0..self.view.field_count() {
            let id = FieldId(i);
            let Some(field) = self.view.field(id) else {
                continue;
            };
            if field.constraints.required {
                self.view.mark_required_label(id);
            }
            self.view.ensure_container(id);
        }
        tracing::debug!(
            form = ?self.view.form_id(),
            fields = self.view.field_count(),
            "form validation attached"
        );
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Release the view, dropping all validation state
    pub fn into_view(self) -> V {
        self.view
    }

    pub fn config(&self) -> &FormGuardConfig {
        &self.config
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    /// First field whose key is `key`
    pub fn field_id(&self, key: &str) -> Option<FieldId> {
        (0..self.view.field_count())
            .map(FieldId)
            .find(|&id| self.view.field(id).is_some_and(|f| f.key() == key))
    }

    /// Validate one field and update its inline state
    pub fn validate_field(&mut self, id: FieldId) -> bool {
        let Some(field) = self.view.field(id) else {
            return true;
        };
        let today = self.clock.today();
        self.apply_field(id, &field, today).is_none()
    }

    /// Optimistic clear on edit: no rules run until the next blur or submit
    pub fn clear_field(&mut self, id: FieldId) {
        if let Some(field) = self.view.field(id) {
            self.errors.clear(field.key());
        }
        self.view.clear_field_error(id);
    }

    /// Messages from the cross-field rules for the current form state
    pub fn run_custom_validations(&mut self) -> Vec<String> {
        self.sync_fields();
        let snapshot = self.view.snapshot();
        self.custom_messages(&snapshot)
    }

    /// Validate every field plus the cross-field rules and gate the submit
    pub fn validate_form(&mut self) -> SubmissionGate {
        self.sync_fields();
        self.view.hide_summary();

        let snapshot = self.view.snapshot();
        let today = self.clock.today();
        let mut messages = Vec::new();
        let mut first_invalid = None;

        for (i, field) in snapshot.fields.iter().enumerate() {
            let id = FieldId(i);
            if let Some(message) = self.apply_field(id, field, today) {
                first_invalid.get_or_insert(id);
                messages.push(message);
            }
        }

        let field_failures = messages.len();
        messages.extend(self.custom_messages(&snapshot));

        if messages.is_empty() {
            tracing::debug!(form = ?snapshot.form_id, "form valid, submitting");
            self.view.show_busy_state(&self.config.busy_text);
            return SubmissionGate::Proceed;
        }

        tracing::debug!(
            form = ?snapshot.form_id,
            field_failures,
            cross_field_failures = messages.len() - field_failures,
            "form submission blocked"
        );
        let summary = ValidationSummary::new(&self.config.messages.summary_heading, messages);
        self.view.show_summary(&summary);
        if let Some(id) = first_invalid {
            self.view.focus_field(id);
        }
        SubmissionGate::Cancel
    }

    /// Pick up fields added since binding and decorate them
    fn sync_fields(&mut self) {
        if self.view.refresh() {
            self.initialize();
        }
    }

    /// Run the rules for one field; returns the message shown, if any
    fn apply_field(&mut self, id: FieldId, field: &FieldSnapshot, today: NaiveDate) -> Option<String> {
        let ctx = ValidationContext::new(today, &self.config.messages);
        // only the first triggered message is kept and shown
        let first = check_field(field, &ctx).into_iter().next().map(|e| e.message);

        match &first {
            Some(message) => {
                self.view.show_field_error(id, message);
                self.errors.record(field.key(), vec![message.clone()]);
            }
            None => {
                self.view.clear_field_error(id);
                self.errors.clear(field.key());
            }
        }
        first
    }

    fn custom_messages(&self, snapshot: &FormSnapshot) -> Vec<String> {
        self.rules
            .check(snapshot, &self.config.messages)
            .into_iter()
            .map(|e| e.message)
            .collect()
    }
}

impl<V: FormView + std::fmt::Debug> std::fmt::Debug for ValidationEngine<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("view", &self.view)
            .field("rules", &self.rules)
            .field("errors", &self.errors)
            .finish()
    }
}
