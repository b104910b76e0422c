//! Cross-field rules
//!
//! Checks that depend on the form's identity or span several controls.
//! Their messages only reach the summary, never an inline slot.

use crate::config::{CrossFieldNames, Messages};
use crate::errors::{ErrorKind, FieldError};
use crate::field::{FieldTag, FormSnapshot};
use crate::rules::parse_date;

/// A rule evaluated against the whole form
pub trait CrossFieldRule {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Errors for the current form state, in display order
    fn check(&self, form: &FormSnapshot, messages: &Messages) -> Vec<FieldError>;
}

/// Room choice and stay order on the reservation form
#[derive(Debug, Clone)]
pub struct ReservationRule {
    names: CrossFieldNames,
}

impl ReservationRule {
    pub fn new(names: CrossFieldNames) -> Self {
        Self { names }
    }
}

impl CrossFieldRule for ReservationRule {
    fn name(&self) -> &'static str {
        "reservation"
    }

    fn check(&self, form: &FormSnapshot, messages: &Messages) -> Vec<FieldError> {
        let names = &self.names;
        if !form.is_form(&names.reservation_form) {
            return Vec::new();
        }

        let mut errors = Vec::new();
        if !form.any_checked(&names.room) {
            errors.push(FieldError::new(ErrorKind::Relational, messages.select_room.clone()));
        }

        let (Some(check_in), Some(check_out)) =
            (form.input(&names.check_in), form.input(&names.check_out))
        else {
            tracing::warn!(
                rule = self.name(),
                check_in = %names.check_in,
                check_out = %names.check_out,
                "stay dates missing from reservation form, skipping date order check"
            );
            return errors;
        };

        if check_in.value.is_empty() || check_out.value.is_empty() {
            return errors;
        }
        if let (Some(start), Some(end)) = (parse_date(&check_in.value), parse_date(&check_out.value)) {
            if start >= end {
                errors.push(FieldError::new(ErrorKind::Temporal, messages.stay_order.clone()));
            }
        }
        errors
    }
}

/// Inline guest details when the guest selector is set to "new"
#[derive(Debug, Clone)]
pub struct NewGuestRule {
    names: CrossFieldNames,
}

impl NewGuestRule {
    pub fn new(names: CrossFieldNames) -> Self {
        Self { names }
    }
}

impl CrossFieldRule for NewGuestRule {
    fn name(&self) -> &'static str {
        "new-guest"
    }

    fn check(&self, form: &FormSnapshot, messages: &Messages) -> Vec<FieldError> {
        let names = &self.names;
        if form.input(&names.guest_first_name).is_none() {
            return Vec::new();
        }

        let is_new_guest = form
            .find(FieldTag::Select, &names.guest_select)
            .is_some_and(|select| select.value == names.new_guest_value);
        if !is_new_guest {
            return Vec::new();
        }

        let required = [
            (&names.guest_first_name, &messages.guest_first_name),
            (&names.guest_last_name, &messages.guest_last_name),
            (&names.guest_email, &messages.guest_email),
        ];

        let mut errors = Vec::new();
        for (field_name, message) in required {
            match form.input(field_name) {
                Some(field) if field.trimmed().is_empty() => {
                    errors.push(FieldError::new(ErrorKind::Relational, message.clone()));
                }
                Some(_) => {}
                None => {
                    tracing::warn!(rule = self.name(), field = %field_name, "guest field missing, skipping");
                }
            }
        }
        errors
    }
}

/// Ordered collection of cross-field rules
pub struct RuleSet {
    rules: Vec<Box<dyn CrossFieldRule>>,
}

impl RuleSet {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The reservation and new-guest rules, in that order
    pub fn standard(names: &CrossFieldNames) -> Self {
        Self::empty()
            .with(ReservationRule::new(names.clone()))
            .with(NewGuestRule::new(names.clone()))
    }

    pub fn with(mut self, rule: impl CrossFieldRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn check(&self, form: &FormSnapshot, messages: &Messages) -> Vec<FieldError> {
        self.rules
            .iter()
            .flat_map(|rule| rule.check(form, messages))
            .collect()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldKind, FieldSnapshot};

    fn room(value: &str, checked: bool) -> FieldSnapshot {
        FieldSnapshot::input("room", FieldKind::Other)
            .with_value(value)
            .checked(checked)
    }

    fn date(name: &str, value: &str) -> FieldSnapshot {
        FieldSnapshot::input(name, FieldKind::Date).with_value(value)
    }

    fn run(form: &FormSnapshot) -> Vec<String> {
        RuleSet::standard(&CrossFieldNames::default())
            .check(form, &Messages::default())
            .into_iter()
            .map(|e| e.message)
            .collect()
    }

    #[test]
    fn test_reservation_requires_room() {
        let form = FormSnapshot::new(
            Some("reservationForm"),
            vec![room("101", false), date("check_in", ""), date("check_out", "")],
        );
        assert_eq!(run(&form), vec!["Please select a room"]);
    }

    #[test]
    fn test_reservation_stay_order() {
        let form = FormSnapshot::new(
            Some("reservationForm"),
            vec![
                room("101", true),
                date("check_in", "2025-01-10"),
                date("check_out", "2025-01-05"),
            ],
        );
        assert_eq!(run(&form), vec!["Check-out date must be after check-in date"]);

        let same_day = FormSnapshot::new(
            Some("reservationForm"),
            vec![
                room("101", true),
                date("check_in", "2025-01-10"),
                date("check_out", "2025-01-10"),
            ],
        );
        assert_eq!(run(&same_day), vec!["Check-out date must be after check-in date"]);
    }

    #[test]
    fn test_reservation_rule_ignores_other_forms() {
        let form = FormSnapshot::new(Some("hotelForm"), vec![room("101", false)]);
        assert!(run(&form).is_empty());
    }

    #[test]
    fn test_missing_stay_dates_are_skipped() {
        let form = FormSnapshot::new(Some("reservationForm"), vec![room("101", true)]);
        assert!(run(&form).is_empty());
    }

    #[test]
    fn test_new_guest_fields() {
        let form = FormSnapshot::new(
            Some("guestForm"),
            vec![
                FieldSnapshot::select("guest").with_value("new"),
                FieldSnapshot::input("guest_first_name", FieldKind::Text).with_value("Ada"),
                FieldSnapshot::input("guest_last_name", FieldKind::Text).with_value(" "),
                FieldSnapshot::input("guest_email", FieldKind::Email),
            ],
        );
        assert_eq!(
            run(&form),
            vec!["Guest last name is required", "Guest email is required"]
        );
    }

    #[test]
    fn test_existing_guest_skips_sub_form() {
        let form = FormSnapshot::new(
            Some("guestForm"),
            vec![
                FieldSnapshot::select("guest").with_value("42"),
                FieldSnapshot::input("guest_first_name", FieldKind::Text),
                FieldSnapshot::input("guest_last_name", FieldKind::Text),
                FieldSnapshot::input("guest_email", FieldKind::Email),
            ],
        );
        assert!(run(&form).is_empty());
    }
}
