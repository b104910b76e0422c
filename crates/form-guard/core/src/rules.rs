//! Per-field validation rules
//!
//! Each rule is a pure function of a field snapshot and the validation
//! context. [`check_field`] runs them in a fixed order and returns every
//! message that fired; the engine decides how many of them to show.

use crate::config::Messages;
use crate::errors::{ErrorKind, FieldError};
use crate::field::{FieldKind, FieldSnapshot};
use crate::number::parse_float_prefix;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[1-9][0-9]{0,15}$").expect("phone regex is valid"));

/// Date format produced by `<input type="date">`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything a rule needs besides the field itself
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Local calendar date used for "not before today" floors
    pub today: NaiveDate,
    pub messages: &'a Messages,
}

impl<'a> ValidationContext<'a> {
    pub fn new(today: NaiveDate, messages: &'a Messages) -> Self {
        Self { today, messages }
    }
}

/// Quick email format check
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Phone check; spaces, hyphens and parentheses are ignored
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    PHONE_RE.is_match(&digits)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Human-readable name of a field for messages
///
/// Label text with its first `*` removed, else placeholder, else name,
/// else `"Field"`.
pub fn display_label(field: &FieldSnapshot) -> String {
    if let Some(label) = &field.label {
        return label.replacen('*', "", 1).trim().to_string();
    }
    if let Some(placeholder) = field.placeholder.as_deref().filter(|p| !p.is_empty()) {
        return placeholder.to_string();
    }
    if !field.name.is_empty() {
        return field.name.clone();
    }
    "Field".to_string()
}

/// Run every rule against `field`, in order, collecting all messages
pub fn check_field(field: &FieldSnapshot, ctx: &ValidationContext<'_>) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(err) = check_required(field, ctx) {
        errors.push(err);
    }

    let value = field.trimmed();
    if !value.is_empty() {
        errors.extend(check_kind(field.kind, value, field, ctx));
        if let Some(err) = check_pattern(value, field, ctx) {
            errors.push(err);
        }
    }

    errors
}

fn check_required(field: &FieldSnapshot, ctx: &ValidationContext<'_>) -> Option<FieldError> {
    if field.constraints.required && field.trimmed().is_empty() {
        let label = display_label(field);
        return Some(FieldError::new(
            ErrorKind::Missing,
            ctx.messages.required_for(&label),
        ));
    }
    None
}

fn check_kind(
    kind: FieldKind,
    value: &str,
    field: &FieldSnapshot,
    ctx: &ValidationContext<'_>,
) -> Vec<FieldError> {
    match kind {
        FieldKind::Email => check_email(value, ctx).into_iter().collect(),
        FieldKind::Tel => check_phone(value, ctx).into_iter().collect(),
        FieldKind::Number => check_number(value, field, ctx),
        FieldKind::Date => check_date(value, field, ctx).into_iter().collect(),
        FieldKind::Text | FieldKind::Other => Vec::new(),
    }
}

fn check_email(value: &str, ctx: &ValidationContext<'_>) -> Option<FieldError> {
    (!is_valid_email(value)).then(|| FieldError::new(ErrorKind::Format, ctx.messages.email.clone()))
}

fn check_phone(value: &str, ctx: &ValidationContext<'_>) -> Option<FieldError> {
    (!is_valid_phone(value)).then(|| FieldError::new(ErrorKind::Format, ctx.messages.phone.clone()))
}

fn check_number(value: &str, field: &FieldSnapshot, ctx: &ValidationContext<'_>) -> Vec<FieldError> {
    let Some(number) = parse_float_prefix(value) else {
        return vec![FieldError::new(ErrorKind::Format, ctx.messages.number.clone())];
    };

    let mut errors = Vec::new();
    // min and max are checked independently
    if let Some((raw, min)) = parse_bound(field.constraints.min.as_deref()) {
        if number < min {
            errors.push(FieldError::new(ErrorKind::Range, ctx.messages.below_min(raw)));
        }
    }
    if let Some((raw, max)) = parse_bound(field.constraints.max.as_deref()) {
        if number > max {
            errors.push(FieldError::new(ErrorKind::Range, ctx.messages.above_max(raw)));
        }
    }
    errors
}

/// A non-empty bound attribute with its parsed value
fn parse_bound(raw: Option<&str>) -> Option<(&str, f64)> {
    let raw = raw.filter(|s| !s.is_empty())?;
    parse_float_prefix(raw).map(|n| (raw, n))
}

fn check_date(value: &str, field: &FieldSnapshot, ctx: &ValidationContext<'_>) -> Option<FieldError> {
    if !field.constraints.min_date_today {
        return None;
    }
    let date = parse_date(value)?;
    (date < ctx.today).then(|| FieldError::new(ErrorKind::Temporal, ctx.messages.past_date.clone()))
}

fn check_pattern(value: &str, field: &FieldSnapshot, ctx: &ValidationContext<'_>) -> Option<FieldError> {
    let pattern = field.constraints.pattern.as_deref().filter(|p| !p.is_empty())?;
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => {
            tracing::warn!(field = field.key(), %pattern, %err, "skipping invalid pattern attribute");
            return None;
        }
    };
    if re.is_match(value) {
        return None;
    }
    let message = field
        .constraints
        .title
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| ctx.messages.pattern.clone());
    Some(FieldError::new(ErrorKind::Format, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn messages_of(field: &FieldSnapshot) -> Vec<String> {
        let messages = Messages::default();
        let ctx = ValidationContext::new(today(), &messages);
        check_field(field, &ctx).into_iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("user.name+tag@example.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@b.co"));
    }

    #[test]
    fn test_phone_format() {
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(is_valid_phone("5551234"));
        assert!(!is_valid_phone("0123456"));
        assert!(!is_valid_phone("12345678901234567"));
        assert!(!is_valid_phone("555-CALL"));
    }

    #[test]
    fn test_required_uses_label() {
        let field = FieldSnapshot::input("first_name", FieldKind::Text)
            .with_label("First Name *")
            .required()
            .with_value("   ");
        assert_eq!(messages_of(&field), vec!["First Name is required"]);
    }

    #[test]
    fn test_label_fallbacks() {
        let mut field = FieldSnapshot::input("city", FieldKind::Text);
        assert_eq!(display_label(&field), "city");

        field.placeholder = Some("Your city".to_string());
        assert_eq!(display_label(&field), "Your city");

        let anonymous = FieldSnapshot::input("", FieldKind::Text);
        assert_eq!(display_label(&anonymous), "Field");
    }

    #[test]
    fn test_number_bounds_are_independent() {
        let mut field = FieldSnapshot::input("guests", FieldKind::Number).with_value("10");
        field.constraints.min = Some("1".to_string());
        field.constraints.max = Some("5".to_string());
        assert_eq!(messages_of(&field), vec!["Value must not exceed 5"]);

        // an inverted range trips both checks at once
        field.constraints.min = Some("20".to_string());
        assert_eq!(
            messages_of(&field),
            vec!["Value must be at least 20", "Value must not exceed 5"]
        );
    }

    #[test]
    fn test_number_not_parseable() {
        let field = FieldSnapshot::input("guests", FieldKind::Number).with_value("abc");
        assert_eq!(messages_of(&field), vec!["Please enter a valid number"]);
    }

    #[test]
    fn test_date_floor() {
        let mut field = FieldSnapshot::input("check_in", FieldKind::Date).with_value("2025-01-09");
        assert!(messages_of(&field).is_empty());

        field.constraints.min_date_today = true;
        assert_eq!(messages_of(&field), vec!["Date cannot be in the past"]);

        field.value = "2025-01-10".to_string();
        assert!(messages_of(&field).is_empty());

        field.value = "garbage".to_string();
        assert!(messages_of(&field).is_empty());
    }

    #[test]
    fn test_pattern_uses_title() {
        let mut field = FieldSnapshot::input("zip", FieldKind::Text).with_value("ABC");
        field.constraints.pattern = Some("[0-9]{5}".to_string());
        assert_eq!(messages_of(&field), vec!["Invalid format"]);

        field.constraints.title = Some("Five digit postcode".to_string());
        assert_eq!(messages_of(&field), vec!["Five digit postcode"]);

        field.value = "12345".to_string();
        assert!(messages_of(&field).is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let mut field = FieldSnapshot::input("code", FieldKind::Text).with_value("x");
        field.constraints.pattern = Some("(".to_string());
        assert!(messages_of(&field).is_empty());
    }

    #[test]
    fn test_rule_order() {
        let mut field = FieldSnapshot::input("contact", FieldKind::Email).with_value("nope");
        field.constraints.pattern = Some("^x".to_string());
        let errors = messages_of(&field);
        assert_eq!(errors, vec!["Please enter a valid email address", "Invalid format"]);
    }
}
