// File: form-guard/core/src/config.rs
// Purpose: Engine configuration (selectors, class names, messages), loadable from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration shared by every engine on a page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormGuardConfig {
    /// Selectors whose matches are instrumented first
    #[serde(default = "default_selectors")]
    pub selectors: Vec<String>,

    /// Also instrument every other `form` on the page
    #[serde(default = "default_true")]
    pub instrument_all_forms: bool,

    /// Text shown on the submit control while the form is submitting
    #[serde(default = "default_busy_text")]
    pub busy_text: String,

    #[serde(default)]
    pub classes: ClassNames,

    #[serde(default)]
    pub messages: Messages,

    #[serde(default)]
    pub cross_field: CrossFieldNames,
}

/// CSS class names written to the page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassNames {
    #[serde(default = "default_required_label")]
    pub required_label: String,
    #[serde(default = "default_container")]
    pub container: String,
    #[serde(default = "default_invalid")]
    pub invalid: String,
    #[serde(default = "default_valid")]
    pub valid: String,
    #[serde(default = "default_error_message")]
    pub error_message: String,
    #[serde(default = "default_summary")]
    pub summary: String,
    #[serde(default = "default_summary_visible")]
    pub summary_visible: String,
    #[serde(default = "default_submitting")]
    pub submitting: String,
    /// Marker added to forms picked up by the catch-all pass
    #[serde(default = "default_auto_marker")]
    pub auto_marker: String,
}

/// User-facing messages
///
/// `{label}`, `{min}` and `{max}` are substituted where they appear.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Messages {
    #[serde(default = "default_required")]
    pub required: String,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_phone")]
    pub phone: String,
    #[serde(default = "default_number")]
    pub number: String,
    #[serde(default = "default_min")]
    pub min: String,
    #[serde(default = "default_max")]
    pub max: String,
    #[serde(default = "default_past_date")]
    pub past_date: String,
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default = "default_summary_heading")]
    pub summary_heading: String,
    #[serde(default = "default_select_room")]
    pub select_room: String,
    #[serde(default = "default_stay_order")]
    pub stay_order: String,
    #[serde(default = "default_guest_first_name")]
    pub guest_first_name: String,
    #[serde(default = "default_guest_last_name")]
    pub guest_last_name: String,
    #[serde(default = "default_guest_email")]
    pub guest_email: String,
}

/// Identifiers the cross-field rules look for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossFieldNames {
    #[serde(default = "default_reservation_form")]
    pub reservation_form: String,
    #[serde(default = "default_room")]
    pub room: String,
    #[serde(default = "default_check_in")]
    pub check_in: String,
    #[serde(default = "default_check_out")]
    pub check_out: String,
    #[serde(default = "default_guest_select")]
    pub guest_select: String,
    #[serde(default = "default_new_guest")]
    pub new_guest_value: String,
    #[serde(default = "default_first_name_field")]
    pub guest_first_name: String,
    #[serde(default = "default_last_name_field")]
    pub guest_last_name: String,
    #[serde(default = "default_email_field")]
    pub guest_email: String,
}

// Default values
fn default_selectors() -> Vec<String> {
    vec![
        "form.validate".to_string(),
        "#reservationForm".to_string(),
        "#guestForm".to_string(),
        "#hotelForm".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

fn default_busy_text() -> String {
    "Processing...".to_string()
}

fn default_required_label() -> String {
    "required".to_string()
}

fn default_container() -> String {
    "validation-container".to_string()
}

fn default_invalid() -> String {
    "form-error".to_string()
}

fn default_valid() -> String {
    "form-success".to_string()
}

fn default_error_message() -> String {
    "error-message".to_string()
}

fn default_summary() -> String {
    "validation-summary".to_string()
}

fn default_summary_visible() -> String {
    "show".to_string()
}

fn default_submitting() -> String {
    "form-submitting".to_string()
}

fn default_auto_marker() -> String {
    "validate".to_string()
}

fn default_required() -> String {
    "{label} is required".to_string()
}

fn default_email() -> String {
    "Please enter a valid email address".to_string()
}

fn default_phone() -> String {
    "Please enter a valid phone number".to_string()
}

fn default_number() -> String {
    "Please enter a valid number".to_string()
}

fn default_min() -> String {
    "Value must be at least {min}".to_string()
}

fn default_max() -> String {
    "Value must not exceed {max}".to_string()
}

fn default_past_date() -> String {
    "Date cannot be in the past".to_string()
}

fn default_pattern() -> String {
    "Invalid format".to_string()
}

fn default_summary_heading() -> String {
    "Please correct the following errors:".to_string()
}

fn default_select_room() -> String {
    "Please select a room".to_string()
}

fn default_stay_order() -> String {
    "Check-out date must be after check-in date".to_string()
}

fn default_guest_first_name() -> String {
    "Guest first name is required".to_string()
}

fn default_guest_last_name() -> String {
    "Guest last name is required".to_string()
}

fn default_guest_email() -> String {
    "Guest email is required".to_string()
}

fn default_reservation_form() -> String {
    "reservationForm".to_string()
}

fn default_room() -> String {
    "room".to_string()
}

fn default_check_in() -> String {
    "check_in".to_string()
}

fn default_check_out() -> String {
    "check_out".to_string()
}

fn default_guest_select() -> String {
    "guest".to_string()
}

fn default_new_guest() -> String {
    "new".to_string()
}

fn default_first_name_field() -> String {
    "guest_first_name".to_string()
}

fn default_last_name_field() -> String {
    "guest_last_name".to_string()
}

fn default_email_field() -> String {
    "guest_email".to_string()
}

// Default implementations
impl Default for FormGuardConfig {
    fn default() -> Self {
        Self {
            selectors: default_selectors(),
            instrument_all_forms: true,
            busy_text: default_busy_text(),
            classes: ClassNames::default(),
            messages: Messages::default(),
            cross_field: CrossFieldNames::default(),
        }
    }
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            required_label: default_required_label(),
            container: default_container(),
            invalid: default_invalid(),
            valid: default_valid(),
            error_message: default_error_message(),
            summary: default_summary(),
            summary_visible: default_summary_visible(),
            submitting: default_submitting(),
            auto_marker: default_auto_marker(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: default_required(),
            email: default_email(),
            phone: default_phone(),
            number: default_number(),
            min: default_min(),
            max: default_max(),
            past_date: default_past_date(),
            pattern: default_pattern(),
            summary_heading: default_summary_heading(),
            select_room: default_select_room(),
            stay_order: default_stay_order(),
            guest_first_name: default_guest_first_name(),
            guest_last_name: default_guest_last_name(),
            guest_email: default_guest_email(),
        }
    }
}

impl Default for CrossFieldNames {
    fn default() -> Self {
        Self {
            reservation_form: default_reservation_form(),
            room: default_room(),
            check_in: default_check_in(),
            check_out: default_check_out(),
            guest_select: default_guest_select(),
            new_guest_value: default_new_guest(),
            guest_first_name: default_first_name_field(),
            guest_last_name: default_last_name_field(),
            guest_email: default_email_field(),
        }
    }
}

impl Messages {
    pub fn required_for(&self, label: &str) -> String {
        self.required.replace("{label}", label)
    }

    pub fn below_min(&self, min: &str) -> String {
        self.min.replace("{min}", min)
    }

    pub fn above_max(&self, max: &str) -> String {
        self.max.replace("{max}", max)
    }
}

impl FormGuardConfig {
    /// Parse configuration from TOML text; blank text yields the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(content).context("Failed to parse form-guard config")
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config file: {:?}", path))
    }

    /// Combined selector for the first activation pass
    pub fn selector_list(&self) -> String {
        self.selectors.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormGuardConfig::default();
        assert_eq!(config.busy_text, "Processing...");
        assert_eq!(config.classes.invalid, "form-error");
        assert_eq!(config.cross_field.reservation_form, "reservationForm");
        assert_eq!(
            config.selector_list(),
            "form.validate, #reservationForm, #guestForm, #hotelForm"
        );
    }

    #[test]
    fn test_empty_config() {
        let config = FormGuardConfig::from_toml_str("  \n").unwrap();
        assert!(config.instrument_all_forms);
        assert_eq!(config.messages.email, "Please enter a valid email address");
    }

    #[test]
    fn test_partial_overrides() {
        let toml = r#"
            busyText = "Saving..."
            instrumentAllForms = false

            [messages]
            required = "{label} cannot be blank"

            [classes]
            invalid = "is-invalid"
        "#;
        let config = FormGuardConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.busy_text, "Saving...");
        assert!(!config.instrument_all_forms);
        assert_eq!(config.messages.required_for("Email"), "Email cannot be blank");
        assert_eq!(config.classes.invalid, "is-invalid");
        assert_eq!(config.classes.valid, "form-success");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(FormGuardConfig::from_toml_str("busyText = [").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = FormGuardConfig::load("does/not/exist/form-guard.toml").unwrap();
        assert_eq!(config.selectors.len(), 4);
    }

    #[test]
    fn test_message_templates() {
        let messages = Messages::default();
        assert_eq!(messages.below_min("1"), "Value must be at least 1");
        assert_eq!(messages.above_max("5"), "Value must not exceed 5");
        assert_eq!(messages.required_for("Check-in"), "Check-in is required");
    }
}
