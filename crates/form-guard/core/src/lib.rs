//! form-guard core
//!
//! DOM-free validation for HTML forms. Field state comes in as snapshots,
//! errors go out as messages, and everything that touches a page goes
//! through the [`FormView`] trait so the same engine drives the browser
//! adapter and headless checks alike.

pub mod config;
pub mod cross_field;
pub mod engine;
pub mod errors;
pub mod field;
pub mod memory;
pub mod number;
pub mod password;
pub mod rules;

pub use config::{ClassNames, CrossFieldNames, FormGuardConfig, Messages};
pub use cross_field::{CrossFieldRule, NewGuestRule, ReservationRule, RuleSet};
pub use engine::{Clock, FieldId, FixedClock, FormView, SubmissionGate, SystemClock, ValidationEngine};
pub use errors::{ErrorKind, ErrorSet, FieldError, ValidationSummary};
pub use field::{FieldConstraints, FieldKind, FieldSnapshot, FieldTag, FormSnapshot};
pub use memory::MemoryForm;
pub use password::{toggle_visibility, Visibility};
pub use rules::{check_field, display_label, is_valid_email, is_valid_phone, ValidationContext};
