//! Field and form snapshots
//!
//! A snapshot is a plain copy of everything the rules need to know about a
//! control at the moment it is validated. Adapters build them from live
//! elements; tests build them by hand.

use serde::{Deserialize, Serialize};

/// Semantic field kind, derived from the `type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Number,
    Date,
    Other,
}

impl FieldKind {
    /// Map an input `type` attribute to a kind
    ///
    /// A missing type is a text input, as browsers treat it.
    /// ```
    /// use form_guard_core::FieldKind;
    /// assert_eq!(FieldKind::from_type_attr("EMAIL"), FieldKind::Email);
    /// assert_eq!(FieldKind::from_type_attr(""), FieldKind::Text);
    /// assert_eq!(FieldKind::from_type_attr("checkbox"), FieldKind::Other);
    /// ```
    pub fn from_type_attr(type_attr: &str) -> Self {
        match type_attr.trim().to_ascii_lowercase().as_str() {
            "" | "text" => FieldKind::Text,
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            "number" => FieldKind::Number,
            "date" => FieldKind::Date,
            _ => FieldKind::Other,
        }
    }
}

/// Element tag of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTag {
    #[default]
    Input,
    Select,
    TextArea,
}

/// Constraint attributes read from the element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConstraints {
    #[serde(default)]
    pub required: bool,
    /// Raw `min` attribute text
    #[serde(default)]
    pub min: Option<String>,
    /// Raw `max` attribute text
    #[serde(default)]
    pub max: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// `data-min-date="today"`
    #[serde(default)]
    pub min_date_today: bool,
}

/// Point-in-time state of one control
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tag: FieldTag,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    /// Text of the resolved label element, untouched
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub constraints: FieldConstraints,
}

impl FieldSnapshot {
    pub fn input(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            ..Self::default()
        }
    }

    pub fn select(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tag: FieldTag::Select,
            kind: FieldKind::Other,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Key used in the error set: `name`, falling back to `id`
    pub fn key(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Value with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

/// Every field of one form, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSnapshot>,
}

impl FormSnapshot {
    pub fn new(form_id: Option<&str>, fields: Vec<FieldSnapshot>) -> Self {
        Self {
            form_id: form_id.map(str::to_string),
            fields,
        }
    }

    pub fn is_form(&self, id: &str) -> bool {
        self.form_id.as_deref() == Some(id)
    }

    /// First field with the given tag and name
    pub fn find(&self, tag: FieldTag, name: &str) -> Option<&FieldSnapshot> {
        self.fields.iter().find(|f| f.tag == tag && f.name == name)
    }

    /// First `input` with the given name
    pub fn input(&self, name: &str) -> Option<&FieldSnapshot> {
        self.find(FieldTag::Input, name)
    }

    /// Whether any input in the named group is checked
    pub fn any_checked(&self, name: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.tag == FieldTag::Input && f.name == name && f.checked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_falls_back_to_id() {
        let mut field = FieldSnapshot::input("", FieldKind::Text);
        field.id = "phone".to_string();
        assert_eq!(field.key(), "phone");

        let named = FieldSnapshot::input("email", FieldKind::Email);
        assert_eq!(named.key(), "email");
    }

    #[test]
    fn test_find_respects_tag() {
        let form = FormSnapshot::new(
            None,
            vec![
                FieldSnapshot::input("guest", FieldKind::Text),
                FieldSnapshot::select("guest").with_value("new"),
            ],
        );
        assert_eq!(form.find(FieldTag::Select, "guest").map(|f| f.value.as_str()), Some("new"));
        assert_eq!(form.input("guest").map(|f| f.value.as_str()), Some(""));
    }

    #[test]
    fn test_any_checked() {
        let form = FormSnapshot::new(
            Some("reservationForm"),
            vec![
                FieldSnapshot::input("room", FieldKind::Other).with_value("101"),
                FieldSnapshot::input("room", FieldKind::Other).with_value("102").checked(true),
            ],
        );
        assert!(form.any_checked("room"));
        assert!(!form.any_checked("suite"));
        assert!(form.is_form("reservationForm"));
    }
}
