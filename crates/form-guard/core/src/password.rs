//! Password visibility toggle state

/// Whether a password field currently shows its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
}

impl Visibility {
    /// Read the state from an input's `type` attribute
    pub fn from_type_attr(type_attr: &str) -> Self {
        if type_attr.eq_ignore_ascii_case("password") {
            Visibility::Hidden
        } else {
            Visibility::Shown
        }
    }

    /// `type` attribute that produces this state
    pub fn type_attr(self) -> &'static str {
        match self {
            Visibility::Hidden => "password",
            Visibility::Shown => "text",
        }
    }

    /// Glyph shown on the toggle control
    pub fn icon(self) -> &'static str {
        match self {
            Visibility::Hidden => "👁",
            Visibility::Shown => "🙈",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Visibility::Hidden => Visibility::Shown,
            Visibility::Shown => Visibility::Hidden,
        }
    }
}

/// State after one click on the toggle, given the field's current `type`
pub fn toggle_visibility(current_type: &str) -> Visibility {
    Visibility::from_type_attr(current_type).flipped()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_both_ways() {
        let shown = toggle_visibility("password");
        assert_eq!(shown, Visibility::Shown);
        assert_eq!(shown.type_attr(), "text");
        assert_eq!(shown.icon(), "🙈");

        let hidden = toggle_visibility(shown.type_attr());
        assert_eq!(hidden, Visibility::Hidden);
        assert_eq!(hidden.type_attr(), "password");
        assert_eq!(hidden.icon(), "👁");
    }
}
