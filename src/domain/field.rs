//! Form field model.
//!
//! A [`Field`] is a form control that contributes a named value: text-like
//! inputs, text areas, selection controls and toggles (checkboxes and radio
//! buttons). Fields live inside a [`crate::domain::FormElement`], which assigns
//! each one a stable [`FieldId`] on insertion.
//!
//! The value a field contributes to a submission is its *effective value*,
//! computed by [`Field::effective_value`]:
//!
//! | Kind | Effective value |
//! |---|---|
//! | input, text area | the raw value |
//! | checkbox, radio | the raw value when checked, `null` otherwise |
//! | single select | value of the selected option, `""` if none |
//! | multiple select | array of the selected option values |

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier of a field within its element.
///
/// Identifiers are never reused by an element, so a controller holding a
/// `FieldId` for a removed field simply no longer finds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(pub(crate) u64);

impl FieldId {
    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One `<option>` of a selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Displayed label. Defaults to the value.
    #[serde(default)]
    pub label: String,
    /// Whether the option is currently selected.
    #[serde(default)]
    pub selected: bool,
}

impl SelectOption {
    /// Creates an unselected option whose label equals its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            selected: false,
        }
    }

    /// Marks the option as selected.
    #[must_use]
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

/// Kind of control a field represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// An `<input>` of any non-submit type (`text`, `email`, `hidden`, ...).
    Input {
        /// Declared input type, lowercase.
        input_type: String,
    },
    /// A `<textarea>`.
    TextArea,
    /// A `<select>`.
    Select {
        /// Options in declaration order.
        options: Vec<SelectOption>,
        /// Whether several options may be selected at once.
        multiple: bool,
    },
    /// An `<input type="checkbox">`.
    Checkbox,
    /// An `<input type="radio">`.
    Radio,
}

impl FieldKind {
    /// Returns `true` for binary toggles (checkboxes and radio buttons).
    #[must_use]
    pub const fn is_toggle(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }

    /// Returns `true` for selection controls.
    #[must_use]
    pub const fn is_select(&self) -> bool {
        matches!(self, Self::Select { .. })
    }
}

/// A named form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub(crate) id: FieldId,
    name: String,
    kind: FieldKind,
    value: String,
    required: bool,
    disabled: bool,
    checked: bool,
}

impl Field {
    fn with_kind(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: FieldId(0),
            name: name.into(),
            kind,
            value: String::new(),
            required: false,
            disabled: false,
            checked: false,
        }
    }

    /// Creates a text input.
    pub fn text(name: impl Into<String>) -> Self {
        Self::input(name, "text")
    }

    /// Creates an input of the given type.
    ///
    /// Use [`Field::checkbox`] and [`Field::radio`] for toggles; submit
    /// controls are modelled by [`crate::domain::SubmitControl`].
    pub fn input(name: impl Into<String>, input_type: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            FieldKind::Input {
                input_type: input_type.into().to_ascii_lowercase(),
            },
        )
    }

    /// Creates a text area.
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::TextArea)
    }

    /// Creates a single-choice selection control.
    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::with_kind(
            name,
            FieldKind::Select {
                options,
                multiple: false,
            },
        )
    }

    /// Creates a multiple-choice selection control.
    pub fn multi_select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::with_kind(
            name,
            FieldKind::Select {
                options,
                multiple: true,
            },
        )
    }

    /// Creates an unchecked checkbox carrying `value`.
    pub fn checkbox(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Checkbox).with_value(value)
    }

    /// Creates an unchecked radio button carrying `value`.
    pub fn radio(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Radio).with_value(value)
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the raw value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the checked marker.
    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Sets the disabled flag.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Identifier assigned by the owning element.
    #[must_use]
    pub const fn id(&self) -> FieldId {
        self.id
    }

    /// Field name. Empty for nameless controls.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Control kind.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Raw value attribute. For selects this is unused; see [`Field::effective_value`].
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Sets the raw value.
    ///
    /// For a select, selects the options whose value equals `value` instead
    /// and deselects the others.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        match &mut self.kind {
            FieldKind::Select { options, .. } => {
                for option in options.iter_mut() {
                    option.selected = option.value == value;
                }
            }
            _ => self.value = value,
        }
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Value this field contributes to a submission.
    #[must_use]
    pub fn effective_value(&self) -> Value {
        match &self.kind {
            FieldKind::Checkbox | FieldKind::Radio => {
                if self.checked {
                    Value::String(self.value.clone())
                } else {
                    Value::Null
                }
            }
            FieldKind::Select {
                options,
                multiple: true,
            } => Value::Array(
                options
                    .iter()
                    .filter(|o| o.selected)
                    .map(|o| Value::String(o.value.clone()))
                    .collect(),
            ),
            FieldKind::Select {
                options,
                multiple: false,
            } => Value::String(
                options
                    .iter()
                    .find(|o| o.selected)
                    .map(|o| o.value.clone())
                    .unwrap_or_default(),
            ),
            FieldKind::Input { .. } | FieldKind::TextArea => Value::String(self.value.clone()),
        }
    }

    /// Returns `true` when the effective value is blank after trimming.
    ///
    /// An unchecked toggle and a select with nothing selected are blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self.effective_value() {
            Value::String(s) => s.trim().is_empty(),
            Value::Array(items) => items
                .iter()
                .all(|item| item.as_str().map_or(true, |s| s.trim().is_empty())),
            _ => true,
        }
    }

    /// Returns `true` when the field is required and blank.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.required && self.is_blank()
    }

    /// Empties the value, deselects every option and unchecks toggles.
    pub fn clear(&mut self) {
        self.value.clear();
        self.checked = false;
        if let FieldKind::Select { options, .. } = &mut self.kind {
            for option in options.iter_mut() {
                option.selected = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn countries() -> Vec<SelectOption> {
        vec![
            SelectOption::new("fr"),
            SelectOption::new("de").selected(),
            SelectOption::new("it"),
        ]
    }

    #[test]
    fn unchecked_toggle_contributes_null_regardless_of_value() {
        let field = Field::checkbox("newsletter", "yes");
        assert_eq!(field.effective_value(), Value::Null);

        let field = field.with_checked(true);
        assert_eq!(field.effective_value(), json!("yes"));
    }

    #[test]
    fn select_reports_selected_option() {
        let single = Field::select("country", countries());
        assert_eq!(single.effective_value(), json!("de"));

        let mut multi = Field::multi_select("langs", countries());
        multi.set_value("it");
        assert_eq!(multi.effective_value(), json!(["it"]));
    }

    #[test]
    fn whitespace_only_required_field_is_missing() {
        let field = Field::text("email").required().with_value("   \t");
        assert!(field.is_missing());

        let field = Field::text("email").with_value("   ");
        assert!(!field.is_missing());
    }

    #[test]
    fn required_unchecked_toggle_is_missing() {
        let field = Field::checkbox("terms", "accepted").required();
        assert!(field.is_missing());
        assert!(!field.with_checked(true).is_missing());
    }

    #[test]
    fn clear_resets_value_selection_and_checked() {
        let mut select = Field::select("country", countries());
        select.clear();
        assert_eq!(select.effective_value(), json!(""));
        if let FieldKind::Select { options, .. } = select.kind() {
            assert!(options.iter().all(|o| !o.selected));
        }

        let mut toggle = Field::radio("plan", "pro").with_checked(true);
        toggle.clear();
        assert!(!toggle.is_checked());
        assert_eq!(toggle.value(), "");
    }

    #[test]
    fn input_type_is_normalized() {
        let field = Field::input("mail", "EMAIL");
        assert_eq!(
            field.kind(),
            &FieldKind::Input {
                input_type: "email".to_string()
            }
        );
    }
}
