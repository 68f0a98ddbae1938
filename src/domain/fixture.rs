//! TOML descriptions of form elements.
//!
//! Fixtures let the runner binary and tests describe a form declaratively:
//!
//! ```toml
//! id = "contact"
//! action = "/contact"
//! method = "post"
//!
//! [[fields]]
//! name = "email"
//! type = "email"
//! value = "a@b.com"
//! required = true
//!
//! [[fields]]
//! name = "country"
//! kind = "select"
//! options = [{ value = "fr" }, { value = "de", selected = true }]
//!
//! [submit]
//! kind = "button"
//! label = "Send"
//! ```

use super::element::{FormElement, SubmitControl};
use super::error::{FormError, Result};
use super::field::{Field, SelectOption};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ElementFixture {
    id: String,
    #[serde(default)]
    action: String,
    #[serde(default)]
    method: String,
    #[serde(default)]
    fields: Vec<FieldFixture>,
    submit: Option<SubmitFixture>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FieldKindFixture {
    #[default]
    Input,
    Textarea,
    Select,
    Checkbox,
    Radio,
}

#[derive(Debug, Deserialize)]
struct FieldFixture {
    #[serde(default)]
    name: String,
    #[serde(default)]
    kind: FieldKindFixture,
    #[serde(rename = "type")]
    input_type: Option<String>,
    #[serde(default)]
    value: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    checked: bool,
    #[serde(default)]
    multiple: bool,
    #[serde(default)]
    options: Vec<SelectOption>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SubmitKindFixture {
    #[default]
    Button,
    Input,
}

#[derive(Debug, Deserialize)]
struct SubmitFixture {
    #[serde(default)]
    kind: SubmitKindFixture,
    #[serde(default)]
    label: String,
}

impl FieldFixture {
    fn into_field(self) -> Result<Field> {
        let field = match self.kind {
            FieldKindFixture::Input => {
                let input_type = self.input_type.unwrap_or_else(|| "text".to_string());
                match input_type.to_ascii_lowercase().as_str() {
                    "submit" => {
                        return Err(FormError::Fixture(format!(
                            "field `{}` is a submit control; declare it under [submit]",
                            self.name
                        )))
                    }
                    "checkbox" => Field::checkbox(self.name, self.value),
                    "radio" => Field::radio(self.name, self.value),
                    _ => Field::input(self.name, input_type).with_value(self.value),
                }
            }
            FieldKindFixture::Textarea => Field::textarea(self.name).with_value(self.value),
            FieldKindFixture::Checkbox => Field::checkbox(self.name, self.value),
            FieldKindFixture::Radio => Field::radio(self.name, self.value),
            FieldKindFixture::Select => {
                let mut options = self.options;
                for option in &mut options {
                    if option.label.is_empty() {
                        option.label.clone_from(&option.value);
                    }
                }
                if !self.value.is_empty() && !options.iter().any(|o| o.value == self.value) {
                    return Err(FormError::Fixture(format!(
                        "select `{}` has no option `{}`",
                        self.name, self.value
                    )));
                }
                let mut field = if self.multiple {
                    Field::multi_select(self.name, options)
                } else {
                    Field::select(self.name, options)
                };
                if !self.value.is_empty() {
                    field.set_value(self.value);
                }
                field
            }
        };

        let field = field
            .with_checked(self.checked)
            .with_disabled(self.disabled);
        Ok(if self.required { field.required() } else { field })
    }
}

impl FormElement {
    /// Builds an element from a TOML fixture.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Toml`] for malformed documents and
    /// [`FormError::Fixture`] for descriptions that cannot form a valid element.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let fixture: ElementFixture = toml::from_str(source)?;

        let mut element = Self::new(fixture.id)
            .with_action(fixture.action)
            .with_method(fixture.method);

        for field in fixture.fields {
            element.push_field(field.into_field()?);
        }

        if let Some(submit) = fixture.submit {
            element = element.with_submit(match submit.kind {
                SubmitKindFixture::Button => SubmitControl::button(submit.label),
                SubmitKindFixture::Input => SubmitControl::input(submit.label),
            });
        }

        tracing::debug!(
            element = %element.id(),
            field_count = element.fields().len(),
            has_submit = element.submit_control().is_some(),
            "form fixture loaded"
        );

        Ok(element)
    }

    /// Reads and builds an element from a TOML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a
    /// valid element.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}
