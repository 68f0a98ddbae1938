//! Controller configuration record.
//!
//! [`Options`] carries the user-facing messages, the expected response format
//! and whether selection controls are collected as fields. Every key falls
//! back to its default independently, so callers only spell out what they
//! change.
//!
//! # TOML Format
//!
//! ```toml
//! dataType = "json"
//! includeSelects = true
//!
//! [text]
//! success = "Thanks, we will be in touch"
//! sending = "Please wait..."
//! ```

use crate::domain::error::Result;
use crate::transport::DataType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Messages shown by the default hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Texts {
    pub success: String,
    pub error: String,
    pub empty: String,
    /// Submit label while a request is in flight.
    pub sending: String,
}

impl Default for Texts {
    fn default() -> Self {
        Self {
            success: "Your data has been successfully saved".to_string(),
            error: "An error occurred. Please, try again".to_string(),
            empty: "Please, fill in all required fields".to_string(),
            sending: "Sending...".to_string(),
        }
    }
}

/// Controller options.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub text: Texts,
    /// Expected response format.
    pub data_type: DataType,
    /// Collect selection controls as fields.
    pub include_selects: bool,
}

impl Options {
    /// Builds options from a flat string map.
    ///
    /// Recognized keys: `text.success`, `text.error`, `text.empty`,
    /// `text.sending`, `dataType`, `includeSelects`. Missing keys keep their
    /// defaults; unparsable values fall back to the default and are logged.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use formbits::Options;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("text.sending".to_string(), "Wait...".to_string());
    ///
    /// let options = Options::from_map(&map);
    /// assert_eq!(options.text.sending, "Wait...");
    /// assert_eq!(options.text.empty, "Please, fill in all required fields");
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut options = Self::default();

        for (key, value) in map {
            match key.as_str() {
                "text.success" => options.text.success.clone_from(value),
                "text.error" => options.text.error.clone_from(value),
                "text.empty" => options.text.empty.clone_from(value),
                "text.sending" => options.text.sending.clone_from(value),
                "dataType" => match value.parse::<DataType>() {
                    Ok(data_type) => options.data_type = data_type,
                    Err(e) => tracing::debug!(error = %e, "keeping default dataType"),
                },
                "includeSelects" => match value.trim().parse::<bool>() {
                    Ok(include) => options.include_selects = include,
                    Err(e) => {
                        tracing::debug!(value = %value, error = %e, "keeping default includeSelects");
                    }
                },
                _ => tracing::trace!(key = %key, "ignoring unrelated option key"),
            }
        }

        options
    }

    /// Parses options from TOML, defaulting every missing key.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FormError::Toml`] for malformed documents or values of
    /// the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormError;

    #[test]
    fn toml_overrides_only_given_keys() {
        let options = Options::from_toml_str(
            r#"
dataType = "text"

[text]
success = "Merci"
"#,
        )
        .unwrap();

        assert_eq!(options.data_type, DataType::Text);
        assert_eq!(options.text.success, "Merci");
        assert_eq!(options.text.sending, "Sending...");
        assert!(!options.include_selects);
    }

    #[test]
    fn data_type_case_matches_map_parsing() {
        let from_toml = Options::from_toml_str("dataType = \"JSON\"").unwrap();
        let map = BTreeMap::from([("dataType".to_string(), "JSON".to_string())]);

        assert_eq!(from_toml.data_type, DataType::Json);
        assert_eq!(Options::from_map(&map).data_type, from_toml.data_type);
        assert!(Options::from_toml_str("dataType = \"yaml\"").is_err());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Options::from_toml_str("").unwrap(), Options::default());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = Options::from_toml_str("includeSelects = \"maybe\"");
        assert!(matches!(result, Err(FormError::Toml(_))));
    }

    #[test]
    fn map_falls_back_on_bad_values() {
        let map: BTreeMap<String, String> = [
            ("dataType", "yaml"),
            ("includeSelects", "true"),
            ("text.error", "Oops"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let options = Options::from_map(&map);
        assert_eq!(options.data_type, DataType::Json);
        assert!(options.include_selects);
        assert_eq!(options.text.error, "Oops");
    }

    #[test]
    fn reads_options_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.toml");
        std::fs::write(&path, "[text]\nempty = \"Fill it in\"\n").unwrap();

        let options = Options::from_file(&path).unwrap();
        assert_eq!(options.text.empty, "Fill it in");
    }
}
