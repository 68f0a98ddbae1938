//! formbits: a headless form lifecycle controller.
//!
//! formbits binds to a form element and handles what happens between the
//! user pressing "submit" and the server answering:
//! - Required-field validation with a user-facing notification on failure
//! - Ordered collection of field values (toggles, selects, duplicate names)
//! - Busy state while a request is in flight: controls disabled, submit
//!   label switched to a sending message
//! - Success and error handling that restores the form
//! - Replaceable behavior for every lifecycle step through [`FormHooks`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Runner binary (main.rs)                            │  ← Fixture in, request out
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← FormController
//! │  - Submit / validate / send / settle                │  ← Lifecycle phase
//! │  - Override hooks                                   │
//! │  - Named commands, bindings registry                │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Domain        │   │ Transport     │   │ Notify        │
//! │ (domain/)     │   │ (transport/)  │   │ (notify/)     │
//! │ - Element     │   │ - Request     │   │ - Alerts      │
//! │ - Fields      │   │ - Outcomes    │   │               │
//! │ - Fixtures    │   │ - Encoding    │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Controller, hooks, options, commands, bindings
//! - [`domain`]: Form element and field model, errors
//! - [`transport`]: Transport seam, request/response types
//! - [`notify`]: Notification seam
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! ```toml
//! trace_level = "debug"
//!
//! [options]
//! dataType = "json"
//!
//! [options.text]
//! sending = "Please wait..."
//! ```
//!
//! # Examples
//!
//! ```
//! use formbits::domain::{Field, FormElement, SubmitControl};
//! use formbits::notify::RecordingNotifier;
//! use formbits::transport::{RecordingTransport, Response};
//! use formbits::FormController;
//!
//! let element = FormElement::new("newsletter")
//!     .with_action("/subscribe")
//!     .with_method("post")
//!     .with_field(Field::input("email", "email").required())
//!     .with_submit(SubmitControl::button("Subscribe"))
//!     .into_handle();
//!
//! let transport = RecordingTransport::new();
//! let notifier = RecordingNotifier::new();
//! let mut form = FormController::builder(&element, transport.clone())
//!     .notifier(notifier.clone())
//!     .bind();
//!
//! // Blank required field: no request, the empty message is shown.
//! form.trigger_submit();
//! assert!(transport.is_empty());
//! assert_eq!(notifier.last().as_deref(), Some("Please, fill in all required fields"));
//!
//! element.borrow_mut().field_named_mut("email").unwrap().set_value("a@b.com");
//! form.trigger_submit();
//! let (ticket, _request) = transport.last().unwrap();
//! form.settle(ticket, Ok(Response::new(200, "{}"))).unwrap();
//! assert_eq!(notifier.last().as_deref(), Some("Your data has been successfully saved"));
//! ```
//!
//! # Key Design Decisions
//!
//! ## Hooks Instead of Optional Callbacks
//!
//! Each lifecycle step is a [`FormHooks`] method whose provided body runs the
//! stock behavior, so the strategy is chosen once at construction.
//!
//! ## Explicit Completion
//!
//! The controller never awaits. It dispatches a request with a ticket and the
//! host reports completion through [`FormController::settle`].
//!
//! ## Busy Guard
//!
//! A submission arriving while a request is in flight is cancelled and
//! ignored.

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod notify;
pub mod observability;
pub mod transport;

pub use app::{
    Bindings, Command, CommandOutput, DefaultHooks, FormController, FormHooks, Options, Phase,
    Texts,
};
pub use domain::{FormError, Result};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Runtime configuration: controller options plus logging.
///
/// # Example
///
/// ```toml
/// trace_level = "debug"
///
/// [options]
/// includeSelects = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Options handed to every controller the host binds.
    pub options: Options,

    /// Tracing level for the log subscriber.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from a flat string map.
    ///
    /// `trace_level` sets the log level; every other key is read by
    /// [`Options::from_map`].
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use formbits::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("trace_level".to_string(), "debug".to_string());
    /// map.insert("text.success".to_string(), "Saved".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// assert_eq!(config.options.text.success, "Saved");
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            options: Options::from_map(map),
            trace_level: map.get("trace_level").cloned(),
        }
    }

    /// Parses configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Toml`] for malformed documents.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads configuration from a TOML file.
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
    use crate::transport::DataType;

    #[test]
    fn toml_config_nests_options() {
        let config = Config::from_toml_str(
            r#"
trace_level = "warn"

[options]
dataType = "html"

[options.text]
sending = "Hold on"
"#,
        )
        .unwrap();

        assert_eq!(config.trace_level.as_deref(), Some("warn"));
        assert_eq!(config.options.data_type, DataType::Html);
        assert_eq!(config.options.text.sending, "Hold on");
        assert_eq!(config.options.text.error, Texts::default().error);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(FormError::Io(_))));
    }
}
