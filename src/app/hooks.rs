//! Override strategy for controller lifecycle steps.
//!
//! Each lifecycle step a caller may replace is a method on [`FormHooks`]. The
//! provided method bodies run the stock behavior from [`defaults`], so
//! [`DefaultHooks`] overrides nothing and a custom implementation overrides
//! only the steps it cares about. An override replaces the step entirely; it
//! can still call the matching `defaults` function to extend rather than
//! replace.
//!
//! Hooks receive the controller itself, so they can use its public API
//! (`activate`, `clear`, `alert`, ...). Methods take `&self`; implementations
//! that keep state use `Cell`/`RefCell`, as everything runs on the UI thread.
//!
//! # Example
//!
//! ```
//! use formbits::app::hooks::{defaults, FormHooks};
//! use formbits::transport::{Response, Status};
//! use formbits::FormController;
//! use serde_json::Value;
//!
//! /// Keeps the entered values after a successful save.
//! struct KeepValues;
//!
//! impl FormHooks for KeepValues {
//!     fn on_success(&self, form: &mut FormController, _data: &Value, _status: Status, _raw: &Response) {
//!         form.activate().change_button(false);
//!         let message = form.options().text.success.clone();
//!         form.alert(&message);
//!     }
//! }
//! ```

use super::controller::FormController;
use crate::transport::{Response, Status, TransportError, Values};
use serde_json::Value;

/// Replaceable lifecycle steps.
pub trait FormHooks {
    /// Runs when a submission fails validation.
    fn on_empty(&self, form: &mut FormController) {
        defaults::on_empty(form);
    }

    /// Runs when a submission passes validation. Replacing it takes over the
    /// whole send path: no payload is collected and no request is issued.
    fn on_send(&self, form: &mut FormController) {
        defaults::send(form);
    }

    /// Produces the request payload.
    fn on_values(&self, form: &FormController) -> Values {
        defaults::values(form)
    }

    fn on_success(&self, form: &mut FormController, data: &Value, status: Status, raw: &Response) {
        defaults::on_success(form, data, status, raw);
    }

    fn on_error(
        &self,
        form: &mut FormController,
        raw: Option<&Response>,
        status: Status,
        error: &TransportError,
    ) {
        defaults::on_error(form, raw, status, error);
    }

    /// Enables (`active`) or disables the form controls.
    fn on_set_state(&self, form: &mut FormController, active: bool) {
        defaults::set_state(form, active);
    }

    /// Switches the submit label to the sending text (`active`) or back.
    fn on_change_button(&self, form: &mut FormController, active: bool) {
        defaults::change_button(form, active);
    }

    fn on_destroy(&self, form: &mut FormController) {
        defaults::destroy(form);
    }
}

/// Hooks that keep every stock behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl FormHooks for DefaultHooks {}

/// Stock behavior of each lifecycle step.
pub mod defaults {
    use super::FormController;
    use crate::transport::{Response, Status, TransportError, Values};
    use serde_json::Value;

    /// Alerts the `empty` message.
    pub fn on_empty(form: &mut FormController) {
        let message = form.options().text.empty.clone();
        form.alert(&message);
    }

    /// Collects the payload, enters the busy state and issues the request.
    pub fn send(form: &mut FormController) {
        let values = form.values();
        form.desactivate().change_button(true);
        form.issue_request(values);
    }

    #[must_use]
    pub fn values(form: &FormController) -> Values {
        form.collect_values()
    }

    /// Re-enables the form, clears it, restores the label and alerts `success`.
    pub fn on_success(form: &mut FormController, _data: &Value, _status: Status, _raw: &Response) {
        form.activate().clear().change_button(false);
        let message = form.options().text.success.clone();
        form.alert(&message);
    }

    /// Re-enables the form, restores the label and alerts `error`.
    pub fn on_error(
        form: &mut FormController,
        _raw: Option<&Response>,
        status: Status,
        error: &TransportError,
    ) {
        tracing::debug!(status = %status, error = %error, "submission failed");
        form.activate().change_button(false);
        let message = form.options().text.error.clone();
        form.alert(&message);
    }

    pub fn set_state(form: &mut FormController, active: bool) {
        form.set_controls_disabled(!active);
    }

    pub fn change_button(form: &mut FormController, active: bool) {
        form.swap_button_label(active);
    }

    /// Removes the submission interceptor.
    pub fn destroy(form: &mut FormController) {
        form.detach();
    }
}
