//! The form lifecycle controller.
//!
//! [`FormController`] binds to one [`FormElement`](crate::domain::FormElement)
//! and mediates a submission from validation to completion:
//!
//! 1. The host raises a submit event and passes it to [`FormController::submit`].
//! 2. The controller cancels the native submission and checks required fields.
//! 3. Blank required fields run the empty path (`on_empty`); otherwise the
//!    send path (`on_send`) collects values, disables the form, switches the
//!    submit label and dispatches a request through the [`Transport`].
//! 4. When the request completes, the host calls [`FormController::settle`]
//!    and the controller runs `on_success` or `on_error`.
//!
//! Every replaceable step goes through the controller's [`FormHooks`].
//!
//! # Example
//!
//! ```
//! use formbits::domain::{Field, FormElement, SubmitControl};
//! use formbits::transport::{RecordingTransport, Response};
//! use formbits::{FormController, Options};
//!
//! let element = FormElement::new("contact")
//!     .with_action("/contact")
//!     .with_method("post")
//!     .with_field(Field::text("email").required().with_value("a@b.com"))
//!     .with_submit(SubmitControl::button("Send"))
//!     .into_handle();
//!
//! let transport = RecordingTransport::new();
//! let mut form = FormController::bind(&element, Options::default(), transport.clone());
//!
//! form.trigger_submit();
//! let (ticket, request) = transport.last().unwrap();
//! assert_eq!(request.url, "/contact");
//!
//! form.settle(ticket, Ok(Response::new(200, "{}"))).unwrap();
//! assert!(!form.phase().is_sending());
//! ```

use super::hooks::{DefaultHooks, FormHooks};
use super::options::Options;
use super::phase::Phase;
use crate::domain::error::{FormError, Result};
use crate::domain::{FieldId, FormHandle, InterceptorId, SubmitEvent};
use crate::notify::{Notifier, TracingNotifier};
use crate::transport::{
    interpret, Method, Request, Response, Settled, Status, Ticket, Transport, TransportError,
    Values,
};
use chrono::Utc;
use serde_json::Value;
use std::rc::Rc;

/// Controller bound to a single form element.
pub struct FormController {
    element: FormHandle,
    /// Fields observed since bind time, in document order.
    fields: Vec<FieldId>,
    has_submit: bool,
    options: Options,
    hooks: Rc<dyn FormHooks>,
    transport: Box<dyn Transport>,
    notifier: Box<dyn Notifier>,
    /// Submit label captured on the first label swap.
    original_label: Option<String>,
    phase: Phase,
    interceptor: Option<InterceptorId>,
    next_ticket: u64,
}

/// Assembles a [`FormController`] before binding it.
pub struct FormControllerBuilder {
    element: FormHandle,
    transport: Box<dyn Transport>,
    options: Options,
    hooks: Rc<dyn FormHooks>,
    notifier: Box<dyn Notifier>,
}

impl FormControllerBuilder {
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn hooks(mut self, hooks: impl FormHooks + 'static) -> Self {
        self.hooks = Rc::new(hooks);
        self
    }

    /// Uses hooks the caller keeps a handle to.
    #[must_use]
    pub fn shared_hooks(mut self, hooks: Rc<dyn FormHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Collects fields and the submit control, then registers the
    /// submission interceptor on the element.
    #[must_use]
    pub fn bind(self) -> FormController {
        let (fields, has_submit, interceptor, element_id) = {
            let mut element = self.element.borrow_mut();
            let fields = element.matching_fields(self.options.include_selects);
            let has_submit = element.submit_control().is_some();
            let interceptor = element.attach_interceptor();
            (fields, has_submit, interceptor, element.id().to_string())
        };

        tracing::debug!(
            element = %element_id,
            field_count = fields.len(),
            has_submit = has_submit,
            data_type = ?self.options.data_type,
            "form controller bound"
        );

        FormController {
            element: self.element,
            fields,
            has_submit,
            options: self.options,
            hooks: self.hooks,
            transport: self.transport,
            notifier: self.notifier,
            original_label: None,
            phase: Phase::Idle,
            interceptor: Some(interceptor),
            next_ticket: 1,
        }
    }
}

impl FormController {
    /// Starts building a controller for `element` that sends through `transport`.
    ///
    /// Defaults: [`Options::default`], [`DefaultHooks`], [`TracingNotifier`].
    pub fn builder(element: &FormHandle, transport: impl Transport + 'static) -> FormControllerBuilder {
        FormControllerBuilder {
            element: Rc::clone(element),
            transport: Box::new(transport),
            options: Options::default(),
            hooks: Rc::new(DefaultHooks),
            notifier: Box::new(TracingNotifier),
        }
    }

    /// Binds a controller with default hooks and notifier.
    pub fn bind(element: &FormHandle, options: Options, transport: impl Transport + 'static) -> Self {
        Self::builder(element, transport).options(options).bind()
    }

    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The bound element.
    #[must_use]
    pub const fn element(&self) -> &FormHandle {
        &self.element
    }

    /// Fields collected at bind time.
    #[must_use]
    pub fn field_ids(&self) -> &[FieldId] {
        &self.fields
    }

    /// Submit label captured before the first swap, if a swap happened.
    #[must_use]
    pub fn original_label(&self) -> Option<&str> {
        self.original_label.as_deref()
    }

    /// Whether the submission interceptor is still registered.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.interceptor.is_some()
    }

    /// Handles a submit event.
    ///
    /// Events raised while another controller (or none) intercepts the
    /// element are left untouched. Otherwise the native submission is
    /// cancelled and the empty or send path runs. A submission arriving while
    /// a request is in flight is cancelled and dropped.
    pub fn submit(&mut self, event: &mut SubmitEvent) -> &mut Self {
        let element_id = self.element.borrow().id().to_string();
        let _span = tracing::debug_span!("submit", element = %element_id).entered();

        if self.interceptor.is_none() || event.interceptor() != self.interceptor {
            tracing::debug!("submit event not intercepted by this controller");
            return self;
        }
        event.prevent_default();

        if let Some(ticket) = self.phase.ticket() {
            tracing::warn!(ticket = %ticket, "submission ignored: request already in flight");
            return self;
        }

        if self.is_empty() {
            tracing::debug!("required field blank");
            self.on_empty()
        } else {
            self.send()
        }
    }

    /// Raises a submit event on the bound element and handles it.
    ///
    /// Returns the event so the host can tell whether the native submission
    /// was cancelled.
    pub fn trigger_submit(&mut self) -> SubmitEvent {
        let mut event = self.element.borrow().request_submit();
        self.submit(&mut event);
        event
    }

    /// `true` when no observed field remains, or a required field is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let element = self.element.borrow();
        let mut present = self.fields.iter().filter_map(|id| element.field(*id)).peekable();
        if present.peek().is_none() {
            return true;
        }
        present.any(|field| field.is_missing())
    }

    /// Field name → effective value, in collection order.
    ///
    /// A later field with an already-seen name overwrites the value. Nameless
    /// fields contribute nothing.
    #[must_use]
    pub fn collect_values(&self) -> Values {
        let element = self.element.borrow();
        let mut values = Values::new();
        for field in self.fields.iter().filter_map(|id| element.field(*id)) {
            if field.name().is_empty() {
                tracing::trace!(field = %field.id(), "skipping nameless field");
                continue;
            }
            values.insert(field.name().to_string(), field.effective_value());
        }
        values
    }

    /// Request payload as produced by the `on_values` hook.
    #[must_use]
    pub fn values(&self) -> Values {
        let hooks = Rc::clone(&self.hooks);
        hooks.on_values(self)
    }

    /// Runs the send path through the `on_send` hook.
    pub fn send(&mut self) -> &mut Self {
        let hooks = Rc::clone(&self.hooks);
        hooks.on_send(self);
        self
    }

    /// Builds a request from the element and `values`, enters the sending
    /// phase and dispatches it.
    ///
    /// A dispatch refusal is settled at once through the error path.
    pub fn issue_request(&mut self, values: Values) -> Ticket {
        let request = {
            let element = self.element.borrow();
            Request {
                url: element.action().to_string(),
                method: Method::from_attribute(element.method()),
                data_type: self.options.data_type,
                data: values,
            }
        };

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        if let Some(previous) = self.phase.ticket() {
            tracing::debug!(previous = %previous, "replacing in-flight ticket");
        }
        self.phase = Phase::Sending {
            ticket,
            issued_at: Utc::now(),
        };

        tracing::debug!(
            ticket = %ticket,
            method = %request.method,
            url = %request.url,
            field_count = request.data.len(),
            "dispatching request"
        );

        if let Err(error) = self.transport.dispatch(ticket, request) {
            tracing::warn!(ticket = %ticket, error = %error, "transport refused request");
            self.complete(ticket, Err(error));
        }
        ticket
    }

    /// Reports the outcome of the request identified by `ticket`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownTicket`] when `ticket` is not the request
    /// in flight. No hook runs in that case.
    pub fn settle(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<Response, TransportError>,
    ) -> Result<&mut Self> {
        if self.phase.ticket() != Some(ticket) {
            tracing::debug!(ticket = %ticket, phase = ?self.phase, "settle for unknown ticket");
            return Err(FormError::UnknownTicket(ticket.get()));
        }
        self.complete(ticket, outcome);
        Ok(self)
    }

    fn complete(&mut self, ticket: Ticket, outcome: std::result::Result<Response, TransportError>) {
        let issued_at = match self.phase {
            Phase::Sending { issued_at, .. } => issued_at,
            Phase::Idle => Utc::now(),
        };
        self.phase = Phase::Idle;

        let settled = interpret(self.options.data_type, outcome);
        tracing::debug!(
            ticket = %ticket,
            status = %settled.status(),
            elapsed_ms = (Utc::now() - issued_at).num_milliseconds(),
            "request settled"
        );

        match settled {
            Settled::Success {
                data,
                status,
                response,
            } => {
                self.on_success(&data, status, &response);
            }
            Settled::Failure {
                response,
                status,
                error,
            } => {
                self.on_error(response.as_ref(), status, &error);
            }
        }
    }

    /// Runs the `on_empty` hook.
    pub fn on_empty(&mut self) -> &mut Self {
        let hooks = Rc::clone(&self.hooks);
        hooks.on_empty(self);
        self
    }

    /// Runs the `on_success` hook.
    pub fn on_success(&mut self, data: &Value, status: Status, raw: &Response) -> &mut Self {
        let hooks = Rc::clone(&self.hooks);
        hooks.on_success(self, data, status, raw);
        self
    }

    /// Runs the `on_error` hook.
    pub fn on_error(
        &mut self,
        raw: Option<&Response>,
        status: Status,
        error: &TransportError,
    ) -> &mut Self {
        let hooks = Rc::clone(&self.hooks);
        hooks.on_error(self, raw, status, error);
        self
    }

    /// Runs the `on_set_state` hook.
    pub fn set_state(&mut self, active: bool) -> &mut Self {
        let hooks = Rc::clone(&self.hooks);
        hooks.on_set_state(self, active);
        self
    }

    /// Runs the `on_change_button` hook.
    pub fn change_button(&mut self, active: bool) -> &mut Self {
        let hooks = Rc::clone(&self.hooks);
        hooks.on_change_button(self, active);
        self
    }

    pub fn activate(&mut self) -> &mut Self {
        self.set_state(true)
    }

    pub fn desactivate(&mut self) -> &mut Self {
        self.set_state(false)
    }

    /// Empties every observed field, deselects options and unchecks toggles.
    pub fn clear(&mut self) -> &mut Self {
        {
            let mut element = self.element.borrow_mut();
            for id in &self.fields {
                if let Some(field) = element.field_mut(*id) {
                    field.clear();
                }
            }
        }
        self
    }

    /// Runs the `on_destroy` hook.
    pub fn destroy(&mut self) -> &mut Self {
        let hooks = Rc::clone(&self.hooks);
        hooks.on_destroy(self);
        self
    }

    /// Shows `message` through the notifier.
    pub fn alert(&mut self, message: &str) {
        self.notifier.alert(message);
    }

    /// Sets the disabled flag on every observed field and the submit control.
    pub fn set_controls_disabled(&mut self, disabled: bool) {
        let mut element = self.element.borrow_mut();
        for id in &self.fields {
            if let Some(field) = element.field_mut(*id) {
                field.set_disabled(disabled);
            }
        }
        if self.has_submit {
            if let Some(control) = element.submit_control_mut() {
                control.set_disabled(disabled);
            }
        }
    }

    /// Shows the sending text on the submit control (`active`) or restores
    /// the label it had before the first swap.
    pub fn swap_button_label(&mut self, active: bool) {
        if !self.has_submit {
            return;
        }
        let mut element = self.element.borrow_mut();
        let Some(control) = element.submit_control_mut() else {
            return;
        };
        let original = self
            .original_label
            .get_or_insert_with(|| control.label().to_string());
        let label = if active {
            self.options.text.sending.clone()
        } else {
            original.clone()
        };
        control.set_label(label);
    }

    /// Removes the submission interceptor from the element.
    pub fn detach(&mut self) {
        if let Some(interceptor) = self.interceptor.take() {
            let removed = self.element.borrow_mut().detach_interceptor(interceptor);
            tracing::debug!(removed = removed, "submit interceptor detached");
        }
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("fields", &self.fields)
            .field("has_submit", &self.has_submit)
            .field("options", &self.options)
            .field("phase", &self.phase)
            .field("interceptor", &self.interceptor)
            .finish_non_exhaustive()
    }
}
