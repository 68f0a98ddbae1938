//! Form element model.
//!
//! [`FormElement`] is the headless stand-in for a `<form>` node: declarative
//! `action` and `method` attributes, an ordered list of [`Field`]s, an optional
//! [`SubmitControl`], and a slot recording whether a submission interceptor is
//! registered.
//!
//! The host owns elements and shares them with controllers through a
//! [`FormHandle`]. Everything runs on one UI thread, so the handle is a plain
//! `Rc<RefCell<_>>`.
//!
//! # Example
//!
//! ```
//! use formbits::domain::{Field, FormElement, SubmitControl};
//!
//! let element = FormElement::new("contact")
//!     .with_action("/contact")
//!     .with_method("post")
//!     .with_field(Field::text("email").required())
//!     .with_submit(SubmitControl::button("Send"));
//!
//! assert_eq!(element.fields().len(), 1);
//! assert_eq!(element.method(), "post");
//! ```

use super::field::{Field, FieldId};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Interceptor tokens are unique across all elements in the process.
static NEXT_INTERCEPTOR: AtomicU64 = AtomicU64::new(1);

/// Shared handle to a form element.
pub type FormHandle = Rc<RefCell<FormElement>>;

/// Token identifying a registered submission interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterceptorId(u64);

/// How a submit control displays its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// A `<button type="submit">`; the label is its text content.
    Button,
    /// An `<input type="submit">`; the label is its value.
    Input,
}

/// The control that triggers submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    kind: ControlKind,
    text: String,
    value: String,
    disabled: bool,
}

impl SubmitControl {
    /// Creates a generic button whose text content is `text`.
    pub fn button(text: impl Into<String>) -> Self {
        Self {
            kind: ControlKind::Button,
            text: text.into(),
            value: String::new(),
            disabled: false,
        }
    }

    /// Creates an input-type submit control whose value is `value`.
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            kind: ControlKind::Input,
            text: String::new(),
            value: value.into(),
            disabled: false,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ControlKind {
        self.kind
    }

    /// Displayed label: text content for buttons, value for inputs.
    #[must_use]
    pub fn label(&self) -> &str {
        match self.kind {
            ControlKind::Button => &self.text,
            ControlKind::Input => &self.value,
        }
    }

    /// Replaces the displayed label through the property matching the control kind.
    pub fn set_label(&mut self, label: impl Into<String>) {
        match self.kind {
            ControlKind::Button => self.text = label.into(),
            ControlKind::Input => self.value = label.into(),
        }
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

/// Submission event raised by [`FormElement::request_submit`].
///
/// Mirrors the two bits of a DOM submit event the controller cares about:
/// whether a controller intercepts it and whether the native side effect
/// (navigation) was cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    interceptor: Option<InterceptorId>,
    default_prevented: bool,
}

impl SubmitEvent {
    /// Event not routed through any interceptor.
    #[must_use]
    pub const fn native() -> Self {
        Self {
            interceptor: None,
            default_prevented: false,
        }
    }

    /// Interceptor registered on the element when the event was raised.
    #[must_use]
    pub const fn interceptor(&self) -> Option<InterceptorId> {
        self.interceptor
    }

    /// Cancels the native submission.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A form-like element.
#[derive(Debug, Clone)]
pub struct FormElement {
    id: String,
    action: String,
    method: String,
    fields: Vec<Field>,
    submit: Option<SubmitControl>,
    interceptor: Option<InterceptorId>,
    next_field_id: u64,
}

impl FormElement {
    /// Creates an empty element with the given id and no action or method.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            action: String::new(),
            method: String::new(),
            fields: Vec::new(),
            submit: None,
            interceptor: None,
            next_field_id: 1,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.push_field(field);
        self
    }

    #[must_use]
    pub fn with_submit(mut self, control: SubmitControl) -> Self {
        self.submit = Some(control);
        self
    }

    /// Wraps the element in a shared handle.
    #[must_use]
    pub fn into_handle(self) -> FormHandle {
        Rc::new(RefCell::new(self))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declared `action` attribute, empty when absent.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Declared `method` attribute as written, empty when absent.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Appends a field and returns the identifier assigned to it.
    pub fn push_field(&mut self, mut field: Field) -> FieldId {
        let id = FieldId(self.next_field_id);
        self.next_field_id += 1;
        field.id = id;
        self.fields.push(field);
        id
    }

    /// Removes a field. Its identifier is never reassigned.
    pub fn remove_field(&mut self, id: FieldId) -> Option<Field> {
        let index = self.fields.iter().position(|f| f.id == id)?;
        Some(self.fields.remove(index))
    }

    /// All fields in document order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// First field with the given name.
    pub fn field_named_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// Identifiers of the fields a controller observes, in document order.
    ///
    /// Inputs and text areas always match; selection controls only when
    /// `include_selects` is set.
    #[must_use]
    pub fn matching_fields(&self, include_selects: bool) -> Vec<FieldId> {
        self.fields
            .iter()
            .filter(|f| include_selects || !f.kind().is_select())
            .map(Field::id)
            .collect()
    }

    #[must_use]
    pub const fn submit_control(&self) -> Option<&SubmitControl> {
        self.submit.as_ref()
    }

    pub fn submit_control_mut(&mut self) -> Option<&mut SubmitControl> {
        self.submit.as_mut()
    }

    /// Registers a submission interceptor, replacing any previous one.
    pub fn attach_interceptor(&mut self) -> InterceptorId {
        let id = InterceptorId(NEXT_INTERCEPTOR.fetch_add(1, Ordering::Relaxed));
        if self.interceptor.replace(id).is_some() {
            tracing::debug!(element = %self.id, "replacing existing submit interceptor");
        }
        id
    }

    /// Removes the interceptor if it is still the registered one.
    ///
    /// Returns `true` when the interceptor was removed.
    pub fn detach_interceptor(&mut self, id: InterceptorId) -> bool {
        if self.interceptor == Some(id) {
            self.interceptor = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn interceptor(&self) -> Option<InterceptorId> {
        self.interceptor
    }

    /// Raises a submit event carrying the current interceptor.
    #[must_use]
    pub const fn request_submit(&self) -> SubmitEvent {
        SubmitEvent {
            interceptor: self.interceptor,
            default_prevented: false,
        }
    }
}
