//! Caller-owned registry of controllers keyed by element id.
//!
//! Hosts that address forms by id rather than by holding controllers keep a
//! [`Bindings`]. Attaching an element twice reuses the first controller;
//! destroying a controller clears its entry.

use super::command::{Command, CommandOutput};
use super::controller::FormController;
use crate::domain::error::{FormError, Result};
use crate::domain::{FormHandle, SubmitEvent};
use crate::transport::{Response, Ticket, TransportError};
use serde_json::Value;
use std::collections::HashMap;
use std::rc::Rc;

/// Controllers bound to elements, keyed by element id.
#[derive(Debug, Default)]
pub struct Bindings {
    controllers: HashMap<String, FormController>,
}

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the controller bound to `element`, binding one with `make`
    /// on first use.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::IdInUse`] when a different element with the same
    /// id is already bound.
    pub fn attach<F>(&mut self, element: &FormHandle, make: F) -> Result<&mut FormController>
    where
        F: FnOnce(&FormHandle) -> FormController,
    {
        let id = element.borrow().id().to_string();
        if let Some(existing) = self.controllers.get(&id) {
            if !Rc::ptr_eq(existing.element(), element) {
                tracing::warn!(element = %id, "id already bound to another element");
                return Err(FormError::IdInUse(id));
            }
        }
        Ok(self.controllers.entry(id).or_insert_with_key(|id| {
            tracing::debug!(element = %id, "binding new controller");
            make(element)
        }))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FormController> {
        self.controllers.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut FormController> {
        self.controllers.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.controllers.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    fn controller(&mut self, id: &str) -> Result<&mut FormController> {
        self.controllers
            .get_mut(id)
            .ok_or_else(|| FormError::NotBound(id.to_string()))
    }

    /// Invokes a named operation on the controller bound to `id`.
    ///
    /// # Errors
    ///
    /// Returns an error for unbound ids, unknown operation names and
    /// malformed arguments.
    pub fn invoke(&mut self, id: &str, name: &str, args: &[Value]) -> Result<CommandOutput> {
        let command = Command::parse(name, args)?;
        if command == Command::Destroy {
            self.destroy(id)?;
            return Ok(CommandOutput::Done);
        }
        Ok(self.controller(id)?.invoke(command))
    }

    /// Raises a submit event on `element` and routes it to its controller.
    ///
    /// The returned event tells the host whether to perform the native
    /// submission: it is not cancelled when no controller intercepts it.
    pub fn submit(&mut self, element: &FormHandle) -> SubmitEvent {
        let (id, mut event) = {
            let element = element.borrow();
            (element.id().to_string(), element.request_submit())
        };

        if event.interceptor().is_none() {
            tracing::debug!(element = %id, "no interceptor; native submission");
            return event;
        }

        match self.controllers.get_mut(&id) {
            Some(controller) => {
                controller.submit(&mut event);
            }
            None => tracing::debug!(element = %id, "interceptor without registered controller"),
        }
        event
    }

    /// Reports a request outcome to the controller bound to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotBound`] for unbound ids and
    /// [`FormError::UnknownTicket`] when the ticket is not in flight.
    pub fn settle(
        &mut self,
        id: &str,
        ticket: Ticket,
        outcome: std::result::Result<Response, TransportError>,
    ) -> Result<()> {
        self.controller(id)?.settle(ticket, outcome)?;
        Ok(())
    }

    /// Destroys the controller bound to `id` and drops the association once
    /// the controller has detached from its element.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotBound`] for unbound ids.
    pub fn destroy(&mut self, id: &str) -> Result<()> {
        let controller = self.controller(id)?;
        controller.destroy();
        if controller.is_bound() {
            tracing::debug!(element = %id, "destroy hook kept controller bound");
        } else {
            self.controllers.remove(id);
            tracing::debug!(element = %id, "controller association cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::hooks::FormHooks;
    use crate::domain::{Field, FormElement};
    use crate::transport::RecordingTransport;
    use crate::Options;
    use serde_json::json;

    fn element(id: &str) -> FormHandle {
        FormElement::new(id)
            .with_field(Field::text("q").required())
            .into_handle()
    }

    fn make(handle: &FormHandle) -> FormController {
        FormController::bind(handle, Options::default(), RecordingTransport::new())
    }

    #[test]
    fn attach_binds_once() {
        let handle = element("search");
        let mut bindings = Bindings::new();

        bindings.attach(&handle, make).unwrap();
        let first = handle.borrow().interceptor();
        bindings
            .attach(&handle, |_| panic!("must reuse the existing controller"))
            .unwrap();

        assert_eq!(bindings.len(), 1);
        assert_eq!(handle.borrow().interceptor(), first);
    }

    #[test]
    fn invoke_dispatches_by_name() {
        let handle = element("search");
        let mut bindings = Bindings::new();
        bindings.attach(&handle, make).unwrap();

        assert_eq!(
            bindings.invoke("search", "isEmpty", &[]).unwrap(),
            CommandOutput::Bool(true)
        );
        bindings.invoke("search", "setState", &[json!(false)]).unwrap();
        assert!(handle.borrow().fields()[0].is_disabled());

        assert!(matches!(
            bindings.invoke("search", "frobnicate", &[]),
            Err(FormError::UnknownCommand(_))
        ));
        assert!(matches!(
            bindings.invoke("missing", "clear", &[]),
            Err(FormError::NotBound(_))
        ));
    }

    #[test]
    fn destroy_clears_association_and_interceptor() {
        let handle = element("search");
        let mut bindings = Bindings::new();
        bindings.attach(&handle, make).unwrap();

        bindings.invoke("search", "destroy", &[]).unwrap();

        assert!(!bindings.contains("search"));
        assert!(handle.borrow().interceptor().is_none());
        let event = bindings.submit(&handle);
        assert!(!event.is_default_prevented());
    }

    struct KeepBound;

    impl FormHooks for KeepBound {
        fn on_destroy(&self, _form: &mut FormController) {}
    }

    #[test]
    fn destroy_override_keeps_association() {
        let handle = element("search");
        let mut bindings = Bindings::new();
        bindings.attach(&handle, |h| {
            FormController::builder(h, RecordingTransport::new())
                .hooks(KeepBound)
                .bind()
        })
        .unwrap();

        bindings.destroy("search").unwrap();
        assert!(bindings.contains("search"));
        assert!(handle.borrow().interceptor().is_some());
    }

    #[test]
    fn same_id_on_another_element_is_rejected() {
        let first = element("form");
        let second = element("form");
        let mut bindings = Bindings::new();
        bindings.attach(&first, make).unwrap();

        let result = bindings.attach(&second, make);

        assert!(matches!(result, Err(FormError::IdInUse(id)) if id == "form"));
        assert!(second.borrow().interceptor().is_none());
        let bound = bindings.get("form").unwrap();
        assert!(Rc::ptr_eq(bound.element(), &first));
    }

    #[test]
    fn submit_routes_to_controller() {
        let handle = element("search");
        let mut bindings = Bindings::new();
        bindings.attach(&handle, make).unwrap();

        let event = bindings.submit(&handle);
        assert!(event.is_default_prevented());
    }
}
