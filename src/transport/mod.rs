//! HTTP transport seam.
//!
//! The controller never performs I/O itself. It hands each request to a
//! [`Transport`] together with a [`Ticket`], then waits for the host to call
//! [`crate::FormController::settle`] with the outcome. This keeps the
//! controller on the single UI thread while the request runs elsewhere.
//!
//! # Architecture
//!
//! - `messages`: request, response, status and error types
//! - `outcome`: classification of completed requests for the hooks
//!
//! # Implementations
//!
//! - [`RecordingTransport`]: keeps every dispatched request in memory; used by
//!   tests and the runner binary

mod messages;
mod outcome;

pub use messages::{DataType, Method, Request, Response, Status, Ticket, TransportError, Values};
pub use outcome::{interpret, Settled};

use std::cell::RefCell;
use std::rc::Rc;

/// Abstraction over the asynchronous HTTP collaborator.
///
/// `dispatch` must not block. Completion is reported separately through
/// [`crate::FormController::settle`] using the same ticket.
pub trait Transport {
    /// Starts a request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request cannot even be started.
    /// The controller settles such failures immediately through its error path.
    fn dispatch(&mut self, ticket: Ticket, request: Request) -> Result<(), TransportError>;
}

/// In-memory transport that records dispatched requests.
///
/// Clones share the same log, so a test can keep one clone and give the
/// other to a controller.
///
/// # Example
///
/// ```
/// use formbits::transport::RecordingTransport;
///
/// let transport = RecordingTransport::new();
/// let log = transport.clone();
/// assert!(log.requests().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    log: Rc<RefCell<Vec<(Ticket, Request)>>>,
    refuse_with: Option<TransportError>,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose `dispatch` fails with `error` after recording.
    #[must_use]
    pub fn refusing(error: TransportError) -> Self {
        Self {
            log: Rc::default(),
            refuse_with: Some(error),
        }
    }

    /// Every dispatched request in order.
    #[must_use]
    pub fn requests(&self) -> Vec<(Ticket, Request)> {
        self.log.borrow().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<(Ticket, Request)> {
        self.log.borrow().last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }
}

impl Transport for RecordingTransport {
    fn dispatch(&mut self, ticket: Ticket, request: Request) -> Result<(), TransportError> {
        tracing::debug!(
            ticket = %ticket,
            method = %request.method,
            url = %request.url,
            field_count = request.data.len(),
            "request recorded"
        );
        self.log.borrow_mut().push((ticket, request));
        match &self.refuse_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
