//! Submission lifecycle phase.
//!
//! A controller moves through
//! `Idle → Validating → {Empty, Sending} → {Success, Error} → Idle`.
//! Validation and the empty/success/error branches complete synchronously, so
//! only the two resting states are stored.

use crate::transport::Ticket;
use chrono::{DateTime, Utc};

/// Resting state of a controller between UI events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No request in flight. Initial state, and the state after every settle.
    #[default]
    Idle,

    /// One request dispatched and not yet settled.
    Sending {
        /// Ticket the transport will settle with.
        ticket: Ticket,
        /// When the request was dispatched.
        issued_at: DateTime<Utc>,
    },
}

impl Phase {
    #[must_use]
    pub const fn is_sending(&self) -> bool {
        matches!(self, Self::Sending { .. })
    }

    /// Ticket of the in-flight request, if any.
    #[must_use]
    pub const fn ticket(&self) -> Option<Ticket> {
        match self {
            Self::Idle => None,
            Self::Sending { ticket, .. } => Some(*ticket),
        }
    }
}
