//! Error types for the formbits crate.
//!
//! This module defines the centralized error type [`FormError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. Request
//! failures have their own type, [`crate::transport::TransportError`], because
//! they are reported through the error hook rather than returned to the caller.

use thiserror::Error;

/// The main error type for formbits operations.
///
/// These are host or programmer errors: malformed configuration, unknown
/// command names, completion reports for requests that are not in flight.
/// Validation failures and transport failures are never returned as a
/// `FormError`; they travel through the controller's hooks.
///
/// # Examples
///
/// ```
/// use formbits::FormError;
///
/// fn validate_config() -> Result<(), FormError> {
///     Err(FormError::Config("unknown dataType `yaml`".to_string()))
/// }
///
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum FormError {
    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, typically while
    /// reading an options file or a form fixture.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML document could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A form fixture describes an element that cannot exist.
    ///
    /// For example a select control whose default value names no option.
    #[error("Invalid form fixture: {0}")]
    Fixture(String),

    /// A command name did not match any controller operation.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A command was invoked with arguments of the wrong shape.
    #[error("Invalid argument for `{command}`: {reason}")]
    InvalidArgument {
        /// Name of the command being invoked.
        command: String,
        /// What was wrong with the arguments.
        reason: String,
    },

    /// No element with the given id is bound in a registry.
    #[error("No controller bound to element `{0}`")]
    NotBound(String),

    /// A registry already holds a different element under this id.
    #[error("Element id `{0}` is already bound to another element")]
    IdInUse(String),

    /// A completion report named a ticket that is not the in-flight request.
    ///
    /// Happens when the host settles a request twice, or settles after the
    /// controller was destroyed.
    #[error("Ticket {0} does not match an in-flight request")]
    UnknownTicket(u64),

    /// The request payload could not be URL-encoded.
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for formbits operations.
pub type Result<T> = std::result::Result<T, FormError>;
