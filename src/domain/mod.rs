//! Domain layer for formbits.
//!
//! This module contains the headless form model the controller operates on,
//! independent of any transport or notification mechanism.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`field`]: Field model and effective values
//! - [`element`]: Form element, submit control and submit events
//! - `fixture`: TOML descriptions of elements
//!
//! # Examples
//!
//! ```
//! use formbits::domain::{Field, FormElement, Result};
//!
//! fn signup_form() -> Result<FormElement> {
//!     Ok(FormElement::new("signup")
//!         .with_action("/signup")
//!         .with_field(Field::input("email", "email").required()))
//! }
//!
//! assert!(signup_form().is_ok());
//! ```

pub mod element;
pub mod error;
pub mod field;
mod fixture;

pub use element::{ControlKind, FormElement, FormHandle, InterceptorId, SubmitControl, SubmitEvent};
pub use error::{FormError, Result};
pub use field::{Field, FieldId, FieldKind, SelectOption};
