//! Application layer: the form controller and everything it is configured with.
//!
//! # Modules
//!
//! - `controller`: [`FormController`] and its builder
//! - [`hooks`]: the override strategy for lifecycle steps
//! - `options`: messages and response format
//! - `phase`: submission lifecycle state
//! - `command`: operations addressed by name
//! - `bindings`: optional caller-owned registry keyed by element id

pub mod bindings;
pub mod command;
pub mod controller;
pub mod hooks;
pub mod options;
pub mod phase;

pub use bindings::Bindings;
pub use command::{Command, CommandOutput};
pub use controller::{FormController, FormControllerBuilder};
pub use hooks::{DefaultHooks, FormHooks};
pub use options::{Options, Texts};
pub use phase::Phase;
