//! Controller operations addressed by name.
//!
//! Hosts that drive forms from markup or scripts name an operation as a
//! string with JSON arguments, e.g. `("setState", [false])`. [`Command`]
//! parses that pair into a typed operation and [`FormController::invoke`]
//! runs it.

use super::controller::FormController;
use crate::domain::error::{FormError, Result};
use crate::transport::Values;
use serde_json::Value;

/// A controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Submit,
    Send,
    IsEmpty,
    Values,
    Clear,
    Activate,
    Desactivate,
    SetState(bool),
    ChangeButton(bool),
    OnEmpty,
    Destroy,
}

/// What an invoked command returned.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// The command ran for its effects.
    Done,
    Bool(bool),
    Values(Values),
}

impl Command {
    /// Parses an operation name and its arguments.
    ///
    /// `setState` without an argument means "active"; `changeButton` without
    /// one means "restore". Arguments are read with JavaScript truthiness.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownCommand`] for names that are not
    /// operations and [`FormError::InvalidArgument`] when an operation that
    /// takes no argument receives some.
    ///
    /// # Example
    ///
    /// ```
    /// use formbits::app::Command;
    /// use serde_json::json;
    ///
    /// assert_eq!(Command::parse("setState", &[json!(0)]).unwrap(), Command::SetState(false));
    /// assert_eq!(Command::parse("setState", &[]).unwrap(), Command::SetState(true));
    /// assert!(Command::parse("explode", &[]).is_err());
    /// ```
    pub fn parse(name: &str, args: &[Value]) -> Result<Self> {
        let command = match name {
            "setState" => {
                return Ok(Self::SetState(args.first().map_or(true, |v| v.is_null() || truthy(v))));
            }
            "changeButton" => return Ok(Self::ChangeButton(args.first().is_some_and(truthy))),
            "submit" => Self::Submit,
            "send" => Self::Send,
            "isEmpty" => Self::IsEmpty,
            "values" => Self::Values,
            "clear" => Self::Clear,
            "activate" => Self::Activate,
            "desactivate" => Self::Desactivate,
            "onEmpty" => Self::OnEmpty,
            "destroy" => Self::Destroy,
            other => return Err(FormError::UnknownCommand(other.to_string())),
        };

        if args.is_empty() {
            Ok(command)
        } else {
            Err(FormError::InvalidArgument {
                command: name.to_string(),
                reason: format!("expected no arguments, got {}", args.len()),
            })
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl FormController {
    /// Runs a named operation.
    pub fn invoke(&mut self, command: Command) -> CommandOutput {
        tracing::debug!(command = ?command, "invoking command");
        match command {
            Command::Submit => {
                self.trigger_submit();
            }
            Command::Send => {
                self.send();
            }
            Command::IsEmpty => return CommandOutput::Bool(self.is_empty()),
            Command::Values => return CommandOutput::Values(self.collect_values()),
            Command::Clear => {
                self.clear();
            }
            Command::Activate => {
                self.activate();
            }
            Command::Desactivate => {
                self.desactivate();
            }
            Command::SetState(active) => {
                self.set_state(active);
            }
            Command::ChangeButton(active) => {
                self.change_button(active);
            }
            Command::OnEmpty => {
                self.on_empty();
            }
            Command::Destroy => {
                self.destroy();
            }
        }
        CommandOutput::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Field, FormElement};
    use crate::transport::RecordingTransport;
    use crate::Options;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!(false), false)]
    #[case(json!(0), false)]
    #[case(json!(1), true)]
    #[case(json!(""), false)]
    #[case(json!("no"), true)]
    #[case(json!([]), true)]
    fn change_button_argument_truthiness(#[case] arg: Value, #[case] expected: bool) {
        assert_eq!(
            Command::parse("changeButton", &[arg]).unwrap(),
            Command::ChangeButton(expected)
        );
    }

    #[test]
    fn set_state_null_means_active() {
        assert_eq!(
            Command::parse("setState", &[Value::Null]).unwrap(),
            Command::SetState(true)
        );
    }

    #[test]
    fn change_button_without_argument_restores() {
        assert_eq!(
            Command::parse("changeButton", &[]).unwrap(),
            Command::ChangeButton(false)
        );
    }

    #[test]
    fn unexpected_arguments_are_rejected() {
        assert!(matches!(
            Command::parse("clear", &[json!(1)]),
            Err(FormError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn invoke_returns_query_results() {
        let element = FormElement::new("f")
            .with_field(Field::text("q").required().with_value("rust"))
            .into_handle();
        let mut form = FormController::bind(&element, Options::default(), RecordingTransport::new());

        assert_eq!(form.invoke(Command::IsEmpty), CommandOutput::Bool(false));
        match form.invoke(Command::Values) {
            CommandOutput::Values(values) => assert_eq!(values["q"], json!("rust")),
            other => panic!("expected values, got {other:?}"),
        }
        assert_eq!(form.invoke(Command::Clear), CommandOutput::Done);
        assert_eq!(form.invoke(Command::IsEmpty), CommandOutput::Bool(true));
    }
}
