//! End-to-end submission lifecycle through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use formbits::domain::{Field, FormElement, FormHandle, SelectOption, SubmitControl};
use formbits::notify::RecordingNotifier;
use formbits::transport::{
    Method, RecordingTransport, Response, Status, TransportError, Values,
};
use formbits::{Bindings, CommandOutput, FormController, FormHooks, Options};
use rstest::{fixture, rstest};
use serde_json::{json, Value};

struct Harness {
    element: FormHandle,
    form: FormController,
    transport: RecordingTransport,
    notifier: RecordingNotifier,
}

impl Harness {
    fn new(element: FormHandle) -> Self {
        Self::with_options(element, Options::default())
    }

    fn with_options(element: FormHandle, options: Options) -> Self {
        let transport = RecordingTransport::new();
        let notifier = RecordingNotifier::new();
        let form = FormController::builder(&element, transport.clone())
            .options(options)
            .notifier(notifier.clone())
            .bind();
        Self {
            element,
            form,
            transport,
            notifier,
        }
    }

    fn set(&self, name: &str, value: &str) {
        self.element
            .borrow_mut()
            .field_named_mut(name)
            .unwrap()
            .set_value(value);
    }

    fn label(&self) -> String {
        self.element
            .borrow()
            .submit_control()
            .unwrap()
            .label()
            .to_string()
    }

    fn all_disabled(&self) -> bool {
        let element = self.element.borrow();
        element.fields().iter().all(|f| f.is_disabled())
            && element.submit_control().unwrap().is_disabled()
    }

    fn none_disabled(&self) -> bool {
        let element = self.element.borrow();
        element.fields().iter().all(|f| !f.is_disabled())
            && !element.submit_control().unwrap().is_disabled()
    }
}

#[fixture]
fn subscribe() -> FormHandle {
    FormElement::new("subscribe")
        .with_action("/subscribe")
        .with_method("post")
        .with_field(Field::input("email", "email").required())
        .with_field(Field::textarea("note"))
        .with_submit(SubmitControl::button("Subscribe"))
        .into_handle()
}

#[rstest]
fn blank_required_field_runs_empty_path(subscribe: FormHandle) {
    let mut h = Harness::new(subscribe);

    let event = h.form.trigger_submit();

    assert!(event.is_default_prevented());
    assert!(h.transport.is_empty());
    assert_eq!(
        h.notifier.alerts(),
        vec!["Please, fill in all required fields"]
    );
    assert!(h.none_disabled());
    assert_eq!(h.label(), "Subscribe");
}

#[rstest]
fn valid_submission_dispatches_and_goes_busy(subscribe: FormHandle) {
    let mut h = Harness::new(subscribe);
    h.set("email", "a@b.com");

    h.form.trigger_submit();

    let (_, request) = h.transport.last().unwrap();
    assert_eq!(request.url, "/subscribe");
    assert_eq!(request.method, Method::Post);
    assert_eq!(
        Value::Object(request.data.clone()),
        json!({ "email": "a@b.com", "note": "" })
    );
    assert_eq!(
        request.body().unwrap().as_deref(),
        Some("email=a%40b.com&note=")
    );
    assert!(h.form.phase().is_sending());
    assert!(h.all_disabled());
    assert_eq!(h.label(), "Sending...");
    assert!(h.notifier.alerts().is_empty());
}

#[rstest]
fn success_clears_and_restores(subscribe: FormHandle) {
    let mut h = Harness::new(subscribe);
    h.set("email", "a@b.com");
    h.set("note", "weekly please");
    h.form.trigger_submit();
    let (ticket, _) = h.transport.last().unwrap();

    h.form
        .settle(ticket, Ok(Response::new(200, r#"{"ok":true}"#)))
        .unwrap();

    let element = h.element.borrow();
    assert!(element.fields().iter().all(|f| f.value().is_empty()));
    drop(element);
    assert!(h.none_disabled());
    assert_eq!(h.label(), "Subscribe");
    assert!(!h.form.phase().is_sending());
    assert_eq!(
        h.notifier.last().as_deref(),
        Some("Your data has been successfully saved")
    );
}

#[rstest]
#[case::server_error(Ok(Response::new(500, "oops").with_reason("Internal Server Error")))]
#[case::network(Err(TransportError::Network("connection reset".to_string())))]
#[case::bad_json(Ok(Response::new(200, "<html>")))]
fn failure_restores_without_clearing(
    subscribe: FormHandle,
    #[case] outcome: Result<Response, TransportError>,
) {
    let mut h = Harness::new(subscribe);
    h.set("email", "a@b.com");
    h.form.trigger_submit();
    let (ticket, _) = h.transport.last().unwrap();

    h.form.settle(ticket, outcome).unwrap();

    assert_eq!(
        h.element.borrow().fields()[0].value(),
        "a@b.com",
        "fields are kept on failure"
    );
    assert!(h.none_disabled());
    assert_eq!(h.label(), "Subscribe");
    assert_eq!(
        h.notifier.last().as_deref(),
        Some("An error occurred. Please, try again")
    );
}

#[rstest]
fn second_submit_while_sending_is_ignored(subscribe: FormHandle) {
    let mut h = Harness::new(subscribe);
    h.set("email", "a@b.com");

    h.form.trigger_submit();
    let again = h.form.trigger_submit();

    assert!(again.is_default_prevented());
    assert_eq!(h.transport.len(), 1);

    let (ticket, _) = h.transport.last().unwrap();
    h.form.settle(ticket, Ok(Response::new(204, ""))).unwrap();
    h.set("email", "c@d.com");
    h.form.trigger_submit();
    assert_eq!(h.transport.len(), 2);
}

#[rstest]
fn get_forms_put_payload_in_query() {
    let element = FormElement::new("search")
        .with_action("/search?lang=en")
        .with_field(Field::text("q").with_value("rust forms"))
        .with_field(Field::multi_select(
            "tags",
            vec![
                SelectOption::new("a").selected(),
                SelectOption::new("b"),
                SelectOption::new("c").selected(),
            ],
        ))
        .with_submit(SubmitControl::input("Go"))
        .into_handle();
    let options = Options {
        include_selects: true,
        ..Options::default()
    };
    let mut h = Harness::with_options(element, options);

    h.form.trigger_submit();

    let (_, request) = h.transport.last().unwrap();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.body().unwrap(), None);
    assert_eq!(
        request.target().unwrap(),
        "/search?lang=en&q=rust+forms&tags%5B%5D=a&tags%5B%5D=c"
    );
}

#[rstest]
fn label_restores_to_text_from_before_first_swap(subscribe: FormHandle) {
    let mut h = Harness::new(subscribe);
    h.set("email", "a@b.com");

    for _ in 0..2 {
        h.form.trigger_submit();
        let (ticket, _) = h.transport.last().unwrap();
        h.form.settle(ticket, Err(TransportError::Timeout)).unwrap();
        assert_eq!(h.label(), "Subscribe");
    }
    assert_eq!(h.form.original_label(), Some("Subscribe"));
}

/// Records what reached the hooks and appends a marker to the payload.
#[derive(Default)]
struct Audit {
    seen: RefCell<Vec<String>>,
}

impl FormHooks for Audit {
    fn on_values(&self, form: &FormController) -> Values {
        let mut values = form.collect_values();
        values.insert("source".to_string(), json!("audit"));
        values
    }

    fn on_success(&self, form: &mut FormController, data: &Value, status: Status, _raw: &Response) {
        self.seen.borrow_mut().push(format!("{status}:{data}"));
        form.activate().change_button(false);
    }
}

#[rstest]
fn overrides_replace_individual_steps(subscribe: FormHandle) {
    let hooks = Rc::new(Audit::default());
    let transport = RecordingTransport::new();
    let notifier = RecordingNotifier::new();
    let mut form = FormController::builder(&subscribe, transport.clone())
        .shared_hooks(hooks.clone())
        .notifier(notifier.clone())
        .bind();
    subscribe
        .borrow_mut()
        .field_named_mut("email")
        .unwrap()
        .set_value("a@b.com");

    form.trigger_submit();
    let (ticket, request) = transport.last().unwrap();
    assert_eq!(request.data.get("source"), Some(&json!("audit")));

    form.settle(ticket, Ok(Response::new(200, r#"{"id":7}"#)))
        .unwrap();

    assert_eq!(*hooks.seen.borrow(), vec![r#"success:{"id":7}"#]);
    assert!(notifier.alerts().is_empty());
    assert_eq!(
        subscribe.borrow().fields()[0].value(),
        "a@b.com",
        "overridden success does not clear"
    );
}

#[rstest]
fn bindings_drive_forms_by_id(subscribe: FormHandle) {
    let mut bindings = Bindings::new();
    let transport = RecordingTransport::new();
    let log = transport.clone();
    bindings
        .attach(&subscribe, move |handle| {
            FormController::bind(handle, Options::default(), transport)
        })
        .unwrap();

    assert_eq!(
        bindings.invoke("subscribe", "isEmpty", &[]).unwrap(),
        CommandOutput::Bool(true)
    );

    subscribe
        .borrow_mut()
        .field_named_mut("email")
        .unwrap()
        .set_value("a@b.com");
    let event = bindings.submit(&subscribe);
    assert!(event.is_default_prevented());
    let (ticket, _) = log.last().unwrap();

    bindings
        .invoke("subscribe", "changeButton", &[json!(false)])
        .unwrap();
    bindings
        .settle("subscribe", ticket, Ok(Response::new(200, "{}")))
        .unwrap();
    assert!(!bindings.get("subscribe").unwrap().phase().is_sending());

    bindings.invoke("subscribe", "destroy", &[]).unwrap();
    assert!(bindings.is_empty());
    assert!(!bindings.submit(&subscribe).is_default_prevented());
}

#[test]
fn fixture_file_binds_and_submits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contact.toml");
    std::fs::write(
        &path,
        r#"
id = "contact"
action = "/contact"
method = "put"

[[fields]]
name = "email"
type = "email"
value = "a@b.com"
required = true

[[fields]]
name = "terms"
kind = "checkbox"
value = "yes"
checked = true

[submit]
kind = "button"
label = "Send"
"#,
    )
    .unwrap();

    let element = FormElement::from_file(&path).unwrap().into_handle();
    let mut h = Harness::new(element);
    h.form.trigger_submit();

    let (_, request) = h.transport.last().unwrap();
    assert_eq!(request.method, Method::Put);
    assert_eq!(
        Value::Object(request.data),
        json!({ "email": "a@b.com", "terms": "yes" })
    );
}
