//! End-to-end tests driving a validated form through field events.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Value, json};
use vform::prelude::*;

type Submitted = Rc<RefCell<Vec<Value>>>;

fn options(initial: Value) -> (FormOptions, Submitted) {
    let submitted: Submitted = Rc::default();
    let sink = submitted.clone();
    let options = FormOptions::new(initial, move |values| sink.borrow_mut().push(values.clone()));
    (options, submitted)
}

fn username() -> FieldBinding {
    FieldBinding::new("username", FieldKind::Textbox)
        .label("Username")
        .validate(Rule::schema(string().required("Username is required")))
}

fn email() -> FieldBinding {
    FieldBinding::new("email", FieldKind::Textbox)
        .label("Email")
        .validate(Rule::schema(
            string()
                .required("Email is required")
                .email("Email must be a valid email"),
        ))
}

fn phone() -> FieldBinding {
    FieldBinding::new("phone", FieldKind::Textbox)
        .label("Phone")
        .validate(Rule::schema(string().required("Phone is required")))
}

fn form_with(timing: TimingConfig) -> (ValidatedForm, Submitted) {
    let (options, submitted) = options(json!({ "username": "", "email": "" }));
    let mut form = ValidatedForm::new(options.timing(timing));
    form.attach(username());
    form.attach(email());
    (form, submitted)
}

fn shown_error(form: &ValidatedForm, name: &str) -> Option<String> {
    form.field_props(name)
        .and_then(|props| props.error().map(str::to_string))
}

#[test]
fn test_blur_validation_shows_errors() {
    let (mut form, submitted) = form_with(TimingConfig::default());

    form.blur("username", FieldEvent::text(""));
    form.blur("email", FieldEvent::text(""));
    form.blur("username", FieldEvent::text(""));

    assert_eq!(shown_error(&form, "username").as_deref(), Some("Username is required"));
    assert_eq!(shown_error(&form, "email").as_deref(), Some("Email is required"));
    assert_eq!(form.error_count(), 2);
    assert!(submitted.borrow().is_empty());
}

#[test]
fn test_untouched_errors_are_hidden() {
    let (mut form, _) = form_with(TimingConfig::default());
    form.change("username", FieldEvent::text(""));

    assert!(form.controller().field_error("username").is_some());
    assert_eq!(shown_error(&form, "username"), None);
    assert_eq!(form.error_count(), 0);
}

#[test]
fn test_submit_only_defers_errors() {
    let (mut form, submitted) = form_with(TimingConfig::default().validate_on_submit(true));

    form.blur("username", FieldEvent::text(""));
    form.blur("email", FieldEvent::text(""));
    assert_eq!(shown_error(&form, "username"), None);
    assert_eq!(shown_error(&form, "email"), None);
    assert_eq!(form.error_count(), 0);

    let outcome = form.submit();
    assert_eq!(outcome, SubmitOutcome::Blocked { error_count: 2 });
    assert_eq!(shown_error(&form, "username").as_deref(), Some("Username is required"));
    assert_eq!(shown_error(&form, "email").as_deref(), Some("Email is required"));
    assert_eq!(form.error_count(), 2);
    assert_eq!(form.phase(), FormPhase::SubmittedInvalid);
    assert!(submitted.borrow().is_empty());
}

#[test]
fn test_submit_shows_errors_on_null_values() {
    let (options, submitted) = options(json!({ "username": null }));
    let mut form = ValidatedForm::new(
        options
            .timing(TimingConfig::default().validate_on_submit(true))
            .with_summary(true),
    );
    form.attach(username());

    assert_eq!(form.submit(), SubmitOutcome::Blocked { error_count: 1 });
    assert_eq!(form.error_count(), 1);
    assert_eq!(shown_error(&form, "username").as_deref(), Some("Username is required"));
    let summary = form.summary().unwrap();
    assert_eq!(summary.error_count(), 1);
    assert!(submitted.borrow().is_empty());
}

#[test]
fn test_submit_shows_errors_after_null_change() {
    let (mut form, _) = form_with(TimingConfig::default().validate_on_submit(true));
    form.change("username", FieldEvent::value(Value::Null));

    assert_eq!(form.submit(), SubmitOutcome::Blocked { error_count: 2 });
    assert_eq!(form.error_count(), 2);
    assert_eq!(shown_error(&form, "username").as_deref(), Some("Username is required"));
}

#[test]
fn test_submit_only_recovers_after_correction() {
    let (mut form, submitted) = form_with(TimingConfig::default().validate_on_submit(true));
    form.submit();

    assert!(form.change("username", FieldEvent::text("Jonathan")));
    assert!(form.change("email", FieldEvent::text("jonathan@example.com")));
    assert_eq!(shown_error(&form, "username"), None);
    assert_eq!(shown_error(&form, "email"), None);

    assert!(form.submit().is_submitted());
    assert_eq!(form.phase(), FormPhase::SubmittedValid);
    assert_eq!(
        *submitted.borrow(),
        vec![json!({ "username": "Jonathan", "email": "jonathan@example.com" })]
    );
    assert_eq!(form.error_count(), 0);
}

#[test]
fn test_submit_only_field_without_error_stays_quiet() {
    let (mut form, _) = form_with(TimingConfig::default().validate_on_submit(true));
    form.change("username", FieldEvent::text("Jonathan"));
    form.submit();

    // Only the email failed the submit, so only it revalidates live
    assert!(!form.change("username", FieldEvent::text("")));
    assert!(form.change("email", FieldEvent::text("bad")));
    assert_eq!(shown_error(&form, "username"), None);
    assert_eq!(
        shown_error(&form, "email").as_deref(),
        Some("Email must be a valid email")
    );
}

#[test]
fn test_dynamic_field_is_removed_on_detach() {
    let (options, submitted) = options(json!({ "username": "", "email": "" }));
    let mut form = ValidatedForm::new(
        options.timing(TimingConfig::default().validate_on_submit(true)),
    );
    form.attach(username());
    form.attach(email());
    form.attach(FieldBinding::new("contactByPhone", FieldKind::Switch).unvalidated());

    form.change("contactByPhone", FieldEvent::checked(true));
    form.attach(phone());
    assert_eq!(form.values()["phone"], json!(""));

    assert_eq!(form.submit(), SubmitOutcome::Blocked { error_count: 3 });
    assert_eq!(form.error_count(), 3);
    assert_eq!(shown_error(&form, "phone").as_deref(), Some("Phone is required"));

    form.change("contactByPhone", FieldEvent::checked(false));
    assert!(form.detach("phone"));
    assert_eq!(form.error_count(), 2);
    assert!(!form.context().is_registered("phone"));

    form.change("username", FieldEvent::text("Jonathan"));
    form.change("email", FieldEvent::text("jonathan@example.com"));
    assert_eq!(form.submit(), SubmitOutcome::Submitted);

    let submitted = submitted.borrow();
    assert_eq!(submitted.len(), 1);
    assert_eq!(
        submitted[0],
        json!({ "username": "Jonathan", "email": "jonathan@example.com", "contactByPhone": false })
    );
    assert!(submitted[0].get("phone").is_none());
}

#[test]
fn test_mount_seeds_missing_values() {
    let (options, _) = options(json!({ "username": "Ada" }));
    let mut form = ValidatedForm::new(options);
    form.attach(username());
    form.attach(FieldBinding::new("terms", FieldKind::Checkbox));
    form.attach(FieldBinding::new("dob", FieldKind::NumeralDate));

    assert_eq!(
        *form.values(),
        json!({
            "username": "Ada",
            "terms": false,
            "dob": { "dd": "", "mm": "", "yyyy": "" },
        })
    );
}

#[test]
fn test_unvalidated_field_is_not_registered_or_seeded() {
    let (options, _) = options(json!({}));
    let mut form = ValidatedForm::new(options);
    form.attach(FieldBinding::new("notes", FieldKind::Textarea).unvalidated());

    assert!(form.values().get("notes").is_none());
    assert!(!form.change("notes", FieldEvent::text("hello")));
    assert_eq!(form.values()["notes"], json!("hello"));

    form.detach("notes");
    assert_eq!(form.values()["notes"], json!("hello"));
}

#[test]
fn test_nested_paths() {
    let (options, submitted) = options(json!({ "address": {} }));
    let mut form = ValidatedForm::new(options);
    form.attach(
        FieldBinding::new("address.city", FieldKind::Textbox)
            .validate(Rule::schema(string().required("City is required"))),
    );

    form.blur("address.city", FieldEvent::text(""));
    assert_eq!(
        shown_error(&form, "address.city").as_deref(),
        Some("City is required")
    );

    form.change("address.city", FieldEvent::text("Leeds"));
    assert_eq!(form.submit(), SubmitOutcome::Submitted);
    assert_eq!(submitted.borrow()[0], json!({ "address": { "city": "Leeds" } }));
}

#[test]
fn test_form_schema_revalidates_whole_form() {
    let (options, _) = options(json!({}));
    let schema = object()
        .field("username", string().required("Username is required"))
        .field("email", string().required("Email is required"));
    let mut form = ValidatedForm::new(options.validation_schema(schema));
    form.attach(FieldBinding::new("username", FieldKind::Textbox));
    form.attach(FieldBinding::new("email", FieldKind::Textbox));

    form.blur("username", FieldEvent::text(""));
    assert_eq!(shown_error(&form, "username").as_deref(), Some("Username is required"));
    assert!(form.controller().field_error("email").is_some());

    form.blur("email", FieldEvent::text("jonathan@example.com"));
    assert_eq!(form.error_count(), 1);
}

#[test]
fn test_form_validate_function() {
    let (options, submitted) = options(json!({ "password": "", "confirm": "" }));
    let mut form = ValidatedForm::new(options.validate(|values| {
        if values["password"] == values["confirm"] {
            json!({})
        } else {
            json!({ "confirm": "Passwords must match" })
        }
    }));
    form.attach(FieldBinding::new("password", FieldKind::Password));
    form.attach(FieldBinding::new("confirm", FieldKind::Password));

    form.blur("password", FieldEvent::text("hunter22"));
    form.blur("confirm", FieldEvent::text("hunter2"));
    assert_eq!(shown_error(&form, "confirm").as_deref(), Some("Passwords must match"));
    assert_eq!(form.submit(), SubmitOutcome::Blocked { error_count: 1 });

    form.change("confirm", FieldEvent::text("hunter22"));
    assert_eq!(form.submit(), SubmitOutcome::Submitted);
    assert_eq!(submitted.borrow().len(), 1);
}

#[test]
fn test_form_validate_function_panic_is_contained() {
    let (options, submitted) = options(json!({ "name": "" }));
    let mut form = ValidatedForm::new(options.validate(|_| panic!("broken validate")));
    form.attach(FieldBinding::new("name", FieldKind::Textbox));

    assert_eq!(form.submit(), SubmitOutcome::Submitted);
    assert_eq!(submitted.borrow().len(), 1);
}

#[test]
fn test_custom_blur_handler_validates_sibling() {
    let (options, _) = options(json!({ "username": "", "email": "" }));
    let mut form = ValidatedForm::new(
        options.timing(TimingConfig::default().validate_on_change(false).validate_on_blur(false)),
    );
    form.attach(username());
    form.attach(email().on_blur(|_, actions| {
        actions.set_field_touched("username", true);
        actions.validate_field("username");
    }));

    form.blur("email", FieldEvent::text("jonathan@example.com"));
    assert_eq!(shown_error(&form, "username").as_deref(), Some("Username is required"));
}

#[test]
fn test_custom_change_handler_receives_event() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let (options, _) = options(json!({}));
    let mut form = ValidatedForm::new(options);
    form.attach(
        FieldBinding::new("username", FieldKind::Textbox).on_change(move |event, actions| {
            sink.borrow_mut()
                .push((event.target_value(), actions.values()["username"].clone()));
        }),
    );

    form.change("username", FieldEvent::text("Ada"));
    assert_eq!(*seen.borrow(), vec![(json!("Ada"), json!("Ada"))]);
}

#[test]
fn test_unknown_field_event_is_ignored() {
    let (mut form, _) = form_with(TimingConfig::default());
    let before = form.values().clone();
    assert!(!form.blur("missing", FieldEvent::text("x")));
    assert_eq!(*form.values(), before);
}

#[test]
fn test_validate_on_mount() {
    let (options, _) = options(json!({ "username": "" }));
    let mut form = ValidatedForm::new(
        options.timing(
            TimingConfig::default()
                .validate_on_change(false)
                .validate_on_mount(true),
        ),
    );
    form.attach(username());
    assert!(form.controller().field_error("username").is_none());

    form.mounted();
    assert_eq!(
        form.controller().field_error("username"),
        Some("Username is required")
    );
}

#[test]
fn test_validate_on_mount_is_off_in_submit_only_mode() {
    let (options, _) = options(json!({ "username": "" }));
    let mut form = ValidatedForm::new(
        options.timing(
            TimingConfig::default()
                .validate_on_mount(true)
                .validate_on_submit(true),
        ),
    );
    form.attach(username());
    form.mounted();
    assert!(form.controller().field_error("username").is_none());
}

#[test]
fn test_date_field_errors_per_part() {
    let (options, _) = options(json!({}));
    let mut form =
        ValidatedForm::new(options.timing(TimingConfig::default().validate_on_submit(true)));
    form.attach(
        FieldBinding::new("dob", FieldKind::NumeralDate).validate(Rule::schema(
            object()
                .all_errors()
                .field("dd", string().required("Day is required"))
                .field("mm", string().required("Month is required"))
                .field("yyyy", string().required("Year is required")),
        )),
    );

    assert_eq!(form.submit(), SubmitOutcome::Blocked { error_count: 3 });
    form.change("dob", FieldEvent::date(DateValue::new("01", "02", "")));

    let touched = form.touched_errors();
    assert_eq!(touched.count, 1);
    assert_eq!(touched.get("dob.yyyy"), Some("Year is required"));
}

#[test]
fn test_warning_and_info_messages() {
    let (options, _) = options(json!({}));
    let mut form = ValidatedForm::new(options);
    form.attach(
        FieldBinding::new("password", FieldKind::Password)
            .validate(Rule::schema(string().required("Password is required")))
            .warn(Rule::function(|value| {
                (value.as_str().is_some_and(|text| text.len() < 8))
                    .then(|| "Password is short".to_string())
            }))
            .info(Rule::function(|_| Some("Consider a passphrase".to_string()))),
    );

    form.blur("password", FieldEvent::text("abc"));
    let message = form.field_props("password").and_then(|props| props.message);
    assert_eq!(
        message.map(|message| (message.severity, message.text)),
        Some((Severity::Warning, "Password is short".to_string()))
    );
    assert_eq!(form.error_count(), 0);
    assert_eq!(form.submit(), SubmitOutcome::Submitted);

    form.change("password", FieldEvent::text("correct horse"));
    let messages = form.controller().field_messages("password");
    assert_eq!(messages.active(), Some((Severity::Info, "Consider a passphrase")));
}

#[test]
fn test_attach_replaces_field_with_same_name() {
    let (mut form, _) = form_with(TimingConfig::default());
    form.attach(
        FieldBinding::new("username", FieldKind::Textbox)
            .validate(Rule::schema(string().min_length(3, "Too short"))),
    );

    form.blur("username", FieldEvent::text("ab"));
    assert_eq!(shown_error(&form, "username").as_deref(), Some("Too short"));
}

#[test]
fn test_reinitialize() {
    let (options, _) = options(json!({ "username": "Ada" }));
    let mut form = ValidatedForm::new(options.enable_reinitialize(true));
    form.attach(username());
    form.attach(email());
    form.submit();

    assert!(form.reinitialize(json!({ "username": "Grace" })));
    assert_eq!(form.phase(), FormPhase::Pristine);
    assert_eq!(form.submit_count(), 0);
    assert_eq!(*form.values(), json!({ "username": "Grace", "email": "" }));
    assert_eq!(form.error_count(), 0);
    assert!(!form.reinitialize(json!({ "username": "Grace" })));
}

#[test]
fn test_reinitialize_requires_opt_in() {
    let (options, _) = options(json!({ "username": "Ada" }));
    let mut form = ValidatedForm::new(options);
    form.attach(username());
    assert!(!form.reinitialize(json!({ "username": "Grace" })));
    assert_eq!(form.values()["username"], json!("Ada"));
}

#[test]
fn test_changed_fields_only_reports_updates() {
    let (mut form, _) = form_with(TimingConfig::default());
    assert_eq!(form.changed_fields().len(), 2);
    assert!(form.changed_fields().is_empty());

    form.change("username", FieldEvent::text("Ada"));
    let changed = form.changed_fields();
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].name, "username");
}
