//! Tests for the validation summary and click-to-focus navigation.

use serde_json::json;
use vform::focus::{ScrollBehavior, ScrollBlock};
use vform::prelude::*;

struct Fixture {
    form: ValidatedForm,
    username: InputHandle,
    email: InputHandle,
}

fn fixture(options: FormOptions) -> Fixture {
    let scope = FocusScope::new();
    let username = InputHandle::new("username", &scope);
    let email = InputHandle::new("email", &scope);

    let mut form = ValidatedForm::new(options);
    form.attach(
        FieldBinding::new("username", FieldKind::Textbox)
            .label("Username")
            .validate(Rule::schema(string().required("Username is required")))
            .controls(Controls::single(username.shared())),
    );
    form.attach(
        FieldBinding::new("email", FieldKind::Textbox)
            .label("Email")
            .validate(Rule::schema(string().required("Email is required")))
            .controls(Controls::single(email.shared())),
    );
    Fixture {
        form,
        username,
        email,
    }
}

fn submit_only(with_summary: bool) -> FormOptions {
    FormOptions::new(json!({ "username": "", "email": "" }), |_| {})
        .timing(TimingConfig::default().validate_on_submit(true))
        .with_summary(with_summary)
}

#[test]
fn test_summary_hidden_before_submit() {
    let mut fixture = fixture(submit_only(true));
    fixture.form.blur("username", FieldEvent::text(""));
    assert!(!fixture.form.can_show_summary());
    assert!(fixture.form.summary().is_none());
}

#[test]
fn test_summary_requires_opt_in() {
    let mut fixture = fixture(submit_only(false));
    fixture.form.submit();
    assert!(!fixture.form.can_show_summary());
    assert!(fixture.form.summary().is_none());
}

#[test]
fn test_summary_lists_touched_errors() {
    let mut fixture = fixture(submit_only(true));
    fixture.form.submit();

    let summary = fixture.form.summary().unwrap();
    assert_eq!(summary.title(), "There are 2 errors");
    assert_eq!(summary.error_count(), 2);
    let entries: Vec<_> = summary
        .entries()
        .iter()
        .map(|entry| (entry.path.as_str(), entry.label.as_deref(), entry.message.as_str()))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("username", Some("Username"), "Username is required"),
            ("email", Some("Email"), "Email is required"),
        ]
    );
}

#[test]
fn test_summary_updates_live_after_correction() {
    let mut fixture = fixture(submit_only(true));
    fixture.form.submit();
    fixture.form.change("username", FieldEvent::text("Jonathan"));

    let summary = fixture.form.summary().unwrap();
    assert_eq!(summary.title(), "There is 1 error");
    assert!(summary.entry("username").is_none());

    fixture
        .form
        .change("email", FieldEvent::text("jonathan@example.com"));
    assert!(fixture.form.summary().is_none());
}

#[test]
fn test_summary_title_override() {
    let mut fixture = fixture(submit_only(true).summary_title("Please fix the form"));
    fixture.form.submit();
    assert_eq!(fixture.form.summary().unwrap().title(), "Please fix the form");
}

#[test]
fn test_activate_focuses_and_scrolls() {
    let mut fixture = fixture(submit_only(true));
    fixture.form.submit();

    assert!(fixture.form.focus_error("email"));
    assert!(fixture.email.is_focused());
    assert!(!fixture.username.is_focused());
    assert!(fixture.email.take_focus_request());
    assert_eq!(fixture.email.scroll_count(), 1);
    assert_eq!(
        fixture.email.last_scroll(),
        Some(ScrollOptions {
            behavior: ScrollBehavior::Auto,
            block: ScrollBlock::Center,
        })
    );
}

#[test]
fn test_activate_unlisted_path_is_noop() {
    let mut fixture = fixture(submit_only(true));
    fixture.form.change("username", FieldEvent::text("Jonathan"));
    fixture.form.submit();

    assert!(!fixture.form.focus_error("username"));
    assert_eq!(fixture.username.scroll_count(), 0);
}

#[test]
fn test_activate_without_handle_is_noop() {
    let mut form = ValidatedForm::new(submit_only(true));
    form.attach(
        FieldBinding::new("username", FieldKind::Textbox)
            .validate(Rule::schema(string().required("Username is required"))),
    );
    form.submit();

    let summary = form.summary().unwrap();
    assert!(summary.entry("username").is_some());
    assert!(!summary.activate("username", form.context()));
}

#[test]
fn test_radio_group_focuses_first_option() {
    let scope = FocusScope::new();
    let options: Vec<InputHandle> = ["red", "green", "blue"]
        .into_iter()
        .map(|id| InputHandle::new(id, &scope))
        .collect();

    let mut form = ValidatedForm::new(
        FormOptions::new(json!({}), |_| {})
            .timing(TimingConfig::default().validate_on_submit(true))
            .with_summary(true),
    );
    form.attach(
        FieldBinding::new("colour", FieldKind::RadioGroup)
            .validate(Rule::schema(string().required("Pick a colour")))
            .controls(Controls::group(
                options.iter().map(InputHandle::shared).collect(),
            )),
    );
    form.submit();

    assert!(form.focus_error("colour"));
    assert_eq!(scope.current(), Some(FocusId::new("red")));
}

#[test]
fn test_date_entry_focuses_first_empty_part() {
    let scope = FocusScope::new();
    let parts: Vec<InputHandle> = ["dd", "mm", "yyyy"]
        .into_iter()
        .map(|id| InputHandle::new(id, &scope))
        .collect();

    let mut form = ValidatedForm::new(
        FormOptions::new(json!({}), |_| {})
            .timing(TimingConfig::default().validate_on_submit(true))
            .with_summary(true),
    );
    form.attach(
        FieldBinding::new("dob", FieldKind::NumeralDate)
            .label("Date of birth")
            .validate(Rule::schema(
                object()
                    .all_errors()
                    .field("dd", string().required("Day is required"))
                    .field("mm", string().required("Month is required"))
                    .field("yyyy", string().required("Year is required")),
            ))
            .controls(Controls::group(parts.iter().map(InputHandle::shared).collect())),
    );
    form.submit();

    let summary = form.summary().unwrap();
    assert_eq!(summary.entry("dob.mm").and_then(|e| e.label.as_deref()), Some("Date of birth"));
    assert!(form.focus_error("dob.dd"));
    assert_eq!(scope.current(), Some(FocusId::new("dd")));

    form.change("dob", FieldEvent::date(DateValue::new("01", "", "")));
    assert!(form.focus_error("dob.mm"));
    assert_eq!(scope.current(), Some(FocusId::new("mm")));

    form.change("dob", FieldEvent::date(DateValue::new("01", "02", "")));
    assert!(form.focus_error("dob.yyyy"));
    assert_eq!(scope.current(), Some(FocusId::new("yyyy")));
}
