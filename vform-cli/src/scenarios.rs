//! Scripted forms, one per [`Scenario`].

use std::collections::HashMap;

use serde_json::{Value, json};
use vform::prelude::*;

use crate::Scenario;

/// A form plus the focus handles of its rendered controls.
struct Script {
    form: ValidatedForm,
    scope: FocusScope,
    handles: HashMap<String, InputHandle>,
    step: usize,
}

impl Script {
    fn new(options: FormOptions) -> Self {
        Self {
            form: ValidatedForm::new(options),
            scope: FocusScope::new(),
            handles: HashMap::new(),
            step: 0,
        }
    }

    /// A handle for one control, remembered under `id`.
    fn handle(&mut self, id: &str) -> InputHandle {
        let handle = InputHandle::new(id, &self.scope);
        self.handles.insert(id.to_string(), handle.clone());
        handle
    }

    fn single(&mut self, id: &str) -> Controls {
        Controls::single(self.handle(id).shared())
    }

    fn group(&mut self, ids: &[&str]) -> Controls {
        let children = ids.iter().map(|id| self.handle(id).shared()).collect();
        Controls::group(children)
    }

    /// Mount a field with a single control named after it.
    fn text(&mut self, field: FieldBinding) {
        let controls = self.single(field.name());
        self.form.attach(field.controls(controls));
    }

    fn change(&mut self, name: &str, event: FieldEvent) {
        self.form.change(name, event);
        self.print(&format!("change {}", name));
    }

    fn blur(&mut self, name: &str, event: FieldEvent) {
        self.form.blur(name, event);
        self.print(&format!("blur {}", name));
    }

    /// Blur with whatever the field currently holds.
    fn leave(&mut self, name: &str) {
        let value = self.form.values().pointer(&pointer(name)).cloned();
        let event = match value {
            Some(Value::Bool(checked)) => FieldEvent::checked(checked),
            Some(value) => FieldEvent::value(value),
            None => FieldEvent::text(""),
        };
        self.blur(name, event);
    }

    fn submit(&mut self) {
        let outcome = self.form.submit();
        self.print(&format!("submit -> {:?}", outcome));
    }

    fn focus_first_error(&mut self) {
        let Some(path) = self
            .form
            .summary()
            .and_then(|summary| summary.entries().first().map(|entry| entry.path.clone()))
        else {
            println!("  (no summary entry to focus)");
            return;
        };
        let focused = self.form.focus_error(&path);
        let current = self.scope.current();
        println!(
            "  focus {} -> {} (focused control: {})",
            path,
            focused,
            current.as_ref().map(FocusId::as_str).unwrap_or("none")
        );
        if let Some(handle) = current.and_then(|id| self.handles.get(id.as_str())) {
            println!(
                "  scrolled {} time(s), last {:?}",
                handle.scroll_count(),
                handle.last_scroll()
            );
        }
    }

    fn print(&mut self, label: &str) {
        self.step += 1;
        println!("[{}] {}", self.step, label);
        for props in self.form.changed_fields() {
            let value = match props.checked {
                Some(checked) => format!("checked={}", checked),
                None => props.value.to_string(),
            };
            let name = props.label.as_deref().unwrap_or(&props.name);
            match &props.message {
                Some(message) => {
                    println!("  {} = {}  [{}: {}]", name, value, message.severity, message.text)
                }
                None => println!("  {} = {}", name, value),
            }
        }
        println!("  errors shown: {}", self.form.error_count());
        if let Some(summary) = self.form.summary() {
            for line in summary.to_string().lines() {
                println!("  | {}", line);
            }
        }
    }
}

/// Dot path to JSON pointer.
fn pointer(path: &str) -> String {
    format!("/{}", path.replace('.', "/"))
}

fn options(initial: Value, timing: Option<TimingConfig>, default: TimingConfig) -> FormOptions {
    FormOptions::new(initial, |values| println!("  onSubmit({})", values))
        .timing(timing.unwrap_or(default))
}

pub fn run(scenario: Scenario, timing: Option<TimingConfig>) {
    match scenario {
        Scenario::PerInput => per_input(timing),
        Scenario::FormSchema => form_schema(timing),
        Scenario::FormValidate => form_validate(timing),
        Scenario::Nested => nested(timing),
        Scenario::Dynamic => dynamic(timing),
        Scenario::SubmitOnly => submit_only(timing),
        Scenario::Summary => summary(timing),
        Scenario::Severities => severities(timing),
        Scenario::AllInputs => all_inputs(timing),
    }
}

fn username_and_email(script: &mut Script, with_rules: bool) {
    let mut username = FieldBinding::new("username", FieldKind::Textbox)
        .label("Username")
        .required(true);
    let mut email = FieldBinding::new("email", FieldKind::Textbox)
        .label("Email")
        .required(true)
        // Revalidate the username whenever the email is left
        .on_blur(|_, actions| {
            actions.validate_field("username");
        });
    if with_rules {
        username = username.validate(Rule::schema(string().required("Username is required")));
        email = email.validate(Rule::schema(
            string()
                .required("Email is required")
                .email("Email must be a valid email"),
        ));
    }
    script.text(username);
    script.text(email);
}

fn per_input(timing: Option<TimingConfig>) {
    let mut script = Script::new(options(
        json!({ "username": "", "email": "" }),
        timing,
        TimingConfig::default(),
    ));
    username_and_email(&mut script, true);

    script.blur("username", FieldEvent::text(""));
    script.blur("email", FieldEvent::text("not-an-email"));
    script.change("username", FieldEvent::text("Jonathan"));
    script.change("email", FieldEvent::text("jonathan@example.com"));
    script.submit();
}

fn form_schema(timing: Option<TimingConfig>) {
    let schema = object()
        .field("username", string().required("Username is required"))
        .field(
            "email",
            string()
                .required("Email is required")
                .email("Email must be a valid email"),
        );
    let mut script = Script::new(
        options(json!({}), timing, TimingConfig::default()).validation_schema(schema),
    );
    username_and_email(&mut script, false);

    script.blur("username", FieldEvent::text(""));
    script.submit();
    script.change("username", FieldEvent::text("Jonathan"));
    script.change("email", FieldEvent::text("jonathan@example.com"));
    script.submit();
}

fn form_validate(timing: Option<TimingConfig>) {
    let mut script = Script::new(
        options(
            json!({ "password": "", "confirm": "" }),
            timing,
            TimingConfig::default(),
        )
        .validate(|values| {
            let password = values["password"].as_str().unwrap_or_default();
            let confirm = values["confirm"].as_str().unwrap_or_default();
            let mut errors = json!({});
            if password.is_empty() {
                errors["password"] = json!("Password is required");
            }
            if confirm != password {
                errors["confirm"] = json!("Passwords must match");
            }
            errors
        }),
    );
    script.text(FieldBinding::new("password", FieldKind::Password).label("Password"));
    script.text(FieldBinding::new("confirm", FieldKind::Password).label("Confirm password"));

    script.blur("password", FieldEvent::text("hunter22"));
    script.blur("confirm", FieldEvent::text("hunter2"));
    script.change("confirm", FieldEvent::text("hunter22"));
    script.submit();
}

fn nested(timing: Option<TimingConfig>) {
    let mut script = Script::new(
        options(json!({ "address": {} }), timing, TimingConfig::default()).with_summary(true),
    );
    for (path, label) in [
        ("address.street", "Street"),
        ("address.city", "City"),
        ("address.postcode", "Postcode"),
    ] {
        script.text(
            FieldBinding::new(path, FieldKind::Textbox)
                .label(label)
                .validate(Rule::schema(string().required(format!("{} is required", label)))),
        );
    }

    script.submit();
    script.change("address.street", FieldEvent::text("1 Main Street"));
    script.change("address.city", FieldEvent::text("Newcastle"));
    script.change("address.postcode", FieldEvent::text("NE1 1AA"));
    script.submit();
}

fn phone_field() -> FieldBinding {
    FieldBinding::new("phone", FieldKind::Textbox)
        .label("Phone")
        .validate(Rule::schema(string().required("Phone is required")))
}

fn dynamic(timing: Option<TimingConfig>) {
    let mut script = Script::new(
        options(json!({}), timing, TimingConfig::default().validate_on_submit(true))
            .with_summary(true),
    );
    username_and_email(&mut script, true);
    script.text(FieldBinding::new("contactByPhone", FieldKind::Switch).label("Contact by phone"));

    script.change("contactByPhone", FieldEvent::checked(true));
    script.text(phone_field());
    script.submit();

    script.change("contactByPhone", FieldEvent::checked(false));
    script.form.detach("phone");
    script.print("phone unmounted");

    script.change("username", FieldEvent::text("Jonathan"));
    script.change("email", FieldEvent::text("jonathan@example.com"));
    script.submit();
}

fn submit_only(timing: Option<TimingConfig>) {
    let mut script = Script::new(options(
        json!({ "username": "", "email": "" }),
        timing,
        TimingConfig::default().validate_on_submit(true),
    ));
    username_and_email(&mut script, true);

    script.leave("username");
    script.leave("email");
    script.submit();
    script.change("username", FieldEvent::text("Jonathan"));
    script.change("email", FieldEvent::text("jonathan@example.com"));
    script.submit();
}

fn summary(timing: Option<TimingConfig>) {
    let mut script = Script::new(
        options(
            json!({ "username": "", "email": "" }),
            timing,
            TimingConfig::default().validate_on_submit(true),
        )
        .with_summary(true),
    );
    username_and_email(&mut script, true);

    script.submit();
    script.focus_first_error();
    script.change("username", FieldEvent::text("Jonathan"));
    script.focus_first_error();
}

fn severities(timing: Option<TimingConfig>) {
    let mut script = Script::new(options(
        json!({ "password": "" }),
        timing,
        TimingConfig::default(),
    ));
    script.text(
        FieldBinding::new("password", FieldKind::Password)
            .label("Password")
            .validate(Rule::schema(
                string()
                    .required("Password is required")
                    .min_length(8, "Password must be at least 8 characters"),
            ))
            .warn(Rule::function(|value| {
                let text = value.as_str().unwrap_or_default();
                (!text.chars().any(|c| c.is_ascii_digit()))
                    .then(|| "Adding a number makes the password stronger".to_string())
            }))
            .info(Rule::function(|value| {
                let text = value.as_str().unwrap_or_default();
                (text.chars().count() < 16).then(|| "Consider a passphrase".to_string())
            })),
    );

    script.blur("password", FieldEvent::text("short"));
    script.change("password", FieldEvent::text("longenough"));
    script.change("password", FieldEvent::text("longenough1"));
    script.change("password", FieldEvent::text("correct horse battery 1"));
}

fn all_inputs(timing: Option<TimingConfig>) {
    let mut script = Script::new(
        options(json!({}), timing, TimingConfig::default().validate_on_submit(true))
            .with_summary(true),
    );
    let required = |message: &str| Rule::schema(string().required(message));

    for (name, kind, label) in [
        ("textbox", FieldKind::Textbox, "Textbox"),
        ("textarea", FieldKind::Textarea, "Textarea"),
        ("password", FieldKind::Password, "Password"),
        ("select", FieldKind::Select, "Select"),
        ("date", FieldKind::DateInput, "Date"),
    ] {
        script.text(
            FieldBinding::new(name, kind)
                .label(label)
                .validate(required(&format!("{} is required", label))),
        );
    }
    script.text(
        FieldBinding::new("number", FieldKind::Number)
            .label("Number")
            .validate(Rule::schema(
                number()
                    .required("Number is required")
                    .min(1.0, "Number must be at least 1"),
            )),
    );
    script.text(
        FieldBinding::new("decimal", FieldKind::Decimal)
            .label("Decimal")
            .validate(Rule::schema(number().max(100.0, "Decimal must be at most 100"))),
    );
    script.text(
        FieldBinding::new("terms", FieldKind::Checkbox)
            .label("Terms")
            .validate(Rule::schema(boolean().is_true("You must accept the terms"))),
    );
    script.text(
        FieldBinding::new("newsletter", FieldKind::Switch)
            .label("Newsletter")
            .unvalidated(),
    );

    let radios = script.group(&["colour.red", "colour.green", "colour.blue"]);
    script.form.attach(
        FieldBinding::new("colour", FieldKind::RadioGroup)
            .label("Colour")
            .validate(required("Pick a colour"))
            .controls(radios),
    );

    let parts = script.group(&["dob.dd", "dob.mm", "dob.yyyy"]);
    script.form.attach(
        FieldBinding::new("dob", FieldKind::NumeralDate)
            .label("Date of birth")
            .validate(Rule::schema(
                object()
                    .all_errors()
                    .field("dd", string().required("Day is required"))
                    .field("mm", string().required("Month is required"))
                    .field("yyyy", string().required("Year is required")),
            ))
            .controls(parts),
    );

    script.submit();
    script.change("dob", FieldEvent::date(DateValue::new("01", "", "")));
    script.focus_first_error();
    script.change("colour", FieldEvent::text("green"));
    script.change("decimal", FieldEvent::value(250.5));
    script.change("terms", FieldEvent::checked(true));
    script.print("filled some");
}
