//! # Generic Form
//!
//! Shared behaviour of the checkout forms, owned by [`OrderForm`] and
//! [`ContactsForm`].
//!
//! ```text
//! <form name="order">
//!   <input name="address">  ── Input ──► order.address:change  Field{..}
//!   <button type="submit">  ── Click ──► order:submit
//!   <span class="form__errors">
//! </form>                   ── Submit ─► order:submit (when enabled)
//! ```
//!
//! [`OrderForm`]: super::OrderForm
//! [`ContactsForm`]: super::ContactsForm

use larek_core::events::names;
use larek_core::{EventBus, OrderField, Payload};
use tracing::warn;

use crate::components::Component;
use crate::dom::{DomEvent, Element, EventKind};
use crate::error::{DomError, DomResult};

/// Validity and error line of a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub valid: bool,
    pub errors: String,
}

#[derive(Debug)]
pub struct Form {
    name: String,
    container: Element,
    submit: Element,
    errors: Element,
}

impl Form {
    /// Binds to a `<form>` carrying a `name` attribute.
    pub fn new(container: Element, events: &EventBus) -> DomResult<Self> {
        let name = container
            .attr("name")
            .ok_or_else(|| DomError::MissingAttribute {
                tag: container.tag(),
                attr: "name".to_string(),
            })?;
        let submit = container.ensure(r#"button[type="submit"]"#)?;
        let errors = container.ensure(".form__errors")?;

        for input in container.query_all("input")? {
            let Some(field) = input.attr("name").and_then(|n| n.parse::<OrderField>().ok()) else {
                warn!(form = %name, "Skipping input without a known field name");
                continue;
            };
            let changed = events.trigger(names::field_change(&name, field.as_str()));
            input.on(EventKind::Input, move |event| {
                if let DomEvent::Input { value } = event {
                    changed(Payload::Field {
                        field,
                        value: value.clone(),
                    });
                }
            });
        }

        let submitted = events.trigger(names::form_submit(&name));
        submit.on(EventKind::Click, move |_| submitted(Payload::None));

        let submitted = events.trigger(names::form_submit(&name));
        let button = submit.clone();
        container.on(EventKind::Submit, move |_| {
            if !button.is_disabled() {
                submitted(Payload::None);
            }
        });

        Ok(Form {
            name,
            container,
            submit,
            errors,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The input bound to `field`.
    pub fn input(&self, field: OrderField) -> DomResult<Element> {
        self.container
            .ensure(&format!(r#"input[name="{}"]"#, field.as_str()))
    }

    pub fn set_input_value(&self, field: OrderField, value: &str) {
        if let Ok(input) = self.input(field) {
            input.set_value(value);
        }
    }

    pub fn set_valid(&self, valid: bool) {
        self.submit.set_disabled(!valid);
    }

    pub fn is_valid(&self) -> bool {
        !self.submit.is_disabled()
    }

    pub fn set_errors(&self, errors: &str) {
        self.errors.set_text(errors);
    }

    pub fn errors(&self) -> String {
        self.errors.text()
    }
}

impl Component for Form {
    type Data = FormState;

    fn container(&self) -> &Element {
        &self.container
    }

    fn render(&self, data: FormState) -> Element {
        self.set_valid(data.valid);
        self.set_errors(&data.errors);
        self.container.clone()
    }
}
