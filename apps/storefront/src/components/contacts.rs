//! Contacts step form: email and phone.

use larek_core::{EventBus, OrderField};

use crate::components::{Component, Form, FormState};
use crate::dom::Element;
use crate::error::DomResult;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactsFormData {
    pub email: String,
    pub phone: String,
    pub valid: bool,
    pub errors: String,
}

#[derive(Debug)]
pub struct ContactsForm {
    form: Form,
    email: Element,
    phone: Element,
}

impl ContactsForm {
    pub fn new(container: Element, events: &EventBus) -> DomResult<Self> {
        let form = Form::new(container, events)?;
        let email = form.input(OrderField::Email)?;
        let phone = form.input(OrderField::Phone)?;
        Ok(ContactsForm { form, email, phone })
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn set_email(&self, email: &str) {
        self.email.set_value(email);
    }

    pub fn set_phone(&self, phone: &str) {
        self.phone.set_value(phone);
    }
}

impl Component for ContactsForm {
    type Data = ContactsFormData;

    fn container(&self) -> &Element {
        self.form.container()
    }

    fn render(&self, data: ContactsFormData) -> Element {
        self.set_email(&data.email);
        self.set_phone(&data.phone);
        self.form.render(FormState {
            valid: data.valid,
            errors: data.errors,
        })
    }
}
