//! Delivery step form: payment buttons and address.

use larek_core::events::names;
use larek_core::{EventBus, OrderField, Payload, PaymentMethod};

use crate::components::{Component, Form, FormState};
use crate::dom::{Element, EventKind, WeakElement};
use crate::error::DomResult;

const ACTIVE_CLASS: &str = "button_alt-active";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderFormData {
    pub address: String,
    pub payment: Option<PaymentMethod>,
    pub valid: bool,
    pub errors: String,
}

#[derive(Debug)]
pub struct OrderForm {
    form: Form,
    card: Element,
    cash: Element,
    address: Element,
}

fn highlight(card: &Element, cash: &Element, payment: Option<PaymentMethod>) {
    card.toggle_class(ACTIVE_CLASS, payment == Some(PaymentMethod::Card));
    cash.toggle_class(ACTIVE_CLASS, payment == Some(PaymentMethod::Cash));
}

impl OrderForm {
    pub fn new(container: Element, events: &EventBus) -> DomResult<Self> {
        let form = Form::new(container.clone(), events)?;
        let card = container.ensure(r#"button[name="card"]"#)?;
        let cash = container.ensure(r#"button[name="cash"]"#)?;
        let address = form.input(OrderField::Address)?;

        let buttons = (card.downgrade(), cash.downgrade());
        for (button, method) in [(&card, PaymentMethod::Card), (&cash, PaymentMethod::Cash)] {
            let (card, cash): (WeakElement, WeakElement) = buttons.clone();
            let changed = events.trigger(names::field_change(
                form.name(),
                OrderField::Payment.as_str(),
            ));
            button.on(EventKind::Click, move |_| {
                if let (Some(card), Some(cash)) = (card.upgrade(), cash.upgrade()) {
                    highlight(&card, &cash, Some(method));
                }
                changed(Payload::Field {
                    field: OrderField::Payment,
                    value: method.as_str().to_string(),
                });
            });
        }

        Ok(OrderForm {
            form,
            card,
            cash,
            address,
        })
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn set_address(&self, address: &str) {
        self.address.set_value(address);
    }

    /// Highlights the chosen payment button.
    pub fn set_payment(&self, payment: Option<PaymentMethod>) {
        highlight(&self.card, &self.cash, payment);
    }

    /// Clears the payment highlight.
    pub fn reset_payment(&self) {
        self.set_payment(None);
    }

    pub fn selected_payment(&self) -> Option<PaymentMethod> {
        if self.card.has_class(ACTIVE_CLASS) {
            Some(PaymentMethod::Card)
        } else if self.cash.has_class(ACTIVE_CLASS) {
            Some(PaymentMethod::Cash)
        } else {
            None
        }
    }
}

impl Component for OrderForm {
    type Data = OrderFormData;

    fn container(&self) -> &Element {
        self.form.container()
    }

    fn render(&self, data: OrderFormData) -> Element {
        self.set_address(&data.address);
        self.set_payment(data.payment);
        self.form.render(FormState {
            valid: data.valid,
            errors: data.errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DomEvent;
    use crate::templates::{storefront_document, ORDER};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn order(bus: &EventBus) -> OrderForm {
        OrderForm::new(storefront_document().template(ORDER).unwrap(), bus).unwrap()
    }

    #[test]
    fn test_payment_click_highlights_and_emits() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        bus.on_pattern(&names::field_change_pattern("order"), move |payload| {
            sink.borrow_mut().push(payload.clone())
        })
        .unwrap();

        let view = order(&bus);
        let cash = view.container().ensure(r#"button[name="cash"]"#).unwrap();
        cash.click();

        assert_eq!(view.selected_payment(), Some(PaymentMethod::Cash));
        assert_eq!(
            seen.borrow()[0],
            Payload::Field {
                field: OrderField::Payment,
                value: "cash".to_string()
            }
        );

        view.container().ensure(r#"button[name="card"]"#).unwrap().click();
        assert_eq!(view.selected_payment(), Some(PaymentMethod::Card));
        assert!(!cash.has_class(ACTIVE_CLASS));
    }

    #[test]
    fn test_address_input_emits() {
        let bus = EventBus::new();
        let names_seen = Rc::new(RefCell::new(Vec::new()));
        let sink = names_seen.clone();
        bus.on_all(move |name, _| sink.borrow_mut().push(name.to_string()));

        let view = order(&bus);
        view.form()
            .input(OrderField::Address)
            .unwrap()
            .dispatch(&DomEvent::input("Spb Vosstania 1"));
        assert_eq!(*names_seen.borrow(), vec!["order.address:change"]);
    }

    #[test]
    fn test_render_and_reset() {
        let view = order(&EventBus::new());
        view.render(OrderFormData {
            address: "Moscow".to_string(),
            payment: Some(PaymentMethod::Card),
            valid: true,
            errors: String::new(),
        });
        assert_eq!(view.form().input(OrderField::Address).unwrap().value(), "Moscow");
        assert_eq!(view.selected_payment(), Some(PaymentMethod::Card));
        assert!(view.form().is_valid());

        view.reset_payment();
        assert_eq!(view.selected_payment(), None);
    }
}
