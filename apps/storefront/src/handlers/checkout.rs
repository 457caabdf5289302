//! # Checkout Handlers
//!
//! ```text
//! order:open ──► delivery form (payment + address)
//!      │           order.<field>:change ──► state ──► formErrors.order:change
//!      ▼
//! order:submit ──► contacts form (email + phone)
//!      │           contacts.<field>:change ──► state ──► formErrors.contacts:change
//!      ▼
//! contacts:submit ──► POST /order ──► complete_order ──► order:success
//!                                                          │
//! success:close ◄── success screen ◄───────────────────────┘
//! ```

use std::rc::Rc;

use larek_core::events::names;
use larek_core::{FormErrors, Payload};
use tracing::{error, info, warn};

use crate::components::{Component, ContactsFormData, Form, OrderFormData, SuccessData};
use crate::handlers::{on, on_pattern, Context};

pub(crate) fn register(ctx: &Rc<Context>) {
    on(ctx, names::ORDER_OPEN, |ctx, _| open_delivery(ctx));

    on_pattern(
        ctx,
        &names::field_change_pattern(names::ORDER_FORM),
        set_field,
    );
    on_pattern(
        ctx,
        &names::field_change_pattern(names::CONTACTS_FORM),
        set_field,
    );

    on(ctx, names::DELIVERY_ERRORS_CHANGED, |ctx, payload| {
        if let Payload::Errors(errors) = payload {
            show_errors(ctx.views.order.form(), errors);
        }
    });
    on(ctx, names::CONTACTS_ERRORS_CHANGED, |ctx, payload| {
        if let Payload::Errors(errors) = payload {
            show_errors(ctx.views.contacts.form(), errors);
        }
    });

    on(ctx, &names::form_submit(names::ORDER_FORM), |ctx, _| {
        if !ctx.state.validate_delivery() {
            warn!("Delivery step submitted while invalid");
            return;
        }
        open_contacts(ctx);
    });

    on(ctx, &names::form_submit(names::CONTACTS_FORM), |ctx, _| {
        submit_order(ctx);
    });

    on(ctx, names::ORDER_SUCCESS, |ctx, payload| {
        if let Payload::OrderPlaced(result) = payload {
            reset_forms(ctx);
            let content = ctx.views.success.render(SuccessData {
                total: result.total.unwrap_or_default(),
            });
            ctx.views.modal.render(content);
        }
    });

    on(ctx, names::SUCCESS_CLOSE, |ctx, _| ctx.views.modal.close());
}

fn set_field(ctx: &Rc<Context>, payload: &Payload) {
    if let Payload::Field { field, value } = payload {
        ctx.state.set_order_field(*field, value);
    }
}

fn show_errors(form: &Form, errors: &FormErrors) {
    form.set_valid(errors.is_empty());
    form.set_errors(&errors.summary());
}

/// Shows the delivery step with the draft's current values.
///
/// The error line starts blank; messages appear once a field changes.
fn open_delivery(ctx: &Context) {
    let draft = ctx.state.order();
    let valid = ctx.state.validate_delivery();
    let content = ctx.views.order.render(OrderFormData {
        address: draft.address,
        payment: draft.payment,
        valid,
        errors: String::new(),
    });
    ctx.views.modal.render(content);
}

fn open_contacts(ctx: &Context) {
    let draft = ctx.state.order();
    let valid = ctx.state.validate_contacts();
    let content = ctx.views.contacts.render(ContactsFormData {
        email: draft.email,
        phone: draft.phone,
        valid,
        errors: String::new(),
    });
    ctx.views.modal.render(content);
}

/// Sends the order. Only one request is in flight at a time.
fn submit_order(ctx: &Rc<Context>) {
    if ctx.submitting.get() {
        warn!("Order already being submitted");
        return;
    }

    let request = match ctx.state.order_request() {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Order not submitted");
            return;
        }
    };

    ctx.submitting.set(true);
    let task = Rc::clone(ctx);
    ctx.spawn(async move {
        let outcome = task.api.order_products(&request).await;
        task.submitting.set(false);

        match outcome {
            Ok(mut result) => {
                result.total.get_or_insert(request.total);
                info!(order_id = %result.id, total = %request.total, "Order accepted");
                task.state.complete_order(result);
            }
            Err(e) => error!(error = %e, "Failed to place order"),
        }
    });
}

fn reset_forms(ctx: &Context) {
    let order = &ctx.views.order;
    order.reset_payment();
    order.set_address("");
    ctx.views.contacts.set_email("");
    ctx.views.contacts.set_phone("");
}

#[cfg(test)]
mod tests {
    use crate::dom::{DomEvent, Element};
    use crate::handlers::tests::{find, gallery, in_modal, loaded, FakeApi};
    use crate::handlers::Storefront;
    use larek_core::{Money, OrderDraft, PaymentMethod};
    use std::rc::Rc;
    use tokio::task::LocalSet;

    fn submit_button(sf: &Storefront) -> Element {
        in_modal(sf, r#"button[type="submit"]"#)
    }

    fn type_into(sf: &Storefront, name: &str, value: &str) {
        in_modal(sf, &format!(r#"input[name="{name}"]"#)).dispatch(&DomEvent::input(value));
    }

    /// Buys product `a` and walks to the delivery form.
    fn start_checkout(sf: &Storefront) {
        gallery(sf)[0].click();
        in_modal(sf, ".card__button").click();
        find(sf, ".header__basket").click();
        in_modal(sf, ".basket__button").click();
    }

    fn fill_delivery(sf: &Storefront) {
        in_modal(sf, r#"button[name="card"]"#).click();
        type_into(sf, "address", "Spb Vosstania 1");
        submit_button(sf).click();
    }

    fn fill_contacts(sf: &Storefront) {
        type_into(sf, "email", "test@test.ru");
        type_into(sf, "phone", "+71234567890");
        submit_button(sf).click();
    }

    #[tokio::test]
    async fn test_delivery_step_validation() {
        LocalSet::new()
            .run_until(async {
                let sf = loaded(Rc::new(FakeApi::default())).await;
                start_checkout(&sf);

                assert!(submit_button(&sf).is_disabled());
                assert_eq!(in_modal(&sf, ".form__errors").text(), "");

                in_modal(&sf, r#"button[name="cash"]"#).click();
                assert!(in_modal(&sf, r#"button[name="cash"]"#).has_class("button_alt-active"));
                assert_eq!(in_modal(&sf, ".form__errors").text(), "Необходимо указать адрес");
                assert!(submit_button(&sf).is_disabled());

                type_into(&sf, "address", "Moscow");
                assert_eq!(in_modal(&sf, ".form__errors").text(), "");
                assert!(!submit_button(&sf).is_disabled());

                type_into(&sf, "address", "");
                assert!(submit_button(&sf).is_disabled());
                assert_eq!(sf.state().order().payment, Some(PaymentMethod::Cash));
            })
            .await;
    }

    #[tokio::test]
    async fn test_contacts_step_validation() {
        LocalSet::new()
            .run_until(async {
                let sf = loaded(Rc::new(FakeApi::default())).await;
                start_checkout(&sf);
                fill_delivery(&sf);

                assert!(in_modal(&sf, r#"input[name="email"]"#).attr("name").is_some());
                assert!(submit_button(&sf).is_disabled());

                type_into(&sf, "email", "test@test.ru");
                assert_eq!(in_modal(&sf, ".form__errors").text(), "Необходимо указать телефон");

                type_into(&sf, "phone", "+7");
                assert!(!submit_button(&sf).is_disabled());
            })
            .await;
    }

    #[tokio::test]
    async fn test_full_checkout() {
        LocalSet::new()
            .run_until(async {
                let api = Rc::new(FakeApi::default());
                let sf = loaded(api.clone()).await;

                start_checkout(&sf);
                fill_delivery(&sf);
                fill_contacts(&sf);
                sf.settle().await;

                let orders = api.orders.borrow();
                assert_eq!(orders.len(), 1);
                assert_eq!(orders[0].items, vec!["a".to_string()]);
                assert_eq!(orders[0].total, Money::from_units(750));
                assert_eq!(orders[0].payment, PaymentMethod::Card);
                assert_eq!(orders[0].address, "Spb Vosstania 1");

                assert_eq!(
                    in_modal(&sf, ".order-success__description").text(),
                    "Списано 750 синапсов"
                );
                assert_eq!(sf.state().order(), OrderDraft::default());
                assert_eq!(find(&sf, ".header__basket-counter").text(), "0");

                in_modal(&sf, ".order-success__close").click();
                assert!(!sf.modal().is_open());
                assert!(!find(&sf, ".page__wrapper").has_class("page__wrapper_locked"));
            })
            .await;
    }

    #[tokio::test]
    async fn test_next_checkout_starts_clean() {
        LocalSet::new()
            .run_until(async {
                let sf = loaded(Rc::new(FakeApi::default())).await;
                start_checkout(&sf);
                fill_delivery(&sf);
                fill_contacts(&sf);
                sf.settle().await;
                in_modal(&sf, ".order-success__close").click();

                start_checkout(&sf);
                assert!(!in_modal(&sf, r#"button[name="card"]"#).has_class("button_alt-active"));
                assert_eq!(in_modal(&sf, r#"input[name="address"]"#).value(), "");
                assert!(submit_button(&sf).is_disabled());
            })
            .await;
    }

    #[tokio::test]
    async fn test_failed_order_keeps_basket() {
        LocalSet::new()
            .run_until(async {
                let api = Rc::new(FakeApi {
                    fail_orders: true,
                    ..FakeApi::default()
                });
                let sf = loaded(api.clone()).await;

                start_checkout(&sf);
                fill_delivery(&sf);
                fill_contacts(&sf);
                sf.settle().await;

                assert!(api.orders.borrow().is_empty());
                assert_eq!(sf.state().basket_count(), 1);
                assert_eq!(sf.state().order().email, "test@test.ru");
                assert!(sf.modal().is_open());
                assert!(find(&sf, ".modal__content")
                    .query(".order-success__description")
                    .unwrap()
                    .is_none());
            })
            .await;
    }

    #[tokio::test]
    async fn test_double_submit_sends_one_order() {
        LocalSet::new()
            .run_until(async {
                let api = Rc::new(FakeApi::default());
                let sf = loaded(api.clone()).await;

                start_checkout(&sf);
                fill_delivery(&sf);
                fill_contacts(&sf);
                submit_button(&sf).click();
                sf.settle().await;

                assert_eq!(api.orders.borrow().len(), 1);
            })
            .await;
    }
}
