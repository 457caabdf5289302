//! Basket handlers: header counter, basket modal and page scroll lock.

use std::rc::Rc;

use larek_core::events::names;
use larek_core::Payload;

use crate::components::Component;
use crate::handlers::{catalog, on, Context};

pub(crate) fn register(ctx: &Rc<Context>) {
    on(ctx, names::BASKET_CHANGED, |ctx, payload| {
        let Payload::Basket(summary) = payload else {
            return;
        };

        ctx.views.page.set_counter(summary.count());
        ctx.views.basket.render(summary.clone());

        if let Some(card) = ctx.preview.borrow().as_ref() {
            card.set_in_basket(ctx.state.is_in_basket(&card.id()));
        }

        // Card labels depend on basket membership.
        catalog::render_catalog(ctx, &ctx.state.catalog_items());
    });

    on(ctx, names::BASKET_OPEN, |ctx, _| {
        ctx.preview.replace(None);
        let content = ctx.views.basket.render(ctx.state.basket());
        ctx.views.modal.render(content);
    });

    on(ctx, names::BASKET_REMOVE, |ctx, payload| {
        if let Some(id) = payload.as_id() {
            ctx.state.remove_from_basket(id);
        }
    });

    on(ctx, names::MODAL_OPEN, |ctx, _| {
        ctx.views.page.set_locked(true);
    });

    on(ctx, names::MODAL_CLOSE, |ctx, _| {
        ctx.preview.replace(None);
        ctx.views.page.set_locked(false);
    });
}
