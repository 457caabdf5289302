//! Catalog handlers: gallery rendering, product preview and the preview's
//! buy/remove button.

use std::rc::Rc;

use larek_core::events::names;
use larek_core::{Payload, ProductItem};
use tracing::{error, info, warn};

use crate::components::{Card, CardData, Component};
use crate::dom::Element;
use crate::error::DomResult;
use crate::handlers::{on, Context};
use crate::templates::{CARD_CATALOG, CARD_PREVIEW};

const CARD_BLOCK: &str = "card";

pub(crate) fn register(ctx: &Rc<Context>) {
    on(ctx, names::ITEMS_CHANGED, |ctx, payload| {
        if let Payload::Catalog(items) = payload {
            render_catalog(ctx, items);
        }
    });

    on(ctx, names::PRODUCT_SELECT, |ctx, payload| {
        let Some(id) = payload.as_id() else {
            return;
        };
        if let Err(e) = ctx.state.set_preview(id) {
            warn!(id, error = %e, "Preview rejected");
        }
    });

    on(ctx, names::PREVIEW_CHANGED, |ctx, payload| {
        if let Payload::Product(item) = payload {
            if let Err(e) = show_preview(ctx, item) {
                error!(error = %e, "Failed to build preview card");
            }
        }
    });

    on(ctx, names::PREVIEW_TOGGLE, |ctx, payload| {
        let Some(id) = payload.as_id() else {
            return;
        };
        if let Err(e) = ctx.state.toggle_basket(id) {
            warn!(id, error = %e, "Basket change rejected");
        }
    });
}

/// Fetches the catalog on the current `LocalSet`.
pub(crate) fn load(ctx: &Rc<Context>) {
    let task = Rc::clone(ctx);
    ctx.spawn(async move {
        match task.api.get_product_list().await {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                task.state.set_catalog(products);
            }
            Err(e) => error!(error = %e, "Failed to load catalog"),
        }
    });
}

/// Replaces the gallery with one card per item.
pub(crate) fn render_catalog(ctx: &Context, items: &[ProductItem]) {
    let cards = items
        .iter()
        .map(|item| catalog_card(ctx, item))
        .collect::<DomResult<Vec<_>>>();

    match cards {
        Ok(cards) => ctx.views.page.set_catalog(cards),
        Err(e) => error!(error = %e, "Failed to render catalog"),
    }
}

fn catalog_card(ctx: &Context, item: &ProductItem) -> DomResult<Element> {
    let card = Card::new(CARD_BLOCK, ctx.document.template(CARD_CATALOG)?)?;

    let select = ctx.events.trigger(names::PRODUCT_SELECT);
    let id = item.product.id.clone();
    card.on_click(move || select(Payload::id(id.as_str())));

    Ok(card.render(CardData::from(item)))
}

fn show_preview(ctx: &Context, item: &ProductItem) -> DomResult<()> {
    let card = Card::new(CARD_BLOCK, ctx.document.template(CARD_PREVIEW)?)?;

    let toggle = ctx.events.trigger(names::PREVIEW_TOGGLE);
    let id = item.product.id.clone();
    card.on_click(move || toggle(Payload::id(id.as_str())));

    let content = card.render(CardData::from(item));
    ctx.preview.replace(Some(card));
    ctx.views.modal.render(content);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::handlers::tests::{find, gallery, in_modal, loaded, FakeApi};
    use larek_core::events::names;
    use larek_core::{Money, Payload};
    use std::rc::Rc;
    use tokio::task::LocalSet;

    #[tokio::test]
    async fn test_select_opens_preview_and_locks_page() {
        LocalSet::new()
            .run_until(async {
                let sf = loaded(Rc::new(FakeApi::default())).await;

                gallery(&sf)[0].click();

                assert!(sf.modal().is_open());
                assert!(find(&sf, ".page__wrapper").has_class("page__wrapper_locked"));
                assert_eq!(in_modal(&sf, ".card__title").text(), "+1 час в сутках");
                assert_eq!(in_modal(&sf, ".card__button").text(), "Купить");
                assert_eq!(sf.state().preview().map(|p| p.product.id), Some("a".to_string()));
            })
            .await;
    }

    #[tokio::test]
    async fn test_preview_button_toggles_basket() {
        LocalSet::new()
            .run_until(async {
                let sf = loaded(Rc::new(FakeApi::default())).await;
                gallery(&sf)[0].click();

                in_modal(&sf, ".card__button").click();
                assert_eq!(sf.state().basket_count(), 1);
                assert_eq!(sf.state().total(), Money::from_units(750));
                assert_eq!(in_modal(&sf, ".card__button").text(), "Убрать");
                assert_eq!(find(&sf, ".header__basket-counter").text(), "1");

                in_modal(&sf, ".card__button").click();
                assert_eq!(sf.state().basket_count(), 0);
                assert_eq!(in_modal(&sf, ".card__button").text(), "Купить");
                assert_eq!(find(&sf, ".header__basket-counter").text(), "0");
            })
            .await;
    }

    #[tokio::test]
    async fn test_priceless_preview_cannot_be_bought() {
        LocalSet::new()
            .run_until(async {
                let sf = loaded(Rc::new(FakeApi::default())).await;
                gallery(&sf)[1].click();

                let button = in_modal(&sf, ".card__button");
                assert!(button.is_disabled());
                assert_eq!(button.text(), "Недоступно");
                assert_eq!(in_modal(&sf, ".card__price").text(), "Бесценно");

                button.click();
                sf.events().emit(names::PREVIEW_TOGGLE, Payload::id("b"));
                assert_eq!(sf.state().basket_count(), 0);
            })
            .await;
    }

    #[tokio::test]
    async fn test_closing_preview_unlocks_page() {
        LocalSet::new()
            .run_until(async {
                let sf = loaded(Rc::new(FakeApi::default())).await;
                gallery(&sf)[0].click();
                find(&sf, ".modal__close").click();

                assert!(!sf.modal().is_open());
                assert!(!find(&sf, ".page__wrapper").has_class("page__wrapper_locked"));
                assert!(find(&sf, ".modal__content").children().is_empty());
            })
            .await;
    }
}
