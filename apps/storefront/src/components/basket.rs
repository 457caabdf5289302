//! Basket modal content: numbered lines, total and the checkout button.

use larek_core::events::names;
use larek_core::money::format_price;
use larek_core::{BasketLine, BasketSummary, EventBus, Money, Payload};

use crate::components::Component;
use crate::dom::{Element, EventKind};
use crate::error::DomResult;

pub const EMPTY_TEXT: &str = "Корзина пуста";

#[derive(Debug)]
pub struct Basket {
    container: Element,
    list: Element,
    total: Element,
    button: Element,
    item_template: Element,
    events: EventBus,
}

impl Basket {
    /// `item_template` is the `card-basket` fragment, cloned once per line.
    pub fn new(container: Element, item_template: Element, events: &EventBus) -> DomResult<Self> {
        let list = container.ensure(".basket__list")?;
        let total = container.ensure(".basket__price")?;
        let button = container.ensure(".basket__button")?;

        let open_order = events.trigger(names::ORDER_OPEN);
        button.on(EventKind::Click, move |_| open_order(Payload::None));

        let basket = Basket {
            container,
            list,
            total,
            button,
            item_template,
            events: events.clone(),
        };
        basket.set_lines(&[])?;
        Ok(basket)
    }

    /// Rebuilds the list. An empty basket shows a placeholder and disables
    /// checkout.
    pub fn set_lines(&self, lines: &[BasketLine]) -> DomResult<()> {
        if lines.is_empty() {
            self.list
                .replace_children(vec![Element::new("p").with_text(EMPTY_TEXT)]);
            self.button.set_disabled(true);
            return Ok(());
        }

        let items = lines
            .iter()
            .map(|line| self.create_line(line))
            .collect::<DomResult<Vec<_>>>()?;
        self.list.replace_children(items);
        self.button.set_disabled(false);
        Ok(())
    }

    pub fn set_total(&self, total: Money) {
        self.total.set_text(&format_price(Some(total)));
    }

    fn create_line(&self, line: &BasketLine) -> DomResult<Element> {
        let element = self.item_template.deep_clone();

        element
            .ensure(".basket__item-index")?
            .set_text(&line.index.to_string());
        element.ensure(".card__title")?.set_text(&line.title);
        element
            .ensure(".card__price")?
            .set_text(&format_price(line.price));

        let remove = self.events.trigger(names::BASKET_REMOVE);
        let id = line.id.clone();
        element
            .ensure(".basket__item-delete")?
            .on(EventKind::Click, move |_| remove(Payload::id(id.clone())));

        Ok(element)
    }
}

impl Component for Basket {
    type Data = BasketSummary;

    fn container(&self) -> &Element {
        &self.container
    }

    fn render(&self, data: BasketSummary) -> Element {
        if let Err(e) = self.set_lines(&data.lines) {
            tracing::error!(error = %e, "Basket line template is broken");
        }
        self.set_total(data.total);
        self.container.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{storefront_document, BASKET, CARD_BASKET};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn basket(bus: &EventBus) -> Basket {
        let doc = storefront_document();
        Basket::new(
            doc.template(BASKET).unwrap(),
            doc.template(CARD_BASKET).unwrap(),
            bus,
        )
        .unwrap()
    }

    fn summary() -> BasketSummary {
        BasketSummary {
            lines: vec![
                BasketLine {
                    index: 1,
                    id: "a".to_string(),
                    title: "Фреймворк куки судьбы".to_string(),
                    price: Some(Money::from_units(2500)),
                },
                BasketLine {
                    index: 2,
                    id: "b".to_string(),
                    title: "HEX-леденец".to_string(),
                    price: Some(Money::from_units(1)),
                },
            ],
            total: Money::from_units(2501),
        }
    }

    #[test]
    fn test_starts_empty() {
        let view = basket(&EventBus::new());
        let root = view.container();
        assert_eq!(root.ensure(".basket__list").unwrap().text(), EMPTY_TEXT);
        assert!(root.ensure(".basket__button").unwrap().is_disabled());
    }

    #[test]
    fn test_render_lines_and_total() {
        let view = basket(&EventBus::new());
        let root = view.render(summary());

        let lines = root.query_all(".basket__item").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].ensure(".basket__item-index").unwrap().text(), "2");
        assert_eq!(lines[1].ensure(".card__price").unwrap().text(), "1 синапс");
        assert_eq!(root.ensure(".basket__price").unwrap().text(), "2501 синапс");
        assert!(!root.ensure(".basket__button").unwrap().is_disabled());

        let root = view.render(BasketSummary::default());
        assert!(root.query_all(".basket__item").unwrap().is_empty());
        assert_eq!(root.ensure(".basket__price").unwrap().text(), "0 синапсов");
    }

    #[test]
    fn test_delete_and_checkout_emit() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        bus.on_all(move |name, payload| {
            sink.borrow_mut()
                .push(format!("{name}:{}", payload.as_id().unwrap_or("-")))
        });

        let view = basket(&bus);
        let root = view.render(summary());
        let lines = root.query_all(".basket__item").unwrap();
        lines[1].ensure(".basket__item-delete").unwrap().click();
        root.ensure(".basket__button").unwrap().click();

        assert_eq!(*log.borrow(), vec!["basket:remove:b", "order:open:-"]);
    }
}
