//! Order confirmation screen.

use larek_core::events::names;
use larek_core::{EventBus, Money, Payload};

use crate::components::Component;
use crate::dom::{Element, EventKind};
use crate::error::DomResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuccessData {
    pub total: Money,
}

#[derive(Debug)]
pub struct Success {
    container: Element,
    description: Element,
}

impl Success {
    pub fn new(container: Element, events: &EventBus) -> DomResult<Self> {
        let close = container.ensure(".order-success__close")?;
        let description = container.ensure(".order-success__description")?;

        let closed = events.trigger(names::SUCCESS_CLOSE);
        close.on(EventKind::Click, move |_| closed(Payload::None));

        Ok(Success {
            container,
            description,
        })
    }

    pub fn set_total(&self, total: Money) {
        self.description.set_text(&format!("Списано {total}"));
    }
}

impl Component for Success {
    type Data = SuccessData;

    fn container(&self) -> &Element {
        &self.container
    }

    fn render(&self, data: SuccessData) -> Element {
        self.set_total(data.total);
        self.container.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{storefront_document, SUCCESS};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_written_off_text_and_close() {
        let bus = EventBus::new();
        let closed = Rc::new(Cell::new(false));
        let flag = closed.clone();
        bus.on(names::SUCCESS_CLOSE, move |_| flag.set(true));

        let view = Success::new(storefront_document().template(SUCCESS).unwrap(), &bus).unwrap();
        let root = view.render(SuccessData {
            total: Money::from_units(2202),
        });

        assert_eq!(
            root.ensure(".order-success__description").unwrap().text(),
            "Списано 2202 синапса"
        );
        root.ensure(".order-success__close").unwrap().click();
        assert!(closed.get());
    }
}
