//! Page chrome: catalog gallery, basket counter and scroll lock.

use larek_core::events::names;
use larek_core::{EventBus, Payload};

use crate::components::Component;
use crate::dom::{Element, EventKind};
use crate::error::DomResult;

const LOCKED_CLASS: &str = "page__wrapper_locked";

/// Partial page update. `None` fields are left as they are.
#[derive(Debug, Default)]
pub struct PageData {
    pub counter: Option<usize>,
    pub catalog: Option<Vec<Element>>,
    pub locked: Option<bool>,
}

#[derive(Debug)]
pub struct Page {
    container: Element,
    counter: Element,
    catalog: Element,
    wrapper: Element,
}

impl Page {
    pub fn new(container: Element, events: &EventBus) -> DomResult<Self> {
        let counter = container.ensure(".header__basket-counter")?;
        let catalog = container.ensure(".gallery")?;
        let wrapper = container.ensure(".page__wrapper")?;
        let basket = container.ensure(".header__basket")?;

        let open_basket = events.trigger(names::BASKET_OPEN);
        basket.on(EventKind::Click, move |_| open_basket(Payload::None));

        Ok(Page {
            container,
            counter,
            catalog,
            wrapper,
        })
    }

    pub fn set_counter(&self, count: usize) {
        self.counter.set_text(&count.to_string());
    }

    pub fn set_catalog(&self, cards: Vec<Element>) {
        self.catalog.replace_children(cards);
    }

    pub fn set_locked(&self, locked: bool) {
        self.wrapper.toggle_class(LOCKED_CLASS, locked);
    }

    pub fn is_locked(&self) -> bool {
        self.wrapper.has_class(LOCKED_CLASS)
    }
}

impl Component for Page {
    type Data = PageData;

    fn container(&self) -> &Element {
        &self.container
    }

    fn render(&self, data: PageData) -> Element {
        if let Some(counter) = data.counter {
            self.set_counter(counter);
        }
        if let Some(cards) = data.catalog {
            self.set_catalog(cards);
        }
        if let Some(locked) = data.locked {
            self.set_locked(locked);
        }
        self.container.clone()
    }
}
