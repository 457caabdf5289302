//! # Product Card
//!
//! One component for the three card templates (catalog, preview, basket
//! line share the `card` block). Only `__title` and `__image` are required;
//! the other parts are patched when the template has them.
//!
//! ## Button States
//! ```text
//! price == None          → "Недоступно", disabled, price "Бесценно"
//! price set, not in cart → "Купить"
//! price set, in cart     → "Убрать"
//! ```

use std::cell::Cell;

use larek_core::category::{all_category_classes, category_class};
use larek_core::money::format_price;
use larek_core::{Money, ProductItem};

use crate::components::Component;
use crate::dom::{Element, EventKind};
use crate::error::DomResult;

pub const BUTTON_BUY: &str = "Купить";
pub const BUTTON_REMOVE: &str = "Убрать";
pub const BUTTON_UNAVAILABLE: &str = "Недоступно";

/// Everything a card shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardData {
    pub id: String,
    pub title: String,
    pub image: String,
    pub description: String,
    pub category: String,
    pub price: Option<Money>,
    pub in_basket: bool,
}

impl From<&ProductItem> for CardData {
    fn from(item: &ProductItem) -> Self {
        let p = &item.product;
        CardData {
            id: p.id.clone(),
            title: p.title.clone(),
            image: p.image.clone(),
            description: p.description.clone(),
            category: p.category.clone(),
            price: p.price,
            in_basket: item.in_basket,
        }
    }
}

#[derive(Debug)]
pub struct Card {
    container: Element,
    title: Element,
    image: Element,
    button: Option<Element>,
    description: Option<Element>,
    price: Option<Element>,
    category: Option<Element>,
    for_sale: Cell<bool>,
}

impl Card {
    /// Binds a card to a cloned template using `block` as the BEM block name.
    pub fn new(block: &str, container: Element) -> DomResult<Self> {
        let title = container.ensure(&format!(".{block}__title"))?;
        let image = container.ensure(&format!(".{block}__image"))?;
        let button = container.query(&format!(".{block}__button"))?;
        let description = container.query(&format!(".{block}__text"))?;
        let price = container.query(&format!(".{block}__price"))?;
        let category = container.query(&format!(".{block}__category"))?;

        Ok(Card {
            container,
            title,
            image,
            button,
            description,
            price,
            category,
            for_sale: Cell::new(true),
        })
    }

    /// Click action. Bound to the card's button if it has one, else to the
    /// whole card.
    pub fn on_click<F>(&self, action: F)
    where
        F: Fn() + 'static,
    {
        let target = self.button.as_ref().unwrap_or(&self.container);
        target.on(EventKind::Click, move |_| action());
    }

    pub fn set_id(&self, id: &str) {
        self.container.set_attr("data-id", id);
    }

    pub fn id(&self) -> String {
        self.container.attr("data-id").unwrap_or_default()
    }

    pub fn set_title(&self, title: &str) {
        self.title.set_text(title);
    }

    pub fn set_image(&self, src: &str, alt: &str) {
        self.image.set_attr("src", src);
        self.image.set_attr("alt", alt);
    }

    pub fn set_description(&self, text: &str) {
        if let Some(description) = &self.description {
            description.set_text(text);
        }
    }

    /// Sets the label and swaps the category modifier class.
    pub fn set_category(&self, category: &str) {
        let Some(el) = &self.category else {
            return;
        };
        el.set_text(category);
        for class in all_category_classes() {
            el.remove_class(&class);
        }
        el.add_class(&category_class(category));
    }

    pub fn set_price(&self, price: Option<Money>) {
        self.for_sale.set(price.is_some());
        if let Some(el) = &self.price {
            el.set_text(&format_price(price));
        }
        match price {
            Some(_) => self.set_button_disabled(false),
            None => {
                self.set_button_disabled(true);
                self.set_button_text(BUTTON_UNAVAILABLE);
            }
        }
    }

    /// Buy/remove label. Ignored for cards that are not for sale.
    pub fn set_in_basket(&self, in_basket: bool) {
        if self.for_sale.get() {
            self.set_button_text(if in_basket { BUTTON_REMOVE } else { BUTTON_BUY });
        }
    }

    pub fn set_button_text(&self, text: &str) {
        if let Some(button) = &self.button {
            button.set_text(text);
        }
    }

    pub fn set_button_disabled(&self, disabled: bool) {
        if let Some(button) = &self.button {
            button.set_disabled(disabled);
        }
    }

    pub fn button_text(&self) -> Option<String> {
        self.button.as_ref().map(Element::text)
    }
}

impl Component for Card {
    type Data = CardData;

    fn container(&self) -> &Element {
        &self.container
    }

    fn render(&self, data: CardData) -> Element {
        self.set_id(&data.id);
        self.set_title(&data.title);
        self.set_image(&data.image, &data.title);
        self.set_description(&data.description);
        self.set_category(&data.category);
        self.set_price(data.price);
        self.set_in_basket(data.in_basket);
        self.container.clone()
    }
}
