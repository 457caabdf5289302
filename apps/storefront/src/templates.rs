//! Storefront page markup and templates.
//!
//! The page body and every template the views clone, keyed by the ids the
//! views look up (`card-catalog`, `basket`, `order`, ...).

use crate::dom::{Document, Element};

pub const CARD_CATALOG: &str = "card-catalog";
pub const CARD_PREVIEW: &str = "card-preview";
pub const CARD_BASKET: &str = "card-basket";
pub const BASKET: &str = "basket";
pub const ORDER: &str = "order";
pub const CONTACTS: &str = "contacts";
pub const SUCCESS: &str = "success";
pub const MODAL_CONTAINER: &str = "#modal-container";

fn el(tag: &str, classes: &str) -> Element {
    Element::new(tag).with_class(classes)
}

/// Builds the storefront document: page body plus all templates.
pub fn storefront_document() -> Document {
    let mut document = Document::new(body());
    document.add_template(CARD_CATALOG, card_catalog());
    document.add_template(CARD_PREVIEW, card_preview());
    document.add_template(CARD_BASKET, card_basket());
    document.add_template(BASKET, basket());
    document.add_template(ORDER, order_form());
    document.add_template(CONTACTS, contacts_form());
    document.add_template(SUCCESS, success());
    document
}

fn body() -> Element {
    let header = el("header", "header").with_child(
        el("div", "header__container")
            .with_child(
                el("a", "header__logo")
                    .with_attr("href", "#")
                    .with_child(
                        el("img", "header__logo-image")
                            .with_attr("src", "/images/logo.svg")
                            .with_attr("alt", "СИНЯЯ ЛАРЁК"),
                    ),
            )
            .with_child(
                el("button", "header__basket")
                    .with_child(el("span", "header__basket-counter").with_text("0")),
            ),
    );

    let modal = el("div", "modal").with_attr("id", "modal-container").with_child(
        el("div", "modal__container")
            .with_child(el("button", "modal__close").with_attr("aria-label", "закрыть"))
            .with_child(el("div", "modal__content")),
    );

    el("body", "").with_child(
        el("div", "page")
            .with_child(
                el("div", "page__wrapper")
                    .with_child(header)
                    .with_child(el("main", "gallery")),
            )
            .with_child(modal),
    )
}

fn card_catalog() -> Element {
    el("button", "gallery__item card")
        .with_child(el("span", "card__category card__category_soft"))
        .with_child(el("h2", "card__title"))
        .with_child(el("img", "card__image").with_attr("alt", ""))
        .with_child(el("span", "card__price"))
}

fn card_preview() -> Element {
    el("div", "card card_full")
        .with_child(el("img", "card__image").with_attr("alt", ""))
        .with_child(
            el("div", "card__column")
                .with_child(el("span", "card__category card__category_other"))
                .with_child(el("h2", "card__title"))
                .with_child(el("p", "card__text"))
                .with_child(
                    el("div", "card__row")
                        .with_child(el("button", "button card__button").with_text("В корзину"))
                        .with_child(el("span", "card__price")),
                ),
        )
}

fn card_basket() -> Element {
    el("li", "basket__item card card_compact")
        .with_child(el("span", "basket__item-index"))
        .with_child(el("span", "card__title"))
        .with_child(el("span", "card__price"))
        .with_child(
            el("button", "basket__item-delete card__button").with_attr("aria-label", "удалить"),
        )
}

fn basket() -> Element {
    el("div", "basket")
        .with_child(el("h2", "modal__title").with_text("Корзина"))
        .with_child(el("ul", "basket__list"))
        .with_child(
            el("div", "modal__actions")
                .with_child(el("button", "button basket__button").with_text("Оформить"))
                .with_child(el("span", "basket__price")),
        )
}

fn text_field(label: &str, name: &str, placeholder: &str) -> Element {
    el("label", "order__field")
        .with_child(el("span", "form__label modal__title").with_text(label))
        .with_child(
            el("input", "form__input")
                .with_attr("name", name)
                .with_attr("type", "text")
                .with_attr("placeholder", placeholder),
        )
}

fn form_actions(submit_class: &str, submit_text: &str) -> Element {
    el("div", "modal__actions")
        .with_child(
            el("button", submit_class)
                .with_attr("type", "submit")
                .with_attr("disabled", "")
                .with_text(submit_text),
        )
        .with_child(el("span", "form__errors"))
}

fn order_form() -> Element {
    el("form", "form")
        .with_attr("name", ORDER)
        .with_child(
            el("div", "order")
                .with_child(
                    el("div", "order__field")
                        .with_child(el("h2", "modal__title").with_text("Способ оплаты"))
                        .with_child(
                            el("div", "order__buttons")
                                .with_child(
                                    el("button", "button button_alt")
                                        .with_attr("name", "card")
                                        .with_attr("type", "button")
                                        .with_text("Онлайн"),
                                )
                                .with_child(
                                    el("button", "button button_alt")
                                        .with_attr("name", "cash")
                                        .with_attr("type", "button")
                                        .with_text("При получении"),
                                ),
                        ),
                )
                .with_child(text_field("Адрес доставки", "address", "Введите адрес")),
        )
        .with_child(form_actions("button order__button", "Далее"))
}

fn contacts_form() -> Element {
    el("form", "form")
        .with_attr("name", CONTACTS)
        .with_child(
            el("div", "order")
                .with_child(text_field("Email", "email", "Введите Email"))
                .with_child(text_field("Телефон", "phone", "+7 (")),
        )
        .with_child(form_actions("button", "Оплатить"))
}

fn success() -> Element {
    el("div", "film-preview order-success")
        .with_child(el("h2", "film__title order-success__title").with_text("Заказ оформлен"))
        .with_child(el("p", "film__description order-success__description"))
        .with_child(el("button", "button order-success__close").with_text("За новыми покупками!"))
}
