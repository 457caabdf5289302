//! # Modal
//!
//! Single modal container hosting whatever content a handler renders into
//! it.
//!
//! ## Lifecycle
//! ```text
//! render(content) ──► replace .modal__content ──► open()
//!
//! open()  : + modal_active, attach document keydown (once), emit modal:open
//! close() : - modal_active, detach keydown, clear content, emit modal:close
//!
//! close triggers: .modal__close click, overlay click, Escape key
//! ```
//!
//! The keydown listener lives on the document, so it is the one resource
//! that must be released on close. At most one is attached at a time.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use larek_core::events::names;
use larek_core::{EventBus, Payload};

use crate::components::Component;
use crate::dom::{DomEvent, Element, EventKind, ListenerId};
use crate::error::DomResult;

const ACTIVE_CLASS: &str = "modal_active";

#[derive(Debug)]
pub struct Modal {
    this: Weak<Modal>,
    container: Element,
    content: Element,
    document: Element,
    events: EventBus,
    escape: Cell<Option<ListenerId>>,
}

impl Modal {
    /// `document` is the element keyboard events are dispatched to.
    pub fn new(container: Element, document: Element, events: &EventBus) -> DomResult<Rc<Self>> {
        let close_button = container.ensure(".modal__close")?;
        let content = container.ensure(".modal__content")?;

        let modal = Rc::new_cyclic(|this: &Weak<Modal>| Modal {
            this: this.clone(),
            container: container.clone(),
            content,
            document,
            events: events.clone(),
            escape: Cell::new(None),
        });

        for target in [&close_button, &container] {
            let weak = Rc::downgrade(&modal);
            target.on(EventKind::Click, move |_| {
                if let Some(modal) = weak.upgrade() {
                    modal.close();
                }
            });
        }

        Ok(modal)
    }

    pub fn is_open(&self) -> bool {
        self.container.has_class(ACTIVE_CLASS)
    }

    pub fn content(&self) -> Vec<Element> {
        self.content.children()
    }

    pub fn set_content(&self, content: Element) {
        self.content.replace_children(vec![content]);
    }

    pub fn open(&self) {
        self.container.add_class(ACTIVE_CLASS);

        if self.escape.get().is_none() {
            let weak = self.this.clone();
            let id = self.document.on(EventKind::KeyDown, move |event| {
                if matches!(event, DomEvent::KeyDown { key } if key == "Escape") {
                    if let Some(modal) = weak.upgrade() {
                        modal.close();
                    }
                }
            });
            self.escape.set(Some(id));
        }

        self.events.emit(names::MODAL_OPEN, Payload::None);
    }

    pub fn close(&self) {
        self.container.remove_class(ACTIVE_CLASS);
        if let Some(id) = self.escape.take() {
            self.document.off(id);
        }
        self.content.clear();
        self.events.emit(names::MODAL_CLOSE, Payload::None);
    }
}

impl Component for Modal {
    type Data = Element;

    fn container(&self) -> &Element {
        &self.container
    }

    /// Shows `content` and opens the modal.
    fn render(&self, content: Element) -> Element {
        self.set_content(content);
        self.open();
        self.container.clone()
    }
}
