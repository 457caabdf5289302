//! # Storefront Wiring
//!
//! `Storefront` is the composition root: it builds the bus, the state, the
//! views and the API client, then subscribes the handlers that connect them.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   view click ──► intent event ──► handler ──► AppState mutation        │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │   view patch ◄── handler ◄────────────── state change event            │
//! │                                                                         │
//! │   catalog load / order submit ──► spawn_local ──► settle()             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handler modules:
//! - [`catalog`] - gallery, preview and buy/remove toggling
//! - [`basket`] - counter, basket modal, scroll lock
//! - [`checkout`] - two-step order form and submission
//!
//! Network work runs on the current `LocalSet`; `Storefront` methods that
//! start it must be called from inside one.

pub mod basket;
pub mod catalog;
pub mod checkout;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use larek_api::LarekApi;
use larek_core::{AppState, EventBus, Payload};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::components::{Basket, Card, ContactsForm, Modal, OrderForm, Page, Success};
use crate::dom::Document;
use crate::error::DomResult;
use crate::templates;

/// Views that live for the whole session.
pub(crate) struct Views {
    pub page: Page,
    pub modal: Rc<Modal>,
    pub basket: Basket,
    pub order: OrderForm,
    pub contacts: ContactsForm,
    pub success: Success,
}

/// Everything handlers share.
pub(crate) struct Context {
    pub events: EventBus,
    pub state: AppState,
    pub api: Rc<dyn LarekApi>,
    pub document: Document,
    pub views: Views,
    /// Card currently shown in the modal, kept to flip its button label.
    pub preview: RefCell<Option<Card>>,
    /// Set while an order request is in flight.
    pub submitting: Cell<bool>,
    tasks: RefCell<Vec<JoinHandle<()>>>,
}

impl Context {
    /// Runs `future` on the current `LocalSet` and tracks it for `settle`.
    ///
    /// Handles of tasks that already finished are dropped here.
    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let handle = tokio::task::spawn_local(future);
        let mut tasks = self.tasks.borrow_mut();
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    #[cfg(test)]
    fn pending_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }
}

/// Subscribes a handler that gets the shared context.
///
/// Handlers hold the context weakly so the bus does not keep it alive.
pub(crate) fn on<F>(ctx: &Rc<Context>, name: &str, handler: F)
where
    F: Fn(&Rc<Context>, &Payload) + 'static,
{
    let weak = Rc::downgrade(ctx);
    ctx.events.on(name, move |payload| {
        if let Some(ctx) = weak.upgrade() {
            handler(&ctx, payload);
        }
    });
}

/// Pattern version of [`on`].
pub(crate) fn on_pattern<F>(ctx: &Rc<Context>, pattern: &str, handler: F)
where
    F: Fn(&Rc<Context>, &Payload) + 'static,
{
    let weak = Rc::downgrade(ctx);
    let subscribed = ctx.events.on_pattern(pattern, move |payload| {
        if let Some(ctx) = weak.upgrade() {
            handler(&ctx, payload);
        }
    });
    if let Err(e) = subscribed {
        error!(pattern, error = %e, "Invalid event pattern");
    }
}

/// The running storefront.
pub struct Storefront {
    ctx: Rc<Context>,
}

impl Storefront {
    /// Builds every view from `document` and wires the handlers.
    ///
    /// Fails if a template or a required element is missing.
    pub fn new(document: Document, api: Rc<dyn LarekApi>) -> DomResult<Self> {
        let events = EventBus::new();
        events.on_all(|name, payload| debug!(event = name, payload = payload.kind(), "event"));

        let state = AppState::new(events.clone());

        let views = Views {
            page: Page::new(document.body().clone(), &events)?,
            modal: Modal::new(
                document.ensure_element(templates::MODAL_CONTAINER)?,
                document.root().clone(),
                &events,
            )?,
            basket: Basket::new(
                document.template(templates::BASKET)?,
                document.template(templates::CARD_BASKET)?,
                &events,
            )?,
            order: OrderForm::new(document.template(templates::ORDER)?, &events)?,
            contacts: ContactsForm::new(document.template(templates::CONTACTS)?, &events)?,
            success: Success::new(document.template(templates::SUCCESS)?, &events)?,
        };

        let ctx = Rc::new(Context {
            events,
            state,
            api,
            document,
            views,
            preview: RefCell::new(None),
            submitting: Cell::new(false),
            tasks: RefCell::new(Vec::new()),
        });

        catalog::register(&ctx);
        basket::register(&ctx);
        checkout::register(&ctx);

        info!(
            subscriptions = ctx.events.subscription_count(),
            "Storefront wired"
        );
        Ok(Storefront { ctx })
    }

    pub fn events(&self) -> &EventBus {
        &self.ctx.events
    }

    pub fn state(&self) -> &AppState {
        &self.ctx.state
    }

    pub fn document(&self) -> &Document {
        &self.ctx.document
    }

    pub fn modal(&self) -> &Modal {
        &self.ctx.views.modal
    }

    /// Starts fetching the catalog. Must run inside a `LocalSet`.
    pub fn load_catalog(&self) {
        catalog::load(&self.ctx);
    }

    /// Waits for every network task started so far, including ones started
    /// by tasks that finished meanwhile.
    pub async fn settle(&self) {
        loop {
            let pending = std::mem::take(&mut *self.ctx.tasks.borrow_mut());
            if pending.is_empty() {
                break;
            }
            for handle in pending {
                if let Err(e) = handle.await {
                    error!(error = %e, "Network task aborted");
                }
            }
        }
    }

    /// Current page markup.
    pub fn page_html(&self) -> String {
        self.ctx.document.body().to_html()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
