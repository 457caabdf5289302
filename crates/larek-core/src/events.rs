//! # Event Bus
//!
//! Synchronous publish/subscribe dispatcher connecting the state and the
//! views.
//!
//! ## Dispatch Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      emit("order.address:change")                       │
//! │                                   │                                     │
//! │          ┌────────────────────────┼────────────────────────┐            │
//! │          ▼                        ▼                        ▼            │
//! │  ┌───────────────┐    ┌──────────────────────┐   ┌────────────────┐    │
//! │  │ exact: name → │    │ patterns: (regex, h) │   │ all: h(name,p) │    │
//! │  │   [h1, h2]    │    │ in registration order│   │                │    │
//! │  └───────────────┘    └──────────────────────┘   └────────────────┘    │
//! │          1st                     2nd                      3rd           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Re-entrancy
//! The matching handlers are cloned out of the registry before any of them
//! runs. A handler may therefore emit, subscribe or unsubscribe; nested
//! emissions complete depth-first before the outer `emit` returns.
//!
//! The bus is single-threaded (`Rc` + `RefCell`). Cloning an `EventBus`
//! yields another handle to the same registry.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use regex::Regex;
use tracing::trace;

use crate::types::{BasketSummary, OrderField, OrderResult, ProductItem};
use crate::validation::FormErrors;

// =============================================================================
// Event Names
// =============================================================================

/// Names of the events exchanged between state, views and handlers.
pub mod names {
    /// Catalog replaced. Payload: `Catalog`.
    pub const ITEMS_CHANGED: &str = "items:changed";
    /// Preview product chosen. Payload: `Product`.
    pub const PREVIEW_CHANGED: &str = "preview:changed";
    /// Basket contents changed. Payload: `Basket`.
    pub const BASKET_CHANGED: &str = "basket:changed";
    /// Delivery step errors recomputed. Payload: `Errors`.
    pub const DELIVERY_ERRORS_CHANGED: &str = "formErrors.order:change";
    /// Contacts step errors recomputed. Payload: `Errors`.
    pub const CONTACTS_ERRORS_CHANGED: &str = "formErrors.contacts:change";
    /// Order accepted by the server and draft reset. Payload: `OrderPlaced`.
    pub const ORDER_SUCCESS: &str = "order:success";

    /// Catalog card clicked. Payload: `Id`.
    pub const PRODUCT_SELECT: &str = "product:select";
    /// Preview buy/remove button clicked. Payload: `Id`.
    pub const PREVIEW_TOGGLE: &str = "preview:toggle";
    /// Header basket button clicked.
    pub const BASKET_OPEN: &str = "basket:open";
    /// Basket line delete clicked. Payload: `Id`.
    pub const BASKET_REMOVE: &str = "basket:remove";
    /// Basket checkout button clicked.
    pub const ORDER_OPEN: &str = "order:open";
    /// Success screen close clicked.
    pub const SUCCESS_CLOSE: &str = "success:close";

    pub const MODAL_OPEN: &str = "modal:open";
    pub const MODAL_CLOSE: &str = "modal:close";

    /// Form names, used as event prefixes.
    pub const ORDER_FORM: &str = "order";
    pub const CONTACTS_FORM: &str = "contacts";

    /// `<form>.<field>:change`
    pub fn field_change(form: &str, field: &str) -> String {
        format!("{form}.{field}:change")
    }

    /// `<form>:submit`
    pub fn form_submit(form: &str) -> String {
        format!("{form}:submit")
    }

    /// Regex matching every field change of a form.
    pub fn field_change_pattern(form: &str) -> String {
        format!(r"^{}\..*:change$", regex::escape(form))
    }
}

// =============================================================================
// Payload
// =============================================================================

/// Data carried by an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    None,
    Catalog(Vec<ProductItem>),
    Product(ProductItem),
    Id(String),
    Field { field: OrderField, value: String },
    Errors(FormErrors),
    Basket(BasketSummary),
    OrderPlaced(OrderResult),
}

impl Payload {
    pub fn id(id: impl Into<String>) -> Self {
        Payload::Id(id.into())
    }

    pub fn as_id(&self) -> Option<&str> {
        match self {
            Payload::Id(id) => Some(id),
            _ => None,
        }
    }

    /// Short tag for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::None => "none",
            Payload::Catalog(_) => "catalog",
            Payload::Product(_) => "product",
            Payload::Id(_) => "id",
            Payload::Field { .. } => "field",
            Payload::Errors(_) => "errors",
            Payload::Basket(_) => "basket",
            Payload::OrderPlaced(_) => "order_placed",
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Handle returned by every subscription; pass to [`EventBus::off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&Payload)>;
type AnyHandler = Rc<dyn Fn(&str, &Payload)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    exact: HashMap<String, Vec<(SubscriptionId, Handler)>>,
    patterns: Vec<(SubscriptionId, Regex, Handler)>,
    all: Vec<(SubscriptionId, AnyHandler)>,
}

impl Registry {
    fn next(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }

    fn len(&self) -> usize {
        self.exact.values().map(Vec::len).sum::<usize>() + self.patterns.len() + self.all.len()
    }
}

enum Matched {
    One(Handler),
    All(AnyHandler),
}

/// The event bus. Cheap to clone; clones share one registry.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscription_count())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to one exact event name.
    pub fn on<F>(&self, name: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&Payload) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next();
        registry
            .exact
            .entry(name.to_string())
            .or_default()
            .push((id, Rc::new(handler)));
        id
    }

    /// Subscribes to every event whose name matches `pattern`.
    ///
    /// ## Example
    /// ```rust
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use larek_core::{EventBus, Payload};
    ///
    /// let bus = EventBus::new();
    /// let hits = Rc::new(Cell::new(0));
    /// let counter = hits.clone();
    /// bus.on_pattern(r"^order\..*:change$", move |_| counter.set(counter.get() + 1))
    ///     .unwrap();
    ///
    /// bus.emit("order.address:change", Payload::None);
    /// bus.emit("contacts.email:change", Payload::None);
    /// assert_eq!(hits.get(), 1);
    /// ```
    pub fn on_pattern<F>(&self, pattern: &str, handler: F) -> Result<SubscriptionId, regex::Error>
    where
        F: Fn(&Payload) + 'static,
    {
        let regex = Regex::new(pattern)?;
        let mut registry = self.registry.borrow_mut();
        let id = registry.next();
        registry.patterns.push((id, regex, Rc::new(handler)));
        Ok(id)
    }

    /// Subscribes to every event, receiving its name along with the payload.
    pub fn on_all<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &Payload) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next();
        registry.all.push((id, Rc::new(handler)));
        id
    }

    /// Removes one subscription. Unknown ids are ignored.
    pub fn off(&self, id: SubscriptionId) {
        let mut registry = self.registry.borrow_mut();
        for handlers in registry.exact.values_mut() {
            handlers.retain(|(sub, _)| *sub != id);
        }
        registry.exact.retain(|_, handlers| !handlers.is_empty());
        registry.patterns.retain(|(sub, _, _)| *sub != id);
        registry.all.retain(|(sub, _)| *sub != id);
    }

    /// Removes every subscription.
    pub fn off_all(&self) {
        let mut registry = self.registry.borrow_mut();
        registry.exact.clear();
        registry.patterns.clear();
        registry.all.clear();
    }

    /// Dispatches an event to every matching handler, synchronously.
    pub fn emit(&self, name: &str, payload: Payload) {
        let matched = self.matching(name);
        trace!(event = name, payload = payload.kind(), handlers = matched.len(), "emit");

        for handler in matched {
            match handler {
                Matched::One(h) => h(&payload),
                Matched::All(h) => h(name, &payload),
            }
        }
    }

    /// Returns a callback that emits `name` with whatever payload it is given.
    pub fn trigger(&self, name: impl Into<String>) -> impl Fn(Payload) + 'static {
        let bus = self.clone();
        let name = name.into();
        move |payload| bus.emit(&name, payload)
    }

    pub fn subscription_count(&self) -> usize {
        self.registry.borrow().len()
    }

    fn matching(&self, name: &str) -> Vec<Matched> {
        let registry = self.registry.borrow();
        let mut matched = Vec::new();

        if let Some(handlers) = registry.exact.get(name) {
            matched.extend(handlers.iter().map(|(_, h)| Matched::One(h.clone())));
        }
        matched.extend(
            registry
                .patterns
                .iter()
                .filter(|(_, regex, _)| regex.is_match(name))
                .map(|(_, _, h)| Matched::One(h.clone())),
        );
        matched.extend(registry.all.iter().map(|(_, h)| Matched::All(h.clone())));
        matched
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn recorder(bus: &EventBus) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        bus.on_all(move |name, _| sink.borrow_mut().push(name.to_string()));
        log
    }

    #[test]
    fn test_exact_subscription() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        bus.on(names::BASKET_REMOVE, move |payload| {
            *sink.borrow_mut() = payload.as_id().map(str::to_string);
        });

        bus.emit(names::BASKET_REMOVE, Payload::id("abc"));
        bus.emit(names::BASKET_OPEN, Payload::id("ignored"));

        assert_eq!(seen.borrow().as_deref(), Some("abc"));
    }

    #[test]
    fn test_pattern_subscription() {
        let bus = EventBus::new();
        let fields = Rc::new(RefCell::new(Vec::new()));
        let sink = fields.clone();
        bus.on_pattern(&names::field_change_pattern(names::ORDER_FORM), move |payload| {
            if let Payload::Field { field, .. } = payload {
                sink.borrow_mut().push(*field);
            }
        })
        .unwrap();

        let field = |f: OrderField| Payload::Field {
            field: f,
            value: "x".to_string(),
        };
        bus.emit("order.address:change", field(OrderField::Address));
        bus.emit("order.payment:change", field(OrderField::Payment));
        bus.emit("contacts.email:change", field(OrderField::Email));
        bus.emit(names::DELIVERY_ERRORS_CHANGED, Payload::None);

        assert_eq!(*fields.borrow(), vec![OrderField::Address, OrderField::Payment]);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let bus = EventBus::new();
        assert!(bus.on_pattern("(unclosed", |_| {}).is_err());
        assert_eq!(bus.subscription_count(), 0);
    }

    #[test]
    fn test_order_exact_then_pattern_then_all() {
        let bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = order.clone();
        bus.on_all(move |_, _| o.borrow_mut().push("all"));
        let o = order.clone();
        bus.on_pattern("^basket", move |_| o.borrow_mut().push("pattern")).unwrap();
        let o = order.clone();
        bus.on(names::BASKET_OPEN, move |_| o.borrow_mut().push("exact-1"));
        let o = order.clone();
        bus.on(names::BASKET_OPEN, move |_| o.borrow_mut().push("exact-2"));

        bus.emit(names::BASKET_OPEN, Payload::None);
        assert_eq!(*order.borrow(), vec!["exact-1", "exact-2", "pattern", "all"]);
    }

    #[test]
    fn test_reentrant_emit_is_depth_first() {
        let bus = EventBus::new();
        let log = recorder(&bus);

        let inner = bus.clone();
        bus.on("outer", move |_| {
            inner.emit("inner", Payload::None);
        });
        let inner = bus.clone();
        bus.on("inner", move |_| {
            inner.emit("innermost", Payload::None);
        });

        bus.emit("outer", Payload::None);
        assert_eq!(*log.borrow(), vec!["innermost", "inner", "outer"]);
    }

    #[test]
    fn test_handler_may_subscribe_during_emit() {
        let bus = EventBus::new();
        let late_hits = Rc::new(Cell::new(0));

        let handle = bus.clone();
        let hits = late_hits.clone();
        bus.on("register", move |_| {
            let hits = hits.clone();
            handle.on("late", move |_| hits.set(hits.get() + 1));
        });

        bus.emit("register", Payload::None);
        bus.emit("late", Payload::None);
        assert_eq!(late_hits.get(), 1);
    }

    #[test]
    fn test_off_and_off_all() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let first = bus.on("tick", move |_| h.set(h.get() + 1));
        let h = hits.clone();
        bus.on("tick", move |_| h.set(h.get() + 10));

        bus.off(first);
        bus.emit("tick", Payload::None);
        assert_eq!(hits.get(), 10);

        bus.off_all();
        bus.emit("tick", Payload::None);
        assert_eq!(hits.get(), 10);
        assert_eq!(bus.subscription_count(), 0);
    }

    #[test]
    fn test_trigger() {
        let bus = EventBus::new();
        let log = recorder(&bus);

        let open = bus.trigger(names::ORDER_OPEN);
        open(Payload::None);
        open(Payload::None);

        assert_eq!(*log.borrow(), vec!["order:open", "order:open"]);
    }

    #[test]
    fn test_event_name_helpers() {
        assert_eq!(names::field_change("contacts", "phone"), "contacts.phone:change");
        assert_eq!(names::form_submit("order"), "order:submit");
        let pattern = Regex::new(&names::field_change_pattern("order")).unwrap();
        assert!(pattern.is_match("order.address:change"));
        assert!(!pattern.is_match("order:submit"));
        assert!(!pattern.is_match("formErrors.order:change"));
    }
}
