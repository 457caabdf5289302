//! # Application State
//!
//! The single mutable object behind the storefront: catalog, basket, preview
//! and the order draft.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Operations                                     │
//! │                                                                         │
//! │  Operation                 State Change            Event Emitted        │
//! │  ─────────                 ────────────            ─────────────        │
//! │                                                                         │
//! │  set_catalog(products) ──► catalog = products ───► items:changed       │
//! │  set_preview(id) ────────► preview = id ─────────► preview:changed     │
//! │  add_to_basket(id) ──────► items.push(id) ───────► basket:changed      │
//! │  remove_from_basket(id) ─► items.retain(..) ─────► basket:changed      │
//! │  clear_basket() ─────────► items.clear() ────────► basket:changed      │
//! │  set_order_field(f, v) ──► draft.f = v ──────────► formErrors.*:change │
//! │  complete_order(result) ─► draft = default ──────► order:success       │
//! │                                                                         │
//! │  NOTE: the internal RefCell borrow is always released before emitting, │
//! │        so handlers may read or mutate the state re-entrantly.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - An id appears at most once in `order.items`
//! - `order.total` equals the sum of current prices of `order.items`
//! - A product without a price is never in `order.items`

use std::cell::RefCell;

use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::events::{names, EventBus, Payload};
use crate::money::Money;
use crate::types::{
    BasketLine, BasketSummary, CheckoutStep, OrderDraft, OrderField, OrderRequest, OrderResult,
    Product, ProductItem,
};
use crate::validation::{validate_step, FormErrors};

#[derive(Debug, Default)]
struct StateData {
    catalog: Vec<Product>,
    order: OrderDraft,
    preview: Option<String>,
    form_errors: FormErrors,
}

impl StateData {
    fn find(&self, id: &str) -> Option<&Product> {
        self.catalog.iter().find(|p| p.id == id)
    }

    fn price_of(&self, id: &str) -> Money {
        self.find(id).and_then(|p| p.price).unwrap_or_default()
    }

    fn checked_total(&self) -> Option<Money> {
        Money::checked_sum(self.order.items.iter().map(|id| self.price_of(id)))
    }

    /// Recomputes the total, dropping the newest basket ids while it
    /// overflows.
    fn recompute_total(&mut self) {
        loop {
            if let Some(total) = self.checked_total() {
                self.order.total = total;
                return;
            }
            if self.order.items.pop().is_none() {
                self.order.total = Money::zero();
                return;
            }
        }
    }

    fn item(&self, product: &Product) -> ProductItem {
        ProductItem {
            product: product.clone(),
            in_basket: self.order.items.contains(&product.id),
        }
    }

    fn basket(&self) -> BasketSummary {
        let lines = self
            .order
            .items
            .iter()
            .filter_map(|id| self.find(id))
            .enumerate()
            .map(|(i, product)| BasketLine {
                index: i + 1,
                id: product.id.clone(),
                title: product.title.clone(),
                price: product.price,
            })
            .collect();

        BasketSummary {
            lines,
            total: self.order.total,
        }
    }
}

/// The application state.
///
/// Shared as `Rc<AppState>`; every method takes `&self`.
#[derive(Debug)]
pub struct AppState {
    data: RefCell<StateData>,
    events: EventBus,
}

impl AppState {
    pub fn new(events: EventBus) -> Self {
        AppState {
            data: RefCell::new(StateData::default()),
            events,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Replaces the catalog.
    ///
    /// Basket ids that vanished from the catalog or lost their price are
    /// dropped; if that happens `basket:changed` follows `items:changed`.
    pub fn set_catalog(&self, products: Vec<Product>) {
        let (items, pruned) = {
            let mut data = self.data.borrow_mut();
            data.catalog = products;

            let StateData { catalog, order, .. } = &mut *data;
            let before = order.items.len();
            order
                .items
                .retain(|id| catalog.iter().any(|p| &p.id == id && p.is_for_sale()));
            data.recompute_total();
            let pruned = data.order.items.len() != before;

            let items: Vec<ProductItem> = data.catalog.iter().map(|p| data.item(p)).collect();
            (items, pruned)
        };

        debug!(products = items.len(), pruned, "catalog set");
        self.events.emit(names::ITEMS_CHANGED, Payload::Catalog(items));
        if pruned {
            self.emit_basket();
        }
    }

    pub fn catalog_items(&self) -> Vec<ProductItem> {
        let data = self.data.borrow();
        data.catalog.iter().map(|p| data.item(p)).collect()
    }

    pub fn product(&self, id: &str) -> Option<ProductItem> {
        let data = self.data.borrow();
        data.find(id).map(|p| data.item(p))
    }

    // =========================================================================
    // Preview
    // =========================================================================

    /// Makes `id` the product shown in the detail modal.
    pub fn set_preview(&self, id: &str) -> CoreResult<()> {
        let item = {
            let mut data = self.data.borrow_mut();
            let product = data
                .find(id)
                .cloned()
                .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
            data.preview = Some(product.id.clone());
            data.item(&product)
        };

        debug!(id, "preview set");
        self.events.emit(names::PREVIEW_CHANGED, Payload::Product(item));
        Ok(())
    }

    pub fn preview(&self) -> Option<ProductItem> {
        let data = self.data.borrow();
        let id = data.preview.as_deref()?;
        data.find(id).map(|p| data.item(p))
    }

    // =========================================================================
    // Basket
    // =========================================================================

    /// Puts a product in the basket.
    ///
    /// ## Behavior
    /// - Unknown id: `ProductNotFound`
    /// - No price: `NotForSale`, basket unchanged
    /// - Total would overflow: `TotalOverflow`, basket unchanged
    /// - Already in basket: no-op, no event
    pub fn add_to_basket(&self, id: &str) -> CoreResult<()> {
        {
            let mut data = self.data.borrow_mut();
            let product = data
                .find(id)
                .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
            let Some(price) = product.price else {
                return Err(CoreError::NotForSale(id.to_string()));
            };
            if data.order.items.iter().any(|item| item == id) {
                return Ok(());
            }
            let total = data
                .order
                .total
                .checked_add(price)
                .ok_or_else(|| CoreError::TotalOverflow(id.to_string()))?;
            data.order.items.push(id.to_string());
            data.order.total = total;
        }

        debug!(id, "added to basket");
        self.emit_basket();
        Ok(())
    }

    /// Takes a product out of the basket. Non-members are ignored.
    pub fn remove_from_basket(&self, id: &str) {
        let removed = {
            let mut data = self.data.borrow_mut();
            let before = data.order.items.len();
            data.order.items.retain(|item| item != id);
            let removed = data.order.items.len() != before;
            if removed {
                data.recompute_total();
            }
            removed
        };

        if removed {
            debug!(id, "removed from basket");
            self.emit_basket();
        }
    }

    /// Adds the product if absent, removes it if present.
    pub fn toggle_basket(&self, id: &str) -> CoreResult<()> {
        if self.is_in_basket(id) {
            self.remove_from_basket(id);
            Ok(())
        } else {
            self.add_to_basket(id)
        }
    }

    pub fn clear_basket(&self) {
        {
            let mut data = self.data.borrow_mut();
            data.order.items.clear();
            data.recompute_total();
        }

        debug!("basket cleared");
        self.emit_basket();
    }

    pub fn is_in_basket(&self, id: &str) -> bool {
        self.data.borrow().order.items.iter().any(|item| item == id)
    }

    pub fn basket(&self) -> BasketSummary {
        self.data.borrow().basket()
    }

    pub fn basket_lines(&self) -> Vec<BasketLine> {
        self.basket().lines
    }

    pub fn basket_count(&self) -> usize {
        self.data.borrow().order.items.len()
    }

    pub fn total(&self) -> Money {
        self.data.borrow().order.total
    }

    fn emit_basket(&self) {
        let summary = self.basket();
        self.events.emit(names::BASKET_CHANGED, Payload::Basket(summary));
    }

    // =========================================================================
    // Order Draft
    // =========================================================================

    /// Stores a form value and revalidates the step it belongs to.
    ///
    /// Returns whether that step is now submittable.
    pub fn set_order_field(&self, field: OrderField, value: &str) -> bool {
        self.data.borrow_mut().order.set_field(field, value);
        debug!(%field, "order field set");
        self.validate_step(field.step())
    }

    /// Revalidates address + payment and emits `formErrors.order:change`.
    pub fn validate_delivery(&self) -> bool {
        self.validate_step(CheckoutStep::Delivery)
    }

    /// Revalidates email + phone and emits `formErrors.contacts:change`.
    pub fn validate_contacts(&self) -> bool {
        self.validate_step(CheckoutStep::Contacts)
    }

    /// Recomputes the error map for `step`, stores it and announces it.
    ///
    /// The event fires whether or not there are errors.
    pub fn validate_step(&self, step: CheckoutStep) -> bool {
        let errors = {
            let mut data = self.data.borrow_mut();
            let errors = validate_step(&data.order, step);
            data.form_errors = errors.clone();
            errors
        };

        let valid = errors.is_empty();
        let name = match step {
            CheckoutStep::Delivery => names::DELIVERY_ERRORS_CHANGED,
            CheckoutStep::Contacts => names::CONTACTS_ERRORS_CHANGED,
        };
        self.events.emit(name, Payload::Errors(errors));
        valid
    }

    pub fn form_errors(&self) -> FormErrors {
        self.data.borrow().form_errors.clone()
    }

    pub fn order(&self) -> OrderDraft {
        self.data.borrow().order.clone()
    }

    /// Builds the `POST /order` body from the draft.
    ///
    /// Fails if the basket is empty or either checkout step is incomplete.
    pub fn order_request(&self) -> CoreResult<OrderRequest> {
        let data = self.data.borrow();
        let order = &data.order;

        if order.items.is_empty() {
            return Err(CoreError::EmptyBasket);
        }
        for step in [CheckoutStep::Delivery, CheckoutStep::Contacts] {
            if let Some(error) = validate_step(order, step).first() {
                return Err(error.into());
            }
        }
        let Some(payment) = order.payment else {
            return Err(ValidationError::Required(OrderField::Payment).into());
        };

        Ok(OrderRequest {
            payment,
            email: order.email.clone(),
            phone: order.phone.clone(),
            address: order.address.clone(),
            total: order.total,
            items: order.items.clone(),
        })
    }

    /// Finishes checkout: empties the basket, resets the draft.
    ///
    /// Emits `basket:changed` for the emptied basket, then `order:success`.
    pub fn complete_order(&self, result: OrderResult) {
        {
            let mut data = self.data.borrow_mut();
            data.order = OrderDraft::default();
            data.form_errors = FormErrors::new();
        }

        debug!(order_id = %result.id, "order completed");
        self.emit_basket();
        self.events.emit(names::ORDER_SUCCESS, Payload::OrderPlaced(result));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
