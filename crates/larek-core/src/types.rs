//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   OrderDraft    │   │  OrderRequest   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  address        │   │  (wire body of  │       │
//! │  │  title          │   │  payment        │   │   POST /order)  │       │
//! │  │  category       │   │  email, phone   │   │                 │       │
//! │  │  price (opt)    │   │  items, total   │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductItem    │   │   BasketLine    │   │ PaymentMethod   │       │
//! │  │  product +      │   │  index, id,     │   │  Card           │       │
//! │  │  in_basket      │   │  title, price   │   │  Cash           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog product as served by the API.
///
/// `price == None` means the product is not for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub price: Option<Money>,
}

impl Product {
    /// Creates a product with empty description, image and category.
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: Option<Money>) -> Self {
        Product {
            id: id.into(),
            description: String::new(),
            image: String::new(),
            title: title.into(),
            category: String::new(),
            price,
        }
    }

    /// Whether the product can be put in the basket.
    #[inline]
    pub fn is_for_sale(&self) -> bool {
        self.price.is_some()
    }
}

/// A catalog product together with its derived basket flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductItem {
    pub product: Product,
    pub in_basket: bool,
}

/// One row of the basket list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketLine {
    /// 1-based position in the basket.
    pub index: usize,
    pub id: String,
    pub title: String,
    pub price: Option<Money>,
}

/// Basket contents as carried by `basket:changed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasketSummary {
    pub lines: Vec<BasketLine>,
    pub total: Money,
}

impl BasketSummary {
    pub fn count(&self) -> usize {
        self.lines.len()
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Online card payment.
    Card,
    /// Cash on delivery.
    Cash,
}

impl PaymentMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(PaymentMethod::Card),
            "cash" => Ok(PaymentMethod::Cash),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order Fields
// =============================================================================

/// Which checkout step a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutStep {
    /// First step: address + payment.
    Delivery,
    /// Second step: email + phone.
    Contacts,
}

/// An editable order field.
///
/// Variant order is the order messages appear in a form's error line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Address,
    Payment,
    Email,
    Phone,
}

impl OrderField {
    pub const DELIVERY: [OrderField; 2] = [OrderField::Address, OrderField::Payment];
    pub const CONTACTS: [OrderField; 2] = [OrderField::Email, OrderField::Phone];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderField::Payment => "payment",
            OrderField::Address => "address",
            OrderField::Email => "email",
            OrderField::Phone => "phone",
        }
    }

    pub const fn step(&self) -> CheckoutStep {
        match self {
            OrderField::Payment | OrderField::Address => CheckoutStep::Delivery,
            OrderField::Email | OrderField::Phone => CheckoutStep::Contacts,
        }
    }
}

impl FromStr for OrderField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(OrderField::Payment),
            "address" => Ok(OrderField::Address),
            "email" => Ok(OrderField::Email),
            "phone" => Ok(OrderField::Phone),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// In-progress checkout form state.
///
/// ## Invariants (kept by `AppState`)
/// - `items` holds each id at most once
/// - `total` equals the sum of the current prices of `items`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderDraft {
    pub address: String,
    pub payment: Option<PaymentMethod>,
    pub email: String,
    pub phone: String,
    pub items: Vec<String>,
    pub total: Money,
}

impl OrderDraft {
    /// Returns the raw value of a field as the forms display it.
    pub fn field(&self, field: OrderField) -> &str {
        match field {
            OrderField::Payment => self.payment.map(|p| p.as_str()).unwrap_or(""),
            OrderField::Address => &self.address,
            OrderField::Email => &self.email,
            OrderField::Phone => &self.phone,
        }
    }

    /// Stores a raw form value. Unknown payment strings clear the choice.
    pub fn set_field(&mut self, field: OrderField, value: &str) {
        match field {
            OrderField::Payment => self.payment = value.parse().ok(),
            OrderField::Address => self.address = value.to_string(),
            OrderField::Email => self.email = value.to_string(),
            OrderField::Phone => self.phone = value.to_string(),
        }
    }
}

/// Body of `POST /order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub payment: PaymentMethod,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub total: Money,
    pub items: Vec<String>,
}

/// Successful response of `POST /order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: String,
    #[serde(default)]
    pub total: Option<Money>,
}

// =============================================================================
// Unit Tests
// =============================================================================
