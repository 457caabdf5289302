//! # Validation Module
//!
//! Checkout step validation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Two-Step Checkout                                  │
//! │                                                                         │
//! │  Step 1: Delivery (form "order")                                       │
//! │  ├── address  ── must be non-empty                                     │
//! │  └── payment  ── must be chosen                                        │
//! │           │                                                             │
//! │           ▼  (submit enabled only when FormErrors is empty)             │
//! │  Step 2: Contacts (form "contacts")                                    │
//! │  ├── email    ── must be non-empty                                     │
//! │  └── phone    ── must be non-empty                                     │
//! │                                                                         │
//! │  Every field change recomputes the map for its step.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::types::{CheckoutStep, OrderDraft, OrderField};

/// Field -> message map for one checkout step. Empty means submittable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors(BTreeMap<OrderField, ValidationError>);

impl FormErrors {
    pub fn new() -> Self {
        FormErrors(BTreeMap::new())
    }

    pub fn insert(&mut self, error: ValidationError) {
        let ValidationError::Required(field) = error;
        self.0.insert(field, error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: OrderField) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: OrderField) -> bool {
        self.0.contains_key(&field)
    }

    /// The first error in field order, if any.
    pub fn first(&self) -> Option<ValidationError> {
        self.0.values().next().copied()
    }

    /// Messages joined the way the form error line shows them.
    pub fn summary(&self) -> String {
        self.0
            .values()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validates one field of the draft.
pub fn validate_field(draft: &OrderDraft, field: OrderField) -> Result<(), ValidationError> {
    let missing = match field {
        OrderField::Payment => draft.payment.is_none(),
        OrderField::Address => draft.address.is_empty(),
        OrderField::Email => draft.email.is_empty(),
        OrderField::Phone => draft.phone.is_empty(),
    };

    if missing {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

/// Recomputes the error map for one checkout step.
pub fn validate_step(draft: &OrderDraft, step: CheckoutStep) -> FormErrors {
    let fields: &[OrderField] = match step {
        CheckoutStep::Delivery => &OrderField::DELIVERY,
        CheckoutStep::Contacts => &OrderField::CONTACTS,
    };

    let mut errors = FormErrors::new();
    for field in fields {
        if let Err(e) = validate_field(draft, *field) {
            errors.insert(e);
        }
    }
    errors
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;

    #[test]
    fn test_empty_draft_fails_both_steps() {
        let draft = OrderDraft::default();

        let delivery = validate_step(&draft, CheckoutStep::Delivery);
        assert_eq!(delivery.len(), 2);
        assert!(delivery.contains(OrderField::Address));
        assert!(delivery.contains(OrderField::Payment));

        let contacts = validate_step(&draft, CheckoutStep::Contacts);
        assert_eq!(contacts.len(), 2);
    }

    #[test]
    fn test_delivery_valid_iff_address_and_payment() {
        let mut draft = OrderDraft {
            address: "Moscow".to_string(),
            ..OrderDraft::default()
        };
        assert!(!validate_step(&draft, CheckoutStep::Delivery).is_empty());

        draft.payment = Some(PaymentMethod::Card);
        assert!(validate_step(&draft, CheckoutStep::Delivery).is_empty());

        draft.address.clear();
        let errors = validate_step(&draft, CheckoutStep::Delivery);
        assert_eq!(errors.summary(), "Необходимо указать адрес");
    }

    #[test]
    fn test_contacts_valid_iff_email_and_phone() {
        let mut draft = OrderDraft {
            email: "a@b.c".to_string(),
            ..OrderDraft::default()
        };
        let errors = validate_step(&draft, CheckoutStep::Contacts);
        assert_eq!(errors.first(), Some(ValidationError::Required(OrderField::Phone)));

        draft.phone = "+7".to_string();
        assert!(validate_step(&draft, CheckoutStep::Contacts).is_empty());
    }

    #[test]
    fn test_summary_joins_in_field_order() {
        let errors = validate_step(&OrderDraft::default(), CheckoutStep::Contacts);
        assert_eq!(
            errors.summary(),
            "Необходимо указать email; Необходимо указать телефон"
        );
    }

    #[test]
    fn test_delivery_summary_lists_address_first() {
        let errors = validate_step(&OrderDraft::default(), CheckoutStep::Delivery);
        assert_eq!(
            errors.summary(),
            "Необходимо указать адрес; Необходимо указать способ оплаты"
        );
        assert_eq!(errors.first(), Some(ValidationError::Required(OrderField::Address)));
    }
}
