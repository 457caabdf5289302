//! # View Components
//!
//! Each view owns a subtree cloned from a template and patches only the
//! nodes its setters touch. Views never read application state; they are
//! handed resolved render data and emit intent events carrying an id at most.
//!
//! ```text
//! ┌──────────────┬──────────────────────────┬────────────────────────────┐
//! │ View         │ Render data              │ Emits                      │
//! ├──────────────┼──────────────────────────┼────────────────────────────┤
//! │ Page         │ PageData                 │ basket:open                │
//! │ Card         │ CardData                 │ product:select /           │
//! │              │                          │ preview:toggle             │
//! │ Basket       │ BasketSummary            │ basket:remove, order:open  │
//! │ OrderForm    │ OrderFormData            │ order.<field>:change,      │
//! │              │                          │ order:submit               │
//! │ ContactsForm │ ContactsFormData         │ contacts.<field>:change,   │
//! │              │                          │ contacts:submit            │
//! │ Modal        │ Element (content)        │ modal:open, modal:close    │
//! │ Success      │ SuccessData              │ success:close              │
//! └──────────────┴──────────────────────────┴────────────────────────────┘
//! ```

pub mod basket;
pub mod card;
pub mod contacts;
pub mod form;
pub mod modal;
pub mod order;
pub mod page;
pub mod success;

pub use basket::Basket;
pub use card::{Card, CardData};
pub use contacts::{ContactsForm, ContactsFormData};
pub use form::{Form, FormState};
pub use modal::Modal;
pub use order::{OrderForm, OrderFormData};
pub use page::{Page, PageData};
pub use success::{Success, SuccessData};

use crate::dom::Element;

/// A view that can be rendered from data into its container.
pub trait Component {
    type Data;

    /// Root element of the view.
    fn container(&self) -> &Element;

    /// Applies `data` and returns the container.
    fn render(&self, data: Self::Data) -> Element;
}
