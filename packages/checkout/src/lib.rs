//! # MiniSite Checkout
//!
//! Lead capture for product and button blocks with checkout enabled.
//!
//! ```text
//! OpenCheckout action ──► CheckoutForm (Personal → Address → Review)
//!                                  │ submit
//!                                  ▼
//!                          Checkout Guard ──► Navigator
//!                                  │
//!                    ThankYou │ Redirect(url + lead fields) │ CheckoutError
//! ```

mod form;
mod format;
mod guard;

pub use form::{CheckoutForm, CheckoutStep, FormError, ProfileField};
pub use format::{digits, format_phone, format_postal_code, format_tax_id};
pub use guard::{
    checkout_target, complete_checkout, CheckoutError, CheckoutOutcome, Navigator,
    ALLOWED_SCHEMES, LEAD_EVENT,
};
pub use minisite_document::CheckoutProfile;
