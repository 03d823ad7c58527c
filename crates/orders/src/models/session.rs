//! Typed per-session state.
//!
//! The session holds the pre-checkout cart plus a fixed set of display
//! strings the UI renders verbatim. Explicit fields with defaults replace a
//! stringly-keyed attribute bag, so a missing attribute cannot be observed.

use serde::{Deserialize, Serialize};

use eshop_core::Cart;

/// Sentinel shown while the cart is empty.
pub const NO_ORDER_YET: &str = "Make your order\n";

/// Session-scoped state for one user.
///
/// Serde-serializable so it can live in any session store. `Default` is the
/// initial UI state; [`SessionState::reset_display`] restores it in place
/// after checkout or cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// The pre-checkout cart. Empty by default, cleared on reset.
    pub cart: Cart,
    /// Rendered listing of chosen goods, or [`NO_ORDER_YET`].
    pub chosen_goods: String,
    /// Error shown when checkout is attempted with no order.
    pub no_order_error: String,
    /// Name of an attachment chosen without a file name.
    pub chosen_file_without_name: String,
    /// Header line for the attachment section.
    pub file_header: String,
    /// Error shown when an attachment lacks a file name.
    pub file_without_name_error: String,
    /// Error shown when an attachment upload fails.
    pub file_upload_error: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            cart: Cart::new(),
            chosen_goods: NO_ORDER_YET.to_owned(),
            no_order_error: String::new(),
            chosen_file_without_name: String::new(),
            file_header: String::new(),
            file_without_name_error: String::new(),
            file_upload_error: String::new(),
        }
    }
}

impl SessionState {
    /// Restore every display field to its default sentinel, keeping the
    /// (cleared) cart in place.
    pub fn reset_display(&mut self) {
        self.chosen_goods = NO_ORDER_YET.to_owned();
        self.no_order_error.clear();
        self.chosen_file_without_name.clear();
        self.file_header.clear();
        self.file_without_name_error.clear();
        self.file_upload_error.clear();
    }
}
