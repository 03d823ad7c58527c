//! Session-scoped shopping cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Good;

/// The pre-checkout shopping cart.
///
/// An ordered, mutable collection of [`Good`] entries held in per-session
/// state. An empty cart is valid; the cart is cleared (not destroyed) after
/// checkout and reused across the session indefinitely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Selected goods, in selection order. Repeated selections append
    /// repeated entries.
    pub goods: Vec<Good>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { goods: Vec::new() }
    }

    /// Append a good to the cart. Duplicates are not suppressed.
    pub fn push(&mut self, good: Good) {
        self.goods.push(good);
    }

    /// Remove the first entry equal to `good` (by title and price).
    ///
    /// Returns `true` if an entry was removed, `false` if no entry matched.
    pub fn remove_first(&mut self, good: &Good) -> bool {
        match self.goods.iter().position(|g| g == good) {
            Some(pos) => {
                self.goods.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Whether the cart holds no goods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goods.is_empty()
    }

    /// Number of goods in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.goods.len()
    }

    /// Remove all goods, leaving the cart reusable.
    pub fn clear(&mut self) {
        self.goods.clear();
    }

    /// Exact decimal sum of all item prices. Zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.goods.iter().map(|g| g.price).sum()
    }
}
