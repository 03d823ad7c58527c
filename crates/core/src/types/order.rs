//! Persisted checkout record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Cart, Good, OrderId};

/// A checkout record.
///
/// Built from a [`Cart`] at checkout time and immutable thereafter, except
/// for identifier assignment by the order store. An order with `id: None` is
/// transient - it exists for display only and was never persisted. Orders
/// are never persisted with a zero total price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned identifier. `None` until (and unless) persisted.
    pub id: Option<OrderId>,
    /// Login of the user who placed the order.
    pub owner_login: String,
    /// Exact decimal total of all item prices.
    pub total_price: Decimal,
    /// Line items, in cart order.
    pub items: Vec<Good>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build a transient order from cart contents.
    ///
    /// The store assigns an identifier on save; until then `id` is `None`.
    #[must_use]
    pub fn from_cart(cart: &Cart, owner_login: &str, total_price: Decimal) -> Self {
        Self {
            id: None,
            owner_login: owner_login.to_owned(),
            total_price,
            items: cart.goods.clone(),
            created_at: Utc::now(),
        }
    }

    /// Whether this order has been persisted (identifier assigned).
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cart_is_transient() {
        let mut cart = Cart::new();
        cart.push(Good::new("Book".to_owned(), Decimal::new(1000, 2)));

        let order = Order::from_cart(&cart, "alice", cart.total());
        assert!(!order.is_persisted());
        assert_eq!(order.owner_login, "alice");
        assert_eq!(order.total_price, Decimal::new(1000, 2));
        assert_eq!(order.items, cart.goods);
    }
}
