//! Order workflow.
//!
//! Orchestrates cart mutation, total computation, display formatting, and
//! the checkout-to-persistence transition. Collaborators are injected as
//! trait implementations at construction time; production wiring lives in
//! [`crate::state::AppState`], tests supply in-memory fakes.

mod error;

pub use error::OrderError;

use std::fmt::Write as _;

use rust_decimal::Decimal;
use tracing::instrument;

use eshop_core::{Cart, Good, Order, OrderId};

use crate::db::RepositoryError;
use crate::models::SessionState;
use crate::services::email::EmailError;

/// Header prepended to the chosen-goods listing.
pub const CHOSEN_GOODS_HEADER: &str = "You have already chosen:\n\n";

/// Header sentinel returned while no order has been placed.
pub const ORDER_NOT_PLACED: &str = "your order not placed yet\n";

/// Header returned for a placed order.
pub const ORDER_HEADER: &str = "your order:\n";

/// Resolves a selection token to a catalog good.
pub trait GoodCatalog {
    /// Resolve `token` to the good it names.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the token does not map to a
    /// catalog entry.
    async fn resolve(&self, token: &str) -> Result<Good, RepositoryError>;
}

/// Persists and retrieves order records.
pub trait OrderStore {
    /// Persist `order`, returning it with a store-assigned identifier.
    async fn save(&self, order: Order) -> Result<Order, RepositoryError>;

    /// Fetch one order by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no such order exists.
    async fn get_by_id(&self, id: OrderId) -> Result<Order, RepositoryError>;

    /// Fetch all persisted orders.
    async fn get_all(&self) -> Result<Vec<Order>, RepositoryError>;
}

/// Sends the order-confirmation message.
pub trait NotificationSender {
    /// Send a confirmation for the persisted order `order_id` to its owner.
    async fn send_order_confirmation(
        &self,
        order_id: OrderId,
        owner_login: &str,
    ) -> Result<(), EmailError>;
}

/// The order workflow.
///
/// Generic over its collaborators so the checkout path can be exercised
/// without a database or an SMTP relay.
pub struct OrderWorkflow<C, S, N> {
    catalog: C,
    store: S,
    notifier: N,
}

impl<C, S, N> OrderWorkflow<C, S, N>
where
    C: GoodCatalog,
    S: OrderStore,
    N: NotificationSender,
{
    /// Create a workflow over the given collaborators.
    pub const fn new(catalog: C, store: S, notifier: N) -> Self {
        Self {
            catalog,
            store,
            notifier,
        }
    }

    /// Resolve a selection token and append the good to the cart.
    ///
    /// Repeated selections append repeated entries. On lookup failure the
    /// cart is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::GoodNotFound`] if the token is unresolvable.
    #[instrument(skip(self, cart))]
    pub async fn add_item(&self, token: &str, cart: &mut Cart) -> Result<(), OrderError> {
        let good = self.resolve_token(token).await?;
        cart.push(good);

        tracing::info!(items = cart.len(), "good added to cart");
        Ok(())
    }

    /// Resolve a selection token and remove the first matching cart entry.
    ///
    /// Silently does nothing when no entry matches. On lookup failure the
    /// cart is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::GoodNotFound`] if the token is unresolvable.
    #[instrument(skip(self, cart))]
    pub async fn remove_item(&self, token: &str, cart: &mut Cart) -> Result<(), OrderError> {
        let good = self.resolve_token(token).await?;
        let removed = cart.remove_first(&good);

        tracing::info!(
            title = %good.title,
            removed,
            items = cart.len(),
            "good removal handled"
        );
        Ok(())
    }

    /// Exact decimal sum of all item prices. Zero for an empty cart.
    #[must_use]
    pub fn total_price(&self, cart: &Cart) -> Decimal {
        cart.total()
    }

    /// Convert the cart into an order.
    ///
    /// A zero total is a silent no-op: the returned order is transient
    /// (no identifier), nothing is persisted, and no notification is sent.
    /// Otherwise the order is saved inside a store transaction and a
    /// confirmation is sent with the assigned identifier. Notification
    /// failure is logged and swallowed - the order stays persisted.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Repository`] if the save fails; the
    /// notification step is then never reached.
    #[instrument(skip(self, cart))]
    pub async fn checkout(
        &self,
        cart: &Cart,
        owner_login: &str,
        total_price: Decimal,
    ) -> Result<Order, OrderError> {
        let order = Order::from_cart(cart, owner_login, total_price);

        if total_price.is_zero() {
            return Ok(order);
        }

        let order = self.store.save(order).await?;

        tracing::info!(
            order_id = ?order.id,
            owner = %order.owner_login,
            total = %order.total_price,
            "new order persisted"
        );

        if let Some(id) = order.id {
            if let Err(e) = self
                .notifier
                .send_order_confirmation(id, owner_login)
                .await
            {
                // Best-effort: the order stays persisted even when the
                // confirmation cannot be delivered.
                tracing::warn!(order_id = %id, error = %e, "confirmation email failed");
            }
        }

        Ok(order)
    }

    /// Fetch one persisted order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::OrderNotFound`] if no such order exists.
    pub async fn order_by_id(&self, id: OrderId) -> Result<Order, OrderError> {
        self.store.get_by_id(id).await.map_err(|e| match e {
            RepositoryError::NotFound => OrderError::OrderNotFound(id),
            other => OrderError::Repository(other),
        })
    }

    /// Fetch all persisted orders.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Repository`] if the store fails.
    pub async fn orders(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.store.get_all().await?)
    }

    /// Numbered one-item-per-line listing of the cart, with header.
    ///
    /// Returns the [`crate::models::session::NO_ORDER_YET`] sentinel for an
    /// empty cart.
    #[must_use]
    pub fn chosen_goods_text(&self, cart: &Cart) -> String {
        if cart.is_empty() {
            return crate::models::session::NO_ORDER_YET.to_owned();
        }

        let mut text = CHOSEN_GOODS_HEADER.to_owned();
        text.push_str(&format_items(cart));
        text
    }

    /// The cart listing without the header line. Empty string for an empty
    /// cart.
    #[must_use]
    pub fn order_body_text(&self, cart: &Cart) -> String {
        if cart.is_empty() {
            return String::new();
        }

        format_items(cart)
    }

    /// Header for the order summary: a "not placed" sentinel while the
    /// total is zero.
    #[must_use]
    pub fn order_header(&self, total_price: Decimal) -> &'static str {
        if total_price.is_zero() {
            ORDER_NOT_PLACED
        } else {
            ORDER_HEADER
        }
    }

    /// Clear the session cart and restore the display fields to their
    /// defaults. Used after checkout or cancellation.
    pub fn reset_cart(&self, session: &mut SessionState) {
        session.cart.clear();
        session.reset_display();
    }

    /// Snapshot of the session cart. Read-only: the session itself is not
    /// modified.
    #[must_use]
    pub fn load_cart(&self, session: &SessionState) -> Cart {
        session.cart.clone()
    }

    async fn resolve_token(&self, token: &str) -> Result<Good, OrderError> {
        self.catalog.resolve(token).await.map_err(|e| match e {
            RepositoryError::NotFound => OrderError::GoodNotFound(token.to_owned()),
            other => OrderError::Repository(other),
        })
    }
}

/// Render the numbered `"{n}) {title} {price} $"` lines for a cart.
fn format_items(cart: &Cart) -> String {
    let mut text = String::new();

    for (count, good) in cart.goods.iter().enumerate() {
        // Infallible for String targets.
        let _ = writeln!(text, "{}) {} {} $", count + 1, good.title, good.price);
    }

    text
}
