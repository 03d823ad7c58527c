//! Scenario tests for the order workflow.
//!
//! These tests exercise the cart-to-order lifecycle against in-memory
//! collaborators: a static catalog, a recording order store, and a
//! recording notifier. No database or SMTP relay is required.

use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, Ordering},
};

use rust_decimal::Decimal;

use eshop_core::{Cart, Good, Order, OrderId};
use eshop_orders::db::RepositoryError;
use eshop_orders::models::SessionState;
use eshop_orders::models::session::NO_ORDER_YET;
use eshop_orders::services::email::EmailError;
use eshop_orders::services::order::{
    CHOSEN_GOODS_HEADER, GoodCatalog, NotificationSender, ORDER_HEADER, ORDER_NOT_PLACED,
    OrderError, OrderStore, OrderWorkflow,
};

// =============================================================================
// In-memory collaborators
// =============================================================================

/// Shared log of collaborator calls, for asserting call order.
type EventLog = Arc<Mutex<Vec<&'static str>>>;

/// Catalog with a fixed token -> good mapping.
#[derive(Clone, Default)]
struct StaticCatalog {
    goods: HashMap<String, Good>,
}

impl StaticCatalog {
    fn with(mut self, token: &str, good: Good) -> Self {
        self.goods.insert(token.to_owned(), good);
        self
    }
}

impl GoodCatalog for StaticCatalog {
    async fn resolve(&self, token: &str) -> Result<Good, RepositoryError> {
        self.goods
            .get(token)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

/// Store that records saves in memory and assigns sequential ids.
#[derive(Clone)]
struct RecordingStore {
    orders: Arc<Mutex<Vec<Order>>>,
    next_id: Arc<AtomicI64>,
    events: EventLog,
}

impl RecordingStore {
    fn new(events: EventLog) -> Self {
        Self {
            orders: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            events,
        }
    }

    fn saved(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }
}

impl OrderStore for RecordingStore {
    async fn save(&self, order: Order) -> Result<Order, RepositoryError> {
        self.events.lock().unwrap().push("save");

        let id = OrderId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let order = Order {
            id: Some(id),
            ..order
        };
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Order, RepositoryError> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == Some(id))
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(self.saved())
    }
}

/// Store whose save always fails, simulating an unavailable database.
///
/// Records the attempted save in the event log so tests can prove the
/// write was reached before the failure.
#[derive(Clone)]
struct FailingStore {
    events: EventLog,
}

impl OrderStore for FailingStore {
    async fn save(&self, _order: Order) -> Result<Order, RepositoryError> {
        self.events.lock().unwrap().push("save");
        Err(RepositoryError::Database(sqlx::Error::PoolClosed))
    }

    async fn get_by_id(&self, _id: OrderId) -> Result<Order, RepositoryError> {
        Err(RepositoryError::Database(sqlx::Error::PoolClosed))
    }

    async fn get_all(&self) -> Result<Vec<Order>, RepositoryError> {
        Err(RepositoryError::Database(sqlx::Error::PoolClosed))
    }
}

/// Notifier that records confirmations, optionally failing every send.
#[derive(Clone)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(OrderId, String)>>>,
    fail: bool,
    events: EventLog,
}

impl RecordingNotifier {
    fn new(events: EventLog) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: false,
            events,
        }
    }

    fn failing(events: EventLog) -> Self {
        Self {
            fail: true,
            ..Self::new(events)
        }
    }

    fn confirmations(&self) -> Vec<(OrderId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationSender for RecordingNotifier {
    async fn send_order_confirmation(
        &self,
        order_id: OrderId,
        owner_login: &str,
    ) -> Result<(), EmailError> {
        self.events.lock().unwrap().push("notify");

        if self.fail {
            return Err(EmailError::InvalidAddress(owner_login.to_owned()));
        }

        self.sent
            .lock()
            .unwrap()
            .push((order_id, owner_login.to_owned()));
        Ok(())
    }
}

// =============================================================================
// Test fixtures
// =============================================================================

fn good(title: &str, cents: i64) -> Good {
    Good::new(title.to_owned(), Decimal::new(cents, 2))
}

fn catalog() -> StaticCatalog {
    StaticCatalog::default()
        .with("1", good("Book", 1000))
        .with("2", good("Pen", 200))
}

type TestWorkflow = OrderWorkflow<StaticCatalog, RecordingStore, RecordingNotifier>;

fn workflow() -> (TestWorkflow, RecordingStore, RecordingNotifier, EventLog) {
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));
    let store = RecordingStore::new(Arc::clone(&events));
    let notifier = RecordingNotifier::new(Arc::clone(&events));
    let workflow = OrderWorkflow::new(catalog(), store.clone(), notifier.clone());
    (workflow, store, notifier, events)
}

// =============================================================================
// Cart mutation
// =============================================================================

#[tokio::test]
async fn test_add_item_appends_resolved_good() {
    let (workflow, _, _, _) = workflow();
    let mut cart = Cart::new();

    workflow.add_item("1", &mut cart).await.unwrap();

    assert_eq!(cart.goods, vec![good("Book", 1000)]);
}

#[tokio::test]
async fn test_add_item_keeps_duplicates() {
    let (workflow, _, _, _) = workflow();
    let mut cart = Cart::new();

    workflow.add_item("2", &mut cart).await.unwrap();
    workflow.add_item("2", &mut cart).await.unwrap();

    assert_eq!(cart.goods, vec![good("Pen", 200), good("Pen", 200)]);
}

#[tokio::test]
async fn test_add_item_unresolvable_token_leaves_cart_unchanged() {
    let (workflow, _, _, _) = workflow();
    let mut cart = Cart::new();
    workflow.add_item("1", &mut cart).await.unwrap();

    let err = workflow.add_item("99", &mut cart).await.unwrap_err();

    assert!(matches!(err, OrderError::GoodNotFound(token) if token == "99"));
    assert_eq!(cart.len(), 1);
}

#[tokio::test]
async fn test_remove_item_is_inverse_of_add_item() {
    let (workflow, _, _, _) = workflow();
    let mut cart = Cart::new();
    workflow.add_item("1", &mut cart).await.unwrap();
    let before = cart.clone();

    workflow.add_item("2", &mut cart).await.unwrap();
    workflow.remove_item("2", &mut cart).await.unwrap();

    assert_eq!(cart, before);
}

#[tokio::test]
async fn test_remove_item_absent_good_is_noop() {
    let (workflow, _, _, _) = workflow();
    let mut cart = Cart::new();
    workflow.add_item("1", &mut cart).await.unwrap();

    workflow.remove_item("2", &mut cart).await.unwrap();

    assert_eq!(cart.goods, vec![good("Book", 1000)]);
}

#[tokio::test]
async fn test_remove_item_unresolvable_token_is_an_error() {
    let (workflow, _, _, _) = workflow();
    let mut cart = Cart::new();
    workflow.add_item("1", &mut cart).await.unwrap();

    let err = workflow.remove_item("nope", &mut cart).await.unwrap_err();

    assert!(matches!(err, OrderError::GoodNotFound(_)));
    assert_eq!(cart.len(), 1);
}

// =============================================================================
// Totals
// =============================================================================

#[tokio::test]
async fn test_total_price_is_decimal_sum() {
    let (workflow, _, _, _) = workflow();
    let mut cart = Cart::new();
    workflow.add_item("1", &mut cart).await.unwrap();
    workflow.add_item("2", &mut cart).await.unwrap();
    workflow.add_item("2", &mut cart).await.unwrap();

    assert_eq!(workflow.total_price(&cart), Decimal::new(1400, 2));
}

#[tokio::test]
async fn test_total_price_of_empty_cart_is_zero() {
    let (workflow, _, _, _) = workflow();

    assert_eq!(workflow.total_price(&Cart::new()), Decimal::ZERO);
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_zero_total_is_a_silent_noop() {
    let (workflow, store, notifier, _) = workflow();
    let cart = Cart::new();

    let order = workflow
        .checkout(&cart, "alice@example.com", Decimal::ZERO)
        .await
        .unwrap();

    assert!(!order.is_persisted());
    assert_eq!(order.owner_login, "alice@example.com");
    assert!(store.saved().is_empty());
    assert!(notifier.confirmations().is_empty());
}

#[tokio::test]
async fn test_checkout_persists_then_notifies_exactly_once() {
    let (workflow, store, notifier, events) = workflow();
    let mut cart = Cart::new();
    workflow.add_item("1", &mut cart).await.unwrap();
    workflow.add_item("2", &mut cart).await.unwrap();
    let total = workflow.total_price(&cart);

    let order = workflow
        .checkout(&cart, "alice@example.com", total)
        .await
        .unwrap();

    let id = order.id.expect("checkout must assign an id");
    assert_eq!(store.saved().len(), 1);
    assert_eq!(
        notifier.confirmations(),
        vec![(id, "alice@example.com".to_owned())]
    );
    assert_eq!(*events.lock().unwrap(), vec!["save", "notify"]);
}

#[tokio::test]
async fn test_checkout_result_carries_cart_items_and_total() {
    let (workflow, _, _, _) = workflow();
    let mut cart = Cart::new();
    workflow.add_item("1", &mut cart).await.unwrap();

    let order = workflow
        .checkout(&cart, "alice@example.com", Decimal::new(1000, 2))
        .await
        .unwrap();

    assert_eq!(order.items, cart.goods);
    assert_eq!(order.total_price, Decimal::new(1000, 2));
}

#[tokio::test]
async fn test_checkout_notification_failure_keeps_order_persisted() {
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));
    let store = RecordingStore::new(Arc::clone(&events));
    let notifier = RecordingNotifier::failing(Arc::clone(&events));
    let workflow = OrderWorkflow::new(catalog(), store.clone(), notifier);

    let mut cart = Cart::new();
    workflow.add_item("1", &mut cart).await.unwrap();

    let order = workflow
        .checkout(&cart, "alice@example.com", Decimal::new(1000, 2))
        .await
        .unwrap();

    assert!(order.is_persisted());
    assert_eq!(store.saved().len(), 1);
}

#[tokio::test]
async fn test_checkout_persistence_failure_aborts_notification() {
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));
    let notifier = RecordingNotifier::new(Arc::clone(&events));
    let store = FailingStore {
        events: Arc::clone(&events),
    };
    let workflow = OrderWorkflow::new(catalog(), store, notifier.clone());

    let mut cart = Cart::new();
    cart.push(good("Book", 1000));

    let err = workflow
        .checkout(&cart, "alice@example.com", Decimal::new(1000, 2))
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Repository(_)));
    assert!(notifier.confirmations().is_empty());
    assert_eq!(*events.lock().unwrap(), vec!["save"]);
}

// =============================================================================
// Order retrieval
// =============================================================================

#[tokio::test]
async fn test_order_by_id_returns_persisted_order() {
    let (workflow, _, _, _) = workflow();
    let mut cart = Cart::new();
    workflow.add_item("1", &mut cart).await.unwrap();
    let saved = workflow
        .checkout(&cart, "alice@example.com", Decimal::new(1000, 2))
        .await
        .unwrap();

    let fetched = workflow.order_by_id(saved.id.unwrap()).await.unwrap();

    assert_eq!(fetched, saved);
}

#[tokio::test]
async fn test_order_by_id_unknown_id_is_not_found() {
    let (workflow, _, _, _) = workflow();

    let err = workflow.order_by_id(OrderId::new(404)).await.unwrap_err();

    assert!(matches!(err, OrderError::OrderNotFound(id) if id == OrderId::new(404)));
}

#[tokio::test]
async fn test_orders_returns_all_checkouts() {
    let (workflow, _, _, _) = workflow();

    for _ in 0..3 {
        let mut cart = Cart::new();
        workflow.add_item("2", &mut cart).await.unwrap();
        workflow
            .checkout(&cart, "alice@example.com", Decimal::new(200, 2))
            .await
            .unwrap();
    }

    let orders = workflow.orders().await.unwrap();
    assert_eq!(orders.len(), 3);
    assert!(orders.iter().all(Order::is_persisted));
}

// =============================================================================
// Formatting
// =============================================================================

#[tokio::test]
async fn test_chosen_goods_text_numbers_items() {
    let (workflow, _, _, _) = workflow();
    let mut cart = Cart::new();
    workflow.add_item("1", &mut cart).await.unwrap();
    workflow.add_item("2", &mut cart).await.unwrap();

    let expected = format!("{CHOSEN_GOODS_HEADER}1) Book 10.00 $\n2) Pen 2.00 $\n");
    assert_eq!(workflow.chosen_goods_text(&cart), expected);
}

#[tokio::test]
async fn test_chosen_goods_text_empty_cart_is_sentinel() {
    let (workflow, _, _, _) = workflow();

    assert_eq!(workflow.chosen_goods_text(&Cart::new()), NO_ORDER_YET);
}

#[tokio::test]
async fn test_order_body_text_has_no_header() {
    let (workflow, _, _, _) = workflow();
    let mut cart = Cart::new();
    workflow.add_item("1", &mut cart).await.unwrap();
    workflow.add_item("2", &mut cart).await.unwrap();

    assert_eq!(
        workflow.order_body_text(&cart),
        "1) Book 10.00 $\n2) Pen 2.00 $\n"
    );
}

#[tokio::test]
async fn test_order_body_text_empty_cart_is_empty_string() {
    let (workflow, _, _, _) = workflow();

    assert_eq!(workflow.order_body_text(&Cart::new()), "");
}

#[tokio::test]
async fn test_order_header_sentinels() {
    let (workflow, _, _, _) = workflow();

    assert_eq!(workflow.order_header(Decimal::ZERO), ORDER_NOT_PLACED);
    assert_eq!(workflow.order_header(Decimal::new(1000, 2)), ORDER_HEADER);
}

// =============================================================================
// Session state
// =============================================================================

#[tokio::test]
async fn test_reset_cart_restores_initial_session_state() {
    let (workflow, _, _, _) = workflow();
    let mut session = SessionState::default();
    workflow.add_item("1", &mut session.cart).await.unwrap();
    session.chosen_goods = workflow.chosen_goods_text(&session.cart);
    session.file_upload_error = "upload failed".to_owned();

    workflow.reset_cart(&mut session);

    assert_eq!(session, SessionState::default());
}

#[tokio::test]
async fn test_load_cart_returns_session_snapshot() {
    let (workflow, _, _, _) = workflow();
    let mut session = SessionState::default();
    workflow.add_item("2", &mut session.cart).await.unwrap();

    let snapshot = workflow.load_cart(&session);

    assert_eq!(snapshot, session.cart);
    assert_eq!(session.cart.len(), 1);
}

#[tokio::test]
async fn test_load_cart_fresh_session_is_empty() {
    let (workflow, _, _, _) = workflow();

    assert!(workflow.load_cart(&SessionState::default()).is_empty());
}
