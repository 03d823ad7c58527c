//! Order repository for database operations.
//!
//! Orders span two tables: `orders` holds the owner, total, and timestamp;
//! `order_items` holds the line items in cart order. The save path runs in
//! a single transaction so a failed item insert leaves no partial order.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};

use eshop_core::{Good, Order, OrderId};

use super::RepositoryError;
use crate::services::order::OrderStore;

/// Repository for persisted orders.
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    /// Create a new order store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn items_for(&self, order_id: i64) -> Result<Vec<Good>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT title, price FROM order_items WHERE order_id = $1 ORDER BY position",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Ok(Good::new(row.try_get("title")?, row.try_get("price")?)))
            .collect()
    }
}

fn order_from_row(row: &PgRow) -> Result<Order, RepositoryError> {
    let id: i64 = row.try_get("id")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(Order {
        id: Some(OrderId::new(id)),
        owner_login: row.try_get("owner_login")?,
        total_price: row.try_get("total_price")?,
        items: Vec::new(),
        created_at,
    })
}

impl OrderStore for PgOrderStore {
    /// Persist the order and its items, returning the order with its
    /// assigned identifier.
    ///
    /// The whole write is one transaction: commit on success, rollback on
    /// any failure before returning.
    async fn save(&self, order: Order) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (owner_login, total_price, created_at)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&order.owner_login)
        .bind(order.total_price)
        .bind(order.created_at)
        .fetch_one(&mut *tx)
        .await?;

        for (position, item) in order.items.iter().enumerate() {
            let position = i64::try_from(position).unwrap_or(i64::MAX);

            sqlx::query(
                "INSERT INTO order_items (order_id, position, title, price)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(id)
            .bind(position)
            .bind(&item.title)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Order {
            id: Some(OrderId::new(id)),
            ..order
        })
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Order, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, owner_login, total_price, created_at FROM orders WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let mut order = order_from_row(&row)?;
        order.items = self.items_for(id.as_i64()).await?;

        Ok(order)
    }

    async fn get_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows =
            sqlx::query("SELECT id, owner_login, total_price, created_at FROM orders ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        let mut orders = Vec::with_capacity(rows.len());

        for row in &rows {
            let mut order = order_from_row(row)?;
            if let Some(id) = order.id {
                order.items = self.items_for(id.as_i64()).await?;
            }
            orders.push(order);
        }

        Ok(orders)
    }
}
