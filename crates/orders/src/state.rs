//! Application state shared across callers.

use std::sync::Arc;

use sqlx::PgPool;

use lettre::transport::smtp::Error as SmtpError;

use crate::config::OrdersConfig;
use crate::db::goods::PgGoodCatalog;
use crate::db::orders::PgOrderStore;
use crate::services::email::EmailService;
use crate::services::order::OrderWorkflow;

/// The production workflow wiring: Postgres-backed catalog and store, SMTP
/// notifications.
pub type ProductionWorkflow = OrderWorkflow<PgGoodCatalog, PgOrderStore, EmailService>;

/// Application state shared across all callers.
///
/// Cheaply cloneable via `Arc`; provides access to the configured workflow
/// and the underlying connection pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: OrdersConfig,
    pool: PgPool,
    workflow: ProductionWorkflow,
}

impl AppState {
    /// Wire the production workflow from configuration and a pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP relay cannot be configured.
    pub fn new(config: OrdersConfig, pool: PgPool) -> Result<Self, SmtpError> {
        let catalog = PgGoodCatalog::new(pool.clone());
        let store = PgOrderStore::new(pool.clone());
        let notifier = EmailService::new(&config.email)?;
        let workflow = OrderWorkflow::new(catalog, store, notifier);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                workflow,
            }),
        })
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &OrdersConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the order workflow.
    #[must_use]
    pub fn workflow(&self) -> &ProductionWorkflow {
        &self.inner.workflow
    }
}
