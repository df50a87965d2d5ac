use super::protocol::{AddOrderReply, GetOrdersReply, Order};

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The exclusive owner of the orders document.
///
/// Appends run the whole read-modify-write cycle under the write half of
/// `lock`; the lock is scoped to this store instance and its one backing
/// file, never ambient. Reads take the read half. The store never creates
/// the backing file: a missing document is a recoverable read failure
/// (seeding an empty `[]` is a bootstrap concern).
pub struct OrderStore {
    path: PathBuf,
    tmp_path: PathBuf,
    lock: RwLock<()>,
}

impl OrderStore {
    pub fn new(path: impl Into<PathBuf>) -> Arc<Self> {
        let path = path.into();

        // Writes land in a sibling temp file first, then rename over the
        // document, so the prior contents survive any failed write.
        let mut tmp_name = OsString::from(path.as_os_str());
        tmp_name.push(".tmp");

        Arc::new(Self {
            tmp_path: PathBuf::from(tmp_name),
            path,
            lock: RwLock::new(()),
        })
    }

    /// Appends one order to the collection.
    ///
    /// The read, the append, and the write happen inside one critical
    /// section, so N concurrent calls commit exactly N records. Every exit
    /// path releases the lock; failures come back as reply flags and never
    /// crash the process.
    pub async fn add_order(&self, order: Order) -> AddOrderReply {
        let _guard = self.lock.write().await;

        let mut orders = match self.read_collection().await {
            Ok(orders) => orders,
            Err(e) => {
                tracing::warn!("addOrder: failed to read {}: {:#}", self.path.display(), e);
                return AddOrderReply::failure("something went wrong while reading the order file");
            }
        };

        tracing::info!(
            "addOrder: appending order '{}' to {}",
            order.order_id,
            self.path.display()
        );
        orders.push(order);

        match self.write_collection(&orders).await {
            Ok(()) => AddOrderReply::success("order stored"),
            Err(e) => {
                // The appended state is discarded with the lock; the prior
                // document on disk is untouched.
                tracing::warn!("addOrder: failed to write {}: {:#}", self.path.display(), e);
                AddOrderReply::failure("something went wrong while writing the order file")
            }
        }
    }

    /// Returns the full collection, or `NotFound` when the document is
    /// missing or unreadable.
    pub async fn list_orders(&self) -> GetOrdersReply {
        let _guard = self.lock.read().await;

        match self.read_collection().await {
            Ok(orders) => GetOrdersReply::Orders(orders),
            Err(e) => {
                tracing::debug!(
                    "getOrders: failed to read {}: {:#}",
                    self.path.display(),
                    e
                );
                GetOrdersReply::NotFound {
                    message: "order list not found".to_string(),
                }
            }
        }
    }

    async fn read_collection(&self) -> Result<Vec<Order>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;

        let orders = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", self.path.display()))?;

        Ok(orders)
    }

    async fn write_collection(&self, orders: &[Order]) -> Result<()> {
        let bytes = serde_json::to_vec(orders).context("serializing order collection")?;

        tokio::fs::write(&self.tmp_path, &bytes)
            .await
            .with_context(|| format!("writing {}", self.tmp_path.display()))?;

        tokio::fs::rename(&self.tmp_path, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;

        Ok(())
    }
}
