//! Inventory endpoints.

// Allow dead code: the full backend surface is kept even where the CLI
// does not reach it yet
#![allow(dead_code)]

use anyhow::Result;

use crate::models::{InventoryItem, InventoryItemInput, InventoryStats};

use super::ApiClient;

impl ApiClient {
    pub async fn list_inventory(&self) -> Result<Vec<InventoryItem>> {
        self.get("/inventory/").await
    }

    pub async fn inventory_by_category(&self, category: &str) -> Result<Vec<InventoryItem>> {
        self.get(&format!("/inventory/category/{}", category)).await
    }

    pub async fn get_inventory_item(&self, id: i64) -> Result<InventoryItem> {
        self.get(&format!("/inventory/{}", id)).await
    }

    /// Admin only.
    pub async fn create_inventory_item(&self, input: &InventoryItemInput) -> Result<InventoryItem> {
        self.post("/inventory/", input).await
    }

    pub async fn update_inventory_item(
        &self,
        id: i64,
        input: &InventoryItemInput,
    ) -> Result<InventoryItem> {
        self.put(&format!("/inventory/{}", id), input).await
    }

    /// Add or subtract stock; the delta rides as a query parameter.
    pub async fn adjust_inventory_quantity(
        &self,
        id: i64,
        adjustment: i64,
    ) -> Result<InventoryItem> {
        self.patch_with_query(
            &format!("/inventory/{}/adjust-quantity", id),
            &[("adjustment", adjustment)],
        )
        .await
    }

    /// Admin only.
    pub async fn delete_inventory_item(&self, id: i64) -> Result<()> {
        self.delete(&format!("/inventory/{}", id)).await
    }

    pub async fn low_stock_items(&self) -> Result<Vec<InventoryItem>> {
        self.get("/inventory/low-stock/alert").await
    }

    pub async fn inventory_stats(&self) -> Result<InventoryStats> {
        self.get("/inventory/stats/summary").await
    }

    /// Items usable as prescription stock, filtered client-side.
    pub async fn medication_inventory(&self) -> Result<Vec<InventoryItem>> {
        let items = self.list_inventory().await?;
        Ok(items.into_iter().filter(|i| i.is_medication()).collect())
    }
}
