//! Store and inventory endpoints

use serde_json::json;

use crate::Result;
use crate::client::ApiClient;
use crate::types::{EquippedItem, InventoryItem, StoreItem};

impl ApiClient {
    /// List active store listings
    pub async fn store_items(&self) -> Result<Vec<StoreItem>> {
        self.get("/store-items/").await
    }

    /// Purchase a store item; the server debits coins and checks stock and
    /// purchase limits
    pub async fn purchase_item(&self, store_item_id: i64, quantity: u32) -> Result<InventoryItem> {
        self.post(
            &format!("/store-items/{store_item_id}/purchase/"),
            &json!({ "quantity": quantity }),
        )
        .await
    }

    /// The current user's inventory
    pub async fn inventory(&self) -> Result<Vec<InventoryItem>> {
        self.get("/inventory/").await
    }

    /// Equip an inventory item into a slot
    pub async fn equip_item(&self, inventory_item_id: i64, slot: &str) -> Result<()> {
        self.post_unit(
            &format!("/inventory/{inventory_item_id}/equip/"),
            &json!({ "slot": slot }),
        )
        .await
    }

    /// Remove an item from a slot
    pub async fn unequip_item(&self, inventory_item_id: i64, slot: &str) -> Result<()> {
        self.post_unit(
            &format!("/inventory/{inventory_item_id}/unequip/"),
            &json!({ "slot": slot }),
        )
        .await
    }

    /// The current user's equipped items
    pub async fn equipped(&self) -> Result<Vec<EquippedItem>> {
        self.get("/equipped/").await
    }
}
