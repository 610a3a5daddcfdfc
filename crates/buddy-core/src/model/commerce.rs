use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::hydrate::{Hydrate, HydrationError};
use crate::transport::WireRecord;

/// A purchase receipt saved for the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub receipt_history_id: i64,
    pub user_id: i64,
    pub store_name: String,
    pub store_item_id: i64,
    pub item_quantity: i64,
    pub historical_cost: f64,
    pub total_cost: f64,
    pub item_description: String,
    pub transaction_id: String,
    pub app_data: String,
    pub verified: bool,
    pub created: Option<NaiveDateTime>,
}

impl Hydrate for Receipt {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            receipt_history_id: record.int("ReceiptHistoryID")?,
            user_id: record.int("UserID")?,
            store_name: record.text_or_empty("StoreName"),
            store_item_id: record.optional_int("StoreItemID")?.unwrap_or(-1),
            item_quantity: record.optional_int("ItemQuantity")?.unwrap_or_default(),
            historical_cost: record.optional_float("HistoricalCost")?.unwrap_or_default(),
            total_cost: record.optional_float("TotalCost")?.unwrap_or_default(),
            item_description: record.text_or_empty("ItemDescription"),
            transaction_id: record.text_or_empty("StoreTransactionID"),
            app_data: record.text_or_empty("AppData"),
            verified: record.optional_flag("ReceiptVerified")?,
            created: record.optional_timestamp("HistoryDateTime")?,
        })
    }
}

/// An item offered in the application's store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub is_active: bool,
    pub is_free: bool,
    pub custom_data: String,
    pub app_tag: String,
    pub created: Option<NaiveDateTime>,
}

impl Hydrate for StoreItem {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            id: record.int("StoreItemID")?,
            name: record.required("ItemName")?,
            description: record.text_or_empty("ItemDescription"),
            price: record.text_or_empty("ItemPrice"),
            is_active: record.optional_flag("ItemAvailableFlag")?,
            is_free: record.optional_flag("ItemFreeFlag")?,
            custom_data: record.text_or_empty("CustomItemID"),
            app_tag: record.text_or_empty("AppData"),
            created: record.optional_timestamp("ItemDateTime")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_defaults_for_optional_fields() {
        let record = WireRecord::new()
            .with("ReceiptHistoryID", "12")
            .with("UserID", "3")
            .with("TotalCost", "2.99");
        let receipt = Receipt::hydrate(&record).unwrap();
        assert_eq!(receipt.total_cost, 2.99);
        assert_eq!(receipt.store_item_id, -1);
        assert!(!receipt.verified);
    }

    #[test]
    fn test_store_item_flags() {
        let record = WireRecord::new()
            .with("StoreItemID", "1")
            .with("ItemName", "sword")
            .with("ItemAvailableFlag", "1")
            .with("ItemFreeFlag", "0");
        let item = StoreItem::hydrate(&record).unwrap();
        assert!(item.is_active);
        assert!(!item.is_free);
    }
}
