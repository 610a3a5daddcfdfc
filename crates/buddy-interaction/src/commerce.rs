//! Purchase receipts and the application store catalog.

use chrono::NaiveDateTime;

use buddy_core::model::{Receipt, StoreItem};
use buddy_core::params::{require_finite, require_non_negative, require_text};
use buddy_core::{BuddyError, BuddyResult, ParamBag, PendingCall, SentinelPolicy};

use crate::context::UserContext;
use crate::methods;
use crate::search::since;

/// A purchase to record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReceiptRequest {
    pub store_name: String,
    pub receipt_data: String,
    pub total_cost: f64,
    pub total_quantity: i64,
    pub store_item_id: i64,
    pub transaction_id: String,
    pub custom_transaction_id: Option<String>,
    pub app_data: Option<String>,
}

impl ReceiptRequest {
    fn apply(&self, params: ParamBag) -> BuddyResult<ParamBag> {
        if require_finite("totalCost", self.total_cost)? < 0.0 {
            return Err(BuddyError::invalid_argument("totalCost", "can't be smaller than 0"));
        }
        Ok(params
            .text("ReceiptStoreName", require_text("storeName", &self.store_name)?)
            .float("TotalCost", self.total_cost)
            .int("TotalQuantity", require_non_negative("totalQuantity", self.total_quantity)?)
            .int("StoreItemID", require_non_negative("storeItemId", self.store_item_id)?)
            .text("StoreTransactionID", &self.transaction_id)
            .optional_text("CustomTransactionID", self.custom_transaction_id.as_deref())
            .optional_text("AppData", self.app_data.as_deref()))
    }
}

#[derive(Clone)]
pub struct Commerce {
    ctx: UserContext,
}

impl Commerce {
    pub(crate) fn new(ctx: UserContext) -> Self {
        Self { ctx }
    }

    pub fn receipts(&self, after: Option<NaiveDateTime>) -> PendingCall<Vec<Receipt>> {
        let params = since(self.ctx.params(), "FromDateTime", after);
        self.ctx
            .op(methods::RECEIPTS_GET_ALL, params)
            .list(SentinelPolicy::STRICT)
    }

    /// Receipts recorded under one store transaction id.
    pub fn receipt_for_transaction(&self, transaction_id: &str) -> PendingCall<Vec<Receipt>> {
        PendingCall::prepare(|| {
            let transaction_id = require_text("transactionId", transaction_id)?;
            let params = self.ctx.params().text("StoreTransactionID", transaction_id);
            Ok(self
                .ctx
                .op(methods::RECEIPT_FOR_TRANSACTION, params)
                .list(SentinelPolicy::STRICT))
        })
    }

    pub fn save_receipt(&self, receipt: &ReceiptRequest) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let params = receipt
                .apply(self.ctx.params())?
                .text("ReceiptData", &receipt.receipt_data);
            Ok(self
                .ctx
                .op(methods::RECEIPT_SAVE, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }

    /// Has Apple verify `receipt.receipt_data` before storing it. `false`
    /// when verification fails.
    pub fn verify_and_save_receipt(
        &self,
        receipt: &ReceiptRequest,
        use_sandbox: bool,
    ) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let receipt_data = require_text("receiptData", &receipt.receipt_data)?;
            let params = receipt
                .apply(self.ctx.params())?
                .text("iOSReceiptData", receipt_data)
                .flag("UseSandbox", use_sandbox)
                .text("AppName", self.ctx.auth.session().app_name());
            Ok(self
                .ctx
                .op(methods::RECEIPT_VERIFY_AND_SAVE, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn store_items(&self) -> PendingCall<Vec<StoreItem>> {
        self.catalog(methods::STORE_ITEMS_ALL)
    }

    pub fn active_store_items(&self) -> PendingCall<Vec<StoreItem>> {
        self.catalog(methods::STORE_ITEMS_ACTIVE)
    }

    pub fn free_store_items(&self) -> PendingCall<Vec<StoreItem>> {
        self.catalog(methods::STORE_ITEMS_FREE)
    }

    fn catalog(&self, method: &'static str) -> PendingCall<Vec<StoreItem>> {
        self.ctx.op(method, self.ctx.params()).list(SentinelPolicy::STRICT)
    }
}
