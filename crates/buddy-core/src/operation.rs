//! Binds a remote method, its parameters and a result adapter into a
//! [`PendingCall`].

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::adapter::{self, SentinelPolicy};
use crate::error::{BuddyError, BuddyResult};
use crate::model::{GeoPoint, Hydrate, HydrateAt, HydrationError};
use crate::params::ParamBag;
use crate::surface::PendingCall;
use crate::transport::{Transport, Upload, WireRecord, WireResult};

/// One remote invocation waiting for its adapter.
pub struct Operation {
    transport: Arc<dyn Transport>,
    method: &'static str,
    params: ParamBag,
    upload: Option<Upload>,
}

impl Operation {
    pub fn new(transport: Arc<dyn Transport>, method: &'static str, params: ParamBag) -> Self {
        Self {
            transport,
            method,
            params,
            upload: None,
        }
    }

    /// Sends the call as multipart with `file` attached.
    pub fn with_upload(mut self, file: Upload) -> Self {
        self.upload = Some(file);
        self
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    async fn send(self) -> WireResult {
        tracing::debug!(
            method = self.method,
            params = ?self.params.keys(),
            upload = self.upload.is_some(),
            "invoking remote method"
        );
        let outcome = match self.upload {
            Some(file) => self.transport.upload(self.method, self.params, file).await,
            None => self.transport.invoke(self.method, self.params).await,
        };
        if let Err(err) = &outcome {
            tracing::debug!(method = self.method, error = %err, "remote method failed");
        }
        outcome
    }

    /// Feeds the raw outcome to `adapt` and wraps the result as a pending call.
    pub fn adapt<T, F>(self, adapt: F) -> PendingCall<T>
    where
        T: Send + 'static,
        F: FnOnce(&'static str, WireResult) -> BuddyResult<T> + Send + 'static,
    {
        PendingCall::new(async move {
            let method = self.method;
            let outcome = self.send().await;
            adapt(method, outcome)
        })
    }

    pub fn boolean(self, policy: SentinelPolicy) -> PendingCall<bool> {
        self.adapt(move |method, outcome| adapter::boolean(method, outcome, policy))
    }

    pub fn text(self, policy: SentinelPolicy) -> PendingCall<Option<String>> {
        self.adapt(move |method, outcome| adapter::text(method, outcome, policy))
    }

    pub fn integer(self, policy: SentinelPolicy) -> PendingCall<Option<i64>> {
        self.adapt(move |method, outcome| adapter::integer(method, outcome, policy))
    }

    pub fn timestamp(self, policy: SentinelPolicy) -> PendingCall<Option<NaiveDateTime>> {
        self.adapt(move |method, outcome| adapter::timestamp(method, outcome, policy))
    }

    pub fn optional<T>(self, policy: SentinelPolicy) -> PendingCall<Option<T>>
    where
        T: Hydrate + Send + 'static,
    {
        self.adapt(move |method, outcome| adapter::optional(method, outcome, policy))
    }

    pub fn optional_at<T>(self, policy: SentinelPolicy, origin: GeoPoint) -> PendingCall<Option<T>>
    where
        T: HydrateAt + Send + 'static,
    {
        self.adapt(move |method, outcome| adapter::optional_at(method, outcome, policy, origin))
    }

    pub fn list<T>(self, policy: SentinelPolicy) -> PendingCall<Vec<T>>
    where
        T: Hydrate + Send + 'static,
    {
        self.adapt(move |method, outcome| adapter::list(method, outcome, policy))
    }

    pub fn list_at<T>(self, policy: SentinelPolicy, origin: GeoPoint) -> PendingCall<Vec<T>>
    where
        T: HydrateAt + Send + 'static,
    {
        self.adapt(move |method, outcome| adapter::list_at(method, outcome, policy, origin))
    }

    pub fn grouped<K, T, F>(self, policy: SentinelPolicy, fold: F) -> PendingCall<BTreeMap<K, T>>
    where
        K: Ord + Send + 'static,
        T: Send + 'static,
        F: FnOnce(&[WireRecord]) -> Result<BTreeMap<K, T>, HydrationError> + Send + 'static,
    {
        self.adapt(move |method, outcome| adapter::grouped(method, outcome, policy, fold))
    }

    pub fn first_field(self, policy: SentinelPolicy, field: &'static str) -> PendingCall<Option<String>> {
        self.adapt(move |method, outcome| adapter::first_field(method, outcome, policy, field))
    }

    /// Downloads the raw response body. An empty body reads as `None`.
    pub fn download(self) -> PendingCall<Option<Vec<u8>>> {
        PendingCall::new(async move {
            tracing::debug!(
                method = self.method,
                params = ?self.params.keys(),
                "downloading remote payload"
            );
            let bytes = self
                .transport
                .download(self.method, self.params)
                .await
                .map_err(|err| BuddyError::from_wire(err, self.method))?;
            Ok(if bytes.is_empty() { None } else { Some(bytes) })
        })
    }
}
