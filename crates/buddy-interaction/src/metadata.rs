//! Key/value metadata, at application or user scope.
//!
//! Both scopes share one implementation and differ only in method names and
//! in the credentials carried by the base parameters.

use std::collections::BTreeMap;

use buddy_core::model::{Hydrate, MetadataItem, MetadataSum};
use buddy_core::params::{require_non_empty, require_text};
use buddy_core::{PendingCall, SentinelPolicy};

use crate::context::Scope;
use crate::methods::MetadataMethods;
use crate::search::{NearbySearch, location_params};

/// Filters for [`Metadata::find`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataSearch {
    pub area: NearbySearch,
    /// SQL-style pattern on the key (`%` wildcard).
    pub key: Option<String>,
    pub value: Option<String>,
}

#[derive(Clone)]
pub struct Metadata {
    scope: Scope,
    methods: &'static MetadataMethods,
}

impl Metadata {
    pub(crate) fn new(scope: Scope, methods: &'static MetadataMethods) -> Self {
        Self { scope, methods }
    }

    /// Stores `value` under `key`. `false` if the service did not change
    /// anything.
    pub fn set(
        &self,
        key: &str,
        value: &str,
        location: Option<(f64, f64)>,
        app_tag: Option<&str>,
    ) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let key = require_text("key", key)?;
            let params = self.scope.params().text("MetaKey", key).text("MetaValue", value);
            let params = location_params(params, location, "MetaLatitude", "MetaLongitude")?
                .optional_text("ApplicationTag", app_tag);
            Ok(self
                .scope
                .op(self.methods.set, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    /// `None` when the key does not exist.
    pub fn get(&self, key: &str) -> PendingCall<Option<MetadataItem>> {
        PendingCall::prepare(|| {
            let key = require_text("key", key)?;
            let params = self.scope.params().text("MetaKey", key);
            Ok(self
                .scope
                .op(self.methods.get, params)
                .optional(SentinelPolicy::STRICT))
        })
    }

    /// Every item in scope, keyed by metadata key.
    pub fn get_all(&self) -> PendingCall<BTreeMap<String, MetadataItem>> {
        self.scope
            .op(self.methods.get_all, self.scope.params())
            .grouped(SentinelPolicy::STRICT, |records| {
                records
                    .iter()
                    .map(|record| MetadataItem::hydrate(record).map(|item| (item.key.clone(), item)))
                    .collect()
            })
    }

    pub fn delete(&self, key: &str) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let key = require_text("key", key)?;
            let params = self.scope.params().text("MetaKey", key);
            Ok(self
                .scope
                .op(self.methods.delete, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn delete_all(&self) -> PendingCall<bool> {
        self.scope
            .op(self.methods.delete_all, self.scope.params())
            .boolean(SentinelPolicy::NEGATIVE_ONE)
    }

    /// Items near a point, each carrying its distance from the origin.
    pub fn find(&self, search: &MetadataSearch) -> PendingCall<Vec<MetadataItem>> {
        PendingCall::prepare(|| {
            let (params, origin) =
                search
                    .area
                    .apply(self.scope.params(), "SearchLatitude", "SearchLongitude")?;
            let params = params
                .optional_text("MetaKeySearch", search.key.as_deref())
                .optional_text("MetaValueSearch", search.value.as_deref())
                .optional_text("SearchAppTag", search.area.app_tag.as_deref());
            Ok(self
                .scope
                .op(self.methods.search, params)
                .list_at(SentinelPolicy::STRICT, origin))
        })
    }

    /// Sums the numeric values of every key starting with `key_prefix`.
    pub fn sum(&self, key_prefix: &str, area: &NearbySearch) -> PendingCall<Option<MetadataSum>> {
        PendingCall::prepare(|| {
            let key_prefix = require_text("keyPrefix", key_prefix)?;
            let (params, _) =
                area.apply(self.scope.params(), "SearchLatitude", "SearchLongitude")?;
            let params = params
                .text("MetaKey", key_prefix)
                .optional_text("ApplicationTag", area.app_tag.as_deref());
            Ok(self
                .scope
                .op(self.methods.sum, params)
                .optional(SentinelPolicy::STRICT))
        })
    }

    /// One [`MetadataSum`] per prefix, in the order the service returns them.
    pub fn batch_sum(
        &self,
        key_prefixes: &[&str],
        area: &NearbySearch,
    ) -> PendingCall<Vec<MetadataSum>> {
        PendingCall::prepare(|| {
            let key_prefixes = require_non_empty("keyPrefixes", key_prefixes)?;
            for prefix in key_prefixes {
                require_text("keyPrefixes", prefix)?;
            }
            let (params, _) =
                area.apply(self.scope.params(), "SearchLatitude", "SearchLongitude")?;
            let params = params
                .text("MetaKeyCollection", key_prefixes.join(";"))
                .optional_text("ApplicationTag", area.app_tag.as_deref());
            Ok(self
                .scope
                .op(self.methods.batch_sum, params)
                .list(SentinelPolicy::STRICT))
        })
    }
}
