//! Result adapter.
//!
//! Turns the raw outcome of one transport call into a typed result. Every
//! function here is pure: the same `(method, outcome, policy)` always gives
//! the same answer.
//!
//! The triage order is fixed:
//! 1. transport failures and non-benign service codes fail the call without
//!    constructing anything;
//! 2. service codes listed in the operation's [`SentinelPolicy`] become the
//!    operation's benign value (`false`, `None`, empty);
//! 3. an empty payload is an empty success;
//! 4. anything else is hydrated.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::error::{BuddyError, BuddyResult};
use crate::model::{GeoPoint, Hydrate, HydrateAt, HydrationError, parse_timestamp};
use crate::service_code::ServiceCode;
use crate::transport::{RawPayload, WireError, WireRecord, WireResult};

/// Service codes an operation treats as a legitimate negative answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentinelPolicy {
    benign: &'static [&'static str],
}

impl SentinelPolicy {
    /// Every service code is a failure.
    pub const STRICT: Self = Self { benign: &[] };

    /// `-1` means "nothing was changed" rather than failure.
    pub const NEGATIVE_ONE: Self = Self {
        benign: &[ServiceCode::NEGATIVE_ONE],
    };

    pub const fn allowing(benign: &'static [&'static str]) -> Self {
        Self { benign }
    }

    pub fn is_benign(&self, code: &ServiceCode) -> bool {
        self.benign.contains(&code.as_str())
    }
}

impl Default for SentinelPolicy {
    fn default() -> Self {
        Self::STRICT
    }
}

/// Outcome of the first triage step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Triage {
    Payload(RawPayload),
    Benign(ServiceCode),
}

pub fn triage(method: &str, outcome: WireResult, policy: SentinelPolicy) -> BuddyResult<Triage> {
    match outcome {
        Ok(payload) => Ok(Triage::Payload(payload)),
        Err(WireError::Service(code)) if policy.is_benign(&code) => Ok(Triage::Benign(code)),
        Err(err) => Err(BuddyError::from_wire(err, method)),
    }
}

fn unexpected(method: &str, expected: &str) -> BuddyError {
    BuddyError::transport(format!("{method} returned a payload that is not {expected}"))
}

/// Scalar answers: `"1"`/`"true"` is true, any other scalar is false.
pub fn boolean(method: &str, outcome: WireResult, policy: SentinelPolicy) -> BuddyResult<bool> {
    match triage(method, outcome, policy)? {
        Triage::Benign(_) => Ok(false),
        Triage::Payload(RawPayload::Empty) => Ok(false),
        Triage::Payload(RawPayload::Text(text)) => {
            let text = text.trim();
            Ok(text == "1" || text.eq_ignore_ascii_case("true"))
        }
        Triage::Payload(RawPayload::Records(records)) => Ok(!records.is_empty()),
    }
}

/// A bare string answer; empty reads as `None`.
pub fn text(
    method: &str,
    outcome: WireResult,
    policy: SentinelPolicy,
) -> BuddyResult<Option<String>> {
    match triage(method, outcome, policy)? {
        Triage::Benign(_) | Triage::Payload(RawPayload::Empty) => Ok(None),
        Triage::Payload(RawPayload::Text(text)) if text.trim().is_empty() => Ok(None),
        Triage::Payload(RawPayload::Text(text)) => Ok(Some(text.trim().to_string())),
        Triage::Payload(RawPayload::Records(_)) => Err(unexpected(method, "a scalar")),
    }
}

pub fn integer(
    method: &str,
    outcome: WireResult,
    policy: SentinelPolicy,
) -> BuddyResult<Option<i64>> {
    text(method, outcome, policy)?
        .map(|raw| {
            raw.parse::<i64>().map_err(|_| {
                BuddyError::from(HydrationError::new(method, format!("'{raw}' is not an integer")))
            })
        })
        .transpose()
}

pub fn timestamp(
    method: &str,
    outcome: WireResult,
    policy: SentinelPolicy,
) -> BuddyResult<Option<NaiveDateTime>> {
    text(method, outcome, policy)?
        .map(|raw| {
            parse_timestamp(&raw).ok_or_else(|| {
                BuddyError::from(HydrationError::new(method, format!("'{raw}' is not a date")))
            })
        })
        .transpose()
}

/// The record set of a successful call; benign codes and empty bodies read
/// as no rows.
pub fn records(
    method: &str,
    outcome: WireResult,
    policy: SentinelPolicy,
) -> BuddyResult<Vec<WireRecord>> {
    match triage(method, outcome, policy)? {
        Triage::Benign(_) | Triage::Payload(RawPayload::Empty) => Ok(Vec::new()),
        Triage::Payload(RawPayload::Records(records)) => Ok(records),
        Triage::Payload(RawPayload::Text(text)) if text.trim().is_empty() => Ok(Vec::new()),
        Triage::Payload(RawPayload::Text(_)) => Err(unexpected(method, "a record set")),
    }
}

/// First row hydrated; zero rows is `Ok(None)`, never "not found".
pub fn optional<T: Hydrate>(
    method: &str,
    outcome: WireResult,
    policy: SentinelPolicy,
) -> BuddyResult<Option<T>> {
    records(method, outcome, policy)?
        .first()
        .map(T::hydrate)
        .transpose()
        .map_err(BuddyError::from)
}

pub fn optional_at<T: HydrateAt>(
    method: &str,
    outcome: WireResult,
    policy: SentinelPolicy,
    origin: GeoPoint,
) -> BuddyResult<Option<T>> {
    records(method, outcome, policy)?
        .first()
        .map(|record| T::hydrate_at(record, origin))
        .transpose()
        .map_err(BuddyError::from)
}

/// Every row hydrated. One bad row fails the whole call.
pub fn list<T: Hydrate>(
    method: &str,
    outcome: WireResult,
    policy: SentinelPolicy,
) -> BuddyResult<Vec<T>> {
    records(method, outcome, policy)?
        .iter()
        .map(T::hydrate)
        .collect::<Result<_, _>>()
        .map_err(BuddyError::from)
}

pub fn list_at<T: HydrateAt>(
    method: &str,
    outcome: WireResult,
    policy: SentinelPolicy,
    origin: GeoPoint,
) -> BuddyResult<Vec<T>> {
    records(method, outcome, policy)?
        .iter()
        .map(|record| T::hydrate_at(record, origin))
        .collect::<Result<_, _>>()
        .map_err(BuddyError::from)
}

/// Folds flattened rows into a keyed map using `fold`.
pub fn grouped<K: Ord, T>(
    method: &str,
    outcome: WireResult,
    policy: SentinelPolicy,
    fold: impl FnOnce(&[WireRecord]) -> Result<BTreeMap<K, T>, HydrationError>,
) -> BuddyResult<BTreeMap<K, T>> {
    let records = records(method, outcome, policy)?;
    fold(&records).map_err(BuddyError::from)
}

/// Reads one named field of the first row.
pub fn first_field(
    method: &str,
    outcome: WireResult,
    policy: SentinelPolicy,
    field: &str,
) -> BuddyResult<Option<String>> {
    records(method, outcome, policy)?
        .first()
        .map(|record| record.required(field))
        .transpose()
        .map_err(BuddyError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MetadataItem, PhotoAlbum, User, user_record};

    const METHOD: &str = "MetaData_ApplicationMetaDataValue_Set";

    fn service(code: &str) -> WireResult {
        Err(WireError::Service(ServiceCode::new(code)))
    }

    #[test]
    fn test_boolean_from_text() {
        let ok = boolean(METHOD, Ok(RawPayload::text("1")), SentinelPolicy::STRICT);
        assert_eq!(ok, Ok(true));
        let zero = boolean(METHOD, Ok(RawPayload::text("0")), SentinelPolicy::STRICT);
        assert_eq!(zero, Ok(false));
    }

    #[test]
    fn test_sentinel_remaps_to_false() {
        let remapped = boolean(METHOD, service("-1"), SentinelPolicy::NEGATIVE_ONE);
        assert_eq!(remapped, Ok(false));

        let strict = boolean(METHOD, service("-1"), SentinelPolicy::STRICT).unwrap_err();
        assert!(strict.is_service_code("-1"));
    }

    #[test]
    fn test_other_codes_still_fail_under_lenient_policy() {
        let err = boolean(
            METHOD,
            service("UserTokenNotRecognized"),
            SentinelPolicy::NEGATIVE_ONE,
        )
        .unwrap_err();
        assert!(err.is_service_code("UserTokenNotRecognized"));
    }

    #[test]
    fn test_transport_failure_short_circuits() {
        let outcome: WireResult = Err(WireError::Transport("timed out".into()));
        let err = optional::<MetadataItem>(METHOD, outcome, SentinelPolicy::NEGATIVE_ONE)
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_empty_is_success() {
        let none = optional::<MetadataItem>(
            METHOD,
            Ok(RawPayload::Records(Vec::new())),
            SentinelPolicy::STRICT,
        );
        assert_eq!(none, Ok(None));
        let empty = list::<User>(METHOD, Ok(RawPayload::Empty), SentinelPolicy::STRICT);
        assert_eq!(empty, Ok(Vec::new()));
        assert_eq!(
            text(METHOD, Ok(RawPayload::text("")), SentinelPolicy::STRICT),
            Ok(None)
        );
    }

    #[test]
    fn test_hydration_fault_fails_whole_list() {
        let rows = vec![user_record(1, "a"), user_record(2, "b").with("UserAge", "old")];
        let err = list::<User>(METHOD, Ok(RawPayload::Records(rows)), SentinelPolicy::STRICT)
            .unwrap_err();
        assert!(err.is_hydration());
    }

    #[test]
    fn test_adapter_is_pure() {
        let make = || Ok(RawPayload::Records(vec![user_record(1, "a"), user_record(2, "b")]));
        let first = list::<User>(METHOD, make(), SentinelPolicy::STRICT);
        let second = list::<User>(METHOD, make(), SentinelPolicy::STRICT);
        assert_eq!(first, second);
        assert_eq!(first.unwrap().len(), 2);
    }

    #[test]
    fn test_scalar_where_records_expected() {
        let err = list::<User>(METHOD, Ok(RawPayload::text("OK")), SentinelPolicy::STRICT)
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_integer_and_timestamp() {
        assert_eq!(
            integer(METHOD, Ok(RawPayload::text(" 42 ")), SentinelPolicy::STRICT),
            Ok(Some(42))
        );
        assert!(integer(METHOD, Ok(RawPayload::text("x")), SentinelPolicy::STRICT)
            .unwrap_err()
            .is_hydration());
        let date = timestamp(
            METHOD,
            Ok(RawPayload::text("2/3/2013 1:02:03 PM")),
            SentinelPolicy::STRICT,
        )
        .unwrap();
        assert!(date.is_some());
    }

    #[test]
    fn test_grouped_and_first_field() {
        let rows = vec![
            WireRecord::new()
                .with("AlbumID", "1")
                .with("AlbumName", "a")
                .with("PhotoID", "5"),
            WireRecord::new()
                .with("AlbumID", "1")
                .with("AlbumName", "a")
                .with("PhotoID", "6"),
        ];
        let albums = grouped(
            METHOD,
            Ok(RawPayload::Records(rows.clone())),
            SentinelPolicy::STRICT,
            PhotoAlbum::group_rows,
        )
        .unwrap();
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[&1].pictures.len(), 2);

        let field = first_field(
            METHOD,
            Ok(RawPayload::Records(rows)),
            SentinelPolicy::STRICT,
            "PhotoID",
        );
        assert_eq!(field, Ok(Some("5".to_string())));
    }
}
