mod common;

use buddy_core::WireRecord;
use buddy_interaction::{MetadataSearch, NearbySearch};
use common::{ScriptedTransport, client, logged_in};

fn item(key: &str, value: &str, latitude: &str, longitude: &str) -> WireRecord {
    WireRecord::new()
        .with("MetaKey", key)
        .with("MetaValue", value)
        .with("MetaLatitude", latitude)
        .with("MetaLongitude", longitude)
        .with("LastUpdateDate", "5/6/2013 8:15:00 AM")
}

#[tokio::test]
async fn test_set_maps_scalar_and_sentinel_answers() {
    let transport = ScriptedTransport::new();
    transport.reply_text("1").reply_text("0").reply_code("-1");
    let metadata = client(&transport).metadata();

    assert!(metadata.set("color", "blue", None, None).await.unwrap());
    assert!(!metadata.set("color", "blue", None, None).await.unwrap());
    assert!(!metadata.set("color", "blue", None, None).await.unwrap());

    let call = &transport.calls()[0];
    assert_eq!(call.method, "MetaData_ApplicationMetaDataValue_Set");
    assert_eq!(call.params.get("MetaKey"), Some("color"));
    assert_eq!(call.params.get("MetaValue"), Some("blue"));
    assert_eq!(call.params.get("MetaLatitude"), Some("0"));
    assert_eq!(call.params.get("ApplicationTag"), Some(""));
}

#[tokio::test]
async fn test_set_rejects_bad_input_before_io() {
    let transport = ScriptedTransport::new();
    let metadata = client(&transport).metadata();

    let err = metadata.set("", "v", None, None).await.unwrap_err();
    assert_eq!(err.argument_name(), Some("key"));

    let err = metadata
        .set("k", "v", Some((12.0, 200.0)), None)
        .await
        .unwrap_err();
    assert_eq!(err.argument_name(), Some("longitude"));

    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_get_missing_key_is_none() {
    let transport = ScriptedTransport::new();
    transport.reply_records(Vec::new());

    let found = client(&transport)
        .metadata()
        .get("missing")
        .await
        .expect("Absence is not an error");

    assert!(found.is_none());
}

#[tokio::test]
async fn test_get_all_keys_items_by_key() {
    let transport = ScriptedTransport::new();
    transport.reply_records(vec![
        item("b", "2", "", ""),
        item("a", "1", "10.0", "20.0"),
    ]);

    let all = client(&transport).metadata().get_all().await.unwrap();

    assert_eq!(all.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(all["a"].value, "1");
    assert!(all["a"].location.is_some());
    assert!(all["b"].location.is_none());
}

#[tokio::test]
async fn test_user_scope_carries_token() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport.reply_text("1");

    assert!(user.metadata().delete("color").await.unwrap());

    let call = &transport.calls()[0];
    assert_eq!(call.method, "MetaData_UserMetaDataValue_Delete");
    assert_eq!(call.params.get("UserToken"), Some("UT-token-1"));
}

#[tokio::test]
async fn test_find_reports_distance_from_origin() {
    let transport = ScriptedTransport::new();
    transport.reply_records(vec![
        item("here", "x", "47.6062", "-122.3321"),
        item("there", "y", "45.5152", "-122.6784"),
    ]);

    let search = MetadataSearch {
        area: NearbySearch::around(47.6062, -122.3321).within_meters(500_000),
        key: Some("%".to_string()),
        value: None,
    };
    let found = client(&transport).metadata().find(&search).await.unwrap();

    assert_eq!(found.len(), 2);
    let here = found[0].distance.expect("Should have a distance");
    let there = found[1].distance.expect("Should have a distance");
    assert!(here.meters < 1.0);
    // Seattle to Portland is roughly 234 km.
    assert!((there.kilometers - 234.0).abs() < 5.0);

    let call = &transport.calls()[0];
    assert_eq!(call.params.get("SearchDistance"), Some("500000"));
    assert_eq!(call.params.get("SearchLatitude"), Some("47.6062"));
    assert_eq!(call.params.get("MetaKeySearch"), Some("%"));
}

#[tokio::test]
async fn test_batch_sum_joins_prefixes() {
    let transport = ScriptedTransport::new();
    transport.reply_records(vec![
        WireRecord::new()
            .with("MetaKey", "score_")
            .with("KeyCount", "3")
            .with("TotalValue", "12.5"),
        WireRecord::new()
            .with("MetaKey", "level_")
            .with("KeyCount", "2")
            .with("TotalValue", "4"),
    ]);

    let sums = client(&transport)
        .metadata()
        .batch_sum(&["score_", "level_"], &NearbySearch::anywhere())
        .await
        .unwrap();

    assert_eq!(sums.len(), 2);
    assert_eq!(sums[0].total, 12.5);
    assert_eq!(sums[1].key_count, 2);
    assert_eq!(
        transport.calls()[0].params.get("MetaKeyCollection"),
        Some("score_;level_")
    );
}

#[tokio::test]
async fn test_batch_sum_requires_prefixes() {
    let transport = ScriptedTransport::new();

    let err = client(&transport)
        .metadata()
        .batch_sum(&[], &NearbySearch::anywhere())
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(transport.call_count(), 0);
}
