mod common;

use buddy_core::WireRecord;
use buddy_interaction::{NewScore, PlayerInfo, ScoreSearch};
use common::{ScriptedTransport, client, logged_in};

fn score(user_id: i64, value: &str) -> WireRecord {
    WireRecord::new()
        .with("UserID", user_id.to_string())
        .with("UserName", format!("player{user_id}"))
        .with("ScoreBoardName", "arena")
        .with("Score", value)
        .with("ScoreDate", "5/6/2013 8:15:00 AM")
}

// ============================================================================
// Boards
// ============================================================================

#[tokio::test]
async fn test_high_scores_use_default_limit() {
    let transport = ScriptedTransport::new();
    transport.reply_records(vec![score(1, "900"), score(2, "850.5")]);

    let scores = client(&transport)
        .game_boards()
        .high_scores("arena", None)
        .await
        .expect("Should load the board");

    assert_eq!(scores.len(), 2);
    assert_eq!(scores[1].score, 850.5);
    let call = &transport.calls()[0];
    assert_eq!(call.method, "Game_Score_GetBoardHighScores");
    assert_eq!(call.params.get("ScoreBoardName"), Some("arena"));
    assert_eq!(call.params.get("RecordLimit"), Some("10"));
    assert_eq!(call.params.get("UserToken"), None);
}

#[tokio::test]
async fn test_board_queries_validate_before_io() {
    let transport = ScriptedTransport::new();
    let boards = client(&transport).game_boards();

    let err = boards.low_scores("", None).await.unwrap_err();
    assert_eq!(err.argument_name(), Some("boardName"));

    let err = boards.high_scores("arena", Some(-5)).await.unwrap_err();
    assert_eq!(err.argument_name(), Some("recordLimit"));

    let search = ScoreSearch {
        minimum_score: Some(f64::NAN),
        ..Default::default()
    };
    let err = boards.find_scores(&search).await.unwrap_err();
    assert_eq!(err.argument_name(), Some("minimumScore"));

    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_find_scores_sends_unset_filters_as_any() {
    let transport = ScriptedTransport::new();
    transport.reply_records(Vec::new());

    let scores = client(&transport)
        .game_boards()
        .find_scores(&ScoreSearch::default())
        .await
        .unwrap();

    assert!(scores.is_empty());
    let call = &transport.calls()[0];
    assert_eq!(call.params.get("MinimumScore"), Some("-1"));
    assert_eq!(call.params.get("UserID"), Some("-1"));
    assert_eq!(call.params.get("SearchBoard"), Some(""));
}

// ============================================================================
// Scores
// ============================================================================

#[tokio::test]
async fn test_add_score_rejects_non_finite_values_before_io() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    let scores = user.game_scores();

    for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let err = scores
            .add(&NewScore::new("arena", value))
            .await
            .unwrap_err();
        assert_eq!(err.argument_name(), Some("score"));
    }

    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_add_score_params() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport.reply_text("1");

    let mut new_score = NewScore::new("arena", 1250.5);
    new_score.one_per_player = true;
    assert!(user.game_scores().add(&new_score).await.unwrap());

    let call = &transport.calls()[0];
    assert_eq!(call.method, "Game_Score_Add");
    assert_eq!(call.params.get("ScoreValue"), Some("1250.5"));
    assert_eq!(call.params.get("ScoreBoardName"), Some("arena"));
    assert_eq!(call.params.get("OneScorePerPlayerBit"), Some("1"));
    assert_eq!(call.params.get("ScoreLatitude"), Some("0"));
}

#[tokio::test]
async fn test_delete_all_scores_maps_negative_one_to_false() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport.reply_code("-1");

    assert!(!user.game_scores().delete_all().await.unwrap());
    assert_eq!(transport.calls()[0].params.get("UserID"), Some("42"));
}

// ============================================================================
// Players
// ============================================================================

#[tokio::test]
async fn test_update_missing_player_is_false() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport.reply_code("-1");

    let player = PlayerInfo {
        name: "ada".to_string(),
        rank: Some("gold".to_string()),
        ..Default::default()
    };
    let updated = user.game_players().update(&player).await.unwrap();

    assert!(!updated);
    let call = &transport.calls()[0];
    assert_eq!(call.method, "Game_Player_Update");
    assert_eq!(call.params.get("PlayerName"), Some("ada"));
    assert_eq!(call.params.get("PlayerRank"), Some("gold"));
    assert_eq!(call.params.get("PlayerBoardName"), Some(""));
}

#[tokio::test]
async fn test_player_write_validates_before_io() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;

    let err = user
        .game_players()
        .add(&PlayerInfo::default())
        .await
        .unwrap_err();
    assert_eq!(err.argument_name(), Some("name"));

    let player = PlayerInfo {
        name: "ada".to_string(),
        location: Some((0.0, 181.0)),
        ..Default::default()
    };
    let err = user.game_players().add(&player).await.unwrap_err();
    assert_eq!(err.argument_name(), Some("longitude"));

    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_player_info_absent_is_none() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport.reply_records(Vec::new());

    assert!(user.game_players().info().await.unwrap().is_none());
}

// ============================================================================
// State
// ============================================================================

#[tokio::test]
async fn test_state_key_is_required() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    let state = user.game_state();

    assert_eq!(state.get("").await.unwrap_err().argument_name(), Some("key"));
    assert_eq!(
        state.add(" ", "v", None).await.unwrap_err().argument_name(),
        Some("key")
    );
    assert_eq!(state.remove("").await.unwrap_err().argument_name(), Some("key"));

    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_state_round_trip_against_service_answers() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport
        .reply_text("1")
        .reply_records(vec![
            WireRecord::new()
                .with("StateKey", "level")
                .with("StateValue", "7")
                .with("AppTag", "campaign"),
        ])
        .reply_code("-1");
    let state = user.game_state();

    assert!(state.add("level", "7", Some("campaign")).await.unwrap());
    let item = state.get("level").await.unwrap().expect("Should find the key");
    assert_eq!(item.value, "7");
    assert_eq!(item.app_tag, "campaign");
    assert!(!state.remove("level").await.unwrap());

    let calls = transport.calls();
    assert_eq!(
        transport.methods(),
        ["Game_State_Add", "Game_State_Get", "Game_State_Remove"]
    );
    assert_eq!(calls[0].params.get("ExternalUserID"), Some("42"));
    assert_eq!(calls[0].params.get("StateAppTag"), Some("campaign"));
}
