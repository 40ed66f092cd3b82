mod common;

use common::{
    engine, game_settings, matched_pair, matchmaking_settings, setup_logger,
    wait_for_handler_count, TestPlayer, RESIDENT_HANDLERS,
};
use duel_server::{
    shared::{event::EventKind, protocol::ServerMessage},
    spawn_engine,
};
use uuid::Uuid;

fn confirm(match_id: Uuid) -> EventKind {
    EventKind::MatchConfirmed {
        match_id: match_id.to_string(),
    }
}

fn decline(match_id: Uuid) -> EventKind {
    EventKind::MatchDeclined {
        match_id: match_id.to_string(),
    }
}

#[actix::test]
async fn both_confirm_starts_a_game() {
    setup_logger();
    let dispatcher = engine();
    let (mut a, mut b, match_id) = matched_pair(&dispatcher).await;

    a.send(&dispatcher, confirm(match_id));
    a.expect(ServerMessage::WaitOtherPlayers { hand: None }).await;
    a.expect_silence().await;

    b.send(&dispatcher, confirm(match_id));
    b.expect(ServerMessage::WaitOtherPlayers { hand: None }).await;

    let (game_id, cards) = a.expect_starting_hand().await;
    assert_eq!(cards.len(), 3);
    let (game_id_b, cards_b) = b.expect_starting_hand().await;
    assert_eq!(game_id, game_id_b);
    assert_eq!(cards_b.len(), 3);

    // Match 는 빠지고 Game 이 등록됩니다.
    wait_for_handler_count(&dispatcher, RESIDENT_HANDLERS + 1).await;
}

#[actix::test]
async fn decline_cancels_and_requeues_confirmed_players() {
    setup_logger();
    let dispatcher = engine();
    let (mut a, mut b, match_id) = matched_pair(&dispatcher).await;

    a.send(&dispatcher, confirm(match_id));
    a.expect(ServerMessage::WaitOtherPlayers { hand: None }).await;

    b.send(&dispatcher, decline(match_id));
    a.expect(ServerMessage::MatchCanceled).await;
    b.expect(ServerMessage::MatchCanceled).await;

    // 수락했던 a 만 다시 대기열로
    a.expect(ServerMessage::WaitForMatch).await;
    b.expect_silence().await;
    wait_for_handler_count(&dispatcher, RESIDENT_HANDLERS).await;

    let mut c = TestPlayer::new();
    c.send(&dispatcher, EventKind::QueueUp);
    c.expect(ServerMessage::WaitForMatch).await;

    let rematch = a.expect_match_found().await;
    assert_eq!(c.expect_match_found().await, rematch);
    assert_ne!(rematch, match_id);
}

#[actix::test]
async fn confirmation_timeout_cancels_the_match() {
    setup_logger();
    let dispatcher = spawn_engine(&matchmaking_settings(200), &game_settings(60_000, 60_000));
    let (mut a, mut b, match_id) = matched_pair(&dispatcher).await;

    a.send(&dispatcher, confirm(match_id));
    a.expect(ServerMessage::WaitOtherPlayers { hand: None }).await;

    a.expect(ServerMessage::MatchCanceled).await;
    b.expect(ServerMessage::MatchCanceled).await;
    a.expect(ServerMessage::WaitForMatch).await;
    b.expect_silence().await;

    // 취소 후 늦게 온 수락은 무시됩니다.
    b.send(&dispatcher, confirm(match_id));
    b.expect_silence().await;
}

#[actix::test]
async fn foreign_or_malformed_match_ids_are_ignored() {
    setup_logger();
    let dispatcher = engine();
    let (mut a, mut b, match_id) = matched_pair(&dispatcher).await;

    a.send(&dispatcher, confirm(Uuid::new_v4()));
    a.send(
        &dispatcher,
        EventKind::MatchDeclined {
            match_id: "not-a-uuid".to_string(),
        },
    );
    a.expect_silence().await;
    b.expect_silence().await;

    // 매치에 속하지 않은 플레이어의 거절도 무시됩니다.
    let outsider = TestPlayer::new();
    outsider.send(&dispatcher, decline(match_id));
    a.expect_silence().await;

    a.send(&dispatcher, confirm(match_id));
    b.send(&dispatcher, confirm(match_id));
    a.expect(ServerMessage::WaitOtherPlayers { hand: None }).await;
    b.expect(ServerMessage::WaitOtherPlayers { hand: None }).await;
    a.expect_starting_hand().await;
    b.expect_starting_hand().await;
}

#[actix::test]
async fn duplicate_confirmation_is_recorded_once() {
    setup_logger();
    let dispatcher = engine();
    let (mut a, mut b, match_id) = matched_pair(&dispatcher).await;

    a.send(&dispatcher, confirm(match_id));
    a.send(&dispatcher, confirm(match_id));
    a.expect(ServerMessage::WaitOtherPlayers { hand: None }).await;
    a.expect(ServerMessage::WaitOtherPlayers { hand: None }).await;

    // 한 명만 수락한 상태이므로 게임은 시작되지 않습니다.
    a.expect_silence().await;
    b.expect_silence().await;
}
