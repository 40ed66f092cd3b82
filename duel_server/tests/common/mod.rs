#![allow(dead_code)]

use actix::{Actor, Addr, Context, Handler};
use duel_server::{
    dispatcher::{
        messages::{Dispatch, HandlerCount},
        Dispatcher,
    },
    env::{GameSettings, MatchmakingSettings},
    game::card::Card,
    shared::{
        event::{Event, EventKind},
        player::Player,
        protocol::ServerMessage,
    },
    spawn_engine,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

pub const RECV_TIMEOUT: Duration = Duration::from_secs(3);
pub const SILENCE: Duration = Duration::from_millis(150);

/// Dispatcher + 상주 핸들러 3개
pub const RESIDENT_HANDLERS: usize = 3;

pub fn setup_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub fn matchmaking_settings(confirm_timeout_ms: u64) -> MatchmakingSettings {
    MatchmakingSettings {
        confirm_timeout_ms,
        ..MatchmakingSettings::default()
    }
}

pub fn game_settings(turn_duration_ms: u64, mulligan_timeout_ms: u64) -> GameSettings {
    GameSettings {
        turn_duration_ms,
        mulligan_timeout_ms,
        deck_seed: Some(7),
    }
}

/// 타이머가 테스트 도중 끼어들지 않을 만큼 긴 설정
pub fn engine() -> Addr<Dispatcher> {
    spawn_engine(&matchmaking_settings(60_000), &game_settings(60_000, 60_000))
}

/// 플레이어 연결 대신 받은 ServerMessage 를 채널로 넘겨주는 액터
pub struct Inbox {
    tx: mpsc::UnboundedSender<ServerMessage>,
}

impl Actor for Inbox {
    type Context = Context<Self>;
}

impl Handler<ServerMessage> for Inbox {
    type Result = ();

    fn handle(&mut self, msg: ServerMessage, _ctx: &mut Self::Context) -> Self::Result {
        let _ = self.tx.send(msg);
    }
}

pub struct TestPlayer {
    pub player: Player,
    rx: mpsc::UnboundedReceiver<ServerMessage>,
    _inbox: Addr<Inbox>,
}

impl TestPlayer {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let inbox = Inbox { tx }.start();
        Self {
            player: Player::new(Uuid::new_v4(), inbox.clone().recipient()),
            rx,
            _inbox: inbox,
        }
    }

    pub fn id(&self) -> Uuid {
        self.player.id()
    }

    pub fn send(&self, dispatcher: &Addr<Dispatcher>, kind: EventKind) {
        dispatcher.do_send(Dispatch(Event::from_player(self.player.clone(), kind)));
    }

    pub async fn recv(&mut self) -> ServerMessage {
        tokio::time::timeout(RECV_TIMEOUT, self.rx.recv())
            .await
            .expect("Timed out waiting for a server message")
            .expect("Inbox channel closed")
    }

    pub async fn expect_silence(&mut self) {
        if let Ok(Some(msg)) = tokio::time::timeout(SILENCE, self.rx.recv()).await {
            panic!("Expected no message for {}, got {:?}", self.id(), msg);
        }
    }

    pub async fn expect(&mut self, expected: ServerMessage) {
        let msg = self.recv().await;
        assert_eq!(msg, expected, "unexpected message for {}", self.id());
    }

    pub async fn expect_match_found(&mut self) -> Uuid {
        match self.recv().await {
            ServerMessage::MatchFound { match_id } => match_id,
            other => panic!("Expected match_found, got {:?}", other),
        }
    }

    pub async fn expect_starting_hand(&mut self) -> (Uuid, Vec<Card>) {
        match self.recv().await {
            ServerMessage::StartingHand { game_id, cards } => (game_id, cards),
            other => panic!("Expected starting_hand, got {:?}", other),
        }
    }

    pub async fn expect_hand(&mut self) -> Vec<Card> {
        match self.recv().await {
            ServerMessage::WaitOtherPlayers { hand: Some(hand) } => hand,
            other => panic!("Expected wait_other_players with hand, got {:?}", other),
        }
    }

    pub async fn expect_start_turn(&mut self) -> ServerMessage {
        let msg = self.recv().await;
        assert!(
            matches!(msg, ServerMessage::StartTurn { .. }),
            "Expected start_turn, got {:?}",
            msg
        );
        msg
    }

    pub async fn expect_error(&mut self, message: &str) {
        self.expect(ServerMessage::error(message)).await;
    }
}

pub fn internal(dispatcher: &Addr<Dispatcher>, kind: EventKind) {
    dispatcher.do_send(Dispatch(Event::internal(kind)));
}

/// 두 플레이어를 대기열에 넣고 match_found 까지 진행합니다.
pub async fn matched_pair(dispatcher: &Addr<Dispatcher>) -> (TestPlayer, TestPlayer, Uuid) {
    let mut a = TestPlayer::new();
    let mut b = TestPlayer::new();

    a.send(dispatcher, EventKind::QueueUp);
    b.send(dispatcher, EventKind::QueueUp);

    a.expect(ServerMessage::WaitForMatch).await;
    b.expect(ServerMessage::WaitForMatch).await;

    let match_id = a.expect_match_found().await;
    assert_eq!(b.expect_match_found().await, match_id);

    (a, b, match_id)
}

pub struct StartedGame {
    pub a: TestPlayer,
    pub b: TestPlayer,
    pub game_id: Uuid,
    pub hand_a: Vec<Card>,
    pub hand_b: Vec<Card>,
}

/// 매칭, 수락을 거쳐 starting_hand 까지 진행합니다. players = [a, b].
pub async fn started_game(dispatcher: &Addr<Dispatcher>) -> StartedGame {
    let (mut a, mut b, match_id) = matched_pair(dispatcher).await;

    a.send(
        dispatcher,
        EventKind::MatchConfirmed {
            match_id: match_id.to_string(),
        },
    );
    b.send(
        dispatcher,
        EventKind::MatchConfirmed {
            match_id: match_id.to_string(),
        },
    );
    a.expect(ServerMessage::WaitOtherPlayers { hand: None }).await;
    b.expect(ServerMessage::WaitOtherPlayers { hand: None }).await;

    let (game_id, hand_a) = a.expect_starting_hand().await;
    let (game_id_b, hand_b) = b.expect_starting_hand().await;
    assert_eq!(game_id, game_id_b);

    StartedGame {
        a,
        b,
        game_id,
        hand_a,
        hand_b,
    }
}

/// 둘 다 멀리건 없이 넘기고 턴 루프를 시작합니다. b 가 선공입니다.
pub async fn turns_started(dispatcher: &Addr<Dispatcher>) -> StartedGame {
    let mut game = started_game(dispatcher).await;
    let game_id = game.game_id.to_string();

    for player in [&game.a, &game.b] {
        player.send(
            dispatcher,
            EventKind::CardsDiscarded {
                game_id: game_id.clone(),
                cards: Vec::new(),
            },
        );
    }
    game.hand_a = game.a.expect_hand().await;
    game.hand_b = game.b.expect_hand().await;

    game.b.expect_start_turn().await;
    game.a.expect(ServerMessage::WaitTurn).await;

    game
}

pub async fn wait_for_handler_count(dispatcher: &Addr<Dispatcher>, expected: usize) {
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    loop {
        let count = dispatcher.send(HandlerCount).await.expect("Dispatcher is gone");
        if count == expected {
            return;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("Expected {} handlers, still {}", expected, count);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
