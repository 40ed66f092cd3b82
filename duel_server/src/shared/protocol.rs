use actix::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::{
    board::{ActiveDefender, Board},
    card::Card,
};

// --- Client to Server Messages ---

/// 클라이언트가 보낼 수 있는 이벤트.
/// 내부 이벤트(create_match, start_game, apply_effect 등)는 여기 없으므로 위조할 수 없습니다.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientMessage {
    /// 매칭 대기열 진입 요청
    QueueUp,

    /// 매칭 대기열 이탈 요청
    Dequeue,

    /// match_found 로 받은 match id 수락
    MatchConfirmed(String),

    /// match_found 로 받은 match id 거절
    MatchDeclined(String),

    /// 멀리건: 시작 핸드에서 버릴 카드 id 목록
    CardsDiscarded { game_id: String, cards: Vec<String> },

    EndTurn(String),

    PlayCard { game_id: String, card_id: String },

    /// target 이 없으면 상대 플레이어를 공격합니다.
    Attack {
        game_id: String,
        attacker: String,
        #[serde(default)]
        target: Option<String>,
    },
}

// --- Server to Client Messages ---

#[derive(Serialize, Deserialize, Message, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerMessage {
    /// 연결 직후 한 번. 서버가 할당한 player id 를 알려줍니다.
    Welcome { player_id: Uuid },

    WaitForMatch,

    MatchFound { match_id: Uuid },

    Dequeued,

    /// 매치 수락 직후에는 hand 가 없고, 멀리건 직후에는 새 핸드가 담깁니다.
    WaitOtherPlayers {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hand: Option<Vec<Card>>,
    },

    MatchCanceled,

    StartingHand { game_id: Uuid, cards: Vec<Card> },

    StartTurn {
        game_id: Uuid,
        /// 턴 제한 시간 (ms)
        duration: u64,
        drawn_card: Option<Card>,
        mana: u32,
        cards_left: usize,
        hand_size: usize,
    },

    WaitTurn,

    CardPlayed {
        game_id: Uuid,
        player_id: Uuid,
        mana: u32,
        card: ActiveDefender,
    },

    /// 받는 플레이어 시점의 보드
    AttackResult {
        own_board: Board,
        opponent_board: Board,
    },

    DamageTaken { player_id: Uuid, health: u32 },

    GameOver { winner: Uuid, loser: Uuid },

    Error { message: String },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServerMessage::Welcome { .. } => "welcome",
            ServerMessage::WaitForMatch => "wait_for_match",
            ServerMessage::MatchFound { .. } => "match_found",
            ServerMessage::Dequeued => "dequeued",
            ServerMessage::WaitOtherPlayers { .. } => "wait_other_players",
            ServerMessage::MatchCanceled => "match_canceled",
            ServerMessage::StartingHand { .. } => "starting_hand",
            ServerMessage::StartTurn { .. } => "start_turn",
            ServerMessage::WaitTurn => "wait_turn",
            ServerMessage::CardPlayed { .. } => "card_played",
            ServerMessage::AttackResult { .. } => "attack_result",
            ServerMessage::DamageTaken { .. } => "damage_taken",
            ServerMessage::GameOver { .. } => "game_over",
            ServerMessage::Error { .. } => "error",
        }
    }
}
