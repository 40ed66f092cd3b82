use uuid::Uuid;

use crate::{
    game::card::CardEffect,
    shared::{player::Player, protocol::ClientMessage},
};

/// Dispatcher 를 통해 모든 핸들러에게 전달되는 이벤트
#[derive(Debug, Clone)]
pub struct Event {
    pub player: Option<Player>,
    pub kind: EventKind,
}

impl Event {
    /// 플레이어와 무관한 내부 이벤트
    pub fn internal(kind: EventKind) -> Self {
        Self { player: None, kind }
    }

    pub fn from_player(player: Player, kind: EventKind) -> Self {
        Self {
            player: Some(player),
            kind,
        }
    }
}

#[derive(Debug, Clone)]
pub enum EventKind {
    QueueUp,
    Dequeue,
    CreateMatch { players: Vec<Player> },
    AskConfirmation { match_id: Uuid },
    MatchConfirmed { match_id: String },
    MatchDeclined { match_id: String },
    StartGame { players: Vec<Player> },
    CardsDiscarded { game_id: String, cards: Vec<String> },
    EndTurn { game_id: String },
    PlayCard { game_id: String, card_id: String },
    Attack {
        game_id: String,
        attacker: String,
        target: Option<String>,
    },
    ApplyEffect {
        game_id: String,
        card_id: String,
        effect: CardEffect,
    },
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::QueueUp => "queue_up",
            EventKind::Dequeue => "dequeue",
            EventKind::CreateMatch { .. } => "create_match",
            EventKind::AskConfirmation { .. } => "confirm_match",
            EventKind::MatchConfirmed { .. } => "match_confirmed",
            EventKind::MatchDeclined { .. } => "match_declined",
            EventKind::StartGame { .. } => "start_game",
            EventKind::CardsDiscarded { .. } => "cards_discarded",
            EventKind::EndTurn { .. } => "end_turn",
            EventKind::PlayCard { .. } => "play_card",
            EventKind::Attack { .. } => "attack",
            EventKind::ApplyEffect { .. } => "apply_effect",
        }
    }
}

impl From<ClientMessage> for EventKind {
    fn from(msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::QueueUp => EventKind::QueueUp,
            ClientMessage::Dequeue => EventKind::Dequeue,
            ClientMessage::MatchConfirmed(match_id) => EventKind::MatchConfirmed { match_id },
            ClientMessage::MatchDeclined(match_id) => EventKind::MatchDeclined { match_id },
            ClientMessage::CardsDiscarded { game_id, cards } => {
                EventKind::CardsDiscarded { game_id, cards }
            }
            ClientMessage::EndTurn(game_id) => EventKind::EndTurn { game_id },
            ClientMessage::PlayCard { game_id, card_id } => EventKind::PlayCard { game_id, card_id },
            ClientMessage::Attack {
                game_id,
                attacker,
                target,
            } => EventKind::Attack {
                game_id,
                attacker,
                target,
            },
        }
    }
}

/// 문자열 correlation id 가 주어진 id 와 일치하는지.
/// 파싱에 실패하면 남의 이벤트로 취급합니다.
pub fn addressed_to(raw: &str, id: Uuid) -> bool {
    Uuid::parse_str(raw).map_or(false, |parsed| parsed == id)
}
