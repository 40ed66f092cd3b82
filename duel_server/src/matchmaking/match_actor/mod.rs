use actix::{Actor, Context, SpawnHandle};
use std::time::{Duration, Instant};
use tracing::info;
use uuid::Uuid;

use crate::shared::player::Player;

pub mod handlers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    AwaitingConfirmation,
    Confirmed,
    Cancelled,
}

/// 매칭된 두 플레이어의 수락/거절을 기다리는 Match 액터.
/// 모두 수락하면 StartGame, 한 명이라도 거절하거나 시간이 지나면 취소됩니다.
pub struct MatchActor {
    pub match_id: Uuid,
    pub players: Vec<Player>,
    pub confirmed: Vec<Player>,
    pub state: MatchState,
    pub timeout: Duration,
    pub timer: Option<SpawnHandle>,
    /// 타이머가 보낸 거절인지 구분하기 위한 플래그 (metrics 용)
    pub timed_out: bool,
    pub created_at: Instant,
}

impl Actor for MatchActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("Match {} awaiting confirmation", self.match_id);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("Match {} stopped in state {:?}", self.match_id, self.state);
    }
}

impl MatchActor {
    pub fn new(match_id: Uuid, players: Vec<Player>, timeout: Duration) -> Self {
        Self {
            match_id,
            players,
            confirmed: Vec::new(),
            state: MatchState::AwaitingConfirmation,
            timeout,
            timer: None,
            timed_out: false,
            created_at: Instant::now(),
        }
    }

    pub fn is_member(&self, player: &Player) -> bool {
        self.players.contains(player)
    }

    pub fn all_confirmed(&self) -> bool {
        self.players.iter().all(|p| self.confirmed.contains(p))
    }
}
