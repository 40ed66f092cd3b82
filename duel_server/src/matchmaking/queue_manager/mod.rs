use actix::{Actor, Context};
use tracing::info;

use crate::{matchmaking::queue::Queue, shared::player::Player};

pub mod handlers;

/// 매치 하나에 필요한 인원
pub const PLAYERS_PER_MATCH: usize = 2;

/// 대기열을 소유하고, 대기열이 차면 CreateMatch 를 발행합니다.
pub struct QueueManager {
    pub queue: Queue<Player>,
}

impl Actor for QueueManager {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("QueueManager started");
    }
}

impl QueueManager {
    pub fn new() -> Self {
        Self {
            queue: Queue::new(),
        }
    }
}

impl Default for QueueManager {
    fn default() -> Self {
        Self::new()
    }
}
