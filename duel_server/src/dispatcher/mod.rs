use actix::{Actor, Context};
use tracing::info;

use crate::dispatcher::subscriber::Subscriber;

pub mod handlers;
pub mod messages;
pub mod subscriber;

/// 프로세스 전역 이벤트 버스.
/// 등록된 모든 핸들러에게 등록 순서대로 이벤트를 전달합니다.
pub struct Dispatcher {
    pub handlers: Vec<Subscriber>,
}

impl Actor for Dispatcher {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("Dispatcher started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("Dispatcher stopped with {} handlers", self.handlers.len());
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
