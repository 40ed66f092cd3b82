use actix::{Addr, Recipient};
use uuid::Uuid;

use crate::{
    dispatcher::messages::Process,
    game::{game_actor::GameActor, game_manager::GameManager},
    matchmaking::{match_actor::MatchActor, matchmaker::Matchmaker, queue_manager::QueueManager},
};

#[derive(Clone)]
pub enum HandlerAddr {
    QueueManager(Addr<QueueManager>),
    Matchmaker(Addr<Matchmaker>),
    Match(Addr<MatchActor>),
    GameManager(Addr<GameManager>),
    Game(Addr<GameActor>),
    /// Process 만 받을 수 있으면 어떤 액터든
    Recipient(Recipient<Process>),
}

/// Dispatcher 에 등록된 핸들러. handler_id 로 식별합니다.
#[derive(Clone)]
pub struct Subscriber {
    pub handler_id: Uuid,
    pub addr: HandlerAddr,
}

impl Subscriber {
    pub fn queue_manager(addr: Addr<QueueManager>) -> Self {
        Self {
            handler_id: Uuid::new_v4(),
            addr: HandlerAddr::QueueManager(addr),
        }
    }

    pub fn matchmaker(addr: Addr<Matchmaker>) -> Self {
        Self {
            handler_id: Uuid::new_v4(),
            addr: HandlerAddr::Matchmaker(addr),
        }
    }

    pub fn game_manager(addr: Addr<GameManager>) -> Self {
        Self {
            handler_id: Uuid::new_v4(),
            addr: HandlerAddr::GameManager(addr),
        }
    }

    /// Match 는 match id 로 등록하고 해제합니다.
    pub fn matched(match_id: Uuid, addr: Addr<MatchActor>) -> Self {
        Self {
            handler_id: match_id,
            addr: HandlerAddr::Match(addr),
        }
    }

    /// Game 은 game id 로 등록하고 해제합니다.
    pub fn game(game_id: Uuid, addr: Addr<GameActor>) -> Self {
        Self {
            handler_id: game_id,
            addr: HandlerAddr::Game(addr),
        }
    }

    pub fn recipient(handler_id: Uuid, recipient: Recipient<Process>) -> Self {
        Self {
            handler_id,
            addr: HandlerAddr::Recipient(recipient),
        }
    }

    pub fn kind(&self) -> &'static str {
        match &self.addr {
            HandlerAddr::QueueManager(_) => "queue_manager",
            HandlerAddr::Matchmaker(_) => "matchmaker",
            HandlerAddr::Match(_) => "match",
            HandlerAddr::GameManager(_) => "game_manager",
            HandlerAddr::Game(_) => "game",
            HandlerAddr::Recipient(_) => "recipient",
        }
    }

    pub fn do_send_process(&self, msg: Process) {
        match &self.addr {
            HandlerAddr::QueueManager(addr) => addr.do_send(msg),
            HandlerAddr::Matchmaker(addr) => addr.do_send(msg),
            HandlerAddr::Match(addr) => addr.do_send(msg),
            HandlerAddr::GameManager(addr) => addr.do_send(msg),
            HandlerAddr::Game(addr) => addr.do_send(msg),
            HandlerAddr::Recipient(recipient) => recipient.do_send(msg),
        }
    }
}
