use actix::{Addr, Message};
use uuid::Uuid;

use crate::{
    dispatcher::{subscriber::Subscriber, Dispatcher},
    shared::event::Event,
};

#[derive(Message)]
#[rtype(result = "()")]
pub struct Register(pub Subscriber);

#[derive(Message)]
#[rtype(result = "()")]
pub struct Unregister {
    pub handler_id: Uuid,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Dispatch(pub Event);

#[derive(Message)]
#[rtype(result = "usize")]
pub struct HandlerCount;

/// Dispatcher 가 각 핸들러에게 보내는 메시지.
/// 후속 이벤트는 dispatcher 로 do_send 해야 하며 절대 기다리지 않습니다.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Process {
    pub event: Event,
    pub dispatcher: Addr<Dispatcher>,
}
