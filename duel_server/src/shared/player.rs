use actix::Recipient;
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

use crate::shared::protocol::ServerMessage;

/// 연결된 플레이어에 대한 참조.
/// 식별은 id 로만 하고, 응답은 연결 계층이 소유한 outbox 로 보냅니다.
#[derive(Clone)]
pub struct Player {
    id: Uuid,
    outbox: Recipient<ServerMessage>,
}

impl Player {
    pub fn new(id: Uuid, outbox: Recipient<ServerMessage>) -> Self {
        Self { id, outbox }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 연결이 이미 끊겼으면 메시지는 버려집니다.
    pub fn send(&self, msg: ServerMessage) {
        self.outbox.do_send(msg);
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player").field("id", &self.id).finish()
    }
}
