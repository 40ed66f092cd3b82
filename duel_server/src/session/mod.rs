use actix::{Actor, ActorContext, Addr, AsyncContext};
use actix_web_actors::ws;
use metrics::ACTIVE_WS_CONNECTIONS;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dispatcher::{messages::Dispatch, Dispatcher},
    env::MatchmakingSettings,
    session::helper::send_message,
    shared::{
        event::{Event, EventKind},
        player::Player,
        protocol::ServerMessage,
    },
};

pub mod handlers;
pub mod helper;

pub type Ctx = ws::WebsocketContext<Session>;

/// 클라이언트 WebSocket 연결 하나. 플레이어 identity 와 outbox 를 소유합니다.
pub struct Session {
    player_id: Uuid,
    dispatcher: Addr<Dispatcher>,
    last_heartbeat: Instant,
    heartbeat_interval: Duration,
    client_timeout: Duration,
    shutdown_token: CancellationToken,
}

impl Session {
    pub fn new(
        dispatcher: Addr<Dispatcher>,
        settings: &MatchmakingSettings,
        shutdown_token: CancellationToken,
    ) -> Self {
        Self {
            player_id: Uuid::new_v4(),
            dispatcher,
            last_heartbeat: Instant::now(),
            heartbeat_interval: settings.heartbeat_interval(),
            client_timeout: settings.heartbeat_timeout(),
            shutdown_token,
        }
    }

    fn player(&self, ctx: &mut Ctx) -> Player {
        Player::new(self.player_id, ctx.address().recipient())
    }

    fn dispatch(&self, ctx: &mut Ctx, kind: EventKind) {
        let player = self.player(ctx);
        self.dispatcher
            .do_send(Dispatch(Event::from_player(player, kind)));
    }

    fn start_heartbeat(&self, ctx: &mut Ctx) {
        ctx.run_interval(self.heartbeat_interval, |act, ctx| {
            if act.shutdown_token.is_cancelled() {
                info!("Server shutting down. Closing connection of {}", act.player_id);
                ctx.close(Some(ws::CloseCode::Away.into()));
                ctx.stop();
                return;
            }
            if Instant::now().duration_since(act.last_heartbeat) > act.client_timeout {
                warn!(
                    "Heartbeat timeout for player {}. Closing connection.",
                    act.player_id
                );
                ctx.stop();
                return;
            }
            ctx.ping(b"heartbeat");
        });
    }
}

impl Actor for Session {
    type Context = Ctx;

    fn started(&mut self, ctx: &mut Self::Context) {
        ACTIVE_WS_CONNECTIONS.inc();
        info!("Player {} connected", self.player_id);

        self.start_heartbeat(ctx);
        send_message(
            ctx,
            &ServerMessage::Welcome {
                player_id: self.player_id,
            },
        );
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        ACTIVE_WS_CONNECTIONS.dec();
        info!("Player {} disconnected", self.player_id);

        // 대기열에 남아 있을 수 있으므로 정리 요청
        self.dispatch(ctx, EventKind::Dequeue);
    }
}
