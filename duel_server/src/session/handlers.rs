use actix::{ActorContext, Handler, StreamHandler};
use actix_web_actors::ws::{self, Message, ProtocolError};
use std::time::Instant;
use tracing::{debug, warn};

use crate::{
    session::{
        helper::{send_invalid_format, send_message},
        Session,
    },
    shared::protocol::{ClientMessage, ServerMessage},
};

// 엔진 액터들은 Player outbox 를 통해 Session 으로 응답을 보냄.
impl Handler<ServerMessage> for Session {
    type Result = ();

    fn handle(&mut self, msg: ServerMessage, ctx: &mut Self::Context) -> Self::Result {
        debug!("-> {} {}", self.player_id, msg.name());
        send_message(ctx, &msg);
    }
}

impl StreamHandler<Result<Message, ProtocolError>> for Session {
    fn handle(&mut self, msg: Result<Message, ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    debug!("<- {} {:?}", self.player_id, client_msg);
                    self.dispatch(ctx, client_msg.into());
                }
                Err(e) => {
                    warn!("Failed to parse client message from {}: {}", self.player_id, e);
                    send_invalid_format(ctx);
                }
            },
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Binary(_)) => {
                send_invalid_format(ctx);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("WebSocket protocol error for {}: {}", self.player_id, e);
                ctx.stop();
            }
        }
    }
}
