use metrics::INVALID_CLIENT_MESSAGES_TOTAL;
use tracing::warn;

use crate::{session::Ctx, shared::protocol::ServerMessage};

/// ServerMessage 를 JSON 텍스트 프레임으로 보냅니다. 직렬화 실패는 로그만 남깁니다.
pub fn send_message(ctx: &mut Ctx, msg: &ServerMessage) {
    match serde_json::to_string(msg) {
        Ok(json) => ctx.text(json),
        Err(e) => warn!("Failed to serialize ServerMessage::{}: {}", msg.name(), e),
    }
}

/// 파싱할 수 없는 프레임에 대한 응답
pub fn send_invalid_format(ctx: &mut Ctx) {
    // Metrics: 잘못된 클라이언트 메시지 카운트
    INVALID_CLIENT_MESSAGES_TOTAL.inc();
    send_message(ctx, &ServerMessage::error("Invalid message format"));
}
