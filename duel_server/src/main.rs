use actix_web::{get, web, App, Error, HttpRequest, HttpResponse, HttpServer};
use actix_web_actors::ws;
use duel_server::{
    env::Settings, errors::ServerError, session::Session, spawn_engine, AppState, LoggerManager,
};
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[get("/ws/")]
async fn duel_ws_route(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = Session::new(
        state.dispatcher_addr.clone(),
        &state.settings.matchmaking,
        state.shutdown_token.clone(),
    );

    ws::start(session, &req, stream)
}

async fn metrics_route(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    // Check auth token if configured
    if let Some(expected_token) = &state.settings.server.metrics_auth_token {
        let provided_token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "));

        if provided_token != Some(expected_token.as_str()) {
            return HttpResponse::Unauthorized().body("Unauthorized: Invalid or missing token");
        }
    }

    let metric_families = state.metrics_registry.gather();
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(format!("Metrics encode error: {}", e));
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}

async fn health_route() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 1. 환경변수 로드
    dotenv::dotenv().ok();

    // 2. 설정 파일 로드
    let settings = Settings::new().map_err(ServerError::from)?;

    // 3. 로거 초기화
    let logger_manager = Arc::new(LoggerManager::setup(&settings.logging));
    info!("Logger initialized");

    // 4. 전역 Shutdown Token 생성
    let shutdown_token = CancellationToken::new();

    // 5. Dispatcher 와 상주 핸들러(QueueManager, Matchmaker, GameManager) 시작
    let dispatcher_addr = spawn_engine(&settings.matchmaking, &settings.game);
    info!("Dispatcher and resident handlers started");

    // 6. Metrics 초기화
    let metrics_registry = prometheus::Registry::new();
    metrics::register_custom_metrics(&metrics_registry).map_err(ServerError::from)?;
    info!("Metrics initialized and registered");

    // 7. AppState 구성
    let app_state = AppState {
        settings: settings.clone(),
        dispatcher_addr,
        logger_manager,
        metrics_registry,
        shutdown_token: shutdown_token.clone(),
    };

    // 8. HTTP 서버 시작
    let bind_address = format!("{}:{}", settings.server.bind_address, settings.server.port);
    info!("Starting HTTP server on {}", bind_address);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .service(duel_ws_route)
            .route("/metrics", web::get().to(metrics_route))
            .route("/health", web::get().to(health_route))
    })
    .bind(&bind_address)?
    .run();
    let server_handle = server.handle();

    info!("Duel Server is running on {}", bind_address);

    // 9. 종료 신호 대기
    tokio::select! {
        // 서버 자체 종료 (드문 경우)
        res = &mut server => {
            error!("Server exited unexpectedly");
            return res;
        },

        // Ctrl+C 종료 (정상 종료)
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl+C received. Initiating graceful shutdown...");
            shutdown_token.cancel(); // 열린 Session 들에 종료 신호
        },
    }

    // 10. 연결 정리 대기
    info!("Waiting for connections to shutdown...");
    server_handle.stop(true).await;
    info!("System has shut down gracefully");

    Ok(())
}
