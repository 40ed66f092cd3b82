use lazy_static::lazy_static;
use prometheus::{
    opts, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};

lazy_static! {
    // register_... 매크로는 기본 레지스트리에 자동으로 등록하므로,
    // 여기서는 Opts만 생성하고 register_custom_metrics 에서 수동으로 등록합니다.

    /// The current number of players waiting in the matchmaking queue.
    pub static ref PLAYERS_IN_QUEUE: IntGauge =
        IntGauge::with_opts(opts!("players_in_queue", "Current number of players in matchmaking queue")).unwrap();

    /// Total number of queue_up requests accepted (including re-queues after a cancelled match)
    pub static ref PLAYERS_ENQUEUED_TOTAL: IntCounter =
        IntCounter::with_opts(opts!("players_enqueued_total", "Total players enqueued")).unwrap();

    /// Total number of players re-enqueued after a cancelled match
    pub static ref PLAYERS_REQUEUED_TOTAL: IntCounter =
        IntCounter::with_opts(opts!("players_requeued_total", "Total players re-enqueued after a cancelled match")).unwrap();

    /// The total number of candidate matches created from the queue.
    pub static ref MATCHES_CREATED_TOTAL: IntCounter =
        IntCounter::with_opts(opts!("matches_created_total", "Total number of matches created")).unwrap();

    pub static ref MATCHES_CONFIRMED_TOTAL: IntCounter =
        IntCounter::with_opts(opts!("matches_confirmed_total", "Total number of matches confirmed by every player")).unwrap();

    /// Cancelled matches, labelled by reason (declined / timeout)
    pub static ref MATCHES_CANCELED_TOTAL: IntCounterVec =
        IntCounterVec::new(
            Opts::new("matches_canceled_total", "Total number of matches cancelled"),
            &["reason"],
        )
        .unwrap();

    /// Histogram of time between match_found and the last confirmation (seconds)
    pub static ref MATCH_CONFIRM_DURATION_SECONDS: Histogram =
        Histogram::with_opts(HistogramOpts::new(
            "match_confirm_duration_seconds",
            "Time players took to confirm a match (seconds)"
        ).buckets(vec![0.5, 1.0, 2.0, 5.0, 10.0, 15.0, 20.0, 30.0])).unwrap();

    pub static ref GAMES_STARTED_TOTAL: IntCounter =
        IntCounter::with_opts(opts!("games_started_total", "Total number of games started")).unwrap();

    pub static ref GAMES_FINISHED_TOTAL: IntCounter =
        IntCounter::with_opts(opts!("games_finished_total", "Total number of games that reached game over")).unwrap();

    /// Games currently alive (actor running)
    pub static ref ACTIVE_GAMES: IntGauge =
        IntGauge::with_opts(opts!("active_games", "Number of running game actors")).unwrap();

    /// Turns that ended because the turn timer fired
    pub static ref TURNS_EXPIRED_TOTAL: IntCounter =
        IntCounter::with_opts(opts!("turns_expired_total", "Total turns ended by the turn timer")).unwrap();

    /// Rejected player actions, labelled by error kind
    pub static ref GAMEPLAY_ERRORS_TOTAL: IntCounterVec =
        IntCounterVec::new(
            Opts::new("gameplay_errors_total", "Total gameplay error responses sent to players"),
            &["kind"],
        )
        .unwrap();

    /// Active websocket connections.
    pub static ref ACTIVE_WS_CONNECTIONS: IntGauge =
        IntGauge::with_opts(opts!("active_ws_connections", "Number of active websocket connections")).unwrap();

    /// Frames that could not be parsed into a client message
    pub static ref INVALID_CLIENT_MESSAGES_TOTAL: IntCounter =
        IntCounter::with_opts(opts!("invalid_client_messages_total", "Client frames that failed to parse")).unwrap();
}

/// Registers all custom metrics defined in this crate to the given registry.
///
/// This function should be called by each service during its startup phase
/// to ensure metrics are available for scraping.
///
/// # Arguments
///
/// * `registry` - The Prometheus registry served on `/metrics`.
///
/// # Returns
///
/// * `Result<(), prometheus::Error>` - Returns an error if any metric fails to register.
pub fn register_custom_metrics(registry: &Registry) -> Result<(), prometheus::Error> {
    registry.register(Box::new(PLAYERS_IN_QUEUE.clone()))?;
    registry.register(Box::new(PLAYERS_ENQUEUED_TOTAL.clone()))?;
    registry.register(Box::new(PLAYERS_REQUEUED_TOTAL.clone()))?;

    registry.register(Box::new(MATCHES_CREATED_TOTAL.clone()))?;
    registry.register(Box::new(MATCHES_CONFIRMED_TOTAL.clone()))?;
    registry.register(Box::new(MATCHES_CANCELED_TOTAL.clone()))?;
    registry.register(Box::new(MATCH_CONFIRM_DURATION_SECONDS.clone()))?;

    registry.register(Box::new(GAMES_STARTED_TOTAL.clone()))?;
    registry.register(Box::new(GAMES_FINISHED_TOTAL.clone()))?;
    registry.register(Box::new(ACTIVE_GAMES.clone()))?;
    registry.register(Box::new(TURNS_EXPIRED_TOTAL.clone()))?;
    registry.register(Box::new(GAMEPLAY_ERRORS_TOTAL.clone()))?;

    registry.register(Box::new(ACTIVE_WS_CONNECTIONS.clone()))?;
    registry.register(Box::new(INVALID_CLIENT_MESSAGES_TOTAL.clone()))?;

    Ok(())
}
