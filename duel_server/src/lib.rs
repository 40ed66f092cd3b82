use actix::{Actor, Addr};
use std::io;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    dispatcher::{messages::Register, subscriber::Subscriber, Dispatcher},
    env::{GameSettings, LoggingSettings, MatchmakingSettings, Settings},
    game::game_manager::GameManager,
    matchmaking::{matchmaker::Matchmaker, queue_manager::QueueManager},
};

pub mod dispatcher;
pub mod env;
pub mod errors;
pub mod game;
pub mod matchmaking;
pub mod session;
pub mod shared;

/// 파일 writer 의 guard 를 들고 있습니다. drop 되면 남은 로그가 flush 됩니다.
pub struct LoggerManager {
    _guard: WorkerGuard,
}

impl LoggerManager {
    /// 콘솔(pretty)과 일 단위로 회전하는 파일(compact, ANSI 없음)에 동시에 기록합니다.
    pub fn setup(logging: &LoggingSettings) -> Self {
        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, &logging.directory, &logging.filename);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

        let console_layer = fmt::layer()
            .with_writer(io::stdout)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .pretty();

        // 세션/게임 id 로 grep 하기 쉽도록 한 줄에 한 이벤트
        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_target(true)
            .compact();

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .init();

        tracing::info!(
            "Logger ready: console + {}/{} (filter: {})",
            logging.directory,
            logging.filename,
            logging.level
        );

        Self { _guard: guard }
    }
}

// 서버 전체에서 공유하는 상태
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub dispatcher_addr: Addr<Dispatcher>,
    pub logger_manager: Arc<LoggerManager>,
    pub metrics_registry: prometheus::Registry,
    pub shutdown_token: CancellationToken,
}

/// Dispatcher 를 띄우고 프로세스 수명 동안 살아있는 핸들러들을 등록합니다.
///
/// 등록 순서가 곧 이벤트 전달 순서입니다: QueueManager, Matchmaker, GameManager.
/// Match 와 Game 핸들러는 이후 런타임에 스스로 등록/해제됩니다.
pub fn spawn_engine(
    matchmaking: &MatchmakingSettings,
    game: &GameSettings,
) -> Addr<Dispatcher> {
    let dispatcher = Dispatcher::new().start();

    dispatcher.do_send(Register(Subscriber::queue_manager(
        QueueManager::new().start(),
    )));
    dispatcher.do_send(Register(Subscriber::matchmaker(
        Matchmaker::new(matchmaking.clone()).start(),
    )));
    dispatcher.do_send(Register(Subscriber::game_manager(
        GameManager::new(game.clone()).start(),
    )));

    dispatcher
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use uuid::Uuid;

    #[test]
    fn logger_writes_to_the_configured_file() {
        let directory = std::env::temp_dir().join(format!("duel_server-{}", Uuid::new_v4()));
        fs::create_dir_all(&directory).unwrap();
        let logging = LoggingSettings {
            level: "info".to_string(),
            directory: directory.to_string_lossy().into_owned(),
            filename: "duel.log".to_string(),
        };

        let manager = LoggerManager::setup(&logging);
        tracing::error!("hello from the file layer");
        drop(manager);

        let written: String = fs::read_dir(&directory)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("duel.log"))
            .map(|entry| fs::read_to_string(entry.path()).unwrap())
            .collect();
        assert!(written.contains("hello from the file layer"));
        assert!(!written.contains('\u{1b}'));

        let _ = fs::remove_dir_all(&directory);
    }
}
