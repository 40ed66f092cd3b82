use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub server: ServerSettings,
    pub matchmaking: MatchmakingSettings,
    pub game: GameSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        println!("Loading configuration for RUN_MODE: {}", &run_mode);

        let s = Config::builder()
            // Load environment-specific file (e.g., development.toml, production.toml)
            .add_source(
                File::with_name(&format!("config/{}", run_mode))
                    .format(FileFormat::Toml)
                    .required(true),
            )
            // Add environment variables (e.g., APP_SERVER__PORT=8000)
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_address: String,
    pub port: u16,
    pub metrics_auth_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// RUST_LOG 가 없을 때 쓰는 EnvFilter 지시어
    pub level: String,
    pub directory: String,
    pub filename: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatchmakingSettings {
    /// Match 가 모든 플레이어의 수락을 기다리는 시간 (ms)
    pub confirm_timeout_ms: u64,
    pub heartbeat_interval_seconds: u64,
    pub heartbeat_timeout_seconds: u64,
}

impl MatchmakingSettings {
    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_millis(self.confirm_timeout_ms)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_seconds)
    }

    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(self.heartbeat_timeout_seconds)
    }
}

impl Default for MatchmakingSettings {
    fn default() -> Self {
        Self {
            confirm_timeout_ms: 15_000,
            heartbeat_interval_seconds: 5,
            heartbeat_timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GameSettings {
    pub turn_duration_ms: u64,
    /// 멀리건을 끝내지 않은 플레이어가 있어도 턴을 시작하기까지의 시간 (ms)
    pub mulligan_timeout_ms: u64,
    /// 덱 생성 RNG 시드. 없으면 엔트로피에서 시드를 뽑습니다.
    #[serde(default)]
    pub deck_seed: Option<u64>,
}

impl GameSettings {
    pub fn turn_duration(&self) -> Duration {
        Duration::from_millis(self.turn_duration_ms)
    }

    pub fn mulligan_timeout(&self) -> Duration {
        Duration::from_millis(self.mulligan_timeout_ms)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            turn_duration_ms: 75_000,
            mulligan_timeout_ms: 30_000,
            deck_seed: None,
        }
    }
}
