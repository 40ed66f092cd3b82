use thiserror::Error;

use crate::game::board::AttackStatus;

/// Player-facing rule violations. The `Display` text is sent verbatim in the
/// `error` response to the acting player.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameplayError {
    #[error("Card not found")]
    CardNotFound,

    #[error("Not enough mana")]
    NotEnoughMana { cost: u32, available: u32 },

    #[error("Cannot attack with this card")]
    CannotAttack,

    #[error("Cannot attack player with minions on board")]
    MinionsOnBoard,

    #[error("Not your turn")]
    NotYourTurn,
}

impl GameplayError {
    /// metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            GameplayError::CardNotFound => "card_not_found",
            GameplayError::NotEnoughMana { .. } => "not_enough_mana",
            GameplayError::CannotAttack => "cannot_attack",
            GameplayError::MinionsOnBoard => "minions_on_board",
            GameplayError::NotYourTurn => "not_your_turn",
        }
    }
}

/// Board 전투 primitive 에서 발생하는 에러
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatError {
    #[error("Defender in {0:?} status cannot attack")]
    CannotAttack(AttackStatus),
}

impl From<CombatError> for GameplayError {
    fn from(err: CombatError) -> Self {
        match err {
            CombatError::CannotAttack(_) => GameplayError::CannotAttack,
        }
    }
}

/// Unified error type for server bootstrap paths
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metrics registration failed: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Actor mailbox error: {0}")]
    Mailbox(#[from] actix::MailboxError),
}

impl From<ServerError> for std::io::Error {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Io(e) => e,
            other => std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
        }
    }
}
