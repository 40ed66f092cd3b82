pub mod board;
pub mod card;
pub mod game_actor;
pub mod game_manager;
pub mod player;
pub mod state;

/// 마나 상한
pub const MAX_MANA: u32 = 10;
/// 보드에 동시에 올라갈 수 있는 하수인 수
pub const BOARD_SIZE: usize = 7;
pub const STARTING_HEALTH: u32 = 30;
pub const DECK_SIZE: usize = 60;
pub const STARTING_HAND_SIZE: usize = 3;
