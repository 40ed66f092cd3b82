pub mod event;
pub mod player;
pub mod protocol;
