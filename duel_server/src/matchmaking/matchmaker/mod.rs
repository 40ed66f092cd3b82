use actix::{Actor, Context};
use tracing::info;

use crate::env::MatchmakingSettings;

pub mod handlers;

/// CreateMatch 를 받아 Match 액터를 만들고 등록하는 팩토리
pub struct Matchmaker {
    pub settings: MatchmakingSettings,
}

impl Actor for Matchmaker {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!(
            "Matchmaker started (confirm timeout: {:?})",
            self.settings.confirm_timeout()
        );
    }
}

impl Matchmaker {
    pub fn new(settings: MatchmakingSettings) -> Self {
        Self { settings }
    }
}
