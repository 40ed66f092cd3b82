use actix::{Actor, Addr, Context, Handler};
use metrics::GAMES_STARTED_TOTAL;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dispatcher::{
        messages::{Process, Register},
        subscriber::Subscriber,
        Dispatcher,
    },
    env::GameSettings,
    game::game_actor::GameActor,
    shared::{event::EventKind, player::Player},
};

/// StartGame 을 받아 Game 액터를 만들고 등록하는 팩토리.
/// 각 Game 의 덱 RNG 는 매니저가 가진 rng 에서 파생됩니다.
pub struct GameManager {
    pub settings: GameSettings,
    rng: StdRng,
}

impl Actor for GameManager {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!(
            "GameManager started (turn: {:?}, mulligan: {:?}, seeded: {})",
            self.settings.turn_duration(),
            self.settings.mulligan_timeout(),
            self.settings.deck_seed.is_some()
        );
    }
}

impl GameManager {
    pub fn new(settings: GameSettings) -> Self {
        let rng = match settings.deck_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { settings, rng }
    }

    fn start_game(&mut self, players: Vec<Player>, dispatcher: &Addr<Dispatcher>) {
        let players: [Player; 2] = match players.try_into() {
            Ok(players) => players,
            Err(players) => {
                warn!(
                    "start_game needs exactly 2 players, got {}. Ignoring.",
                    players.len()
                );
                return;
            }
        };

        let game_id = Uuid::new_v4();
        let game_rng = StdRng::seed_from_u64(self.rng.gen());
        info!(
            "Game {} starting for {} vs {}",
            game_id,
            players[0].id(),
            players[1].id()
        );

        let addr = GameActor::new(
            game_id,
            players,
            self.settings.clone(),
            game_rng,
            dispatcher.clone(),
        )
        .start();
        dispatcher.do_send(Register(Subscriber::game(game_id, addr)));

        GAMES_STARTED_TOTAL.inc();
    }
}

impl Handler<Process> for GameManager {
    type Result = ();

    fn handle(&mut self, msg: Process, _ctx: &mut Context<Self>) -> Self::Result {
        if let EventKind::StartGame { players } = msg.event.kind {
            self.start_game(players, &msg.dispatcher);
        }
    }
}
