use actix::{Actor, ActorContext, Addr, AsyncContext, Context, SpawnHandle};
use metrics::{ACTIVE_GAMES, GAMEPLAY_ERRORS_TOTAL, GAMES_FINISHED_TOTAL, TURNS_EXPIRED_TOTAL};
use rand::rngs::StdRng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    dispatcher::{messages::Unregister, Dispatcher},
    env::GameSettings,
    errors::GameplayError,
    game::state::{GamePhase, GameState, TurnStart},
    shared::{player::Player, protocol::ServerMessage},
};

pub mod handlers;

/// 한 판의 게임을 소유하는 액터.
/// 규칙은 GameState 가 처리하고, 이 액터는 타이머와 응답 전달만 담당합니다.
pub struct GameActor {
    pub game_id: Uuid,
    pub players: [Player; 2],
    pub state: GameState,
    pub settings: GameSettings,
    pub dispatcher: Addr<Dispatcher>,
    pub turn_timer: Option<SpawnHandle>,
    pub mulligan_timer: Option<SpawnHandle>,
}

impl Actor for GameActor {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        ACTIVE_GAMES.inc();

        // 1. 시작 핸드 분배
        for (player_id, cards) in self.state.deal_starting_hands() {
            if let Some(player) = self.player(player_id) {
                player.send(ServerMessage::StartingHand {
                    game_id: self.game_id,
                    cards,
                });
            }
        }

        // 2. 멀리건 제한 시간. 지나면 버리지 않은 플레이어가 있어도 턴을 시작합니다.
        self.mulligan_timer = Some(ctx.run_later(
            self.settings.mulligan_timeout(),
            |act, ctx| {
                act.mulligan_timer = None;
                if act.state.phase() == GamePhase::Mulligan {
                    warn!("Game {} mulligan timed out. Starting turns.", act.game_id);
                    act.begin_turns(ctx);
                }
            },
        ));

        info!("Game {} started. Waiting for mulligan.", self.game_id);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        ACTIVE_GAMES.dec();
        info!("Game {} stopped", self.game_id);
    }
}

impl GameActor {
    pub fn new(
        game_id: Uuid,
        players: [Player; 2],
        settings: GameSettings,
        mut rng: StdRng,
        dispatcher: Addr<Dispatcher>,
    ) -> Self {
        let state = GameState::new(game_id, [players[0].id(), players[1].id()], &mut rng);
        Self {
            game_id,
            players,
            state,
            settings,
            dispatcher,
            turn_timer: None,
            mulligan_timer: None,
        }
    }

    pub fn player(&self, player_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == player_id)
    }

    pub fn broadcast(&self, msg: ServerMessage) {
        for player in &self.players {
            player.send(msg.clone());
        }
    }

    pub fn reply_error(&self, player: &Player, err: GameplayError) {
        debug!(
            "Game {}: rejected action from {}: {:?}",
            self.game_id,
            player.id(),
            err
        );
        GAMEPLAY_ERRORS_TOTAL.with_label_values(&[err.kind()]).inc();
        player.send(ServerMessage::error(err.to_string()));
    }

    pub fn begin_turns(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.mulligan_timer.take() {
            ctx.cancel_future(handle);
        }
        if let Some(turn) = self.state.start_turns() {
            info!("Game {}: turn loop started, {} moves first", self.game_id, turn.current);
            self.announce_turn(turn, ctx);
        }
    }

    pub fn advance_turn(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.turn_timer.take() {
            ctx.cancel_future(handle);
        }
        if let Some(turn) = self.state.end_turn() {
            self.announce_turn(turn, ctx);
        }
    }

    fn announce_turn(&mut self, turn: TurnStart, ctx: &mut Context<Self>) {
        let duration = self.settings.turn_duration();

        if let Some(current) = self.player(turn.current) {
            current.send(ServerMessage::StartTurn {
                game_id: self.game_id,
                duration: duration.as_millis() as u64,
                drawn_card: turn.drawn_card,
                mana: turn.mana,
                cards_left: turn.cards_left,
                hand_size: turn.hand_size,
            });
        }
        if let Some(waiting) = self.player(turn.waiting) {
            waiting.send(ServerMessage::WaitTurn);
        }

        // 턴 번호가 바뀌었으면 늦게 도착한 만료는 무시합니다.
        let turn_number = turn.turn_number;
        self.turn_timer = Some(ctx.run_later(duration, move |act, ctx| {
            act.turn_timer = None;
            if act.state.phase() != GamePhase::Turns || act.state.turn_number() != turn_number {
                return;
            }
            debug!("Game {}: turn {} expired", act.game_id, turn_number);
            TURNS_EXPIRED_TOTAL.inc();
            act.advance_turn(ctx);
        }));
    }

    /// GameOver 를 알리고 Dispatcher 에서 빠진 뒤 멈춥니다.
    pub fn finish(&mut self, ctx: &mut Context<Self>) {
        let Some((winner, loser)) = self.state.result() else {
            return;
        };
        self.state.finish();

        for handle in [self.turn_timer.take(), self.mulligan_timer.take()]
            .into_iter()
            .flatten()
        {
            ctx.cancel_future(handle);
        }

        info!("Game {} over. Winner: {}, loser: {}", self.game_id, winner, loser);
        self.broadcast(ServerMessage::GameOver { winner, loser });
        GAMES_FINISHED_TOTAL.inc();

        self.dispatcher.do_send(Unregister {
            handler_id: self.game_id,
        });
        ctx.stop();
    }
}
